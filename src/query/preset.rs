use serde::Serialize;

use crate::model::{IdealTeamPreset, IdolCard, Slot};

/// Outcome of matching one slot against the roster
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotMatch<'a> {
    /// Matching cards in source order; never empty
    Matched { cards: Vec<&'a IdolCard> },
    NoMatch,
    /// The formation leaves this slot open
    Vacant,
    /// The duration spec could not be parsed
    Malformed { raw: &'a str },
}

impl SlotMatch<'_> {
    pub fn cards(&self) -> &[&IdolCard] {
        match self {
            SlotMatch::Matched { cards } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResolution<'a> {
    pub slot: &'a Slot,
    pub outcome: SlotMatch<'a>,
}

/// A preset with every slot resolved
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPreset<'a> {
    pub name: &'a str,
    pub song: &'a str,
    pub slots: Vec<SlotResolution<'a>>,
}

/// Match one slot. The guest slot keeps only the first match.
pub fn resolve_slot<'a>(slot: &'a Slot, cards: &'a [IdolCard]) -> SlotMatch<'a> {
    if slot.is_vacant() {
        return SlotMatch::Vacant;
    }
    if slot.duration.is_none() {
        return SlotMatch::Malformed {
            raw: &slot.raw_duration,
        };
    }

    let matching = cards.iter().filter(|card| slot.matches(card));
    let cards: Vec<&IdolCard> = if slot.role.is_guest() {
        matching.take(1).collect()
    } else {
        matching.collect()
    };

    if cards.is_empty() {
        SlotMatch::NoMatch
    } else {
        SlotMatch::Matched { cards }
    }
}

/// Resolve all six slots in formation order
pub fn resolve_preset<'a>(preset: &'a IdealTeamPreset, cards: &'a [IdolCard]) -> ResolvedPreset<'a> {
    ResolvedPreset {
        name: &preset.name,
        song: &preset.song,
        slots: preset
            .slots
            .iter()
            .map(|slot| SlotResolution {
                slot,
                outcome: resolve_slot(slot, cards),
            })
            .collect(),
    }
}

/// Presets for the selected songs in file order; an empty selection keeps all
pub fn filter_presets_by_song<'a>(
    presets: &'a [IdealTeamPreset],
    songs: &[String],
) -> Vec<&'a IdealTeamPreset> {
    presets
        .iter()
        .filter(|p| songs.is_empty() || songs.contains(&p.song))
        .collect()
}

/// Song tags in order of first appearance
pub fn song_options(presets: &[IdealTeamPreset]) -> Vec<String> {
    let mut songs: Vec<String> = Vec::new();
    for preset in presets {
        if !songs.contains(&preset.song) {
            songs.push(preset.song.clone());
        }
    }
    songs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testing::{card, preset, slot};
    use crate::model::SlotRole;

    fn roster() -> Vec<IdolCard> {
        vec![
            card("a", "X", 10, "高", "Cu", "Dance"),
            card("b", "X", 20, "中", "Pa", "Dance"),
            card("c", "X", 15, "高", "Co", "Dance"),
            card("d", "X", 10, "高", "Co", "Vocal"),
            card("e", "Y", 10, "高", "Cu", "Dance"),
        ]
    }

    fn names(outcome: &SlotMatch) -> Vec<String> {
        outcome.cards().iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_duration_set_and_all_types() {
        let cards = roster();
        let s = slot(SlotRole::Member(2), "X", "10,20", "Dance", "ALL_TYPES");
        assert_eq!(names(&resolve_slot(&s, &cards)), vec!["a", "b"]);
    }

    #[test]
    fn test_guest_takes_first_only() {
        let cards = roster();
        let guest = slot(SlotRole::Guest, "X", "10,20", "Dance", "全タイプ");
        assert_eq!(names(&resolve_slot(&guest, &cards)), vec!["a"]);

        let member = slot(SlotRole::Member(3), "X", "10,20", "Dance", "全タイプ");
        assert_eq!(names(&resolve_slot(&member, &cards)), vec!["a", "b"]);
    }

    #[test]
    fn test_no_match_is_explicit() {
        let cards = roster();
        let s = slot(SlotRole::Center, "X", "30", "Dance", "Cu");
        assert_eq!(resolve_slot(&s, &cards), SlotMatch::NoMatch);
        assert!(resolve_slot(&s, &[]) == SlotMatch::NoMatch);
    }

    #[test]
    fn test_vacant_and_malformed() {
        let cards = roster();
        let vacant = slot(SlotRole::Member(4), "", "", "", "");
        assert_eq!(resolve_slot(&vacant, &cards), SlotMatch::Vacant);

        let broken = slot(SlotRole::Member(5), "X", "10,abc", "Dance", "Cu");
        assert_eq!(
            resolve_slot(&broken, &cards),
            SlotMatch::Malformed { raw: "10,abc" }
        );
    }

    #[test]
    fn test_resolve_preset_keeps_slot_order() {
        let cards = roster();
        let p = preset("編成", "曲", [("X", "10"), ("Y", "10"), ("", ""), ("X", "20"), ("Z", "7"), ("X", "10,20")]);
        let resolved = resolve_preset(&p, &cards);
        let roles: Vec<_> = resolved.slots.iter().map(|s| s.slot.role).collect();
        assert_eq!(roles, SlotRole::ALL.to_vec());
        assert_eq!(names(&resolved.slots[0].outcome), vec!["a"]);
        assert_eq!(names(&resolved.slots[1].outcome), vec!["e"]);
        assert_eq!(resolved.slots[2].outcome, SlotMatch::Vacant);
        assert_eq!(names(&resolved.slots[3].outcome), vec!["b"]);
        assert_eq!(resolved.slots[4].outcome, SlotMatch::NoMatch);
        assert_eq!(names(&resolved.slots[5].outcome), vec!["a"]);
    }

    #[test]
    fn test_filter_by_song() {
        let presets = vec![
            preset("p1", "曲A", Default::default()),
            preset("p2", "曲B", Default::default()),
            preset("p3", "曲A", Default::default()),
        ];
        let picked = filter_presets_by_song(&presets, &["曲A".to_string()]);
        assert_eq!(picked.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["p1", "p3"]);
        assert_eq!(filter_presets_by_song(&presets, &[]).len(), 3);
        assert_eq!(song_options(&presets), vec!["曲A", "曲B"]);
    }
}
