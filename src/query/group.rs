use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::detail::skill_detail;
use crate::model::{specialization_axes, IdolCard, Probability, SkillDetail, SkillInfo};

/// Bucket key within a skill group.
///
/// Field order gives the display order: duration ascending, then probability
/// rank (Low < Mid < High).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DurationKey {
    pub duration: u32,
    pub probability: Probability,
}

impl DurationKey {
    pub fn of(card: &IdolCard) -> Self {
        Self {
            duration: card.duration,
            probability: card.probability,
        }
    }
}

impl fmt::Display for DurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.duration, self.probability)
    }
}

/// Cards of one specialization within a bucket, in attribute order
#[derive(Debug, Clone, Serialize)]
pub struct Lane<'a> {
    pub specialization: &'a str,
    pub cards: Vec<&'a IdolCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationBucket<'a> {
    pub key: DurationKey,
    pub lanes: Vec<Lane<'a>>,
}

impl<'a> DurationBucket<'a> {
    pub fn cards(&self) -> impl Iterator<Item = &'a IdolCard> + '_ {
        self.lanes.iter().flat_map(|lane| lane.cards.iter().copied())
    }
}

/// All filtered cards sharing one skill
#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup<'a> {
    pub skill: &'a str,
    pub detail: Option<SkillDetail<'a>>,
    pub buckets: Vec<DurationBucket<'a>>,
}

impl SkillGroup<'_> {
    pub fn card_count(&self) -> usize {
        self.buckets.iter().map(|b| b.cards().count()).sum()
    }
}

/// Stable sort by attribute rank: Cu, Co, Pa, then anything else
pub fn sort_by_attribute(cards: &mut [&IdolCard]) {
    cards.sort_by_key(|card| card.attribute.rank());
}

/// Group cards by skill in order of first appearance
pub fn group_by_skill<'a>(cards: &[&'a IdolCard], skills: &'a [SkillInfo]) -> Vec<SkillGroup<'a>> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut members: HashMap<&'a str, Vec<&'a IdolCard>> = HashMap::new();

    for &card in cards {
        members
            .entry(card.skill.as_str())
            .or_insert_with(|| {
                order.push(card.skill.as_str());
                Vec::new()
            })
            .push(card);
    }

    order
        .into_iter()
        .map(|skill| {
            let cards = members.remove(skill).unwrap_or_default();
            SkillGroup {
                skill,
                detail: skill_detail(skills, skill),
                buckets: bucket_cards(skill, cards),
            }
        })
        .collect()
}

fn bucket_cards<'a>(skill: &str, cards: Vec<&'a IdolCard>) -> Vec<DurationBucket<'a>> {
    let mut keyed: BTreeMap<DurationKey, Vec<&'a IdolCard>> = BTreeMap::new();
    for card in cards {
        keyed.entry(DurationKey::of(card)).or_default().push(card);
    }

    keyed
        .into_iter()
        .map(|(key, cards)| DurationBucket {
            key,
            lanes: lay_out_lanes(skill, cards),
        })
        .collect()
}

/// One lane per specialization axis of the skill, even when empty. Cards with
/// a specialization outside the axes get extra lanes after them.
fn lay_out_lanes<'a>(skill: &str, cards: Vec<&'a IdolCard>) -> Vec<Lane<'a>> {
    let mut lanes: Vec<Lane<'a>> = specialization_axes(skill)
        .iter()
        .map(|axis| Lane {
            specialization: *axis,
            cards: Vec::new(),
        })
        .collect();

    for card in cards {
        match lanes
            .iter_mut()
            .find(|lane| lane.specialization == card.specialization)
        {
            Some(lane) => lane.cards.push(card),
            None => lanes.push(Lane {
                specialization: card.specialization.as_str(),
                cards: vec![card],
            }),
        }
    }

    for lane in &mut lanes {
        sort_by_attribute(&mut lane.cards);
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DANCE, MUTUAL, VISUAL, VOCAL};
    use crate::query::testing::{card, skill_info};

    #[test]
    fn test_duration_key_order() {
        let key = |duration, probability| DurationKey { duration, probability };
        assert!(key(10, Probability::Low) < key(10, Probability::Mid));
        assert!(key(10, Probability::Mid) < key(20, Probability::Low));
        assert!(key(10, Probability::High) > key(10, Probability::Low));
        assert!(key(9, Probability::High) < key(10, Probability::Low));
    }

    #[test]
    fn test_duration_key_display() {
        let key = DurationKey {
            duration: 7,
            probability: Probability::High,
        };
        assert_eq!(key.to_string(), "7高");
    }

    #[test]
    fn test_two_probabilities_same_duration() {
        let cards = vec![
            card("a", "A", 10, "Low", "Cu", "Vocal"),
            card("b", "A", 10, "High", "Co", "Vocal"),
        ];
        let refs: Vec<&IdolCard> = cards.iter().collect();
        let groups = group_by_skill(&refs, &[]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].skill, "A");
        assert!(groups[0].detail.is_none());
        let keys: Vec<_> = groups[0].buckets.iter().map(|b| b.key).collect();
        assert_eq!(
            keys,
            vec![
                DurationKey { duration: 10, probability: Probability::Low },
                DurationKey { duration: 10, probability: Probability::High },
            ]
        );
        assert_eq!(groups[0].card_count(), 2);
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let cards = vec![
            card("a", "Z", 7, "高", "Cu", VOCAL),
            card("b", "A", 7, "高", "Cu", VOCAL),
            card("c", "Z", 9, "高", "Cu", VOCAL),
        ];
        let refs: Vec<&IdolCard> = cards.iter().collect();
        let skills = vec![skill_info("A", "x")];
        let groups = group_by_skill(&refs, &skills);
        let order: Vec<_> = groups.iter().map(|g| g.skill).collect();
        assert_eq!(order, vec!["Z", "A"]);
        assert_eq!(groups[1].detail.as_ref().map(|d| d.skill), Some("A"));
    }

    #[test]
    fn test_lane_attribute_order_is_stable() {
        let cards = vec![
            card("p1", "A", 7, "高", "Pa", VOCAL),
            card("x", "A", 7, "高", "??", VOCAL),
            card("c1", "A", 7, "高", "Co", VOCAL),
            card("u1", "A", 7, "高", "Cu", VOCAL),
            card("c2", "A", 7, "高", "Co", VOCAL),
            card("u2", "A", 7, "高", "Cu", VOCAL),
        ];
        let refs: Vec<&IdolCard> = cards.iter().collect();
        let groups = group_by_skill(&refs, &[]);
        let lane = &groups[0].buckets[0].lanes[0];
        assert_eq!(lane.specialization, VOCAL);
        let order: Vec<_> = lane.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["u1", "u2", "c1", "c2", "p1", "x"]);
    }

    #[test]
    fn test_default_axes_always_present() {
        let cards = vec![card("a", "A", 7, "高", "Cu", DANCE)];
        let refs: Vec<&IdolCard> = cards.iter().collect();
        let groups = group_by_skill(&refs, &[]);
        let lanes = &groups[0].buckets[0].lanes;
        let specs: Vec<_> = lanes.iter().map(|l| l.specialization).collect();
        assert_eq!(specs, vec![VOCAL, DANCE, VISUAL]);
        assert!(lanes[0].cards.is_empty());
        assert_eq!(lanes[1].cards.len(), 1);
    }

    #[test]
    fn test_composite_axes_and_extra_lane() {
        let cards = vec![
            card("a", MUTUAL, 9, "中", "Cu", "ダンス&ビジュアル"),
            card("b", MUTUAL, 9, "中", "Co", VOCAL),
        ];
        let refs: Vec<&IdolCard> = cards.iter().collect();
        let groups = group_by_skill(&refs, &[]);
        let specs: Vec<_> = groups[0].buckets[0]
            .lanes
            .iter()
            .map(|l| l.specialization)
            .collect();
        assert_eq!(
            specs,
            vec!["ボーカル&ダンス", "ダンス&ビジュアル", "ビジュアル&ボーカル", VOCAL]
        );
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(group_by_skill(&[], &[]).is_empty());
    }
}
