use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::card::{Attribute, IdolCard};

/// Position of a slot within a formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Center,
    /// Members are numbered 2 to 5, the center being 1
    Member(u8),
    Guest,
}

impl SlotRole {
    pub const ALL: [SlotRole; 6] = [
        SlotRole::Center,
        SlotRole::Member(2),
        SlotRole::Member(3),
        SlotRole::Member(4),
        SlotRole::Member(5),
        SlotRole::Guest,
    ];

    pub fn is_guest(self) -> bool {
        self == SlotRole::Guest
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRole::Center => write!(f, "Center"),
            SlotRole::Member(n) => write!(f, "Idol {}", n),
            SlotRole::Guest => write!(f, "Guest"),
        }
    }
}

/// Set of accepted durations, written as `10` or `7,9,11`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationSpec(BTreeSet<u32>);

impl DurationSpec {
    pub fn contains(&self, duration: u32) -> bool {
        self.0.contains(&duration)
    }
}

impl FromStr for DurationSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = BTreeSet::new();
        for token in s.split(',') {
            let token = token.trim();
            let value = token
                .parse::<u32>()
                .map_err(|_| format!("invalid duration '{}' in '{}'", token, s))?;
            set.insert(value);
        }
        Ok(Self(set))
    }
}

/// Attribute requirement of a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    AllTypes,
    Only(Attribute),
}

impl AttributeFilter {
    pub fn accepts(&self, attribute: &Attribute) -> bool {
        match self {
            AttributeFilter::AllTypes => true,
            AttributeFilter::Only(required) => required == attribute,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AttributeFilter::AllTypes => "全タイプ",
            AttributeFilter::Only(a) => a.label(),
        }
    }
}

impl From<&str> for AttributeFilter {
    fn from(s: &str) -> Self {
        match s.trim() {
            "全タイプ" | "ALL_TYPES" => AttributeFilter::AllTypes,
            other => AttributeFilter::Only(Attribute::from(other)),
        }
    }
}

impl Serialize for AttributeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One position of an ideal team formation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub role: SlotRole,
    /// Empty when the formation leaves this position open
    pub skill: String,
    /// Duration text as written; kept for display and export
    pub raw_duration: String,
    /// `None` when `raw_duration` could not be parsed
    pub duration: Option<DurationSpec>,
    pub specialization: String,
    pub attribute: AttributeFilter,
}

impl Slot {
    pub fn is_vacant(&self) -> bool {
        self.skill.trim().is_empty()
    }

    pub fn matches(&self, card: &IdolCard) -> bool {
        let Some(duration) = &self.duration else {
            return false;
        };
        card.skill == self.skill
            && duration.contains(card.duration)
            && self.attribute.accepts(&card.attribute)
            && card.specialization == self.specialization
    }
}

/// A curated six-slot formation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealTeamPreset {
    pub name: String,
    pub song: String,
    pub slots: [Slot; 6],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::{Probability, Stats};
    use std::path::PathBuf;

    fn card(skill: &str, duration: u32, spec: &str, attr: &str) -> IdolCard {
        IdolCard {
            name: "n".into(),
            card_name: "n".into(),
            skill: skill.into(),
            duration,
            specialization: spec.into(),
            attribute: Attribute::from(attr),
            probability: Probability::Mid,
            stats: Stats::default(),
            center_effect: String::new(),
            sub_attribute: None,
            dominant: None,
            gacha_url: None,
            training_image_url: None,
            image_path: PathBuf::from("n.png"),
        }
    }

    fn slot(skill: &str, duration: &str, spec: &str, attr: &str) -> Slot {
        Slot {
            role: SlotRole::Center,
            skill: skill.into(),
            raw_duration: duration.into(),
            duration: duration.parse().ok(),
            specialization: spec.into(),
            attribute: AttributeFilter::from(attr),
        }
    }

    #[test]
    fn test_duration_spec_parse() {
        let spec: DurationSpec = "10, 20".parse().unwrap();
        assert!(spec.contains(10) && spec.contains(20));
        assert!(!spec.contains(15));
        let single: DurationSpec = "7".parse().unwrap();
        assert!(single.contains(7));
        assert!(!single.contains(70));
    }

    #[test]
    fn test_duration_spec_rejects_garbage() {
        assert!("".parse::<DurationSpec>().is_err());
        assert!("10,x".parse::<DurationSpec>().is_err());
        assert!("10,,20".parse::<DurationSpec>().is_err());
    }

    #[test]
    fn test_all_types_slot_ignores_attribute() {
        let s = slot("X", "10,20", "Dance", "ALL_TYPES");
        assert!(s.matches(&card("X", 10, "Dance", "Cu")));
        assert!(s.matches(&card("X", 20, "Dance", "Pa")));
        assert!(!s.matches(&card("X", 15, "Dance", "Cu")));
        assert!(!s.matches(&card("X", 10, "Vocal", "Cu")));
        assert!(!s.matches(&card("Y", 10, "Dance", "Cu")));
    }

    #[test]
    fn test_attribute_slot() {
        let s = slot("X", "10", "Dance", "Co");
        assert!(s.matches(&card("X", 10, "Dance", "Co")));
        assert!(!s.matches(&card("X", 10, "Dance", "Cu")));
    }

    #[test]
    fn test_malformed_slot_matches_nothing() {
        let s = slot("X", "ten", "Dance", "全タイプ");
        assert!(s.duration.is_none());
        assert!(!s.matches(&card("X", 10, "Dance", "Cu")));
    }

    #[test]
    fn test_role_labels() {
        let labels: Vec<String> = SlotRole::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(labels[0], "Center");
        assert_eq!(labels[1], "Idol 2");
        assert_eq!(labels[5], "Guest");
    }
}
