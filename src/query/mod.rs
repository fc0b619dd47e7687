//! Pure filtering, grouping and matching over loaded catalog tables

pub mod detail;
pub mod filter;
pub mod group;
pub mod preset;

pub use detail::*;
pub use filter::*;
pub use group::*;
pub use preset::*;

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use crate::model::{
        Attribute, AttributeFilter, IdealTeamPreset, IdolCard, SkillInfo, Slot, SlotRole, Stats,
    };

    pub fn card(name: &str, skill: &str, duration: u32, probability: &str, attribute: &str, spec: &str) -> IdolCard {
        IdolCard {
            name: name.into(),
            card_name: format!("［テスト］<br>{}", name),
            skill: skill.into(),
            duration,
            specialization: spec.into(),
            attribute: Attribute::from(attribute),
            probability: probability.parse().expect("valid probability"),
            stats: Stats { vo: 100, da: 200, vi: 300 },
            center_effect: "効果".into(),
            sub_attribute: None,
            dominant: None,
            gacha_url: None,
            training_image_url: None,
            image_path: PathBuf::from(format!("img/{}.png", name)),
        }
    }

    pub fn skill_info(skill: &str, categories: &str) -> SkillInfo {
        SkillInfo {
            skill: skill.into(),
            description: format!("{} の説明", skill),
            categories: categories.into(),
        }
    }

    pub fn slot(role: SlotRole, skill: &str, duration: &str, spec: &str, attribute: &str) -> Slot {
        Slot {
            role,
            skill: skill.into(),
            raw_duration: duration.into(),
            duration: duration.parse().ok(),
            specialization: spec.into(),
            attribute: AttributeFilter::from(attribute),
        }
    }

    /// Preset whose slots all require "Dance" and accept every attribute
    pub fn preset(name: &str, song: &str, slots: [(&str, &str); 6]) -> IdealTeamPreset {
        IdealTeamPreset {
            name: name.into(),
            song: song.into(),
            slots: std::array::from_fn(|i| {
                let (skill, duration) = slots[i];
                slot(SlotRole::ALL[i], skill, duration, "Dance", "全タイプ")
            }),
        }
    }
}
