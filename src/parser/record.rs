//! Raw CSV rows and their conversion into typed catalog records

use serde::Deserialize;
use std::path::PathBuf;

use crate::model::{
    name_from_card, Attribute, AttributeFilter, IdealTeamPreset, IdolCard, Probability, SkillInfo,
    Slot, SlotRole, Stats,
};

#[derive(Debug, Deserialize)]
pub struct IdolRow {
    #[serde(rename = "アイドル名")]
    card_name: String,
    #[serde(rename = "名前", default)]
    name: Option<String>,
    #[serde(rename = "スキル")]
    skill: String,
    #[serde(rename = "秒数")]
    duration: String,
    #[serde(rename = "特化")]
    specialization: String,
    #[serde(rename = "属性")]
    attribute: String,
    #[serde(rename = "確率")]
    probability: String,
    #[serde(rename = "Vo")]
    vo: String,
    #[serde(rename = "Da")]
    da: String,
    #[serde(rename = "Vi")]
    vi: String,
    #[serde(rename = "センター効果")]
    center_effect: String,
    #[serde(rename = "副属性", default)]
    sub_attribute: Option<String>,
    #[serde(rename = "ドミナント", default)]
    dominant: Option<String>,
    #[serde(rename = "メモリアルガシャ", default)]
    gacha_url: Option<String>,
    #[serde(rename = "特訓画像", default)]
    training_image_url: Option<String>,
    #[serde(rename = "画像パス")]
    image_path: String,
}

impl TryFrom<IdolRow> for IdolCard {
    type Error = String;

    fn try_from(row: IdolRow) -> Result<Self, Self::Error> {
        if row.skill.is_empty() {
            return Err("skill is empty".to_string());
        }
        let duration = row
            .duration
            .parse::<u32>()
            .map_err(|_| format!("duration '{}' is not a number", row.duration))?;
        let probability = row.probability.parse::<Probability>()?;
        let stats = Stats {
            vo: parse_stat("Vo", &row.vo)?,
            da: parse_stat("Da", &row.da)?,
            vi: parse_stat("Vi", &row.vi)?,
        };
        let name = non_empty(row.name).unwrap_or_else(|| name_from_card(&row.card_name).to_string());

        Ok(IdolCard {
            name,
            card_name: row.card_name,
            skill: row.skill,
            duration,
            specialization: row.specialization,
            attribute: Attribute::from(row.attribute.as_str()),
            probability,
            stats,
            center_effect: row.center_effect,
            sub_attribute: non_empty(row.sub_attribute),
            dominant: non_empty(row.dominant),
            gacha_url: non_empty(row.gacha_url),
            training_image_url: non_empty(row.training_image_url),
            image_path: PathBuf::from(row.image_path),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillRow {
    #[serde(rename = "スキル")]
    skill: String,
    #[serde(rename = "スキル詳細", default)]
    description: Option<String>,
    #[serde(rename = "スキル分類", default)]
    categories: Option<String>,
}

impl TryFrom<SkillRow> for SkillInfo {
    type Error = String;

    fn try_from(row: SkillRow) -> Result<Self, Self::Error> {
        if row.skill.is_empty() {
            return Err("skill is empty".to_string());
        }
        Ok(SkillInfo {
            skill: row.skill,
            description: row.description.unwrap_or_default(),
            categories: row.categories.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NameRow {
    #[serde(rename = "名前")]
    pub name: String,
}

impl TryFrom<NameRow> for String {
    type Error = String;

    fn try_from(row: NameRow) -> Result<Self, Self::Error> {
        if row.name.is_empty() {
            return Err("name is empty".to_string());
        }
        Ok(row.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamRow {
    #[serde(rename = "編成名")]
    formation: String,
    #[serde(rename = "対応楽曲")]
    song: String,
    #[serde(rename = "スキル1")]
    skill_1: String,
    #[serde(rename = "秒数1")]
    duration_1: String,
    #[serde(rename = "特化1")]
    specialization_1: String,
    #[serde(rename = "属性1")]
    attribute_1: String,
    #[serde(rename = "スキル2")]
    skill_2: String,
    #[serde(rename = "秒数2")]
    duration_2: String,
    #[serde(rename = "特化2")]
    specialization_2: String,
    #[serde(rename = "属性2")]
    attribute_2: String,
    #[serde(rename = "スキル3")]
    skill_3: String,
    #[serde(rename = "秒数3")]
    duration_3: String,
    #[serde(rename = "特化3")]
    specialization_3: String,
    #[serde(rename = "属性3")]
    attribute_3: String,
    #[serde(rename = "スキル4")]
    skill_4: String,
    #[serde(rename = "秒数4")]
    duration_4: String,
    #[serde(rename = "特化4")]
    specialization_4: String,
    #[serde(rename = "属性4")]
    attribute_4: String,
    #[serde(rename = "スキル5")]
    skill_5: String,
    #[serde(rename = "秒数5")]
    duration_5: String,
    #[serde(rename = "特化5")]
    specialization_5: String,
    #[serde(rename = "属性5")]
    attribute_5: String,
    #[serde(rename = "ゲストスキル")]
    guest_skill: String,
    #[serde(rename = "ゲスト秒数")]
    guest_duration: String,
    #[serde(rename = "ゲスト特化")]
    guest_specialization: String,
    #[serde(rename = "ゲスト属性")]
    guest_attribute: String,
}

impl TryFrom<TeamRow> for IdealTeamPreset {
    type Error = String;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        if row.formation.is_empty() {
            return Err("formation name is empty".to_string());
        }
        let [center, m2, m3, m4, m5, guest] = SlotRole::ALL;
        let slots = [
            build_slot(center, row.skill_1, row.duration_1, row.specialization_1, &row.attribute_1),
            build_slot(m2, row.skill_2, row.duration_2, row.specialization_2, &row.attribute_2),
            build_slot(m3, row.skill_3, row.duration_3, row.specialization_3, &row.attribute_3),
            build_slot(m4, row.skill_4, row.duration_4, row.specialization_4, &row.attribute_4),
            build_slot(m5, row.skill_5, row.duration_5, row.specialization_5, &row.attribute_5),
            build_slot(
                guest,
                row.guest_skill,
                row.guest_duration,
                row.guest_specialization,
                &row.guest_attribute,
            ),
        ];

        for slot in slots.iter().filter(|s| !s.is_vacant() && s.duration.is_none()) {
            tracing::warn!(
                formation = %row.formation,
                slot = %slot.role,
                duration = %slot.raw_duration,
                "Unparseable duration spec, slot will not match any idol"
            );
        }

        Ok(IdealTeamPreset {
            name: row.formation,
            song: row.song,
            slots,
        })
    }
}

fn build_slot(
    role: SlotRole,
    skill: String,
    raw_duration: String,
    specialization: String,
    attribute: &str,
) -> Slot {
    Slot {
        role,
        skill,
        duration: raw_duration.parse().ok(),
        raw_duration,
        specialization,
        attribute: AttributeFilter::from(attribute),
    }
}

fn parse_stat(label: &str, value: &str) -> Result<u32, String> {
    let digits: String = value.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse()
        .map_err(|_| format!("{} '{}' is not a number", label, value))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
