use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Skill whose cards carry the secondary attribute and dominant fields
pub const DOMINANT_HARMONY: &str = "ドミナント・ハーモニー";
/// Skill that, like dominant harmony, uses composite specialization axes
pub const MUTUAL: &str = "ミューチャル";

pub const VOCAL: &str = "ボーカル";
pub const DANCE: &str = "ダンス";
pub const VISUAL: &str = "ビジュアル";

const DEFAULT_AXES: &[&str] = &[VOCAL, DANCE, VISUAL];
const COMPOSITE_AXES: &[&str] = &["ボーカル&ダンス", "ダンス&ビジュアル", "ビジュアル&ボーカル"];

/// Specialization columns a skill's cards are laid out under
pub fn specialization_axes(skill: &str) -> &'static [&'static str] {
    match skill {
        DOMINANT_HARMONY | MUTUAL => COMPOSITE_AXES,
        _ => DEFAULT_AXES,
    }
}

/// Card attribute. Display order is Cu, Co, Pa, then anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Cute,
    Cool,
    Passion,
    Other(String),
}

impl Attribute {
    pub fn rank(&self) -> u8 {
        match self {
            Attribute::Cute => 0,
            Attribute::Cool => 1,
            Attribute::Passion => 2,
            Attribute::Other(_) => 3,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Attribute::Cute => "Cu",
            Attribute::Cool => "Co",
            Attribute::Passion => "Pa",
            Attribute::Other(s) => s,
        }
    }
}

impl From<&str> for Attribute {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Cu" | "キュート" => Attribute::Cute,
            "Co" | "クール" => Attribute::Cool,
            "Pa" | "パッション" => Attribute::Passion,
            other => Attribute::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Skill activation probability tier.
///
/// Variant order is the display order; never compare the labels as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Probability {
    Low,
    Mid,
    High,
}

impl Probability {
    /// Label as written in the game data
    pub fn label(self) -> &'static str {
        match self {
            Probability::Low => "低",
            Probability::Mid => "中",
            Probability::High => "高",
        }
    }
}

impl FromStr for Probability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "低" | "Low" | "low" => Ok(Probability::Low),
            "中" | "Mid" | "mid" | "Middle" | "middle" => Ok(Probability::Mid),
            "高" | "High" | "high" => Ok(Probability::High),
            other => Err(format!("unknown probability tier '{}'", other)),
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub vo: u32,
    pub da: u32,
    pub vi: u32,
}

/// One collectible card variant. Identity is the row position in the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdolCard {
    pub name: String,
    /// Card title as written in the roster; may contain `<br>` line breaks
    pub card_name: String,
    pub skill: String,
    pub duration: u32,
    pub specialization: String,
    pub attribute: Attribute,
    pub probability: Probability,
    pub stats: Stats,
    pub center_effect: String,
    pub sub_attribute: Option<String>,
    pub dominant: Option<String>,
    pub gacha_url: Option<String>,
    pub training_image_url: Option<String>,
    pub image_path: PathBuf,
}

impl IdolCard {
    /// Card name with `<br>` markers turned into newlines
    pub fn display_name(&self) -> String {
        self.card_name
            .replace("<br />", "\n")
            .replace("<br/>", "\n")
            .replace("<br>", "\n")
    }

    /// Secondary attribute fields, only meaningful for dominant harmony cards
    pub fn dominant_fields(&self) -> Option<(&str, &str)> {
        if self.skill != DOMINANT_HARMONY {
            return None;
        }
        Some((
            self.sub_attribute.as_deref().unwrap_or_default(),
            self.dominant.as_deref().unwrap_or_default(),
        ))
    }
}

/// Idol name derived from a card title such as `［ステージ衣装］<br>島村卯月`
pub fn name_from_card(card_name: &str) -> &str {
    let tail = ["<br />", "<br/>", "<br>"]
        .iter()
        .filter_map(|marker| card_name.rfind(marker).map(|at| at + marker.len()))
        .max()
        .map_or(card_name, |start| &card_name[start..]);
    tail.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_is_not_lexical() {
        assert!(Probability::Low < Probability::Mid);
        assert!(Probability::Mid < Probability::High);
        // "High" < "Low" as strings; the enum must not follow that
        assert!("High" < "Low");
        assert!(Probability::High > Probability::Low);
    }

    #[test]
    fn test_name_from_card_accepts_every_break_form() {
        assert_eq!(name_from_card("［制服］<br>島村卯月"), "島村卯月");
        assert_eq!(name_from_card("［制服］<br/>島村卯月"), "島村卯月");
        assert_eq!(name_from_card("［制服］<br />島村卯月"), "島村卯月");
        assert_eq!(name_from_card("［a］<br/>［b］<br>渋谷凛"), "渋谷凛");
        assert_eq!(name_from_card(" 本田未央 "), "本田未央");
        assert_eq!(name_from_card("渋谷凛"), "渋谷凛");
    }

    #[test]
    fn test_probability_parse() {
        assert_eq!("高".parse::<Probability>(), Ok(Probability::High));
        assert_eq!(" Low ".parse::<Probability>(), Ok(Probability::Low));
        assert_eq!("中".parse::<Probability>(), Ok(Probability::Mid));
        assert!("最高".parse::<Probability>().is_err());
    }

    #[test]
    fn test_attribute_rank() {
        assert!(Attribute::from("Cu").rank() < Attribute::from("Co").rank());
        assert!(Attribute::from("Co").rank() < Attribute::from("Pa").rank());
        assert_eq!(Attribute::from("Xx"), Attribute::Other("Xx".to_string()));
        assert_eq!(Attribute::from("Xx").rank(), 3);
        assert_eq!(Attribute::from("クール"), Attribute::Cool);
    }

    #[test]
    fn test_specialization_axes() {
        assert_eq!(specialization_axes("何か"), &[VOCAL, DANCE, VISUAL]);
        assert_eq!(specialization_axes(MUTUAL).len(), 3);
        assert!(specialization_axes(DOMINANT_HARMONY).contains(&"ダンス&ビジュアル"));
    }
}
