//! Turns query results into display lines shared by the CLI and the TUI

use crate::images::{ImageStatus, ImageStore};
use crate::model::{IdolCard, SkillDetail};
use crate::query::{ResolvedPreset, SkillGroup, SlotMatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Detail,
    Bucket,
    Lane,
    Card,
    Field,
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub kind: LineKind,
    pub indent: u8,
    pub text: String,
}

impl RenderLine {
    pub fn new(kind: LineKind, indent: u8, text: impl Into<String>) -> Self {
        Self {
            kind,
            indent,
            text: text.into(),
        }
    }
}

/// The idol skill view: one section per skill group
pub fn skill_view(groups: &[SkillGroup], images: &dyn ImageStore) -> Vec<RenderLine> {
    let mut lines = Vec::new();
    if groups.is_empty() {
        lines.push(RenderLine::new(LineKind::Notice, 0, "No idols match the current filters"));
        return lines;
    }

    for group in groups {
        lines.push(RenderLine::new(LineKind::Heading, 0, format!("Skill: {}", group.skill)));
        if let Some(detail) = &group.detail {
            push_detail(&mut lines, detail, 1);
        }

        for bucket in &group.buckets {
            lines.push(RenderLine::new(LineKind::Bucket, 1, format!("Duration: {}", bucket.key)));
            for lane in &bucket.lanes {
                lines.push(RenderLine::new(LineKind::Lane, 2, format!("[{}]", lane.specialization)));
                if lane.cards.is_empty() {
                    lines.push(RenderLine::new(LineKind::Notice, 3, "-"));
                }
                for card in &lane.cards {
                    push_card(&mut lines, card, images, 3);
                    push_card_fields(&mut lines, card, 4);
                }
            }
        }
    }
    lines
}

/// The ideal team view: one section per preset, slots in formation order
pub fn team_view(presets: &[ResolvedPreset], images: &dyn ImageStore) -> Vec<RenderLine> {
    let mut lines = Vec::new();
    if presets.is_empty() {
        lines.push(RenderLine::new(LineKind::Notice, 0, "No ideal teams for the selected songs"));
        return lines;
    }

    for preset in presets {
        lines.push(RenderLine::new(
            LineKind::Heading,
            0,
            format!("{} ({})", preset.name, preset.song),
        ));
        for resolution in &preset.slots {
            let slot = resolution.slot;
            lines.push(RenderLine::new(LineKind::Lane, 1, slot.role.to_string()));
            if !slot.is_vacant() {
                lines.push(RenderLine::new(LineKind::Detail, 2, slot.skill.as_str()));
            }

            match &resolution.outcome {
                SlotMatch::Matched { cards } => {
                    for card in cards {
                        push_card(&mut lines, card, images, 2);
                        lines.push(RenderLine::new(
                            LineKind::Field,
                            3,
                            format!("{} / {} sec", card.specialization, card.duration),
                        ));
                    }
                }
                SlotMatch::NoMatch => {
                    lines.push(RenderLine::new(LineKind::Notice, 2, "No matching idol"));
                }
                SlotMatch::Vacant => {}
                SlotMatch::Malformed { raw } => {
                    lines.push(RenderLine::new(
                        LineKind::Error,
                        2,
                        format!("Invalid duration spec '{}'", raw),
                    ));
                }
            }
        }
    }
    lines
}

/// Detail of a single skill, or an explicit notice when it has none
pub fn detail_view(skill: &str, detail: Option<&SkillDetail>) -> Vec<RenderLine> {
    let mut lines = vec![RenderLine::new(LineKind::Heading, 0, format!("Skill: {}", skill))];
    match detail {
        Some(detail) => push_detail(&mut lines, detail, 1),
        None => lines.push(RenderLine::new(LineKind::Notice, 1, "No detail available")),
    }
    lines
}

fn push_detail(lines: &mut Vec<RenderLine>, detail: &SkillDetail, indent: u8) {
    if !detail.description.is_empty() {
        lines.push(RenderLine::new(LineKind::Detail, indent, detail.description));
    }
    if !detail.categories.is_empty() {
        lines.push(RenderLine::new(
            LineKind::Detail,
            indent,
            format!("Categories: {}", detail.categories.join(", ")),
        ));
    }
}

fn push_card(lines: &mut Vec<RenderLine>, card: &IdolCard, images: &dyn ImageStore, indent: u8) {
    if let ImageStatus::Missing { path } = images.status(&card.image_path) {
        lines.push(RenderLine::new(
            LineKind::Error,
            indent,
            format!("Image not found: {}", path.display()),
        ));
    }
    for part in card.display_name().lines() {
        lines.push(RenderLine::new(LineKind::Card, indent, part));
    }
}

fn push_card_fields(lines: &mut Vec<RenderLine>, card: &IdolCard, indent: u8) {
    let mut fields = vec![
        ("Attribute", card.attribute.to_string()),
        ("Specialization", card.specialization.clone()),
        ("Duration", format!("{} sec", card.duration)),
        ("Probability", card.probability.to_string()),
        ("Skill", card.skill.clone()),
        ("Center effect", card.center_effect.clone()),
        ("Vo", card.stats.vo.to_string()),
        ("Da", card.stats.da.to_string()),
        ("Vi", card.stats.vi.to_string()),
        (
            "Memorial gacha",
            card.gacha_url.clone().unwrap_or_else(|| "No data".to_string()),
        ),
    ];
    if let Some(url) = &card.training_image_url {
        fields.push(("Training image", url.clone()));
    }
    if let Some((sub_attribute, dominant)) = card.dominant_fields() {
        fields.push(("Sub attribute", sub_attribute.to_string()));
        fields.push(("Dominant", dominant.to_string()));
    }

    for (label, value) in fields {
        lines.push(RenderLine::new(LineKind::Field, indent, format!("{}: {}", label, value)));
    }
}

/// Plain text with two spaces per indent level
pub fn to_plain_text(lines: &[RenderLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}\n", "  ".repeat(line.indent as usize), line.text))
        .collect()
}
