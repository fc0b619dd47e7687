use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::model::{IdolCard, NameIndex, SkillInfo};

/// Selected values per filter dimension. An empty dimension does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub skills: Vec<String>,
    pub categories: Vec<String>,
    pub durations: Vec<u32>,
    pub names: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.categories.is_empty()
            && self.durations.is_empty()
            && self.names.is_empty()
    }
}

/// Skills whose tag string contains any of `categories` (loose substring match).
pub fn resolve_category_skills<'a>(
    skills: &'a [SkillInfo],
    categories: &[String],
) -> HashSet<&'a str> {
    skills
        .iter()
        .filter(|info| categories.iter().any(|c| info.in_category(c)))
        .map(|info| info.skill.as_str())
        .collect()
}

/// Cards matching every non-empty dimension of `selection`, in source order
pub fn apply_filter<'a>(
    cards: &'a [IdolCard],
    skills: &[SkillInfo],
    selection: &Selection,
) -> Vec<&'a IdolCard> {
    let mut filtered: Vec<&IdolCard> = cards.iter().collect();

    // blank entries would match no tag; they do not constrain
    let categories: Vec<String> = selection
        .categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();
    if !categories.is_empty() {
        let valid = resolve_category_skills(skills, &categories);
        filtered.retain(|card| valid.contains(card.skill.as_str()));
    }

    if !selection.skills.is_empty() {
        filtered.retain(|card| selection.skills.contains(&card.skill));
    }

    if !selection.durations.is_empty() {
        filtered.retain(|card| selection.durations.contains(&card.duration));
    }

    if !selection.names.is_empty() {
        filtered.retain(|card| selection.names.contains(&card.name));
    }

    filtered
}

/// Values offered for each filter dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Roster order of first appearance
    pub skills: Vec<String>,
    /// Individual tags, sorted
    pub categories: Vec<String>,
    pub durations: Vec<u32>,
    /// Name index order, then roster names missing from the index
    pub names: Vec<String>,
}

pub fn filter_options(cards: &[IdolCard], skills: &[SkillInfo], names: &NameIndex) -> FilterOptions {
    let mut seen = HashSet::new();
    let skill_options = cards
        .iter()
        .filter(|card| seen.insert(card.skill.as_str()))
        .map(|card| card.skill.clone())
        .collect();

    let categories: BTreeSet<&str> = skills.iter().flat_map(|s| s.tags()).collect();
    let durations: BTreeSet<u32> = cards.iter().map(|card| card.duration).collect();

    let mut name_options = names.names().to_vec();
    for card in cards {
        if names.rank(&card.name).is_none() && !name_options.contains(&card.name) {
            name_options.push(card.name.clone());
        }
    }
    names.sort(&mut name_options);

    FilterOptions {
        skills: skill_options,
        categories: categories.into_iter().map(String::from).collect(),
        durations: durations.into_iter().collect(),
        names: name_options,
    }
}
