use serde::Serialize;

/// Metadata row for one skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillInfo {
    pub skill: String,
    pub description: String,
    /// Comma-joined category tags, kept as written
    pub categories: String,
}

impl SkillInfo {
    /// Individual category tags
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Loose category membership: the category text appears anywhere in the
    /// tag string, so a short tag also matches longer tags containing it.
    pub fn in_category(&self, category: &str) -> bool {
        !category.is_empty() && self.categories.contains(category)
    }
}

/// Resolved detail for a skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillDetail<'a> {
    pub skill: &'a str,
    pub description: &'a str,
    pub categories: Vec<&'a str>,
}

impl<'a> From<&'a SkillInfo> for SkillDetail<'a> {
    fn from(info: &'a SkillInfo) -> Self {
        Self {
            skill: &info.skill,
            description: &info.description,
            categories: info.tags().collect(),
        }
    }
}
