use crate::model::{SkillDetail, SkillInfo};

/// Description and tags of a skill. `None` means the skill has no metadata
/// row, which is common and not an error. The first matching row wins.
pub fn skill_detail<'a>(skills: &'a [SkillInfo], skill: &str) -> Option<SkillDetail<'a>> {
    skills
        .iter()
        .find(|info| info.skill == skill)
        .map(SkillDetail::from)
}
