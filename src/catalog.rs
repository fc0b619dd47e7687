//! The per-session catalog snapshot and its query entry points

use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};
use crate::model::{IdealTeamPreset, IdolCard, NameIndex, SkillDetail, SkillInfo};
use crate::parser::{read_table, IdolRow, NameRow, SkillRow, TableRows, TeamRow};
use crate::query::{self, FilterOptions, ResolvedPreset, Selection, SkillGroup};
use crate::schema::TableKind;

/// Locations of the four table files
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub idols: PathBuf,
    pub skills: PathBuf,
    pub idol_names: PathBuf,
    pub ideal_teams: PathBuf,
    pub encoding: &'static Encoding,
}

impl CatalogPaths {
    /// Default file names inside `dir`, Shift_JIS encoded
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            idols: dir.join(TableKind::Idols.schema().source_file),
            skills: dir.join(TableKind::Skills.schema().source_file),
            idol_names: dir.join(TableKind::IdolNames.schema().source_file),
            ideal_teams: dir.join(TableKind::IdealTeams.schema().source_file),
            encoding: encoding_rs::SHIFT_JIS,
        }
    }

    pub fn path(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Idols => &self.idols,
            TableKind::Skills => &self.skills,
            TableKind::IdolNames => &self.idol_names,
            TableKind::IdealTeams => &self.ideal_teams,
        }
    }
}

/// Read-only snapshot of all tables.
///
/// Tables that failed to load are empty and recorded in `unavailable`; views
/// check [`Catalog::require`] before rendering.
#[derive(Debug, Default)]
pub struct Catalog {
    idols: Vec<IdolCard>,
    skills: Vec<SkillInfo>,
    names: NameIndex,
    presets: Vec<IdealTeamPreset>,
    unavailable: Vec<CatalogError>,
    skipped: Vec<CatalogError>,
}

impl Catalog {
    pub fn new(
        idols: Vec<IdolCard>,
        skills: Vec<SkillInfo>,
        names: NameIndex,
        presets: Vec<IdealTeamPreset>,
    ) -> Self {
        Self {
            idols,
            skills,
            names,
            presets,
            ..Default::default()
        }
    }

    /// Load every table. A table that cannot be read does not stop the others.
    pub fn load(paths: &CatalogPaths) -> Self {
        let mut catalog = Catalog::default();

        let idols = read_table::<IdolRow, IdolCard>(&paths.idols, TableKind::Idols, paths.encoding);
        catalog.idols = catalog.absorb(TableKind::Idols, idols);

        let skills = read_table::<SkillRow, SkillInfo>(&paths.skills, TableKind::Skills, paths.encoding);
        catalog.skills = catalog.absorb(TableKind::Skills, skills);

        let names = read_table::<NameRow, String>(&paths.idol_names, TableKind::IdolNames, paths.encoding);
        catalog.names = NameIndex::new(catalog.absorb(TableKind::IdolNames, names));

        let presets =
            read_table::<TeamRow, IdealTeamPreset>(&paths.ideal_teams, TableKind::IdealTeams, paths.encoding);
        catalog.presets = catalog.absorb(TableKind::IdealTeams, presets);

        catalog
    }

    fn absorb<T>(&mut self, kind: TableKind, result: Result<TableRows<T>>) -> Vec<T> {
        match result {
            Ok(table) => {
                tracing::info!(
                    table = %kind,
                    rows = table.rows.len(),
                    skipped = table.skipped.len(),
                    "Loaded table"
                );
                self.skipped.extend(table.skipped);
                table.rows
            }
            Err(e) => {
                tracing::warn!(table = %kind, error = %e, "Table unavailable");
                self.unavailable.push(e);
                Vec::new()
            }
        }
    }

    pub fn idols(&self) -> &[IdolCard] {
        &self.idols
    }

    pub fn skills(&self) -> &[SkillInfo] {
        &self.skills
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn presets(&self) -> &[IdealTeamPreset] {
        &self.presets
    }

    /// Structural load failures, one per unavailable table
    pub fn unavailable(&self) -> &[CatalogError] {
        &self.unavailable
    }

    /// Rows dropped while loading
    pub fn skipped_rows(&self) -> &[CatalogError] {
        &self.skipped
    }

    pub fn is_available(&self, kind: TableKind) -> bool {
        !self.unavailable.iter().any(|e| e.table() == kind)
    }

    /// Fails with the load error of the first unavailable table in `kinds`
    pub fn require(&self, kinds: &[TableKind]) -> std::result::Result<(), &CatalogError> {
        match self
            .unavailable
            .iter()
            .find(|e| kinds.contains(&e.table()))
        {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn filter(&self, selection: &Selection) -> Vec<&IdolCard> {
        query::apply_filter(&self.idols, &self.skills, selection)
    }

    /// Filter then group by skill
    pub fn skill_groups(&self, selection: &Selection) -> Vec<SkillGroup<'_>> {
        let filtered = self.filter(selection);
        query::group_by_skill(&filtered, &self.skills)
    }

    pub fn options(&self) -> FilterOptions {
        query::filter_options(&self.idols, &self.skills, &self.names)
    }

    pub fn song_options(&self) -> Vec<String> {
        query::song_options(&self.presets)
    }

    /// Presets for the selected songs, each slot resolved against the roster
    pub fn ideal_teams(&self, songs: &[String]) -> Vec<ResolvedPreset<'_>> {
        query::filter_presets_by_song(&self.presets, songs)
            .into_iter()
            .map(|preset| query::resolve_preset(preset, &self.idols))
            .collect()
    }

    pub fn skill_detail(&self, skill: &str) -> Option<SkillDetail<'_>> {
        query::skill_detail(&self.skills, skill)
    }
}

/// Tables the idol skill view cannot work without
pub const SKILL_VIEW_TABLES: &[TableKind] = &[TableKind::Idols, TableKind::Skills];
/// Tables the ideal team view cannot work without
pub const TEAM_VIEW_TABLES: &[TableKind] = &[TableKind::Idols, TableKind::IdealTeams];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testing::{card, preset, skill_info};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                card("卯月", "A", 10, "Low", "Cu", "Vocal"),
                card("凛", "A", 10, "High", "Co", "Vocal"),
                card("未央", "B", 7, "中", "Pa", "Dance"),
            ],
            vec![skill_info("A", "スコア")],
            NameIndex::new(["卯月", "凛", "未央"].map(String::from)),
            vec![preset("p", "曲", [("B", "7"), ("", ""), ("", ""), ("", ""), ("", ""), ("A", "10")])],
        )
    }

    #[test]
    fn test_skill_groups_end_to_end() {
        let c = catalog();
        let selection = Selection {
            skills: vec!["A".into()],
            ..Default::default()
        };
        let groups = c.skill_groups(&selection);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].skill, "A");
        let buckets: Vec<String> = groups[0].buckets.iter().map(|b| b.key.to_string()).collect();
        assert_eq!(buckets, vec!["10低", "10高"]);
        assert_eq!(groups[0].detail.as_ref().map(|d| d.description), Some("A の説明"));
    }

    #[test]
    fn test_ideal_teams() {
        let c = catalog();
        let teams = c.ideal_teams(&[]);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].slots[0].outcome.cards()[0].name, "未央");
        // A cards are all Vocal, so the guest slot finds nothing
        assert_eq!(teams[0].slots[5].outcome, crate::query::SlotMatch::NoMatch);
        assert!(c.ideal_teams(&["別の曲".to_string()]).is_empty());
    }

    #[test]
    fn test_in_memory_catalog_is_fully_available() {
        let c = catalog();
        assert!(c.require(SKILL_VIEW_TABLES).is_ok());
        assert!(c.is_available(TableKind::IdealTeams));
        assert!(c.unavailable().is_empty());
    }

    #[test]
    fn test_load_from_missing_dir_marks_everything_unavailable() {
        let paths = CatalogPaths::in_dir(Path::new("/nonexistent/catalog"));
        let c = Catalog::load(&paths);
        assert_eq!(c.unavailable().len(), 4);
        assert!(c.idols().is_empty());
        let err = c.require(TEAM_VIEW_TABLES).unwrap_err();
        assert_eq!(err.table(), TableKind::Idols);
        assert!(!c.is_available(TableKind::IdolNames));
    }
}
