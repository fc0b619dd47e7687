//! Browser state machine, independent of the terminal

use crossterm::event::KeyCode;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, SKILL_VIEW_TABLES, TEAM_VIEW_TABLES};
use crate::images::ImageStore;
use crate::query::Selection;
use crate::render::{self, LineKind, RenderLine};

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Skills,
    Teams,
}

impl Tab {
    pub const TITLES: [&'static str; 2] = ["Idol Skills", "Ideal Teams"];

    pub fn index(self) -> usize {
        match self {
            Tab::Skills => 0,
            Tab::Teams => 1,
        }
    }

    fn other(self) -> Self {
        match self {
            Tab::Skills => Tab::Teams,
            Tab::Teams => Tab::Skills,
        }
    }
}

/// Filter dimensions of the idol skill tab, in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Skill,
    Category,
    Duration,
    Name,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Skill,
        Dimension::Category,
        Dimension::Duration,
        Dimension::Name,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Dimension::Skill => "Skill",
            Dimension::Category => "Category",
            Dimension::Duration => "Duration",
            Dimension::Name => "Name",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A multi-select list with a cursor
#[derive(Debug, Clone, Default)]
pub struct ChoiceList {
    items: Vec<String>,
    chosen: BTreeSet<usize>,
    cursor: usize,
}

impl ChoiceList {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_chosen(&self, idx: usize) -> bool {
        self.chosen.contains(&idx)
    }

    /// Chosen values in list order
    pub fn chosen(&self) -> Vec<String> {
        self.chosen.iter().map(|&i| self.items[i].clone()).collect()
    }

    fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Returns false when the list is empty
    fn toggle(&mut self) -> bool {
        if self.cursor >= self.items.len() {
            return false;
        }
        if !self.chosen.remove(&self.cursor) {
            self.chosen.insert(self.cursor);
        }
        true
    }

    fn clear(&mut self) -> bool {
        let had_any = !self.chosen.is_empty();
        self.chosen.clear();
        had_any
    }
}

pub struct BrowserState {
    pub tab: Tab,
    pub focus: Dimension,
    filters: [ChoiceList; 4],
    songs: ChoiceList,
    lines: Vec<RenderLine>,
    scroll: u16,
    dirty: bool,
}

impl BrowserState {
    pub fn new(catalog: &Catalog) -> Self {
        let options = catalog.options();
        Self {
            tab: Tab::Skills,
            focus: Dimension::Skill,
            filters: [
                ChoiceList::new(options.skills),
                ChoiceList::new(options.categories),
                ChoiceList::new(options.durations.iter().map(u32::to_string).collect()),
                ChoiceList::new(options.names),
            ],
            songs: ChoiceList::new(catalog.song_options()),
            lines: Vec::new(),
            scroll: 0,
            dirty: true,
        }
    }

    pub fn filter(&self, dimension: Dimension) -> &ChoiceList {
        &self.filters[dimension.index()]
    }

    pub fn songs(&self) -> &ChoiceList {
        &self.songs
    }

    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn selection(&self) -> Selection {
        Selection {
            skills: self.filter(Dimension::Skill).chosen(),
            categories: self.filter(Dimension::Category).chosen(),
            durations: self
                .filter(Dimension::Duration)
                .chosen()
                .iter()
                .filter_map(|d| d.parse().ok())
                .collect(),
            names: self.filter(Dimension::Name).chosen(),
        }
    }

    /// True once after anything that changes the result pane
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Recompute the result pane for the current tab
    pub fn refresh(&mut self, catalog: &Catalog, images: &dyn ImageStore) {
        self.lines = match self.tab {
            Tab::Skills => match catalog.require(SKILL_VIEW_TABLES) {
                Ok(()) => render::skill_view(&catalog.skill_groups(&self.selection()), images),
                Err(e) => vec![RenderLine::new(LineKind::Error, 0, e.to_string())],
            },
            Tab::Teams => match catalog.require(TEAM_VIEW_TABLES) {
                Ok(()) => render::team_view(&catalog.ideal_teams(&self.songs.chosen()), images),
                Err(e) => vec![RenderLine::new(LineKind::Error, 0, e.to_string())],
            },
        };
        self.scroll = 0;
    }

    fn focused_list(&mut self) -> &mut ChoiceList {
        match self.tab {
            Tab::Skills => &mut self.filters[self.focus.index()],
            Tab::Teams => &mut self.songs,
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.dirty = true;
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Apply one key press. Returns true when the browser should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('1') => self.switch_to(Tab::Skills),
            KeyCode::Char('2') => self.switch_to(Tab::Teams),
            KeyCode::Left | KeyCode::Right => self.switch_to(self.tab.other()),
            KeyCode::Tab if self.tab == Tab::Skills => self.focus = self.focus.next(),
            KeyCode::BackTab if self.tab == Tab::Skills => self.focus = self.focus.prev(),
            KeyCode::Up => self.focused_list().up(),
            KeyCode::Down => self.focused_list().down(),
            KeyCode::Char(' ') => {
                if self.focused_list().toggle() {
                    self.dirty = true;
                }
            }
            KeyCode::Char('c') => {
                if self.focused_list().clear() {
                    self.dirty = true;
                }
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE).min(self.max_scroll()),
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::AssumePresent;
    use crate::model::NameIndex;
    use crate::query::testing::{card, preset, skill_info};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                card("卯月", "A", 7, "高", "Cu", "ボーカル"),
                card("凛", "B", 9, "中", "Co", "ダンス"),
            ],
            vec![skill_info("A", "スコア"), skill_info("B", "コンボ")],
            NameIndex::new(["卯月", "凛"].map(String::from)),
            vec![
                preset("p1", "曲1", [("A", "7"), ("", ""), ("", ""), ("", ""), ("", ""), ("", "")]),
                preset("p2", "曲2", [("B", "9"), ("", ""), ("", ""), ("", ""), ("", ""), ("", "")]),
            ],
        )
    }

    fn headings(state: &BrowserState) -> Vec<&str> {
        state
            .lines()
            .iter()
            .filter(|l| l.kind == LineKind::Heading)
            .map(|l| l.text.as_str())
            .collect()
    }

    #[test]
    fn test_toggle_filters_results() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        assert!(state.take_dirty());
        state.refresh(&c, &AssumePresent);
        assert_eq!(headings(&state), vec!["Skill: A", "Skill: B"]);

        // focus the duration list and choose 9
        state.handle_key(KeyCode::Tab);
        state.handle_key(KeyCode::Tab);
        assert_eq!(state.focus, Dimension::Duration);
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Char(' '));
        assert!(state.take_dirty());
        assert_eq!(state.selection().durations, vec![9]);

        state.refresh(&c, &AssumePresent);
        assert_eq!(headings(&state), vec!["Skill: B"]);

        state.handle_key(KeyCode::Char('c'));
        assert!(state.take_dirty());
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        state.handle_key(KeyCode::BackTab);
        assert_eq!(state.focus, Dimension::Name);
        state.handle_key(KeyCode::Tab);
        assert_eq!(state.focus, Dimension::Skill);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        state.handle_key(KeyCode::Up);
        assert_eq!(state.filter(Dimension::Skill).cursor(), 0);
        for _ in 0..5 {
            state.handle_key(KeyCode::Down);
        }
        assert_eq!(state.filter(Dimension::Skill).cursor(), 1);
    }

    #[test]
    fn test_team_tab_song_selection() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        state.take_dirty();

        state.handle_key(KeyCode::Char('2'));
        assert_eq!(state.tab, Tab::Teams);
        assert!(state.take_dirty());
        state.refresh(&c, &AssumePresent);
        assert_eq!(headings(&state), vec!["p1 (曲1)", "p2 (曲2)"]);

        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Char(' '));
        assert_eq!(state.songs().chosen(), vec!["曲2"]);
        state.refresh(&c, &AssumePresent);
        assert_eq!(headings(&state), vec!["p2 (曲2)"]);

        // skill filters are untouched by the team tab
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_switching_to_current_tab_is_not_a_change() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        state.take_dirty();
        state.handle_key(KeyCode::Char('1'));
        assert!(!state.take_dirty());
        state.handle_key(KeyCode::Right);
        assert_eq!(state.tab, Tab::Teams);
        state.handle_key(KeyCode::Left);
        assert_eq!(state.tab, Tab::Skills);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        state.refresh(&c, &AssumePresent);
        for _ in 0..100 {
            state.handle_key(KeyCode::PageDown);
        }
        assert_eq!(state.scroll() as usize, state.lines().len() - 1);
        state.handle_key(KeyCode::PageUp);
        assert!(state.scroll() < state.lines().len() as u16 - 1);
    }

    #[test]
    fn test_unavailable_tables_show_error() {
        let c = Catalog::load(&crate::catalog::CatalogPaths::in_dir(std::path::Path::new(
            "/nonexistent/idol-catalog",
        )));
        let mut state = BrowserState::new(&c);
        state.take_dirty();
        state.refresh(&c, &AssumePresent);
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.lines()[0].kind, LineKind::Error);
        // empty lists ignore toggles
        state.handle_key(KeyCode::Char(' '));
        assert!(!state.take_dirty());
    }

    #[test]
    fn test_quit_keys() {
        let c = catalog();
        let mut state = BrowserState::new(&c);
        assert!(!state.handle_key(KeyCode::Char('x')));
        assert!(state.handle_key(KeyCode::Char('q')));
        assert!(state.handle_key(KeyCode::Esc));
    }
}
