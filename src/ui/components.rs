//! UI Components for the terminal interface

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::Frame;

use super::state::{ChoiceList, Tab};
use crate::render::{LineKind, RenderLine};

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    }
}

/// Tab bar across the top
pub struct TabBar {
    pub current: Tab,
}

impl TabBar {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Idol Catalog ")
            .border_style(Style::default().fg(Color::Blue));

        let tabs = Tabs::new(Tab::TITLES.to_vec())
            .block(block)
            .select(self.current.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }
}

/// One multi-select filter list
pub struct FilterPanel<'a> {
    pub title: &'a str,
    pub list: &'a ChoiceList,
    pub focused: bool,
}

impl FilterPanel<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chosen = self.list.chosen().len();
        let title = if chosen > 0 {
            format!(" {} ({}) ", self.title, chosen)
        } else {
            format!(" {} ", self.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border(self.focused));

        let items: Vec<ListItem> = self
            .list
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (mark, style) = if self.list.is_chosen(i) {
                    ("[x] ", Style::default().fg(Color::Green))
                } else {
                    ("[ ] ", Style::default().fg(Color::Gray))
                };
                ListItem::new(Span::styled(format!("{}{}", mark, item), style))
            })
            .collect();

        let mut state = ListState::default();
        if self.focused && !self.list.items().is_empty() {
            state.select(Some(self.list.cursor()));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Rendered query results
pub struct ResultPane<'a> {
    pub lines: &'a [RenderLine],
    pub scroll: u16,
}

impl ResultPane<'_> {
    fn style(kind: LineKind) -> Style {
        match kind {
            LineKind::Heading => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            LineKind::Detail => Style::default().fg(Color::Gray),
            LineKind::Bucket => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            LineKind::Lane => Style::default().fg(Color::Yellow),
            LineKind::Card => Style::default().fg(Color::White),
            LineKind::Field => Style::default().fg(Color::DarkGray),
            LineKind::Notice => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            LineKind::Error => Style::default().fg(Color::Red),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(Style::default().fg(Color::Blue));

        let lines: Vec<Line> = self
            .lines
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::raw("  ".repeat(line.indent as usize)),
                    Span::styled(line.text.as_str(), Self::style(line.kind)),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(block).scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

/// Key help along the bottom
pub struct StatusBar {
    pub tab: Tab,
}

impl StatusBar {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let help = match self.tab {
            Tab::Skills => " Tab: next filter  ↑↓: move  Space: toggle  c: clear  PgUp/PgDn: scroll  1/2: tabs  q: quit",
            Tab::Teams => " ↑↓: move  Space: toggle song  c: clear  PgUp/PgDn: scroll  1/2: tabs  q: quit",
        };
        let paragraph = Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray)));
        frame.render_widget(paragraph, area);
    }
}
