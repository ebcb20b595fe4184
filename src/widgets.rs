//! Clickable UI components.
//!
//! Each component renders itself and registers its own click targets, so the
//! hit regions always match what was drawn.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One row of tab labels with a separator between them.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("1:Career", active_style, TAB_CAREER)
///     .tab("2:Assets", idle_style, TAB_ASSETS)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Widths of the padded labels paired with their action ids.
    fn label_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, action_id)| {
                let padded = format!(" {} ", label);
                (Line::from(padded.as_str()).width() as u16, *action_id)
            })
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let widths = self.label_widths();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);

        cs.register_tab_targets(
            &widths,
            sep_width,
            area.x,
            area.y,
            area.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the action each clickable one triggers.
///
/// Targets follow their lines: inserting a header above an item moves the
/// item's target down with it. Lines are assumed not to wrap.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line that is on screen.
    ///
    /// `top_offset` / `bottom_offset` are the rows taken by borders and
    /// `scroll` is how many lines are scrolled out of view.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_y + (line_idx - scroll);
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
