// custom widgets for the auto-resume tui

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::theme::Theme;

/// single-line labelled field
pub struct InputField<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, value: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            focused,
            theme,
        }
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .title_style(self.theme.text())
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        // first line only, the prompt shows the rest
        let first = self.value.lines().next().unwrap_or("");
        let shown = if self.value.lines().nth(1).is_some() {
            format!("{first} …")
        } else {
            first.to_string()
        };
        let value_span = Span::styled(shown, self.theme.text());
        buf.set_span(inner.x + 1, inner.y, &value_span, inner.width.saturating_sub(2));

        if self.focused && inner.width > 2 {
            buf.set_string(
                inner.x + inner.width - 2,
                inner.y,
                "▌",
                Style::new().fg(self.theme.focus),
            );
        }
    }
}

/// button drawn as [ label ]
pub struct Button<'a> {
    label: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self { label, focused, theme }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.focused {
            self.theme.selected()
        } else {
            self.theme.muted()
        };
        let marker = if self.focused { "► " } else { "  " };
        let span = Span::styled(format!("{marker}[ {} ]", self.label), style);
        buf.set_span(area.x + 1, area.y, &span, area.width.saturating_sub(2));
    }
}

/// bordered list with a "► " marker on the selected row
pub struct ItemList<'a> {
    title: &'a str,
    items: Vec<String>,
    selected: Option<usize>,
    focused: bool,
    empty_hint: &'a str,
    theme: &'a Theme,
}

impl<'a> ItemList<'a> {
    pub fn new(title: &'a str, items: Vec<String>, selected: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            title,
            items,
            selected,
            focused: true,
            empty_hint: "",
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.heading())
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.items.is_empty() {
            let hint = Span::styled(self.empty_hint, self.theme.faint());
            buf.set_span(inner.x + 1, inner.y, &hint, inner.width.saturating_sub(2));
            return;
        }

        // keep the selected row visible
        let rows = inner.height as usize;
        let selected = self.selected.unwrap_or(0);
        let offset = if rows == 0 { 0 } else { (selected + 1).saturating_sub(rows) };

        for (row, (i, item)) in self.items.iter().enumerate().skip(offset).take(rows).enumerate() {
            let y = inner.y + row as u16;
            let is_selected = self.selected == Some(i);
            let (marker, style) = if is_selected {
                ("► ", self.theme.selected())
            } else {
                ("  ", self.theme.text())
            };
            let line = Line::from(vec![Span::styled(marker, style), Span::styled(item.as_str(), style)]);
            buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(2));
        }
    }
}

/// status bar at bottom
pub struct StatusBar<'a> {
    message: &'a str,
    is_error: bool,
    keybinds: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(message: &'a str, is_error: bool, theme: &'a Theme) -> Self {
        Self {
            message,
            is_error,
            keybinds: " q:quit ",
            theme,
        }
    }

    pub fn with_keybinds(mut self, keybinds: &'a str) -> Self {
        self.keybinds = keybinds;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = if self.is_error {
            self.theme.error
        } else {
            self.theme.status_bg
        };

        let fg = if self.is_error {
            self.theme.on_error
        } else {
            self.theme.muted
        };

        // fill background
        buf.set_style(area, Style::new().bg(bg));

        let msg = Span::styled(self.message, Style::new().fg(fg).bg(bg));
        buf.set_span(area.x + 1, area.y, &msg, area.width.saturating_sub(2));

        // keybinds on the right
        let width = self.keybinds.chars().count() as u16;
        let kb_span = Span::styled(self.keybinds, Style::new().fg(self.theme.faint).bg(bg));
        let kb_x = area.x + area.width.saturating_sub(width + 1);
        buf.set_span(kb_x, area.y, &kb_span, width);
    }
}

/// box of the given size centred in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// label and value on one line
pub fn field_line(label: &str, value: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<13}"), theme.muted()),
        Span::styled(value.into(), theme.text()),
    ])
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    at.format(&format).unwrap_or_default()
}
