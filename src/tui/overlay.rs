// overlays drawn above the active screen; they take input first

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::screens::PromptTarget;
use super::widgets::centered_rect;
use crate::theme::Theme;

#[derive(Debug)]
pub enum Overlay {
    Error(ErrorBanner),
    Prompt(TextPrompt),
}

impl Overlay {
    pub fn resize(&mut self, width: u16, height: u16) {
        match self {
            Overlay::Error(banner) => banner.viewport = (width, height),
            Overlay::Prompt(prompt) => prompt.viewport = (width, height),
        }
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        match self {
            Overlay::Error(banner) => banner.render(frame, theme),
            Overlay::Prompt(prompt) => prompt.render(frame, theme),
        }
    }
}

/// box size relative to the last known viewport
fn box_size(viewport: (u16, u16), min_width: u16, height: u16) -> (u16, u16) {
    let width = (viewport.0.saturating_mul(3) / 5).max(min_width);
    (width, height)
}

/// modal error message, dismissed with esc or enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    message: String,
    viewport: (u16, u16),
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>, viewport: (u16, u16)) -> Self {
        Self {
            message: message.into(),
            viewport,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn dismisses(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Esc | KeyCode::Enter)
    }

    fn render(&self, frame: &mut Frame, theme: &Theme) {
        let (width, height) = box_size(self.viewport, 40, 7);
        let area = centered_rect(width, height, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Error ")
            .title_style(theme.error())
            .borders(Borders::ALL)
            .border_style(theme.error());

        let text = Text::from(vec![
            Line::from(Span::styled(self.message.as_str(), theme.text())),
            Line::from(""),
            Line::from(Span::styled("press esc or enter to dismiss", theme.faint())),
        ]);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// what happened to a prompt after a key
#[derive(Debug)]
pub enum PromptStep {
    Pending(TextPrompt),
    Cancelled,
    Confirmed { target: PromptTarget, value: String },
}

/// modal text entry bound to the field it edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    title: String,
    value: String,
    /// in chars, not bytes
    cursor: usize,
    target: PromptTarget,
    viewport: (u16, u16),
}

impl TextPrompt {
    pub fn new(title: impl Into<String>, initial: &str, target: PromptTarget) -> Self {
        Self {
            title: title.into(),
            value: initial.to_string(),
            cursor: initial.chars().count(),
            target,
            viewport: (0, 0),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn target(&self) -> PromptTarget {
        self.target
    }

    pub fn with_viewport(mut self, viewport: (u16, u16)) -> Self {
        self.viewport = viewport;
        self
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// bracketed paste; carriage returns are normalised to newlines
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.insert(&text);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn handle_key(mut self, key: KeyEvent) -> PromptStep {
        match key.code {
            KeyCode::Esc => return PromptStep::Cancelled,
            KeyCode::Enter => {
                return PromptStep::Confirmed {
                    target: self.target,
                    value: self.value,
                };
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
        PromptStep::Pending(self)
    }

    fn render(&self, frame: &mut Frame, theme: &Theme) {
        let rows = self.viewport.1.saturating_sub(6).clamp(3, 20);
        let (width, height) = box_size(self.viewport, 50, rows + 4);
        let area = centered_rect(width, height, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(theme.border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input, help] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let at = self.byte_index(self.cursor);
        let (before, after) = self.value.split_at(at);
        let mut lines: Vec<Line> = Vec::new();
        let mut current: Vec<Span> = Vec::new();
        for (i, part) in before.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part, theme.text()));
        }
        current.push(Span::styled("▌", theme.selected()));
        for (i, part) in after.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part, theme.text()));
        }
        lines.push(Line::from(current));

        // keep the cursor line in view
        let cursor_line = before.matches('\n').count() as u16;
        let scroll = cursor_line.saturating_sub(input.height.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
            input,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("enter: confirm • esc: cancel", theme.faint())),
            help,
        );
    }
}
