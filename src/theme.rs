// theme support with catppuccin mocha as default
// https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

// catppuccin mocha palette (rgb)
pub const MAUVE: Color = Color::Rgb(203, 166, 247);
pub const RED: Color = Color::Rgb(243, 139, 168);
pub const PEACH: Color = Color::Rgb(250, 179, 135);
pub const GREEN: Color = Color::Rgb(166, 227, 161);
pub const TEAL: Color = Color::Rgb(148, 226, 213);

// catppuccin mocha base colours
pub const TEXT: Color = Color::Rgb(205, 214, 244);
pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
pub const SURFACE1: Color = Color::Rgb(69, 71, 90);
pub const SURFACE0: Color = Color::Rgb(49, 50, 68);
pub const BASE: Color = Color::Rgb(30, 30, 46);
pub const CRUST: Color = Color::Rgb(17, 17, 27);

/// colours used by every screen and overlay
///
/// built once at startup and lent to each render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub faint: Color,
    pub border: Color,
    pub focus: Color,
    pub accent: Color,
    pub heading: Color,
    pub success: Color,
    pub error: Color,
    pub status_bg: Color,
    pub on_error: Color,
}

impl Theme {
    /// pick a theme by name, unknown names fall back to catppuccin
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "basic" | "16" => Self::basic(),
            "plain" | "none" | "off" => Self::plain(),
            _ => Self::catppuccin(), // default
        }
    }

    pub fn catppuccin() -> Self {
        Self {
            background: BASE,
            text: TEXT,
            muted: SUBTEXT0,
            faint: OVERLAY0,
            border: SURFACE1,
            focus: MAUVE,
            accent: TEAL,
            heading: PEACH,
            success: GREEN,
            error: RED,
            status_bg: SURFACE0,
            on_error: CRUST,
        }
    }

    // basic 16-colour fallbacks (ansi)
    pub fn basic() -> Self {
        Self {
            background: Color::Reset,
            text: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            border: Color::DarkGray,
            focus: Color::Magenta,
            accent: Color::Cyan,
            heading: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            status_bg: Color::Black,
            on_error: Color::Black,
        }
    }

    pub fn plain() -> Self {
        Self {
            background: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            faint: Color::Reset,
            border: Color::Reset,
            focus: Color::Reset,
            accent: Color::Reset,
            heading: Color::Reset,
            success: Color::Reset,
            error: Color::Reset,
            status_bg: Color::Reset,
            on_error: Color::Reset,
        }
    }

    // style helpers
    pub fn text(&self) -> Style {
        Style::new().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn faint(&self) -> Style {
        Style::new().fg(self.faint)
    }

    pub fn heading(&self) -> Style {
        Style::new().fg(self.heading).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::new().fg(self.accent)
    }

    /// highlighted row or field
    pub fn selected(&self) -> Style {
        Style::new().fg(self.focus).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::new().fg(if focused { self.focus } else { self.border })
    }

    pub fn error(&self) -> Style {
        Style::new().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin()
    }
}

/// tagline for the landing screen
pub const TAGLINE: &str = "tailored resumes, one job description at a time";
