use anyhow::Result;
use ratatui::style::{Color, Modifier, Style};

use crate::persist::{PreferenceStore, Preferences};

/// Light/dark flag. Starts light unless the store says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeFlag {
    dark: bool,
}

impl ThemeFlag {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// Unreadable preferences fall back to light; the error is handed back
    /// so the caller can log it.
    pub fn load(store: &dyn PreferenceStore) -> (Self, Option<anyhow::Error>) {
        match store.load() {
            Ok(prefs) => (Self::new(prefs.is_some_and(|p| p.dark_mode)), None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Flips the flag first; a failed write leaves the new value in effect.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Result<()> {
        self.set(!self.dark, store)
    }

    pub fn set(&mut self, dark: bool, store: &mut dyn PreferenceStore) -> Result<()> {
        self.dark = dark;
        store.save(&Preferences { dark_mode: dark })
    }

    pub fn label(&self) -> &'static str {
        if self.dark { "Koyu" } else { "Açık" }
    }

    pub fn palette(&self) -> Palette {
        if self.dark {
            Palette::dark()
        } else {
            Palette::light()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub selected_bg: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            selected_bg: Color::Gray,
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::LightBlue,
            positive: Color::LightGreen,
            warning: Color::LightYellow,
            negative: Color::LightRed,
            selected_bg: Color::DarkGray,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.fg).bg(self.selected_bg)
    }
}
