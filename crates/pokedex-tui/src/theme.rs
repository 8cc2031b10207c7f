//! Color theme and its on-disk persistence.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

/// UI color theme. Dark is the default for new installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Base style for panel backgrounds and regular text.
    pub fn base(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
            Theme::Dark => Style::default().fg(Color::White).bg(Color::Reset),
        }
    }

    /// Style for highlighted elements (selection, cursor bar).
    pub fn accent(self) -> Style {
        match self {
            Theme::Light => self.base().fg(Color::Blue),
            Theme::Dark => self.base().fg(Color::Yellow),
        }
    }

    /// Style for secondary text (ids, hints, counts).
    pub fn dim(self) -> Style {
        self.base().fg(Color::DarkGray)
    }

    /// Style for error toasts.
    pub fn error(self) -> Style {
        self.base().fg(Color::Red)
    }
}

/// Persisted user preferences.
///
/// Stored as JSON under `~/.pokedex/preferences.json`. Unknown fields are
/// ignored on read so older builds can open newer files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

fn preferences_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home_dir.join(".pokedex").join("preferences.json"))
}

/// Load preferences, falling back to defaults when the file is missing or
/// unreadable. A corrupt file is not an error; the next save rewrites it.
pub fn load_preferences() -> Preferences {
    match preferences_path() {
        Ok(path) => load_preferences_from(&path),
        Err(_) => Preferences::default(),
    }
}

fn load_preferences_from(path: &std::path::Path) -> Preferences {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt preferences at {}: {e}", path.display());
            Preferences::default()
        }),
        Err(_) => Preferences::default(),
    }
}

/// Write preferences to disk, creating `~/.pokedex` if needed.
pub fn save_preferences(prefs: &Preferences) -> Result<()> {
    save_preferences_to(&preferences_path()?, prefs)
}

fn save_preferences_to(path: &std::path::Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(prefs)?;
    fs::write(path, contents)?;
    Ok(())
}
