use std::{
  fs,
  path::{Path, PathBuf},
};

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

const STORE_FILE: &str = "theme.json";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn flipped(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }

  /// Label for the toggle hint, named after the mode it switches to.
  pub fn toggle_label(self) -> &'static str {
    match self {
      Theme::Light => "Dark Mode",
      Theme::Dark => "Light Mode",
    }
  }
}

/// The application-wide styles derived from the active theme. Components only
/// ever restyle through this, never by picking colors themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  pub base: Style,
  pub text: Style,
  pub dimmed: Style,
  pub accent: Style,
  pub selected: Style,
  pub error: Style,
}

impl Palette {
  pub fn of(theme: Theme) -> Self {
    match theme {
      Theme::Light => Self {
        base: Style::default().bg(Color::White).fg(Color::Black),
        text: Style::default().fg(Color::Black),
        dimmed: Style::default().fg(Color::DarkGray),
        accent: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        selected: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        error: Style::default().fg(Color::Red),
      },
      Theme::Dark => Self {
        base: Style::default().bg(Color::Black).fg(Color::White),
        text: Style::default().fg(Color::White),
        dimmed: Style::default().fg(Color::Gray),
        accent: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        error: Style::default().fg(Color::LightRed),
      },
    }
  }
}

impl Default for Palette {
  fn default() -> Self {
    Palette::of(Theme::default())
  }
}

#[derive(Default, Serialize, Deserialize)]
struct StoreFile {
  #[serde(default)]
  theme: Theme,
}

/// File-backed store for the theme preference, the one value that outlives a
/// run. Sole writer of the persisted file; everything else sees theme changes
/// through `Action::ThemeChanged`.
pub struct ThemeStore {
  path: PathBuf,
  theme: Theme,
}

impl ThemeStore {
  pub fn load(data_dir: &Path) -> Self {
    let path = data_dir.join(STORE_FILE);
    let theme = match fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<StoreFile>(&raw) {
        Ok(file) => file.theme,
        Err(e) => {
          log::warn!("Unreadable theme store, falling back to light: {e}");
          Theme::default()
        },
      },
      Err(_) => Theme::default(),
    };
    Self { path, theme }
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn toggle(&mut self) -> Theme {
    self.set(self.theme.flipped())
  }

  pub fn set(&mut self, theme: Theme) -> Theme {
    self.theme = theme;
    match serde_json::to_string_pretty(&StoreFile { theme }) {
      Ok(raw) => {
        if let Err(e) = fs::write(&self.path, raw) {
          log::error!("Failed to persist theme: {e}");
        }
      },
      Err(e) => log::error!("Failed to serialize theme: {e}"),
    }
    theme
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn defaults_to_light_when_nothing_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = ThemeStore::load(dir.path());
    assert_eq!(store.theme(), Theme::Light);
  }

  #[test]
  fn toggling_twice_returns_to_light() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ThemeStore::load(dir.path());
    assert_eq!(store.toggle(), Theme::Dark);
    assert_eq!(store.toggle(), Theme::Light);

    let reloaded = ThemeStore::load(dir.path());
    assert_eq!(reloaded.theme(), Theme::Light);
  }

  #[test]
  fn toggle_persists_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ThemeStore::load(dir.path());
    store.toggle();

    let reloaded = ThemeStore::load(dir.path());
    assert_eq!(reloaded.theme(), Theme::Dark);
  }

  #[test]
  fn unreadable_store_falls_back_to_light() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(STORE_FILE), "not json").unwrap();

    let store = ThemeStore::load(dir.path());
    assert_eq!(store.theme(), Theme::Light);
  }

  #[test]
  fn re_applying_the_same_theme_is_safe() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ThemeStore::load(dir.path());
    store.set(Theme::Dark);
    store.set(Theme::Dark);
    assert_eq!(ThemeStore::load(dir.path()).theme(), Theme::Dark);
  }

  #[test]
  fn palettes_differ_between_themes() {
    assert_ne!(Palette::of(Theme::Light), Palette::of(Theme::Dark));
  }
}
