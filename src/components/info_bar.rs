use clap::crate_version;
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  widgets::Paragraph,
};

use crate::{action::Action, components::Component, config::Config, theme::Palette, tui::Frame};

pub struct InfoBar {
  config: Config,
  palette: Palette,
}

impl InfoBar {
  pub fn new() -> Self {
    Self { config: Config::default(), palette: Palette::default() }
  }
}

impl Component for InfoBar {
  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    if let Action::ThemeChanged(theme) = action {
      self.palette = Palette::of(theme);
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Fill(1), Constraint::Length(44)])
      .split(area);

    let name = Paragraph::new("Kuier ".to_string() + crate_version!()).style(self.palette.dimmed);
    f.render_widget(name, chunks[0]);

    let hints = Paragraph::new("1/2 feed  / search  p post  t theme  q quit").style(self.palette.dimmed);
    f.render_widget(hints, chunks[1]);
    Ok(())
  }
}
