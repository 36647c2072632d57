use color_eyre::eyre::Result;
use ratatui::{layout::Rect, widgets::Tabs, Frame};

use super::Component;
use crate::{action::Action, theme::Palette};

#[derive(Default)]
pub struct TabBar {
  tabs: Vec<String>,
  selected_tab: usize,
  palette: Palette,
}

impl TabBar {
  pub fn new() -> Self {
    Self { tabs: Vec::new(), selected_tab: 0, palette: Palette::default() }
  }

  pub fn add_tab(&mut self, tab: String) {
    self.tabs.push(tab);
  }

  pub fn remove_tab(&mut self, tab_idx: usize) {
    self.tabs.remove(tab_idx);
  }

  pub fn select(&mut self, tab_idx: usize) {
    self.selected_tab = tab_idx;
  }
}

impl Component for TabBar {
  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    if let Action::ThemeChanged(theme) = action {
      self.palette = Palette::of(theme);
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let tabs = Tabs::new(self.tabs.clone())
      .select(self.selected_tab)
      .style(self.palette.dimmed)
      .highlight_style(self.palette.selected);
    f.render_widget(tabs, area);
    Ok(())
  }
}
