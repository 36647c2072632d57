use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::UnboundedSender;

use super::{home::HomeView, profile_view::ProfileView, tab_bar::TabBar};
use crate::{
  action::Action,
  components::Component,
  config::Config,
  mode::Mode,
  theme::Palette,
  tui::{Event, Frame},
};

/// Tab 0 is always the home view; every other tab is an opened profile,
/// keyed by its canonical handle. Opening a handle that already has a tab
/// re-focuses it instead of stacking a duplicate.
pub struct TabViewer {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  mode: Mode,
  palette: Palette,
  tab_bar: TabBar,
  tabs: Vec<Box<dyn Component>>,
  handles: Vec<Option<String>>,
  selected_tab: usize,
}

impl TabViewer {
  pub fn new() -> Self {
    let mut tab_bar = TabBar::new();
    tab_bar.add_tab("Home".to_string());
    let home = HomeView::new();

    Self {
      command_tx: None,
      config: Config::default(),
      mode: Mode::default(),
      palette: Palette::default(),
      tab_bar,
      tabs: vec![Box::new(home)],
      handles: vec![None],
      selected_tab: 0,
    }
  }

  fn add_new_tab(&mut self, tab_name: String, handle: String, component: Box<dyn Component>) -> Result<()> {
    self.tabs.push(component);
    self.handles.push(Some(handle));
    self.tab_bar.add_tab(tab_name);
    self.select_tab(self.tabs.len() - 1)
  }

  fn remove_tab(&mut self, tab_idx: usize) {
    self.tabs.remove(tab_idx);
    self.handles.remove(tab_idx);
    self.tab_bar.remove_tab(tab_idx);
  }

  fn select_tab(&mut self, idx: usize) -> Result<()> {
    self.selected_tab = idx;
    self.tab_bar.select(idx);

    if let Some(tx) = &self.command_tx {
      tx.send(Action::ChangeTab(idx))?;
    }

    Ok(())
  }
}

impl Component for TabViewer {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    for component in &mut self.tabs {
      component.register_action_handler(tx.clone())?;
    }
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> Result<()> {
    for component in &mut self.tabs {
      component.register_config_handler(config.clone())?;
    }
    self.config = config;
    Ok(())
  }

  fn init(&mut self, area: Rect) -> Result<()> {
    for component in &mut self.tabs {
      component.init(area)?;
    }
    Ok(())
  }

  fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    if let Some(component) = self.tabs.get_mut(self.selected_tab) {
      component.handle_events(event.clone())?;
    }

    let r = match event {
      Some(Event::Key(key_event)) => self.handle_key_events(key_event)?,
      Some(Event::Mouse(mouse_event)) => self.handle_mouse_events(mouse_event)?,
      _ => None,
    };
    Ok(r)
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if self.mode != Mode::Home {
      return Ok(None);
    }

    if key.modifiers.contains(KeyModifiers::SHIFT) {
      match key.code {
        KeyCode::Char('H') => {
          if self.selected_tab == 0 {
            self.select_tab(self.tabs.len() - 1)?;
          } else {
            self.select_tab(self.selected_tab - 1)?;
          }
        },
        KeyCode::Char('L') => {
          self.select_tab((self.selected_tab + 1) % self.tabs.len())?;
        },
        _ => {},
      }
    } else if key.code == KeyCode::Char('x') && self.selected_tab != 0 {
      let removed = self.selected_tab;
      self.remove_tab(removed);
      self.select_tab(removed - 1)?;
    }

    Ok(None)
  }

  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    self.tab_bar.update(action.clone())?;
    for component in &mut self.tabs {
      component.update(action.clone())?;
    }

    match action {
      Action::ModeChange(mode) => {
        self.mode = mode;
      },
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      },
      Action::OpenProfile(username) => {
        if let Some(idx) = self.handles.iter().position(|h| h.as_deref() == Some(username.as_str())) {
          self.select_tab(idx)?;
        } else {
          let mut profile = ProfileView::new(username.clone(), self.palette);
          if let Some(tx) = &self.command_tx {
            profile.register_action_handler(tx.clone())?;
          }
          self.add_new_tab(format!("@{username}"), username, Box::new(profile))?;
        }
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(1), Constraint::Fill(1)])
      .split(area);

    self.tab_bar.draw(f, layout[0])?;

    if let Some(component) = self.tabs.get_mut(self.selected_tab) {
      component.draw(f, layout[1])?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  fn viewer() -> (TabViewer, mpsc::UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut viewer = TabViewer::new();
    viewer.register_action_handler(tx).unwrap();
    (viewer, rx)
  }

  #[test]
  fn opening_a_profile_focuses_a_new_tab() {
    let (mut viewer, _rx) = viewer();

    viewer.update(Action::OpenProfile("alice".into())).unwrap();

    assert_eq!(viewer.tabs.len(), 2);
    assert_eq!(viewer.selected_tab, 1);
    assert_eq!(viewer.handles[1].as_deref(), Some("alice"));
  }

  #[test]
  fn reopening_the_same_handle_reuses_its_tab() {
    let (mut viewer, _rx) = viewer();

    viewer.update(Action::OpenProfile("alice".into())).unwrap();
    viewer.update(Action::OpenProfile("bob".into())).unwrap();
    viewer.update(Action::OpenProfile("alice".into())).unwrap();

    assert_eq!(viewer.tabs.len(), 3);
    assert_eq!(viewer.selected_tab, 1);
  }

  #[test]
  fn the_home_tab_cannot_be_closed() {
    let (mut viewer, _rx) = viewer();

    viewer.handle_key_events(KeyEvent::from(KeyCode::Char('x'))).unwrap();

    assert_eq!(viewer.tabs.len(), 1);
  }

  #[test]
  fn closing_a_profile_tab_falls_back_to_the_previous_tab() {
    let (mut viewer, _rx) = viewer();
    viewer.update(Action::OpenProfile("alice".into())).unwrap();

    viewer.handle_key_events(KeyEvent::from(KeyCode::Char('x'))).unwrap();

    assert_eq!(viewer.tabs.len(), 1);
    assert_eq!(viewer.selected_tab, 0);
  }

  #[test]
  fn tab_keys_are_ignored_while_typing() {
    let (mut viewer, _rx) = viewer();
    viewer.update(Action::OpenProfile("alice".into())).unwrap();
    viewer.update(Action::ModeChange(Mode::SearchInput)).unwrap();

    viewer.handle_key_events(KeyEvent::from(KeyCode::Char('x'))).unwrap();

    assert_eq!(viewer.tabs.len(), 2);
  }
}
