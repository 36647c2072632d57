use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  widgets::{Block, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  components::Component,
  config::Config,
  mode::{FeedMode, Mode},
  theme::{Palette, Theme},
  tui::Frame,
};

/// The "For you" / "Following" header row, with the theme toggle hint on the
/// right. Selecting a feed is idempotent; the app decides whether a selection
/// actually triggers a fetch.
pub struct FeedTabs {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  mode: Mode,
  palette: Palette,
  theme: Theme,
  feed_mode: FeedMode,
}

impl FeedTabs {
  pub fn new() -> Self {
    Self {
      command_tx: None,
      config: Config::default(),
      mode: Mode::default(),
      palette: Palette::default(),
      theme: Theme::default(),
      feed_mode: FeedMode::default(),
    }
  }
}

impl Component for FeedTabs {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    if self.mode == Mode::Home {
      if let Some(tx) = &self.command_tx {
        match key.code {
          KeyCode::Char('1') => tx.send(Action::SelectFeed(FeedMode::ForYou))?,
          KeyCode::Char('2') => tx.send(Action::SelectFeed(FeedMode::Following))?,
          KeyCode::Char('t') => tx.send(Action::ToggleTheme)?,
          _ => {},
        }
      }
    }
    Ok(None)
  }

  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::ModeChange(mode) => {
        self.mode = mode;
      },
      Action::SelectFeed(feed_mode) => {
        self.feed_mode = feed_mode;
      },
      Action::ThemeChanged(theme) => {
        self.theme = theme;
        self.palette = Palette::of(theme);
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let block = Block::new().borders(Borders::BOTTOM).border_style(self.palette.dimmed);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Fill(1), Constraint::Length(18)])
      .split(inner);

    let titles = vec![FeedMode::ForYou.title().to_string(), FeedMode::Following.title().to_string()];
    let selected = match self.feed_mode {
      FeedMode::ForYou => 0,
      FeedMode::Following => 1,
    };
    let tabs = Tabs::new(titles).select(selected).style(self.palette.text).highlight_style(self.palette.selected);
    f.render_widget(tabs, chunks[0]);

    let toggle = Paragraph::new(format!("[t] {}", self.theme.toggle_label())).style(self.palette.dimmed).right_aligned();
    f.render_widget(toggle, chunks[1]);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  #[test]
  fn number_keys_select_feeds() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tabs = FeedTabs::new();
    tabs.register_action_handler(tx).unwrap();

    tabs.handle_key_events(KeyEvent::from(KeyCode::Char('2'))).unwrap();
    assert_eq!(rx.try_recv().unwrap(), Action::SelectFeed(FeedMode::Following));

    tabs.handle_key_events(KeyEvent::from(KeyCode::Char('1'))).unwrap();
    assert_eq!(rx.try_recv().unwrap(), Action::SelectFeed(FeedMode::ForYou));
  }

  #[test]
  fn keys_are_ignored_while_typing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tabs = FeedTabs::new();
    tabs.register_action_handler(tx).unwrap();
    tabs.update(Action::ModeChange(Mode::SearchInput)).unwrap();

    tabs.handle_key_events(KeyEvent::from(KeyCode::Char('2'))).unwrap();
    tabs.handle_key_events(KeyEvent::from(KeyCode::Char('t'))).unwrap();
    assert!(rx.try_recv().is_err());
  }
}
