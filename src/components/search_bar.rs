use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  text::{Line, Text},
  widgets::{Block, BorderType, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  components::Component,
  config::Config,
  mode::Mode,
  theme::Palette,
  tui::Frame,
};

/// The user-search input. Owns the query and the last resolution error.
/// A query that trims to nothing is never submitted.
pub struct SearchBar {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  mode: Mode,
  palette: Palette,
  query: String,
  error: Option<String>,
}

impl SearchBar {
  pub fn new() -> Self {
    Self {
      command_tx: None,
      config: Config::default(),
      mode: Mode::default(),
      palette: Palette::default(),
      query: String::new(),
      error: None,
    }
  }
}

impl Component for SearchBar {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    match self.mode {
      Mode::Home => {
        if key.code == KeyCode::Char('/') {
          if let Some(tx) = &self.command_tx {
            tx.send(Action::ModeChange(Mode::SearchInput))?;
          }
        }
      },
      Mode::SearchInput => match key.code {
        KeyCode::Esc => {
          if let Some(tx) = &self.command_tx {
            tx.send(Action::ModeChange(Mode::Home))?;
          }
        },
        KeyCode::Enter => {
          if self.query.trim().is_empty() {
            return Ok(None);
          }
          if let Some(tx) = &self.command_tx {
            // The query is validated trimmed but submitted as typed; the
            // server decides on the canonical form of the handle.
            tx.send(Action::SubmitSearch(self.query.clone()))?;
            tx.send(Action::ModeChange(Mode::Home))?;
          }
        },
        KeyCode::Backspace => {
          self.query.pop();
        },
        KeyCode::Char(c) => {
          self.query.push(c);
        },
        _ => {},
      },
      _ => {},
    }
    Ok(None)
  }

  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::ModeChange(mode) => {
        self.mode = mode;
      },
      Action::SubmitSearch(_) => {
        self.error = None;
      },
      Action::SearchResolved(_, _) => {
        self.error = None;
      },
      Action::SearchFailed(_, message) => {
        self.error = Some(message);
      },
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Length(1)])
      .split(area);

    let editing = self.mode == Mode::SearchInput;
    let border_style = if editing { self.palette.selected } else { self.palette.dimmed };
    let content = if self.query.is_empty() && !editing {
      Line::styled("Search for a user... [/]", self.palette.dimmed)
    } else if editing {
      Line::styled(format!("{}█", self.query), self.palette.text)
    } else {
      Line::styled(self.query.clone(), self.palette.text)
    };
    let input = Paragraph::new(content)
      .block(Block::bordered().border_type(BorderType::Rounded).border_style(border_style).title("Search"));
    f.render_widget(input, chunks[0]);

    if let Some(message) = &self.error {
      let error = Paragraph::new(Text::styled(message.clone(), self.palette.error)).centered();
      f.render_widget(error, chunks[1]);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  fn focused(query: &str) -> (SearchBar, mpsc::UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut bar = SearchBar::new();
    bar.register_action_handler(tx).unwrap();
    bar.update(Action::ModeChange(Mode::SearchInput)).unwrap();
    for c in query.chars() {
      bar.handle_key_events(KeyEvent::from(KeyCode::Char(c))).unwrap();
    }
    (bar, rx)
  }

  #[test]
  fn whitespace_only_query_is_never_submitted() {
    let (mut bar, mut rx) = focused("   ");
    bar.update(Action::SearchFailed(1, "no such user".into())).unwrap();

    bar.handle_key_events(KeyEvent::from(KeyCode::Enter)).unwrap();

    assert!(rx.try_recv().is_err());
    assert_eq!(bar.error.as_deref(), Some("no such user"));
  }

  #[test]
  fn submits_the_query_as_typed_and_returns_home() {
    let (mut bar, mut rx) = focused("Alice ");

    bar.handle_key_events(KeyEvent::from(KeyCode::Enter)).unwrap();

    assert_eq!(rx.try_recv().unwrap(), Action::SubmitSearch("Alice ".into()));
    assert_eq!(rx.try_recv().unwrap(), Action::ModeChange(Mode::Home));
  }

  #[test]
  fn a_new_submission_clears_the_previous_error() {
    let (mut bar, _rx) = focused("alice");
    bar.update(Action::SearchFailed(1, "no such user".into())).unwrap();

    bar.update(Action::SubmitSearch("alice".into())).unwrap();
    assert_eq!(bar.error, None);
  }

  #[test]
  fn resolution_clears_the_error() {
    let (mut bar, _rx) = focused("alice");
    bar.update(Action::SearchFailed(1, "no such user".into())).unwrap();

    bar.update(Action::SearchResolved(2, "alice".into())).unwrap();
    assert_eq!(bar.error, None);
  }

  #[test]
  fn failure_sets_the_error_message() {
    let (mut bar, _rx) = focused("nobody");

    bar.update(Action::SearchFailed(1, "User not found".into())).unwrap();
    assert_eq!(bar.error.as_deref(), Some("User not found"));
  }

  #[test]
  fn backspace_edits_the_query() {
    let (mut bar, _rx) = focused("ab");
    bar.handle_key_events(KeyEvent::from(KeyCode::Backspace)).unwrap();
    assert_eq!(bar.query, "a");
  }
}
