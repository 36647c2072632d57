use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::Rect,
  text::Line,
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

/// The post composer. Rendered above the feed regardless of feed mode. The
/// backend side of posting lives elsewhere; submitting just hands the draft
/// off and resets the box.
pub struct CreatePost {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  mode: Mode,
  palette: Palette,
  draft: String,
}

impl CreatePost {
  pub fn new() -> Self {
    Self {
      command_tx: None,
      config: Config::default(),
      mode: Mode::default(),
      palette: Palette::default(),
      draft: String::new(),
    }
  }
}

impl Component for CreatePost {
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
        if key.code == KeyCode::Char('p') {
          if let Some(tx) = &self.command_tx {
            tx.send(Action::ModeChange(Mode::Compose))?;
          }
        }
      },
      Mode::Compose => match key.code {
        KeyCode::Esc => {
          if let Some(tx) = &self.command_tx {
            tx.send(Action::ModeChange(Mode::Home))?;
          }
        },
        KeyCode::Enter => {
          if !self.draft.trim().is_empty() {
            log::debug!("Handing off a draft post of {} chars", self.draft.len());
            self.draft.clear();
          }
          if let Some(tx) = &self.command_tx {
            tx.send(Action::ModeChange(Mode::Home))?;
          }
        },
        KeyCode::Backspace => {
          self.draft.pop();
        },
        KeyCode::Char(c) => {
          self.draft.push(c);
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
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let composing = self.mode == Mode::Compose;
    let border_style = if composing { self.palette.selected } else { self.palette.dimmed };
    let content = if self.draft.is_empty() && !composing {
      Line::styled("What is happening?! [p]", self.palette.dimmed)
    } else if composing {
      Line::styled(format!("{}█", self.draft), self.palette.text)
    } else {
      Line::styled(self.draft.clone(), self.palette.text)
    };
    let composer = Paragraph::new(content)
      .block(Block::bordered().border_type(BorderType::Rounded).border_style(border_style).title("New post"));
    f.render_widget(composer, area);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  #[test]
  fn submitting_clears_the_draft_and_returns_home() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut composer = CreatePost::new();
    composer.register_action_handler(tx).unwrap();
    composer.update(Action::ModeChange(Mode::Compose)).unwrap();
    for c in "hello".chars() {
      composer.handle_key_events(KeyEvent::from(KeyCode::Char(c))).unwrap();
    }

    composer.handle_key_events(KeyEvent::from(KeyCode::Enter)).unwrap();

    assert_eq!(composer.draft, "");
    assert_eq!(rx.try_recv().unwrap(), Action::ModeChange(Mode::Home));
  }
}
