use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::Component;
use crate::config::Config;
use crate::theme::Palette;
use crate::tui::Frame;

pub struct QuitPopup {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  palette: Palette,
  show: bool,
}

impl QuitPopup {
  pub fn new() -> Self {
    Self {
      command_tx: None,
      config: Config::default(),
      palette: Palette::default(),
      show: false,
    }
  }
}

impl Component for QuitPopup {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    if self.show {
      match key.code {
        KeyCode::Char('y') => {
          if let Some(tx) = &self.command_tx {
            tx.send(Action::Quit)?;
          }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
          self.show = false;
        }
        _ => {}
      }
    }

    Ok(None)
  }

  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::ConfirmQuit => {
        if self.config.confirm_quit {
          self.show = true;
        } else if let Some(tx) = &self.command_tx {
          tx.send(Action::Quit)?;
        }
      }
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      }
      _ => {}
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    if self.show {
      let percent_x: u16 = 40;
      let percent_y: u16 = 20;

      let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
      ]).split(area);
      let popup_area = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2)
      ]).split(popup_layout[1])[1];

      let text = Text::from(vec![
        Line::styled("Are you sure you want to quit?", self.palette.text),
        Line::styled("[y]es      [n]o", self.palette.dimmed),
      ]).centered();

      let paragraph = Paragraph::new(text.centered()).centered()
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_type(BorderType::Rounded));
      f.render_widget(Clear, popup_area);
      f.render_widget(paragraph, popup_area);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  #[test]
  fn quitting_without_confirmation_when_configured_off() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut popup = QuitPopup::new();
    popup.register_action_handler(tx).unwrap();
    popup.register_config_handler(Config { confirm_quit: false, ..Config::default() }).unwrap();

    popup.update(Action::ConfirmQuit).unwrap();

    assert_eq!(rx.try_recv().unwrap(), Action::Quit);
    assert!(!popup.show);
  }

  #[test]
  fn confirmation_gates_the_quit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut popup = QuitPopup::new();
    popup.register_action_handler(tx).unwrap();
    popup.register_config_handler(Config { confirm_quit: true, ..Config::default() }).unwrap();

    popup.update(Action::ConfirmQuit).unwrap();
    assert!(popup.show);
    assert!(rx.try_recv().is_err());

    popup.handle_key_events(KeyEvent::from(KeyCode::Char('y'))).unwrap();
    assert_eq!(rx.try_recv().unwrap(), Action::Quit);
  }

  #[test]
  fn unrelated_actions_do_not_quit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut popup = QuitPopup::new();
    popup.register_action_handler(tx).unwrap();
    popup.register_config_handler(Config { confirm_quit: false, ..Config::default() }).unwrap();

    popup.update(Action::Tick).unwrap();

    assert!(rx.try_recv().is_err());
  }
}
