use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  config::Config,
  tui::{Event, Frame},
};

pub mod create_post;
pub mod feed_tabs;
pub mod following_list;
pub mod home;
pub mod info_bar;
pub mod popup_quit;
pub mod post_feed;
pub mod profile_view;
pub mod search_bar;
pub mod tab_bar;
pub mod tab_viewer;

pub trait Component {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    let _ = tx;
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> Result<()> {
    let _ = config;
    Ok(())
  }

  fn init(&mut self, area: Rect) -> Result<()> {
    let _ = area;
    Ok(())
  }

  fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    let r = match event {
      Some(Event::Key(key_event)) => self.handle_key_events(key_event)?,
      Some(Event::Mouse(mouse_event)) => self.handle_mouse_events(mouse_event)?,
      _ => None,
    };
    Ok(r)
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    let _ = key;
    Ok(None)
  }

  fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
    let _ = mouse;
    Ok(None)
  }

  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    let _ = action;
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()>;
}
