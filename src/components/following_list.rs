use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
  layout::Rect,
  text::{Line, Text},
  widgets::{Block, BorderType, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  api::UserSummary,
  components::Component,
  config::Config,
  mode::{FeedMode, Mode},
  theme::Palette,
  tui::Frame,
};

/// The suggested/followed users list shown in the "Following" feed. The list
/// is replaced wholesale on every load; an empty list and a list that never
/// loaded look the same.
pub struct FollowingList {
  command_tx: Option<UnboundedSender<Action>>,
  config: Config,
  mode: Mode,
  feed_mode: FeedMode,
  palette: Palette,
  users: Vec<UserSummary>,
  state: ListState,
}

impl FollowingList {
  pub fn new() -> Self {
    Self {
      command_tx: None,
      config: Config::default(),
      mode: Mode::default(),
      feed_mode: FeedMode::default(),
      palette: Palette::default(),
      users: Vec::new(),
      state: ListState::default().with_selected(Some(0)),
    }
  }

  fn scrollable(&self) -> bool {
    self.mode == Mode::Home && self.feed_mode == FeedMode::Following && !self.users.is_empty()
  }

  fn select_next(&mut self) {
    let selected_idx = self.state.selected().unwrap_or(0);
    self.state.select(Some((selected_idx + 1) % self.users.len()));
  }

  fn select_prev(&mut self) {
    let selected_idx = self.state.selected().unwrap_or(0);
    if selected_idx == 0 {
      self.state.select(Some(self.users.len() - 1));
    } else {
      self.state.select(Some(selected_idx - 1));
    }
  }
}

impl Component for FollowingList {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    if self.scrollable() {
      match key.code {
        KeyCode::Char('j') | KeyCode::Down => self.select_next(),
        KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
        KeyCode::Enter => {
          if let Some(tx) = &self.command_tx {
            let selected_idx = self.state.selected().unwrap_or(0);
            if let Some(user) = self.users.get(selected_idx) {
              tx.send(Action::OpenProfile(user.username.clone()))?;
            }
          }
        },
        _ => {},
      }
    }
    Ok(None)
  }

  fn handle_mouse_events(&mut self, mouse: MouseEvent) -> color_eyre::Result<Option<Action>> {
    if self.scrollable() {
      match mouse.kind {
        MouseEventKind::ScrollDown => self.select_next(),
        MouseEventKind::ScrollUp => self.select_prev(),
        _ => {},
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
      Action::FollowingLoaded(_, users) => {
        self.users = users;
        self.state.select(Some(0));
      },
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let block =
      Block::bordered().border_type(BorderType::Rounded).border_style(self.palette.dimmed).title("Following");

    if self.users.is_empty() {
      let placeholder =
        Paragraph::new(Text::styled("No followed users found.", self.palette.dimmed)).centered().block(block);
      f.render_widget(placeholder, area);
      return Ok(());
    }

    let items: Vec<ListItem> = self
      .users
      .iter()
      .enumerate()
      .map(|(i, user)| {
        let name_style = if self.state.selected() == Some(i) { self.palette.selected } else { self.palette.accent };
        let text = Text::from(vec![
          Line::styled(user.full_name.clone(), name_style),
          Line::styled(format!("@{}", user.username), self.palette.dimmed),
        ]);
        ListItem::new(text)
      })
      .collect();

    let list = List::new(items).block(block).highlight_symbol("┃").repeat_highlight_symbol(true).scroll_padding(1);

    f.render_stateful_widget(list, area, &mut self.state);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use tokio::sync::mpsc;

  use super::*;

  fn user(handle: &str) -> UserSummary {
    UserSummary {
      id: handle.to_string(),
      full_name: handle.to_uppercase(),
      username: handle.to_string(),
      profile_img: None,
    }
  }

  fn render(list: &mut FollowingList) -> String {
    let backend = ratatui::backend::TestBackend::new(40, 12);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(|f| list.draw(f, f.size()).unwrap()).unwrap();
    terminal.backend().buffer().content.iter().map(|cell| cell.symbol().to_string()).collect()
  }

  #[test]
  fn loads_replace_the_list_wholesale() {
    let mut list = FollowingList::new();
    list.update(Action::FollowingLoaded(1, vec![user("alice"), user("bob")])).unwrap();
    list.update(Action::FollowingLoaded(2, vec![user("carol")])).unwrap();

    assert_eq!(list.users.len(), 1);
    assert_eq!(list.users[0].username, "carol");
  }

  #[test]
  fn an_empty_load_renders_the_placeholder() {
    let mut list = FollowingList::new();
    list.update(Action::FollowingLoaded(1, Vec::new())).unwrap();

    let screen = render(&mut list);
    assert!(screen.contains("No followed users found."));
  }

  #[test]
  fn a_loaded_list_renders_names_and_handles() {
    let mut list = FollowingList::new();
    list.update(Action::FollowingLoaded(1, vec![user("alice")])).unwrap();

    let screen = render(&mut list);
    assert!(screen.contains("ALICE"));
    assert!(screen.contains("@alice"));
    assert!(!screen.contains("No followed users found."));
  }

  #[test]
  fn enter_opens_the_selected_profile() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut list = FollowingList::new();
    list.register_action_handler(tx).unwrap();
    list.update(Action::SelectFeed(FeedMode::Following)).unwrap();
    list.update(Action::FollowingLoaded(1, vec![user("alice"), user("bob")])).unwrap();

    list.handle_key_events(KeyEvent::from(KeyCode::Char('j'))).unwrap();
    list.handle_key_events(KeyEvent::from(KeyCode::Enter)).unwrap();

    assert_eq!(rx.try_recv().unwrap(), Action::OpenProfile("bob".into()));
  }

  #[test]
  fn selection_wraps_around() {
    let mut list = FollowingList::new();
    list.update(Action::SelectFeed(FeedMode::Following)).unwrap();
    list.update(Action::FollowingLoaded(1, vec![user("alice"), user("bob")])).unwrap();

    list.handle_key_events(KeyEvent::from(KeyCode::Char('k'))).unwrap();
    assert_eq!(list.state.selected(), Some(1));
    list.handle_key_events(KeyEvent::from(KeyCode::Char('j'))).unwrap();
    assert_eq!(list.state.selected(), Some(0));
  }
}
