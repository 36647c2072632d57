use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
  layout::{Constraint, Direction, Layout},
  prelude::Rect,
  widgets::Block,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
  action::Action,
  api::{ApiClient, ApiError},
  components::{info_bar::InfoBar, popup_quit::QuitPopup, tab_viewer::TabViewer, Component},
  config::Config,
  mode::{FeedMode, Mode},
  theme::{Palette, ThemeStore},
  tui,
  utils::get_data_dir,
};

/// Monotonic issue counter for one slice of async state. A completion is
/// applied only while it carries the latest issued value, so an overlapping
/// request that resolves late cannot clobber newer state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
  pub fn issue(&mut self) -> u64 {
    self.0 += 1;
    self.0
  }

  pub fn is_current(self, generation: u64) -> bool {
    self.0 == generation
  }
}

pub struct App {
  pub config: Config,
  pub tick_rate: f64,
  pub frame_rate: f64,
  pub components: Vec<Box<dyn Component>>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub feed_mode: FeedMode,
  pub last_tick_key_events: Vec<KeyEvent>,
  api: ApiClient,
  theme_store: ThemeStore,
  palette: Palette,
  following_gen: Generation,
  search_gen: Generation,
}

impl App {
  pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
    let config = Config::new()?;
    let api = ApiClient::new(&config.api.base_url)?;
    let theme_store = ThemeStore::load(&get_data_dir());
    let palette = Palette::of(theme_store.theme());
    let tab_viewer = TabViewer::new();
    let info_bar = InfoBar::new();
    let quit_popup = QuitPopup::new();
    Ok(Self {
      tick_rate,
      frame_rate,
      components: vec![Box::new(tab_viewer), Box::new(info_bar), Box::new(quit_popup)],
      should_quit: false,
      should_suspend: false,
      config,
      mode: Mode::Home,
      feed_mode: FeedMode::ForYou,
      last_tick_key_events: Vec::new(),
      api,
      theme_store,
      palette,
      following_gen: Generation::default(),
      search_gen: Generation::default(),
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).mouse(true);
    tui.enter()?;

    for component in self.components.iter_mut() {
      component.register_action_handler(action_tx.clone())?;
    }

    for component in self.components.iter_mut() {
      component.register_config_handler(self.config.clone())?;
    }

    for component in self.components.iter_mut() {
      component.init(tui.size()?)?;
    }

    // The persisted theme is applied before the first frame is drawn.
    action_tx.send(Action::ThemeChanged(self.theme_store.theme()))?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if self.mode == Mode::Home {
              match key.code {
                crossterm::event::KeyCode::Char('q') => action_tx.send(Action::ConfirmQuit)?,
                crossterm::event::KeyCode::Char('z')
                  if key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
                {
                  action_tx.send(Action::Suspend)?
                },
                _ => {},
              }
            }
          },
          _ => {},
        }
        for component in self.components.iter_mut() {
          if let Some(action) = component.handle_events(Some(e.clone()))? {
            action_tx.send(action)?;
          }
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }
        match action {
          Action::Tick => {
            self.last_tick_key_events.drain(..);
          },
          Action::Quit => self.should_quit = true,
          Action::Suspend => self.should_suspend = true,
          Action::Resume => self.should_suspend = false,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.draw(&mut tui, &action_tx)?;
          },
          Action::Render => {
            self.draw(&mut tui, &action_tx)?;
          },
          Action::ModeChange(mode) => {
            self.mode = mode;
          },
          Action::SelectFeed(feed_mode) => {
            let entered_following = feed_mode == FeedMode::Following && self.feed_mode != FeedMode::Following;
            self.feed_mode = feed_mode;
            if entered_following {
              self.fetch_following(&action_tx);
            }
          },
          Action::FollowingLoaded(generation, _) if !self.following_gen.is_current(generation) => {
            log::debug!("Discarding stale suggested-users response (generation {generation})");
            continue;
          },
          Action::SubmitSearch(ref query) => {
            self.lookup_profile(query.clone(), &action_tx);
          },
          Action::SearchResolved(generation, ref username) => {
            if !self.search_gen.is_current(generation) {
              log::debug!("Discarding stale search result for @{username}");
              continue;
            }
            action_tx.send(Action::OpenProfile(username.clone()))?;
          },
          Action::SearchFailed(generation, _) if !self.search_gen.is_current(generation) => {
            log::debug!("Discarding stale search failure (generation {generation})");
            continue;
          },
          Action::ToggleTheme => {
            let theme = self.theme_store.toggle();
            self.palette = Palette::of(theme);
            action_tx.send(Action::ThemeChanged(theme))?;
          },
          _ => {},
        }
        for component in self.components.iter_mut() {
          if let Some(action) = component.update(action.clone())? {
            action_tx.send(action)?
          };
        }
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).mouse(true);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn draw(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    tui.draw(|f| {
      f.render_widget(Block::default().style(self.palette.base), f.size());
      let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(f.size());
      // The quit popup draws over the whole frame, last.
      let areas = [layout[0], layout[1], f.size()];
      for (component, area) in self.components.iter_mut().zip(areas) {
        if let Err(e) = component.draw(f, area) {
          action_tx.send(Action::Error(format!("Failed to draw: {:?}", e))).unwrap();
        }
      }
    })?;
    Ok(())
  }

  /// Best-effort load of the suggested/followed users. Failures go to the
  /// log only; the list keeps whatever it had.
  fn fetch_following(&mut self, action_tx: &UnboundedSender<Action>) {
    let generation = self.following_gen.issue();
    let api = self.api.clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
      match api.suggested_users().await {
        Ok(users) => {
          if tx.send(Action::FollowingLoaded(generation, users)).is_err() {
            log::error!("Suggested users arrived after shutdown");
          }
        },
        Err(e) => log::error!("Error fetching followed users: {e}"),
      }
    });
  }

  /// Resolve a typed handle to its canonical profile. Not-found and
  /// transport failures surface the same message to the user.
  fn lookup_profile(&mut self, query: String, action_tx: &UnboundedSender<Action>) {
    let generation = self.search_gen.issue();
    let api = self.api.clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
      let action = match api.profile_lookup(&query).await {
        Ok(profile) => Action::SearchResolved(generation, profile.username),
        Err(ApiError::Status { message: Some(message), .. }) => Action::SearchFailed(generation, message),
        Err(ApiError::Status { message: None, .. }) => Action::SearchFailed(generation, String::from("User not found")),
        Err(e) => {
          log::error!("Search error: {e}");
          Action::SearchFailed(generation, String::from("User not found"))
        },
      };
      if tx.send(action).is_err() {
        log::error!("Search result arrived after shutdown");
      }
    });
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn a_completion_for_the_latest_issue_is_current() {
    let mut generation = Generation::default();
    let token = generation.issue();
    assert!(generation.is_current(token));
  }

  #[test]
  fn a_reissue_makes_earlier_completions_stale() {
    let mut generation = Generation::default();
    let first = generation.issue();
    let second = generation.issue();

    assert!(!generation.is_current(first));
    assert!(generation.is_current(second));
  }

  #[test]
  fn issues_are_monotonic() {
    let mut generation = Generation::default();
    let a = generation.issue();
    let b = generation.issue();
    let c = generation.issue();
    assert_eq!((a, b, c), (1, 2, 3));
  }
}
