use color_eyre::eyre::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::UnboundedSender;

use super::{
  create_post::CreatePost, feed_tabs::FeedTabs, following_list::FollowingList, post_feed::PostFeed,
  search_bar::SearchBar, Component,
};
use crate::{
  action::Action,
  config::Config,
  mode::FeedMode,
  tui::{Event, Frame},
};

/// The landing view: feed-mode header, user search, post composer, and the
/// feed area. The feed area shows exactly one of the post feed or the
/// following list, depending on the active feed mode.
pub struct HomeView {
  feed_tabs: FeedTabs,
  search_bar: SearchBar,
  create_post: CreatePost,
  post_feed: PostFeed,
  following_list: FollowingList,
  feed_mode: FeedMode,
}

impl HomeView {
  pub fn new() -> Self {
    Self {
      feed_tabs: FeedTabs::new(),
      search_bar: SearchBar::new(),
      create_post: CreatePost::new(),
      post_feed: PostFeed::new(),
      following_list: FollowingList::new(),
      feed_mode: FeedMode::default(),
    }
  }

  fn children(&mut self) -> [&mut dyn Component; 5] {
    [
      &mut self.feed_tabs,
      &mut self.search_bar,
      &mut self.create_post,
      &mut self.post_feed,
      &mut self.following_list,
    ]
  }
}

impl Component for HomeView {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    for child in self.children() {
      child.register_action_handler(tx.clone())?;
    }
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> Result<()> {
    for child in self.children() {
      child.register_config_handler(config.clone())?;
    }
    Ok(())
  }

  fn init(&mut self, area: Rect) -> Result<()> {
    for child in self.children() {
      child.init(area)?;
    }
    Ok(())
  }

  fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    if let Some(event) = event {
      for child in self.children() {
        child.handle_events(Some(event.clone()))?;
      }
    }
    Ok(None)
  }

  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    for child in self.children() {
      child.update(action.clone())?;
    }
    if let Action::SelectFeed(feed_mode) = action {
      self.feed_mode = feed_mode;
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(2), Constraint::Length(4), Constraint::Length(3), Constraint::Fill(1)])
      .split(area);

    self.feed_tabs.draw(f, chunks[0])?;
    self.search_bar.draw(f, chunks[1])?;
    self.create_post.draw(f, chunks[2])?;

    match self.feed_mode {
      FeedMode::ForYou => self.post_feed.draw(f, chunks[3])?,
      FeedMode::Following => self.following_list.draw(f, chunks[3])?,
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mode::FeedMode;

  fn render(home: &mut HomeView) -> String {
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(|f| home.draw(f, f.size()).unwrap()).unwrap();
    terminal.backend().buffer().content.iter().map(|cell| cell.symbol().to_string()).collect()
  }

  #[test]
  fn renders_exactly_one_feed_surface() {
    let mut home = HomeView::new();

    let for_you = render(&mut home);
    assert!(for_you.contains("No posts to show yet."));
    assert!(!for_you.contains("No followed users found."));

    home.update(Action::SelectFeed(FeedMode::Following)).unwrap();
    let following = render(&mut home);
    assert!(following.contains("No followed users found."));
    assert!(!following.contains("No posts to show yet."));

    home.update(Action::SelectFeed(FeedMode::ForYou)).unwrap();
    let back = render(&mut home);
    assert!(back.contains("No posts to show yet."));
    assert!(!back.contains("No followed users found."));
  }

  #[test]
  fn the_composer_is_rendered_in_both_feed_modes() {
    let mut home = HomeView::new();

    assert!(render(&mut home).contains("What is happening?!"));
    home.update(Action::SelectFeed(FeedMode::Following)).unwrap();
    assert!(render(&mut home).contains("What is happening?!"));
  }
}
