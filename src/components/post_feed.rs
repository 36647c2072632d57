use ratatui::{
  layout::Rect,
  text::Text,
  widgets::{Block, BorderType, Paragraph},
};

use crate::{
  action::Action,
  components::Component,
  config::Config,
  mode::FeedMode,
  theme::Palette,
  tui::Frame,
};

/// The post feed surface. The active feed mode is its only configuration
/// input; the posts themselves come from a separate component.
pub struct PostFeed {
  config: Config,
  palette: Palette,
  feed_mode: FeedMode,
}

impl PostFeed {
  pub fn new() -> Self {
    Self { config: Config::default(), palette: Palette::default(), feed_mode: FeedMode::default() }
  }
}

impl Component for PostFeed {
  fn register_config_handler(&mut self, config: Config) -> color_eyre::Result<()> {
    self.config = config;
    Ok(())
  }

  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::SelectFeed(feed_mode) => {
        self.feed_mode = feed_mode;
      },
      Action::ThemeChanged(theme) => {
        self.palette = Palette::of(theme);
      },
      _ => {},
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let block = Block::bordered()
      .border_type(BorderType::Rounded)
      .border_style(self.palette.dimmed)
      .title(self.feed_mode.title());
    let feed = Paragraph::new(Text::styled("No posts to show yet.", self.palette.dimmed)).centered().block(block);
    f.render_widget(feed, area);
    Ok(())
  }
}
