use ratatui::{
  layout::Rect,
  text::{Line, Text},
  widgets::{Block, BorderType, Paragraph},
};

use crate::{
  action::Action,
  components::Component,
  theme::Palette,
  tui::Frame,
};

/// The landing surface for a resolved profile. Keyed by the canonical handle
/// returned by the lookup, which is also the tab's identity.
pub struct ProfileView {
  username: String,
  palette: Palette,
}

impl ProfileView {
  pub fn new(username: String, palette: Palette) -> Self {
    Self { username, palette }
  }
}

impl Component for ProfileView {
  fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    if let Action::ThemeChanged(theme) = action {
      self.palette = Palette::of(theme);
    }
    Ok(None)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let text = Text::from(vec![
      Line::styled(format!("@{}", self.username), self.palette.accent),
      Line::raw(""),
      Line::styled("Posts, likes and followers live here.", self.palette.dimmed),
      Line::styled("[x] close tab  [H]/[L] switch tabs", self.palette.dimmed),
    ]);
    let card =
      Paragraph::new(text).centered().block(Block::bordered().border_type(BorderType::Rounded).title("Profile"));
    f.render_widget(card, area);
    Ok(())
  }
}
