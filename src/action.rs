use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  api::UserSummary,
  mode::{FeedMode, Mode},
  theme::Theme,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  Tick,
  Render,
  Resize(u16, u16),
  Suspend,
  Resume,
  ConfirmQuit,
  Quit,
  Error(String),
  ModeChange(Mode),
  SelectFeed(FeedMode),
  FollowingLoaded(u64, Vec<UserSummary>),
  SubmitSearch(String),
  SearchResolved(u64, String),
  SearchFailed(u64, String),
  ToggleTheme,
  ThemeChanged(Theme),
  OpenProfile(String),
  ChangeTab(usize),
}
