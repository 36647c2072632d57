use serde::{Deserialize, Serialize};

/// Which part of the home view currently owns keyboard input.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
  #[default]
  Home,
  SearchInput,
  Compose,
}

/// The two curated content views. Exactly one is active at any time.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedMode {
  #[default]
  ForYou,
  Following,
}

impl FeedMode {
  pub fn title(self) -> &'static str {
    match self {
      FeedMode::ForYou => "For you",
      FeedMode::Following => "Following",
    }
  }
}
