//! Fixed visual palette shared by categories and notes.

use serde::{Deserialize, Serialize};

/// One of the seven menu palettes a category or note card is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Latte,
    Matcha,
    Mocha,
    Strawberry,
    Caramel,
    Blueberry,
    Lemon,
}

impl Theme {
    /// Every palette in menu order.
    pub const ALL: [Theme; 7] = [
        Theme::Latte,
        Theme::Matcha,
        Theme::Mocha,
        Theme::Strawberry,
        Theme::Caramel,
        Theme::Blueberry,
        Theme::Lemon,
    ];

    /// Storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latte => "latte",
            Self::Matcha => "matcha",
            Self::Mocha => "mocha",
            Self::Strawberry => "strawberry",
            Self::Caramel => "caramel",
            Self::Blueberry => "blueberry",
            Self::Lemon => "lemon",
        }
    }

    /// Parses a storage/wire name. Case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == value)
    }
}
