//! Scene identities and the fixed story order.

use std::fmt;
use std::str::FromStr;

use heartline_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A page's declared scene identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Opening typewriter line.
    Intro,
    /// Find-the-heart mini-game.
    HeartGame,
    /// Photo memories gallery.
    Memories,
    /// Hold-to-confirm gesture.
    Hold,
    /// Closing lines and the final question.
    Finale,
}

impl Scene {
    /// Every scene in story order.
    pub const ALL: [Scene; 5] = [
        Scene::Intro,
        Scene::HeartGame,
        Scene::Memories,
        Scene::Hold,
        Scene::Finale,
    ];

    /// The identity string a page declares.
    #[must_use]
    pub fn identity(self) -> &'static str {
        match self {
            Self::Intro => "index",
            Self::HeartGame => "scene2",
            Self::Memories => "scene3",
            Self::Hold => "scene4",
            Self::Finale => "final",
        }
    }

    /// The page identifier this scene is served from.
    #[must_use]
    pub fn page(self) -> &'static str {
        match self {
            Self::Intro => "index.html",
            Self::HeartGame => "scene2.html",
            Self::Memories => "scene3.html",
            Self::Hold => "scene4.html",
            Self::Finale => "final.html",
        }
    }

    /// The scene the "continue" action leads to.
    #[must_use]
    pub fn next(self) -> Option<Scene> {
        match self {
            Self::Intro => Some(Self::HeartGame),
            Self::HeartGame => Some(Self::Memories),
            Self::Memories => Some(Self::Hold),
            Self::Hold => Some(Self::Finale),
            Self::Finale => None,
        }
    }

    /// Background music volume for this scene.
    #[must_use]
    pub fn music_volume(self) -> f64 {
        match self {
            Self::Finale => 0.45,
            _ => 0.3,
        }
    }

    /// Resolves a page identifier such as `scene2.html`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownScene` if no scene is served from `page`.
    pub fn from_page(page: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|scene| scene.page() == page)
            .ok_or_else(|| DomainError::UnknownScene(page.to_owned()))
    }
}

impl FromStr for Scene {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scene| scene.identity() == s)
            .ok_or_else(|| DomainError::UnknownScene(s.to_owned()))
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identity())
    }
}
