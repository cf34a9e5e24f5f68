//! Capability value object

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of AI operation that several vendors may support
///
/// The set is closed: configuration naming an unknown capability fails to
/// deserialize instead of being carried around as a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Text generation
    Text,
    /// Image analysis
    Vision,
    /// Audio analysis / transcription
    Audio,
    /// Web search
    Search,
    /// Image generation
    ImageGen,
}

impl Capability {
    /// Every capability, in declaration order
    pub const ALL: [Capability; 5] = [
        Capability::Text,
        Capability::Vision,
        Capability::Audio,
        Capability::Search,
        Capability::ImageGen,
    ];

    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Vision => "vision",
            Self::Audio => "audio",
            Self::Search => "search",
            Self::ImageGen => "image_gen",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "text" => Ok(Self::Text),
            "vision" => Ok(Self::Vision),
            "audio" => Ok(Self::Audio),
            "search" => Ok(Self::Search),
            "image_gen" | "imagegen" => Ok(Self::ImageGen),
            other => Err(Error::invalid_argument(format!(
                "Unknown capability '{other}'. Use text, vision, audio, search or image_gen"
            ))),
        }
    }
}
