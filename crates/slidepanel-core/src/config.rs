//! Panel options

use serde::{Deserialize, Serialize};
use std::path::Path;

use slidepanel_geometry::Position;
use slidepanel_transition::{AnimationOptions, PanelState};

use crate::Result;

/// Options accepted by [`SlidingPanel::init`](crate::SlidingPanel::init).
///
/// Missing keys fall back to the defaults; `"margin": null` disables the
/// padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Edge the panel docks to
    pub position: Position,
    /// State to settle in right after init
    pub state: PanelState,
    /// Length applied as padding on both sides perpendicular to the slide axis
    pub margin: Option<String>,
    pub animation: AnimationOptions,
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_state(mut self, state: PanelState) -> Self {
        self.state = state;
        self
    }

    pub fn with_margin(mut self, margin: Option<&str>) -> Self {
        self.margin = margin.map(str::to_string);
        self
    }

    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    /// Margin to apply, if any
    pub fn margin(&self) -> Option<&str> {
        self.margin.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            position: Position::Top,
            state: PanelState::Closed,
            margin: Some("0.5em".to_string()),
            animation: AnimationOptions::default(),
        }
    }
}
