//! Panel open/closed state

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    /// Content visible, `opened` marker present
    Opened,
    /// Only the tab labels visible
    #[default]
    Closed,
}

impl PanelState {
    pub fn toggled(&self) -> PanelState {
        match self {
            PanelState::Opened => PanelState::Closed,
            PanelState::Closed => PanelState::Opened,
        }
    }

    pub fn is_opened(&self) -> bool {
        matches!(self, PanelState::Opened)
    }

    /// Name of the notification fired when this state is reached
    pub fn notification(&self) -> &'static str {
        self.as_str()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelState::Opened => "opened",
            PanelState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PanelState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opened" => Ok(PanelState::Opened),
            "closed" => Ok(PanelState::Closed),
            _ => Err(format!("Unknown panel state: {}", s)),
        }
    }
}
