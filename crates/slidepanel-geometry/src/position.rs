//! Edge positions and the axis they imply
//!
//! | Position | Orientation | Dimension |
//! | top      | horizontal  | height    |
//! | bottom   | horizontal  | height    |
//! | left     | vertical    | width     |
//! | right    | vertical    | width     |

use serde::{Deserialize, Serialize};

/// The container edge a panel is docked to.
///
/// Values outside the four edges are kept verbatim in `Other` so the position
/// marker can still be applied; they simply have no [`Axis`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
    Other(String),
}

impl Position {
    /// Resolve the orientation and animated dimension for this edge
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Position::Top | Position::Bottom => Some(Axis {
                orientation: Orientation::Horizontal,
                dimension: Dimension::Height,
            }),
            Position::Left | Position::Right => Some(Axis {
                orientation: Orientation::Vertical,
                dimension: Dimension::Width,
            }),
            Position::Other(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Position::Other(_))
    }

    /// Class applied to the container for this position (`panel-top`, ...)
    pub fn marker(&self) -> String {
        format!("panel-{}", self.as_str())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Position::Top => "top",
            Position::Right => "right",
            Position::Bottom => "bottom",
            Position::Left => "left",
            Position::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Position {
    fn from(s: &str) -> Self {
        match s {
            "top" => Position::Top,
            "right" => Position::Right,
            "bottom" => Position::Bottom,
            "left" => Position::Left,
            other => Position::Other(other.to_string()),
        }
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::from(s.as_str())
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

impl std::str::FromStr for Position {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Position::from(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Docked to the top or bottom edge
    Horizontal,
    /// Docked to the left or right edge
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }

    /// Class applied to the container (`panel-horizontal` / `panel-vertical`)
    pub fn marker(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "panel-horizontal",
            Orientation::Vertical => "panel-vertical",
        }
    }

    /// The two padding properties perpendicular to the slide axis
    pub fn padding_properties(&self) -> [&'static str; 2] {
        match self {
            Orientation::Horizontal => ["padding-left", "padding-right"],
            Orientation::Vertical => ["padding-top", "padding-bottom"],
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Height,
    Width,
}

impl Dimension {
    /// Inline style property name for this dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Height => "height",
            Dimension::Width => "width",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orientation and animated dimension derived from a [`Position`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axis {
    pub orientation: Orientation,
    pub dimension: Dimension,
}
