//! Edge and corner directions
//!
//! A [`Direction`] names one of the eight places a window can be resized
//! from or snapped to. Each one decomposes into an optional vertical and an
//! optional horizontal component.

use serde::{Deserialize, Serialize};

/// Vertical component of a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VDirection {
    Top,
    Bottom,
}

/// Horizontal component of a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HDirection {
    Left,
    Right,
}

/// The four window edges and four corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Direction {
    /// All directions, corners and edges interleaved in reading order
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Left,
        Direction::Right,
        Direction::BottomLeft,
        Direction::Bottom,
        Direction::BottomRight,
    ];

    pub fn vertical(self) -> Option<VDirection> {
        match self {
            Direction::TopLeft | Direction::Top | Direction::TopRight => Some(VDirection::Top),
            Direction::BottomLeft | Direction::Bottom | Direction::BottomRight => {
                Some(VDirection::Bottom)
            }
            Direction::Left | Direction::Right => None,
        }
    }

    pub fn horizontal(self) -> Option<HDirection> {
        match self {
            Direction::TopLeft | Direction::Left | Direction::BottomLeft => Some(HDirection::Left),
            Direction::TopRight | Direction::Right | Direction::BottomRight => {
                Some(HDirection::Right)
            }
            Direction::Top | Direction::Bottom => None,
        }
    }

    /// Top and bottom snaps feed the maximize path instead of tiling
    pub fn maximizes(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_have_one_component() {
        for direction in [Direction::Top, Direction::Bottom] {
            assert!(direction.vertical().is_some());
            assert!(direction.horizontal().is_none());
        }
        for direction in [Direction::Left, Direction::Right] {
            assert!(direction.vertical().is_none());
            assert!(direction.horizontal().is_some());
        }
    }

    #[test]
    fn corners_have_both_components() {
        let corners: Vec<_> = Direction::ALL
            .iter()
            .filter(|d| d.vertical().is_some() && d.horizontal().is_some())
            .collect();
        assert_eq!(corners.len(), 4);
        assert_eq!(Direction::BottomLeft.vertical(), Some(VDirection::Bottom));
        assert_eq!(Direction::BottomLeft.horizontal(), Some(HDirection::Left));
        assert_eq!(Direction::TopRight.vertical(), Some(VDirection::Top));
        assert_eq!(Direction::TopRight.horizontal(), Some(HDirection::Right));
    }

    #[test]
    fn only_top_and_bottom_maximize() {
        let maximizing: Vec<_> = Direction::ALL.into_iter().filter(|d| d.maximizes()).collect();
        assert_eq!(maximizing, vec![Direction::Top, Direction::Bottom]);
    }
}
