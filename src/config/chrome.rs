use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::direction::Direction;
use crate::domain::snap::SnapAllowance;
use crate::ui::renderer::OverlayStyle;

/// User-facing configuration for the window chrome behaviour
///
/// Every field can be changed at any time through the controller; changes
/// take effect on the next gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Enables edge/corner snapping and the live preview overlay
    pub aero_snap: bool,
    /// Distance from a monitor edge that triggers an edge snap
    pub edge_allowance: f64,
    /// Distance from a monitor corner that triggers a quarter tile
    pub corner_allowance: f64,
    /// Double clicking the move surface toggles maximize
    pub double_click_maximize: bool,
    /// Dragging a vertical handle to a monitor edge snaps to full height
    pub vertical_resize_snap: bool,
    /// Keeps the pointer out of the reserved area under the visual bounds
    pub prevent_cursor_over_taskbar: bool,
    /// Directions that never snap (maximize/restore are unaffected)
    pub disabled_directions: BTreeSet<Direction>,
    /// Cosmetic style of the snap preview
    pub overlay_style: OverlayStyle,
    /// Minimum width of the half-screen snap preview
    pub overlay_min_width: f64,
}

impl ChromeConfig {
    pub const DEFAULT_EDGE_ALLOWANCE: f64 = 10.0;
    pub const DEFAULT_CORNER_ALLOWANCE: f64 = 50.0;

    pub fn allowance(&self) -> SnapAllowance {
        SnapAllowance {
            edge: self.edge_allowance,
            corner: self.corner_allowance,
        }
    }

    pub fn is_disabled(&self, direction: Direction) -> bool {
        self.disabled_directions.contains(&direction)
    }

    /// Returns a copy with out-of-range numeric settings replaced by defaults
    pub fn sanitized(mut self) -> Self {
        self.edge_allowance = sanitize_allowance(self.edge_allowance, Self::DEFAULT_EDGE_ALLOWANCE);
        self.corner_allowance =
            sanitize_allowance(self.corner_allowance, Self::DEFAULT_CORNER_ALLOWANCE);
        if !self.overlay_min_width.is_finite() || self.overlay_min_width < 0.0 {
            self.overlay_min_width = 0.0;
        }
        self
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            aero_snap: true,
            edge_allowance: Self::DEFAULT_EDGE_ALLOWANCE,
            corner_allowance: Self::DEFAULT_CORNER_ALLOWANCE,
            double_click_maximize: true,
            vertical_resize_snap: true,
            prevent_cursor_over_taskbar: true,
            disabled_directions: BTreeSet::from([Direction::Bottom]),
            overlay_style: OverlayStyle::Minimalistic,
            overlay_min_width: 0.0,
        }
    }
}

fn sanitize_allowance(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}
