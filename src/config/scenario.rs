//! Replay scenarios
//!
//! A scenario describes a monitor layout, a window and an ordered list of
//! steps (pointer events and toggles). Replaying it drives a controller on
//! the headless platform and reports the window after every step. Scenarios
//! are written in RON:
//!
//! ```ron
//! (
//!     monitors: [(bounds: (x: 0.0, y: 0.0, w: 1920.0, h: 1080.0), visual_bounds: Some((x: 0.0, y: 0.0, w: 1920.0, h: 1040.0)))],
//!     window: (x: 100.0, y: 100.0, w: 800.0, h: 600.0),
//!     steps: [
//!         Press(target: Title, x: 150.0, y: 110.0),
//!         Drag(target: Title, x: 1915.0, y: 500.0),
//!         Release(target: Title, x: 1915.0, y: 500.0),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ChromeError, StateChange, WindowController, WindowState};
use crate::config::ChromeConfig;
use crate::domain::core::{Point, Rect, Size};
use crate::domain::direction::Direction;
use crate::input::pointer::{MoveSurface, PointerEvent, PointerPhase, PointerTarget, SurfaceId};
use crate::platform::headless::{HeadlessScreens, HeadlessWindow};
use crate::platform::monitors::Monitor;
use crate::platform::window::{HostWindow, SizeLimits};
use crate::ui::overlay::HeadlessOverlayBackend;
use crate::ui::renderer::OverlayStyle;

/// Scenario loading and replay errors
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Scenario defines no monitors")]
    NoMonitors,

    #[error("Controller error: {0}")]
    Chrome(#[from] ChromeError),
}

/// One monitor of the scenario layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    pub bounds: Rect,
    /// Defaults to the full bounds (no taskbar)
    #[serde(default)]
    pub visual_bounds: Option<Rect>,
}

/// Where a pointer step is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepTarget {
    /// The move surface
    Title,
    Handle(Direction),
}

/// A single scenario step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    Press { target: StepTarget, x: f64, y: f64 },
    Drag { target: StepTarget, x: f64, y: f64 },
    Release { target: StepTarget, x: f64, y: f64 },
    DoubleClick { target: StepTarget, x: f64, y: f64 },
    Shown,
    Maximize(bool),
    Minimize(bool),
    NativeIconify(bool),
    AeroSnap(bool),
    Resizable(bool),
    DisableDirection(Direction),
    EnableDirection(Direction),
    Style(OverlayStyle),
}

/// Complete replay input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub monitors: Vec<MonitorSpec>,
    pub window: Rect,
    #[serde(default)]
    pub min_size: Option<Size>,
    #[serde(default)]
    pub max_size: Option<Size>,
    /// Height of the move surface (title bar)
    #[serde(default = "default_title_height")]
    pub title_height: f64,
    #[serde(default)]
    pub config: ChromeConfig,
    pub steps: Vec<Step>,
}

fn default_title_height() -> f64 {
    30.0
}

/// Window and state after a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub bounds: Rect,
    pub state: WindowState,
    pub overlay: Option<Rect>,
    pub always_on_top: bool,
    pub changes: Vec<StateChange>,
}

const TITLE: SurfaceId = SurfaceId(1);

impl Scenario {
    /// Parses a scenario from RON text
    pub fn from_ron(text: &str) -> Result<Self, ScenarioError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a scenario file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_ron(&text)?;
        info!(path = %path.display(), steps = scenario.steps.len(), "scenario loaded");
        Ok(scenario)
    }

    fn screens(&self) -> Result<HeadlessScreens, ScenarioError> {
        if self.monitors.is_empty() {
            return Err(ScenarioError::NoMonitors);
        }
        let monitors = self
            .monitors
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Monitor::new(index, spec.bounds, spec.visual_bounds.unwrap_or(spec.bounds))
            })
            .collect();
        Ok(HeadlessScreens::new(monitors))
    }

    fn host(&self) -> HeadlessWindow {
        let defaults = SizeLimits::default();
        HeadlessWindow::new(self.window).with_size_limits(SizeLimits {
            min: self.min_size.unwrap_or(defaults.min),
            max: self.max_size.unwrap_or(defaults.max),
        })
    }

    /// Runs every step against the headless platform
    pub fn replay(&self) -> Result<Vec<StepReport>, ScenarioError> {
        let mut controller = WindowController::new(
            self.host(),
            self.screens()?,
            Box::new(HeadlessOverlayBackend::new()),
            self.config.clone(),
        )?;
        controller.set_move_control(MoveSurface {
            id: TITLE,
            preferred_height: self.title_height,
        });
        controller.on_shown();
        controller.record_changes(true);

        let mut reports = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, ?step, "replaying step");
            apply_step(&mut controller, step)?;

            let overlay = controller
                .overlay()
                .filter(|overlay| overlay.is_visible())
                .map(|overlay| overlay.bounds());
            reports.push(StepReport {
                index,
                step: step.clone(),
                bounds: controller.host().bounds(),
                state: controller.state(),
                overlay,
                always_on_top: controller.host().is_always_on_top(),
                changes: controller.take_changes(),
            });
        }
        Ok(reports)
    }
}

type HeadlessController = WindowController<HeadlessWindow, HeadlessScreens>;

fn apply_step(controller: &mut HeadlessController, step: &Step) -> Result<(), ScenarioError> {
    let pointer = |controller: &mut HeadlessController,
                   target: StepTarget,
                   phase: PointerPhase,
                   x: f64,
                   y: f64| {
        let mut event = PointerEvent::primary(Point::new(x, y), &controller.host().bounds());
        match phase {
            PointerPhase::Released => event = event.released(),
            PointerPhase::Clicked => event = event.with_clicks(2),
            PointerPhase::Pressed | PointerPhase::Dragged => {}
        }
        let target = match target {
            StepTarget::Title => PointerTarget::Surface(TITLE),
            StepTarget::Handle(direction) => PointerTarget::ResizeHandle(direction),
        };
        controller.handle_pointer(target, phase, &event);
    };

    match *step {
        Step::Press { target, x, y } => pointer(controller, target, PointerPhase::Pressed, x, y),
        Step::Drag { target, x, y } => pointer(controller, target, PointerPhase::Dragged, x, y),
        Step::Release { target, x, y } => pointer(controller, target, PointerPhase::Released, x, y),
        Step::DoubleClick { target, x, y } => {
            pointer(controller, target, PointerPhase::Clicked, x, y)
        }
        Step::Shown => controller.on_shown(),
        Step::Maximize(maximized) => controller.set_maximized(maximized),
        Step::Minimize(minimized) => controller.set_minimized(minimized),
        Step::NativeIconify(iconified) => controller.on_native_iconify_changed(iconified),
        Step::AeroSnap(enabled) => controller.set_aero_snap(enabled)?,
        Step::Resizable(resizable) => controller.set_resizable(resizable),
        Step::DisableDirection(direction) => controller.disable_direction(direction),
        Step::EnableDirection(direction) => controller.enable_direction(direction),
        Step::Style(style) => controller.set_overlay_style(style)?,
    }
    Ok(())
}
