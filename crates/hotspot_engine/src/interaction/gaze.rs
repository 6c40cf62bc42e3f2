//! VR gaze dwell selection
//!
//! In VR there is no click: looking at a hotspot for long enough selects
//! it. The hover state machine starts the gaze when a new target becomes
//! hovered and stops it when the hover ends.

use std::cell::RefCell;

use crate::config::DwellConfig;
use crate::events::ListenerId;

/// Gaze dwell timer driven by hover transitions
pub trait GazeController {
    /// Start (or restart) dwelling on behalf of `owner`
    fn start(&self, owner: ListenerId);

    /// Cancel the current dwell
    fn stop(&self);
}

#[derive(Debug, Default)]
struct DwellState {
    owner: Option<ListenerId>,
    elapsed_ms: f64,
}

/// Time-based [`GazeController`]
///
/// The host advances it once per frame with [`DwellGaze::update`]; when
/// the delay elapses the owner is returned so the host can click the
/// owning scene's hovered target.
#[derive(Debug, Default)]
pub struct DwellGaze {
    config: DwellConfig,
    state: RefCell<DwellState>,
}

impl DwellGaze {
    /// Create a dwell timer with the given delay
    pub fn new(config: DwellConfig) -> Self {
        Self {
            config,
            state: RefCell::new(DwellState::default()),
        }
    }

    /// Dwell settings
    pub fn config(&self) -> &DwellConfig {
        &self.config
    }

    /// Whether a dwell is in progress
    pub fn is_active(&self) -> bool {
        self.state.borrow().owner.is_some()
    }

    /// Owner of the current dwell
    pub fn owner(&self) -> Option<ListenerId> {
        self.state.borrow().owner
    }

    /// Dwell completion in `[0, 1]`, zero when idle
    pub fn progress(&self) -> f32 {
        let state = self.state.borrow();
        if state.owner.is_none() {
            return 0.0;
        }
        if self.config.delay_ms <= 0.0 {
            return 1.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let progress = (state.elapsed_ms / self.config.delay_ms).clamp(0.0, 1.0) as f32;
        progress
    }

    /// Advance the timer by `dt_ms` milliseconds
    ///
    /// Returns the owner once its dwell completes; the dwell then ends and
    /// does not fire again until restarted.
    pub fn update(&self, dt_ms: f64) -> Option<ListenerId> {
        let mut state = self.state.borrow_mut();
        let owner = state.owner?;

        state.elapsed_ms += dt_ms.max(0.0);
        if state.elapsed_ms < self.config.delay_ms {
            return None;
        }

        log::debug!("Gaze dwell completed for {owner}");
        *state = DwellState::default();
        Some(owner)
    }
}

impl GazeController for DwellGaze {
    fn start(&self, owner: ListenerId) {
        log::trace!("Gaze dwell started for {owner}");
        let mut state = self.state.borrow_mut();
        state.owner = Some(owner);
        state.elapsed_ms = 0.0;
    }

    fn stop(&self) {
        log::trace!("Gaze dwell stopped");
        *self.state.borrow_mut() = DwellState::default();
    }
}
