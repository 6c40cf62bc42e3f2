//! Hover/click state machine
//!
//! Filters an ordered hit list down to the first interactive target and
//! fires the matching transition. At most one target is hovered at a time,
//! and a hovered target always receives exactly one `out` before the hover
//! moves elsewhere.
//!
//! ```text
//! Idle ──over(a)──→ Hovering(a) ──over(b)──→ Hovering(b)
//!                     │   ↑                      │
//!                     └───┘ click(a)             └──none──→ Idle
//! ```
//!
//! Non-interactive geometry in front of a hotspot does not block it.

use std::rc::Rc;

use crate::events::ListenerId;
use crate::interaction::{GazeController, Hit, InteractiveTarget, TargetRegistry, HOTSPOT_3D};

/// What a raycast should do to the target it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Hover probing (pointer move, VR polling)
    Over,
    /// Tap or trigger
    Click,
}

/// Outcome of one [`HoverState::apply`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    /// Nothing hovered before or after
    Idle,
    /// The hovered target was left
    Exited,
    /// A new target became hovered
    Entered,
    /// The hovered target was clicked again
    Clicked,
    /// The hovered target was probed again
    Stayed,
}

/// Gaze controller to drive while in VR
#[derive(Clone, Copy)]
pub struct VrGaze<'a> {
    /// Controller bound for the current scene
    pub controller: &'a dyn GazeController,
    /// Container on whose behalf the gaze runs
    pub owner: ListenerId,
}

/// First hit whose node resolves to an interactive target
///
/// Hits without a marker, with an unresolvable marker or with a
/// non-interactive target are skipped.
pub fn resolve_first_interactive(hits: &[Hit<'_>], registry: &dyn TargetRegistry) -> Option<Rc<dyn InteractiveTarget>> {
    hits.iter().find_map(|hit| {
        let id = hit.node.target_id()?;
        match registry.resolve(id, HOTSPOT_3D) {
            Ok(target) if target.interactive() => Some(target),
            Ok(_) => {
                log::trace!("Skipping non-interactive target '{id}'");
                None
            }
            Err(err) => {
                log::trace!("Skipping hit on '{}': {err}", hit.node.name);
                None
            }
        }
    })
}

fn same_target(a: &Rc<dyn InteractiveTarget>, b: &Rc<dyn InteractiveTarget>) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// Single hover slot
#[derive(Default)]
pub struct HoverState {
    hovered: Option<Rc<dyn InteractiveTarget>>,
}

impl HoverState {
    /// Idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered target
    pub fn hovered(&self) -> Option<&Rc<dyn InteractiveTarget>> {
        self.hovered.as_ref()
    }

    /// Whether nothing is hovered
    pub fn is_idle(&self) -> bool {
        self.hovered.is_none()
    }

    /// Apply the result of one raycast
    ///
    /// `found` is the first interactive target along the ray, if any.
    /// `gaze` is set only while in VR; the gaze starts when a new target
    /// becomes hovered and stops when the hover ends.
    pub fn apply(
        &mut self,
        found: Option<Rc<dyn InteractiveTarget>>,
        action: PointerAction,
        gaze: Option<VrGaze<'_>>,
    ) -> HoverTransition {
        let Some(target) = found else {
            let Some(previous) = self.hovered.take() else {
                return HoverTransition::Idle;
            };
            log::debug!("Hover left '{}'", previous.uid());
            previous.out();
            if let Some(gaze) = gaze {
                gaze.controller.stop();
            }
            return HoverTransition::Exited;
        };

        if let Some(current) = &self.hovered {
            if same_target(current, &target) {
                return match action {
                    PointerAction::Click => {
                        target.click();
                        HoverTransition::Clicked
                    }
                    PointerAction::Over => HoverTransition::Stayed,
                };
            }
        }

        if let Some(previous) = self.hovered.take() {
            previous.out();
        }

        log::debug!("Hover entered '{}' ({action:?})", target.uid());
        match action {
            PointerAction::Over => target.over(),
            PointerAction::Click => target.click(),
        }
        self.hovered = Some(target);

        if let Some(gaze) = gaze {
            gaze.controller.start(gaze.owner);
        }
        HoverTransition::Entered
    }

    /// Click the hovered target, if any
    pub fn click(&self) -> bool {
        match &self.hovered {
            Some(target) => {
                target.click();
                true
            }
            None => false,
        }
    }

    /// Forget the hovered target without notifying it
    pub fn reset(&mut self) {
        self.hovered = None;
    }
}
