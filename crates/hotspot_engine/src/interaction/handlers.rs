//! Pointer handler attachment
//!
//! Pointer listeners of a scene layer are registered iff the layer is both
//! interactive and rendered. Interactivity requested while rendering is
//! off is remembered and applied when rendering resumes.

use crate::events::ListenerId;
use crate::input::Pointer;

/// Attachment state of the pointer listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerState {
    /// Not interactive
    #[default]
    Detached,
    /// Interactive and rendered: listeners registered
    Attached,
    /// Interactive but not rendered: listeners wait for rendering to resume
    PendingReattach,
}

/// Pointer listener registration of one scene layer
#[derive(Debug, Clone, Copy)]
pub struct HandlerBinding {
    listener: ListenerId,
    state: HandlerState,
}

impl HandlerBinding {
    /// Detached binding for the given listener
    pub fn new(listener: ListenerId) -> Self {
        Self {
            listener,
            state: HandlerState::Detached,
        }
    }

    /// Current state
    pub fn state(&self) -> HandlerState {
        self.state
    }

    /// Whether the listeners are registered
    pub fn is_attached(&self) -> bool {
        self.state == HandlerState::Attached
    }

    /// Whether interactivity waits for rendering to resume
    pub fn is_pending(&self) -> bool {
        self.state == HandlerState::PendingReattach
    }

    /// Request or drop interactivity
    ///
    /// Returns whether the listeners are registered afterwards.
    pub fn set_interactive(&mut self, interactive: bool, render_enabled: bool, pointer: &mut Pointer) -> bool {
        self.state = match (interactive, render_enabled) {
            (true, true) => {
                self.attach(pointer);
                HandlerState::Attached
            }
            (true, false) => {
                self.detach(pointer);
                HandlerState::PendingReattach
            }
            (false, _) => {
                self.detach(pointer);
                HandlerState::Detached
            }
        };
        self.is_attached()
    }

    /// Follow a change of the render flag
    ///
    /// Disabling parks attached listeners as pending; enabling restores
    /// pending ones. Returns whether the listeners are registered
    /// afterwards.
    pub fn set_render_enabled(&mut self, enabled: bool, pointer: &mut Pointer) -> bool {
        self.state = match (self.state, enabled) {
            (HandlerState::Attached, false) => {
                self.detach(pointer);
                HandlerState::PendingReattach
            }
            (HandlerState::PendingReattach, true) => {
                self.attach(pointer);
                HandlerState::Attached
            }
            (state, _) => state,
        };
        self.is_attached()
    }

    /// Unregister the listeners for good
    pub fn release(&mut self, pointer: &mut Pointer) {
        self.detach(pointer);
        self.state = HandlerState::Detached;
    }

    fn attach(&self, pointer: &mut Pointer) {
        let listener = self.listener;
        if !pointer.on_move.has(listener) {
            pointer.on_move.add(listener);
        }
        if !pointer.on_tap.has(listener) {
            pointer.on_tap.add(listener);
        }
        log::debug!("Pointer listeners attached for {listener}");
    }

    fn detach(&self, pointer: &mut Pointer) {
        let removed_move = pointer.on_move.remove(self.listener);
        let removed_tap = pointer.on_tap.remove(self.listener);
        if removed_move || removed_tap {
            log::debug!("Pointer listeners detached for {}", self.listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(pointer: &Pointer, listener: ListenerId) -> (usize, usize) {
        let count = |signal: &crate::events::Signal| signal.listeners().iter().filter(|l| **l == listener).count();
        (count(&pointer.on_move), count(&pointer.on_tap))
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut pointer = Pointer::default();
        let listener = ListenerId::next();
        let mut binding = HandlerBinding::new(listener);

        assert!(binding.set_interactive(true, true, &mut pointer));
        assert!(binding.set_interactive(true, true, &mut pointer));
        assert_eq!(registered(&pointer, listener), (1, 1));

        assert!(!binding.set_interactive(false, true, &mut pointer));
        assert_eq!(registered(&pointer, listener), (0, 0));
        assert_eq!(binding.state(), HandlerState::Detached);
    }

    #[test]
    fn test_disable_parks_and_enable_restores() {
        let mut pointer = Pointer::default();
        let listener = ListenerId::next();
        let mut binding = HandlerBinding::new(listener);
        binding.set_interactive(true, true, &mut pointer);

        assert!(!binding.set_render_enabled(false, &mut pointer));
        assert!(binding.is_pending());
        assert_eq!(registered(&pointer, listener), (0, 0));

        // A second disable keeps the request
        binding.set_render_enabled(false, &mut pointer);
        assert!(binding.is_pending());

        assert!(binding.set_render_enabled(true, &mut pointer));
        assert_eq!(registered(&pointer, listener), (1, 1));
    }

    #[test]
    fn test_interactive_while_disabled_waits() {
        let mut pointer = Pointer::default();
        let listener = ListenerId::next();
        let mut binding = HandlerBinding::new(listener);

        assert!(!binding.set_interactive(true, false, &mut pointer));
        assert!(binding.is_pending());
        assert!(pointer.on_move.is_empty());

        assert!(binding.set_render_enabled(true, &mut pointer));
        assert!(binding.is_attached());
    }

    #[test]
    fn test_enable_without_request_stays_detached() {
        let mut pointer = Pointer::default();
        let mut binding = HandlerBinding::new(ListenerId::next());

        assert!(!binding.set_render_enabled(false, &mut pointer));
        assert!(!binding.set_render_enabled(true, &mut pointer));
        assert_eq!(binding.state(), HandlerState::Detached);
    }

    #[test]
    fn test_dropping_interactivity_clears_pending() {
        let mut pointer = Pointer::default();
        let mut binding = HandlerBinding::new(ListenerId::next());
        binding.set_interactive(true, false, &mut pointer);
        binding.set_interactive(false, false, &mut pointer);

        assert!(!binding.set_render_enabled(true, &mut pointer));
    }

    #[test]
    fn test_release_unregisters() {
        let mut pointer = Pointer::default();
        let listener = ListenerId::next();
        let mut binding = HandlerBinding::new(listener);
        binding.set_interactive(true, true, &mut pointer);

        binding.release(&mut pointer);
        assert_eq!(registered(&pointer, listener), (0, 0));
        assert_eq!(binding.state(), HandlerState::Detached);
    }
}
