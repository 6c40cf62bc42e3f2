//! Listener registries for host-driven events
//!
//! The host (windowing layer, story/scene orchestration) owns the event
//! sources and dispatches each event to the listeners registered on the
//! matching [`Signal`]. Listeners are identified by a [`ListenerId`]; a
//! signal does not deduplicate, so callers that must register at most once
//! check [`Signal::has`] before [`Signal::add`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of an event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh, process-unique listener id
    pub fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of listeners interested in one kind of event
#[derive(Debug, Default, Clone)]
pub struct Signal {
    listeners: Vec<ListenerId>,
}

impl Signal {
    /// Create a signal with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener (duplicates are kept)
    pub fn add(&mut self, listener: ListenerId) {
        self.listeners.push(listener);
    }

    /// Unregister every registration of a listener
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| *l != listener);
        before != self.listeners.len()
    }

    /// Whether the listener is registered
    pub fn has(&self, listener: ListenerId) -> bool {
        self.listeners.contains(&listener)
    }

    /// Registered listeners in registration order
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nobody listens
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Payload of scene lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEvent {
    /// Identifier of the panorama scene that is loading or unloading
    pub scene_uid: String,
}

impl SceneEvent {
    /// Create an event for the given scene
    pub fn new(scene_uid: impl Into<String>) -> Self {
        Self { scene_uid: scene_uid.into() }
    }
}

/// Scene lifecycle notifications
#[derive(Debug, Default)]
pub struct Story {
    /// Fired once a scene has finished loading and its renderer exists
    pub on_scene_load_complete: Signal,

    /// Fired when the current scene starts unloading
    pub on_scene_unload_start: Signal,
}
