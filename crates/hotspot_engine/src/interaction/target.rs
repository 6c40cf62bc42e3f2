//! Interactive targets and their registry
//!
//! Scene nodes only carry a string marker; the object that reacts to
//! hover and click lives in a [`TargetRegistry`] and is resolved on every
//! raycast.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Type tag of hotspot targets in the registry
pub const HOTSPOT_3D: &str = "Hotspot3D";

/// Something that reacts to being hovered and clicked
pub trait InteractiveTarget {
    /// Registry identifier
    fn uid(&self) -> &str;

    /// Whether the target currently accepts pointer interaction
    fn interactive(&self) -> bool;

    /// The pointer entered the target
    fn over(&self);

    /// The pointer left the target
    fn out(&self);

    /// The target was clicked or selected by gaze
    fn click(&self);
}

/// Failure to resolve a registry identifier
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing is registered under the identifier
    #[error("no target registered as '{0}'")]
    NotFound(String),

    /// The identifier names an object of another type
    #[error("target '{id}' is a {found}, expected {expected}")]
    WrongType {
        /// Requested identifier
        id: String,
        /// Requested type tag
        expected: String,
        /// Type tag actually registered
        found: String,
    },

    /// Several objects share the identifier
    #[error("identifier '{0}' names a collection")]
    Collection(String),
}

/// Lookup of interactive targets by identifier and type tag
pub trait TargetRegistry {
    /// Resolve exactly one target of the given type
    fn resolve(&self, id: &str, type_tag: &str) -> Result<Rc<dyn InteractiveTarget>, RegistryError>;
}

struct Entry {
    type_tag: String,
    target: Rc<dyn InteractiveTarget>,
}

/// In-memory [`TargetRegistry`]
///
/// Registering twice under the same identifier turns it into a
/// collection, which never resolves to a single target.
#[derive(Default)]
pub struct TargetMap {
    entries: RefCell<HashMap<String, Vec<Entry>>>,
}

impl TargetMap {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under its uid with the given type tag
    pub fn register(&self, type_tag: impl Into<String>, target: Rc<dyn InteractiveTarget>) {
        let id = target.uid().to_string();
        log::debug!("Registering target '{id}'");
        self.entries.borrow_mut().entry(id).or_default().push(Entry {
            type_tag: type_tag.into(),
            target,
        });
    }

    /// Register a hotspot under [`HOTSPOT_3D`]
    pub fn register_hotspot(&self, hotspot: Rc<Hotspot>) {
        self.register(HOTSPOT_3D, hotspot);
    }

    /// Remove everything registered under the identifier
    ///
    /// Returns `true` if anything was removed.
    pub fn unregister(&self, id: &str) -> bool {
        self.entries.borrow_mut().remove(id).is_some()
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TargetRegistry for TargetMap {
    fn resolve(&self, id: &str, type_tag: &str) -> Result<Rc<dyn InteractiveTarget>, RegistryError> {
        let entries = self.entries.borrow();
        match entries.get(id).map(Vec::as_slice) {
            None | Some([]) => Err(RegistryError::NotFound(id.to_string())),
            Some([entry]) if entry.type_tag == type_tag => Ok(Rc::clone(&entry.target)),
            Some([entry]) => Err(RegistryError::WrongType {
                id: id.to_string(),
                expected: type_tag.to_string(),
                found: entry.type_tag.clone(),
            }),
            Some(_) => Err(RegistryError::Collection(id.to_string())),
        }
    }
}

/// Notification recorded by a [`Hotspot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotEvent {
    /// Pointer entered
    Over,
    /// Pointer left
    Out,
    /// Clicked
    Click,
}

/// Standard hotspot target
///
/// Tracks its hover flag and queues every notification until the host
/// drains them with [`Hotspot::take_events`].
#[derive(Debug)]
pub struct Hotspot {
    uid: String,
    interactive: Cell<bool>,
    hovered: Cell<bool>,
    events: RefCell<Vec<HotspotEvent>>,
}

impl Hotspot {
    /// Create an interactive hotspot
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            interactive: Cell::new(true),
            hovered: Cell::new(false),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Enable or disable pointer interaction
    pub fn set_interactive(&self, interactive: bool) {
        self.interactive.set(interactive);
    }

    /// Whether the pointer is over this hotspot
    pub fn is_hovered(&self) -> bool {
        self.hovered.get()
    }

    /// Drain queued notifications
    pub fn take_events(&self) -> Vec<HotspotEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// How many times the given notification was queued and not yet drained
    pub fn count(&self, event: HotspotEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    fn push(&self, event: HotspotEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl InteractiveTarget for Hotspot {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn interactive(&self) -> bool {
        self.interactive.get()
    }

    fn over(&self) {
        self.hovered.set(true);
        self.push(HotspotEvent::Over);
    }

    fn out(&self) {
        self.hovered.set(false);
        self.push(HotspotEvent::Out);
    }

    fn click(&self) {
        self.push(HotspotEvent::Click);
    }
}
