#![forbid(unsafe_code)]

//! The host interface a drag recognizer drives.
//!
//! The host owns event delivery, root-listener registration, global ownership
//! arbitration, and the clock. All calls happen synchronously on the host's
//! event turn.

use std::time::Duration;

use crate::drag_event::{DragEvent, DragListener, EventPriority};
use crate::input::{EventRegistration, EventTypes};

/// Handle for a live set of root (continuation) listeners.
///
/// Returned by [`ResponderContext::subscribe_root_events`] and consumed by
/// [`ResponderContext::unsubscribe_root_events`]. The handle is not `Clone`,
/// so a subscription can be released at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription handle leaks the root listeners it names"]
pub struct RootSubscription {
    id: u64,
    event_types: EventTypes,
}

impl RootSubscription {
    /// Mint a handle. Called by host implementations.
    pub const fn new(id: u64, event_types: EventTypes) -> Self {
        Self { id, event_types }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn event_types(&self) -> EventTypes {
        self.event_types
    }
}

/// Host services consumed by a drag recognizer.
pub trait ResponderContext {
    /// Deliver `event` to `listener`.
    ///
    /// Discrete events must reach the listener before the next event of the
    /// same recognizer is produced. Continuous events may be held and
    /// coalesced, but must be delivered before any later discrete event.
    fn dispatch_event(&mut self, event: DragEvent, listener: DragListener, priority: EventPriority);

    /// Start listening for continuation events at the root.
    fn subscribe_root_events(&mut self, registrations: &[EventRegistration]) -> RootSubscription;

    /// Stop listening for the continuation events named by `subscription`.
    fn unsubscribe_root_events(&mut self, subscription: RootSubscription);

    /// Release any global ownership held by this responder. Idempotent.
    fn release_ownership(&mut self);

    /// Ask for exclusive global ownership of the input stream.
    fn request_global_ownership(&mut self) -> bool;

    /// Current host clock reading.
    fn time_stamp(&self) -> Duration;
}
