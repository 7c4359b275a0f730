#![forbid(unsafe_code)]

//! Recording host for tests.
//!
//! [`RecordingContext`] implements [`ResponderContext`] by invoking listeners
//! immediately and logging every host call in order.

use std::time::Duration;

use crate::context::{ResponderContext, RootSubscription};
use crate::drag_event::{DragEvent, DragListener, EventPriority};
use crate::input::{EventRegistration, EventTypes};

/// One host call observed by [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContextCall {
    Dispatch {
        event: DragEvent,
        priority: EventPriority,
    },
    Subscribe {
        id: u64,
        event_types: EventTypes,
    },
    Unsubscribe {
        id: u64,
    },
    ReleaseOwnership,
    RequestOwnership {
        granted: bool,
    },
}

/// Synchronous host that records what a recognizer asked of it.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    pub calls: Vec<ContextCall>,
    /// Answer given to ownership requests.
    pub grant_ownership: bool,
    now: Duration,
    next_subscription: u64,
    live_subscriptions: Vec<u64>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    /// A host that grants every ownership request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            grant_ownership: true,
            now: Duration::ZERO,
            next_subscription: 1,
            live_subscriptions: Vec::new(),
        }
    }

    /// A host that denies every ownership request.
    #[must_use]
    pub fn denying_ownership() -> Self {
        Self {
            grant_ownership: false,
            ..Self::new()
        }
    }

    /// Advance the host clock.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Events dispatched so far, in order.
    #[must_use]
    pub fn dispatched(&self) -> Vec<DragEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ContextCall::Dispatch { event, .. } => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Names of dispatched events, in order.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.dispatched().iter().map(DragEvent::name).collect()
    }

    /// Number of subscriptions not yet released.
    #[must_use]
    pub fn live_subscriptions(&self) -> usize {
        self.live_subscriptions.len()
    }

    /// Forget recorded calls, keeping clock and subscriptions.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ResponderContext for RecordingContext {
    fn dispatch_event(&mut self, event: DragEvent, listener: DragListener, priority: EventPriority) {
        self.calls.push(ContextCall::Dispatch { event, priority });
        listener(&event);
    }

    fn subscribe_root_events(&mut self, registrations: &[EventRegistration]) -> RootSubscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        let event_types = registrations
            .iter()
            .fold(EventTypes::empty(), |acc, reg| acc | reg.event_type.flag());
        self.live_subscriptions.push(id);
        self.calls.push(ContextCall::Subscribe { id, event_types });
        RootSubscription::new(id, event_types)
    }

    fn unsubscribe_root_events(&mut self, subscription: RootSubscription) {
        let id = subscription.id();
        self.live_subscriptions.retain(|live| *live != id);
        self.calls.push(ContextCall::Unsubscribe { id });
    }

    fn release_ownership(&mut self) {
        self.calls.push(ContextCall::ReleaseOwnership);
    }

    fn request_global_ownership(&mut self) -> bool {
        let granted = self.grant_ownership;
        self.calls.push(ContextCall::RequestOwnership { granted });
        granted
    }

    fn time_stamp(&self) -> Duration {
        self.now
    }
}
