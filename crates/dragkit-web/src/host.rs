#![forbid(unsafe_code)]

//! Reference host for drag recognizers.
//!
//! [`WebDragHost`] implements [`ResponderContext`] the way a DOM-backed event
//! system does:
//!
//! - root (continuation) listeners are tracked per subscription handle,
//! - global ownership goes through a [`SharedArbiter`],
//! - time comes from a [`DeterministicClock`] the embedder advances,
//! - events are delivered through a [`DispatchQueue`].
//!
//! [`DragSession`] couples one recognizer with one host and routes raw input:
//! target types always reach the recognizer, root types only while a root
//! subscription is live.

use core::time::Duration;
use std::collections::BTreeMap;

use dragkit_core::{
    DragDispatch, DragEvent, DragListener, DragPhase, DragProps, DragRecognizer, EventPriority,
    EventRegistration, EventTypes, InputEvent, InputVocabulary, NativeEventType, RawInputEvent,
    ResponderContext, RootSubscription,
};

use crate::arbiter::{OwnershipArbiter, ResponderId, SharedArbiter};
use crate::config::HostConfig;
use crate::dispatch::{DispatchQueue, DispatchStats};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Deterministic monotonic clock controlled by the embedder.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

// ---------------------------------------------------------------------------
// WebDragHost
// ---------------------------------------------------------------------------

/// Host context for one responder.
#[derive(Debug)]
pub struct WebDragHost {
    id: ResponderId,
    arbiter: SharedArbiter,
    clock: DeterministicClock,
    queue: DispatchQueue,
    subscriptions: BTreeMap<u64, Vec<EventRegistration>>,
    next_subscription: u64,
}

impl WebDragHost {
    #[must_use]
    pub fn new(id: ResponderId, arbiter: SharedArbiter, coalesce_continuous: bool) -> Self {
        Self {
            id,
            arbiter,
            clock: DeterministicClock::new(),
            queue: DispatchQueue::new(coalesce_continuous),
            subscriptions: BTreeMap::new(),
            next_subscription: 1,
        }
    }

    /// A host with its own arbiter, configured from `config`.
    #[must_use]
    pub fn standalone(id: ResponderId, config: &HostConfig) -> Self {
        Self::new(
            id,
            OwnershipArbiter::shared(config.arbitration),
            config.coalesce_continuous,
        )
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> ResponderId {
        self.id
    }

    #[must_use]
    pub fn arbiter(&self) -> &SharedArbiter {
        &self.arbiter
    }

    #[inline]
    #[must_use]
    pub const fn clock(&self) -> &DeterministicClock {
        &self.clock
    }

    #[inline]
    pub fn clock_mut(&mut self) -> &mut DeterministicClock {
        &mut self.clock
    }

    /// Whether this host's responder currently owns the input stream.
    #[must_use]
    pub fn owns_input(&self) -> bool {
        self.arbiter.borrow().is_owner(self.id)
    }

    /// Union of the event types of all live root subscriptions.
    #[must_use]
    pub fn root_event_types(&self) -> EventTypes {
        self.subscriptions
            .values()
            .flatten()
            .fold(EventTypes::empty(), |acc, reg| acc | reg.event_type.flag())
    }

    /// Listener registrations of all live root subscriptions.
    #[must_use]
    pub fn root_registrations(&self) -> Vec<EventRegistration> {
        self.subscriptions.values().flatten().copied().collect()
    }

    #[must_use]
    pub fn live_subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }

    #[must_use]
    pub const fn dispatch_stats(&self) -> DispatchStats {
        self.queue.stats()
    }

    /// Deliver held continuous events. Call once per frame.
    pub fn flush(&mut self) -> usize {
        self.queue.flush()
    }

    /// Drop held continuous events.
    pub fn discard_pending(&mut self) -> usize {
        self.queue.clear()
    }
}

impl ResponderContext for WebDragHost {
    fn dispatch_event(&mut self, event: DragEvent, listener: DragListener, priority: EventPriority) {
        self.queue.push(event, listener, priority);
    }

    fn subscribe_root_events(&mut self, registrations: &[EventRegistration]) -> RootSubscription {
        let id = self.next_subscription;
        self.next_subscription = self.next_subscription.saturating_add(1);
        let event_types = registrations
            .iter()
            .fold(EventTypes::empty(), |acc, reg| acc | reg.event_type.flag());
        self.subscriptions.insert(id, registrations.to_vec());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            responder = self.id.0,
            subscription = id,
            event_types = ?event_types,
            "root listeners added"
        );

        RootSubscription::new(id, event_types)
    }

    fn unsubscribe_root_events(&mut self, subscription: RootSubscription) {
        let _removed = self.subscriptions.remove(&subscription.id());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            responder = self.id.0,
            subscription = subscription.id(),
            found = _removed.is_some(),
            "root listeners removed"
        );
    }

    fn release_ownership(&mut self) {
        self.arbiter.borrow_mut().release(self.id);
    }

    fn request_global_ownership(&mut self) -> bool {
        self.arbiter.borrow_mut().request(self.id).is_granted()
    }

    fn time_stamp(&self) -> Duration {
        self.clock.now()
    }
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

/// One recognizer bound to one host.
#[derive(Debug)]
pub struct DragSession {
    recognizer: DragRecognizer,
    host: WebDragHost,
}

impl DragSession {
    #[must_use]
    pub fn new(props: DragProps, vocabulary: InputVocabulary, host: WebDragHost) -> Self {
        Self {
            recognizer: DragRecognizer::new(props, vocabulary),
            host,
        }
    }

    /// A session on a host sharing `arbiter`, configured from `config`.
    #[must_use]
    pub fn with_config(
        props: DragProps,
        config: &HostConfig,
        id: ResponderId,
        arbiter: SharedArbiter,
    ) -> Self {
        let host = WebDragHost::new(id, arbiter, config.coalesce_continuous);
        Self::new(props, config.resolve_vocabulary(), host)
    }

    #[inline]
    #[must_use]
    pub const fn recognizer(&self) -> &DragRecognizer {
        &self.recognizer
    }

    #[inline]
    #[must_use]
    pub const fn host(&self) -> &WebDragHost {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut WebDragHost {
        &mut self.host
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.recognizer.phase()
    }

    pub fn set_props(&mut self, props: DragProps) {
        self.recognizer.set_props(props);
    }

    /// Whether an event of `event_type` would currently reach the recognizer.
    #[must_use]
    pub fn listens_for(&self, event_type: NativeEventType) -> bool {
        self.recognizer.target_event_types().has(event_type)
            || self.host.root_event_types().has(event_type)
    }

    /// Route a raw native event. Returns `None` when no listener is registered
    /// for its type.
    pub fn deliver(&mut self, raw: &RawInputEvent) -> Option<DragDispatch> {
        if !self.listens_for(raw.event_type) {
            return None;
        }
        Some(self.recognizer.handle_raw(raw, &mut self.host))
    }

    /// Route an already-normalized event.
    pub fn deliver_event(&mut self, event: &InputEvent) -> Option<DragDispatch> {
        if !self.listens_for(event.source) {
            return None;
        }
        Some(self.recognizer.handle_event(event, &mut self.host))
    }

    /// Advance the host clock.
    pub fn advance(&mut self, dt: Duration) {
        self.host.clock_mut().advance(dt);
    }

    /// Deliver held continuous events.
    pub fn flush(&mut self) -> usize {
        self.host.flush()
    }

    /// Unmount: drop held events and release everything the recognizer holds
    /// without emitting drag events.
    pub fn teardown(&mut self) {
        self.host.discard_pending();
        self.recognizer.reset(&mut self.host);
    }
}
