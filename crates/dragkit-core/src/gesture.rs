#![forbid(unsafe_code)]

//! Drag recognition: turns normalized input into drag events.
//!
//! [`DragRecognizer`] is a stateful processor. Feed it every event the host
//! delivers (target events while idle, root events while a press is active)
//! through [`handle_event`](DragRecognizer::handle_event) or
//! [`handle_raw`](DragRecognizer::handle_raw).
//!
//! # State Machine
//!
//! ```text
//!            down                 move (x≠x0 ∧ y≠y0) + ownership ok
//!   Idle ───────────▶ Pressed ─────────────────────────────────▶ Dragging
//!    ▲                 │  │ move (x=x0 ∨ y=y0): track only           │ │
//!    │   up / cancel   │  │ ownership denied                         │ │ move: dragmove
//!    ├─────────────────┘  └──────────────▶ Idle                      │ │
//!    │                      up / cancel: dragend, dragchange(false)  │ │
//!    └───────────────────────────────────────────────────────────────┘ ┘
//! ```
//!
//! The threshold is two-axis: both coordinates must differ from the press
//! origin. Movement along a single axis never starts a drag.
//!
//! # Invariants
//!
//! 1. `is_dragging` implies `is_pointer_down`.
//! 2. `drag_target` is set iff `is_pointer_down`.
//! 3. The press origin is written once per press and read-only afterwards.
//! 4. A root subscription is held iff `is_pointer_down`.
//! 5. `dragend` always precedes `dragchange(false)`.
//! 6. Every up/cancel clears the press and releases the root subscription,
//!    whatever else happened during the gesture.
//!
//! # Failure Modes
//!
//! - Ownership denial at threshold crossing returns the recognizer to Idle
//!   without any `dragchange`. Listeners see the same thing as a press that
//!   never moved.
//! - Passive moves, moves without a press, and a second press before the
//!   first is released are ignored and reported in [`DragLogEntry::outcome`].

use crate::context::{ResponderContext, RootSubscription};
use crate::drag_event::DragEvent;
use crate::emitter::DragEmitter;
use crate::input::{
    EventTypes, InputEvent, InputKind, InputVocabulary, NativeEventType, RawInputEvent, TargetId,
    normalize,
};
use crate::ownership::{ClaimOutcome, OwnershipClient};
use crate::props::DragProps;

// ---------------------------------------------------------------------------
// Gesture state
// ---------------------------------------------------------------------------

/// Coarse phase of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// Per-responder gesture state. Reset in place on every terminal transition.
#[derive(Debug, Default, PartialEq)]
pub struct GestureState {
    drag_target: Option<TargetId>,
    is_pointer_down: bool,
    is_dragging: bool,
    start_x: f64,
    start_y: f64,
    x: f64,
    y: f64,
    subscription: Option<RootSubscription>,
}

impl GestureState {
    #[must_use]
    pub const fn drag_target(&self) -> Option<TargetId> {
        self.drag_target
    }

    #[must_use]
    pub const fn is_pointer_down(&self) -> bool {
        self.is_pointer_down
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Press origin `(start_x, start_y)`.
    #[must_use]
    pub const fn start(&self) -> (f64, f64) {
        (self.start_x, self.start_y)
    }

    /// Most recent position `(x, y)`.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn has_root_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        match (self.is_pointer_down, self.is_dragging) {
            (true, true) => DragPhase::Dragging,
            (true, false) => DragPhase::Pressed,
            (false, _) => DragPhase::Idle,
        }
    }

    fn press(&mut self, target: TargetId, x: f64, y: f64) {
        self.start_x = x;
        self.start_y = y;
        self.x = x;
        self.y = y;
        self.drag_target = Some(target);
        self.is_pointer_down = true;
    }

    fn track(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn at_origin(&self) -> bool {
        self.x == self.start_x && self.y == self.start_y
    }

    fn crossed_threshold(&self) -> bool {
        self.x != self.start_x && self.y != self.start_y
    }

    fn end_press<C>(&mut self, ctx: &mut C)
    where
        C: ResponderContext + ?Sized,
    {
        self.drag_target = None;
        self.is_pointer_down = false;
        if let Some(subscription) = self.subscription.take() {
            ctx.unsubscribe_root_events(subscription);
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch results
// ---------------------------------------------------------------------------

/// State change applied for one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTransition {
    /// Idle → Pressed.
    Pressed { target: TargetId, x: f64, y: f64 },
    /// Position updated without emitting anything.
    Tracked { x: f64, y: f64 },
    /// Pressed → Dragging.
    DragStarted {
        x: f64,
        y: f64,
        ownership: ClaimOutcome,
    },
    /// Threshold crossed, ownership denied: Pressed → Idle.
    OwnershipDenied { x: f64, y: f64 },
    /// Move while dragging.
    DragMoved { diff_x: f64, diff_y: f64 },
    /// Dragging → Idle.
    DragEnded { cancelled: bool },
    /// Pressed → Idle without ever dragging.
    Released { cancelled: bool },
}

/// Why an input event produced no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragIgnoredReason {
    /// Move delivered to a passive listener.
    PassiveMove,
    /// Press while a drag is in progress.
    AlreadyDragging,
    /// Press while an earlier press is still active.
    AlreadyPressed,
    /// Move, up, or cancel without an active press.
    NotPressed,
    /// Event outside the recognizer's vocabulary, or a down or move without coordinates.
    UnsupportedInput,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragLogOutcome {
    Transitioned,
    Ignored(DragIgnoredReason),
}

/// Structured record of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLogEntry {
    pub source: NativeEventType,
    pub target: TargetId,
    /// Normalized coordinates, when normalization succeeded.
    pub position: Option<(f64, f64)>,
    pub phase_before: DragPhase,
    pub phase_after: DragPhase,
    pub outcome: DragLogOutcome,
}

/// Result of handing one input event to the recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragDispatch {
    pub transition: Option<DragTransition>,
    /// Events dispatched to the host while handling the input, in order.
    pub emitted: Vec<DragEvent>,
    /// The host should call `preventDefault()` on the native event.
    pub prevent_default: bool,
    pub log: DragLogEntry,
}

impl DragDispatch {
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, DragLogOutcome::Ignored(_))
    }

    /// Names of emitted events, in order.
    #[must_use]
    pub fn emitted_names(&self) -> Vec<&'static str> {
        self.emitted.iter().map(DragEvent::name).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    transition: DragTransition,
    prevent_default: bool,
}

impl Step {
    const fn new(transition: DragTransition) -> Self {
        Self {
            transition,
            prevent_default: false,
        }
    }

    const fn preventing(transition: DragTransition) -> Self {
        Self {
            transition,
            prevent_default: true,
        }
    }
}

// ---------------------------------------------------------------------------
// DragRecognizer
// ---------------------------------------------------------------------------

/// Single-pointer drag recognizer.
pub struct DragRecognizer {
    props: DragProps,
    vocabulary: InputVocabulary,
    state: GestureState,
    ownership: OwnershipClient,
    emitter: DragEmitter,
}

impl std::fmt::Debug for DragRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRecognizer")
            .field("vocabulary", &self.vocabulary)
            .field("phase", &self.state.phase())
            .field("holds_ownership", &self.ownership.holds_ownership())
            .finish()
    }
}

impl DragRecognizer {
    /// Create an idle recognizer listening with `vocabulary`.
    #[must_use]
    pub fn new(props: DragProps, vocabulary: InputVocabulary) -> Self {
        Self {
            props,
            vocabulary,
            state: GestureState::default(),
            ownership: OwnershipClient::new(),
            emitter: DragEmitter::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn props(&self) -> &DragProps {
        &self.props
    }

    /// Replace the props. Takes effect from the next input event.
    pub fn set_props(&mut self, props: DragProps) {
        self.props = props;
    }

    #[inline]
    #[must_use]
    pub const fn vocabulary(&self) -> InputVocabulary {
        self.vocabulary
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    #[inline]
    #[must_use]
    pub const fn holds_ownership(&self) -> bool {
        self.ownership.holds_ownership()
    }

    /// Types the host should deliver from the responder target while idle.
    #[must_use]
    pub const fn target_event_types(&self) -> EventTypes {
        self.vocabulary.target_event_types()
    }

    /// Normalize a raw event and process it.
    ///
    /// An up or cancel without usable coordinates (a touch release with no
    /// changed touches) still ends the press, at the last tracked position.
    /// Only a down or move without coordinates is rejected.
    pub fn handle_raw<C>(&mut self, raw: &RawInputEvent, ctx: &mut C) -> DragDispatch
    where
        C: ResponderContext + ?Sized,
    {
        if let Some(event) = normalize(raw) {
            return self.handle_event(&event, ctx);
        }
        if raw.event_type.kind().is_terminal() {
            let (x, y) = self.state.position();
            let event = InputEvent::new(raw.event_type, raw.target, x, y).with_passive(raw.passive);
            return self.handle_event(&event, ctx);
        }
        self.ignored(raw.event_type, raw.target, None, DragIgnoredReason::UnsupportedInput)
    }

    /// Process one normalized event.
    pub fn handle_event<C>(&mut self, event: &InputEvent, ctx: &mut C) -> DragDispatch
    where
        C: ResponderContext + ?Sized,
    {
        if !self.vocabulary.accepts(event.source) {
            return self.ignored(
                event.source,
                event.target,
                Some((event.x, event.y)),
                DragIgnoredReason::UnsupportedInput,
            );
        }

        let phase_before = self.state.phase();
        let mut emitted = Vec::with_capacity(2);
        let step = match event.kind {
            InputKind::Down => self.on_down(event, ctx, &mut emitted),
            InputKind::Move => self.on_move(event, ctx, &mut emitted),
            InputKind::Up | InputKind::Cancel => self.on_release(event.kind, ctx, &mut emitted),
        };

        let log = DragLogEntry {
            source: event.source,
            target: event.target,
            position: Some((event.x, event.y)),
            phase_before,
            phase_after: self.state.phase(),
            outcome: match step {
                Ok(_) => DragLogOutcome::Transitioned,
                Err(reason) => DragLogOutcome::Ignored(reason),
            },
        };

        #[cfg(feature = "tracing")]
        match &step {
            Ok(step) => tracing::debug!(
                source = event.source.as_str(),
                transition = ?step.transition,
                phase_before = ?phase_before,
                phase_after = ?log.phase_after,
                emitted = emitted.len(),
                "drag transition"
            ),
            Err(reason) => tracing::trace!(
                source = event.source.as_str(),
                reason = ?reason,
                phase = ?phase_before,
                "drag input ignored"
            ),
        }

        match step {
            Ok(step) => DragDispatch {
                transition: Some(step.transition),
                emitted,
                prevent_default: step.prevent_default,
                log,
            },
            Err(_) => DragDispatch {
                transition: None,
                emitted,
                prevent_default: false,
                log,
            },
        }
    }

    /// Tear down without emitting drag events.
    ///
    /// Releases the root subscription and any held ownership, and returns the
    /// state to Idle. Used when the responder is unmounted mid-gesture.
    pub fn reset<C>(&mut self, ctx: &mut C)
    where
        C: ResponderContext + ?Sized,
    {
        self.ownership.release_held(ctx);
        self.state.is_dragging = false;
        self.state.end_press(ctx);
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl DragRecognizer {
    fn on_down<C>(
        &mut self,
        event: &InputEvent,
        ctx: &mut C,
        out: &mut Vec<DragEvent>,
    ) -> Result<Step, DragIgnoredReason>
    where
        C: ResponderContext + ?Sized,
    {
        if self.state.is_dragging {
            return Err(DragIgnoredReason::AlreadyDragging);
        }
        if self.state.is_pointer_down {
            return Err(DragIgnoredReason::AlreadyPressed);
        }

        self.ownership.reset_on_press(&self.props, ctx);
        self.state.press(event.target, event.x, event.y);
        out.extend(self.emitter.emit_start(ctx, &self.props, event.target));
        let subscription = ctx.subscribe_root_events(self.vocabulary.root_registrations());
        self.state.subscription = Some(subscription);

        Ok(Step::new(DragTransition::Pressed {
            target: event.target,
            x: event.x,
            y: event.y,
        }))
    }

    fn on_move<C>(
        &mut self,
        event: &InputEvent,
        ctx: &mut C,
        out: &mut Vec<DragEvent>,
    ) -> Result<Step, DragIgnoredReason>
    where
        C: ResponderContext + ?Sized,
    {
        if event.passive {
            return Err(DragIgnoredReason::PassiveMove);
        }
        if !self.state.is_pointer_down {
            return Err(DragIgnoredReason::NotPressed);
        }

        let (x, y) = (event.x, event.y);
        self.state.track(x, y);

        if !self.state.is_dragging {
            if !self.state.crossed_threshold() {
                return Ok(Step::new(DragTransition::Tracked { x, y }));
            }

            let ownership = self.ownership.claim_at_threshold(&self.props, ctx);
            if !ownership.allows_drag() {
                self.state.end_press(ctx);
                return Ok(Step::new(DragTransition::OwnershipDenied { x, y }));
            }

            self.state.is_dragging = true;
            out.extend(self.emitter.emit_change(ctx, &self.props, true));
            return Ok(Step::new(DragTransition::DragStarted { x, y, ownership }));
        }

        if self.state.at_origin() {
            return Ok(Step::new(DragTransition::Tracked { x, y }));
        }

        let diff_x = x - self.state.start_x;
        let diff_y = y - self.state.start_y;
        if let Some(target) = self.state.drag_target {
            out.extend(
                self.emitter
                    .emit_move(ctx, &self.props, target, diff_x, diff_y),
            );
        }
        Ok(Step::preventing(DragTransition::DragMoved { diff_x, diff_y }))
    }

    fn on_release<C>(
        &mut self,
        kind: InputKind,
        ctx: &mut C,
        out: &mut Vec<DragEvent>,
    ) -> Result<Step, DragIgnoredReason>
    where
        C: ResponderContext + ?Sized,
    {
        if !self.state.is_pointer_down {
            return Err(DragIgnoredReason::NotPressed);
        }

        let cancelled = kind == InputKind::Cancel;
        let was_dragging = self.state.is_dragging;
        if was_dragging {
            self.ownership.release_on_end(&self.props, ctx);
            if let Some(target) = self.state.drag_target {
                out.extend(self.emitter.emit_end(ctx, &self.props, target));
            }
            out.extend(self.emitter.emit_change(ctx, &self.props, false));
            self.state.is_dragging = false;
        }

        self.state.end_press(ctx);

        Ok(Step::new(if was_dragging {
            DragTransition::DragEnded { cancelled }
        } else {
            DragTransition::Released { cancelled }
        }))
    }

    fn ignored(
        &self,
        source: NativeEventType,
        target: TargetId,
        position: Option<(f64, f64)>,
        reason: DragIgnoredReason,
    ) -> DragDispatch {
        #[cfg(feature = "tracing")]
        tracing::trace!(source = source.as_str(), reason = ?reason, "drag input ignored");

        let phase = self.state.phase();
        DragDispatch {
            transition: None,
            emitted: Vec::new(),
            prevent_default: false,
            log: DragLogEntry {
                source,
                target,
                position,
                phase_before: phase,
                phase_after: phase,
                outcome: DragLogOutcome::Ignored(reason),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
