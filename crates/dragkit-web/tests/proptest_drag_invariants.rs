#![forbid(unsafe_code)]

//! Property-based checks of the drag gesture protocol.
//!
//! 1. **Two-axis threshold**: moves that keep either coordinate equal to the
//!    press origin never produce `dragchange(true)`.
//! 2. **Delta formula**: every `dragmove` reports `(x - x0, y - y0)` for the
//!    move that produced it.
//! 3. **End before change**: `dragend` is always immediately followed by
//!    `dragchange(false)`.
//! 4. **Terminal cleanup**: after any up or cancel the gesture is Idle with no
//!    live root subscription.
//! 5. **State invariants**: `is_dragging ⇒ is_pointer_down` and
//!    `drag_target.is_some() ⇔ is_pointer_down` after every event.
//! 6. **Release idempotence**: releasing ownership twice leaves the arbiter
//!    free and counts one release.
//! 7. **Raw terminal cleanup**: raw up or cancel events without usable
//!    coordinates (empty touch lists, non-finite pointer positions) still end
//!    the gesture.

use std::cell::RefCell;
use std::rc::Rc;

use dragkit_core::testing::RecordingContext;
use dragkit_core::{
    DragPhase, DragProps, DragRecognizer, DragTransition, InputEvent, InputVocabulary,
    NativeEventType, RawInputEvent, TargetId, TouchPoint,
};
use dragkit_web::{ArbitrationMode, OwnershipArbiter, ResponderId};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Logged {
    Start,
    Change(bool),
    Move(f64, f64),
    End,
}

type Log = Rc<RefCell<Vec<Logged>>>;

fn logging_props(log: &Log) -> DragProps {
    let start = Rc::clone(log);
    let change = Rc::clone(log);
    let moved = Rc::clone(log);
    let end = Rc::clone(log);
    DragProps::new()
        .with_on_drag_start(move |_| start.borrow_mut().push(Logged::Start))
        .with_on_drag_change(move |on| change.borrow_mut().push(Logged::Change(on)))
        .with_on_drag_move(move |e| {
            let (dx, dy) = e.delta().unwrap_or_default();
            moved.borrow_mut().push(Logged::Move(dx, dy));
        })
        .with_on_drag_end(move |_| end.borrow_mut().push(Logged::End))
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Down(i16, i16),
    Move(i16, i16, bool),
    Up,
    Cancel,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Step::Down(x, y)),
        6 => (any::<i16>(), any::<i16>(), prop::bool::weighted(0.15))
            .prop_map(|(x, y, passive)| Step::Move(x, y, passive)),
        1 => Just(Step::Up),
        1 => Just(Step::Cancel),
    ]
}

fn to_event(step: Step) -> InputEvent {
    let target = TargetId(9);
    match step {
        Step::Down(x, y) => {
            InputEvent::new(NativeEventType::PointerDown, target, f64::from(x), f64::from(y))
        }
        Step::Move(x, y, passive) => {
            InputEvent::new(NativeEventType::PointerMove, target, f64::from(x), f64::from(y))
                .with_passive(passive)
        }
        Step::Up => InputEvent::new(NativeEventType::PointerUp, target, 0.0, 0.0),
        Step::Cancel => InputEvent::new(NativeEventType::PointerCancel, target, 0.0, 0.0),
    }
}

#[derive(Debug, Clone, Copy)]
enum RawStep {
    Down(i16, i16),
    Move(i16, i16),
    /// Terminal event; `bare` drops the coordinates.
    End { cancel: bool, bare: bool },
}

fn raw_step_strategy() -> impl Strategy<Value = RawStep> {
    prop_oneof![
        1 => (any::<i16>(), any::<i16>()).prop_map(|(x, y)| RawStep::Down(x, y)),
        5 => (any::<i16>(), any::<i16>()).prop_map(|(x, y)| RawStep::Move(x, y)),
        2 => (any::<bool>(), prop::bool::weighted(0.7))
            .prop_map(|(cancel, bare)| RawStep::End { cancel, bare }),
    ]
}

fn to_touch(step: RawStep) -> RawInputEvent {
    let target = TargetId(9);
    let point = |x: i16, y: i16| vec![TouchPoint::new(f64::from(x), f64::from(y))];
    match step {
        RawStep::Down(x, y) => RawInputEvent::touch(NativeEventType::TouchStart, target, point(x, y)),
        RawStep::Move(x, y) => RawInputEvent::touch(NativeEventType::TouchMove, target, point(x, y)),
        RawStep::End { cancel, bare } => {
            let ty = if cancel { NativeEventType::TouchCancel } else { NativeEventType::TouchEnd };
            let touches = if bare { Vec::new() } else { point(0, 0) };
            RawInputEvent::touch(ty, target, touches)
        }
    }
}

fn to_pointer(step: RawStep) -> RawInputEvent {
    let target = TargetId(9);
    match step {
        RawStep::Down(x, y) => {
            RawInputEvent::new(NativeEventType::PointerDown, target, f64::from(x), f64::from(y))
        }
        RawStep::Move(x, y) => {
            RawInputEvent::new(NativeEventType::PointerMove, target, f64::from(x), f64::from(y))
        }
        RawStep::End { cancel, bare } => {
            let ty = if cancel { NativeEventType::PointerCancel } else { NativeEventType::PointerUp };
            let coord = if bare { f64::NAN } else { 0.0 };
            RawInputEvent::new(ty, target, coord, coord)
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Two-axis threshold
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_axis_paths_never_start_drag(
        origin in (any::<i16>(), any::<i16>()),
        path in prop::collection::vec((any::<i16>(), any::<bool>()), 1..64),
    ) {
        let log = Log::default();
        let mut gr = DragRecognizer::new(logging_props(&log), InputVocabulary::Pointer);
        let mut ctx = RecordingContext::new();
        let (x0, y0) = (f64::from(origin.0), f64::from(origin.1));

        gr.handle_event(&InputEvent::new(NativeEventType::PointerDown, TargetId(1), x0, y0), &mut ctx);
        for (value, along_x) in path {
            let (x, y) = if along_x { (f64::from(value), y0) } else { (x0, f64::from(value)) };
            let d = gr.handle_event(&InputEvent::new(NativeEventType::PointerMove, TargetId(1), x, y), &mut ctx);
            prop_assert!(!d.prevent_default);
        }

        prop_assert_eq!(gr.phase(), DragPhase::Pressed);
        prop_assert!(!log.borrow().contains(&Logged::Change(true)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Delta formula
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dragmove_delta_is_offset_from_origin(
        origin in (any::<i16>(), any::<i16>()),
        path in prop::collection::vec((any::<i16>(), any::<i16>()), 1..48),
    ) {
        let log = Log::default();
        let mut gr = DragRecognizer::new(logging_props(&log), InputVocabulary::Pointer);
        let mut ctx = RecordingContext::new();
        let (x0, y0) = (f64::from(origin.0), f64::from(origin.1));

        gr.handle_event(&InputEvent::new(NativeEventType::PointerDown, TargetId(1), x0, y0), &mut ctx);
        for (x, y) in path {
            let (x, y) = (f64::from(x), f64::from(y));
            let before = log.borrow().len();
            let d = gr.handle_event(&InputEvent::new(NativeEventType::PointerMove, TargetId(1), x, y), &mut ctx);
            if let Some(DragTransition::DragMoved { diff_x, diff_y }) = d.transition {
                prop_assert_eq!((diff_x, diff_y), (x - x0, y - y0));
                {
                    let logged = log.borrow();
                    prop_assert_eq!(logged.get(before), Some(&Logged::Move(x - x0, y - y0)));
                }
                prop_assert!(d.prevent_default);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–5. Ordering, cleanup, state invariants over arbitrary sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_sequences_hold_invariants(
        steps in prop::collection::vec(step_strategy(), 0..96),
        deny in any::<bool>(),
    ) {
        let log = Log::default();
        let props = logging_props(&log).with_on_should_claim_ownership(|| true);
        let mut gr = DragRecognizer::new(props, InputVocabulary::Pointer);
        let mut ctx = if deny { RecordingContext::denying_ownership() } else { RecordingContext::new() };

        for step in steps {
            gr.handle_event(&to_event(step), &mut ctx);
            let state = gr.state();

            prop_assert!(!state.is_dragging() || state.is_pointer_down());
            prop_assert_eq!(state.drag_target().is_some(), state.is_pointer_down());
            prop_assert_eq!(state.has_root_subscription(), state.is_pointer_down());
            prop_assert!(ctx.live_subscriptions() <= 1);
            if deny {
                prop_assert!(!state.is_dragging());
            }

            if matches!(step, Step::Up | Step::Cancel) {
                prop_assert_eq!(gr.phase(), DragPhase::Idle);
                prop_assert_eq!(ctx.live_subscriptions(), 0);
            }
        }

        let log = log.borrow();
        for (i, entry) in log.iter().enumerate() {
            if *entry == Logged::End {
                prop_assert_eq!(log.get(i + 1), Some(&Logged::Change(false)));
            }
        }
        let sequences: Vec<u64> = ctx.dispatched().iter().map(|e| e.sequence).collect();
        prop_assert!(sequences.windows(2).all(|w| w[0] < w[1]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Release idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_is_idempotent(
        last_wins in any::<bool>(),
        requesters in prop::collection::vec(0u32..4, 1..16),
    ) {
        let mode = if last_wins { ArbitrationMode::LastWins } else { ArbitrationMode::FirstWins };
        let mut arbiter = OwnershipArbiter::new(mode);
        for id in &requesters {
            arbiter.request(ResponderId(*id));
        }
        let owner = arbiter.owner();
        prop_assert!(owner.is_some());
        let owner = owner.unwrap_or(ResponderId(0));

        let releases_before = arbiter.stats().releases;
        prop_assert!(arbiter.release(owner));
        prop_assert!(!arbiter.release(owner));
        prop_assert_eq!(arbiter.owner(), None);
        prop_assert_eq!(arbiter.stats().releases, releases_before + 1);

        if !last_wins {
            prop_assert_eq!(owner, ResponderId(requesters[0]));
        } else {
            prop_assert_eq!(Some(&owner.0), requesters.last());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Raw terminal cleanup
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn raw_terminal_events_always_end_gesture(
        steps in prop::collection::vec(raw_step_strategy(), 0..96),
        use_touch in any::<bool>(),
    ) {
        let log = Log::default();
        let props = logging_props(&log).with_on_should_claim_ownership(|| true);
        let vocabulary = if use_touch { InputVocabulary::MouseAndTouch } else { InputVocabulary::Pointer };
        let mut gr = DragRecognizer::new(props, vocabulary);
        let mut ctx = RecordingContext::new();

        for step in steps {
            let raw = if use_touch { to_touch(step) } else { to_pointer(step) };
            gr.handle_raw(&raw, &mut ctx);
            let state = gr.state();

            prop_assert!(!state.is_dragging() || state.is_pointer_down());
            prop_assert_eq!(state.has_root_subscription(), state.is_pointer_down());
            prop_assert!(ctx.live_subscriptions() <= 1);

            if matches!(step, RawStep::End { .. }) {
                prop_assert_eq!(gr.phase(), DragPhase::Idle);
                prop_assert_eq!(ctx.live_subscriptions(), 0);
            }
        }

        let log = log.borrow();
        for (i, entry) in log.iter().enumerate() {
            if *entry == Logged::End {
                prop_assert_eq!(log.get(i + 1), Some(&Logged::Change(false)));
            }
        }
        let starts = log.iter().filter(|e| **e == Logged::Change(true)).count();
        let ends = log.iter().filter(|e| **e == Logged::Change(false)).count();
        prop_assert!(ends == starts || ends + 1 == starts);
    }
}
