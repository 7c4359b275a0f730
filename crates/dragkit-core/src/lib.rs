#![forbid(unsafe_code)]

//! Core: drag gesture recognition over pointer, mouse, and touch input.
//!
//! # Role in dragkit
//! `dragkit-core` is host-agnostic. It normalizes native input, runs the
//! press/drag state machine, and emits `dragstart`, `dragchange`, `dragmove`,
//! and `dragend` through a [`ResponderContext`] supplied by the host.
//!
//! # Primary responsibilities
//! - **Input**: native event vocabulary and [`normalize`].
//! - **DragRecognizer**: the gesture state machine and its two-axis threshold.
//! - **OwnershipClient**: when to claim and release global ownership.
//! - **DragEmitter**: sequencing, time-stamping, and priority of emitted events.
//!
//! # How it fits in the system
//! `dragkit-web` implements [`ResponderContext`] for a DOM-like host: root
//! listener bookkeeping, ownership arbitration between responders, and
//! coalesced delivery of continuous events.

pub mod context;
pub mod drag_event;
pub mod emitter;
pub mod gesture;
pub mod input;
pub mod ownership;
pub mod props;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use context::{ResponderContext, RootSubscription};
pub use drag_event::{DragEvent, DragEventKind, DragListener, EventPriority};
pub use gesture::{
    DragDispatch, DragIgnoredReason, DragLogEntry, DragLogOutcome, DragPhase, DragRecognizer,
    DragTransition, GestureState,
};
pub use input::{
    EventRegistration, EventTypes, InputEvent, InputFamily, InputKind, InputVocabulary,
    NativeEventType, PlatformCapabilities, RawInputEvent, TargetId, TouchPoint, normalize,
};
pub use ownership::{ClaimOutcome, OwnershipClient};
pub use props::DragProps;
