#![forbid(unsafe_code)]

//! Synthetic drag events delivered to listeners.
//!
//! # Invariants
//! 1. Every drag that begins is well-formed: `Change { is_dragging: true }` →
//!    zero or more `Move` → `End` → `Change { is_dragging: false }`.
//! 2. `Start` is emitted on every accepted press, whether or not the press
//!    ever becomes a drag.
//! 3. `sequence` increases strictly per recognizer across all four kinds.
//! 4. `Move` deltas are measured from the press origin, not from the previous
//!    move.

use std::rc::Rc;
use std::time::Duration;

use crate::input::TargetId;

/// Delivery class of a synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPriority {
    /// Delivered synchronously, in production order, never batched.
    Discrete,
    /// May be coalesced by the host, but never reordered.
    Continuous,
}

impl EventPriority {
    #[inline]
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        matches!(self, Self::Discrete)
    }
}

/// Payload of a synthetic drag event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEventKind {
    /// A press was accepted on `target`.
    Start { target: TargetId },
    /// The drag-active flag changed.
    Change { is_dragging: bool },
    /// Pointer moved while dragging; deltas are relative to the press origin.
    Move {
        target: TargetId,
        diff_x: f64,
        diff_y: f64,
    },
    /// A drag finished (release or cancellation).
    End { target: TargetId },
}

impl DragEventKind {
    /// DOM-style event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "dragstart",
            Self::Change { .. } => "dragchange",
            Self::Move { .. } => "dragmove",
            Self::End { .. } => "dragend",
        }
    }

    /// Only `Move` is continuous.
    #[must_use]
    pub const fn priority(&self) -> EventPriority {
        match self {
            Self::Move { .. } => EventPriority::Continuous,
            Self::Start { .. } | Self::Change { .. } | Self::End { .. } => EventPriority::Discrete,
        }
    }
}

/// A synthetic drag event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub sequence: u64,
    /// Host clock reading when the event was produced.
    pub time_stamp: Duration,
    pub kind: DragEventKind,
}

impl DragEvent {
    #[must_use]
    pub const fn new(sequence: u64, time_stamp: Duration, kind: DragEventKind) -> Self {
        Self {
            sequence,
            time_stamp,
            kind,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub const fn priority(&self) -> EventPriority {
        self.kind.priority()
    }

    /// Target element, if the event kind carries one.
    #[must_use]
    pub const fn target(&self) -> Option<TargetId> {
        match self.kind {
            DragEventKind::Start { target }
            | DragEventKind::Move { target, .. }
            | DragEventKind::End { target } => Some(target),
            DragEventKind::Change { .. } => None,
        }
    }

    /// `(diff_x, diff_y)` for move events.
    #[must_use]
    pub const fn delta(&self) -> Option<(f64, f64)> {
        match self.kind {
            DragEventKind::Move { diff_x, diff_y, .. } => Some((diff_x, diff_y)),
            _ => None,
        }
    }
}

/// Listener invoked with a dispatched event.
///
/// Listeners are reference-counted so a host may hold them until a deferred
/// (coalesced) delivery.
pub type DragListener = Rc<dyn Fn(&DragEvent)>;
