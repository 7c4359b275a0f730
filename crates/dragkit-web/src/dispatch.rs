#![forbid(unsafe_code)]

//! Delivery of drag events by priority.
//!
//! [`DispatchQueue`] enforces the ordering contract between discrete and
//! continuous events:
//!
//! - Discrete events (`dragstart`, `dragchange`, `dragend`) are delivered
//!   immediately, after any pending continuous events.
//! - Continuous events (`dragmove`) are held until [`DispatchQueue::flush`]
//!   and coalesced per listener: only the latest event is kept.
//!
//! Drag deltas are measured from the press origin, so dropping an
//! intermediate `dragmove` loses no information.
//!
//! With coalescing disabled every event is delivered immediately in order.

use std::rc::Rc;

use dragkit_core::{DragEvent, DragListener, EventPriority};

struct PendingDispatch {
    event: DragEvent,
    listener: DragListener,
}

impl std::fmt::Debug for PendingDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDispatch")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub discrete_delivered: u64,
    pub continuous_delivered: u64,
    /// Continuous events replaced by a later one before delivery.
    pub coalesced: u64,
}

/// Priority-aware event queue.
#[derive(Debug)]
pub struct DispatchQueue {
    coalesce: bool,
    pending: Vec<PendingDispatch>,
    stats: DispatchStats,
}

impl Default for DispatchQueue {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DispatchQueue {
    #[must_use]
    pub const fn new(coalesce: bool) -> Self {
        Self {
            coalesce,
            pending: Vec::new(),
            stats: DispatchStats {
                discrete_delivered: 0,
                continuous_delivered: 0,
                coalesced: 0,
            },
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_coalescing(&self) -> bool {
        self.coalesce
    }

    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Sequence numbers of held events, in delivery order.
    #[must_use]
    pub fn pending_sequences(&self) -> Vec<u64> {
        self.pending.iter().map(|p| p.event.sequence).collect()
    }

    #[inline]
    #[must_use]
    pub const fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Accept one event. Returns how many events were delivered by this call.
    pub fn push(&mut self, event: DragEvent, listener: DragListener, priority: EventPriority) -> usize {
        match priority {
            EventPriority::Discrete => {
                let flushed = self.flush();
                listener(&event);
                self.stats.discrete_delivered += 1;
                flushed + 1
            }
            EventPriority::Continuous if !self.coalesce => {
                listener(&event);
                self.stats.continuous_delivered += 1;
                1
            }
            EventPriority::Continuous => {
                // The replacement moves to the back so held events stay in
                // production order.
                if let Some(index) = self
                    .pending
                    .iter()
                    .position(|p| Rc::ptr_eq(&p.listener, &listener))
                {
                    self.pending.remove(index);
                    self.stats.coalesced += 1;
                }
                self.pending.push(PendingDispatch { event, listener });
                0
            }
        }
    }

    /// Deliver every held continuous event. Returns the number delivered.
    pub fn flush(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let delivered = pending.len();
        for PendingDispatch { event, listener } in pending {
            listener(&event);
        }
        self.stats.continuous_delivered += delivered as u64;
        delivered
    }

    /// Drop held events without delivering them.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}
