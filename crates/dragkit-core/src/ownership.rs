#![forbid(unsafe_code)]

//! Client-side ownership arbitration.
//!
//! A recognizer only touches the host's ownership API when its props declare
//! an `on_should_claim_ownership` predicate. [`OwnershipClient`] wraps the
//! three points where that matters:
//!
//! - **press**: release anything still held from an earlier gesture,
//! - **threshold crossing**: consult the predicate and, if it says so, request
//!   exclusive ownership; a denial aborts the drag,
//! - **drag end**: release.

use crate::context::ResponderContext;
use crate::props::DragProps;

/// Result of consulting the ownership policy at threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No predicate, or the predicate declined to contend.
    Uncontested,
    /// Ownership was requested and granted.
    Granted,
    /// Ownership was requested and denied.
    Denied,
}

impl ClaimOutcome {
    /// Whether dragging may begin.
    #[inline]
    #[must_use]
    pub const fn allows_drag(self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// Tracks this recognizer's view of global ownership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipClient {
    held: bool,
}

impl OwnershipClient {
    #[must_use]
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Whether the last request was granted and not yet released.
    #[inline]
    #[must_use]
    pub const fn holds_ownership(&self) -> bool {
        self.held
    }

    /// Reset ownership at the start of a press.
    pub fn reset_on_press<C>(&mut self, props: &DragProps, ctx: &mut C)
    where
        C: ResponderContext + ?Sized,
    {
        if props.has_ownership_policy() {
            ctx.release_ownership();
            self.held = false;
        }
    }

    /// Consult the predicate and contend for ownership if it asks to.
    pub fn claim_at_threshold<C>(&mut self, props: &DragProps, ctx: &mut C) -> ClaimOutcome
    where
        C: ResponderContext + ?Sized,
    {
        if !props.should_claim_ownership() {
            return ClaimOutcome::Uncontested;
        }
        let granted = ctx.request_global_ownership();
        self.held = granted;

        #[cfg(feature = "tracing")]
        tracing::debug!(granted, "global ownership requested");

        if granted {
            ClaimOutcome::Granted
        } else {
            ClaimOutcome::Denied
        }
    }

    /// Release ownership when a drag ends.
    pub fn release_on_end<C>(&mut self, props: &DragProps, ctx: &mut C)
    where
        C: ResponderContext + ?Sized,
    {
        if props.has_ownership_policy() {
            ctx.release_ownership();
            self.held = false;
        }
    }

    /// Release on teardown if anything is held.
    pub fn release_held<C>(&mut self, ctx: &mut C)
    where
        C: ResponderContext + ?Sized,
    {
        if self.held {
            ctx.release_ownership();
            self.held = false;
        }
    }
}
