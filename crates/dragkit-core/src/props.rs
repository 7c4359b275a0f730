#![forbid(unsafe_code)]

//! Responder configuration: optional listeners and the ownership predicate.

use std::rc::Rc;

use crate::drag_event::{DragEvent, DragListener};

/// Listener for drag-active changes.
pub type DragChangeListener = Rc<dyn Fn(bool)>;

/// Predicate consulted when a press crosses the drag threshold.
pub type ClaimOwnershipPredicate = Rc<dyn Fn() -> bool>;

/// Configuration of one drag responder.
///
/// Every field is optional. A responder without
/// `on_should_claim_ownership` is cooperative: it never requests or releases
/// global ownership.
#[derive(Clone, Default)]
pub struct DragProps {
    /// Fires on every accepted press.
    pub on_drag_start: Option<DragListener>,
    /// Fires on entering (`true`) and leaving (`false`) the dragging state.
    pub on_drag_change: Option<DragChangeListener>,
    /// Fires for each qualifying move while dragging.
    pub on_drag_move: Option<DragListener>,
    /// Fires once when a drag ends.
    pub on_drag_end: Option<DragListener>,
    /// Decides whether to contend for exclusive ownership at threshold crossing.
    pub on_should_claim_ownership: Option<ClaimOwnershipPredicate>,
}

impl std::fmt::Debug for DragProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragProps")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_change", &self.on_drag_change.is_some())
            .field("on_drag_move", &self.on_drag_move.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field(
                "on_should_claim_ownership",
                &self.on_should_claim_ownership.is_some(),
            )
            .finish()
    }
}

impl DragProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_on_drag_start(mut self, listener: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(listener));
        self
    }

    #[must_use]
    pub fn with_on_drag_change(mut self, listener: impl Fn(bool) + 'static) -> Self {
        self.on_drag_change = Some(Rc::new(listener));
        self
    }

    #[must_use]
    pub fn with_on_drag_move(mut self, listener: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_move = Some(Rc::new(listener));
        self
    }

    #[must_use]
    pub fn with_on_drag_end(mut self, listener: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(listener));
        self
    }

    #[must_use]
    pub fn with_on_should_claim_ownership(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.on_should_claim_ownership = Some(Rc::new(predicate));
        self
    }

    /// Whether a claim-ownership policy is declared at all.
    #[inline]
    #[must_use]
    pub fn has_ownership_policy(&self) -> bool {
        self.on_should_claim_ownership.is_some()
    }

    /// Evaluate the claim-ownership predicate (`false` when absent).
    #[must_use]
    pub fn should_claim_ownership(&self) -> bool {
        self.on_should_claim_ownership
            .as_ref()
            .is_some_and(|predicate| predicate())
    }
}
