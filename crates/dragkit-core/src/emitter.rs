#![forbid(unsafe_code)]

//! Construction and dispatch of synthetic drag events.

use std::rc::Rc;

use crate::context::ResponderContext;
use crate::drag_event::{DragEvent, DragEventKind, DragListener};
use crate::input::TargetId;
use crate::props::DragProps;

/// Stamps events with a sequence number and the host time, then hands them to
/// the host with the priority their kind demands.
#[derive(Debug, Clone)]
pub struct DragEmitter {
    next_sequence: u64,
}

impl Default for DragEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DragEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self { next_sequence: 1 }
    }

    /// Build and dispatch one event to `listener`.
    pub fn emit<C>(&mut self, ctx: &mut C, kind: DragEventKind, listener: &DragListener) -> DragEvent
    where
        C: ResponderContext + ?Sized,
    {
        let event = DragEvent::new(self.next_sequence(), ctx.time_stamp(), kind);
        ctx.dispatch_event(event, Rc::clone(listener), kind.priority());
        event
    }

    pub fn emit_start<C>(&mut self, ctx: &mut C, props: &DragProps, target: TargetId) -> Option<DragEvent>
    where
        C: ResponderContext + ?Sized,
    {
        let listener = props.on_drag_start.as_ref()?;
        Some(self.emit(ctx, DragEventKind::Start { target }, listener))
    }

    /// The change listener takes a bare `bool`, so it is wrapped in a
    /// listener that forwards the flag.
    pub fn emit_change<C>(&mut self, ctx: &mut C, props: &DragProps, is_dragging: bool) -> Option<DragEvent>
    where
        C: ResponderContext + ?Sized,
    {
        let on_change = Rc::clone(props.on_drag_change.as_ref()?);
        let listener: DragListener = Rc::new(move |_event: &DragEvent| on_change(is_dragging));
        Some(self.emit(ctx, DragEventKind::Change { is_dragging }, &listener))
    }

    pub fn emit_move<C>(
        &mut self,
        ctx: &mut C,
        props: &DragProps,
        target: TargetId,
        diff_x: f64,
        diff_y: f64,
    ) -> Option<DragEvent>
    where
        C: ResponderContext + ?Sized,
    {
        let listener = props.on_drag_move.as_ref()?;
        Some(self.emit(
            ctx,
            DragEventKind::Move {
                target,
                diff_x,
                diff_y,
            },
            listener,
        ))
    }

    pub fn emit_end<C>(&mut self, ctx: &mut C, props: &DragProps, target: TargetId) -> Option<DragEvent>
    where
        C: ResponderContext + ?Sized,
    {
        let listener = props.on_drag_end.as_ref()?;
        Some(self.emit(ctx, DragEventKind::End { target }, listener))
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}
