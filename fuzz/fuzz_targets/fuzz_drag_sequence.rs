#![no_main]

use arbitrary::Arbitrary;
use dragkit_core::testing::RecordingContext;
use dragkit_core::{
    DragPhase, DragProps, DragRecognizer, EventPriority, InputEvent, InputVocabulary,
    NativeEventType, TargetId,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Sequence {
    mouse_and_touch: bool,
    claim_ownership: bool,
    grant_ownership: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Arbitrary)]
struct Step {
    type_index: u8,
    x: i16,
    y: i16,
    passive: bool,
}

fuzz_target!(|input: Sequence| {
    let vocabulary = if input.mouse_and_touch {
        InputVocabulary::MouseAndTouch
    } else {
        InputVocabulary::Pointer
    };
    let mut props = DragProps::new()
        .with_on_drag_start(|_| {})
        .with_on_drag_change(|_| {})
        .with_on_drag_move(|_| {})
        .with_on_drag_end(|_| {});
    if input.claim_ownership {
        props = props.with_on_should_claim_ownership(|| true);
    }
    let mut recognizer = DragRecognizer::new(props, vocabulary);
    let mut ctx = RecordingContext::new();
    ctx.grant_ownership = input.grant_ownership;

    for step in input.steps.iter().take(512) {
        let ty = NativeEventType::ALL[usize::from(step.type_index) % NativeEventType::ALL.len()];
        let event = InputEvent::new(ty, TargetId(1), f64::from(step.x), f64::from(step.y))
            .with_passive(step.passive);
        let dispatch = recognizer.handle_event(&event, &mut ctx);

        let state = recognizer.state();
        assert!(!state.is_dragging() || state.is_pointer_down(), "dragging without press");
        assert_eq!(state.drag_target().is_some(), state.is_pointer_down(), "target/press mismatch");
        assert_eq!(state.has_root_subscription(), state.is_pointer_down(), "subscription leak");
        assert!(ctx.live_subscriptions() <= 1, "double subscription");

        if dispatch.prevent_default {
            assert_eq!(dispatch.emitted_names(), vec!["dragmove"], "prevent without dragmove");
        }
        // Types outside the vocabulary are rejected and leave the gesture alone.
        if ty.kind().is_terminal() && recognizer.vocabulary().accepts(ty) {
            assert_eq!(recognizer.phase(), DragPhase::Idle, "terminal event left gesture active");
        }
        let names = dispatch.emitted_names();
        if let Some(end) = names.iter().position(|n| *n == "dragend") {
            assert_eq!(names.get(end + 1), Some(&"dragchange"), "dragend not followed by dragchange");
        }
        for event in &dispatch.emitted {
            assert_eq!(
                event.priority() == EventPriority::Continuous,
                event.name() == "dragmove",
                "wrong priority for {}",
                event.name()
            );
        }
    }
});
