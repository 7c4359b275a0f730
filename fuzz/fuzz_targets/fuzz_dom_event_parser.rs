#![no_main]

use dragkit_core::{DragRecognizer, DragProps, InputVocabulary, testing::RecordingContext};
use dragkit_web::input_parser::parse_dom_event;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(Some(raw)) = parse_dom_event(json) else {
        return;
    };

    // Whatever parses must be safe to feed to a recognizer in either vocabulary.
    for vocabulary in [InputVocabulary::Pointer, InputVocabulary::MouseAndTouch] {
        let mut recognizer = DragRecognizer::new(DragProps::default(), vocabulary);
        let mut ctx = RecordingContext::new();
        let dispatch = recognizer.handle_raw(&raw, &mut ctx);
        if let Some((x, y)) = dispatch.log.position {
            assert!(x.is_finite() && y.is_finite(), "non-finite position accepted");
        }
        assert!(dispatch.emitted.is_empty(), "no listeners configured");
    }
});
