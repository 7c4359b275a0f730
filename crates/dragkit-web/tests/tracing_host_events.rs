#![forbid(unsafe_code)]

//! Structured logging from the reference host.
//!
//! Arbitration decisions and releases log at DEBUG; root subscription
//! changes log at TRACE.
//!
//! Run:
//!   cargo test -p dragkit-web --features tracing --test tracing_host_events

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use dragkit_core::{DragProps, NativeEventType, RawInputEvent, TargetId};
use dragkit_web::{ArbitrationMode, DragSession, HostConfig, OwnershipArbiter, ResponderId};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn with_message<'a>(events: &'a [CapturedEvent], message: &str) -> Vec<&'a CapturedEvent> {
    events.iter().filter(|e| e.message() == Some(message)).collect()
}

fn pointer(ty: NativeEventType, x: f64, y: f64) -> RawInputEvent {
    RawInputEvent::new(ty, TargetId(1), x, y)
}

/// Two claiming responders on one first-wins arbiter: the outer one takes
/// ownership, the inner one is denied, then the outer one releases.
fn contested_press() {
    let arbiter = OwnershipArbiter::shared(ArbitrationMode::FirstWins);
    let config = HostConfig {
        coalesce_continuous: false,
        ..HostConfig::default()
    };
    let claiming = || DragProps::new().with_on_should_claim_ownership(|| true);
    let mut outer = DragSession::with_config(claiming(), &config, ResponderId(1), Rc::clone(&arbiter));
    let mut inner = DragSession::with_config(claiming(), &config, ResponderId(2), Rc::clone(&arbiter));

    outer.deliver(&pointer(NativeEventType::PointerDown, 0.0, 0.0));
    outer.deliver(&pointer(NativeEventType::PointerMove, 2.0, 2.0));
    inner.deliver(&pointer(NativeEventType::PointerDown, 0.0, 0.0));
    inner.deliver(&pointer(NativeEventType::PointerMove, 2.0, 2.0));
    outer.deliver(&pointer(NativeEventType::PointerUp, 2.0, 2.0));
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn arbitration_decisions_log_at_debug() {
    let events = with_captured_events(contested_press);

    let decided = with_message(&events, "ownership request decided");
    assert_eq!(decided.len(), 2);
    assert!(decided.iter().all(|e| e.level == tracing::Level::DEBUG));
    assert_eq!(decided[0].fields["responder"], "1");
    assert_eq!(decided[0].fields["mode"], "first-wins");
    assert_eq!(decided[0].fields["decision"], "Granted");
    assert_eq!(decided[1].fields["responder"], "2");
    assert!(decided[1].fields["decision"].starts_with("Denied"));

    // Releases that find nothing held stay silent.
    let released = with_message(&events, "ownership released");
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].level, tracing::Level::DEBUG);
    assert_eq!(released[0].fields["responder"], "1");
}

#[test]
fn root_subscription_changes_log_at_trace() {
    let events = with_captured_events(contested_press);

    let added = with_message(&events, "root listeners added");
    let removed = with_message(&events, "root listeners removed");
    assert_eq!(added.len(), 2);
    assert_eq!(removed.len(), 2);
    for event in added.iter().chain(removed.iter()) {
        assert_eq!(event.level, tracing::Level::TRACE);
        assert!(event.fields.contains_key("subscription"));
    }
    assert!(added.iter().all(|e| e.fields.contains_key("event_types")));
    assert!(removed.iter().all(|e| e.fields["found"] == "true"));

    // The denied inner press is torn down before the outer release.
    assert_eq!(removed[0].fields["responder"], "2");
    assert_eq!(removed[1].fields["responder"], "1");
}
