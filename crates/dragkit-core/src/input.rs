#![forbid(unsafe_code)]

//! Input normalization for pointer, mouse, and touch events.
//!
//! Hosts deliver one of three native event vocabularies. [`normalize`] maps a
//! [`RawInputEvent`] onto a single [`InputEvent`] shape (logical kind plus
//! absolute screen coordinates) so the gesture state machine never inspects
//! vocabulary-specific fields.
//!
//! # Vocabularies
//!
//! [`InputVocabulary::detect`] picks the vocabulary once, at setup time:
//!
//! | platform            | target types               | root (continuation) types                                  |
//! |---------------------|----------------------------|------------------------------------------------------------|
//! | pointer events      | `pointerdown`              | `pointerup`, `pointermove`, `pointercancel`                 |
//! | no pointer events   | `mousedown`, `touchstart`  | `mouseup`, `mousemove`, `touchend`, `touchcancel`, `touchmove` |
//!
//! Pointer kinds are never mixed with mouse/touch kinds.
//!
//! # Touch
//!
//! Only the first entry of `changed_touches` is read. Additional simultaneous
//! contacts are ignored. A touch event with no changed touches does not
//! normalize.

use bitflags::bitflags;

/// Opaque identifier of the element that received an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Logical input kind after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl InputKind {
    /// Returns true for kinds that end a press (`Up` or `Cancel`).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// Native event family a raw event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFamily {
    Pointer,
    Mouse,
    Touch,
}

/// Native event types understood by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEventType {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl NativeEventType {
    /// Every native type, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerCancel,
        Self::MouseDown,
        Self::MouseMove,
        Self::MouseUp,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::TouchCancel,
    ];

    /// DOM event name (`"pointerdown"`, `"touchmove"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
        }
    }

    /// Look up a native type by its DOM event name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }

    /// The vocabulary family this type belongs to.
    #[must_use]
    pub const fn family(self) -> InputFamily {
        match self {
            Self::PointerDown | Self::PointerMove | Self::PointerUp | Self::PointerCancel => {
                InputFamily::Pointer
            }
            Self::MouseDown | Self::MouseMove | Self::MouseUp => InputFamily::Mouse,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel => {
                InputFamily::Touch
            }
        }
    }

    /// Logical kind this type normalizes to.
    #[must_use]
    pub const fn kind(self) -> InputKind {
        match self {
            Self::PointerDown | Self::MouseDown | Self::TouchStart => InputKind::Down,
            Self::PointerMove | Self::MouseMove | Self::TouchMove => InputKind::Move,
            Self::PointerUp | Self::MouseUp | Self::TouchEnd => InputKind::Up,
            Self::PointerCancel | Self::TouchCancel => InputKind::Cancel,
        }
    }

    /// Single-bit set containing only this type.
    #[must_use]
    pub const fn flag(self) -> EventTypes {
        match self {
            Self::PointerDown => EventTypes::POINTER_DOWN,
            Self::PointerMove => EventTypes::POINTER_MOVE,
            Self::PointerUp => EventTypes::POINTER_UP,
            Self::PointerCancel => EventTypes::POINTER_CANCEL,
            Self::MouseDown => EventTypes::MOUSE_DOWN,
            Self::MouseMove => EventTypes::MOUSE_MOVE,
            Self::MouseUp => EventTypes::MOUSE_UP,
            Self::TouchStart => EventTypes::TOUCH_START,
            Self::TouchMove => EventTypes::TOUCH_MOVE,
            Self::TouchEnd => EventTypes::TOUCH_END,
            Self::TouchCancel => EventTypes::TOUCH_CANCEL,
        }
    }
}

impl core::fmt::Display for NativeEventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of native event types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventTypes: u16 {
        const POINTER_DOWN = 1 << 0;
        const POINTER_MOVE = 1 << 1;
        const POINTER_UP = 1 << 2;
        const POINTER_CANCEL = 1 << 3;
        const MOUSE_DOWN = 1 << 4;
        const MOUSE_MOVE = 1 << 5;
        const MOUSE_UP = 1 << 6;
        const TOUCH_START = 1 << 7;
        const TOUCH_MOVE = 1 << 8;
        const TOUCH_END = 1 << 9;
        const TOUCH_CANCEL = 1 << 10;
    }
}

impl EventTypes {
    /// Whether the set contains `event_type`.
    #[must_use]
    pub const fn has(self, event_type: NativeEventType) -> bool {
        self.contains(event_type.flag())
    }

    /// Iterate the native types in this set.
    pub fn event_types(self) -> impl Iterator<Item = NativeEventType> {
        NativeEventType::ALL
            .into_iter()
            .filter(move |ty| self.has(*ty))
    }
}

/// Listener registration for one continuation event type.
///
/// `passive: None` leaves the host's default in place. `Some(false)` asks the
/// host for a listener that may call `preventDefault()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventRegistration {
    pub event_type: NativeEventType,
    pub passive: Option<bool>,
}

impl EventRegistration {
    /// Registration with host-default listener options.
    #[must_use]
    pub const fn new(event_type: NativeEventType) -> Self {
        Self {
            event_type,
            passive: None,
        }
    }

    /// Registration with an explicit passive flag.
    #[must_use]
    pub const fn with_passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }
}

const POINTER_ROOT_REGISTRATIONS: [EventRegistration; 3] = [
    EventRegistration::new(NativeEventType::PointerUp),
    EventRegistration::new(NativeEventType::PointerMove),
    EventRegistration::new(NativeEventType::PointerCancel),
];

const MOUSE_TOUCH_ROOT_REGISTRATIONS: [EventRegistration; 5] = [
    EventRegistration::new(NativeEventType::MouseUp),
    EventRegistration::new(NativeEventType::MouseMove),
    EventRegistration::new(NativeEventType::TouchEnd),
    EventRegistration::new(NativeEventType::TouchCancel),
    EventRegistration::new(NativeEventType::TouchMove).with_passive(false),
];

/// Host capabilities consulted when choosing a vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCapabilities {
    /// The host exposes the pointer-events API.
    pub pointer_events: bool,
}

/// The event vocabulary a recognizer listens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputVocabulary {
    /// Pointer events only.
    Pointer,
    /// Mouse and touch events together.
    MouseAndTouch,
}

impl InputVocabulary {
    /// Choose the vocabulary for a platform.
    #[must_use]
    pub const fn detect(caps: PlatformCapabilities) -> Self {
        if caps.pointer_events {
            Self::Pointer
        } else {
            Self::MouseAndTouch
        }
    }

    /// Types registered on the responder target while idle.
    #[must_use]
    pub const fn target_event_types(self) -> EventTypes {
        match self {
            Self::Pointer => EventTypes::POINTER_DOWN,
            Self::MouseAndTouch => EventTypes::MOUSE_DOWN.union(EventTypes::TOUCH_START),
        }
    }

    /// Continuation types registered at the root after a press.
    #[must_use]
    pub const fn root_registrations(self) -> &'static [EventRegistration] {
        match self {
            Self::Pointer => &POINTER_ROOT_REGISTRATIONS,
            Self::MouseAndTouch => &MOUSE_TOUCH_ROOT_REGISTRATIONS,
        }
    }

    /// Continuation types as a set.
    #[must_use]
    pub const fn root_event_types(self) -> EventTypes {
        match self {
            Self::Pointer => EventTypes::POINTER_UP
                .union(EventTypes::POINTER_MOVE)
                .union(EventTypes::POINTER_CANCEL),
            Self::MouseAndTouch => EventTypes::MOUSE_UP
                .union(EventTypes::MOUSE_MOVE)
                .union(EventTypes::TOUCH_END)
                .union(EventTypes::TOUCH_CANCEL)
                .union(EventTypes::TOUCH_MOVE),
        }
    }

    /// Whether events of `event_type` belong to this vocabulary.
    #[must_use]
    pub const fn accepts(self, event_type: NativeEventType) -> bool {
        self.target_event_types()
            .union(self.root_event_types())
            .has(event_type)
    }
}

/// One entry of a touch event's changed-touches list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub screen_x: f64,
    pub screen_y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(screen_x: f64, screen_y: f64) -> Self {
        Self { screen_x, screen_y }
    }
}

/// A native event as delivered by the host, before normalization.
///
/// Pointer and mouse events carry their coordinates in `screen_x`/`screen_y`.
/// Touch events carry them in `changed_touches`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputEvent {
    pub event_type: NativeEventType,
    pub target: TargetId,
    pub screen_x: f64,
    pub screen_y: f64,
    pub changed_touches: Vec<TouchPoint>,
    /// The listener that received this event cannot prevent its default.
    pub passive: bool,
}

impl RawInputEvent {
    /// A pointer or mouse event at the given screen coordinates.
    #[must_use]
    pub fn new(event_type: NativeEventType, target: TargetId, screen_x: f64, screen_y: f64) -> Self {
        Self {
            event_type,
            target,
            screen_x,
            screen_y,
            changed_touches: Vec::new(),
            passive: false,
        }
    }

    /// A touch event with the given changed touches.
    #[must_use]
    pub fn touch(event_type: NativeEventType, target: TargetId, touches: Vec<TouchPoint>) -> Self {
        Self {
            event_type,
            target,
            screen_x: 0.0,
            screen_y: 0.0,
            changed_touches: touches,
            passive: false,
        }
    }

    /// Mark the event as delivered to a passive listener.
    #[must_use]
    pub fn with_passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }
}

/// Normalized input event consumed by the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub target: TargetId,
    pub x: f64,
    pub y: f64,
    pub passive: bool,
    /// Native type this event was normalized from.
    pub source: NativeEventType,
}

impl InputEvent {
    /// Build a normalized event directly (hosts that already normalize).
    #[must_use]
    pub const fn new(source: NativeEventType, target: TargetId, x: f64, y: f64) -> Self {
        Self {
            kind: source.kind(),
            target,
            x,
            y,
            passive: false,
            source,
        }
    }

    #[must_use]
    pub const fn with_passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }
}

/// Normalize a raw event.
///
/// Returns `None` when the event carries no usable coordinates: a touch event
/// with an empty changed-touches list, or non-finite coordinates.
#[must_use]
pub fn normalize(raw: &RawInputEvent) -> Option<InputEvent> {
    let (x, y) = match raw.event_type.family() {
        InputFamily::Touch => {
            let first = raw.changed_touches.first()?;
            (first.screen_x, first.screen_y)
        }
        InputFamily::Pointer | InputFamily::Mouse => (raw.screen_x, raw.screen_y),
    };
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(InputEvent {
        kind: raw.event_type.kind(),
        target: raw.target,
        x,
        y,
        passive: raw.passive,
        source: raw.event_type,
    })
}
