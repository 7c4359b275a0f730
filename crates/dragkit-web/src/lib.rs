#![forbid(unsafe_code)]

//! `dragkit-web` is a reference host for `dragkit-core` recognizers.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes native events and advances
//!   the clock explicitly.
//! - **Ordered delivery**: discrete drag events are never overtaken by held
//!   continuous ones.
//! - **No blocking / no threads**: everything runs on the host's event turn.
//!
//! The crate does not bind to `wasm-bindgen`. A JS shim serializes DOM events
//! to JSON (see [`input_parser`], feature `input-parser`) and feeds them to a
//! [`DragSession`].

pub mod arbiter;
pub mod config;
pub mod dispatch;
pub mod host;

#[cfg(feature = "input-parser")]
pub mod input_parser;

pub use arbiter::{
    ArbitrationMode, ArbiterStats, OwnershipArbiter, OwnershipDecision, ResponderId, SharedArbiter,
};
pub use config::{CapabilityConfig, HostConfig, HostConfigError, VocabularyChoice};
pub use dispatch::{DispatchQueue, DispatchStats};
pub use host::{DeterministicClock, DragSession, WebDragHost};
