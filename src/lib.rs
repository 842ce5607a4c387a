//! hotspot - pattern-bound clickable text spans for editable documents
//!
//! Consumers declare "when text matches pattern P, bind event E to
//! handler H, and render the match with style S". The crate keeps those
//! bindings consistent with a rendering engine as the document's
//! highlighting is recomputed:
//!
//! - [`registry::BindingRegistry`] stores the per-document bindings and
//!   enforces pattern uniqueness
//! - [`sync::HighlightSync`] reconciles the engine's active rule set
//! - [`extent::find_extent`] resolves the contiguous annotated span
//!   around a point
//! - [`global::GlobalBindingSet`] replays process-wide specs into each
//!   newly activated registry
//! - [`engine::RegexEngine`] is a self-contained engine for hosts
//!   without their own highlighter
//!
//! All state is single-threaded and per-document; the only cross-
//! document state is the global set, which is copied by value at
//! activation time.

pub mod annotations;
pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod extent;
pub mod global;
pub mod mode;
pub mod registry;
pub mod style;
pub mod sync;

pub use annotations::{AnnotationKey, AnnotationSource, AnnotationStore, AnnotationValue};
pub use binding::{BindingConfig, BindingSpec, PatternBinding};
pub use config::Config;
pub use engine::{HighlightRule, RegexEngine, RenderEngine};
pub use error::{HotspotError, Result};
pub use event::{EventMap, Handler, InputEvent};
pub use extent::{find_clickable_extent, find_extent};
pub use global::GlobalBindingSet;
pub use mode::ModeManager;
pub use registry::BindingRegistry;
pub use style::{Color, Face, OverridePolicy};
pub use sync::HighlightSync;
