//! Promptdeck - Preset Prompt Toolkit
//!
//! Deterministic prompt assembly from preset bundles: pick a preset,
//! seed the generator, and get the same comma-separated prompt string
//! every time. Preset resources are plain JSON files mapping preset
//! names to tag categories; loading never fails, it degrades.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`store`] - Preset resource loading, degrade handling, category order
//! - [`assembler`] - Deterministic tag selection and prompt rendering
//! - [`request`] - Caller-supplied inputs for one assembly
//! - [`fragment`] - Shared splitting, dedup, and rendering pipeline
//! - [`schema`] - Host-facing declaration of assembly inputs
//! - [`error`] - Resource error types
//!
//! # Example
//!
//! ```no_run
//! use promptdeck::assembler::PromptAssembler;
//! use promptdeck::request::AssemblyRequest;
//! use promptdeck::store::PresetStore;
//!
//! // Load the preset resource; a missing or malformed file degrades to
//! // a "None"-only store instead of failing.
//! let store = PresetStore::load("presets.json");
//!
//! // Same request, same store, same prompt.
//! let request = AssemblyRequest::new()
//!     .with_preset("Fantasy")
//!     .with_seed(42)
//!     .with_character("1girl");
//! let prompt = PromptAssembler::new(&store).assemble(&request);
//! println!("{}", prompt);
//! ```

pub mod assembler;
pub mod error;
pub mod fragment;
pub mod request;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use error::{PresetError, Result};

// Re-export store types
pub use store::{PresetStore, PresetValue, NONE_PRESET};

// Re-export request types
pub use request::{AssemblyRequest, PresetSelection, DEFAULT_PREFIX_TAGS};

// Re-export assembly types
pub use assembler::{AssemblyReport, CategoryDraw, PromptAssembler};

// Re-export schema types
pub use schema::{InputField, InputSchema, InputSpec};

// Re-export fragment helpers
pub use fragment::{dedup_tags, render, split_tags};
