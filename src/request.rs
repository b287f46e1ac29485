//! Assembly request - the caller-supplied inputs for one generation.
//!
//! An [`AssemblyRequest`] bundles everything a host passes for a single
//! prompt: the preset selection, the seed, the free-text tag fields, and
//! the per-category enable flags. Requests are plain data; the same
//! request against the same store always yields the same prompt.

use crate::store::NONE_PRESET;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default leading tags, matching the host widget default.
pub const DEFAULT_PREFIX_TAGS: &str = "masterpiece, best quality";

/// How the preset for one assembly is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetSelection {
    /// Use the named preset. Unknown names contribute no preset content.
    Named(String),
    /// Draw a preset from the selectable names with the request seed.
    Randomize,
}

impl Default for PresetSelection {
    fn default() -> Self {
        Self::Named(NONE_PRESET.to_string())
    }
}

/// Inputs for one prompt assembly.
///
/// The default request mirrors the host widget defaults: preset
/// `"None"`, seed 0, prefix `"masterpiece, best quality"`, empty
/// character and suffix, every category enabled.
///
/// # Example
///
/// ```
/// use promptdeck::request::AssemblyRequest;
///
/// let request = AssemblyRequest::new()
///     .with_preset("Fantasy")
///     .with_seed(42)
///     .with_character("1girl")
///     .with_category_enabled("style", false);
///
/// assert_eq!(request.seed, 42);
/// assert!(!request.is_enabled("style"));
/// assert!(request.is_enabled("setting"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyRequest {
    /// Preset selection mode.
    #[serde(default)]
    pub selection: PresetSelection,
    /// Seed for the per-invocation generator. Full u64 range.
    #[serde(default)]
    pub seed: u64,
    /// Comma- or newline-separated tags placed first.
    #[serde(default = "default_prefix_tags")]
    pub prefix_tags: String,
    /// Character tags, placed between prefix and preset content.
    #[serde(default)]
    pub character: String,
    /// Comma- or newline-separated tags placed last.
    #[serde(default)]
    pub suffix_tags: String,
    /// Per-category enable flags. Categories absent here are enabled.
    #[serde(default)]
    pub enabled: HashMap<String, bool>,
}

fn default_prefix_tags() -> String {
    DEFAULT_PREFIX_TAGS.to_string()
}

impl Default for AssemblyRequest {
    fn default() -> Self {
        Self {
            selection: PresetSelection::default(),
            seed: 0,
            prefix_tags: default_prefix_tags(),
            character: String::new(),
            suffix_tags: String::new(),
            enabled: HashMap::new(),
        }
    }
}

impl AssemblyRequest {
    /// Create a request with the host widget defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a preset by name.
    #[must_use]
    pub fn with_preset(mut self, name: impl Into<String>) -> Self {
        self.selection = PresetSelection::Named(name.into());
        self
    }

    /// Draw the preset at random instead of naming one.
    #[must_use]
    pub fn with_randomized_preset(mut self) -> Self {
        self.selection = PresetSelection::Randomize;
        self
    }

    /// Set the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the leading tags.
    #[must_use]
    pub fn with_prefix_tags(mut self, tags: impl Into<String>) -> Self {
        self.prefix_tags = tags.into();
        self
    }

    /// Set the character tags.
    #[must_use]
    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = character.into();
        self
    }

    /// Set the trailing tags.
    #[must_use]
    pub fn with_suffix_tags(mut self, tags: impl Into<String>) -> Self {
        self.suffix_tags = tags.into();
        self
    }

    /// Enable or disable one category.
    #[must_use]
    pub fn with_category_enabled(mut self, category: impl Into<String>, enabled: bool) -> Self {
        self.enabled.insert(category.into(), enabled);
        self
    }

    /// Whether a category is enabled. Categories never mentioned are
    /// enabled.
    #[must_use]
    pub fn is_enabled(&self, category: &str) -> bool {
        self.enabled.get(category).copied().unwrap_or(true)
    }
}
