//! Prompt assembler - deterministic tag selection over a preset store.
//!
//! One assembly resolves the preset (explicit name or seeded draw),
//! splits the free-text fields into fragments, draws one tag per enabled
//! category in the store's category order, then deduplicates and renders
//! the final prompt. All randomness comes from a single generator seeded
//! from the request, consumed in a fixed order, so equal inputs always
//! produce equal prompts.
//!
//! # Example
//!
//! ```
//! use promptdeck::assembler::PromptAssembler;
//! use promptdeck::request::AssemblyRequest;
//! use promptdeck::store::PresetStore;
//!
//! let store = PresetStore::from_json_str(
//!     r#"{"Fantasy": {"style": ["oil painting"]}}"#,
//! )
//! .expect("valid preset json");
//!
//! let request = AssemblyRequest::new().with_preset("Fantasy").with_seed(42);
//! let prompt = PromptAssembler::new(&store).assemble(&request);
//! assert_eq!(prompt, "masterpiece, best quality, oil painting");
//! ```

use crate::fragment;
use crate::request::{AssemblyRequest, PresetSelection};
use crate::store::{PresetStore, NONE_PRESET};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// One tag contributed by a preset category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDraw {
    /// Category the tag was drawn from.
    pub category: String,
    /// The drawn tag, trimmed.
    pub tag: String,
}

/// Detailed result of one assembly.
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    /// The rendered prompt.
    pub prompt: String,
    /// The resolved preset name. Recorded even when the name matched no
    /// preset in the store.
    pub preset: String,
    /// String tags drawn from preset categories, in category order,
    /// before deduplication.
    pub draws: Vec<CategoryDraw>,
}

/// Deterministic assembler over one store snapshot.
pub struct PromptAssembler<'a> {
    store: &'a PresetStore,
}

impl<'a> PromptAssembler<'a> {
    /// Create an assembler for a store snapshot.
    #[must_use]
    pub fn new(store: &'a PresetStore) -> Self {
        Self { store }
    }

    /// Assemble the prompt for a request.
    ///
    /// This is total: selection misses and malformed preset content
    /// degrade to less output, never to an error.
    #[must_use]
    pub fn assemble(&self, request: &AssemblyRequest) -> String {
        self.assemble_report(request).prompt
    }

    /// Assemble the prompt and report how it was put together.
    #[must_use]
    pub fn assemble_report(&self, request: &AssemblyRequest) -> AssemblyReport {
        let mut rng = StdRng::seed_from_u64(request.seed);

        // Preset resolution is the first potential draw; category draws
        // follow in category order. Nothing else touches the generator.
        let preset = self.resolve_preset(request, &mut rng);

        let mut parts = fragment::split_tags(&request.prefix_tags);
        parts.extend(fragment::split_tags(&request.character));

        let mut draws = Vec::new();
        if preset != NONE_PRESET {
            if let Some(entry) = self.store.entry(&preset) {
                for category in self.store.categories() {
                    if !request.is_enabled(category) {
                        continue;
                    }
                    let Some(options) = entry.get(category).and_then(|v| v.as_array()) else {
                        continue;
                    };
                    if options.is_empty() {
                        continue;
                    }
                    let Some(chosen) = options.choose(&mut rng) else {
                        continue;
                    };
                    // Non-string or blank draws are consumed but add
                    // nothing to the prompt.
                    if let Some(tag) = chosen.as_str() {
                        let tag = tag.trim();
                        if !tag.is_empty() {
                            parts.push(tag.to_string());
                            draws.push(CategoryDraw {
                                category: category.clone(),
                                tag: tag.to_string(),
                            });
                        }
                    }
                }
            }
        }

        parts.extend(fragment::split_tags(&request.suffix_tags));

        let unique = fragment::dedup_tags(parts);
        let prompt = fragment::render(&unique);

        debug!(
            "Assembled prompt with preset '{}' ({} category draws)",
            preset,
            draws.len()
        );

        AssemblyReport {
            prompt,
            preset,
            draws,
        }
    }

    fn resolve_preset(&self, request: &AssemblyRequest, rng: &mut StdRng) -> String {
        match &request.selection {
            PresetSelection::Named(name) => name.clone(),
            PresetSelection::Randomize => {
                let candidates = self.store.selectable_names();
                match candidates.choose(rng) {
                    Some(name) => (*name).to_string(),
                    None => NONE_PRESET.to_string(),
                }
            }
        }
    }
}
