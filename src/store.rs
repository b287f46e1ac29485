//! Preset store - loads preset bundles and derives the category order.
//!
//! A preset resource is a JSON object mapping preset names to category
//! maps, each category holding a list of candidate tags:
//!
//! ```json
//! {
//!   "Fantasy": {
//!     "_description": "High fantasy scenes",
//!     "style": ["oil painting", "watercolor"],
//!     "setting": ["castle", "enchanted forest"]
//!   }
//! }
//! ```
//!
//! Loading never fails: a missing or malformed resource degrades to a
//! store holding only the `"None"` preset, with the failure logged and
//! recorded on the store. The reserved `"None"` preset is guaranteed to
//! exist after every load and never contributes tags.

use crate::error::{PresetError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the reserved no-content preset.
pub const NONE_PRESET: &str = "None";

/// Metadata key prefix; keys starting with this are never categories.
const META_PREFIX: char = '_';

const MISSING_NONE_DESCRIPTION: &str = "Default None preset";
const ERROR_NONE_DESCRIPTION: &str = "Error Loading Presets";
const FALLBACK_NONE_DESCRIPTION: &str = "Fallback None preset";

/// One preset value as it appears in the resource file.
///
/// Preset values are expected to be JSON objects, but the store stays
/// tolerant: any other shape is carried as raw JSON and simply yields no
/// categories or tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetValue {
    /// A category map in resource key order.
    Entry(IndexMap<String, Value>),
    /// Any non-object value, kept for diagnostics.
    Other(Value),
}

impl PresetValue {
    /// Get the category map, if this preset is a JSON object.
    #[must_use]
    pub fn as_entry(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Entry(map) => Some(map),
            Self::Other(_) => None,
        }
    }
}

/// Immutable snapshot of a preset resource.
///
/// Holds the presets in resource order, the derived category order, and
/// the load diagnostic when the resource could not be used.
///
/// # Example
///
/// ```
/// use promptdeck::store::PresetStore;
///
/// let store = PresetStore::from_json_str(
///     r#"{"Fantasy": {"style": ["oil painting"], "setting": ["castle"]}}"#,
/// )
/// .expect("valid preset json");
///
/// assert_eq!(store.categories(), ["style", "setting"]);
/// assert_eq!(store.preset_names(), ["Fantasy", "None"]);
/// ```
#[derive(Debug, Clone)]
pub struct PresetStore {
    /// Presets in resource key order, `"None"` always present.
    presets: IndexMap<String, PresetValue>,
    /// Derived category order (see [`PresetStore::categories`]).
    categories: Vec<String>,
    /// Diagnostic recorded when the resource failed to load or parse.
    load_error: Option<String>,
}

impl PresetStore {
    /// Load a preset resource from disk.
    ///
    /// This never fails: a missing or unreadable file and malformed JSON
    /// both degrade to the `"None"`-only fallback store, with the cause
    /// logged at warn level and retrievable via
    /// [`PresetStore::load_error`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use promptdeck::store::PresetStore;
    ///
    /// let store = PresetStore::load("presets.json");
    /// println!("{} presets available", store.len());
    /// ```
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) => {
                let err = PresetError::resource_load(path, source);
                let description = if err.is_missing_resource() {
                    warn!(
                        "Preset file not found at {}, using fallback 'None' preset",
                        path.display()
                    );
                    MISSING_NONE_DESCRIPTION
                } else {
                    warn!("{}", err);
                    ERROR_NONE_DESCRIPTION
                };
                return Self::fallback(description, err);
            }
        };

        match Self::from_json_str(&raw) {
            Ok(store) => {
                info!("Loaded {} presets from {}", store.len(), path.display());
                debug!("Derived category order: {:?}", store.categories());
                store
            }
            Err(err) => {
                warn!("{}", err);
                Self::fallback(ERROR_NONE_DESCRIPTION, err)
            }
        }
    }

    /// Parse a preset resource, failing on unusable input.
    ///
    /// This is the strict entry point behind [`PresetStore::load`]; the
    /// `check` command uses it to report problems instead of degrading.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::ResourceParse`] when the input is not valid
    /// JSON or the top level is not an object.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let presets: IndexMap<String, PresetValue> = serde_json::from_str(raw)?;
        Ok(Self::from_presets(presets))
    }

    /// Build a store from already-parsed presets.
    ///
    /// The `"None"` preset is appended when absent and the category order
    /// is derived, exactly as [`PresetStore::load`] would.
    #[must_use]
    pub fn from_presets(mut presets: IndexMap<String, PresetValue>) -> Self {
        if !presets.contains_key(NONE_PRESET) {
            let mut none_entry = IndexMap::new();
            none_entry.insert(
                "_description".to_string(),
                Value::String(FALLBACK_NONE_DESCRIPTION.to_string()),
            );
            presets.insert(NONE_PRESET.to_string(), PresetValue::Entry(none_entry));
        }

        let categories = Self::derive_categories(&presets);
        Self {
            presets,
            categories,
            load_error: None,
        }
    }

    /// Build the degraded store that stands in for an unusable resource.
    fn fallback(description: &str, err: PresetError) -> Self {
        let mut none_entry = IndexMap::new();
        none_entry.insert(
            "_description".to_string(),
            Value::String(description.to_string()),
        );
        let mut presets = IndexMap::new();
        presets.insert(NONE_PRESET.to_string(), PresetValue::Entry(none_entry));

        Self {
            presets,
            categories: Vec::new(),
            load_error: Some(err.to_string()),
        }
    }

    /// Derive the canonical category order.
    ///
    /// Categories are the non-metadata keys of every object-valued preset
    /// other than `"None"`. The first such preset fixes the leading
    /// order; categories it lacks follow in lexicographic order.
    fn derive_categories(presets: &IndexMap<String, PresetValue>) -> Vec<String> {
        let mut known: HashSet<String> = HashSet::new();
        for (name, value) in presets {
            if name == NONE_PRESET {
                continue;
            }
            if let Some(entry) = value.as_entry() {
                known.extend(
                    entry
                        .keys()
                        .filter(|k| !k.starts_with(META_PREFIX))
                        .cloned(),
                );
            }
        }

        let mut leading: Vec<String> = Vec::new();
        for (name, value) in presets {
            if name == NONE_PRESET {
                continue;
            }
            if let Some(entry) = value.as_entry() {
                leading = entry
                    .keys()
                    .filter(|k| !k.starts_with(META_PREFIX))
                    .cloned()
                    .collect();
                break;
            }
        }

        let leading_set: HashSet<&str> = leading.iter().map(String::as_str).collect();
        let mut remaining: Vec<String> = known
            .into_iter()
            .filter(|k| !leading_set.contains(k.as_str()))
            .collect();
        remaining.sort();

        let mut categories = leading;
        categories.extend(remaining);
        categories
    }

    /// All preset names in store order, `"None"` included.
    #[must_use]
    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// Preset names eligible for random selection (everything but `"None"`).
    #[must_use]
    pub fn selectable_names(&self) -> Vec<&str> {
        self.presets
            .keys()
            .map(String::as_str)
            .filter(|name| *name != NONE_PRESET)
            .collect()
    }

    /// Look up a preset by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PresetValue> {
        self.presets.get(name)
    }

    /// Look up a preset's category map, if the preset exists and is an object.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&IndexMap<String, Value>> {
        self.presets.get(name).and_then(PresetValue::as_entry)
    }

    /// The derived category order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of presets, `"None"` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the store holds no presets. Never true after a load.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Whether this store came from the degrade path.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.load_error.is_some()
    }

    /// The recorded load diagnostic, if the resource was unusable.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Report authoring problems that assembly would silently skip over.
    ///
    /// Findings cover presets that are not JSON objects, category values
    /// that are not lists, empty tag lists, non-string tags, and content
    /// under the reserved `"None"` preset.
    #[must_use]
    pub fn lint(&self) -> Vec<String> {
        let mut findings = Vec::new();

        for (name, value) in &self.presets {
            let Some(entry) = value.as_entry() else {
                findings.push(format!(
                    "preset '{}' is not a JSON object and never contributes tags",
                    name
                ));
                continue;
            };

            if name == NONE_PRESET {
                if entry.keys().any(|k| !k.starts_with(META_PREFIX)) {
                    findings.push(
                        "preset 'None' carries categories, but its content is never used"
                            .to_string(),
                    );
                }
                continue;
            }

            for (category, tags) in entry {
                if category.starts_with(META_PREFIX) {
                    continue;
                }
                match tags.as_array() {
                    None => findings.push(format!(
                        "preset '{}': category '{}' is not a list and is skipped at assembly",
                        name, category
                    )),
                    Some(list) if list.is_empty() => findings.push(format!(
                        "preset '{}': category '{}' has no tags",
                        name, category
                    )),
                    Some(list) => {
                        if list.iter().any(|tag| !tag.is_string()) {
                            findings.push(format!(
                                "preset '{}': category '{}' contains non-string tags",
                                name, category
                            ));
                        }
                    }
                }
            }
        }

        findings
    }
}
