//! Input schema - the host-facing declaration of assembly inputs.
//!
//! Hosts that render input widgets (node graphs, web forms) need to know
//! which inputs exist for a given store snapshot: the fixed fields every
//! assembly takes, plus one enable toggle per derived category. The
//! schema is a pure function of the store and serializes to JSON for
//! host integrations.

use crate::request::DEFAULT_PREFIX_TAGS;
use crate::store::{PresetStore, NONE_PRESET};
use serde::Serialize;

/// Widget shape and defaults for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InputSpec {
    /// Pick one option from a fixed list.
    Choice {
        options: Vec<String>,
        default: String,
    },
    /// On/off toggle.
    Boolean { default: bool },
    /// Free text, single- or multi-line.
    Text { multiline: bool, default: String },
    /// Unsigned integer with inclusive bounds.
    Integer { min: u64, max: u64, default: u64 },
}

/// One named input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputField {
    /// Field name as the host addresses it.
    pub name: String,
    #[serde(flatten)]
    pub spec: InputSpec,
}

impl InputField {
    fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            spec: InputSpec::Boolean { default },
        }
    }

    fn choice(name: impl Into<String>, options: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: InputSpec::Choice {
                options,
                default: default.into(),
            },
        }
    }

    fn text(name: impl Into<String>, multiline: bool, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: InputSpec::Text {
                multiline,
                default: default.into(),
            },
        }
    }

    fn integer(name: impl Into<String>, min: u64, max: u64, default: u64) -> Self {
        Self {
            name: name.into(),
            spec: InputSpec::Integer { min, max, default },
        }
    }
}

/// Declaration of every input one assembly accepts.
///
/// # Example
///
/// ```
/// use promptdeck::schema::InputSchema;
/// use promptdeck::store::PresetStore;
///
/// let store = PresetStore::from_json_str(
///     r#"{"Fantasy": {"style": ["oil painting"]}}"#,
/// )
/// .expect("valid preset json");
///
/// let schema = InputSchema::from_store(&store);
/// let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
/// assert!(names.contains(&"preset_name"));
/// assert!(names.contains(&"enable_style"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    /// Fields in host display order.
    pub fields: Vec<InputField>,
}

impl InputSchema {
    /// Build the schema for a store snapshot.
    ///
    /// The fixed fields come first, then one `enable_<category>` toggle
    /// per category in the store's category order.
    #[must_use]
    pub fn from_store(store: &PresetStore) -> Self {
        let options: Vec<String> = store
            .preset_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut fields = vec![
            InputField::boolean("randomize_preset", false),
            InputField::choice("preset_name", options, NONE_PRESET),
            InputField::text("prefix_tags", true, DEFAULT_PREFIX_TAGS),
            InputField::text("character", false, ""),
            InputField::text("suffix_tags", true, ""),
            InputField::integer("seed", 0, u64::MAX, 0),
        ];
        for category in store.categories() {
            fields.push(InputField::boolean(format!("enable_{}", category), true));
        }

        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> InputSchema {
        let store = PresetStore::from_json_str(json).expect("test json should parse");
        InputSchema::from_store(&store)
    }

    #[test]
    fn test_fixed_fields_in_order() {
        let schema = schema(r#"{"P": {"style": ["a"], "mood": ["b"]}}"#);
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "randomize_preset",
                "preset_name",
                "prefix_tags",
                "character",
                "suffix_tags",
                "seed",
                "enable_style",
                "enable_mood",
            ]
        );
    }

    #[test]
    fn test_preset_choice_lists_store_names() {
        let schema = schema(r#"{"A": {"style": ["a"]}, "B": {"style": ["b"]}}"#);
        let field = schema
            .fields
            .iter()
            .find(|f| f.name == "preset_name")
            .expect("preset_name field");
        match &field.spec {
            InputSpec::Choice { options, default } => {
                assert_eq!(options, &["A", "B", "None"]);
                assert_eq!(default, "None");
            }
            other => panic!("unexpected spec: {:?}", other),
        }
    }

    #[test]
    fn test_widget_defaults() {
        let schema = schema(r#"{"P": {"style": ["a"]}}"#);

        let prefix = schema
            .fields
            .iter()
            .find(|f| f.name == "prefix_tags")
            .expect("prefix_tags field");
        assert_eq!(
            prefix.spec,
            InputSpec::Text {
                multiline: true,
                default: "masterpiece, best quality".to_string(),
            }
        );

        let seed = schema
            .fields
            .iter()
            .find(|f| f.name == "seed")
            .expect("seed field");
        assert_eq!(
            seed.spec,
            InputSpec::Integer {
                min: 0,
                max: u64::MAX,
                default: 0,
            }
        );

        let toggle = schema
            .fields
            .iter()
            .find(|f| f.name == "enable_style")
            .expect("enable_style field");
        assert_eq!(toggle.spec, InputSpec::Boolean { default: true });
    }

    #[test]
    fn test_none_only_store_schema_has_no_toggles() {
        let schema = schema(r#"{"None": {"_description": "x"}}"#);
        assert!(schema
            .fields
            .iter()
            .all(|f| !f.name.starts_with("enable_")));
    }

    #[test]
    fn test_schema_serializes_with_kind_tags() {
        let schema = schema(r#"{"P": {"style": ["a"]}}"#);
        let value = serde_json::to_value(&schema).expect("schema serializes");

        let fields = value["fields"].as_array().expect("fields array");
        assert_eq!(fields[0]["kind"], "boolean");
        assert_eq!(fields[1]["kind"], "choice");
        assert_eq!(fields[5]["kind"], "integer");
        assert_eq!(fields[5]["max"], u64::MAX);
    }
}
