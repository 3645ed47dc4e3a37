//! Configuration - Options, class names and per-element overrides.
//!
//! Resolution order, later wins:
//! 1. built-in defaults (`persist = true`, `multiple = false`, schema `data-relapse`)
//! 2. caller [`Options`] (the nested class map is merged field by field)
//! 3. `{schema}-persist` / `{schema}-multiple` attributes on the container
//!
//! # Example
//!
//! ```ignore
//! let options = Options::from_json(r#"{ "multiple": true, "classes": { "opened": "is-open" } }"#)?;
//! relapse.create("#faq", options)?;
//! ```

use serde::{Deserialize, Deserializer};

use crate::dom::Element;
use crate::error::{RelapseError, Result};

/// Default attribute-name prefix.
pub const DEFAULT_SCHEMA: &str = "data-relapse";

// =============================================================================
// Class Names
// =============================================================================

/// Presentational class names written onto triggers and panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classes {
    /// Marks a fold that should start open; consumed on reconciliation.
    pub initial: String,
    /// Trigger, while expanded.
    pub opened: String,
    /// Trigger, while disabled.
    pub disabled: String,
    /// Panel, while expanded.
    pub expanded: String,
    /// Trigger, while focused.
    pub focused: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            initial: "initial".to_string(),
            opened: "opened".to_string(),
            disabled: "disabled".to_string(),
            expanded: "expanded".to_string(),
            focused: "focused".to_string(),
        }
    }
}

/// Caller overrides for [`Classes`]; unset fields keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassOverrides {
    pub initial: Option<String>,
    pub opened: Option<String>,
    pub disabled: Option<String>,
    pub expanded: Option<String>,
    pub focused: Option<String>,
}

impl Classes {
    fn merge(&mut self, overrides: &ClassOverrides) {
        let slots = [
            (&mut self.initial, &overrides.initial),
            (&mut self.opened, &overrides.opened),
            (&mut self.disabled, &overrides.disabled),
            (&mut self.expanded, &overrides.expanded),
            (&mut self.focused, &overrides.focused),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Caller-supplied construction options. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub persist: Option<bool>,
    pub multiple: Option<bool>,
    /// `Some(None)` (JSON `null`) disables the schema entirely.
    #[serde(deserialize_with = "present")]
    pub schema: Option<Option<String>>,
    pub classes: ClassOverrides,
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = Some(persist);
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn schema(mut self, schema: Option<&str>) -> Self {
        self.schema = Some(schema.map(str::to_string));
        self
    }

    pub fn classes(mut self, classes: ClassOverrides) -> Self {
        self.classes = classes;
        self
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Fully resolved configuration of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Forbid closing the last expanded fold.
    pub persist: bool,
    /// Allow more than one fold expanded at once.
    pub multiple: bool,
    /// Attribute-name prefix; `None` disables attribute annotations.
    pub schema: Option<String>,
    pub classes: Classes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            persist: true,
            multiple: false,
            schema: Some(DEFAULT_SCHEMA.to_string()),
            classes: Classes::default(),
        }
    }
}

impl Config {
    /// Merge defaults, `options` and the container's boolean overrides.
    pub fn resolve(options: &Options, element: &Element) -> Result<Self> {
        let mut config = Self::default();

        if let Some(persist) = options.persist {
            config.persist = persist;
        }
        if let Some(multiple) = options.multiple {
            config.multiple = multiple;
        }
        if let Some(schema) = &options.schema {
            config.schema = schema.clone();
        }
        config.classes.merge(&options.classes);

        if let Some(name) = config.annotation("persist") {
            if let Some(value) = element.attribute(&name) {
                config.persist = parse_boolean(&name, &value)?;
            }
        }
        if let Some(name) = config.annotation("multiple") {
            if let Some(value) = element.attribute(&name) {
                config.multiple = parse_boolean(&name, &value)?;
            }
        }

        Ok(config)
    }

    /// `{schema}-{suffix}`, or `None` without a schema.
    pub fn annotation(&self, suffix: &str) -> Option<String> {
        self.schema.as_ref().map(|schema| format!("{}-{}", schema, suffix))
    }

    /// Attribute holding the instance key (the schema itself).
    pub fn instance_attribute(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Attribute naming a fold for `FoldRef::Name` lookups.
    pub fn fold_attribute(&self) -> Option<String> {
        self.annotation("fold")
    }
}

/// Parse a literal `true`/`false` attribute value (surrounding whitespace ignored).
pub fn parse_boolean(attribute: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(RelapseError::InvalidBooleanAttribute {
            attribute: attribute.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::resolve(&Options::new(), &Element::new("div")).unwrap();
        assert!(config.persist);
        assert!(!config.multiple);
        assert_eq!(config.schema.as_deref(), Some("data-relapse"));
        assert_eq!(config.classes, Classes::default());
        assert_eq!(config.fold_attribute().as_deref(), Some("data-relapse-fold"));
    }

    #[test]
    fn test_classes_deep_merge() {
        let options = Options::new().classes(ClassOverrides {
            opened: Some("is-open".into()),
            ..ClassOverrides::default()
        });
        let config = Config::resolve(&options, &Element::new("div")).unwrap();
        assert_eq!(config.classes.opened, "is-open");
        assert_eq!(config.classes.expanded, "expanded");
    }

    #[test]
    fn test_attribute_overrides_beat_options() {
        let el = Element::new("div")
            .with_attribute("data-relapse-multiple", " true ")
            .with_attribute("data-relapse-persist", "false");
        let config = Config::resolve(&Options::new().multiple(false), &el).unwrap();
        assert!(config.multiple);
        assert!(!config.persist);
    }

    #[test]
    fn test_custom_schema_prefix() {
        let el = Element::new("div")
            .with_attribute("data-acc-multiple", "true")
            .with_attribute("data-relapse-persist", "false");
        let config = Config::resolve(&Options::new().schema(Some("data-acc")), &el).unwrap();
        assert!(config.multiple);
        // Attribute under the default prefix is not recognised
        assert!(config.persist);
    }

    #[test]
    fn test_invalid_boolean_attribute() {
        let el = Element::new("div").with_attribute("data-relapse-multiple", "maybe");
        let err = Config::resolve(&Options::new(), &el).unwrap_err();
        assert_eq!(
            err,
            RelapseError::InvalidBooleanAttribute {
                attribute: "data-relapse-multiple".into(),
                value: "maybe".into(),
            }
        );
    }

    #[test]
    fn test_null_schema_disables_annotations() {
        let options = Options::from_json(r#"{ "schema": null }"#).unwrap();
        assert_eq!(options.schema, Some(None));

        let el = Element::new("div").with_attribute("data-relapse-multiple", "maybe");
        let config = Config::resolve(&options, &el).unwrap();
        assert!(config.schema.is_none());
        assert!(config.fold_attribute().is_none());
        assert!(!config.multiple);
    }

    #[test]
    fn test_options_from_json() {
        let options = Options::from_json(
            r#"{ "persist": false, "multiple": true, "classes": { "focused": "has-focus" } }"#,
        )
        .unwrap();
        assert_eq!(options.persist, Some(false));
        assert_eq!(options.multiple, Some(true));
        assert_eq!(options.schema, None);
        assert_eq!(options.classes.focused.as_deref(), Some("has-focus"));

        assert!(Options::from_json(r#"{ "unknown": 1 }"#).is_err());
    }
}
