//! Layered tag templates and their rendering.
//!
//! A template file has up to three flat string mappings: `defaults` (lowest
//! precedence), `fixed`, and `dynamic` (highest precedence). Only `dynamic`
//! values are treated as expressions; they are rendered against a context
//! assembled from the resolved adapter and caller overrides.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{Error, Result};

/// Context values available to `dynamic` tag expressions.
pub type TemplateContext = serde_json::Map<String, Value>;

/// A parsed tag template document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTemplate {
    pub defaults: HashMap<String, String>,
    pub fixed: HashMap<String, String>,
    pub dynamic: HashMap<String, String>,
}

impl TagTemplate {
    /// Load a template from a YAML file. JSON works too, being a YAML subset.
    pub fn from_path(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| Error::TemplateLoad {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, &shown)
    }

    /// Parse a template from an in-memory document.
    pub fn from_str(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, shown_path: &str) -> Result<Self> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| Error::TemplateLoad {
                path: shown_path.to_string(),
                reason: e.to_string(),
            })?;

        let load_error = |reason: String| Error::TemplateLoad {
            path: shown_path.to_string(),
            reason,
        };

        let mapping = match document {
            serde_yaml::Value::Mapping(mapping) => mapping,
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            _ => return Err(load_error("template root must be a mapping".to_string())),
        };

        Ok(Self {
            defaults: layer(&mapping, "defaults").map_err(&load_error)?,
            fixed: layer(&mapping, "fixed").map_err(&load_error)?,
            dynamic: layer(&mapping, "dynamic").map_err(&load_error)?,
        })
    }

    /// Keys every resource is expected to carry: the `defaults` and `dynamic`
    /// layers. `fixed` keys are deliberately not part of the requirement set.
    pub fn required_keys(&self) -> BTreeSet<String> {
        self.defaults
            .keys()
            .chain(self.dynamic.keys())
            .cloned()
            .collect()
    }
}

/// Extract one layer as a flat string mapping.
///
/// A missing or null layer is empty. Scalar values are stringified the way
/// they were written; anything nested is rejected.
fn layer(
    mapping: &serde_yaml::Mapping,
    name: &str,
) -> std::result::Result<HashMap<String, String>, String> {
    let value = match mapping.get(name) {
        Some(value) => value,
        None => return Ok(HashMap::new()),
    };

    match value {
        serde_yaml::Value::Null => Ok(HashMap::new()),
        serde_yaml::Value::Mapping(entries) => {
            let mut out = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                let key = key
                    .as_str()
                    .ok_or_else(|| format!("layer '{name}' has a non-string key"))?;
                out.insert(key.to_string(), scalar(name, key, value)?);
            }
            Ok(out)
        }
        _ => Err(format!("layer '{name}' must be a mapping")),
    }
}

fn scalar(
    layer_name: &str,
    key: &str,
    value: &serde_yaml::Value,
) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(format!(
            "tag '{key}' in layer '{layer_name}' must be a flat string value"
        )),
    }
}

/// Renders `dynamic` expressions and folds the three layers together.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // A dynamic expression referencing a variable the context does not
        // provide must fail the render, not silently produce an empty string.
        handlebars.set_strict_mode(true);
        Self { handlebars }
    }

    /// Produce the desired tag mapping for one resource.
    ///
    /// Layer precedence is `dynamic` over `fixed` over `defaults`. The
    /// context is read only; rendering the same template against the same
    /// context always yields the same mapping.
    pub fn render(
        &self,
        template: &TagTemplate,
        context: &TemplateContext,
    ) -> Result<HashMap<String, String>> {
        let data = Value::Object(context.clone());

        let mut merged = template.defaults.clone();
        merged.extend(
            template
                .fixed
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        for (key, expression) in &template.dynamic {
            let rendered = self
                .handlebars
                .render_template(expression, &data)
                .map_err(|e| Error::UndefinedContextVariable {
                    key: key.clone(),
                    reason: e.to_string(),
                })?;
            merged.insert(key.clone(), rendered);
        }

        Ok(merged)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
