//! Filter inputs accepted by the pagination engine
//!
//! A filter is either nothing, a raw fragment, a key-value mapping or an
//! already-built [`Predicate`]. All of them render to a `?`-placeholder
//! fragment and its values.

use crate::errors::BuilderError;
use crate::predicate::{value_kind, Predicate};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub enum Filter {
    #[default]
    None,
    Raw {
        fragment: String,
        values: Vec<Value>,
    },
    /// Rendered as `field = ?` terms joined by `AND`, in sorted key order
    Fields(BTreeMap<String, Value>),
    Predicate(Predicate),
}

impl Filter {
    pub fn raw(fragment: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Raw {
            fragment: fragment.into(),
            values,
        }
    }

    pub fn fields<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Fields(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Render to `(fragment, values)`; an empty fragment means no filter
    pub fn render(&self) -> Result<(String, Vec<Value>), BuilderError> {
        match self {
            Filter::None => Ok((String::new(), Vec::new())),
            Filter::Raw { fragment, values } => {
                let fragment = fragment.trim();
                if fragment.is_empty() {
                    return Ok((String::new(), Vec::new()));
                }
                Ok((fragment.to_string(), values.clone()))
            }
            Filter::Fields(fields) => Self::render_fields(fields),
            Filter::Predicate(predicate) => predicate.try_build(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Filter::None => true,
            Filter::Raw { fragment, .. } => fragment.trim().is_empty(),
            Filter::Fields(fields) => fields.is_empty(),
            Filter::Predicate(predicate) => predicate.is_empty(),
        }
    }

    fn render_fields(
        fields: &BTreeMap<String, Value>,
    ) -> Result<(String, Vec<Value>), BuilderError> {
        let mut predicate = Predicate::new();
        for (field, value) in fields {
            predicate = match value {
                Value::Null => predicate.is_null(field),
                Value::Array(_) => predicate.in_values(field, value.clone()),
                Value::Object(_) => {
                    return Err(BuilderError::UnsupportedFilter {
                        field: field.clone(),
                        kind: value_kind(value),
                    })
                }
                scalar => predicate.eq(field, scalar.clone()),
            };
        }
        Ok(predicate.build())
    }
}

impl From<Predicate> for Filter {
    fn from(predicate: Predicate) -> Self {
        Filter::Predicate(predicate)
    }
}

impl From<&str> for Filter {
    fn from(fragment: &str) -> Self {
        Filter::raw(fragment, Vec::new())
    }
}

impl From<String> for Filter {
    fn from(fragment: String) -> Self {
        Filter::raw(fragment, Vec::new())
    }
}

impl From<BTreeMap<String, Value>> for Filter {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Filter::Fields(fields)
    }
}

/// Keys are re-ordered, so the rendered fragment is deterministic
impl From<HashMap<String, Value>> for Filter {
    fn from(fields: HashMap<String, Value>) -> Self {
        Filter::Fields(fields.into_iter().collect())
    }
}
