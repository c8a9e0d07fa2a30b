//! Order builder
//!
//! Holds a single `ORDER BY` fragment. Setters replace it, [`Ordering::append`]
//! adds another comma-separated key.

use serde_json::Value;
use type_mapping::{render_literal, Dialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ordering {
    fragment: String,
    dialect: Dialect,
}

impl Ordering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialect used by [`Ordering::random`]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn order_by(self, fragment: &str) -> Self {
        self.set(fragment.trim())
    }

    pub fn order_by_if(self, condition: bool, fragment: &str) -> Self {
        if condition {
            self.order_by(fragment)
        } else {
            self
        }
    }

    pub fn sort(self, field: &str, order: SortOrder) -> Self {
        let field = field.trim();
        if field.is_empty() {
            return self;
        }
        self.set(&format!("{} {}", field, order.to_sql()))
    }

    pub fn ascending(self, field: &str) -> Self {
        self.sort(field, SortOrder::Asc)
    }

    pub fn ascending_if(self, condition: bool, field: &str) -> Self {
        if condition {
            self.ascending(field)
        } else {
            self
        }
    }

    pub fn descending(self, field: &str) -> Self {
        self.sort(field, SortOrder::Desc)
    }

    pub fn descending_if(self, condition: bool, field: &str) -> Self {
        if condition {
            self.descending(field)
        } else {
            self
        }
    }

    /// Several keys joined with `, `; empty entries are dropped
    pub fn multiple<S: AsRef<str>>(self, fragments: &[S]) -> Self {
        let joined = fragments
            .iter()
            .map(|f| f.as_ref().trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        self.set(&joined)
    }

    /// Rank rows by the position of `field`'s value in `values`:
    /// `CASE field WHEN v1 THEN 0 WHEN v2 THEN 1 ... END`
    pub fn by_field_order(self, field: &str, values: &[Value]) -> Self {
        let field = field.trim();
        if field.is_empty() || values.is_empty() {
            return self;
        }
        let arms = values
            .iter()
            .enumerate()
            .map(|(rank, value)| format!("WHEN {} THEN {}", render_literal(value), rank))
            .collect::<Vec<_>>()
            .join(" ");
        self.set(&format!("CASE {} {} END", field, arms))
    }

    pub fn by_field_order_if(self, condition: bool, field: &str, values: &[Value]) -> Self {
        if condition {
            self.by_field_order(field, values)
        } else {
            self
        }
    }

    /// Random ordering using the configured dialect's function
    pub fn random(self) -> Self {
        let function = self.dialect.random_function();
        self.set(function)
    }

    pub fn random_if(self, condition: bool) -> Self {
        if condition {
            self.random()
        } else {
            self
        }
    }

    /// Add another key after whatever is already set
    pub fn append(mut self, fragment: &str) -> Self {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return self;
        }
        if !self.fragment.is_empty() {
            self.fragment.push_str(", ");
        }
        self.fragment.push_str(fragment);
        self
    }

    pub fn append_if(self, condition: bool, fragment: &str) -> Self {
        if condition {
            self.append(fragment)
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// The ordering keys without the `ORDER BY` keyword
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// `ORDER BY <fragment>`, or an empty string when nothing is set
    pub fn build(&self) -> String {
        if self.fragment.is_empty() {
            return String::new();
        }
        format!("ORDER BY {}", self.fragment)
    }

    fn set(mut self, fragment: &str) -> Self {
        if fragment.is_empty() {
            tracing::trace!("empty ordering ignored");
            return self;
        }
        self.fragment = fragment.to_string();
        self
    }
}
