//! Predicate builder
//!
//! Accumulates boolean SQL fragments with their positional (`?`) values.
//! Fragments are joined with `AND` when built.

use crate::errors::BuilderError;
use serde_json::Value;

/// Comparison operators for single-value conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,  // =
    Ne,  // !=
    Gt,  // >
    Gte, // >=
    Lt,  // <
    Lte, // <=
}

impl Comparison {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// Ordered list of `WHERE` fragments and their values.
///
/// Every operation returns the builder so calls can be chained, and none of
/// them fail: empty fields, empty patterns and empty or non-sequence values
/// are skipped. A builder created with [`Predicate::strict`] still skips them
/// but remembers why, and [`Predicate::try_build`] reports the first one.
///
/// Note that [`Predicate::or`] and [`Predicate::or_group`] only combine with
/// the most recently added fragment:
///
/// ```
/// use clause_builder::Predicate;
/// use serde_json::json;
///
/// let (sql, _) = Predicate::new()
///     .add("a = ?", vec![json!(1)])
///     .add("b = ?", vec![json!(2)])
///     .or("c = ?", vec![json!(3)])
///     .build();
/// assert_eq!(sql, "a = ? AND (b = ?) OR (c = ?)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    pub(crate) fragments: Vec<String>,
    pub(crate) values: Vec<Value>,
    strict: bool,
    rejected: Vec<BuilderError>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that records ignored input for [`Predicate::try_build`]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Append a fragment, joined to the others with `AND`
    pub fn add(self, fragment: impl Into<String>, values: Vec<Value>) -> Self {
        let fragment: String = fragment.into();
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return self.reject("add", "empty fragment");
        }
        let fragment = fragment.to_string();
        self.push(fragment, values)
    }

    pub fn add_if(self, condition: bool, fragment: impl Into<String>, values: Vec<Value>) -> Self {
        if condition {
            self.add(fragment, values)
        } else {
            self
        }
    }

    /// Rewrite the last fragment as `(last) OR (fragment)`.
    /// With no previous fragment this behaves like [`Predicate::add`].
    pub fn or(mut self, fragment: impl Into<String>, values: Vec<Value>) -> Self {
        let fragment: String = fragment.into();
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return self.reject("or", "empty fragment");
        }
        match self.fragments.pop() {
            Some(last) => {
                self.fragments.push(format!("({}) OR ({})", last, fragment));
                self.values.extend(values);
                self
            }
            None => {
                let fragment = fragment.to_string();
                self.push(fragment, values)
            }
        }
    }

    pub fn or_if(self, condition: bool, fragment: impl Into<String>, values: Vec<Value>) -> Self {
        if condition {
            self.or(fragment, values)
        } else {
            self
        }
    }

    /// `field <op> ?`
    pub fn compare(self, field: &str, op: Comparison, value: impl Into<Value>) -> Self {
        if field.trim().is_empty() {
            return self.reject("compare", "empty field");
        }
        self.push(format!("{} {} ?", field, op.to_sql()), vec![value.into()])
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Eq, value)
    }

    pub fn ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Ne, value)
    }

    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Gt, value)
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Gte, value)
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Lt, value)
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, Comparison::Lte, value)
    }

    /// `field IN (?, ?, ...)`, one placeholder per element.
    /// Skipped when `values` is empty or not a sequence.
    pub fn in_values(self, field: &str, values: impl Into<Value>) -> Self {
        self.membership("in_values", field, "IN", values.into())
    }

    pub fn not_in_values(self, field: &str, values: impl Into<Value>) -> Self {
        self.membership("not_in_values", field, "NOT IN", values.into())
    }

    pub fn between(self, field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.range("between", field, "BETWEEN", low.into(), high.into())
    }

    pub fn not_between(self, field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.range("not_between", field, "NOT BETWEEN", low.into(), high.into())
    }

    /// `field LIKE ?`, skipped when the pattern is empty
    pub fn like(self, field: &str, pattern: &str) -> Self {
        self.pattern("like", field, "LIKE", pattern)
    }

    pub fn not_like(self, field: &str, pattern: &str) -> Self {
        self.pattern("not_like", field, "NOT LIKE", pattern)
    }

    pub fn is_null(self, field: &str) -> Self {
        if field.trim().is_empty() {
            return self.reject("is_null", "empty field");
        }
        self.push(format!("{} IS NULL", field), Vec::new())
    }

    pub fn is_not_null(self, field: &str) -> Self {
        if field.trim().is_empty() {
            return self.reject("is_not_null", "empty field");
        }
        self.push(format!("{} IS NOT NULL", field), Vec::new())
    }

    /// `EXISTS (subquery)`
    pub fn exists(self, subquery: &str, values: Vec<Value>) -> Self {
        self.existence("exists", "EXISTS", subquery, values)
    }

    pub fn not_exists(self, subquery: &str, values: Vec<Value>) -> Self {
        self.existence("not_exists", "NOT EXISTS", subquery, values)
    }

    /// Insert a fragment verbatim (no trimming). The caller owns its correctness.
    pub fn raw(self, fragment: impl Into<String>, values: Vec<Value>) -> Self {
        let fragment: String = fragment.into();
        if fragment.trim().is_empty() {
            return self.reject("raw", "empty fragment");
        }
        self.push(fragment, values)
    }

    /// Build a nested predicate and append it as `(a AND b ...)`.
    /// Nothing is appended when the sub-builder stays empty.
    pub fn group<F>(self, build: F) -> Self
    where
        F: FnOnce(Predicate) -> Predicate,
    {
        let sub = build(self.child());
        self.merge_group("group", sub, false)
    }

    /// Like [`Predicate::group`], but OR'd with the last fragment
    pub fn or_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Predicate) -> Predicate,
    {
        let sub = build(self.child());
        self.merge_group("or_group", sub, true)
    }

    /// Fragments joined with `AND`, and the flattened values
    pub fn build(&self) -> (String, Vec<Value>) {
        if self.fragments.is_empty() {
            return (String::new(), Vec::new());
        }
        (self.fragments.join(" AND "), self.values.clone())
    }

    /// Same as [`Predicate::build`], but a strict builder fails on the first ignored input
    pub fn try_build(&self) -> Result<(String, Vec<Value>), BuilderError> {
        match self.rejected.first() {
            Some(err) if self.strict => Err(err.clone()),
            _ => Ok(self.build()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of top-level fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Inputs skipped so far (only tracked in strict mode)
    pub fn rejected(&self) -> &[BuilderError] {
        &self.rejected
    }

    fn push(mut self, fragment: String, values: Vec<Value>) -> Self {
        self.fragments.push(fragment);
        self.values.extend(values);
        self
    }

    fn reject(mut self, operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::trace!(operation, reason = %reason, "predicate input ignored");
        if self.strict {
            self.rejected.push(BuilderError::rejected(operation, reason));
        }
        self
    }

    fn child(&self) -> Predicate {
        if self.strict {
            Predicate::strict()
        } else {
            Predicate::new()
        }
    }

    fn membership(
        self,
        operation: &'static str,
        field: &str,
        keyword: &str,
        values: Value,
    ) -> Self {
        if field.trim().is_empty() {
            return self.reject(operation, "empty field");
        }
        let items = match values {
            Value::Array(items) if !items.is_empty() => items,
            Value::Array(_) => return self.reject(operation, "empty sequence"),
            other => {
                let reason = format!("expected a sequence, got {}", value_kind(&other));
                return self.reject(operation, reason);
            }
        };
        let placeholders = vec!["?"; items.len()].join(", ");
        self.push(format!("{} {} ({})", field, keyword, placeholders), items)
    }

    fn range(
        self,
        operation: &'static str,
        field: &str,
        keyword: &str,
        low: Value,
        high: Value,
    ) -> Self {
        if field.trim().is_empty() {
            return self.reject(operation, "empty field");
        }
        self.push(format!("{} {} ? AND ?", field, keyword), vec![low, high])
    }

    fn pattern(self, operation: &'static str, field: &str, keyword: &str, pattern: &str) -> Self {
        if field.trim().is_empty() {
            return self.reject(operation, "empty field");
        }
        if pattern.is_empty() {
            return self.reject(operation, "empty pattern");
        }
        self.push(
            format!("{} {} ?", field, keyword),
            vec![Value::String(pattern.to_string())],
        )
    }

    fn existence(
        self,
        operation: &'static str,
        keyword: &str,
        subquery: &str,
        values: Vec<Value>,
    ) -> Self {
        let subquery = subquery.trim();
        if subquery.is_empty() {
            return self.reject(operation, "empty subquery");
        }
        self.push(format!("{} ({})", keyword, subquery), values)
    }

    fn merge_group(mut self, operation: &'static str, sub: Predicate, or: bool) -> Self {
        self.rejected.extend(sub.rejected);
        if sub.fragments.is_empty() {
            return self.reject(operation, "group produced no fragments");
        }
        let body = format!("({})", sub.fragments.join(" AND "));
        let combined = match (or, self.fragments.pop()) {
            (true, Some(last)) => format!("({}) OR {}", last, body),
            (false, Some(last)) => {
                self.fragments.push(last);
                body
            }
            (_, None) => body,
        };
        self.push(combined, sub.values)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
