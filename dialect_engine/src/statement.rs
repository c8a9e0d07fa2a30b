//! Statement normalization
//!
//! Turns a table name, bare predicate or full statement into a full
//! `SELECT`. A neutral `WHERE 1=1` goes in front of any trailing clause so
//! the caller's filter can always be appended with `AND`, and filter values
//! are spliced into the parameter list at the matching position.

use crate::classifier::ClauseProfile;
use crate::errors::PaginationError;
use crate::request::PaginationRequest;
use crate::scanner::{Scan, TRAILING_CLAUSES};
use serde_json::Value;
use type_mapping::{count_placeholders, Dialect};

const FROM_KEYWORD: &str = " FROM ";
const WHERE_KEYWORD: &str = " WHERE ";
const SOURCE_ALIAS: &str = "pagehaus_source";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statement {
    pub sql: String,
    pub parameters: Vec<Value>,
}

pub(crate) fn normalize(
    request: &PaginationRequest,
    profile: &ClauseProfile,
    fragment: &str,
    values: Vec<Value>,
    dialect: Dialect,
) -> Result<Statement, PaginationError> {
    let mut parameters = request.parameters.clone();
    let base = base_statement(request, profile)?;

    // Injecting into one branch of a set operation would filter only that
    // branch, so the whole statement becomes a derived table instead.
    if profile.has_set_operation {
        if fragment.is_empty() {
            return Ok(Statement { sql: base, parameters });
        }
        tracing::debug!(%dialect, "wrapping set operation to apply filter");
        parameters.extend(values);
        let sql = format!(
            "SELECT * FROM ({}) {} WHERE {}",
            base,
            dialect.derived_table_alias(SOURCE_ALIAS),
            fragment
        );
        return Ok(Statement { sql, parameters });
    }

    let scan = Scan::new(&base);
    let from = scan
        .find_top_level(FROM_KEYWORD, 0)
        .ok_or_else(|| PaginationError::MissingFromClause(base.clone()))?;
    let where_pos = scan.find_top_level(WHERE_KEYWORD, from);
    let body_start = match where_pos {
        Some(pos) => pos + WHERE_KEYWORD.len(),
        None => from + FROM_KEYWORD.len(),
    };
    let tail = scan
        .find_first_top_level(TRAILING_CLAUSES, body_start)
        .unwrap_or(base.len());

    if fragment.is_empty() {
        let sql = match where_pos {
            None if tail < base.len() => {
                format!("{} WHERE 1=1{}", base[..tail].trim_end(), &base[tail..])
            }
            _ => base,
        };
        return Ok(Statement { sql, parameters });
    }

    let mut head = match where_pos {
        None => format!("{} WHERE 1=1", base[..tail].trim_end()),
        Some(pos) => {
            let body = base[body_start..tail].trim();
            if Scan::new(body).find_top_level(" OR ", 0).is_some() {
                format!("{} WHERE ({})", &base[..pos], body)
            } else {
                base[..tail].trim_end().to_string()
            }
        }
    };

    let at = count_placeholders(&head).min(parameters.len());
    head.push_str(" AND (");
    head.push_str(fragment);
    head.push(')');
    parameters.splice(at..at, values);
    head.push_str(&base[tail..]);

    Ok(Statement {
        sql: head,
        parameters,
    })
}

fn base_statement(
    request: &PaginationRequest,
    profile: &ClauseProfile,
) -> Result<String, PaginationError> {
    let source = request.source.trim().trim_end_matches(';').trim_end();

    if profile.has_select {
        if !profile.has_from {
            return Err(PaginationError::MissingFromClause(source.to_string()));
        }
        return Ok(source.to_string());
    }
    if Scan::new(source).starts_with("FROM ") {
        return Ok(format!("SELECT * {}", source));
    }
    if source.is_empty() {
        let table = required_table(request, "<empty source>")?;
        return Ok(format!("SELECT * FROM {}", table));
    }
    if is_table_identifier(source) {
        return Ok(format!("SELECT * FROM {}", source));
    }
    let table = required_table(request, source)?;
    Ok(format!("SELECT * FROM {} WHERE {}", table, source))
}

fn required_table<'a>(
    request: &'a PaginationRequest,
    source: &str,
) -> Result<&'a str, PaginationError> {
    request
        .table
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| PaginationError::MissingTable(source.to_string()))
}

fn is_table_identifier(source: &str) -> bool {
    !source.is_empty()
        && source
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '"' | '`' | '[' | ']' | '$'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use serde_json::json;

    fn run(
        request: &PaginationRequest,
        fragment: &str,
        values: Vec<Value>,
    ) -> Result<Statement, PaginationError> {
        let profile = classify(&request.source);
        normalize(request, &profile, fragment, values, Dialect::MySql)
    }

    #[test]
    fn test_table_name_expands_to_select() {
        let statement = run(&PaginationRequest::new("users"), "", vec![]).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users");
    }

    #[test]
    fn test_table_name_with_filter_gets_neutral_where() {
        let statement = run(&PaginationRequest::new("users"), "age > ?", vec![json!(18)]).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users WHERE 1=1 AND (age > ?)");
        assert_eq!(statement.parameters, vec![json!(18)]);
    }

    #[test]
    fn test_bare_predicate_uses_table() {
        let request = PaginationRequest::new("age > ?")
            .table("users")
            .parameters(vec![json!(18)]);
        let statement = run(&request, "", vec![]).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users WHERE age > ?");
        assert_eq!(statement.parameters, vec![json!(18)]);
    }

    #[test]
    fn test_bare_predicate_without_table_fails() {
        let request = PaginationRequest::new("age > 18");
        assert_eq!(
            run(&request, "", vec![]),
            Err(PaginationError::MissingTable("age > 18".to_string()))
        );
    }

    #[test]
    fn test_select_without_from_fails() {
        let request = PaginationRequest::new("SELECT 1");
        assert!(matches!(
            run(&request, "", vec![]),
            Err(PaginationError::MissingFromClause(_))
        ));
    }

    #[test]
    fn test_where_inserted_before_trailing_clauses() {
        let request = PaginationRequest::new("SELECT dept, COUNT(*) FROM emp GROUP BY dept ORDER BY dept;");
        let statement = run(&request, "", vec![]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT dept, COUNT(*) FROM emp WHERE 1=1 GROUP BY dept ORDER BY dept"
        );
    }

    #[test]
    fn test_existing_where_left_alone_without_filter() {
        let request = PaginationRequest::new("SELECT * FROM users WHERE a = 1 OR b = 2 ORDER BY id");
        let statement = run(&request, "", vec![]).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users WHERE a = 1 OR b = 2 ORDER BY id");
    }

    #[test]
    fn test_filter_appended_and_or_body_parenthesized() {
        let request = PaginationRequest::new("SELECT * FROM users WHERE a = ? OR b = ? ORDER BY id")
            .parameters(vec![json!(1), json!(2)]);
        let statement = run(&request, "tenant = ?", vec![json!(9)]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT * FROM users WHERE (a = ? OR b = ?) AND (tenant = ?) ORDER BY id"
        );
        assert_eq!(statement.parameters, vec![json!(1), json!(2), json!(9)]);
    }

    #[test]
    fn test_filter_values_spliced_before_having_values() {
        let request = PaginationRequest::new(
            "SELECT dept FROM emp WHERE salary > ? GROUP BY dept HAVING COUNT(*) > ?",
        )
        .parameters(vec![json!(1000), json!(3)]);
        let statement = run(&request, "active = ?", vec![json!(true)]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT dept FROM emp WHERE salary > ? AND (active = ?) GROUP BY dept HAVING COUNT(*) > ?"
        );
        assert_eq!(statement.parameters, vec![json!(1000), json!(true), json!(3)]);
    }

    #[test]
    fn test_subquery_where_is_not_used_for_injection() {
        let request = PaginationRequest::new("SELECT * FROM (SELECT * FROM t WHERE x = 1) s ORDER BY s.id");
        let statement = run(&request, "s.y = ?", vec![json!(2)]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT * FROM (SELECT * FROM t WHERE x = 1) s WHERE 1=1 AND (s.y = ?) ORDER BY s.id"
        );
    }

    #[test]
    fn test_set_operation_wrapped_for_filter() {
        let request = PaginationRequest::new("SELECT a FROM t1 UNION SELECT a FROM t2");
        let statement = run(&request, "a > ?", vec![json!(5)]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT * FROM (SELECT a FROM t1 UNION SELECT a FROM t2) AS pagehaus_source WHERE a > ?"
        );
        assert_eq!(statement.parameters, vec![json!(5)]);
    }

    #[test]
    fn test_partial_from_statement() {
        let request = PaginationRequest::new("FROM users u WHERE u.active = 1");
        let statement = run(&request, "", vec![]).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users u WHERE u.active = 1");
    }
}
