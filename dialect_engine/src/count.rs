//! Count statement derivation

use crate::classifier::{contains_subquery, ClauseProfile};
use crate::scanner::{Scan, LIMITING_CLAUSES, ROW_LIMITING_CLAUSES};
use type_mapping::{count_placeholders, Dialect};

const ORDER_BY_KEYWORD: &str = " ORDER BY ";

/// Remove the top-level `ORDER BY` segment, up to the next limiting clause.
///
/// Returns `None` when the segment has to stay: it holds placeholders, which
/// would shift every later parameter, or a row limit follows it, whose rows
/// depend on the ordering.
pub(crate) fn strip_order_by(sql: &str) -> Option<String> {
    let scan = Scan::new(sql);
    let Some(start) = scan.find_top_level(ORDER_BY_KEYWORD, 0) else {
        return Some(sql.to_string());
    };
    let after = start + ORDER_BY_KEYWORD.len();
    let end = scan
        .find_first_top_level(LIMITING_CLAUSES, after)
        .unwrap_or(sql.len());
    if count_placeholders(&sql[start..end]) > 0 {
        return None;
    }
    if scan.find_first_top_level(ROW_LIMITING_CLAUSES, after).is_some() {
        return None;
    }
    Some(format!("{}{}", &sql[..start], &sql[end..]))
}

/// Build the count statement for a normalized statement.
///
/// Simple statements swap their select list for `COUNT(*)`; everything else,
/// including statements whose ordering must be kept, is wrapped as a derived
/// table under `alias`.
pub(crate) fn derive_count(
    sql: &str,
    profile: &ClauseProfile,
    dialect: Dialect,
    alias: &str,
) -> String {
    let body = match strip_order_by(sql) {
        Some(stripped) => {
            if !profile.is_complex {
                if let Some(count) = substitute_select_list(&stripped) {
                    return count;
                }
            }
            stripped
        }
        None => sql.to_string(),
    };
    tracing::trace!(%dialect, alias, "wrapping statement for count");
    format!(
        "SELECT COUNT(*) FROM ({}) {}",
        body,
        dialect.derived_table_alias(alias)
    )
}

fn substitute_select_list(sql: &str) -> Option<String> {
    let scan = Scan::new(sql);
    let from = scan.find_top_level(" FROM ", 0)?;
    let (select_list, tail) = sql.split_at(from);

    if count_placeholders(select_list) > 0 || contains_subquery(tail) {
        return None;
    }
    // A limited statement counts at most its limit, which substitution would lose
    if scan.find_first_top_level(LIMITING_CLAUSES, from).is_some() {
        return None;
    }
    Some(format!("SELECT COUNT(*){}", tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn count(sql: &str, dialect: Dialect) -> String {
        derive_count(sql, &classify(sql), dialect, "pagehaus_count")
    }

    #[test]
    fn test_simple_statement_substitutes_select_list() {
        assert_eq!(
            count("SELECT * FROM users WHERE age > 18", Dialect::MySql),
            "SELECT COUNT(*) FROM users WHERE age > 18"
        );
        assert_eq!(
            count("SELECT id, name FROM users WHERE 1=1 ORDER BY name", Dialect::Postgres),
            "SELECT COUNT(*) FROM users WHERE 1=1"
        );
    }

    #[test]
    fn test_group_by_is_wrapped() {
        assert_eq!(
            count("SELECT dept, COUNT(*) FROM emp WHERE 1=1 GROUP BY dept", Dialect::MySql),
            "SELECT COUNT(*) FROM (SELECT dept, COUNT(*) FROM emp WHERE 1=1 GROUP BY dept) \
             AS pagehaus_count"
        );
    }

    #[test]
    fn test_oracle_alias_has_no_as() {
        assert_eq!(
            count("SELECT DISTINCT name FROM users", Dialect::Oracle),
            "SELECT COUNT(*) FROM (SELECT DISTINCT name FROM users) pagehaus_count"
        );
    }

    #[test]
    fn test_subquery_in_filter_falls_back_to_wrap() {
        let sql = "SELECT * FROM users WHERE 1=1 \
                   AND (EXISTS (SELECT 1 FROM bans b WHERE b.uid = users.id))";
        let profile = classify("users");
        assert_eq!(
            derive_count(sql, &profile, Dialect::MySql, "c"),
            format!("SELECT COUNT(*) FROM ({}) AS c", sql)
        );
    }

    #[test]
    fn test_placeholder_in_select_list_falls_back_to_wrap() {
        let sql = "SELECT id, price * ? AS total FROM items WHERE qty > ?";
        assert_eq!(
            count(sql, Dialect::MySql),
            format!("SELECT COUNT(*) FROM ({}) AS pagehaus_count", sql)
        );
    }

    #[test]
    fn test_strip_order_by_stops_at_locking_clause() {
        assert_eq!(
            strip_order_by("SELECT * FROM t WHERE 1=1 ORDER BY id FOR UPDATE").as_deref(),
            Some("SELECT * FROM t WHERE 1=1 FOR UPDATE")
        );
        assert_eq!(
            strip_order_by("SELECT * FROM (SELECT * FROM t ORDER BY x) s").as_deref(),
            Some("SELECT * FROM (SELECT * FROM t ORDER BY x) s")
        );
    }

    #[test]
    fn test_order_by_before_row_limit_is_kept() {
        assert_eq!(strip_order_by("SELECT * FROM t ORDER BY id DESC LIMIT 5"), None);
        assert_eq!(
            strip_order_by("SELECT * FROM t ORDER BY id OFFSET 5 ROWS FETCH NEXT 100 ROWS ONLY"),
            None
        );
    }

    #[test]
    fn test_order_by_with_placeholder_is_kept() {
        assert_eq!(
            strip_order_by("SELECT * FROM t WHERE a = ? ORDER BY FIELD(id, ?)"),
            None
        );
    }

    #[test]
    fn test_kept_order_by_with_placeholder_is_wrapped() {
        let sql = "SELECT * FROM t WHERE a = ? ORDER BY array_position(?, id)";
        assert_eq!(
            count(sql, Dialect::Postgres),
            format!("SELECT COUNT(*) FROM ({}) AS pagehaus_count", sql)
        );
    }

    #[test]
    fn test_sql_server_offset_fetch_keeps_its_order_by() {
        let sql = "SELECT * FROM t WHERE 1=1 ORDER BY id OFFSET 5 ROWS FETCH NEXT 100 ROWS ONLY";
        assert_eq!(
            count(sql, Dialect::SqlServer),
            format!("SELECT COUNT(*) FROM ({}) AS pagehaus_count", sql)
        );
    }

    #[test]
    fn test_limited_statement_is_wrapped() {
        assert_eq!(
            count("SELECT * FROM t LIMIT 5", Dialect::Sqlite),
            "SELECT COUNT(*) FROM (SELECT * FROM t LIMIT 5) AS pagehaus_count"
        );
    }
}
