//! Clause classification
//!
//! A lexical heuristic, not a parser: tokens are found by case-insensitive
//! substring search, so keywords inside string literals or comments are
//! reported as if they were real clauses.

use crate::scanner::Scan;
use serde::Serialize;

const JOIN_TOKENS: &[&str] = &[" JOIN ", " STRAIGHT_JOIN ", " CROSS APPLY ", " OUTER APPLY "];
const SET_OPERATION_TOKENS: &[&str] = &[" UNION ", " INTERSECT ", " EXCEPT ", " MINUS "];
const SUBQUERY_TOKENS: &[&str] = &["(SELECT ", "( SELECT "];

/// Which clauses a SQL fragment already contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClauseProfile {
    /// The text begins with `SELECT` (or `WITH`)
    pub has_select: bool,
    pub has_from: bool,
    pub has_where: bool,
    pub has_order_by: bool,
    pub has_group_by: bool,
    pub has_having: bool,
    pub has_distinct: bool,
    pub has_join: bool,
    pub has_set_operation: bool,
    pub has_subquery: bool,
    pub has_cte: bool,
    /// Counting by `SELECT COUNT(*)` substitution would be wrong or unsafe
    pub is_complex: bool,
}

impl ClauseProfile {
    /// A complete statement rather than a table name or bare predicate
    pub fn is_full_statement(&self) -> bool {
        self.has_select && self.has_from
    }
}

/// Classify a SQL fragment
pub fn classify(sql: &str) -> ClauseProfile {
    let scan = Scan::new(sql);

    let has_cte = scan.starts_with("WITH ");
    let has_group_by = scan.contains(" GROUP BY ");
    let has_having = scan.contains(" HAVING ");
    let has_distinct = scan.contains(" DISTINCT ");
    let has_join = JOIN_TOKENS.iter().any(|t| scan.contains(t));
    let has_set_operation = SET_OPERATION_TOKENS.iter().any(|t| scan.contains(t));
    let has_subquery = SUBQUERY_TOKENS.iter().any(|t| scan.contains(t));

    let profile = ClauseProfile {
        has_select: scan.starts_with("SELECT ") || has_cte,
        has_from: scan.contains(" FROM "),
        has_where: scan.contains(" WHERE "),
        has_order_by: scan.contains(" ORDER BY "),
        has_group_by,
        has_having,
        has_distinct,
        has_join,
        has_set_operation,
        has_subquery,
        has_cte,
        is_complex: has_group_by
            || has_having
            || has_distinct
            || has_join
            || has_set_operation
            || has_subquery
            || has_cte,
    };

    tracing::trace!(?profile, "classified statement");
    profile
}

/// Whether `sql` contains a parenthesized sub-select anywhere
pub(crate) fn contains_subquery(sql: &str) -> bool {
    let scan = Scan::new(sql);
    SUBQUERY_TOKENS.iter().any(|t| scan.contains(t))
}
