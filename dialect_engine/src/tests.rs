//! Dialect engine tests
//!
//! Conformance scenarios for every dialect family plus filter, ordering and
//! count derivation behaviour through the public `paginate` entry point.

#[cfg(test)]
mod tests {
    use crate::{paginate, EngineOptions, PaginationError, PaginationRequest, PaginationStrategy};
    use clause_builder::{BuilderError, Filter, Ordering, Predicate};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use type_mapping::Dialect;

    fn users_page_two() -> PaginationRequest {
        PaginationRequest::new("SELECT * FROM users").page(2).page_size(10)
    }

    // ========================================
    // Dialect conformance
    // ========================================

    #[test]
    fn test_limit_offset_family() {
        let dialects = [
            Dialect::MySql,
            Dialect::MariaDb,
            Dialect::TiDb,
            Dialect::OceanBase,
            Dialect::ClickHouse,
            Dialect::Sqlite,
            Dialect::Postgres,
        ];
        for dialect in dialects {
            let result = paginate(dialect, &users_page_two()).unwrap();
            assert!(
                result.page_statement.ends_with("LIMIT 10 OFFSET 10"),
                "{}: {}",
                dialect,
                result.page_statement
            );
            assert_eq!(result.count_statement, "SELECT COUNT(*) FROM users");
        }
    }

    #[test]
    fn test_sql_server_synthesizes_order() {
        let result = paginate(Dialect::SqlServer, &users_page_two()).unwrap();
        assert!(result
            .page_statement
            .contains("ORDER BY (SELECT NULL) OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"));
    }

    #[test]
    fn test_sql_server_uses_caller_order() {
        let request = PaginationRequest::new("users").order_by("id");
        let result = paginate(Dialect::SqlServer, &request).unwrap();
        assert_eq!(
            result.page_statement,
            "SELECT * FROM users ORDER BY id OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
    }

    #[test]
    fn test_oracle_offset_fetch() {
        let result = paginate(Dialect::Oracle, &users_page_two()).unwrap();
        assert!(result.page_statement.ends_with("OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"));
        assert!(!result.page_statement.contains("(SELECT NULL)"));
    }

    #[test]
    fn test_oracle_legacy_rownum() {
        let request = PaginationRequest::new("users").page(3).page_size(20);
        let result = paginate(Dialect::OracleLegacy, &request).unwrap();
        assert_eq!(
            result.page_statement,
            "SELECT * FROM (SELECT row_.*, ROWNUM rownum_ FROM (SELECT * FROM users) row_ WHERE ROWNUM <= 60) WHERE rownum_ > 40"
        );
    }

    #[test]
    fn test_first_page_has_zero_offset() {
        for dialect in Dialect::ALL {
            let request = PaginationRequest::new("users").page(1).page_size(5);
            let result = paginate(dialect, &request).unwrap();
            assert_eq!(result.window.offset, 0);
            assert_eq!(result.dialect, dialect);
        }
    }

    // ========================================
    // Count derivation
    // ========================================

    #[test]
    fn test_simple_count_substitutes_select_list() {
        let request = PaginationRequest::new("SELECT * FROM users WHERE age > 18");
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(result.count_statement, "SELECT COUNT(*) FROM users WHERE age > 18");
    }

    #[test]
    fn test_group_by_count_wraps_statement() {
        let request = PaginationRequest::new("SELECT dept, COUNT(*) FROM emp GROUP BY dept");
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM (SELECT dept, COUNT(*) FROM emp WHERE 1=1 GROUP BY dept) AS pagehaus_count"
        );
    }

    #[test]
    fn test_count_drops_order_by_page_keeps_it() {
        let request = PaginationRequest::new("SELECT * FROM users WHERE active = 1 ORDER BY created_at DESC")
            .order_by("id");
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(result.count_statement, "SELECT COUNT(*) FROM users WHERE active = 1");
        assert_eq!(
            result.page_statement,
            "SELECT * FROM users WHERE active = 1 ORDER BY created_at DESC LIMIT 10 OFFSET 0"
        );
    }

    #[test]
    fn test_custom_count_alias() {
        let options = EngineOptions {
            count_alias: "total_rows".to_string(),
            ..EngineOptions::default()
        };
        let strategy = PaginationStrategy::new(Dialect::Oracle).with_options(options);
        let request = PaginationRequest::new("SELECT DISTINCT city FROM users");
        let result = strategy.paginate(&request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM (SELECT DISTINCT city FROM users) total_rows"
        );
    }

    // ========================================
    // Placeholders and parameters
    // ========================================

    #[test]
    fn test_postgres_numbers_placeholders_across_filter() {
        let request = PaginationRequest::new("age > ?")
            .table("users")
            .parameters(vec![json!(18)])
            .filter(Predicate::new().eq("status", "active"));
        let result = paginate(Dialect::Postgres, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM users WHERE age > $1 AND (status = $2)"
        );
        assert_eq!(
            result.page_statement,
            "SELECT * FROM users WHERE age > $1 AND (status = $2) LIMIT 10 OFFSET 0"
        );
        assert_eq!(result.parameters, vec![json!(18), json!("active")]);
    }

    #[test]
    fn test_sql_server_and_oracle_placeholder_styles() {
        let request = PaginationRequest::new("users").filter(Filter::raw("id = ?", vec![json!(7)]));

        let result = paginate(Dialect::SqlServer, &request).unwrap();
        assert!(result.page_statement.contains("(id = @p1)"));

        let result = paginate(Dialect::Oracle, &request).unwrap();
        assert!(result.page_statement.contains("(id = :1)"));
    }

    #[test]
    fn test_quoted_question_mark_is_not_a_placeholder() {
        let request = PaginationRequest::new("SELECT * FROM notes WHERE body = 'why?' AND id = ?")
            .parameters(vec![json!(3)]);
        let result = paginate(Dialect::Postgres, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM notes WHERE body = 'why?' AND id = $1"
        );
    }

    #[test]
    fn test_filter_values_land_between_where_and_having_values() {
        let request = PaginationRequest::new(
            "SELECT dept FROM emp WHERE salary > ? GROUP BY dept HAVING COUNT(*) > ?",
        )
        .parameters(vec![json!(1000), json!(3)])
        .filter(Filter::raw("region = ?", vec![json!("eu")]));
        let result = paginate(Dialect::Postgres, &request).unwrap();
        assert_eq!(result.parameters, vec![json!(1000), json!("eu"), json!(3)]);
        assert!(result
            .page_statement
            .contains("WHERE salary > $1 AND (region = $2) GROUP BY dept HAVING COUNT(*) > $3"));
    }

    // ========================================
    // Filter inputs
    // ========================================

    #[test]
    fn test_key_value_filter_is_sorted_by_field() {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        fields.insert("status".to_string(), json!("active"));
        fields.insert("age".to_string(), json!(30));
        let request = PaginationRequest::new("users").filter(fields);
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM users WHERE 1=1 AND (age = ? AND status = ?)"
        );
        assert_eq!(result.parameters, vec![json!(30), json!("active")]);
    }

    #[test]
    fn test_filter_on_union_wraps_source() {
        let request = PaginationRequest::new("SELECT a FROM t1 UNION SELECT a FROM t2")
            .filter(Filter::raw("a > ?", vec![json!(5)]));
        let result = paginate(Dialect::Postgres, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM (SELECT * FROM (SELECT a FROM t1 UNION SELECT a FROM t2) AS pagehaus_source WHERE a > $1) AS pagehaus_count"
        );
    }

    #[test]
    fn test_unsupported_filter_value_fails() {
        let request = PaginationRequest::new("users").filter(Filter::fields([("meta", json!({"a": 1}))]));
        let err = paginate(Dialect::MySql, &request).unwrap_err();
        assert_eq!(
            err,
            PaginationError::Filter(BuilderError::UnsupportedFilter {
                field: "meta".to_string(),
                kind: "object",
            })
        );
    }

    #[test]
    fn test_strict_predicate_rejection_fails() {
        let predicate = Predicate::strict().in_values("id", json!([]));
        let request = PaginationRequest::new("users").filter(predicate);
        let err = paginate(Dialect::MySql, &request).unwrap_err();
        assert!(matches!(err, PaginationError::Filter(BuilderError::Rejected { .. })));
    }

    #[test]
    fn test_permissive_predicate_rejection_is_ignored() {
        let predicate = Predicate::new().in_values("id", json!([])).eq("kind", "a");
        let request = PaginationRequest::new("users").filter(predicate);
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(result.count_statement, "SELECT COUNT(*) FROM users WHERE 1=1 AND (kind = ?)");
    }

    // ========================================
    // Ordering and page window
    // ========================================

    #[test]
    fn test_caller_ordering_is_injected() {
        let ordering = Ordering::new().descending("created_at").append("id");
        let request = PaginationRequest::new("users").ordering(&ordering).page(2).page_size(5);
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(
            result.page_statement,
            "SELECT * FROM users ORDER BY created_at DESC, id LIMIT 5 OFFSET 5"
        );
    }

    #[test]
    fn test_max_page_size_caps_limit() {
        let options = EngineOptions {
            max_page_size: 50,
            ..EngineOptions::default()
        };
        let request = PaginationRequest::new("users").page_size(500);
        let result = PaginationStrategy::new(Dialect::MySql)
            .with_options(options)
            .paginate(&request)
            .unwrap();
        assert!(result.page_statement.ends_with("LIMIT 50 OFFSET 0"));
        assert_eq!(result.window.page_size, 50);
    }

    #[test]
    fn test_non_positive_page_uses_defaults() {
        let request = PaginationRequest::new("users").page(0).page_size(-3);
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(result.window.page, 1);
        assert_eq!(result.window.page_size, 10);
        assert!(result.page_statement.ends_with("LIMIT 10 OFFSET 0"));
    }

    #[test]
    fn test_existing_limit_is_paged_as_derived_table() {
        let request = PaginationRequest::new("SELECT * FROM logs ORDER BY id DESC LIMIT 100");
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(
            result.page_statement,
            "SELECT * FROM (SELECT * FROM logs WHERE 1=1 ORDER BY id DESC LIMIT 100) AS pagehaus_page \
             LIMIT 10 OFFSET 0"
        );
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM (SELECT * FROM logs WHERE 1=1 ORDER BY id DESC LIMIT 100) \
             AS pagehaus_count"
        );
    }

    #[test]
    fn test_sql_server_offset_fetch_source_keeps_order_in_count() {
        let source = "SELECT * FROM t ORDER BY id OFFSET 5 ROWS FETCH NEXT 100 ROWS ONLY";
        let result = paginate(Dialect::SqlServer, &PaginationRequest::new(source)).unwrap();
        let normalized = "SELECT * FROM t WHERE 1=1 ORDER BY id OFFSET 5 ROWS FETCH NEXT 100 ROWS ONLY";
        assert_eq!(
            result.count_statement,
            format!("SELECT COUNT(*) FROM ({}) AS pagehaus_count", normalized)
        );
        assert_eq!(
            result.page_statement,
            format!(
                "SELECT * FROM ({}) AS pagehaus_page \
                 ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY",
                normalized
            )
        );
    }

    #[test]
    fn test_limit_goes_before_for_update() {
        let request = PaginationRequest::new("SELECT * FROM jobs WHERE state = 'ready' FOR UPDATE");
        let result = paginate(Dialect::MySql, &request).unwrap();
        assert_eq!(
            result.page_statement,
            "SELECT * FROM jobs WHERE state = 'ready' LIMIT 10 OFFSET 0 FOR UPDATE"
        );
    }

    #[test]
    fn test_placeholder_ordering_keeps_count_wrapped() {
        let request =
            PaginationRequest::new("SELECT * FROM t WHERE a = ? ORDER BY array_position(?, id)")
                .parameters(vec![json!(1), json!([3, 1, 2])]);
        let result = paginate(Dialect::Postgres, &request).unwrap();
        assert_eq!(
            result.count_statement,
            "SELECT COUNT(*) FROM (SELECT * FROM t WHERE a = $1 ORDER BY array_position($2, id)) \
             AS pagehaus_count"
        );
        assert_eq!(result.parameters, vec![json!(1), json!([3, 1, 2])]);
    }

    // ========================================
    // Configuration errors
    // ========================================

    #[test]
    fn test_bare_predicate_without_table() {
        let err = paginate(Dialect::MySql, &PaginationRequest::new("age > 18")).unwrap_err();
        assert_eq!(err, PaginationError::MissingTable("age > 18".to_string()));
        assert_eq!(err.to_string(), "Missing table name for bare predicate: age > 18");
    }

    #[test]
    fn test_statement_without_from() {
        let err = paginate(Dialect::Postgres, &PaginationRequest::new("SELECT now()")).unwrap_err();
        assert!(matches!(err, PaginationError::MissingFromClause(_)));
    }

    #[test]
    fn test_oracle_rejects_locking() {
        let source = "SELECT * FROM jobs WHERE state = 'ready' FOR UPDATE";
        for dialect in [Dialect::Oracle, Dialect::OracleLegacy] {
            let err = paginate(dialect, &PaginationRequest::new(source)).unwrap_err();
            assert_eq!(
                err,
                PaginationError::UnsupportedLocking {
                    dialect,
                    statement: source.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_result_serializes() {
        let result = paginate(Dialect::Postgres, &users_page_two()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["dialect"], json!("postgres"));
        assert_eq!(value["window"]["offset"], json!(10));
    }
}
