//! Classification-to-filter compiler.
//!
//! Turns a keyword classification into a parameterized PostgreSQL predicate
//! over the catalogue table. Keywords only ever travel as bound parameters;
//! the predicate text is assembled from registry column names and
//! placeholders alone.

use tracing::debug;

use toolfinder_core::{
    Classification, CompiledQuery, FieldConditions, FieldJoin, FieldKind, FilterExpression,
};

use crate::escape_like;

/// Generates the catalogue WHERE predicate for a classification.
///
/// Per field, conditions are OR'd inside parentheses. Field clauses are
/// joined according to [`FieldJoin`]: `Any` (OR) reproduces the historical
/// behaviour where one matching field is enough, `All` (AND) requires every
/// classified field to match.
///
/// # Example
///
/// ```rust
/// use toolfinder_core::{Classification, FieldJoin};
/// use toolfinder_db::filter_compiler::FilterCompiler;
///
/// let classification = Classification::new().with("best", ["reviews", "description"]);
/// let compiled = FilterCompiler::new(FieldJoin::Any).compile(&classification);
///
/// assert_eq!(
///     compiled.filter,
///     "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $1)) OR (description ILIKE $2)"
/// );
/// assert_eq!(compiled.params, vec!["%best%", "%best%"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler {
    field_join: FieldJoin,
    param_offset: usize,
}

impl FilterCompiler {
    /// Create a compiler with the given cross-field join policy.
    pub fn new(field_join: FieldJoin) -> Self {
        Self {
            field_join,
            param_offset: 0,
        }
    }

    /// Start placeholder numbering after `offset` already-bound parameters.
    pub fn with_param_offset(mut self, offset: usize) -> Self {
        self.param_offset = offset;
        self
    }

    pub fn field_join(&self) -> FieldJoin {
        self.field_join
    }

    /// Compile a classification into a predicate plus ordered bindings.
    ///
    /// Never fails on classification content: unknown fields are dropped and
    /// an empty result compiles to the always-true predicate.
    pub fn compile(&self, classification: &Classification) -> CompiledQuery {
        let expression = FilterExpression::group(classification);

        if !expression.dropped_fields().is_empty() {
            debug!(
                subsystem = "db",
                component = "filter_compiler",
                op = "drop_fields",
                dropped = ?expression.dropped_fields(),
                "Dropped unregistered field names"
            );
        }

        let compiled = self.compile_expression(&expression);

        debug!(
            subsystem = "db",
            component = "filter_compiler",
            op = "compile",
            keyword_count = classification.len(),
            field_count = expression.active_groups().count(),
            param_count = compiled.params.len(),
            field_join = %self.field_join,
            filter = %compiled.filter,
            "Compiled catalogue filter"
        );

        compiled
    }

    /// Render an already-grouped expression.
    pub fn compile_expression(&self, expression: &FilterExpression) -> CompiledQuery {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        let mut param_idx = self.param_offset;

        for group in expression.active_groups() {
            let (clause, group_params, next_idx) = build_field_clause(group, param_idx);
            clauses.push(clause);
            params.extend(group_params);
            param_idx = next_idx;
        }

        if clauses.is_empty() {
            return CompiledQuery::match_all();
        }

        let operator = match self.field_join {
            FieldJoin::Any => " OR ",
            FieldJoin::All => " AND ",
        };

        CompiledQuery {
            filter: clauses.join(operator),
            params,
        }
    }
}

/// Build the parenthesized OR-group for one field.
fn build_field_clause(
    group: &FieldConditions,
    mut param_idx: usize,
) -> (String, Vec<String>, usize) {
    let mut conditions = Vec::with_capacity(group.keywords.len());
    let mut params = Vec::with_capacity(group.keywords.len());
    let column = group.field.name;

    for keyword in &group.keywords {
        param_idx += 1;
        conditions.push(match group.field.kind {
            FieldKind::ScalarText => format!("{} ILIKE ${}", column, param_idx),
            FieldKind::TagList => tag_condition(column, param_idx),
        });
        params.push(like_pattern(keyword));
    }

    (format!("({})", conditions.join(" OR ")), params, param_idx)
}

/// Match when any element of a tag-list column contains the bound pattern.
///
/// The element is the string under test and the parameter is the pattern.
/// `$n ILIKE ANY(col)` would reverse those roles.
fn tag_condition(column: &str, param_idx: usize) -> String {
    format!(
        "EXISTS (SELECT 1 FROM unnest({}) AS tag WHERE tag ILIKE ${})",
        column, param_idx
    )
}

/// Substring pattern for a keyword, with LIKE wildcards in the keyword escaped.
pub fn like_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Compile under a subscriber capped at `level` and return what it printed.
    fn compile_logged(c: &Classification, level: tracing::Level) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            compile_any(c);
        });

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn compile_any(c: &Classification) -> CompiledQuery {
        FilterCompiler::new(FieldJoin::Any).compile(c)
    }

    #[test]
    fn test_empty_classification_matches_all() {
        let compiled = compile_any(&Classification::new());
        assert_eq!(compiled.filter, "TRUE");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn test_empty_classification_matches_all_with_and_join() {
        let compiled = FilterCompiler::new(FieldJoin::All).compile(&Classification::new());
        assert_eq!(compiled.filter, "TRUE");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn test_best_reviews_description_scenario() {
        let c = Classification::new().with("best", ["reviews", "description"]);
        let compiled = compile_any(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $1)) OR (description ILIKE $2)"
        );
        assert_eq!(compiled.params, vec!["%best%", "%best%"]);
    }

    #[test]
    fn test_scalar_field_condition() {
        let c = Classification::new().with("beginner", ["ease_of_use"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled.filter, "(ease_of_use ILIKE $1)");
        assert_eq!(compiled.params, vec!["%beginner%"]);
    }

    #[test]
    fn test_tag_list_field_condition() {
        let c = Classification::new().with("collaboration", ["tool_type"]);
        let compiled = compile_any(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(tool_type) AS tag WHERE tag ILIKE $1))"
        );
        assert_eq!(compiled.params, vec!["%collaboration%"]);
    }

    #[test]
    fn test_tag_condition_tests_each_element_against_the_pattern() {
        let c = Classification::new()
            .with("design", ["tool_type"])
            .with("remote", ["reviews"]);
        let compiled = compile_any(&c);

        // The bound pattern must sit on the right of ILIKE with the tag on
        // the left; the reversed form never matches a longer tag.
        assert!(!compiled.filter.contains("ILIKE ANY"));
        for (idx, column) in [(1, "reviews"), (2, "tool_type")] {
            let condition = format!(
                "EXISTS (SELECT 1 FROM unnest({}) AS tag WHERE tag ILIKE ${})",
                column, idx
            );
            assert!(compiled.filter.contains(&condition), "{}", compiled.filter);
        }
        assert_eq!(compiled.filter.matches('$').count(), compiled.params.len());
        assert_eq!(compiled.params, vec!["%remote%", "%design%"]);
    }

    #[test]
    fn test_multiple_keywords_same_field_are_ored_in_one_group() {
        let c = Classification::new()
            .with("figma", ["name"])
            .with("miro", ["name"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled.filter, "(name ILIKE $1 OR name ILIKE $2)");
        assert_eq!(compiled.params, vec!["%figma%", "%miro%"]);
    }

    #[test]
    fn test_params_follow_registry_then_insertion_order() {
        // Classification order is description-first, but the registry puts
        // reviews and tool_type ahead of description.
        let c = Classification::new()
            .with("architecture", ["description", "tool_type"])
            .with("best", ["reviews", "description"]);
        let compiled = compile_any(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $1)) OR (EXISTS (SELECT 1 FROM unnest(tool_type) AS tag WHERE tag ILIKE $2)) OR (description ILIKE $3 OR description ILIKE $4)"
        );
        assert_eq!(
            compiled.params,
            vec!["%best%", "%architecture%", "%architecture%", "%best%"]
        );
    }

    #[test]
    fn test_worked_example_from_prompt() {
        let c = Classification::new()
            .with("best", ["reviews", "description"])
            .with("designing", ["tool_type", "learning_activities", "description"])
            .with("software architecture", ["description", "tool_type", "reviews"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled.params.len(), 8);
        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $1) OR EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $2)) OR \
             (EXISTS (SELECT 1 FROM unnest(tool_type) AS tag WHERE tag ILIKE $3) OR EXISTS (SELECT 1 FROM unnest(tool_type) AS tag WHERE tag ILIKE $4)) OR \
             (EXISTS (SELECT 1 FROM unnest(learning_activities) AS tag WHERE tag ILIKE $5)) OR \
             (description ILIKE $6 OR description ILIKE $7 OR description ILIKE $8)"
        );
        assert_eq!(
            compiled.params,
            vec![
                "%best%",
                "%software architecture%",
                "%designing%",
                "%software architecture%",
                "%designing%",
                "%best%",
                "%designing%",
                "%software architecture%",
            ]
        );
    }

    #[test]
    fn test_all_join_uses_and_between_fields() {
        let c = Classification::new()
            .with("best", ["reviews"])
            .with("beginner", ["ease_of_use"]);
        let compiled = FilterCompiler::new(FieldJoin::All).compile(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $1)) AND (ease_of_use ILIKE $2)"
        );
    }

    #[test]
    fn test_all_join_keeps_or_within_field() {
        let c = Classification::new()
            .with("figma", ["name"])
            .with("miro", ["name"]);
        let compiled = FilterCompiler::new(FieldJoin::All).compile(&c);

        assert_eq!(compiled.filter, "(name ILIKE $1 OR name ILIKE $2)");
    }

    #[test]
    fn test_unknown_fields_dropped_without_error() {
        let c = Classification::new()
            .with("cheap", ["price"])
            .with("figma", ["name", "vendor"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled.filter, "(name ILIKE $1)");
        assert_eq!(compiled.params, vec!["%figma%"]);
    }

    #[test]
    fn test_dropped_fields_logged_at_debug() {
        let c = Classification::new().with("cheap", ["price"]);

        let output = compile_logged(&c, tracing::Level::DEBUG);
        let line = output
            .lines()
            .find(|l| l.contains("Dropped unregistered field names"))
            .unwrap_or_else(|| panic!("no drop event in {}", output));
        assert!(line.contains("DEBUG"), "{}", line);
        assert!(line.contains("price"), "{}", line);

        let output = compile_logged(&c, tracing::Level::INFO);
        assert!(!output.contains("Dropped unregistered field names"));
    }

    #[test]
    fn test_only_unknown_fields_matches_all() {
        let c = Classification::new().with("cheap", ["price", "cost"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled, CompiledQuery::match_all());
    }

    #[test]
    fn test_empty_field_set_contributes_nothing() {
        let c = Classification::new().with("lonely", Vec::<String>::new());
        assert_eq!(compile_any(&c), CompiledQuery::match_all());
    }

    #[test]
    fn test_field_names_normalized() {
        let c = Classification::new().with("design", ["Tool Type", "Description"]);
        let compiled = compile_any(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(tool_type) AS tag WHERE tag ILIKE $1)) OR (description ILIKE $2)"
        );
    }

    #[test]
    fn test_injection_payload_is_only_a_parameter() {
        let payload = "x'); DROP TABLE tools; --";
        let c = Classification::new().with(payload, ["name", "reviews"]);
        let compiled = compile_any(&c);

        assert!(!compiled.filter.contains(payload));
        assert!(!compiled.filter.contains("DROP"));
        assert!(!compiled.filter.contains('\''));
        assert_eq!(compiled.params, vec![format!("%{}%", payload); 2]);
    }

    #[test]
    fn test_like_wildcards_escaped() {
        let c = Classification::new().with("50%_off", ["name"]);
        let compiled = compile_any(&c);

        assert_eq!(compiled.params, vec!["%50\\%\\_off%"]);
    }

    #[test]
    fn test_backslash_escaped() {
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_param_offset() {
        let c = Classification::new().with("best", ["reviews", "name"]);
        let compiled = FilterCompiler::new(FieldJoin::Any)
            .with_param_offset(3)
            .compile(&c);

        assert_eq!(
            compiled.filter,
            "(EXISTS (SELECT 1 FROM unnest(reviews) AS tag WHERE tag ILIKE $4)) OR (name ILIKE $5)"
        );
        assert_eq!(compiled.params.len(), 2);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let c = Classification::new()
            .with("best", ["reviews", "description"])
            .with("beginner", ["ease_of_use"]);
        let compiler = FilterCompiler::new(FieldJoin::Any);
        assert_eq!(compiler.compile(&c), compiler.compile(&c));
    }
}
