/// Render the parameterized free-text predicate for one list query.
///
/// The search text itself is always a bind parameter (`$param`); only the
/// server-defined column names are interpolated, quoted and cast to text so
/// non-text columns such as timestamps participate too. An empty search value
/// matches every row.
pub fn text_predicate(columns: &[&str], param: usize) -> String {
    let mut parts = Vec::with_capacity(columns.len() + 1);
    parts.push(format!("${param} = ''"));
    for column in columns {
        parts.push(format!("\"{column}\"::text ILIKE '%' || ${param} || '%'"));
    }
    format!("({})", parts.join(" OR "))
}

/// Escape ILIKE metacharacters so the client's search text matches literally.
/// Postgres treats backslash as the default pattern escape character.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_short_circuits() {
        let sql = text_predicate(&["first_name"], 1);
        assert!(sql.starts_with("($1 = '' OR "));
    }

    #[test]
    fn ors_over_all_columns() {
        let sql = text_predicate(&["first_name", "last_name"], 1);
        assert_eq!(
            sql,
            "($1 = '' OR \"first_name\"::text ILIKE '%' || $1 || '%' \
             OR \"last_name\"::text ILIKE '%' || $1 || '%')"
        );
    }

    #[test]
    fn escapes_pattern_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("smith"), "smith");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn respects_param_index() {
        let sql = text_predicate(&["date_time"], 4);
        assert!(sql.contains("$4 = ''"));
        assert!(sql.contains("'%' || $4 || '%'"));
    }
}
