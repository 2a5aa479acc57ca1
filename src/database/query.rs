use crate::filter::{search, FilterError, Filters};

/// Assembles the paged SELECT and matching COUNT statements for one listing.
///
/// Table and column names are server-defined constants; the only client
/// influence on the rendered SQL is the safelist-resolved sort column and
/// direction. The search text, limit and offset are bound as `$1`..`$3`.
pub struct ListQuery<'a> {
    table: &'a str,
    select_columns: &'a [&'a str],
    search_columns: &'a [&'a str],
}

impl<'a> ListQuery<'a> {
    pub fn new(
        table: &'a str,
        select_columns: &'a [&'a str],
        search_columns: &'a [&'a str],
    ) -> Self {
        Self { table, select_columns, search_columns }
    }

    /// The paged SELECT. A deterministic `id ASC` tie-break is appended so
    /// pagination stays stable when the chosen sort column has duplicates.
    pub fn select_sql(&self, filters: &Filters) -> Result<String, FilterError> {
        let sort_column = filters.sort_column()?;
        let columns = self
            .select_columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "SELECT {columns} FROM \"{table}\" WHERE {predicate} \
             ORDER BY \"{sort_column}\" {direction}, \"id\" ASC LIMIT $2 OFFSET $3",
            table = self.table,
            predicate = search::text_predicate(self.search_columns, 1),
            direction = filters.sort_direction().to_sql(),
        ))
    }

    /// The matching COUNT over the same predicate, for pagination metadata.
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM \"{table}\" WHERE {predicate}",
            table = self.table,
            predicate = search::text_predicate(self.search_columns, 1),
        )
    }
}
