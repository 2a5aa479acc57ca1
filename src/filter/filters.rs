use super::error::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated sort/pagination/search intent for a single list query.
///
/// The sort key is checked against a server-defined safelist at construction
/// time, so a value that would reach SQL unvalidated cannot be built. Every
/// accessor that touches the sort key still fails closed: an unlisted value
/// yields `FilterError::UnsafeSort`, never a column name derived from client
/// input.
#[derive(Debug, Clone)]
pub struct Filters {
    sort: String,
    safelist: &'static [&'static str],
    page: i64,
    page_size: i64,
    search: String,
}

impl Filters {
    pub fn new(
        sort: String,
        safelist: &'static [&'static str],
        page: i64,
        page_size: i64,
        search: String,
        max_page_size: i64,
    ) -> Result<Self, FilterError> {
        if page < 1 {
            return Err(FilterError::InvalidPage(page));
        }
        if page_size < 1 {
            return Err(FilterError::InvalidPageSize(page_size));
        }
        if page_size > max_page_size {
            return Err(FilterError::PageSizeTooLarge { requested: page_size, max: max_page_size });
        }
        // The derived offset must stay representable; an absurd page number is
        // malformed client input, not a fault.
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(FilterError::PageOutOfRange(page));
        }

        let filters = Self { sort, safelist, page, page_size, search };

        // Reject an unlisted sort key here, at the client boundary, so the
        // later SQL assembly only ever sees safelisted values.
        filters.sort_column()?;
        Ok(filters)
    }

    /// Resolve the sort key to a bare column name, stripping the optional
    /// leading `-`. The original key, prefix included, must appear in the
    /// safelist verbatim.
    pub fn sort_column(&self) -> Result<&str, FilterError> {
        for candidate in self.safelist {
            if self.sort == *candidate {
                return Ok(self.sort.trim_start_matches('-'));
            }
        }
        Err(FilterError::UnsafeSort(self.sort.clone()))
    }

    /// DESC iff the sort key carries a `-` prefix.
    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The search text ready to bind into an ILIKE predicate: metacharacters
    /// are escaped so the client's text matches literally.
    pub fn search_pattern(&self) -> String {
        super::search::escape_like(&self.search)
    }
}
