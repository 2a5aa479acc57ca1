use serde::Deserialize;

use crate::config::config;
use crate::error::ApiError;
use crate::filter::{FilterError, Filters};

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    /// Legacy parameter. Direction is derived from the `-` prefix on `sort`.
    pub sort_direction: Option<String>,
    pub filter: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    /// Validate the raw parameters against the endpoint's sort safelist and
    /// the configured pagination bounds.
    pub fn into_filters(
        self,
        default_sort: &str,
        safelist: &'static [&'static str],
    ) -> Result<Filters, FilterError> {
        if self.sort_direction.is_some() {
            tracing::debug!("ignoring legacy sort_direction parameter; direction derives from the '-' prefix");
        }

        let cfg = config();
        Filters::new(
            self.sort.unwrap_or_else(|| default_sort.to_string()),
            safelist,
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(cfg.pagination.default_page_size),
            self.filter.unwrap_or_default(),
            cfg.pagination.max_page_size,
        )
    }
}

/// Parse a path id. Non-numeric or non-positive values are client errors.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::bad_request("invalid id parameter")),
    }
}
