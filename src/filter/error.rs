use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("unsafe sort parameter: {0}")]
    UnsafeSort(String),

    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),

    #[error("page {0} is out of range")]
    PageOutOfRange(i64),

    #[error("page_size must be at least 1, got {0}")]
    InvalidPageSize(i64),

    #[error("page_size {requested} exceeds the maximum of {max}")]
    PageSizeTooLarge { requested: i64, max: i64 },
}
