pub mod error;
pub mod filters;
pub mod metadata;
pub mod search;

pub use error::FilterError;
pub use filters::{Filters, SortDirection};
pub use metadata::Metadata;
