pub mod errors;
pub mod format;
pub mod table;

pub use errors::{extract_clean_error, AppError, ServiceError};
pub use format::{description_or_placeholder, format_amount, format_created_at, NO_DESCRIPTION};
pub use table::Table;
