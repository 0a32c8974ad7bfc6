//! Utility functions and helpers.

pub mod sql;

// Re-export commonly used helpers
pub use sql::{
    escape_like, mask_database_url, substitute_schema, truncate_message, MAX_ERROR_LEN,
    SCHEMA_TOKEN,
};
