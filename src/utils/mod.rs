pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::{SafeElementIdI64, SafeIDI64, SafePageIdI64, SafeSlug};
pub use file_magic::{MediaKind, validate_magic_bytes};
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::{contains_pattern, escape_like_pattern};
