pub mod pagination;
pub mod query;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use query::optional_from_str;
pub use response::ApiResponse;
