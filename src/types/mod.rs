//! Shared API types: response envelopes and pagination.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use response::{MessageResponse, NoContent};
