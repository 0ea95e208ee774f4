/// Exa API layer: wire types, typed errors, and the blocking client.
pub mod client;
pub mod errors;
pub mod types;

pub use client::{API_KEY_ENV, ExaClient};
pub use errors::ApiError;
pub use types::{ContentsResponse, SearchResponse, SearchResult};
