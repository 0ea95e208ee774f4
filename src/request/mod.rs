/// Request assembly: command option values to API request bodies. No I/O.
pub mod build;
pub mod errors;
pub mod flags;

pub use build::{ContentsParams, SearchParams, build_contents_request, build_search_request};
pub use errors::RequestError;
pub use flags::ContentFlags;
