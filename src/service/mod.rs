//! Listing pipeline and pagination over an already-fetched collection.

mod listing;
mod pagination;
pub use listing::{Listing, ListingPipeline, ListingRequest, SortDir, RESERVED_QUERY_KEYS};
pub use pagination::{paginate, paginate_with_split, PageRequest, PageWindow, MAX_SAFE_INTEGER};
