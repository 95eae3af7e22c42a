//! Where schedule documents come from and where they are kept.
//!
//! The [`Store`] persists the working copy between runs; the remote
//! fetcher retrieves the published copy.

/// The published copy, fetched over HTTP.
pub mod remote;
mod store;

pub use remote::{Fetch, FetchError, RemoteFetcher};
pub use store::{FileStore, MemoryStore, Store, StoreError};
