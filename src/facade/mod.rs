//! Generic CRUD facade over document collections.
//!
//! A [`Collection`] is created from an injected store handle and a
//! collection name. It translates every store failure into a
//! [`FacadeError`] whose message names the operation and the identifiers it
//! was called with.

mod collection;
mod error;


pub use collection::{Collection, PREFIX_SENTINEL, prefix_range};
pub use error::{FacadeError, FacadeResult};
