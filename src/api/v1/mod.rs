//! V1 API handlers.

mod documents;


pub use documents::*;
