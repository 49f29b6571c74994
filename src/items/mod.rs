//! The items page: a single collection of `title`/`content` documents bound
//! to a form and a results table.

mod controller;
mod model;


pub use controller::*;
pub use model::*;
