//! itemdesk: a CRUD facade over a document store, the items page built on
//! it, and a JSON API exposing the facade per collection.

pub mod api;
pub mod db;
pub mod facade;
pub mod items;
pub mod paths;
pub mod ui;

#[cfg(test)]
mod test_support;
