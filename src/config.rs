//! Layered settings: struct defaults, an optional TOML file, then
//! `RONDO__SECTION__KEY` environment variables.

mod load;
mod schema;

pub use schema::*;
