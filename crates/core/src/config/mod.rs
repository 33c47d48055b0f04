//! Configuration loading and schema definitions
//!
//! One TOML file configures search, browse, suggestions, verification
//! and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
