//! Application core for FoodSave
//!
//! This crate wires the search library into an application:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every field
//! - **Catalog**: Loading the product collection document
//! - **Verification**: Expiring phone verification codes with attempt limits
//!
//! # Example
//!
//! ```rust,no_run
//! use foodsave_core::{catalog, config::Config};
//!
//! let config = Config::load(None)?;
//! let products = catalog::load_products("data/products.json")?;
//! let results = config.product_searcher()?.search(&products, "молоко");
//! # Ok::<(), foodsave_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod verification;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{load_products, parse_products};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::verification::{VerificationStore, VerifyOutcome};
}
