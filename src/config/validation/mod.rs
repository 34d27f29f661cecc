//! Configuration validation
//!
//! Each configuration section validates itself; `Config::validate` wraps the
//! messages into configuration errors.

mod trait_def;
mod validators;


pub use trait_def::Validate;
