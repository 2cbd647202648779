//! DropCraft Core Types
//!
//! This crate defines the fundamental data structures shared by every
//! DropCraft crate: allocation rows, alias sets, canonical leaves, the relay
//! configuration and the unified error type.

mod config;
mod error;
mod table;
mod types;

pub use config::*;
pub use error::*;
pub use table::*;
pub use types::*;
