// src/exec/mod.rs

//! Reload capabilities used by the manifest host.
//!
//! - [`command`] reloads a resource by running a shell command.
//! - [`memory`] reloads a resource by re-reading its file into memory.
//!
//! Both implement [`crate::host::Reloadable`]; other hosts bring their own.

pub mod command;
pub mod memory;

pub use command::CommandReload;
pub use memory::InMemoryReload;
