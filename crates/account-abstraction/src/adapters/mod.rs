//! # Adapters Layer (Outer Hexagon)
//!
//! In-process implementations of the outbound ports.

pub mod caller;
pub mod memory_storage;
pub mod service_directory;

pub use caller::*;
pub use memory_storage::*;
pub use service_directory::*;
