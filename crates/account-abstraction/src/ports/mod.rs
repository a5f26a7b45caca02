//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: `AccountApi`, the account's public contract
//! - **Outbound (Driven)**: `AccountStorage`, `CallDispatcher`, `CallerIdentity`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
