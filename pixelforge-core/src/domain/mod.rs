//! Core domain types
//!
//! These types mirror the payloads returned by the generation backend and are
//! shared between the client (transport) and the stores (state).

pub mod config;
pub mod job;
pub mod theme;
pub mod upload;
