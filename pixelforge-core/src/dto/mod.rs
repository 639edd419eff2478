//! Data Transfer Objects for the backend command surface
//!
//! Each command takes a JSON object of named arguments. These types are the
//! argument objects, serialized exactly as the backend expects them.

pub mod config;
pub mod job;
pub mod upload;
