//! Pixelforge Core
//!
//! Core types shared by every Pixelforge crate.
//!
//! This crate contains:
//! - Domain types: Jobs, job items, config status, theme preference
//! - DTOs: Request payloads for the backend command surface
//! - Pricing: Per-item prices and the option catalogues offered to users

pub mod domain;
pub mod dto;
pub mod pricing;

pub use pricing::calculate_cost;
