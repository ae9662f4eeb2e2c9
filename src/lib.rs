//! Waybill: data normalization for a vehicle-import tracker.
//!
//! - [`text`]: mojibake recovery for fields that were mis-decoded upstream.
//! - [`lifecycle`]: a car's pipeline stage from its logistics fields.
//! - [`directory`]: a lazily loaded agent id → name fallback.
//! - [`model`], [`display`], [`api`]: ingestion, presentation, and the
//!   backend listings that feed them.

pub mod api;
pub mod config;
pub mod directory;
pub mod display;
pub mod lifecycle;
pub mod model;
pub mod text;
