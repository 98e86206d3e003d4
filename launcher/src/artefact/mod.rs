//! Release artefacts: where they come from and how they are unpacked.
//!
//! # Sub-modules
//!
//! - [`platform`] - Supported hosts and per-platform naming (`Platform`).
//! - [`release`] - Published releases, their assets, and version lookup.
//! - [`download`] - Release listing and asset download over HTTP.
//! - [`extraction`] - Zip extraction with path traversal protection.

pub mod download;
pub mod extraction;
pub mod platform;
pub mod release;
