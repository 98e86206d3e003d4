//! Vectra launcher library.
//!
//! This crate installs, switches between, and updates side-by-side versions
//! of the Vectra compiler, and forwards every other command to the active
//! version. It backs the `vecc` binary and can be driven programmatically by
//! supplying its collaborators.
//!
//! # Modules
//!
//! - [`artefact`] - Release discovery, download, and archive extraction
//! - [`cli`] - Command-line argument definitions and passthrough routing
//! - [`config`] - Persisted launcher configuration
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types with recovery hints
//! - [`layout`] - Paths under the installation root
//! - [`list`] - Version rows for `vecc list`
//! - [`list_output`] - Output formatting for version listing
//! - [`orchestrator`] - Command orchestration
//! - [`output`] - Stderr helpers, update notices, and `PATH` instructions
//! - [`prebuilt`] - Compiler download and installation pipeline
//! - [`process`] - Compiler process execution
//! - [`prompt`] - Yes/no confirmation prompts
//! - [`resolver`] - Active version resolution
//! - [`selector`] - The active version selector
//! - [`self_install`] - Launcher self installation
//! - [`settings`] - `vecc config` settings
//! - [`store`] - Configuration persistence
//! - [`update_gate`] - Time-gated update checks
//! - [`version`] - Semantic versions

pub mod artefact;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod error;
pub mod layout;
pub mod list;
pub mod list_output;
pub mod orchestrator;
pub mod output;
pub mod prebuilt;
pub mod process;
pub mod prompt;
pub mod resolver;
pub mod selector;
pub mod self_install;
pub mod settings;
pub mod store;
pub mod update_gate;
pub mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
