//! Core engine for relpack operations
//!
//! This module contains the building blocks of the release pipeline:
//!
//! - **archive**: Zip archive writing (binary + config + docs, deflate level 9)
//! - **builder**: Sequential per-target pipeline with per-target error isolation
//! - **config**: relpack configuration (relpack.toml) parsing and validation
//! - **error**: Error types with contextual help messages and exit codes
//! - **target**: Build-target descriptors and artifact naming
//! - **toolchain**: External compiler/compressor process invocation

pub mod archive;
pub mod builder;
pub mod config;
pub mod error;
pub mod target;
pub mod toolchain;
