//! CLI commands for relpack
//!
//! - **build**: the whole pipeline — load config, enter the release
//!   directory, then compile/compress/archive every configured target

pub mod build;

pub use build::run_build;
