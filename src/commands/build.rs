//! Build command implementation
//!
//! Loads the configuration, enters the release directory, and runs the
//! sequential per-target pipeline. Per-target failures are reported in the
//! summary but never change the process exit code; only failures out here
//! (config load, release directory setup) are fatal.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::builder::{OutcomeStatus, ReleaseBuilder, TargetOutcome};
use crate::core::config::PackConfig;
use crate::core::error::{PackResult, ResultExt};
use crate::ui;

/// Run the build command
pub fn run_build(config_path: Option<PathBuf>, upx: bool, dry_run: bool, json: bool) -> PackResult<()> {
  let cwd = env::current_dir()?;
  let config = PackConfig::load(config_path.as_deref(), &cwd)?;

  if dry_run {
    let builder = ReleaseBuilder::new(&config, upx, json, PathBuf::new());
    println!("DRY RUN: Would execute:");
    for line in builder.plan_lines() {
      println!("  {}", line);
    }
    return Ok(());
  }

  // Create and enter the release directory; everything below runs relative
  // to it (entry point and bundle paths are configured relative to here)
  let release_dir = &config.project.release_dir;
  if !release_dir.as_os_str().is_empty() {
    fs::create_dir_all(release_dir)
      .with_context(|| format!("Failed to create release directory {}", release_dir.display()))?;
    env::set_current_dir(release_dir)
      .with_context(|| format!("Failed to enter release directory {}", release_dir.display()))?;
  }

  let builder = ReleaseBuilder::new(&config, upx, json, PathBuf::new());
  let outcomes = builder.build_all();

  if json {
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
  } else {
    print_summary(&outcomes);
  }

  Ok(())
}

fn print_summary(outcomes: &[TargetOutcome]) {
  let packaged = outcomes
    .iter()
    .filter(|o| o.status == OutcomeStatus::Packaged)
    .count();
  ui::info(format!("📦 Done: {}/{} targets packaged", packaged, outcomes.len()));

  for outcome in outcomes {
    if outcome.status != OutcomeStatus::Packaged {
      ui::warn(format!(
        "   {} ({}): {}",
        outcome.artifact,
        outcome.target,
        outcome.error.as_deref().unwrap_or("failed")
      ));
    }
  }
}
