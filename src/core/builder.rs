//! The release builder: one sequential pass over the configured targets
//!
//! Every target runs compile → (optional) compress → archive → clean up.
//! Failures are contained at the target boundary: a broken compile or a
//! missing compressor is reported and the run moves on to the next target.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::archive::write_release_archive;
use crate::core::config::PackConfig;
use crate::core::error::{BuildError, PackError, PackResult};
use crate::core::target::TargetDescriptor;
use crate::core::toolchain::Toolchain;
use crate::ui;

/// Per-target result, as reported in the text summary and `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
  /// Short target label, e.g. `linux/amd64`
  pub target: String,

  /// Archive file name this target produces (or would have produced)
  pub artifact: String,

  pub status: OutcomeStatus,

  /// Failure detail for non-packaged targets
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeStatus {
  /// Archive written successfully
  Packaged,
  /// Compiler returned non-zero; target abandoned
  CompileFailed,
  /// Any other failure in the target's pipeline
  Failed,
}

/// Drives the per-target pipeline
pub struct ReleaseBuilder<'a> {
  config: &'a PackConfig,
  toolchain: Toolchain,
  use_compression: bool,

  /// Suppress progress output (used by --json, which owns stdout)
  quiet: bool,

  /// Directory where binaries and archives are produced
  work_dir: PathBuf,
}

impl<'a> ReleaseBuilder<'a> {
  pub fn new(config: &'a PackConfig, use_compression: bool, quiet: bool, work_dir: PathBuf) -> Self {
    Self {
      config,
      toolchain: Toolchain::new(&config.tools),
      use_compression,
      quiet,
      work_dir,
    }
  }

  fn info(&self, msg: impl AsRef<str>) {
    if !self.quiet {
      ui::info(msg);
    }
  }

  fn warn(&self, msg: impl AsRef<str>) {
    if !self.quiet {
      ui::warn(msg);
    }
  }

  fn report(&self, msg: impl AsRef<str>) {
    if !self.quiet {
      ui::error(msg);
    }
  }

  /// Process every configured target, in order, isolating failures per target
  ///
  /// Never fails as a whole: each target's outcome is recorded and the
  /// process exit code is not affected by per-target failures.
  pub fn build_all(&self) -> Vec<TargetOutcome> {
    let project = &self.config.project.name;
    self.info(format!("🚀 Building {} ...", project));

    // One warning up front, not per target
    if !self.config.project.config_file.exists() {
      self.warn(format!(
        "⚠️  Config file {} not found; archives will omit it.",
        self.config.project.config_file.display()
      ));
    }

    let mut outcomes = Vec::with_capacity(self.config.targets.len());
    for target in &self.config.targets {
      outcomes.push(self.build_target(target));
    }
    outcomes
  }

  /// Run the full pipeline for one target
  fn build_target(&self, target: &TargetDescriptor) -> TargetOutcome {
    let project = &self.config.project.name;
    let archive_name = target.archive_name(project);
    let bin_path = self.work_dir.join(target.bin_filename(project));
    let archive_path = self.work_dir.join(&archive_name);

    self.info(format!("🔨 Building: {} ...", archive_name));

    let result = self.package(target, &bin_path, &archive_path);

    // The binary is temporary; drop it even when packaging only partially
    // succeeded
    if bin_path.exists()
      && let Err(e) = fs::remove_file(&bin_path)
    {
      self.warn(format!("⚠️  Could not remove {}: {}", bin_path.display(), e));
    }

    match result {
      Ok(()) => {
        self.info(format!("✅ Success: {}", archive_name));
        TargetOutcome {
          target: target.label(),
          artifact: archive_name,
          status: OutcomeStatus::Packaged,
          error: None,
        }
      }
      Err(PackError::Build(BuildError::CompilerFailed { program, reason })) => {
        let detail = format!("Compiler '{}' failed: {}", program, reason);
        self.report(format!("❌ Build failed: {}", detail));
        TargetOutcome {
          target: target.label(),
          artifact: archive_name,
          status: OutcomeStatus::CompileFailed,
          error: Some(detail),
        }
      }
      Err(e) => {
        self.report(format!("❌ Unknown error: {:?}", e));
        TargetOutcome {
          target: target.label(),
          artifact: archive_name,
          status: OutcomeStatus::Failed,
          error: Some(e.to_string()),
        }
      }
    }
  }

  /// Compile, optionally compress, and archive one target's binary
  fn package(&self, target: &TargetDescriptor, bin_path: &Path, archive_path: &Path) -> PackResult<()> {
    self
      .toolchain
      .compile(target, &self.config.project.entry_point, bin_path)?;

    if self.use_compression {
      self.info("   Compressing with UPX...");
      if let Err(e) = self.toolchain.compress(bin_path) {
        // Archive proceeds with the uncompressed binary
        self.warn(format!("⚠️  UPX compression failed or not installed, skipping: {}", e));
      }
    }

    write_release_archive(
      archive_path,
      bin_path,
      &self.config.project.config_file,
      &self.config.project.readme_file,
    )
  }

  /// Render the dry-run plan for all targets
  pub fn plan_lines(&self) -> Vec<String> {
    let project = &self.config.project.name;
    let mut lines = Vec::new();
    for target in &self.config.targets {
      let bin = self.work_dir.join(target.bin_filename(project));
      lines.push(format!("{}:", target.label()));
      lines.push(format!(
        "  {}",
        self
          .toolchain
          .compile_command_display(&self.config.project.entry_point, &bin)
      ));
      if self.use_compression {
        lines.push(format!("  {}", self.toolchain.compress_command_display(&bin)));
      }
      lines.push(format!("  -> {}", target.archive_name(project)));
    }
    lines
  }
}
