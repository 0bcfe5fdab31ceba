//! External toolchain invocation
//!
//! Spawns the compiler and the optional binary compressor. Commands are
//! built as argument vectors (never a shell string), and the per-target
//! environment overlay is applied to the child process only; the parent
//! environment is never mutated.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::core::config::ToolsConfig;
use crate::core::error::{BuildError, PackError, PackResult};
use crate::core::target::TargetDescriptor;

/// Fixed compiler flags: strip debug info and symbol table, drop file
/// system paths from the binary
const COMPILE_FLAGS: [&str; 4] = ["build", "-ldflags", "-s -w", "-trimpath"];

/// Fixed compressor flags: maximum compression, quiet
const COMPRESS_FLAGS: [&str; 2] = ["-9", "-q"];

/// Handle to the external compiler and compressor programs
pub struct Toolchain {
  go: String,
  upx: String,
}

impl Toolchain {
  pub fn new(tools: &ToolsConfig) -> Self {
    Self {
      go: tools.go.clone(),
      upx: tools.upx.clone(),
    }
  }

  /// Compile the entry point into `bin` for the given target
  ///
  /// The child inherits the ambient environment with the target's pairs
  /// overlaid on top (later pairs for the same key win). Compiler output
  /// streams through to the console so build errors stay visible.
  pub fn compile(&self, target: &TargetDescriptor, entry: &Path, bin: &Path) -> PackResult<()> {
    let mut cmd = Command::new(&self.go);
    cmd.args(COMPILE_FLAGS).arg("-o").arg(bin).arg(entry);

    for (key, value) in &target.env {
      cmd.env(key, value);
    }

    let status = cmd.status().map_err(|e| {
      PackError::Build(BuildError::CompilerFailed {
        program: self.go.clone(),
        reason: e.to_string(),
      })
    })?;

    if !status.success() {
      return Err(PackError::Build(BuildError::CompilerFailed {
        program: self.go.clone(),
        reason: format!("exit code {}", status.code().unwrap_or(-1)),
      }));
    }

    Ok(())
  }

  /// Compress `bin` in place, suppressing the compressor's output streams
  pub fn compress(&self, bin: &Path) -> PackResult<()> {
    let status = Command::new(&self.upx)
      .args(COMPRESS_FLAGS)
      .arg(bin)
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .map_err(|e| {
        PackError::Build(BuildError::CompressorFailed {
          program: self.upx.clone(),
          reason: e.to_string(),
        })
      })?;

    if !status.success() {
      return Err(PackError::Build(BuildError::CompressorFailed {
        program: self.upx.clone(),
        reason: format!("exit code {}", status.code().unwrap_or(-1)),
      }));
    }

    Ok(())
  }

  /// Render the compile invocation for dry-run display
  pub fn compile_command_display(&self, entry: &Path, bin: &Path) -> String {
    format!(
      "{} build -ldflags \"-s -w\" -trimpath -o {} {}",
      self.go,
      bin.display(),
      entry.display()
    )
  }

  /// Render the compress invocation for dry-run display
  pub fn compress_command_display(&self, bin: &Path) -> String {
    format!("{} -9 -q {}", self.upx, bin.display())
  }
}
