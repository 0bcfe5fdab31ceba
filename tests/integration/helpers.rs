//! Test helpers for integration tests

use std::fs;
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Stub compiler: writes a fake binary to the -o path, recording the
/// target env; exits non-zero when GOOS=broken
const STUB_GO: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then shift; out="$1"; fi
  shift
done
if [ "$GOOS" = "broken" ]; then
  echo "stub compile error" >&2
  exit 1
fi
printf 'fake binary GOOS=%s GOARCH=%s' "$GOOS" "$GOARCH" > "$out"
"#;

/// Stub compressor: rewrites the binary in place with a marker prefix
const STUB_UPX: &str = r#"#!/bin/sh
for arg in "$@"; do
  bin="$arg"
done
content=$(cat "$bin")
printf 'UPX!%s' "$content" > "$bin"
"#;

/// A temporary project tree mimicking the reference layout:
/// cmd/server/main.go, config.yaml, README.md, plus a relpack.toml whose
/// `[tools]` point at stub scripts under bin/
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project with a working stub compiler and a missing compressor
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    fs::create_dir_all(path.join("cmd/server"))?;
    fs::write(path.join("cmd/server/main.go"), "package main\n\nfunc main() {}\n")?;
    fs::write(path.join("config.yaml"), "listen: \":8080\"\ncache_ttl: 300\n")?;
    fs::write(path.join("README.md"), "# ip-resolver\n\nResolve IPs.\n")?;

    let project = Self { _root: root, path };
    let go = project.write_stub("go", STUB_GO)?;
    project.write_relpack_toml(&go, "upx-not-installed-anywhere", None)?;
    Ok(project)
  }

  /// Write an executable stub script under bin/, returning its absolute path
  pub fn write_stub(&self, name: &str, content: &str) -> Result<String> {
    let bin_dir = self.path.join("bin");
    fs::create_dir_all(&bin_dir)?;
    let stub = bin_dir.join(name);
    fs::write(&stub, content)?;
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755))?;
    Ok(stub.to_string_lossy().to_string())
  }

  /// Point `[tools] upx` at a working stub compressor
  pub fn install_upx_stub(&self) -> Result<()> {
    let go = self.path.join("bin/go").to_string_lossy().to_string();
    let upx = self.write_stub("upx", STUB_UPX)?;
    self.write_relpack_toml(&go, &upx, None)
  }

  /// Rewrite relpack.toml with the given target table bodies
  /// (each entry is the inner `env = [...]` line)
  pub fn set_targets(&self, target_envs: &[&str]) -> Result<()> {
    let go = self.path.join("bin/go").to_string_lossy().to_string();
    self.write_relpack_toml(&go, "upx-not-installed-anywhere", Some(target_envs))
  }

  fn write_relpack_toml(&self, go: &str, upx: &str, target_envs: Option<&[&str]>) -> Result<()> {
    let default_target = r#"env = [["GOOS", "linux"], ["GOARCH", "amd64"], ["GOAMD64", "v3"]]"#;
    let default_targets = [default_target];
    let envs = target_envs.unwrap_or(&default_targets);

    let mut toml = format!(
      "[project]\nname = \"ip-resolver\"\n\n[tools]\ngo = \"{}\"\nupx = \"{}\"\n",
      go, upx
    );
    for env in envs {
      toml.push_str("\n[[targets]]\n");
      toml.push_str(env);
      toml.push('\n');
    }

    fs::write(self.path.join("relpack.toml"), toml)?;
    Ok(())
  }

  /// Path of a file inside the release directory
  pub fn release_file(&self, name: &str) -> PathBuf {
    self.path.join("release").join(name)
  }

  /// Sorted entry names of an archive in the release directory
  pub fn archive_entries(&self, name: &str) -> Result<Vec<String>> {
    let file = fs::File::open(self.release_file(name))?;
    let archive = zip::ZipArchive::new(file)?;
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    Ok(names)
  }

  /// Raw bytes of one archive entry
  pub fn archive_entry_bytes(&self, name: &str, entry: &str) -> Result<Vec<u8>> {
    let file = fs::File::open(self.release_file(name))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut entry = archive.by_name(entry)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
  }
}

/// Run the relpack CLI, failing the test on a non-zero exit
pub fn run_relpack(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relpack_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "relpack command failed: relpack {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the relpack CLI, returning the output regardless of exit status
pub fn run_relpack_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relpack_bin = env!("CARGO_BIN_EXE_relpack");

  Command::new(relpack_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relpack")
}
