//! End-to-end packaging scenarios

use crate::helpers::{TestProject, run_relpack};
use anyhow::Result;
use std::fs;

#[test]
fn test_single_target_produces_complete_archive() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_relpack(&project.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Exactly the expected archive, with all three entries
  let entries = project.archive_entries("ip-resolver-linux-amd64-v3.zip")?;
  assert_eq!(entries, vec!["README.md", "config.yaml", "ip-resolver"]);

  // Entries are byte-identical to their sources
  assert_eq!(
    project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "config.yaml")?,
    fs::read(project.path.join("config.yaml"))?
  );
  assert_eq!(
    project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "README.md")?,
    fs::read(project.path.join("README.md"))?
  );
  assert_eq!(
    project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "ip-resolver")?,
    b"fake binary GOOS=linux GOARCH=amd64"
  );

  // Temporary binary cleaned up
  assert!(!project.release_file("ip-resolver").exists());

  assert!(stdout.contains("✅ Success: ip-resolver-linux-amd64-v3.zip"));
  Ok(())
}

#[test]
fn test_missing_config_warns_once_before_builds() -> Result<()> {
  let project = TestProject::new()?;
  fs::remove_file(project.path.join("config.yaml"))?;

  let output = run_relpack(&project.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Archive omits the config entry
  let entries = project.archive_entries("ip-resolver-linux-amd64-v3.zip")?;
  assert_eq!(entries, vec!["README.md", "ip-resolver"]);

  // Warning precedes the first build line
  let warn_at = stdout.find("not found").expect("missing-config warning");
  let build_at = stdout.find("🔨 Building").expect("build line");
  assert!(warn_at < build_at);
  Ok(())
}

#[test]
fn test_missing_compressor_warns_and_packages_uncompressed() -> Result<()> {
  let project = TestProject::new()?;

  // Default TestProject points upx at a nonexistent program
  let output = run_relpack(&project.path, &["--upx"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("UPX compression failed or not installed"));

  // Archive still produced, with the original binary bytes
  assert_eq!(
    project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "ip-resolver")?,
    b"fake binary GOOS=linux GOARCH=amd64"
  );
  Ok(())
}

#[test]
fn test_compressor_runs_before_archiving() -> Result<()> {
  let project = TestProject::new()?;
  project.install_upx_stub()?;

  run_relpack(&project.path, &["--upx"])?;

  // The stub compressor prefixes the binary in place, so the archive holds
  // the compressed bytes
  let bytes = project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "ip-resolver")?;
  assert!(bytes.starts_with(b"UPX!"));
  Ok(())
}

#[test]
fn test_compile_failure_does_not_stop_the_run() -> Result<()> {
  let project = TestProject::new()?;
  project.set_targets(&[
    r#"env = [["GOOS", "broken"], ["GOARCH", "amd64"]]"#,
    r#"env = [["GOOS", "linux"], ["GOARCH", "amd64"]]"#,
  ])?;

  // run_relpack asserts exit code 0: per-target failures are not fatal
  let output = run_relpack(&project.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("❌ Build failed"));

  // First target produced nothing, second packaged normally
  assert!(!project.release_file("ip-resolver-broken-amd64.zip").exists());
  let entries = project.archive_entries("ip-resolver-linux-amd64.zip")?;
  assert_eq!(entries, vec!["README.md", "config.yaml", "ip-resolver"]);
  assert!(stdout.contains("1/2 targets packaged"));
  Ok(())
}

#[test]
fn test_windows_target_gets_exe_suffix() -> Result<()> {
  let project = TestProject::new()?;
  project.set_targets(&[r#"env = [["GOOS", "windows"], ["GOARCH", "amd64"]]"#])?;

  run_relpack(&project.path, &[])?;

  let entries = project.archive_entries("ip-resolver-windows-amd64.zip")?;
  assert_eq!(entries, vec!["README.md", "config.yaml", "ip-resolver.exe"]);
  assert!(!project.release_file("ip-resolver.exe").exists());
  Ok(())
}

#[test]
fn test_microarch_value_is_ignored_in_archive_name() -> Result<()> {
  let project = TestProject::new()?;
  // GOAMD64=v2 in the env, but the archive tag stays v3
  project.set_targets(&[r#"env = [["GOOS", "linux"], ["GOARCH", "amd64"], ["GOAMD64", "v2"]]"#])?;

  run_relpack(&project.path, &[])?;

  assert!(project.release_file("ip-resolver-linux-amd64-v3.zip").exists());
  Ok(())
}

#[test]
fn test_rerun_overwrites_previous_archive() -> Result<()> {
  let project = TestProject::new()?;

  run_relpack(&project.path, &[])?;

  let updated = "# ip-resolver\n\nUpdated readme for the second run.\n";
  fs::write(project.path.join("README.md"), updated)?;
  run_relpack(&project.path, &[])?;

  let entries = project.archive_entries("ip-resolver-linux-amd64-v3.zip")?;
  assert_eq!(entries, vec!["README.md", "config.yaml", "ip-resolver"]);
  assert_eq!(
    project.archive_entry_bytes("ip-resolver-linux-amd64-v3.zip", "README.md")?,
    updated.as_bytes()
  );
  Ok(())
}
