//! Build-target descriptors and artifact naming
//!
//! A target is an ordered list of environment-variable pairs (GOOS, GOARCH,
//! GOAMD64, ...) handed to the compiler. Targets are plain data: adding a
//! platform is a config change, not a code change.

use serde::{Deserialize, Serialize};

/// Environment keys whose values become artifact-name tags
const TAG_KEYS: [&str; 2] = ["GOOS", "GOARCH"];

/// Micro-architecture level key (contributes a fixed tag, see `artifact_name`)
const MICROARCH_KEY: &str = "GOAMD64";

/// One compilation variant, described as ordered (key, value) env pairs
///
/// Pair order matters twice: tags are appended to the artifact name in pair
/// order, and later pairs for the same key overwrite earlier ones in the
/// spawned process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDescriptor {
  /// Ordered environment assignments, e.g. `[["GOOS", "linux"], ["GOARCH", "amd64"]]`
  pub env: Vec<(String, String)>,
}

impl TargetDescriptor {
  pub fn new(pairs: &[(&str, &str)]) -> Self {
    Self {
      env: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    }
  }

  /// Look up a key in the descriptor (last assignment wins, matching the
  /// overlay semantics of the spawned environment)
  pub fn env_value(&self, key: &str) -> Option<&str> {
    self.env.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Derive the artifact (archive stem) name for this target
  ///
  /// Starts from the project name and appends one `-<tag>` per pair, in
  /// pair order: GOOS and GOARCH contribute their values; a GOAMD64 key
  /// contributes the literal `v3` no matter what value it carries. That
  /// last rule reproduces the historical naming scheme, which downstream
  /// download scripts match on, so it is pinned by tests rather than
  /// fixed. Other keys contribute no tag.
  pub fn artifact_name(&self, project: &str) -> String {
    let mut name = project.to_string();
    for (key, value) in &self.env {
      if TAG_KEYS.contains(&key.as_str()) {
        name.push('-');
        name.push_str(value);
      } else if key == MICROARCH_KEY {
        name.push_str("-v3");
      }
    }
    name
  }

  /// Archive file name for this target
  pub fn archive_name(&self, project: &str) -> String {
    format!("{}.zip", self.artifact_name(project))
  }

  /// File name of the compiled binary
  ///
  /// Named after the project with no platform suffix; Windows targets get
  /// the `.exe` extension the linker expects there.
  pub fn bin_filename(&self, project: &str) -> String {
    if self.env_value("GOOS") == Some("windows") {
      format!("{}.exe", project)
    } else {
      project.to_string()
    }
  }

  /// Short human-readable label for log lines, e.g. `linux/amd64`
  pub fn label(&self) -> String {
    let os = self.env_value("GOOS").unwrap_or("?");
    let arch = self.env_value("GOARCH").unwrap_or("?");
    format!("{}/{}", os, arch)
  }
}
