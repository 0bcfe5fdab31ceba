#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, PackError, PackResult, ResultExt};
use crate::core::target::TargetDescriptor;

/// Configuration for relpack
/// Searched in order: relpack.toml, .relpack.toml
///
/// Every field has a default, and the defaults together reproduce the
/// reference project layout (ip-resolver, built from ../cmd/server/main.go
/// into ./release). Running relpack with no config file at all is a
/// supported mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub tools: ToolsConfig,
  #[serde(default = "default_targets")]
  pub targets: Vec<TargetDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Project name; also the file name of the compiled binary
  #[serde(default = "default_project_name")]
  pub name: String,

  /// Compiler entry point, relative to the release directory
  #[serde(default = "default_entry_point")]
  pub entry_point: PathBuf,

  /// Runtime config file bundled into each archive as `config.yaml` (if present)
  #[serde(default = "default_config_file")]
  pub config_file: PathBuf,

  /// Documentation file bundled into each archive under its own name (if present)
  #[serde(default = "default_readme_file")]
  pub readme_file: PathBuf,

  /// Directory where artifacts are produced; created and entered at startup
  #[serde(default = "default_release_dir")]
  pub release_dir: PathBuf,
}

/// External tool program names
///
/// Overridable so deployments can pin an absolute toolchain path and tests
/// can substitute stubs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
  #[serde(default = "default_go_program")]
  pub go: String,

  #[serde(default = "default_upx_program")]
  pub upx: String,
}

fn default_project_name() -> String {
  "ip-resolver".to_string()
}

fn default_entry_point() -> PathBuf {
  PathBuf::from("../cmd/server/main.go")
}

fn default_config_file() -> PathBuf {
  PathBuf::from("../config.yaml")
}

fn default_readme_file() -> PathBuf {
  PathBuf::from("../README.md")
}

fn default_release_dir() -> PathBuf {
  PathBuf::from("./release")
}

fn default_go_program() -> String {
  "go".to_string()
}

fn default_upx_program() -> String {
  "upx".to_string()
}

fn default_targets() -> Vec<TargetDescriptor> {
  vec![TargetDescriptor::new(&[
    ("GOOS", "linux"),
    ("GOARCH", "amd64"),
    ("GOAMD64", "v3"),
  ])]
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      name: default_project_name(),
      entry_point: default_entry_point(),
      config_file: default_config_file(),
      readme_file: default_readme_file(),
      release_dir: default_release_dir(),
    }
  }
}

impl Default for ToolsConfig {
  fn default() -> Self {
    Self {
      go: default_go_program(),
      upx: default_upx_program(),
    }
  }
}

impl Default for PackConfig {
  fn default() -> Self {
    Self {
      project: ProjectConfig::default(),
      tools: ToolsConfig::default(),
      targets: default_targets(),
    }
  }
}

impl PackConfig {
  /// Find config file in search order: relpack.toml, .relpack.toml
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = vec![dir.join("relpack.toml"), dir.join(".relpack.toml")];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load configuration
  ///
  /// An explicit path must exist; otherwise the current directory is
  /// searched and built-in defaults are used when nothing is found.
  pub fn load(explicit: Option<&Path>, cwd: &Path) -> PackResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(PackError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        Some(path.to_path_buf())
      }
      None => Self::find_config_path(cwd),
    };

    let config = match config_path {
      Some(path) => Self::parse_file(&path)?,
      None => Self::default(),
    };

    config.validate()?;
    Ok(config)
  }

  fn parse_file(path: &Path) -> PackResult<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: PackConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    Ok(config)
  }

  /// Save config to relpack.toml (default location)
  pub fn save(&self, dir: &Path) -> PackResult<()> {
    let config_path = dir.join("relpack.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Validate the loaded configuration
  pub fn validate(&self) -> PackResult<()> {
    if self.project.name.trim().is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        reason: "project.name must not be empty".to_string(),
      }));
    }

    if self.project.entry_point.as_os_str().is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        reason: "project.entry_point must not be empty".to_string(),
      }));
    }

    if self.targets.is_empty() {
      return Err(PackError::Config(ConfigError::Invalid {
        reason: "at least one [[targets]] entry is required".to_string(),
      }));
    }

    for (idx, target) in self.targets.iter().enumerate() {
      if target.env.is_empty() {
        return Err(PackError::Config(ConfigError::Invalid {
          reason: format!("targets[{}] has an empty env list", idx),
        }));
      }
    }

    Ok(())
  }
}
