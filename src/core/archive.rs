//! Release archive writing
//!
//! Each target produces one zip archive holding the compiled binary at the
//! archive root, plus the runtime config (under the fixed name
//! `config.yaml`) and the documentation file when they exist on disk.

use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::core::error::{BuildError, PackError, PackResult, ResultExt};

/// Fixed in-archive name for the bundled runtime config
pub const CONFIG_ENTRY_NAME: &str = "config.yaml";

/// Write the release archive for one target
///
/// `binary` must exist; `config_file` and `readme_file` are included only
/// when present. The archive uses maximum-level deflate throughout.
pub fn write_release_archive(
  archive_path: &Path,
  binary: &Path,
  config_file: &Path,
  readme_file: &Path,
) -> PackResult<()> {
  if !binary.exists() {
    return Err(PackError::Build(BuildError::MissingBinary {
      path: binary.to_path_buf(),
    }));
  }

  let file = File::create(archive_path)
    .with_context(|| format!("Failed to create archive {}", archive_path.display()))?;
  let mut zip = ZipWriter::new(BufWriter::new(file));

  let deflate9 = |mode: u32| {
    SimpleFileOptions::default()
      .compression_method(CompressionMethod::Deflated)
      .compression_level(Some(9))
      .unix_permissions(mode)
  };

  let bin_name = binary
    .file_name()
    .ok_or_else(|| PackError::message(format!("Binary path has no file name: {}", binary.display())))?
    .to_string_lossy()
    .into_owned();
  add_entry(&mut zip, &bin_name, binary, deflate9(0o755))?;

  if config_file.exists() {
    add_entry(&mut zip, CONFIG_ENTRY_NAME, config_file, deflate9(0o644))?;
  }

  if readme_file.exists() {
    let readme_name = readme_file
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "README.md".to_string());
    add_entry(&mut zip, &readme_name, readme_file, deflate9(0o644))?;
  }

  let mut inner = zip.finish().context("Failed to finalize archive")?;
  inner.flush().context("Failed to flush archive")?;
  Ok(())
}

fn add_entry<W: Write + Seek>(
  zip: &mut ZipWriter<W>,
  name: &str,
  src: &Path,
  options: SimpleFileOptions,
) -> PackResult<()> {
  zip
    .start_file(name, options)
    .with_context(|| format!("Failed to start archive entry '{}'", name))?;
  let mut reader = File::open(src).with_context(|| format!("Failed to open {}", src.display()))?;
  io::copy(&mut reader, zip).with_context(|| format!("Failed to write archive entry '{}'", name))?;
  Ok(())
}
