//! Integration tests for relpack
//!
//! These drive the real binary against temporary project trees, with stub
//! compiler/compressor scripts substituted through `[tools]`. The stubs are
//! POSIX shell, so the suite is unix-only.

#[cfg(unix)]
mod helpers;
#[cfg(unix)]
mod test_build;
