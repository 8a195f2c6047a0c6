use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// Write-then-rename wrapper for atomic exports.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl PendingWrite {
    /// Open a temp file next to `target`. Refuses to clobber an existing file unless `force`.
    pub fn open(target: &Path, force: bool) -> Result<Self> {
        assert_not_stdout(target)?;
        let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("[io::fs] create dir {}", parent.display()))?;
        if !force && target.exists() {
            bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
        }
        let tmp = NamedTempFile::new_in(parent)
            .context("[io::fs] create temp file")?;

        Ok(Self { target: target.to_path_buf(), tmp })
    }

    /// Flush, fsync and move the temp file into place.
    pub fn finalize(mut self) -> Result<PathBuf> {
        self.tmp.flush().context("[io::fs] flush temp file")?;
        self.tmp.as_file().sync_all().ok(); // best-effort fsync file
        self.tmp.persist(&self.target)
            .with_context(|| format!("[io::fs] rename to {}", self.target.display()))?;
        if let Some(dir) = self.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(self.target)
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

/// Atomically write `bytes` to `target`.
pub fn write_atomic(target: &Path, bytes: &[u8], force: bool) -> Result<PathBuf> {
    let mut pending = PendingWrite::open(target, force)?;
    pending.write_all(bytes)
        .with_context(|| format!("[io::fs] write {}", target.display()))?;
    pending.finalize()
}

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}
