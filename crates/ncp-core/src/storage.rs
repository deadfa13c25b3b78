//! Download file lifecycle.
//!
//! Bodies are streamed into `<name>.part` next to the final path and renamed
//! into place once the transfer succeeded, so a failed download never leaves
//! a file at the final location.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `fw.bin` → `fw.bin.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for an in-progress download.
pub struct PartFile {
    file: BufWriter<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`, creating parent directories.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file: BufWriter::new(file),
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync and rename the temp file to the final path. On failure the
    /// temp file is removed.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let PartFile {
            file,
            temp_path,
            final_path,
        } = self;
        let result = file
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|f| f.sync_all())
            .and_then(|()| fs::rename(&temp_path, &final_path));
        match result {
            Ok(()) => Ok(final_path),
            Err(e) => {
                remove_temp(&temp_path);
                Err(e)
            }
        }
    }

    /// Drop the temp file; the final path is left untouched.
    pub fn discard(self) {
        drop(self.file);
        remove_temp(&self.temp_path);
    }
}

fn remove_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!("could not remove {}: {}", temp_path.display(), e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
