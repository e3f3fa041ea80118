use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Scoped handle to the annotated image returned by the service.
///
/// The bytes land in a named temp file whose path doubles as the displayable
/// reference. Dropping the handle removes the file, so a handle abandoned on
/// an error path or replaced by a newer submission never leaves data behind.
#[derive(Debug)]
pub struct AnnotatedImage {
    file: NamedTempFile,
}

impl AnnotatedImage {
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        debug!(
            "annotated image staged at {} ({} bytes)",
            file.path().display(),
            bytes.len()
        );
        Ok(Self { file })
    }

    /// Path a viewer can open while the handle lives.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copies the image out of the scoped file to a caller-owned location.
    pub fn persist_to(&self, dest: &Path) -> io::Result<u64> {
        fs::copy(self.file.path(), dest)
    }

    /// Explicit release; dropping the handle has the same effect.
    pub fn release(self) {
        debug!("releasing annotated image at {}", self.file.path().display());
    }
}
