use crate::error::{CmrMetaError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Resource-fork directory added by macOS archivers
const MACOS_METADATA_DIR: &str = "__MACOSX/";

/// Upper bound on the buffer reserved from an entry's declared size
///
/// The declared size comes from the archive headers and may be corrupt.
const MAX_PREALLOC_BYTES: u64 = 64 * 1024 * 1024;

/// Checks if a path names a zip archive (by extension, case-insensitive)
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Open zip archive with entry-level access
pub struct ArchiveReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ArchiveReader {
    /// Opens a zip archive
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid zip
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file).map_err(|e| {
            CmrMetaError::ArchiveError(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Names of file entries in sorted order
    ///
    /// Directory entries and macOS resource forks are left out.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| !name.ends_with('/') && !name.starts_with(MACOS_METADATA_DIR))
            .map(|name| name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Reads one entry fully into memory
    pub fn read(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self.archive.by_name(name).map_err(|e| {
            CmrMetaError::ArchiveError(format!("{}: entry '{}': {}", self.path.display(), name, e))
        })?;
        let mut buffer = Vec::with_capacity(entry.size().min(MAX_PREALLOC_BYTES) as usize);
        entry.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Reads a single entry from an archive on disk
pub fn read_entry(archive: &Path, entry: &str) -> Result<Vec<u8>> {
    ArchiveReader::open(archive)?.read(entry)
}
