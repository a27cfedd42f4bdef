use crate::discovery::archive::read_entry;
use crate::error::Result;
use crate::extraction::open::{read_header_bytes, read_header_file};
use dicom_object::DefaultDicomObject;
use std::fmt;
use std::path::{Path, PathBuf};

/// Separator between archive path and entry name in rendered references
pub const ARCHIVE_ENTRY_SEPARATOR: &str = "!/";

/// Location of one DICOM file, on disk or inside a zip archive
///
/// Both substrates are opened through [`FileReference::open`], so callers
/// never branch on where a file lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileReference {
    /// Regular file on the filesystem
    Plain(PathBuf),

    /// Entry inside a zip archive
    ArchiveEntry { archive: PathBuf, entry: String },
}

impl FileReference {
    /// Creates a reference to a regular file
    pub fn plain(path: impl Into<PathBuf>) -> Self {
        FileReference::Plain(path.into())
    }

    /// Creates a reference to an entry inside an archive
    pub fn archive_entry(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        FileReference::ArchiveEntry {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Path of the file, or of the containing archive
    pub fn root_path(&self) -> &Path {
        match self {
            FileReference::Plain(path) => path,
            FileReference::ArchiveEntry { archive, .. } => archive,
        }
    }

    /// Entry name inside the archive, if any
    pub fn entry_path(&self) -> Option<&str> {
        match self {
            FileReference::Plain(_) => None,
            FileReference::ArchiveEntry { entry, .. } => Some(entry),
        }
    }

    pub fn is_archive_entry(&self) -> bool {
        matches!(self, FileReference::ArchiveEntry { .. })
    }

    /// Opens the referenced file and reads its header
    ///
    /// Archive entries are read into memory; nothing is extracted to disk.
    /// The underlying handle is closed before this returns.
    pub fn open(&self) -> Result<DefaultDicomObject> {
        match self {
            FileReference::Plain(path) => read_header_file(path),
            FileReference::ArchiveEntry { archive, entry } => {
                let buffer = read_entry(archive, entry)?;
                read_header_bytes(buffer)
            }
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileReference::Plain(path) => write!(f, "{}", path.display()),
            FileReference::ArchiveEntry { archive, entry } => write!(
                f,
                "{}{}{}",
                archive.display(),
                ARCHIVE_ENTRY_SEPARATOR,
                entry
            ),
        }
    }
}
