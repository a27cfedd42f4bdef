use crate::discovery::archive::{is_archive_path, ArchiveReader};
use crate::error::{CmrMetaError, Result};
use crate::extraction::open::{read_header_bytes, read_header_file};
use crate::extraction::tags::{get_present_string_value, SERIES_DESCRIPTION};
use crate::types::{DedupKey, DiscoveryMap, FileReference};
use dicom_object::InMemDicomObject;
use log::{debug, info, warn};
use std::path::Path;
use walkdir::WalkDir;

/// Number of candidates between progress messages
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Finds one representative DICOM file per (PatientID, StudyDate)
///
/// Roots may be directories, zip archives or single files. Directories are
/// walked in sorted file name order and archive entries are visited in
/// sorted entry name order, so the first-seen-wins rule for duplicate keys
/// is reproducible across runs and platforms.
///
/// # Example
///
/// ```no_run
/// use cmrmeta_core::{Locator, SeriesFilter};
///
/// let filter = SeriesFilter::contains("stress");
/// let map = Locator::new()
///     .discover(&["input/zipped"], |desc| filter.matches(desc))
///     .unwrap();
/// println!("{} studies found", map.len());
/// ```
#[derive(Debug, Clone)]
pub struct Locator {
    /// Search zip files found while walking directories
    pub expand_archives: bool,

    /// Follow symbolic links while walking directories
    pub follow_links: bool,

    /// Candidates between progress messages (0 disables them)
    pub progress_interval: usize,
}

impl Default for Locator {
    fn default() -> Self {
        Self {
            expand_archives: true,
            follow_links: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: search zip files found inside directory roots
    pub fn expand_archives(mut self, expand: bool) -> Self {
        self.expand_archives = expand;
        self
    }

    /// Builder: follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Builder: progress message interval
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Walks all roots and returns the deduplicated discovery map
    ///
    /// `predicate` receives the SeriesDescription of every parsed candidate;
    /// case handling is up to the predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if no roots are given or a root does not exist.
    /// Problems with individual files or archives are logged and skipped.
    pub fn discover<P, F>(&self, roots: &[P], predicate: F) -> Result<DiscoveryMap>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> bool,
    {
        if roots.is_empty() {
            return Err(CmrMetaError::NoRoots);
        }
        if let Some(missing) = roots.iter().map(|p| p.as_ref()).find(|p| !p.exists()) {
            return Err(CmrMetaError::RootNotFound(missing.to_path_buf()));
        }

        let mut scan = Scan::new(self, &predicate);
        for (idx, root) in roots.iter().enumerate() {
            let root = root.as_ref();
            info!(
                "[{}/{}] Scanning `{}`",
                idx + 1,
                roots.len(),
                root.display()
            );

            if root.is_dir() {
                scan.walk_directory(root);
            } else if is_archive_path(root) {
                scan.scan_archive(root);
            } else {
                scan.scan_file(root);
            }
        }

        info!(
            "Discovery complete: {} candidates scanned, {} matched, {} unique studies",
            scan.scanned,
            scan.matched,
            scan.map.len()
        );
        if scan.map.is_empty() {
            warn!("No DICOM files matching the filter were found");
        }

        Ok(scan.map)
    }
}

/// State of a single discovery pass
struct Scan<'a, F> {
    locator: &'a Locator,
    predicate: &'a F,
    map: DiscoveryMap,
    scanned: usize,
    matched: usize,
}

impl<'a, F> Scan<'a, F>
where
    F: Fn(&str) -> bool,
{
    fn new(locator: &'a Locator, predicate: &'a F) -> Self {
        Self {
            locator,
            predicate,
            map: DiscoveryMap::new(),
            scanned: 0,
            matched: 0,
        }
    }

    fn walk_directory(&mut self, root: &Path) {
        let walker = WalkDir::new(root)
            .follow_links(self.locator.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing entry under `{}`: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if is_archive_path(path) {
                if self.locator.expand_archives {
                    self.scan_archive(path);
                } else {
                    debug!("Ignoring archive `{}`", path.display());
                }
            } else {
                self.scan_file(path);
            }
        }
    }

    fn scan_archive(&mut self, path: &Path) {
        let mut reader = match ArchiveReader::open(path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Skipping archive `{}`: {}", path.display(), e);
                return;
            }
        };

        info!("Inspecting archive `{}`", path.display());
        for name in reader.entry_names() {
            self.tick();
            let reference = FileReference::archive_entry(path, name.as_str());
            match reader.read(&name).and_then(read_header_bytes) {
                Ok(dcm) => self.consider(&dcm, reference),
                Err(e) => warn!("Skipping `{}`: {}", reference, e),
            }
        }
    }

    fn scan_file(&mut self, path: &Path) {
        self.tick();
        match read_header_file(path) {
            Ok(dcm) => self.consider(&dcm, FileReference::plain(path)),
            Err(e) => warn!("Skipping `{}`: {}", path.display(), e),
        }
    }

    /// Applies the description predicate and the dedup rule to one parsed file
    ///
    /// Only a missing SeriesDescription skips the file; an empty one is
    /// handed to the predicate as `""`.
    fn consider(&mut self, dcm: &InMemDicomObject, reference: FileReference) {
        let description = match get_present_string_value(dcm, SERIES_DESCRIPTION) {
            Some(description) => description,
            None => {
                warn!("Skipping `{}`: no SeriesDescription", reference);
                return;
            }
        };

        if !(self.predicate)(description.as_str()) {
            debug!("  checked: `{}` -> '{}'", reference, description);
            return;
        }
        self.matched += 1;

        let key = DedupKey::from_dicom(dcm);
        if self.map.contains_key(&key) {
            debug!("  duplicate: `{}` ({})", reference, key);
            return;
        }

        debug!("  recorded: `{}` ({})", reference, key);
        self.map.insert(key, reference);
    }

    fn tick(&mut self) {
        self.scanned += 1;
        let interval = self.locator.progress_interval;
        if interval > 0 && self.scanned % interval == 0 {
            info!(
                "  scanned {} candidates, {} unique studies so far",
                self.scanned,
                self.map.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_requires_roots() {
        let roots: Vec<&Path> = Vec::new();
        let result = Locator::new().discover(roots.as_slice(), |_| true);
        assert!(matches!(result, Err(CmrMetaError::NoRoots)));
    }

    #[test]
    fn test_discover_missing_root() {
        let result = Locator::new().discover(&["/definitely/not/here"], |_| true);
        assert!(matches!(result, Err(CmrMetaError::RootNotFound(_))));
    }

    #[test]
    fn test_discover_skips_non_dicom_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"not dicom").unwrap();
        std::fs::write(temp_dir.path().join("broken.zip"), b"not a zip").unwrap();

        let map = Locator::new()
            .discover(&[temp_dir.path()], |_| true)
            .unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_builder() {
        let locator = Locator::new()
            .expand_archives(false)
            .follow_links(true)
            .progress_interval(0);
        assert!(!locator.expand_archives);
        assert!(locator.follow_links);
        assert_eq!(locator.progress_interval, 0);
    }
}
