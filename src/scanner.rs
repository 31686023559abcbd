use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner for traversing project directories.
///
/// The `FileScanner` recursively walks a source tree to find every file carrying the
/// configured extension (`java` by default). Entries are visited depth-first and each
/// directory level is sorted by file name, so two scans of an unchanged tree always
/// produce the same sequence. No directory is excluded: `build` or `target` are legal
/// package names in Java. A root that is itself a matching file yields just that file.
///
/// # Example
///
/// ```no_run
/// use spring_endpoints::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-service/src/main/java"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} Java files", result.source_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
    extension: String,
}

/// Result of directory scanning operation.
///
/// Contains the list of discovered source files and any warnings encountered during scanning.
pub struct ScanResult {
    /// Paths of all discovered source files, in visitation order
    pub source_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for `.java` files under the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            extension: "java".to_string(),
        }
    }

    /// Replaces the file extension (without the leading dot) the scanner looks for.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Lazily walks the tree and yields matching files one at a time.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` up front if the root path does not exist or cannot be
    /// inspected. Entries that fail below the root are yielded as `Err` items.
    pub fn files(&self) -> Result<impl Iterator<Item = walkdir::Result<PathBuf>> + '_> {
        fs::metadata(&self.root_path).map_err(|e| Error::io(&self.root_path, e))?;

        let walker = WalkDir::new(&self.root_path).sort_by_file_name().into_iter();

        Ok(walker.filter_map(move |entry| match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && self.has_source_extension(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e)),
        }))
    }

    /// Scans the directory tree and collects all matching source files.
    ///
    /// If any directories or files below the root cannot be accessed, warnings are logged
    /// and added to the result, but scanning continues.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the root directory is missing or unreadable.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in self.files()? {
            match entry {
                Ok(path) => {
                    debug!("Found source file: {}", path.display());
                    source_files.push(path);
                }
                Err(e) if e.depth() == 0 => {
                    let message = e.to_string();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
                    return Err(Error::io(&self.root_path, source));
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(self.extension.as_str())
    }
}
