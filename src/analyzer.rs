//! The analysis pipeline: scan, parse, index types, extract, aggregate.

use crate::aggregator::EndpointAggregator;
use crate::error::{Error, Result};
use crate::extractor::spring::SpringExtractor;
use crate::extractor::{ExtractionFailure, RouteExtractor};
use crate::model::EndpointRecord;
use crate::parser::{AstParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::type_resolver::TypeResolver;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Options of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Source file extension, without the dot
    pub extension: String,
    /// Abort on the first file with a syntax error instead of skipping it
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extension: "java".to_string(),
            fail_on_parse_error: false,
        }
    }
}

/// A source file left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Endpoints in file order, then controller order, then method order
    pub endpoints: Vec<EndpointRecord>,
    /// Methods and controllers whose routing metadata could not be read
    pub failures: Vec<ExtractionFailure>,
    pub skipped_files: Vec<SkippedFile>,
    pub scan_warnings: Vec<String>,
    pub files_scanned: usize,
}

pub struct EndpointAnalyzer {
    config: AnalyzerConfig,
}

impl EndpointAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes every source file under `root`.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if the root or one of the source files cannot be read. Undecodable
    ///   bytes are not read errors.
    /// - `Error::Parse` for a file with invalid syntax, only with `fail_on_parse_error`
    /// - `Error::InvalidArgument` for an empty source extension
    pub fn analyze(&self, root: &Path) -> Result<AnalysisReport> {
        if self.config.extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidArgument(
                "source file extension must not be empty".to_string(),
            ));
        }

        info!("Scanning {}...", root.display());
        let scanner = FileScanner::new(root.to_path_buf()).with_extension(&self.config.extension);
        let scan_result = scanner.scan()?;
        info!("Found {} source files", scan_result.source_files.len());

        let mut report = AnalysisReport {
            files_scanned: scan_result.source_files.len(),
            scan_warnings: scan_result.warnings,
            ..AnalysisReport::default()
        };

        info!("Parsing source files...");
        let parsed_files = self.parse(&scan_result.source_files, &mut report.skipped_files)?;
        info!("Successfully parsed {} files", parsed_files.len());

        info!("Indexing declared types...");
        let resolver = TypeResolver::new(&parsed_files);
        let extractor = SpringExtractor::new(&resolver);

        info!("Extracting endpoints...");
        let mut aggregator = EndpointAggregator::new();
        for parsed_file in &parsed_files {
            aggregator.add(extractor.extract_file(parsed_file));
        }

        let (endpoints, failures) = aggregator.into_parts();
        info!(
            "Extracted {} endpoints ({} skipped handlers)",
            endpoints.len(),
            failures.len()
        );
        report.endpoints = endpoints;
        report.failures = failures;
        Ok(report)
    }

    fn parse(&self, paths: &[PathBuf], skipped: &mut Vec<SkippedFile>) -> Result<Vec<ParsedFile>> {
        let mut parsed_files = Vec::with_capacity(paths.len());

        for (path, result) in paths.iter().zip(AstParser::parse_files(paths)) {
            match result {
                Ok(parsed) => parsed_files.push(parsed),
                Err(e @ Error::Parse { .. }) if !self.config.fail_on_parse_error => {
                    debug!("Skipping file due to parse error: {}", path.display());
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Aborting analysis: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(parsed_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.extension, "java");
        assert!(!config.fail_on_parse_error);
    }

    #[test]
    fn test_analyze_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        assert!(report.endpoints.is_empty());
        assert_eq!(report.files_scanned, 0);
    }

    #[test]
    fn test_analyze_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(&temp_dir.path().join("missing"));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_empty_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = AnalyzerConfig {
            extension: ".".to_string(),
            ..AnalyzerConfig::default()
        };

        let result = EndpointAnalyzer::new(config).analyze(temp_dir.path());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_endpoints_follow_file_order() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "b/BController.java",
            "@RestController class BController { @GetMapping(\"/b\") void b() {} }",
        );
        write(
            temp_dir.path(),
            "a/AController.java",
            "@RestController class AController { @GetMapping(\"/a1\") void a1() {} @PostMapping(\"/a2\") void a2() {} }",
        );

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        let paths: Vec<_> = report.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a1", "/a2", "/b"]);
        assert_eq!(report.files_scanned, 2);
    }

    #[test]
    fn test_parse_errors_are_skipped_by_default() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "Broken.java", "class Broken { void x( }");
        write(
            temp_dir.path(),
            "Ok.java",
            "@RestController class Ok { @GetMapping(\"/ok\") String ok() { return null; } }",
        );

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        assert_eq!(report.endpoints.len(), 1);
        assert_eq!(report.skipped_files.len(), 1);
        assert!(report.skipped_files[0].path.ends_with("Broken.java"));
    }

    #[test]
    fn test_parse_errors_abort_when_strict() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "Broken.java", "class Broken { void x( }");

        let config = AnalyzerConfig {
            fail_on_parse_error: true,
            ..AnalyzerConfig::default()
        };
        let result = EndpointAnalyzer::new(config).analyze(temp_dir.path());

        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_types_resolve_across_files() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "com/example/model/Task.java",
            "package com.example.model; public class Task {}",
        );
        write(
            temp_dir.path(),
            "com/example/web/TaskController.java",
            r#"
            package com.example.web;
            import com.example.model.Task;
            @RestController
            class TaskController {
                @GetMapping("/task") Task task() { return null; }
            }
            "#,
        );

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        assert_eq!(report.endpoints[0].response.type_name, "com.example.model.Task");
    }

    #[test]
    fn test_invalid_utf8_file_does_not_abort_analysis() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "A.java",
            "@RestController class A { @GetMapping(\"/a\") String a() { return null; } }",
        );
        let mut latin1 = b"// Gr".to_vec();
        latin1.extend_from_slice(&[0xfc, 0xdf]);
        latin1.extend_from_slice(b"e\n@RestController class B { @GetMapping(\"/b\") void b() {} }\n");
        fs::write(temp_dir.path().join("B.java"), latin1).unwrap();

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        let paths: Vec<_> = report.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
        assert!(report.skipped_files.is_empty());
    }

    #[test]
    fn test_file_root_analyzes_that_file() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "HelloController.java",
            "@RestController class HelloController { @GetMapping(\"/hello\") String hello() { return null; } }",
        );
        write(
            temp_dir.path(),
            "OtherController.java",
            "@RestController class OtherController { @GetMapping(\"/other\") void other() {} }",
        );

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(&temp_dir.path().join("HelloController.java"))
            .unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.endpoints.len(), 1);
        assert_eq!(report.endpoints[0].path, "/hello");
        assert_eq!(report.endpoints[0].response.type_name, "java.lang.String");
    }

    #[test]
    fn test_build_and_target_packages_are_analyzed() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "com/acme/build/BuildController.java",
            "package com.acme.build; @RestController class BuildController { @GetMapping(\"/build\") void b() {} }",
        );
        write(
            temp_dir.path(),
            "com/acme/target/TargetController.java",
            "package com.acme.target; @RestController class TargetController { @GetMapping(\"/target\") void t() {} }",
        );

        let report = EndpointAnalyzer::new(AnalyzerConfig::default())
            .analyze(temp_dir.path())
            .unwrap();

        let paths: Vec<_> = report.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/build", "/target"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_reported_as_scan_warning() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "Ok.java",
            "@RestController class Ok { @GetMapping(\"/ok\") void ok() {} }",
        );
        write(temp_dir.path(), "locked/Locked.java", "class Locked {}");
        let locked = temp_dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = EndpointAnalyzer::new(AnalyzerConfig::default()).analyze(temp_dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let report = result.unwrap();

        assert_eq!(report.endpoints.len(), 1);
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.scan_warnings.len(), 1);
    }
}
