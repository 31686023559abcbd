//! Endpoint extraction from parsed Java sources.
//!
//! An extractor walks the declarations of one parsed file and turns every routed handler
//! method into [`EndpointRecord`]s. Methods whose routing metadata cannot be read are not
//! fatal: they are reported as [`ExtractionFailure`]s next to the endpoints and the walk
//! moves on.
//!
//! # Example
//!
//! ```no_run
//! use spring_endpoints::extractor::{RouteExtractor, spring::SpringExtractor};
//! use spring_endpoints::parser::AstParser;
//! use spring_endpoints::type_resolver::TypeResolver;
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/main/java/TaskController.java")).unwrap();
//! let files = vec![parsed];
//! let resolver = TypeResolver::new(&files);
//! let extraction = SpringExtractor::new(&resolver).extract_file(&files[0]);
//! println!("Found {} endpoints", extraction.endpoints.len());
//! ```

pub mod controller;
pub mod mapping;
pub mod parameters;
pub mod response;
pub mod spring;

use crate::model::EndpointRecord;
use crate::parser::ParsedFile;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Trait for extracting endpoints from one parsed source file.
pub trait RouteExtractor {
    /// Extracts the endpoints of every controller declared in `parsed_file`.
    ///
    /// Records come out in controller declaration order, then method declaration order,
    /// then routing annotation order.
    fn extract_file(&self, parsed_file: &ParsedFile) -> FileExtraction;
}

/// Why the routing metadata of a method or controller could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The path argument is not a string literal (a constant, a concatenation, an array...)
    #[error("@{annotation} path `{value}` is not a string literal")]
    NonLiteralPath { annotation: String, value: String },

    /// The `method` attribute does not name exactly one supported HTTP method
    #[error("unsupported request method `{value}`")]
    UnsupportedHttpMethod { value: String },
}

/// An extraction error together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub file: PathBuf,
    /// Simple name of the controller class
    pub class: String,
    /// Handler method name, `None` when the class-level mapping itself failed
    pub method: Option<String>,
    /// 1-based line of the failing declaration
    pub line: usize,
    pub error: ExtractionError,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.class)?;
        if let Some(method) = &self.method {
            write!(f, ".{}", method)?;
        }
        write!(f, ": {}", self.error)
    }
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileExtraction {
    pub endpoints: Vec<EndpointRecord>,
    pub failures: Vec<ExtractionFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_with_method() {
        let failure = ExtractionFailure {
            file: PathBuf::from("src/TaskController.java"),
            class: "TaskController".to_string(),
            method: Some("list".to_string()),
            line: 12,
            error: ExtractionError::NonLiteralPath {
                annotation: "GetMapping".to_string(),
                value: "Paths.TASKS".to_string(),
            },
        };

        assert_eq!(
            failure.to_string(),
            "src/TaskController.java:12: TaskController.list: @GetMapping path `Paths.TASKS` is not a string literal"
        );
    }

    #[test]
    fn test_failure_display_for_class() {
        let failure = ExtractionFailure {
            file: PathBuf::from("A.java"),
            class: "A".to_string(),
            method: None,
            line: 3,
            error: ExtractionError::UnsupportedHttpMethod {
                value: "RequestMethod.HEAD".to_string(),
            },
        };

        assert_eq!(
            failure.to_string(),
            "A.java:3: A: unsupported request method `RequestMethod.HEAD`"
        );
    }
}
