//! Spring Endpoints - Static inventory of the HTTP endpoints of Spring MVC code bases.
//!
//! This library discovers declaratively routed endpoints in a Java source tree without
//! compiling or running it. Controllers are recognized by their annotations, routes by the
//! mapping annotations on their methods, and each route becomes an [`model::EndpointRecord`]
//! with its HTTP method, full path, parameters and response type.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Walks the source tree for `.java` files
//! 2. [`parser`] - Parses each file with tree-sitter into the owned [`ast`]
//! 3. [`type_resolver`] - Layered type resolution (JDK table, then project sources)
//! 4. [`extractor`] - Controller classification, route, parameter and response extraction
//! 5. [`aggregator`] - Collects endpoints in source order
//! 6. [`analyzer`] - Drives the pipeline above for one source tree
//! 7. [`serializer`] - Writes the endpoint list as JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use spring_endpoints::{
//!     analyzer::{AnalyzerConfig, EndpointAnalyzer},
//!     serializer::serialize_json,
//! };
//! use std::path::Path;
//!
//! let analyzer = EndpointAnalyzer::new(AnalyzerConfig::default());
//! let report = analyzer.analyze(Path::new("./my-service/src/main/java")).unwrap();
//!
//! for failure in &report.failures {
//!     eprintln!("skipped {}", failure);
//! }
//! println!("{}", serialize_json(&report.endpoints).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod aggregator;
pub mod analyzer;
pub mod ast;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod type_resolver;
