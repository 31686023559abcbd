//! Project-source layer of the type resolver.

use super::{qualify, SolvedType, TypeOrigin, TypeSolver};
use crate::ast::{TypeDecl, TypeDeclKind};
use crate::parser::ParsedFile;
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;

/// A type declared somewhere in the analyzed source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceType {
    pub kind: TypeDeclKind,
    pub file: PathBuf,
    pub line: usize,
}

/// Index of every type declared in the parsed files, keyed by qualified name.
///
/// Nested types are keyed with their enclosing type names (`com.example.Outer.Inner`).
/// The index is built once from the already parsed files and never changes afterwards.
pub struct SourceTypeSolver {
    types: HashMap<String, SourceType>,
}

impl SourceTypeSolver {
    pub fn from_parsed_files(parsed_files: &[ParsedFile]) -> Self {
        let mut solver = Self {
            types: HashMap::new(),
        };

        for parsed_file in parsed_files {
            let package = parsed_file.unit.package.as_deref();
            for decl in &parsed_file.unit.types {
                let qualified = qualify(package, &decl.name);
                solver.index(qualified, decl, parsed_file);
            }
        }

        debug!(
            "Indexed {} source types from {} files",
            solver.types.len(),
            parsed_files.len()
        );
        solver
    }

    fn index(&mut self, qualified: String, decl: &TypeDecl, parsed_file: &ParsedFile) {
        for member in &decl.member_types {
            self.index(format!("{}.{}", qualified, member.name), member, parsed_file);
        }

        if let Some(existing) = self.types.get(&qualified) {
            debug!(
                "Duplicate declaration of {} in {} ignored, keeping {}",
                qualified,
                parsed_file.path.display(),
                existing.file.display()
            );
            return;
        }

        self.types.insert(
            qualified,
            SourceType {
                kind: decl.kind,
                file: parsed_file.path.clone(),
                line: decl.line,
            },
        );
    }

    pub fn get(&self, qualified_name: &str) -> Option<&SourceType> {
        self.types.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSolver for SourceTypeSolver {
    fn name(&self) -> &str {
        "source"
    }

    fn solve_type(&self, qualified_name: &str) -> Option<SolvedType> {
        self.types.get(qualified_name).map(|t| SolvedType {
            qualified_name: qualified_name.to_string(),
            origin: TypeOrigin::Source(t.file.clone()),
        })
    }
}
