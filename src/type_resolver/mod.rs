//! Layered type resolution.
//!
//! A [`TypeResolver`] turns a syntactic [`TypeRef`] written inside some file into a fully
//! qualified [`ResolvedType`]. It applies Java's scoping rules to produce candidate
//! qualified names and asks a [`CombinedTypeSolver`] whether each candidate exists. The
//! standard resolver consults the JDK table first and the project's own sources second.
//!
//! The resolver is built once, before any endpoint extraction, and is read-only afterwards.

pub mod jdk;
pub mod source;

pub use jdk::JdkTypeSolver;
pub use source::SourceTypeSolver;

use crate::ast::{CompilationUnit, ImportDecl, MethodDecl, TypeDecl, TypeRef, WildcardBound};
use crate::parser::ParsedFile;
use log::debug;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where a solved type was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    StandardLibrary,
    Source(PathBuf),
}

/// A qualified type name that one of the layers recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedType {
    pub qualified_name: String,
    pub origin: TypeOrigin,
}

/// One layer of type knowledge.
pub trait TypeSolver {
    /// Short layer name used in logs
    fn name(&self) -> &str;

    /// Looks up an exact qualified name such as `java.util.List` or `com.example.Task.Builder`.
    fn solve_type(&self, qualified_name: &str) -> Option<SolvedType>;
}

/// Ordered list of layers; the first layer that knows a name wins.
#[derive(Default)]
pub struct CombinedTypeSolver {
    layers: Vec<Box<dyn TypeSolver>>,
}

impl CombinedTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, layer: impl TypeSolver + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }
}

impl TypeSolver for CombinedTypeSolver {
    fn name(&self) -> &str {
        "combined"
    }

    fn solve_type(&self, qualified_name: &str) -> Option<SolvedType> {
        self.layers.iter().find_map(|layer| {
            let solved = layer.solve_type(qualified_name)?;
            debug!("Layer '{}' solved {}", layer.name(), qualified_name);
            Some(solved)
        })
    }
}

/// Raised when no layer can resolve a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot resolve type `{name}`")]
pub struct UnresolvedTypeError {
    pub name: String,
}

impl UnresolvedTypeError {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A fully resolved type. Its `Display` form is the description written to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Primitive(String),
    Reference {
        qualified_name: String,
        args: Vec<ResolvedType>,
    },
    Array {
        element: Box<ResolvedType>,
        dimensions: usize,
    },
    Wildcard(Option<ResolvedBound>),
    TypeVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBound {
    Extends(Box<ResolvedType>),
    Super(Box<ResolvedType>),
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(name) | ResolvedType::TypeVariable(name) => {
                write!(f, "{}", name)
            }
            ResolvedType::Reference {
                qualified_name,
                args,
            } => {
                write!(f, "{}", qualified_name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            ResolvedType::Array {
                element,
                dimensions,
            } => write!(f, "{}{}", element, "[]".repeat(*dimensions)),
            ResolvedType::Wildcard(None) => write!(f, "?"),
            ResolvedType::Wildcard(Some(ResolvedBound::Extends(bound))) => {
                write!(f, "? extends {}", bound)
            }
            ResolvedType::Wildcard(Some(ResolvedBound::Super(bound))) => {
                write!(f, "? super {}", bound)
            }
        }
    }
}

pub(crate) fn qualify(package: Option<&str>, name: &str) -> String {
    match package {
        Some(package) if !package.is_empty() => format!("{}.{}", package, name),
        _ => name.to_string(),
    }
}

/// The names visible at some point of a compilation unit.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    package: Option<&'a str>,
    imports: &'a [ImportDecl],
    unit_types: Vec<&'a str>,
    /// Qualified names of the enclosing types, outermost first
    enclosing: Vec<String>,
    type_variables: Vec<String>,
}

impl<'a> TypeScope<'a> {
    /// Top-level scope of a file.
    pub fn for_unit(unit: &'a CompilationUnit) -> Self {
        Self {
            package: unit.package.as_deref(),
            imports: &unit.imports,
            unit_types: unit.types.iter().map(|t| t.name.as_str()).collect(),
            enclosing: Vec::new(),
            type_variables: Vec::new(),
        }
    }

    /// Scope inside the body of `decl`, which must be declared directly in this scope.
    pub fn enter_type(&self, decl: &TypeDecl) -> Self {
        let mut scope = self.clone();
        let qualified = match self.enclosing.last() {
            Some(outer) => format!("{}.{}", outer, decl.name),
            None => qualify(self.package, &decl.name),
        };
        scope.enclosing.push(qualified);
        scope.type_variables.extend(decl.type_parameters.iter().cloned());
        scope
    }

    /// Scope inside a method, adding its own type parameters.
    pub fn enter_method(&self, method: &MethodDecl) -> Self {
        let mut scope = self.clone();
        scope
            .type_variables
            .extend(method.type_parameters.iter().cloned());
        scope
    }

    /// Qualified name of the innermost enclosing type.
    pub fn current_type(&self) -> Option<&str> {
        self.enclosing.last().map(String::as_str)
    }

    fn is_type_variable(&self, name: &str) -> bool {
        self.type_variables.iter().any(|v| v == name)
    }
}

/// Resolves syntactic types to fully qualified ones through the layered solvers.
pub struct TypeResolver {
    solver: CombinedTypeSolver,
}

impl TypeResolver {
    /// Standard resolver: JDK layer first, then every type declared in `parsed_files`.
    pub fn new(parsed_files: &[ParsedFile]) -> Self {
        debug!("Initializing TypeResolver with {} files", parsed_files.len());
        Self::with_solver(
            CombinedTypeSolver::new()
                .add(JdkTypeSolver::new())
                .add(SourceTypeSolver::from_parsed_files(parsed_files)),
        )
    }

    pub fn with_solver(solver: CombinedTypeSolver) -> Self {
        Self { solver }
    }

    /// Resolves a type reference written in `scope`.
    ///
    /// Generic types resolve only when the base type and every type argument resolve.
    pub fn resolve(
        &self,
        ty: &TypeRef,
        scope: &TypeScope,
    ) -> Result<ResolvedType, UnresolvedTypeError> {
        match ty {
            TypeRef::Primitive(name) => Ok(ResolvedType::Primitive(name.clone())),
            TypeRef::Named { path, args } => {
                if let [name] = path.as_slice() {
                    if args.is_empty() && scope.is_type_variable(name) {
                        return Ok(ResolvedType::TypeVariable(name.clone()));
                    }
                }
                let qualified_name = self.resolve_name(path, scope)?;
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ResolvedType::Reference {
                    qualified_name,
                    args,
                })
            }
            TypeRef::Array {
                element,
                dimensions,
            } => Ok(ResolvedType::Array {
                element: Box::new(self.resolve(element, scope)?),
                dimensions: *dimensions,
            }),
            TypeRef::Wildcard(None) => Ok(ResolvedType::Wildcard(None)),
            TypeRef::Wildcard(Some(WildcardBound::Extends(bound))) => Ok(ResolvedType::Wildcard(
                Some(ResolvedBound::Extends(Box::new(self.resolve(bound, scope)?))),
            )),
            TypeRef::Wildcard(Some(WildcardBound::Super(bound))) => Ok(ResolvedType::Wildcard(
                Some(ResolvedBound::Super(Box::new(self.resolve(bound, scope)?))),
            )),
            TypeRef::Unparsed(text) => Err(UnresolvedTypeError::new(text.clone())),
        }
    }

    /// Resolves a possibly dotted type name to its qualified name.
    pub fn resolve_name(
        &self,
        path: &[String],
        scope: &TypeScope,
    ) -> Result<String, UnresolvedTypeError> {
        let full = path.join(".");
        let resolved = match path.split_first() {
            Some((first, [])) => self.resolve_simple(first, scope),
            Some((first, rest)) => self
                .resolve_simple(first, scope)
                .and_then(|outer| self.solve(&format!("{}.{}", outer, rest.join("."))))
                .or_else(|| self.solve(&full)),
            None => None,
        };

        resolved.ok_or_else(|| {
            debug!("Unresolved type {} in {:?}", full, scope.current_type());
            UnresolvedTypeError::new(full)
        })
    }

    fn solve(&self, qualified_name: &str) -> Option<String> {
        self.solver
            .solve_type(qualified_name)
            .map(|solved| solved.qualified_name)
    }

    /// Java lookup order for a simple type name.
    fn resolve_simple(&self, name: &str, scope: &TypeScope) -> Option<String> {
        for outer in scope.enclosing.iter().rev() {
            if outer.rsplit('.').next() == Some(name) {
                if let Some(found) = self.solve(outer) {
                    return Some(found);
                }
            }
            if let Some(found) = self.solve(&format!("{}.{}", outer, name)) {
                return Some(found);
            }
        }

        if scope.unit_types.iter().any(|t| *t == name) {
            if let Some(found) = self.solve(&qualify(scope.package, name)) {
                return Some(found);
            }
        }

        for import in scope.imports.iter().filter(|i| !i.on_demand) {
            if import.path.rsplit('.').next() != Some(name) {
                continue;
            }
            match self.solve(&import.path) {
                Some(found) => return Some(found),
                // a single-type import shadows everything below it
                None if !import.is_static => return None,
                None => {}
            }
        }

        if let Some(found) = self.solve(&qualify(scope.package, name)) {
            return Some(found);
        }

        if let Some(found) = self.solve(&format!("java.lang.{}", name)) {
            return Some(found);
        }

        scope
            .imports
            .iter()
            .filter(|i| i.on_demand)
            .find_map(|i| self.solve(&format!("{}.{}", i.path, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AstParser;
    use std::path::Path;

    fn parse(name: &str, code: &str) -> ParsedFile {
        AstParser::parse_source(code, Path::new(name)).expect("Failed to parse test code")
    }

    /// Resolves the return type of `class.methods[method]` in the first file.
    fn resolve_return(files: &[ParsedFile], method: usize) -> Result<String, UnresolvedTypeError> {
        let resolver = TypeResolver::new(files);
        let unit = &files[0].unit;
        let class = &unit.types[0];
        let m = &class.methods[method];
        let scope = TypeScope::for_unit(unit).enter_type(class).enter_method(m);
        resolver.resolve(&m.return_type, &scope).map(|t| t.to_string())
    }

    const MODEL: &str = r#"
        package com.example.demo.model;
        public class Task {
            public static class Summary {}
        }
    "#;

    #[test]
    fn test_resolve_java_lang_and_primitives() {
        let files = vec![parse(
            "Hello.java",
            r#"
            class Hello {
                String hello() { return ""; }
                int count() { return 0; }
                void nothing() {}
                Integer[] boxes() { return null; }
            }
            "#,
        )];

        assert_eq!(resolve_return(&files, 0).unwrap(), "java.lang.String");
        assert_eq!(resolve_return(&files, 1).unwrap(), "int");
        assert_eq!(resolve_return(&files, 2).unwrap(), "void");
        assert_eq!(resolve_return(&files, 3).unwrap(), "java.lang.Integer[]");
    }

    #[test]
    fn test_resolve_imported_generics() {
        let files = vec![
            parse(
                "TaskService.java",
                r#"
                package com.example.demo.service;
                import com.example.demo.model.Task;
                import java.util.*;
                class TaskService {
                    List<Task> all() { return null; }
                    Map<String, List<? extends Number>> stats() { return null; }
                    Optional<Task.Summary> summary() { return null; }
                }
                "#,
            ),
            parse("Task.java", MODEL),
        ];

        assert_eq!(
            resolve_return(&files, 0).unwrap(),
            "java.util.List<com.example.demo.model.Task>"
        );
        assert_eq!(
            resolve_return(&files, 1).unwrap(),
            "java.util.Map<java.lang.String, java.util.List<? extends java.lang.Number>>"
        );
        assert_eq!(
            resolve_return(&files, 2).unwrap(),
            "java.util.Optional<com.example.demo.model.Task.Summary>"
        );
    }

    #[test]
    fn test_resolve_same_package_without_import() {
        let files = vec![
            parse(
                "Repo.java",
                "package com.example.demo.model; class Repo { Task find() { return null; } }",
            ),
            parse("Task.java", MODEL),
        ];

        assert_eq!(resolve_return(&files, 0).unwrap(), "com.example.demo.model.Task");
    }

    #[test]
    fn test_resolve_fully_qualified_and_nested_jdk() {
        let files = vec![parse(
            "Q.java",
            r#"
            import java.util.Map;
            class Q {
                java.time.LocalDate today() { return null; }
                Map.Entry<String, Long> entry() { return null; }
            }
            "#,
        )];

        assert_eq!(resolve_return(&files, 0).unwrap(), "java.time.LocalDate");
        assert_eq!(
            resolve_return(&files, 1).unwrap(),
            "java.util.Map.Entry<java.lang.String, java.lang.Long>"
        );
    }

    #[test]
    fn test_resolve_type_variables() {
        let files = vec![parse(
            "Box.java",
            r#"
            import java.util.List;
            class Box<T> {
                T get() { return null; }
                <R> List<R> map() { return null; }
            }
            "#,
        )];

        assert_eq!(resolve_return(&files, 0).unwrap(), "T");
        assert_eq!(resolve_return(&files, 1).unwrap(), "java.util.List<R>");
    }

    #[test]
    fn test_resolve_member_type_of_enclosing_class() {
        let files = vec![parse(
            "Outer.java",
            r#"
            package p;
            class Outer {
                Inner make() { return null; }
                static class Inner {}
            }
            "#,
        )];

        assert_eq!(resolve_return(&files, 0).unwrap(), "p.Outer.Inner");
    }

    #[test]
    fn test_unresolved_external_type() {
        let files = vec![parse(
            "TaskController.java",
            r#"
            import org.springframework.http.ResponseEntity;
            import java.util.List;
            class TaskController {
                ResponseEntity<List<String>> all() { return null; }
                List<ExternalDto> dtos() { return null; }
            }
            "#,
        )];

        let err = resolve_return(&files, 0).unwrap_err();
        assert_eq!(err.name, "ResponseEntity");

        let err = resolve_return(&files, 1).unwrap_err();
        assert_eq!(err.name, "ExternalDto");
    }

    #[test]
    fn test_single_import_shadows_same_package() {
        let files = vec![
            parse(
                "Use.java",
                r#"
                package com.example.demo.model;
                import com.vendor.Task;
                class Use { Task get() { return null; } }
                "#,
            ),
            parse("Task.java", MODEL),
        ];

        assert!(resolve_return(&files, 0).is_err());
    }

    #[test]
    fn test_jdk_layer_consulted_before_source_layer() {
        let files = vec![parse(
            "String.java",
            "package java.lang; public class String {}",
        )];
        let resolver = TypeResolver::new(&files);

        assert_eq!(
            resolver.solver.solve_type("java.lang.String").unwrap().origin,
            TypeOrigin::StandardLibrary
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let files = vec![
            parse(
                "S.java",
                "import com.example.demo.model.Task; import java.util.Set; class S { Set<Task> tasks() { return null; } }",
            ),
            parse("Task.java", MODEL),
        ];

        let resolver = TypeResolver::new(&files);
        let unit = &files[0].unit;
        let class = &unit.types[0];
        let method = &class.methods[0];
        let scope = TypeScope::for_unit(unit).enter_type(class).enter_method(method);

        let first = resolver.resolve(&method.return_type, &scope).unwrap().to_string();
        let second = resolver.resolve(&method.return_type, &scope).unwrap().to_string();
        assert_eq!(first, second);
        assert_eq!(first, "java.util.Set<com.example.demo.model.Task>");
    }
}
