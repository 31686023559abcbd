use super::controller::ControllerClassifier;
use super::mapping::{extract_path, MappingTag};
use super::parameters::classify_parameter;
use super::response::ResponseResolver;
use super::{ExtractionError, ExtractionFailure, FileExtraction, RouteExtractor};
use crate::ast::{MethodDecl, TypeDecl};
use crate::model::{EndpointRecord, HttpMethod};
use crate::parser::ParsedFile;
use crate::type_resolver::{TypeResolver, TypeScope};
use log::{debug, warn};

/// Spring MVC route extractor
pub struct SpringExtractor<'r> {
    responses: ResponseResolver<'r>,
}

impl<'r> SpringExtractor<'r> {
    pub fn new(resolver: &'r TypeResolver) -> Self {
        Self {
            responses: ResponseResolver::new(resolver),
        }
    }
}

impl RouteExtractor for SpringExtractor<'_> {
    fn extract_file(&self, parsed_file: &ParsedFile) -> FileExtraction {
        let mut visitor = ControllerVisitor {
            extractor: self,
            file: parsed_file,
            extraction: FileExtraction::default(),
        };

        let scope = TypeScope::for_unit(&parsed_file.unit);
        for decl in &parsed_file.unit.types {
            visitor.visit_type(decl, &scope);
        }

        debug!(
            "Extracted {} endpoints from {}",
            visitor.extraction.endpoints.len(),
            parsed_file.path.display()
        );
        visitor.extraction
    }
}

/// Walks the types of one file in declaration order, nested types after their outer type.
struct ControllerVisitor<'a, 'r> {
    extractor: &'a SpringExtractor<'r>,
    file: &'a ParsedFile,
    extraction: FileExtraction,
}

impl ControllerVisitor<'_, '_> {
    fn visit_type(&mut self, decl: &TypeDecl, outer_scope: &TypeScope) {
        let scope = outer_scope.enter_type(decl);

        if ControllerClassifier::is_controller(decl) {
            self.visit_controller(decl, &scope);
        }

        for member in &decl.member_types {
            self.visit_type(member, &scope);
        }
    }

    fn visit_controller(&mut self, decl: &TypeDecl, scope: &TypeScope) {
        debug!("Found controller {} in {}", decl.name, self.file.path.display());

        let base_path = match ControllerClassifier::base_path(decl) {
            Ok(path) => path,
            Err(error) => {
                self.fail(decl, None, decl.line, error);
                return;
            }
        };

        for method in &decl.methods {
            match self.extract_method(method, &base_path, scope) {
                Ok(endpoints) => self.extraction.endpoints.extend(endpoints),
                Err(error) => self.fail(decl, Some(method), method.line, error),
            }
        }
    }

    /// One endpoint per routing annotation on `method`, in annotation order.
    fn extract_method(
        &self,
        method: &MethodDecl,
        base_path: &str,
        scope: &TypeScope,
    ) -> Result<Vec<EndpointRecord>, ExtractionError> {
        let mut routes: Vec<(HttpMethod, String)> = Vec::new();
        for annotation in &method.annotations {
            let Some(tag) = MappingTag::from_annotation(annotation) else {
                continue;
            };
            let http_method = tag.http_method(annotation)?;
            let path = format!("{}{}", base_path, extract_path(annotation)?);
            routes.push((http_method, path));
        }

        if routes.is_empty() {
            return Ok(Vec::new());
        }

        let javadoc = method.javadoc.as_ref();
        let parameters: Vec<_> = method
            .parameters
            .iter()
            .map(|param| classify_parameter(param, javadoc))
            .collect();
        let response = self.extractor.responses.resolve(method, scope);
        let description = javadoc.and_then(|doc| doc.summary.clone());

        Ok(routes
            .into_iter()
            .map(|(http_method, path)| {
                debug!("Found endpoint {} {} -> {}", http_method, path, method.name);
                let mut endpoint = EndpointRecord::new(path, http_method, response.clone());
                endpoint.description = description.clone();
                endpoint.parameters = parameters.clone();
                endpoint
            })
            .collect())
    }

    fn fail(
        &mut self,
        decl: &TypeDecl,
        method: Option<&MethodDecl>,
        line: usize,
        error: ExtractionError,
    ) {
        let failure = ExtractionFailure {
            file: self.file.path.clone(),
            class: decl.name.clone(),
            method: method.map(|m| m.name.clone()),
            line,
            error,
        };
        warn!("Skipping {}", failure);
        self.extraction.failures.push(failure);
    }
}
