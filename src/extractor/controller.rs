use super::mapping::extract_path;
use super::ExtractionError;
use crate::ast::{TypeDecl, TypeDeclKind};

const CONTROLLER_ANNOTATIONS: &[&str] = &["RestController", "Controller"];

/// Decides which type declarations are controllers and reads their base path.
pub struct ControllerClassifier;

impl ControllerClassifier {
    /// A class or interface annotated with `@RestController` or `@Controller`.
    pub fn is_controller(decl: &TypeDecl) -> bool {
        matches!(decl.kind, TypeDeclKind::Class | TypeDeclKind::Interface)
            && CONTROLLER_ANNOTATIONS
                .iter()
                .any(|name| decl.annotation(name).is_some())
    }

    /// Path of the class-level `@RequestMapping`, or `""` without one.
    pub fn base_path(decl: &TypeDecl) -> Result<String, ExtractionError> {
        match decl.annotation("RequestMapping") {
            Some(mapping) => extract_path(mapping),
            None => Ok(String::new()),
        }
    }
}
