use crate::ast::MethodDecl;
use crate::model::ResponseRecord;
use crate::type_resolver::{TypeResolver, TypeScope};
use log::debug;

/// Describes what a handler returns.
pub struct ResponseResolver<'r> {
    resolver: &'r TypeResolver,
}

impl<'r> ResponseResolver<'r> {
    pub fn new(resolver: &'r TypeResolver) -> Self {
        Self { resolver }
    }

    /// Builds the response of `method`, declared in the type whose body is `type_scope`.
    ///
    /// The type is the fully qualified description when every part of the return type
    /// resolves, and otherwise the return type exactly as written. Never fails.
    pub fn resolve(&self, method: &MethodDecl, type_scope: &TypeScope) -> ResponseRecord {
        let scope = type_scope.enter_method(method);
        let type_name = match self.resolver.resolve(&method.return_type, &scope) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                debug!(
                    "Falling back to declared return type `{}` of {}: {}",
                    method.return_type_text, method.name, e
                );
                method.return_type_text.clone()
            }
        };

        ResponseRecord {
            type_name,
            description: method
                .javadoc
                .as_ref()
                .and_then(|doc| doc.returns.clone()),
            example: None,
        }
    }
}
