//! Handler parameter classification.

use crate::ast::{Javadoc, ParamDecl};
use crate::model::{ParameterLocation, ParameterRecord};

/// Binding annotations in the order they are checked.
const BINDINGS: &[(&str, ParameterLocation)] = &[
    ("PathVariable", ParameterLocation::Path),
    ("RequestParam", ParameterLocation::Query),
    ("RequestBody", ParameterLocation::Body),
    ("RequestHeader", ParameterLocation::Header),
];

/// Builds the record of one handler parameter.
///
/// The type is the declared text, unresolved. A parameter bound by one of the binding
/// annotations is required; any other parameter (a `Model`, a `Principal`...) has no
/// location and is not required.
pub fn classify_parameter(param: &ParamDecl, javadoc: Option<&Javadoc>) -> ParameterRecord {
    let location = BINDINGS
        .iter()
        .find(|(annotation, _)| param.has_annotation(annotation))
        .map(|(_, location)| *location);

    ParameterRecord {
        name: param.name.clone(),
        type_name: param.type_text.clone(),
        location,
        required: location.is_some(),
        description: javadoc
            .and_then(|doc| doc.param(&param.name))
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        example_value: None,
    }
}
