//! Spring routing annotations: which ones exist and how their path and method are read.

use super::ExtractionError;
use crate::ast::{Annotation, AnnotationArguments, ElementValue};
use crate::model::HttpMethod;

/// One of the six annotations that turn a method into a route handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingTag {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    /// `@RequestMapping`, whose HTTP method comes from its `method` attribute
    Request,
}

impl MappingTag {
    /// Recognizes a routing annotation by its simple name.
    pub fn from_annotation(annotation: &Annotation) -> Option<Self> {
        match annotation.simple_name() {
            "GetMapping" => Some(MappingTag::Get),
            "PostMapping" => Some(MappingTag::Post),
            "PutMapping" => Some(MappingTag::Put),
            "DeleteMapping" => Some(MappingTag::Delete),
            "PatchMapping" => Some(MappingTag::Patch),
            "RequestMapping" => Some(MappingTag::Request),
            _ => None,
        }
    }

    /// HTTP method bound by `annotation`, which must be this tag.
    pub fn http_method(&self, annotation: &Annotation) -> Result<HttpMethod, ExtractionError> {
        match self {
            MappingTag::Get => Ok(HttpMethod::Get),
            MappingTag::Post => Ok(HttpMethod::Post),
            MappingTag::Put => Ok(HttpMethod::Put),
            MappingTag::Delete => Ok(HttpMethod::Delete),
            MappingTag::Patch => Ok(HttpMethod::Patch),
            MappingTag::Request => extract_request_method(annotation),
        }
    }
}

/// Reads the path of a mapping annotation.
///
/// - `@GetMapping` gives `""`
/// - `@GetMapping("/x")` gives `/x` verbatim
/// - `@GetMapping(value = "/x", ...)` gives `/x`, and `""` when there is no `value` key
///
/// Any argument that is not a string literal is an error.
pub fn extract_path(annotation: &Annotation) -> Result<String, ExtractionError> {
    let value = match &annotation.arguments {
        AnnotationArguments::Marker => return Ok(String::new()),
        AnnotationArguments::Single(value) => value,
        AnnotationArguments::Named(_) => match annotation.named_value("value") {
            Some(value) => value,
            None => return Ok(String::new()),
        },
    };

    match value {
        ElementValue::String(path) => Ok(path.clone()),
        other => Err(ExtractionError::NonLiteralPath {
            annotation: annotation.simple_name().to_string(),
            value: other.to_string(),
        }),
    }
}

/// Reads the `method` attribute of a `@RequestMapping`, defaulting to GET.
///
/// `RequestMethod.POST`, `POST` and `{RequestMethod.POST}` are all accepted.
pub fn extract_request_method(annotation: &Annotation) -> Result<HttpMethod, ExtractionError> {
    let value = match annotation.named_value("method") {
        Some(value) => value,
        None => return Ok(HttpMethod::Get),
    };

    let expression = match value {
        ElementValue::Expression(text) => Some(text),
        ElementValue::Array(items) => match items.as_slice() {
            [ElementValue::Expression(text)] => Some(text),
            _ => None,
        },
        _ => None,
    };

    expression
        .and_then(|text| {
            let name = text.rsplit('.').next().unwrap_or(text).trim();
            HttpMethod::from_name(name)
        })
        .ok_or_else(|| ExtractionError::UnsupportedHttpMethod {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AstParser;
    use std::path::Path;

    /// Annotations of the single method of a throwaway class.
    fn method_annotations(annotations: &str) -> Vec<Annotation> {
        let code = format!("class C {{ {} void m() {{}} }}", annotations);
        let parsed = AstParser::parse_source(&code, Path::new("C.java")).unwrap();
        parsed.unit.types[0].methods[0].annotations.clone()
    }

    fn single(annotation: &str) -> Annotation {
        method_annotations(annotation).remove(0)
    }

    #[test]
    fn test_recognizes_the_six_mapping_tags() {
        let annotations = method_annotations(
            "@GetMapping @PostMapping @PutMapping @DeleteMapping @PatchMapping @RequestMapping @Override",
        );
        let tags: Vec<_> = annotations
            .iter()
            .map(MappingTag::from_annotation)
            .collect();

        assert_eq!(
            tags,
            vec![
                Some(MappingTag::Get),
                Some(MappingTag::Post),
                Some(MappingTag::Put),
                Some(MappingTag::Delete),
                Some(MappingTag::Patch),
                Some(MappingTag::Request),
                None,
            ]
        );
    }

    #[test]
    fn test_qualified_annotation_name_matches() {
        let ann = single("@org.springframework.web.bind.annotation.PostMapping(\"/x\")");
        assert_eq!(MappingTag::from_annotation(&ann), Some(MappingTag::Post));
    }

    #[test]
    fn test_path_forms() {
        assert_eq!(extract_path(&single("@GetMapping")).unwrap(), "");
        assert_eq!(extract_path(&single("@GetMapping()")).unwrap(), "");
        assert_eq!(extract_path(&single("@GetMapping(\"/{id}\")")).unwrap(), "/{id}");
        assert_eq!(
            extract_path(&single("@RequestMapping(value = \"/x\", method = RequestMethod.POST)"))
                .unwrap(),
            "/x"
        );
        assert_eq!(
            extract_path(&single("@RequestMapping(method = RequestMethod.POST)")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_path_key_other_than_value_is_ignored() {
        assert_eq!(extract_path(&single("@GetMapping(path = \"/x\")")).unwrap(), "");
    }

    #[test]
    fn test_non_literal_path_is_an_error() {
        let err = extract_path(&single("@GetMapping(Routes.TASKS)")).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::NonLiteralPath {
                annotation: "GetMapping".to_string(),
                value: "Routes.TASKS".to_string(),
            }
        );

        assert!(extract_path(&single("@GetMapping({\"/a\", \"/b\"})")).is_err());
        assert!(extract_path(&single("@GetMapping(value = \"/a\" + \"/b\")")).is_err());
    }

    #[test]
    fn test_request_method_forms() {
        let method = |a: &str| extract_request_method(&single(a));

        assert_eq!(method("@RequestMapping(\"/x\")").unwrap(), HttpMethod::Get);
        assert_eq!(method("@RequestMapping").unwrap(), HttpMethod::Get);
        assert_eq!(
            method("@RequestMapping(value = \"/x\", method = RequestMethod.DELETE)").unwrap(),
            HttpMethod::Delete
        );
        assert_eq!(
            method("@RequestMapping(method = {RequestMethod.PUT})").unwrap(),
            HttpMethod::Put
        );
        assert_eq!(
            method("@RequestMapping(method = org.springframework.web.bind.annotation.RequestMethod.PATCH)")
                .unwrap(),
            HttpMethod::Patch
        );
    }

    #[test]
    fn test_unsupported_request_methods() {
        let method = |a: &str| extract_request_method(&single(a));

        assert_eq!(
            method("@RequestMapping(method = RequestMethod.HEAD)").unwrap_err(),
            ExtractionError::UnsupportedHttpMethod {
                value: "RequestMethod.HEAD".to_string()
            }
        );
        assert!(method("@RequestMapping(method = {RequestMethod.GET, RequestMethod.POST})").is_err());
        assert!(method("@RequestMapping(method = \"GET\")").is_err());
    }

    #[test]
    fn test_shorthand_tags_ignore_method_attribute() {
        let ann = single("@GetMapping(value = \"/x\")");
        assert_eq!(MappingTag::Get.http_method(&ann).unwrap(), HttpMethod::Get);

        let ann = single("@RequestMapping(value = \"/x\", method = RequestMethod.POST)");
        assert_eq!(MappingTag::Request.http_method(&ann).unwrap(), HttpMethod::Post);
    }
}
