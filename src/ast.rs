//! Owned syntax tree for Java compilation units.
//!
//! The parser lowers the tree-sitter concrete syntax tree into these plain structs so the
//! rest of the pipeline never deals with tree lifetimes or node kinds. Only the declaration
//! level is modeled: packages, imports, types, methods, parameters and their annotations.
//! Method bodies are not kept.

use std::fmt;

/// One parsed `.java` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    /// Dotted package name, `None` for the default package
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    /// Top-level type declarations in source order
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without the trailing `.*`
    pub path: String,
    pub is_static: bool,
    /// `import a.b.*;`
    pub on_demand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A class, interface, enum, record or annotation type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeDeclKind,
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<String>,
    /// Methods declared directly in this type's body
    pub methods: Vec<MethodDecl>,
    /// Nested member types in source order
    pub member_types: Vec<TypeDecl>,
    /// 1-based line of the declaration
    pub line: usize,
}

impl TypeDecl {
    /// Finds the first annotation with the given simple name.
    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, simple_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<String>,
    pub return_type: TypeRef,
    /// Return type exactly as written in the source
    pub return_type_text: String,
    pub parameters: Vec<ParamDecl>,
    pub javadoc: Option<Javadoc>,
    /// 1-based line of the declaration
    pub line: usize,
}

impl MethodDecl {
    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, simple_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    /// Declared type exactly as written in the source
    pub type_text: String,
    pub annotations: Vec<Annotation>,
}

impl ParamDecl {
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        find_annotation(&self.annotations, simple_name).is_some()
    }
}

/// An annotation use such as `@GetMapping("/tasks")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Name as written, possibly qualified (`org.springframework...GetMapping`)
    pub name: String,
    pub arguments: AnnotationArguments,
}

impl Annotation {
    /// Last dotted segment of the name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Value of a `key = value` pair, if the annotation uses the named form.
    pub fn named_value(&self, key: &str) -> Option<&ElementValue> {
        match &self.arguments {
            AnnotationArguments::Named(pairs) => {
                pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationArguments {
    /// `@Controller`
    Marker,
    /// `@GetMapping("/x")`
    Single(ElementValue),
    /// `@RequestMapping(value = "/x", method = RequestMethod.GET)`, or `@GetMapping()`
    Named(Vec<(String, ElementValue)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    /// Decoded string literal
    String(String),
    Array(Vec<ElementValue>),
    Annotation(Box<Annotation>),
    /// Any other expression, kept as source text
    Expression(String),
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::String(s) => write!(f, "{:?}", s),
            ElementValue::Array(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            ElementValue::Annotation(a) => write!(f, "@{}", a.name),
            ElementValue::Expression(text) => write!(f, "{}", text),
        }
    }
}

/// A syntactic type reference as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `int`, `boolean`, `void`, ...
    Primitive(String),
    /// `List<Task>`, `java.util.Map.Entry<K, V>`; arguments belong to the last segment
    Named { path: Vec<String>, args: Vec<TypeRef> },
    Array { element: Box<TypeRef>, dimensions: usize },
    Wildcard(Option<WildcardBound>),
    /// Anything the lowering does not understand, kept as text
    Unparsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardBound {
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

impl TypeRef {
    /// Shorthand for a simple, non-generic named type.
    pub fn simple(name: &str) -> Self {
        TypeRef::Named {
            path: name.split('.').map(str::to_string).collect(),
            args: Vec::new(),
        }
    }
}

/// A parsed `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Javadoc {
    /// Text before the first block tag, whitespace collapsed
    pub summary: Option<String>,
    /// `@param` entries as (parameter name, text)
    pub params: Vec<(String, String)>,
    /// `@return` text
    pub returns: Option<String>,
}

impl Javadoc {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }
}

fn find_annotation<'a>(annotations: &'a [Annotation], simple_name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.simple_name() == simple_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(name: &str) -> Annotation {
        Annotation {
            name: name.to_string(),
            arguments: AnnotationArguments::Marker,
        }
    }

    #[test]
    fn test_simple_name_strips_qualifier() {
        let ann = marker("org.springframework.web.bind.annotation.GetMapping");
        assert_eq!(ann.simple_name(), "GetMapping");
        assert_eq!(marker("PathVariable").simple_name(), "PathVariable");
    }

    #[test]
    fn test_named_value_lookup() {
        let ann = Annotation {
            name: "RequestMapping".to_string(),
            arguments: AnnotationArguments::Named(vec![
                ("value".to_string(), ElementValue::String("/x".to_string())),
                (
                    "method".to_string(),
                    ElementValue::Expression("RequestMethod.POST".to_string()),
                ),
            ]),
        };
        assert_eq!(
            ann.named_value("method"),
            Some(&ElementValue::Expression("RequestMethod.POST".to_string()))
        );
        assert_eq!(ann.named_value("path"), None);
        assert_eq!(marker("Controller").named_value("value"), None);
    }

    #[test]
    fn test_element_value_display() {
        let value = ElementValue::Array(vec![
            ElementValue::Expression("RequestMethod.GET".to_string()),
            ElementValue::String("/a".to_string()),
        ]);
        assert_eq!(value.to_string(), "{RequestMethod.GET, \"/a\"}");
    }
}
