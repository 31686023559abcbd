use crate::ast::{
    Annotation, AnnotationArguments, CompilationUnit, ElementValue, ImportDecl, Javadoc,
    MethodDecl, ParamDecl, TypeDecl, TypeDeclKind, TypeRef, WildcardBound,
};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// AST (Abstract Syntax Tree) parser for Java source files.
///
/// The `AstParser` runs the tree-sitter Java grammar over a file and lowers the resulting
/// concrete syntax tree into the owned declarations of [`crate::ast`]. Parsing is purely
/// syntactic: unknown imports or missing library types never make it fail, only real
/// syntax errors do.
///
/// # Example
///
/// ```no_run
/// use spring_endpoints::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/main/java/com/example/TaskController.java")).unwrap();
/// println!("Parsed {} top-level types", parsed.unit.types.len());
/// ```
pub struct AstParser;

/// A successfully parsed Java file with its declarations.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The lowered compilation unit
    pub unit: CompilationUnit,
}

impl AstParser {
    /// Reads and parses a single Java source file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Parse` if it contains
    /// invalid Java syntax. Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8, undecodable bytes replaced", path.display());
        }
        let parsed = Self::parse_source(&content, path)?;

        debug!("Successfully parsed file: {}", path.display());
        Ok(parsed)
    }

    /// Parses Java source text; `path` is only used for error reporting.
    pub fn parse_source(source: &str, path: &Path) -> Result<ParsedFile> {
        let parse_error = |message: String| Error::Parse {
            file: path.to_path_buf(),
            message,
        };

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| parse_error(format!("failed to load Java grammar: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| parse_error("tree-sitter returned no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error(root)
                .map(|n| n.start_position())
                .unwrap_or_else(|| root.start_position());
            return Err(parse_error(format!(
                "syntax error at line {}, column {}",
                position.row + 1,
                position.column + 1
            )));
        }

        let unit = Lowering { source }.compilation_unit(root);
        Ok(ParsedFile {
            path: path.to_path_buf(),
            unit,
        })
    }

    /// Parses multiple Java source files, continuing even if some fail.
    ///
    /// Returns one result per input path, in input order. Failures are logged as warnings;
    /// whether they are fatal is the caller's decision.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| {
                let result = Self::parse_file(path);
                if let Err(e) = &result {
                    warn!("Failed to parse {}: {}", path.display(), e);
                }
                result
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration"
    )
}

fn modifiers(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == "modifiers");
    found
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|n| !is_comment(n))
        .collect();
    children
}

/// Lowers tree-sitter nodes into [`crate::ast`] values.
struct Lowering<'a> {
    source: &'a str,
}

impl<'a> Lowering<'a> {
    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn compilation_unit(&self, root: Node) -> CompilationUnit {
        let mut unit = CompilationUnit::default();

        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    unit.package = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                        .map(|n| self.text(n).to_string());
                }
                "import_declaration" => unit.imports.push(self.import(child)),
                kind if is_type_declaration(kind) => unit.types.push(self.type_declaration(child)),
                _ => {}
            }
        }

        unit
    }

    fn import(&self, node: Node) -> ImportDecl {
        let mut import = ImportDecl {
            path: String::new(),
            is_static: false,
            on_demand: false,
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => import.is_static = true,
                "asterisk" => import.on_demand = true,
                "identifier" | "scoped_identifier" => import.path = self.text(child).to_string(),
                _ => {}
            }
        }

        import
    }

    fn type_declaration(&self, node: Node) -> TypeDecl {
        let kind = match node.kind() {
            "interface_declaration" => TypeDeclKind::Interface,
            "enum_declaration" => TypeDeclKind::Enum,
            "record_declaration" => TypeDeclKind::Record,
            "annotation_type_declaration" => TypeDeclKind::Annotation,
            _ => TypeDeclKind::Class,
        };

        let mut decl = TypeDecl {
            kind,
            name: self.field_text(node, "name"),
            annotations: self.annotations(node),
            type_parameters: self.type_parameters(node),
            methods: Vec::new(),
            member_types: Vec::new(),
            line: node.start_position().row + 1,
        };

        if let Some(body) = node.child_by_field_name("body") {
            self.members(body, &mut decl);
        }

        decl
    }

    /// Collects methods and nested types of a class, interface, enum or record body.
    fn members(&self, body: Node, decl: &mut TypeDecl) {
        for child in named_children(body) {
            match child.kind() {
                "method_declaration" => decl.methods.push(self.method(child)),
                "enum_body_declarations" => self.members(child, decl),
                kind if is_type_declaration(kind) => {
                    decl.member_types.push(self.type_declaration(child))
                }
                _ => {}
            }
        }
    }

    fn method(&self, node: Node) -> MethodDecl {
        let (return_type, return_type_text) = match node.child_by_field_name("type") {
            Some(ty) => (self.type_ref(ty), self.text(ty).to_string()),
            None => (TypeRef::Unparsed(String::new()), String::new()),
        };

        let parameters = node
            .child_by_field_name("parameters")
            .map(|params| {
                named_children(params)
                    .into_iter()
                    .filter_map(|p| self.parameter(p))
                    .collect()
            })
            .unwrap_or_default();

        MethodDecl {
            name: self.field_text(node, "name"),
            annotations: self.annotations(node),
            type_parameters: self.type_parameters(node),
            return_type,
            return_type_text,
            parameters,
            javadoc: self.javadoc(node),
            line: node.start_position().row + 1,
        }
    }

    fn parameter(&self, node: Node) -> Option<ParamDecl> {
        let (ty, name) = match node.kind() {
            "formal_parameter" => (
                node.child_by_field_name("type")?,
                self.field_text(node, "name"),
            ),
            "spread_parameter" => {
                let children = named_children(node);
                let ty = children
                    .iter()
                    .copied()
                    .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))?;
                let name = children
                    .iter()
                    .find(|c| c.kind() == "variable_declarator")
                    .map(|d| self.field_text(*d, "name"))
                    .unwrap_or_default();
                (ty, name)
            }
            // receiver parameters (`Foo this`) are not real parameters
            _ => return None,
        };

        Some(ParamDecl {
            name,
            ty: self.type_ref(ty),
            type_text: self.text(ty).to_string(),
            annotations: self.annotations(node),
        })
    }

    fn field_text(&self, node: Node, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
            .unwrap_or_default()
    }

    fn annotations(&self, node: Node) -> Vec<Annotation> {
        let Some(mods) = modifiers(node) else {
            return Vec::new();
        };
        named_children(mods)
            .into_iter()
            .filter(|c| matches!(c.kind(), "marker_annotation" | "annotation"))
            .map(|c| self.annotation(c))
            .collect()
    }

    fn annotation(&self, node: Node) -> Annotation {
        let name = self.field_text(node, "name");

        let arguments = match node.child_by_field_name("arguments") {
            None => AnnotationArguments::Marker,
            Some(args) => {
                let values = named_children(args);
                if values.iter().any(|v| v.kind() == "element_value_pair") {
                    AnnotationArguments::Named(
                        values
                            .into_iter()
                            .filter(|v| v.kind() == "element_value_pair")
                            .map(|pair| {
                                let key = self.field_text(pair, "key");
                                let value = pair
                                    .child_by_field_name("value")
                                    .map(|v| self.element_value(v))
                                    .unwrap_or_else(|| ElementValue::Expression(String::new()));
                                (key, value)
                            })
                            .collect(),
                    )
                } else if let Some(first) = values.first() {
                    AnnotationArguments::Single(self.element_value(*first))
                } else {
                    AnnotationArguments::Named(Vec::new())
                }
            }
        };

        Annotation { name, arguments }
    }

    fn element_value(&self, node: Node) -> ElementValue {
        match node.kind() {
            "string_literal" => ElementValue::String(decode_string_literal(self.text(node))),
            "element_value_array_initializer" => ElementValue::Array(
                named_children(node)
                    .into_iter()
                    .map(|v| self.element_value(v))
                    .collect(),
            ),
            "marker_annotation" | "annotation" => {
                ElementValue::Annotation(Box::new(self.annotation(node)))
            }
            _ => ElementValue::Expression(self.text(node).to_string()),
        }
    }

    fn type_parameters(&self, node: Node) -> Vec<String> {
        let Some(params) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };
        named_children(params)
            .into_iter()
            .filter(|p| p.kind() == "type_parameter")
            .filter_map(|p| {
                named_children(p)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "type_identifier" | "identifier"))
                    .map(|c| self.text(c).to_string())
            })
            .collect()
    }

    fn type_ref(&self, node: Node) -> TypeRef {
        match node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
                TypeRef::Primitive(self.text(node).to_string())
            }
            "type_identifier" | "identifier" => TypeRef::Named {
                path: vec![self.text(node).to_string()],
                args: Vec::new(),
            },
            "scoped_type_identifier" => TypeRef::Named {
                path: self.scoped_path(node),
                args: Vec::new(),
            },
            "generic_type" => {
                let mut path = Vec::new();
                let mut args = Vec::new();
                for child in named_children(node) {
                    match child.kind() {
                        "type_identifier" => path.push(self.text(child).to_string()),
                        "scoped_type_identifier" => path = self.scoped_path(child),
                        "type_arguments" => {
                            args = named_children(child)
                                .into_iter()
                                .filter(|a| !matches!(a.kind(), "marker_annotation" | "annotation"))
                                .map(|a| self.type_ref(a))
                                .collect();
                        }
                        _ => {}
                    }
                }
                TypeRef::Named { path, args }
            }
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .map(|e| self.type_ref(e))
                    .unwrap_or_else(|| TypeRef::Unparsed(self.text(node).to_string()));
                let dimensions = node
                    .child_by_field_name("dimensions")
                    .map(|d| self.text(d).matches('[').count())
                    .unwrap_or(1);
                TypeRef::Array {
                    element: Box::new(element),
                    dimensions,
                }
            }
            "wildcard" => {
                let mut is_super = false;
                let mut bound = None;
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "super" => is_super = true,
                        "marker_annotation" | "annotation" | "line_comment" | "block_comment" => {}
                        _ if child.is_named() => bound = Some(Box::new(self.type_ref(child))),
                        _ => {}
                    }
                }
                TypeRef::Wildcard(bound.map(|b| {
                    if is_super {
                        WildcardBound::Super(b)
                    } else {
                        WildcardBound::Extends(b)
                    }
                }))
            }
            "annotated_type" => match named_children(node).last() {
                Some(inner) => self.type_ref(*inner),
                None => TypeRef::Unparsed(self.text(node).to_string()),
            },
            _ => TypeRef::Unparsed(self.text(node).to_string()),
        }
    }

    /// Flattens `a.b.C` (possibly with generic qualifiers) into its name segments.
    fn scoped_path(&self, node: Node) -> Vec<String> {
        let mut path = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "type_identifier" | "identifier" => path.push(self.text(child).to_string()),
                "scoped_type_identifier" => path.extend(self.scoped_path(child)),
                "generic_type" => {
                    if let TypeRef::Named { path: inner, .. } = self.type_ref(child) {
                        path.extend(inner);
                    }
                }
                _ => {}
            }
        }
        path
    }

    fn is_javadoc(&self, node: &Node) -> bool {
        node.kind() == "block_comment" && self.text(*node).starts_with("/**")
    }

    /// Finds the `/** ... */` comment directly preceding a declaration.
    fn javadoc(&self, node: Node) -> Option<Javadoc> {
        let preceding = node.prev_named_sibling().filter(|n| self.is_javadoc(n));
        let inside_modifiers = || {
            modifiers(node).and_then(|m| {
                let mut cursor = m.walk();
                let found = m.named_children(&mut cursor).find(|n| self.is_javadoc(n));
                found
            })
        };

        preceding
            .or_else(inside_modifiers)
            .map(|comment| parse_javadoc(self.text(comment)))
    }
}

/// Decodes the text of a Java string literal or text block into its value.
fn decode_string_literal(text: &str) -> String {
    let inner = if let Some(block) = text
        .strip_prefix("\"\"\"")
        .and_then(|t| t.strip_suffix("\"\"\""))
    {
        let content = block
            .strip_prefix("\r\n")
            .or_else(|| block.strip_prefix('\n'))
            .unwrap_or(block);
        Cow::Owned(strip_incidental_indentation(content))
    } else {
        Cow::Borrowed(
            text.strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text),
        )
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('s') => out.push(' '),
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(digit @ '0'..='7') => {
                // Three digits only when the first is 0-3, keeping the value below 0o400
                let extra = if digit <= '3' { 2 } else { 1 };
                let mut value = digit.to_digit(8).unwrap_or_default();
                for _ in 0..extra {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            // Line continuation in text blocks
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Removes the common leading whitespace of a text block's lines along with trailing spaces.
///
/// Blank lines do not count towards the common indentation, except the last line, which
/// holds the closing delimiter.
fn strip_incidental_indentation(content: &str) -> String {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let last = lines.len() - 1;

    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !line.trim().is_empty())
        .map(|(_, line)| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.chars().skip(indent).collect::<String>().trim_end().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

enum JavadocSection {
    Summary,
    Param(usize),
    Return,
    Other,
}

/// Splits a Javadoc comment into its summary, `@param` and `@return` texts.
fn parse_javadoc(comment: &str) -> Javadoc {
    let body = comment
        .trim_start_matches("/**")
        .trim_end_matches("*/");

    let mut summary: Vec<&str> = Vec::new();
    let mut params: Vec<(String, Vec<&str>)> = Vec::new();
    let mut returns: Vec<&str> = Vec::new();
    let mut section = JavadocSection::Summary;

    for line in body.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('@') {
            let (tag, rest) = split_word(line);
            match tag {
                "@param" => {
                    let (name, text) = split_word(rest);
                    params.push((name.to_string(), vec![text]));
                    section = JavadocSection::Param(params.len() - 1);
                }
                "@return" => {
                    returns.push(rest);
                    section = JavadocSection::Return;
                }
                _ => section = JavadocSection::Other,
            }
            continue;
        }

        match section {
            JavadocSection::Summary => summary.push(line),
            JavadocSection::Param(idx) => params[idx].1.push(line),
            JavadocSection::Return => returns.push(line),
            JavadocSection::Other => {}
        }
    }

    Javadoc {
        summary: join_text(&summary),
        params: params
            .into_iter()
            .filter_map(|(name, text)| join_text(&text).map(|t| (name, t)))
            .collect(),
        returns: join_text(&returns),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

fn join_text(parts: &[&str]) -> Option<String> {
    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
