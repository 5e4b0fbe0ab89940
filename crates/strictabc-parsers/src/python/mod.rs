//! Python front end.
//!
//! Extracts one [`ClassDef`] per `class` statement. Member tables hold the
//! methods and attributes declared directly in the class body; method
//! descriptors are built from the `def` signature and its decorators.

pub mod imports;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use strictabc_core::class::{ClassBuilder, ClassDef, Markers, Member, MethodDecl, ParamDecl};
use strictabc_core::config::StrictConfig;
use strictabc_core::typeref::parse_type_lenient;
use tree_sitter::Node;

use crate::treesitter::{named_children, node_line, node_text, ParseError, TreeSitterParser};
use imports::ImportTable;

/// Classes found in one source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Display path (relative to the project root where possible).
    pub path: String,
    pub classes: Vec<ClassDef>,
}

pub struct PyClassExtractor {
    parser: TreeSitterParser,
    marker_modules: Vec<String>,
}

impl PyClassExtractor {
    pub fn new(config: &StrictConfig) -> Self {
        Self {
            parser: TreeSitterParser::new(),
            marker_modules: config.marker_modules.clone(),
        }
    }

    /// Read and extract one file. `display` is the path recorded in locations.
    pub fn extract_path(&mut self, path: &Path, display: &str) -> Result<ParsedFile, ParseError> {
        let source = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: display.to_string(),
            source: e,
        })?;
        let classes = self.extract(display, &source)?;
        Ok(ParsedFile {
            path: display.to_string(),
            classes,
        })
    }

    /// Extract every class defined in `source`, in source order.
    pub fn extract(&mut self, file: &str, source: &str) -> Result<Vec<ClassDef>, ParseError> {
        let bytes = source.as_bytes();
        let tree = self.parser.parse("python", bytes)?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::warn!(file, "syntax errors in module; extraction is best-effort");
        }

        let mut imports = ImportTable::new();
        collect_imports(root, bytes, &mut imports);

        let ctx = Context {
            file,
            source: bytes,
            imports: &imports,
            marker_modules: &self.marker_modules,
        };
        let mut classes = Vec::new();
        ctx.collect_classes(root, &mut classes);
        tracing::debug!(file, classes = classes.len(), "extracted classes");
        Ok(classes)
    }
}

/// Extract many files in parallel. Results keep the order of `files`.
pub fn extract_files(
    files: &[PathBuf],
    root: &Path,
    config: &StrictConfig,
) -> Vec<Result<ParsedFile, ParseError>> {
    files
        .par_iter()
        .map_init(
            || PyClassExtractor::new(config),
            |extractor, path| extractor.extract_path(path, &display_path(path, root)),
        )
        .collect()
}

/// Path relative to `root` with forward slashes.
pub fn display_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

fn collect_imports(node: Node<'_>, source: &[u8], imports: &mut ImportTable) {
    for child in named_children(node) {
        match child.kind() {
            "import_statement" | "import_from_statement" => imports.record(child, source),
            "function_definition" | "class_definition" | "decorated_definition" => {}
            _ => collect_imports(child, source, imports),
        }
    }
}

struct Context<'a> {
    file: &'a str,
    source: &'a [u8],
    imports: &'a ImportTable,
    marker_modules: &'a [String],
}

impl Context<'_> {
    fn text(&self, node: Node<'_>) -> String {
        collapse_whitespace(node_text(node, self.source))
    }

    /// Walk module-level and nested compound statements for `class` nodes.
    /// Function bodies are not entered.
    fn collect_classes(&self, node: Node<'_>, out: &mut Vec<ClassDef>) {
        for child in named_children(node) {
            match child.kind() {
                "class_definition" => self.push_class(child, out),
                "decorated_definition" => {
                    if let Some(def) = child.child_by_field_name("definition") {
                        if def.kind() == "class_definition" {
                            self.push_class(def, out);
                        }
                    }
                }
                "function_definition" => {}
                _ => self.collect_classes(child, out),
            }
        }
    }

    fn push_class(&self, node: Node<'_>, out: &mut Vec<ClassDef>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let mut builder = ClassDef::builder(node_text(name_node, self.source))
            .at(self.file, node_line(node));
        if let Some(parent) = node
            .child_by_field_name("superclasses")
            .and_then(|args| self.first_base(args))
        {
            builder = builder.parent(parent);
        }

        let body = node.child_by_field_name("body");
        if let Some(body) = body {
            self.collect_members(body, &mut builder);
        }
        out.push(builder.build());

        if let Some(body) = body {
            self.collect_classes(body, out);
        }
    }

    /// First positional base class, reduced to its final name segment.
    fn first_base(&self, args: Node<'_>) -> Option<String> {
        let base = named_children(args).into_iter().find(|n| {
            !matches!(
                n.kind(),
                "keyword_argument" | "list_splat" | "dictionary_splat" | "comment"
            )
        })?;
        let base = match base.kind() {
            "subscript" => base.child_by_field_name("value")?,
            _ => base,
        };
        let text = self.text(base);
        Some(text.rsplit('.').next().unwrap_or(&text).to_string())
    }

    fn collect_members(&self, body: Node<'_>, builder: &mut ClassBuilder) {
        for stmt in named_children(body) {
            match stmt.kind() {
                "function_definition" => self.push_function(stmt, &[], builder),
                "decorated_definition" => {
                    let Some(def) = stmt.child_by_field_name("definition") else {
                        continue;
                    };
                    let decorators: Vec<String> = named_children(stmt)
                        .into_iter()
                        .filter(|n| n.kind() == "decorator")
                        .filter_map(|d| self.decorator_name(d))
                        .collect();
                    match def.kind() {
                        "function_definition" => self.push_function(def, &decorators, builder),
                        "class_definition" => self.push_nested_class(def, builder),
                        _ => {}
                    }
                }
                "class_definition" => self.push_nested_class(stmt, builder),
                "expression_statement" => {
                    for expr in named_children(stmt) {
                        if expr.kind() == "assignment" {
                            self.push_assignment(expr, builder);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn push_nested_class(&self, node: Node<'_>, builder: &mut ClassBuilder) {
        if let Some(name) = node.child_by_field_name("name") {
            builder.push(Member::Attribute {
                name: node_text(name, self.source).to_string(),
            });
        }
    }

    fn push_assignment(&self, node: Node<'_>, builder: &mut ClassBuilder) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        let targets = match left.kind() {
            "identifier" => vec![left],
            "pattern_list" | "tuple_pattern" => named_children(left)
                .into_iter()
                .filter(|n| n.kind() == "identifier")
                .collect(),
            _ => Vec::new(),
        };
        for target in targets {
            builder.push(Member::Attribute {
                name: node_text(target, self.source).to_string(),
            });
        }
        // `a = b = 1` nests a second assignment on the right.
        if let Some(right) = node.child_by_field_name("right") {
            if right.kind() == "assignment" {
                self.push_assignment(right, builder);
            }
        }
    }

    /// Decorator expression without call arguments (`@x.y(...)` gives `x.y`).
    fn decorator_name(&self, decorator: Node<'_>) -> Option<String> {
        let expr = decorator.named_child(0)?;
        let target = match expr.kind() {
            "call" => expr.child_by_field_name("function")?,
            _ => expr,
        };
        Some(self.text(target))
    }

    fn push_function(&self, node: Node<'_>, decorators: &[String], builder: &mut ClassBuilder) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, self.source).to_string();

        if decorators.iter().any(|d| is_property_like(d)) {
            builder.push(Member::Attribute { name });
            return;
        }
        let is_static = decorators
            .iter()
            .any(|d| self.imports.qualify(d).rsplit('.').next() == Some("staticmethod"));

        let markers = decorators.iter().fold(Markers::default(), |acc, d| {
            let m = self.imports.decorator_markers(d, self.marker_modules);
            Markers {
                is_abstract: acc.is_abstract || m.is_abstract,
                restricted: acc.restricted || m.restricted,
            }
        });

        let mut params = node
            .child_by_field_name("parameters")
            .map(|p| self.parameters(p))
            .unwrap_or_default();
        let receiver = if !is_static && params.first().is_some_and(|p| !p.name.starts_with('*')) {
            Some(params.remove(0).name)
        } else {
            None
        };

        let mut decl = MethodDecl::new(name).at(self.file, node_line(node));
        decl.receiver = receiver;
        decl.params = params;
        decl.returns = node
            .child_by_field_name("return_type")
            .map(|t| parse_type_lenient(&self.text(t)));
        decl.markers = markers;
        builder.push(Member::Method(decl));
    }

    fn parameters(&self, params: Node<'_>) -> Vec<ParamDecl> {
        let mut out = Vec::new();
        for p in named_children(params) {
            let (name, annotation, default) = match p.kind() {
                "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" | "tuple_pattern" => {
                    (Some(self.text(p)), None, None)
                }
                "typed_parameter" => (
                    p.named_child(0).map(|n| self.text(n)),
                    p.child_by_field_name("type"),
                    None,
                ),
                "default_parameter" => (
                    p.child_by_field_name("name").map(|n| self.text(n)),
                    None,
                    p.child_by_field_name("value"),
                ),
                "typed_default_parameter" => (
                    p.child_by_field_name("name").map(|n| self.text(n)),
                    p.child_by_field_name("type"),
                    p.child_by_field_name("value"),
                ),
                // `*` and `/` separators, comments
                _ => continue,
            };
            let Some(name) = name else {
                continue;
            };
            out.push(ParamDecl {
                name,
                annotation: annotation.map(|t| parse_type_lenient(&self.text(t))),
                default: default.map(|v| self.text(v)),
            });
        }
        out
    }
}

fn is_property_like(decorator: &str) -> bool {
    let leaf = decorator.rsplit('.').next().unwrap_or(decorator);
    matches!(leaf, "property" | "cached_property")
        || (decorator.contains('.') && matches!(leaf, "setter" | "getter" | "deleter"))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "python_tests.rs"]
mod tests;
