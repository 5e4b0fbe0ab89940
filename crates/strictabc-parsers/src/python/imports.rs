//! Import tracking for decorator resolution.
//!
//! Maps the local names a module binds through `import` / `from ... import`
//! to their qualified origin, so a decorator such as `@am` or
//! `@m.abstractmethod` can be traced back to `abcmeta.abstractmethod`.

use std::collections::HashMap;

use strictabc_core::class::Markers;
use tree_sitter::Node;

use crate::treesitter::{named_children, node_text};

const ABSTRACT_DECORATOR: &str = "abstractmethod";

#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    /// local name -> qualified name
    bindings: HashMap<String, String>,
    /// modules pulled in with `from m import *`
    star_modules: Vec<String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, local: impl Into<String>, qualified: impl Into<String>) {
        self.bindings.insert(local.into(), qualified.into());
    }

    pub fn bind_star(&mut self, module: impl Into<String>) {
        self.star_modules.push(module.into());
    }

    /// Qualify a dotted name through the table. Unbound names come back as-is.
    pub fn qualify(&self, dotted: &str) -> String {
        let (head, rest) = match dotted.split_once('.') {
            Some((h, r)) => (h, Some(r)),
            None => (dotted, None),
        };
        let base = match self.bindings.get(head) {
            Some(q) => q.clone(),
            None => return dotted.to_string(),
        };
        match rest {
            Some(r) => format!("{base}.{r}"),
            None => base,
        }
    }

    /// Markers implied by one decorator expression.
    ///
    /// `abstractmethod` from a configured marker module yields both markers.
    /// Any other `abstractmethod` (the standard `abc` one, or a name that
    /// cannot be traced) yields only the generic abstract marker.
    pub fn decorator_markers(&self, decorator: &str, marker_modules: &[String]) -> Markers {
        let qualified = self.qualify(decorator);
        let (module, leaf) = match qualified.rsplit_once('.') {
            Some((m, l)) => (Some(m), l),
            None => (None, qualified.as_str()),
        };
        if leaf != ABSTRACT_DECORATOR {
            return Markers::default();
        }
        let from_marker_module = match module {
            Some(m) => marker_modules.iter().any(|mm| mm == m),
            None => self
                .star_modules
                .iter()
                .any(|sm| marker_modules.contains(sm)),
        };
        if from_marker_module {
            Markers::RESTRICTED_ABSTRACT
        } else {
            Markers {
                is_abstract: true,
                restricted: false,
            }
        }
    }

    /// Record the bindings made by an `import_statement` or
    /// `import_from_statement` node.
    pub fn record(&mut self, node: Node<'_>, source: &[u8]) {
        match node.kind() {
            "import_statement" => self.record_import(node, source),
            "import_from_statement" => self.record_import_from(node, source),
            _ => {}
        }
    }

    fn record_import(&mut self, node: Node<'_>, source: &[u8]) {
        for child in named_children(node) {
            match child.kind() {
                "dotted_name" => {
                    // `import a.b` binds `a` to `a`.
                    let full = node_text(child, source);
                    let head = full.split('.').next().unwrap_or(full);
                    self.bind(head, head);
                }
                "aliased_import" => {
                    let (Some(name), Some(alias)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("alias"),
                    ) else {
                        continue;
                    };
                    self.bind(node_text(alias, source), node_text(name, source));
                }
                _ => {}
            }
        }
    }

    fn record_import_from(&mut self, node: Node<'_>, source: &[u8]) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            return;
        };
        let module = node_text(module_node, source).to_string();
        for child in named_children(node) {
            if child.id() == module_node.id() {
                continue;
            }
            match child.kind() {
                "dotted_name" => {
                    let name = node_text(child, source);
                    self.bind(name, format!("{module}.{name}"));
                }
                "aliased_import" => {
                    let (Some(name), Some(alias)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("alias"),
                    ) else {
                        continue;
                    };
                    let name = node_text(name, source);
                    self.bind(node_text(alias, source), format!("{module}.{name}"));
                }
                "wildcard_import" => self.bind_star(module.clone()),
                _ => {}
            }
        }
    }
}
