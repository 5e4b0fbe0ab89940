use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::treesitter::detect_language;

pub const IGNORE_FILE: &str = ".strictabcignore";

pub struct FileWalker {
    root: PathBuf,
    /// Exclude globs match paths relative to this directory.
    base: PathBuf,
    excludes: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            base: root.to_path_buf(),
            excludes: GlobSet::empty(),
        }
    }

    /// Match exclude globs relative to `base` instead of the walk root.
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.base = base.to_path_buf();
        self
    }

    /// Skip files whose base-relative path matches any of `patterns`.
    /// Invalid patterns are logged and dropped.
    pub fn with_excludes(mut self, patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern"),
            }
        }
        self.excludes = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to compile ignore patterns");
            GlobSet::empty()
        });
        self
    }

    /// Python sources under the root, sorted by path.
    pub fn walk(&self) -> Vec<PathBuf> {
        // A single file given as root is taken as-is.
        if self.root.is_file() {
            return match detect_language(&self.root) {
                Some(_) if !self.is_excluded(&self.root) => vec![self.root.clone()],
                _ => Vec::new(),
            };
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if detect_language(&path).is_none() {
                continue;
            }
            if self.is_excluded(&path) {
                continue;
            }
            entries.push(path);
        }
        entries.sort();
        entries
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.base).unwrap_or(path);
        let hit = self.excludes.is_match(rel);
        if hit {
            tracing::debug!(path = %rel.display(), "excluded by ignore pattern");
        }
        hit
    }
}
