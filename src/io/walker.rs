use crate::core::SourceFile;
use crate::errors::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Extensions of the JavaScript/TypeScript sources the analyzer understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

const ALWAYS_SKIPPED: &str = "node_modules";

pub struct SourceWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl SourceWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Matching files under the root, sorted by path.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let patterns = self
            .ignore_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .filter_entry(|entry| entry.file_name() != ALWAYS_SKIPPED)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path, &patterns) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path, patterns: &[glob::Pattern]) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext_str = ext.to_string_lossy();
        if !self.extensions.iter().any(|e| *e == ext_str) {
            return false;
        }

        let relative = self.relative_path(path);
        let absolute = path.to_string_lossy();
        !patterns
            .iter()
            .any(|p| p.matches(&relative) || p.matches(&absolute))
    }

    /// Root-relative path with `/` separators.
    pub fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Walk and read every matching file.
    pub fn collect(&self) -> Result<Vec<SourceFile>> {
        let files = self.walk()?;
        log::debug!(
            "Collected {} source files under {}",
            files.len(),
            self.root.display()
        );

        files
            .iter()
            .map(|path| {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::file_system("Failed to read source file", path.clone(), e)
                })?;
                Ok(SourceFile::new(self.relative_path(path), content))
            })
            .collect()
    }
}

/// Collect sources under `root`, skipping files that match `ignore_patterns`.
pub fn collect_sources(root: &Path, ignore_patterns: &[String]) -> Result<Vec<SourceFile>> {
    SourceWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns.to_vec())
        .collect()
}
