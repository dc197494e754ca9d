use std::path::PathBuf;

/// Metadata about a module in the bundler's dependency graph.
///
/// Two `ModuleInfo` values with identical fields are still different modules
/// once added to the graph: identity is the node index, not the contents.
#[derive(Debug, Clone, Default)]
pub struct ModuleInfo {
    /// Full module identifier, possibly prefixed with `!`-separated loader requests.
    pub identifier: String,
    /// The request string exactly as written by the importer (e.g. `private-next-pages/index.js`).
    pub raw_request: Option<String>,
    /// Absolute path of the underlying resource, when the module is backed by a file.
    pub resource: Option<PathBuf>,
    /// Original (pre-transform) source text.
    pub original_source: Option<String>,
}

impl ModuleInfo {
    /// Original source text, or the empty string when the module carries none.
    pub fn original_source(&self) -> &str {
        self.original_source.as_deref().unwrap_or("")
    }
}
