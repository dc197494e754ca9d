use petgraph::stable_graph::NodeIndex;

use crate::location::SourcePosition;

/// Error names this layer knows how to enrich.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownKind {
    /// An import that the resolver could not find (`ModuleNotFoundError`).
    ModuleNotFound,
    /// An image asset that is corrupt or in an unsupported format (`InvalidImageFormatError`).
    InvalidImageFormat,
}

impl KnownKind {
    /// Classify a raw error discriminant. `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ModuleNotFoundError" => Some(Self::ModuleNotFound),
            "InvalidImageFormatError" => Some(Self::InvalidImageFormat),
            _ => None,
        }
    }
}

/// Where a dependency starts in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DependencyLocation {
    pub start: SourcePosition,
}

/// One dependency attached to a raw error.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub loc: Option<DependencyLocation>,
}

/// A build failure exactly as the bundler reported it.
#[derive(Debug, Clone, Default)]
pub struct RawError {
    /// Discriminant, e.g. `ModuleNotFoundError`.
    pub name: String,
    /// Underlying error message.
    pub message: String,
    pub loc: Option<DependencyLocation>,
    pub dependencies: Vec<Dependency>,
    /// The module the error belongs to. For image errors this is the image module itself.
    pub module: Option<NodeIndex>,
}

impl RawError {
    /// Where the error happened: its own location, else the first dependency
    /// location in list order.
    pub fn location(&self) -> Option<DependencyLocation> {
        self.loc.or_else(|| self.dependencies.iter().find_map(|d| d.loc))
    }
}
