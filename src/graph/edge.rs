/// The kind of directed edge between two modules in the module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// Origin -> Module: the origin imports the module.
    /// `specifier` is the raw import path string as written in source.
    Imports { specifier: String },
    /// Origin -> Module: the origin is the module's issuer, i.e. the module that
    /// caused it to be included. At most one per target module.
    Issuer,
}
