pub mod image;
pub mod not_found;
pub mod raw;

use std::path::Path;

use serde::Serialize;

use crate::emphasis::Emphasis;
use crate::graph::ModuleGraph;
use crate::graph::shortener::RequestShortener;
use crate::location::SourceMapper;
use crate::trace::LoaderFilter;

use raw::{KnownKind, RawError};

/// A developer-facing diagnostic built from a raw build error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostic {
    /// Location label such as `pages/index.js:3:14`.
    pub label: String,
    /// Short title, without emphasis.
    pub title: String,
    /// Full message body. Starts with the emphasized title.
    pub body: String,
}

/// What [`classify`] did with a raw error.
#[derive(Debug)]
pub enum Classification<'r> {
    /// The error was recognized and enriched.
    Diagnostic(BuildDiagnostic),
    /// The error was recognized but could not be enriched. Holds the very same
    /// raw error that was passed in.
    PassThrough(&'r RawError),
    /// Not an error kind this layer handles.
    NotApplicable,
}

/// A recognized error that lacks data needed to enrich it.
#[derive(Debug, thiserror::Error)]
pub enum DiagnoseError {
    /// A module-not-found error with neither its own location nor any dependency location.
    #[error("{name} in {module} carries no source location")]
    MissingLocation { name: String, module: String },

    /// The error does not reference a module in the graph.
    #[error("{0} is not attached to a module in the graph")]
    MissingModule(String),
}

/// Read-only collaborators shared by every classification in one build.
pub struct DiagnosticContext<'a, M> {
    pub graph: &'a ModuleGraph,
    pub shortener: &'a RequestShortener,
    pub filter: &'a LoaderFilter,
    pub mapper: &'a M,
    pub emphasis: &'a dyn Emphasis,
    /// Project root directory, handed to the source mapper.
    pub root: &'a Path,
}

/// Classify `raw` and enrich it when it is a known kind.
///
/// `module_path` is the logical path of the failing module, used in labels and
/// for source mapping. Only the module-not-found path awaits (on the mapper).
pub async fn classify<'r, M: SourceMapper>(
    ctx: &DiagnosticContext<'_, M>,
    raw: &'r RawError,
    module_path: &str,
) -> Result<Classification<'r>, DiagnoseError> {
    match KnownKind::from_name(&raw.name) {
        Some(KnownKind::ModuleNotFound) => not_found::diagnose(ctx, raw, module_path).await,
        Some(KnownKind::InvalidImageFormat) => Ok(image::diagnose(ctx, raw)),
        None => Ok(Classification::NotApplicable),
    }
}
