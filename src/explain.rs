use crate::diagnostics::raw::RawError;
use crate::diagnostics::{BuildDiagnostic, Classification, DiagnosticContext, classify};
use crate::location::SourceMapper;
use crate::report::ReportedError;

/// What happened to one reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Enriched into a diagnostic.
    Enriched(BuildDiagnostic),
    /// Recognized, but location resolution failed; the raw error is shown as-is.
    PassedThrough,
    /// Not a kind this tool handles; the raw error is shown as-is.
    NotApplicable,
    /// Recognized, but missing data needed to enrich it.
    Failed(String),
}

/// A reported error together with its outcome.
#[derive(Debug, Clone)]
pub struct Explained {
    pub name: String,
    pub message: String,
    pub outcome: Outcome,
}

/// Logical module path for an error: the explicit override, else the failing
/// module's [`RequestShortener::module_path`] (its resource relative to the
/// root, or its readable identifier). Empty only when the error has no module.
///
/// [`RequestShortener::module_path`]: crate::graph::shortener::RequestShortener::module_path
pub fn module_path_for<M>(ctx: &DiagnosticContext<'_, M>, reported: &ReportedError) -> String {
    if let Some(file) = &reported.file {
        return file.clone();
    }
    reported
        .raw
        .module
        .and_then(|m| ctx.graph.module(m))
        .map(|info| ctx.shortener.module_path(info))
        .unwrap_or_default()
}

/// Classify every reported error, one at a time.
pub async fn explain_errors<M: SourceMapper>(
    ctx: &DiagnosticContext<'_, M>,
    errors: &[ReportedError],
) -> Vec<Explained> {
    let mut explained = Vec::with_capacity(errors.len());
    for reported in errors {
        let module_path = module_path_for(ctx, reported);
        let outcome = match classify(ctx, &reported.raw, &module_path).await {
            Ok(Classification::Diagnostic(diagnostic)) => Outcome::Enriched(diagnostic),
            Ok(Classification::PassThrough(_)) => Outcome::PassedThrough,
            Ok(Classification::NotApplicable) => Outcome::NotApplicable,
            Err(err) => {
                tracing::warn!("could not enrich {}: {err}", reported.raw.name);
                Outcome::Failed(err.to_string())
            }
        };
        explained.push(explain(&reported.raw, outcome));
    }
    explained
}

fn explain(raw: &RawError, outcome: Outcome) -> Explained {
    Explained {
        name: raw.name.clone(),
        message: raw.message.clone(),
        outcome,
    }
}
