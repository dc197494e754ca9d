use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::raw::RawError;
use super::{BuildDiagnostic, Classification, DiagnoseError, DiagnosticContext};
use crate::emphasis::{Emphasis, Style};
use crate::location::{MappingRequest, Resolution, SourceMapper, resolve_location};
use crate::trace::render_import_trace;

pub const TITLE: &str = "Module not found";

/// Footer appended to every module-not-found diagnostic.
pub const DOCS_URL: &str = "https://nextjs.org/docs/messages/module-not-found";

static IN_PATH_CLAUSE: OnceLock<Regex> = OnceLock::new();
static CANT_RESOLVE: OnceLock<Regex> = OnceLock::new();

fn in_path_clause() -> &'static Regex {
    IN_PATH_CLAUSE.get_or_init(|| Regex::new(r" in '.*?'").expect("invalid in-path pattern"))
}

fn cant_resolve() -> &'static Regex {
    CANT_RESOLVE
        .get_or_init(|| Regex::new(r"Can't resolve '(.*)'").expect("invalid can't-resolve pattern"))
}

/// Drop the ` in '<dir>'` clause from a resolver message and emphasize the
/// request that could not be resolved.
///
/// `Can't resolve 'lodash' in '/src/app.js'` becomes `Can't resolve 'lodash'`
/// with `lodash` highlighted.
pub fn rewrite_message(message: &str, emphasis: &dyn Emphasis) -> String {
    let without_path = in_path_clause().replace(message, "");
    cant_resolve()
        .replace(&without_path, |caps: &Captures| {
            format!(
                "Can't resolve '{}'",
                emphasis.emphasize(&caps[1], Style::Highlight)
            )
        })
        .into_owned()
}

/// Enrich a module-not-found error.
///
/// Returns the raw error unchanged when the location cannot be mapped back to
/// original source.
pub async fn diagnose<'r, M: SourceMapper>(
    ctx: &DiagnosticContext<'_, M>,
    raw: &'r RawError,
    module_path: &str,
) -> Result<Classification<'r>, DiagnoseError> {
    let missing_module = || DiagnoseError::MissingModule(raw.name.clone());
    let module = raw.module.ok_or_else(missing_module)?;
    let info = ctx.graph.module(module).ok_or_else(missing_module)?;
    let loc = raw
        .location()
        .ok_or_else(|| DiagnoseError::MissingLocation {
            name: raw.name.clone(),
            module: module_path.to_owned(),
        })?;

    let request = MappingRequest {
        position: loc.start,
        source: info.original_source(),
        root: ctx.root,
        module_path,
    };
    let frame = match resolve_location(ctx.mapper, &request).await {
        Resolution::Resolved(frame) => frame,
        Resolution::Unresolved => return Ok(Classification::PassThrough(raw)),
    };

    let emphasis = ctx.emphasis;
    let message = rewrite_message(&raw.message, emphasis);
    let code_frame = frame.code_frame();
    let trace = render_import_trace(ctx.graph, module, ctx.shortener, ctx.filter);

    let body = format!(
        "{}: {message}\n{code_frame}{}{trace}\n{DOCS_URL}",
        emphasis.emphasize(TITLE, Style::Error),
        if code_frame.is_empty() { "" } else { "\n" },
    );
    let label = format!(
        "{}:{}:{}",
        emphasis.emphasize(module_path, Style::Path),
        emphasis.emphasize(&display_or_empty(frame.line), Style::Position),
        emphasis.emphasize(&display_or_empty(frame.column), Style::Position),
    );

    Ok(Classification::Diagnostic(BuildDiagnostic {
        label,
        title: TITLE.to_owned(),
        body,
    }))
}

fn display_or_empty(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
