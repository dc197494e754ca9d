use super::raw::RawError;
use super::{BuildDiagnostic, Classification, DiagnosticContext};
use crate::emphasis::Style;
use crate::graph::node::ModuleInfo;
use crate::trace::module_trace;

pub const TITLE: &str = "Error";

/// Internal alias under which the bundler requests user pages.
const PRIVATE_PAGES_PREFIX: &str = "private-next-pages";
/// How those pages are shown to users.
const PUBLIC_PAGES_PREFIX: &str = "./pages";

/// Map an internal page request to the path a user recognizes.
pub fn page_path(request: &str) -> String {
    match request.strip_prefix(PRIVATE_PAGES_PREFIX) {
        Some(rest) => format!("{PUBLIC_PAGES_PREFIX}{rest}"),
        None => request.to_owned(),
    }
}

/// Zero-based index of the first `'\n'`-separated line of `source` that
/// mentions `imported_file`.
///
/// Best effort: when nothing matches, the index of the last segment is
/// returned, which equals the number of newlines in `source`.
pub fn find_import_line(source: &str, imported_file: &str) -> usize {
    source
        .split('\n')
        .position(|line| line.contains(imported_file))
        .unwrap_or_else(|| source.matches('\n').count())
}

/// Enrich an invalid-image-format error using the module that imported the image.
///
/// Without an importer there is nothing to point at, so the error is left to
/// other reporters.
pub fn diagnose<'r, M>(ctx: &DiagnosticContext<'_, M>, raw: &'r RawError) -> Classification<'r> {
    let Some(image) = raw.module else {
        return Classification::NotApplicable;
    };
    let Some(hop) = module_trace(ctx.graph, image).into_iter().next() else {
        return Classification::NotApplicable;
    };
    let (Some(origin), Some(module)) = (ctx.graph.module(hop.origin), ctx.graph.module(hop.module))
    else {
        return Classification::NotApplicable;
    };

    let page = page_path(&request_or_identifier(ctx, origin));
    let imported_file = module
        .raw_request
        .clone()
        .or_else(|| {
            ctx.graph
                .import_specifier(hop.origin, hop.module)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| ctx.shortener.readable_identifier(module));
    let line = find_import_line(origin.original_source(), &imported_file);

    let emphasis = ctx.emphasis;
    let label = format!(
        "{}:{}",
        emphasis.emphasize(&page, Style::Path),
        emphasis.emphasize(&line.to_string(), Style::Position),
    );
    let body = format!(
        "{}: Image import \"{imported_file}\" is not a valid image file. \
         The image may be corrupted or an unsupported format.",
        emphasis.emphasize(TITLE, Style::Error),
    );

    Classification::Diagnostic(BuildDiagnostic {
        label,
        title: TITLE.to_owned(),
        body,
    })
}

fn request_or_identifier<M>(ctx: &DiagnosticContext<'_, M>, module: &ModuleInfo) -> String {
    module
        .raw_request
        .clone()
        .unwrap_or_else(|| ctx.shortener.readable_identifier(module))
}
