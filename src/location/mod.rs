pub mod code_frame;
pub mod fs_mapper;

use std::path::Path;

pub use fs_mapper::FsSourceMapper;

/// A (line, column) pair: line 1-based, column 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

/// Everything a [`SourceMapper`] needs to translate one generated position.
#[derive(Debug, Clone, Copy)]
pub struct MappingRequest<'a> {
    /// Position in the generated (transformed) source.
    pub position: SourcePosition,
    /// The generated source text.
    pub source: &'a str,
    /// Project root directory.
    pub root: &'a Path,
    /// Logical module path, relative to `root`.
    pub module_path: &'a str,
}

/// An original-source location, as reported by a [`SourceMapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalFrame {
    pub line: Option<u32>,
    pub column: Option<u32>,
    /// Pre-rendered original code around the location.
    pub code_frame: Option<String>,
}

impl OriginalFrame {
    /// The code frame, or the empty string when none was produced.
    pub fn code_frame(&self) -> &str {
        self.code_frame.as_deref().unwrap_or("")
    }
}

/// Translates generated positions to original ones.
///
/// `Ok(None)` means no mapping exists for the position. `Err` means the lookup
/// itself broke (corrupt or missing map, I/O failure).
pub trait SourceMapper {
    async fn original_frame(
        &self,
        request: &MappingRequest<'_>,
    ) -> anyhow::Result<Option<OriginalFrame>>;
}

/// Outcome of [`resolve_location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(OriginalFrame),
    /// No original location could be determined. Callers fall back to the raw error.
    Unresolved,
}

/// Resolve a generated position to an original frame.
///
/// Mapper failures never propagate: a broken source map must not take the
/// diagnostic pipeline down with it, so they degrade to [`Resolution::Unresolved`].
pub async fn resolve_location<M: SourceMapper>(
    mapper: &M,
    request: &MappingRequest<'_>,
) -> Resolution {
    match mapper.original_frame(request).await {
        Ok(Some(frame)) => Resolution::Resolved(frame),
        Ok(None) => Resolution::Unresolved,
        Err(err) => {
            tracing::debug!(
                module = request.module_path,
                line = request.position.line,
                column = request.position.column,
                "source mapping failed: {err:#}"
            );
            Resolution::Unresolved
        }
    }
}
