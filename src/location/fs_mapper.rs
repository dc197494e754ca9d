use std::io::ErrorKind;

use anyhow::Context as _;

use super::code_frame::render_code_frame;
use super::{MappingRequest, OriginalFrame, SourceMapper};

/// Default number of lines shown on each side of the failing line.
pub const DEFAULT_CONTEXT_LINES: u32 = 2;

/// Source mapper that reads the original file from disk.
///
/// Positions are taken as-is: the file at `root/module_path` is assumed to be
/// what the reported position refers to. Modules without a file on disk
/// (virtual or generated modules) fall back to the generated source text.
/// Positions beyond the end of the text have no mapping.
#[derive(Debug, Clone)]
pub struct FsSourceMapper {
    context_lines: u32,
}

impl FsSourceMapper {
    pub fn new(context_lines: u32) -> Self {
        Self { context_lines }
    }
}

impl Default for FsSourceMapper {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_LINES)
    }
}

impl SourceMapper for FsSourceMapper {
    async fn original_frame(
        &self,
        request: &MappingRequest<'_>,
    ) -> anyhow::Result<Option<OriginalFrame>> {
        let path = request.root.join(request.module_path);
        let original = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => request.source.to_owned(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading original source {}", path.display()));
            }
        };

        let position = request.position;
        let Some(code_frame) = render_code_frame(
            &original,
            position.line,
            Some(position.column),
            self.context_lines,
        ) else {
            return Ok(None);
        };

        Ok(Some(OriginalFrame {
            line: Some(position.line),
            column: Some(position.column),
            code_frame: Some(code_frame),
        }))
    }
}
