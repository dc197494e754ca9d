use std::fmt::Write as _;

/// Render a code frame around `line` (1-based) of `source`.
///
/// Lines within `context` of the target are shown with a right-aligned gutter;
/// the target line is marked with `>` and, when `column` (0-based) is known,
/// followed by a caret line. A column past the end of the line puts the caret
/// right after the line's last character. Returns `None` when `line` is
/// outside the source.
pub fn render_code_frame(
    source: &str,
    line: u32,
    column: Option<u32>,
    context: u32,
) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    let target = usize::try_from(line).ok()?;
    if target == 0 || target > lines.len() {
        return None;
    }

    let context = usize::try_from(context).unwrap_or(usize::MAX);
    let first = target.saturating_sub(context).max(1);
    let last = target.saturating_add(context).min(lines.len());
    let gutter = last.to_string().len();

    let mut out = String::new();
    for number in first..=last {
        let text = lines[number - 1];
        let marker = if number == target { '>' } else { ' ' };
        writeln!(out, "{marker} {number:>gutter$} | {text}").unwrap();
        if number == target
            && let Some(column) = column
        {
            // A caret past the end of the line sits just after its last character.
            let offset = usize::try_from(column)
                .unwrap_or(usize::MAX)
                .min(text.chars().count());
            writeln!(out, "  {:gutter$} | {}^", "", " ".repeat(offset)).unwrap();
        }
    }
    // Callers join frames with their own newline.
    out.pop();
    Some(out)
}
