/// Strip markdown formatting from a model-produced question.
///
/// Interview questions are surfaced as plain text; models occasionally
/// ignore the format instruction and emit bold markers, headers or bullets.
pub fn strip_markdown(text: &str) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        let line = strip_block_prefix(line);
        let line = strip_inline_pairs(line, "**");
        let line = strip_inline_pairs(&line, "__");
        let line = strip_inline_pairs(&line, "*");
        let line = strip_inline_pairs(&line, "_");
        let line = strip_inline_pairs(&line, "`");
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}

/// Remove a header, bullet or numbered-list prefix anchored at line start.
fn strip_block_prefix(line: &str) -> &str {
    if line.starts_with('#') {
        return line.trim_start_matches('#').trim_start();
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))
        && rest.starts_with(char::is_whitespace)
    {
        return rest.trim_start();
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = line[digits..].strip_prefix('.')
        && rest.starts_with(char::is_whitespace)
    {
        return rest.trim_start();
    }

    line
}

/// Unwrap `marker...marker` pairs, keeping the inner text. Unpaired markers
/// are left alone.
fn strip_inline_pairs(line: &str, marker: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        let Some(start) = rest.find(marker) else {
            out.push_str(rest);
            break;
        };
        let after = &rest[start + marker.len()..];
        match after.find(marker) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(&after[..end]);
                rest = &after[end + marker.len()..];
            }
            _ => {
                out.push_str(&rest[..start + marker.len()]);
                rest = after;
            }
        }
    }
    out
}
