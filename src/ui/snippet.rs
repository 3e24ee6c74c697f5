//! Turns backend snippet markup into plain styled segments.
//!
//! Snippets are untrusted HTML fragments. Every tag is dropped; only
//! `<span class="searchmatch">` survives, as a highlight flag on the text it
//! wraps.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetSegment {
    pub text: String,
    pub highlighted: bool,
}

pub fn sanitize_snippet(markup: &str) -> Vec<SnippetSegment> {
    let mut builder = SegmentBuilder::default();
    // One flag per open span, so nested spans close correctly.
    let mut spans: Vec<bool> = Vec::new();
    let mut rest = markup;

    while let Some(idx) = rest.find(['<', '&']) {
        builder.push_text(&rest[..idx], is_highlighted(&spans));
        rest = &rest[idx..];

        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                // Unterminated tag: drop the remainder rather than leak markup.
                rest = "";
                break;
            };
            apply_tag(&rest[1..end], &mut spans);
            rest = &rest[end + 1..];
        } else {
            let (decoded, consumed) = decode_entity(rest);
            builder.push_text(&decoded, is_highlighted(&spans));
            rest = &rest[consumed..];
        }
    }
    builder.push_text(rest, is_highlighted(&spans));
    builder.finish()
}

/// Flattens segments into plain text.
pub fn plain_text(segments: &[SnippetSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect()
}

fn is_highlighted(spans: &[bool]) -> bool {
    spans.iter().any(|highlight| *highlight)
}

fn apply_tag(tag: &str, spans: &mut Vec<bool>) {
    let tag = tag.trim();
    if let Some(name) = tag.strip_prefix('/') {
        if name.trim().eq_ignore_ascii_case("span") {
            spans.pop();
        }
        return;
    }

    let name = tag
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("");
    if !name.eq_ignore_ascii_case("span") || tag.ends_with('/') {
        return;
    }
    spans.push(has_searchmatch_class(tag));
}

fn has_searchmatch_class(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    let Some(idx) = lower.find("class") else {
        return false;
    };
    let value = lower[idx + "class".len()..].trim_start();
    let Some(value) = value.strip_prefix('=') else {
        return false;
    };
    let value = value.trim_start();
    let value = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => value[1..].split(quote).next().unwrap_or(""),
        _ => value.split_whitespace().next().unwrap_or(""),
    };
    value.split_whitespace().any(|class| class == "searchmatch")
}

/// Decodes the entity at the start of `input`. Unknown or malformed entities
/// are kept literally.
fn decode_entity(input: &str) -> (String, usize) {
    let Some(end) = input[1..].find(';').map(|idx| idx + 1) else {
        return ("&".to_string(), 1);
    };
    let name = &input[1..end];
    if name.is_empty() || name.len() > 10 {
        return ("&".to_string(), 1);
    }

    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        _ => decode_numeric(name),
    };
    match decoded {
        Some(ch) => (ch.to_string(), end + 1),
        None => ("&".to_string(), 1),
    }
}

fn decode_numeric(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code).filter(|ch| !ch.is_control() || ch.is_whitespace())
}

#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<SnippetSegment>,
    pending_space: bool,
}

impl SegmentBuilder {
    fn push_text(&mut self, text: &str, highlighted: bool) {
        for ch in text.chars() {
            if ch.is_whitespace() || ch.is_control() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space {
                self.pending_space = false;
                if let Some(last) = self.segments.last() {
                    // Spaces at a highlight boundary stay unhighlighted.
                    let space_highlighted = highlighted && last.highlighted;
                    self.push_char(' ', space_highlighted);
                }
            }
            self.push_char(ch, highlighted);
        }
    }

    fn push_char(&mut self, ch: char, highlighted: bool) {
        match self.segments.last_mut() {
            Some(last) if last.highlighted == highlighted => last.text.push(ch),
            _ => self.segments.push(SnippetSegment {
                text: ch.to_string(),
                highlighted,
            }),
        }
    }

    fn finish(self) -> Vec<SnippetSegment> {
        self.segments
    }
}
