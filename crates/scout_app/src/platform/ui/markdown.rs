//! Flattens the small markdown subset agents write in summaries into plain
//! terminal lines.

const BULLET: &str = "\u{2022}";

/// One output line per input line. Headings lose their `#` marks (top level
/// is upper-cased), `-`/`*` items become bullets, numbered items keep their
/// number, `**bold**` markers are dropped. Runs of blank lines collapse to
/// one and leading or trailing blanks are removed.
pub fn flatten(text: &str, indent: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }
        lines.push(format!("{indent}{}", flatten_line(line)));
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

fn flatten_line(line: &str) -> String {
    if let Some(title) = line.strip_prefix("# ") {
        return strip_bold(title).to_uppercase();
    }
    if let Some(title) = line
        .strip_prefix("### ")
        .or_else(|| line.strip_prefix("## "))
    {
        return strip_bold(title);
    }
    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return format!("  {BULLET} {}", strip_bold(item));
    }
    if let Some((number, item)) = numbered_item(line) {
        return format!("  {number}. {}", strip_bold(item));
    }
    strip_bold(line)
}

fn numbered_item(line: &str) -> Option<(&str, &str)> {
    let (number, rest) = line.split_once(". ")?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((number, rest.trim_start()))
}

/// Removes paired `**` markers. An unpaired marker is kept as typed.
fn strip_bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&after[..close]);
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}
