//! Doc comment to tooltip normalization.

const TAB_WIDTH: usize = 4;

/// Regions and markers that never reach a tooltip.
const IGNORED_REGIONS: &[(&str, &str)] = &[("@ignore", "@endignore"), ("@cond", "@endcond")];
const IGNORED_MARKERS: &[&str] = &["(cpptext)"];

/// Turn raw comments (delimiters included) into tooltip text.
pub fn normalize_tooltip(comments: &[&str]) -> String {
    let doc_style = comments.iter().any(|c| c.trim_start().starts_with("/**"));
    let mut text = match comments {
        [single] => strip_delimiters(single),
        _ => comments
            .iter()
            .map(|c| strip_delimiters(c))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    for (open, close) in IGNORED_REGIONS {
        text = remove_regions(&text, open, close);
    }
    for marker in IGNORED_MARKERS {
        text = text.replace(marker, "");
    }
    text.retain(|c| c != '\r');

    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    if doc_style {
        for line in &mut lines {
            *line = strip_star(line);
        }
    }

    while lines.first().is_some_and(|l| is_blank_or_separator(l)) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| is_blank_or_separator(l)) {
        lines.pop();
    }

    let indent = lines.first().map_or(0, |l| leading_whitespace(l));
    let out: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let strip = leading_whitespace(line).min(indent);
            let mut rest = &line[strip..];
            if i > 0 {
                rest = rest.strip_prefix('\t').unwrap_or(rest);
            }
            expand_tabs(rest).trim_end().to_owned()
        })
        .collect();
    out.join("\n")
}

fn strip_delimiters(comment: &str) -> String {
    let trimmed = comment.trim();
    if let Some(body) = trimmed.strip_prefix("/**") {
        return body.strip_suffix("*/").unwrap_or(body).to_owned();
    }
    if let Some(body) = trimmed.strip_prefix("/*") {
        return body.strip_suffix("*/").unwrap_or(body).to_owned();
    }
    if let Some(body) = trimmed.strip_prefix("///") {
        return body.to_owned();
    }
    trimmed.strip_prefix("//").unwrap_or(trimmed).to_owned()
}

fn remove_regions(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len()..];
        match after.find(close) {
            Some(end) => rest = &after[end + close.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop a leading `*` (plus one space) from a doc-comment line.
fn strip_star(line: &str) -> String {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) if !rest.starts_with('*') && !rest.starts_with('/') => {
            rest.strip_prefix(' ').unwrap_or(rest).to_owned()
        }
        _ => line.to_owned(),
    }
}

fn is_blank_or_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.chars().all(|c| c == '-')
        || trimmed.chars().all(|c| c == '=')
        || trimmed.chars().all(|c| c == '*')
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests;
