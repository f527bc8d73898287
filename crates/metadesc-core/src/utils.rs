//! Utility helpers: path resolution and text cleanup for page content.

use std::path::PathBuf;

/// Get the Metadesc data directory (e.g. `~/.metadesc/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".metadesc")
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("."));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe. Limits too small for the ellipsis cut without one.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove HTML tags (and the bodies of `<script>`/`<style>` blocks), then
/// decode the handful of entities that commonly survive in post content.
///
/// Each removed tag leaves a single space so adjacent words don't fuse.
pub fn strip_html_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        // Only `<` followed by a name, `/`, `!` or `?` opens a tag.
        if !tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
        {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        // ASCII lowercasing keeps byte offsets identical to `tail`.
        let lower = tail.to_ascii_lowercase();
        let block_end = if lower.starts_with("<script") {
            Some("</script>")
        } else if lower.starts_with("<style") {
            Some("</style>")
        } else {
            None
        };

        if let Some(close) = block_end {
            match lower.find(close) {
                Some(end) => {
                    out.push(' ');
                    rest = &tail[end + close.len()..];
                    continue;
                }
                None => {
                    rest = "";
                    break;
                }
            }
        }

        match tail.find('>') {
            Some(end) => {
                out.push(' ');
                rest = &tail[end + 1..];
            }
            None => {
                // A lone '<' in text, not a tag.
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    decode_entities(&out)
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}
