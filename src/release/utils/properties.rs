//! Java `.properties` rendering for files consumed by Gradle.

use std::path::Path;

/// Escape a value per the `.properties` format.
///
/// Backslashes, separators and line breaks are escaped; leading spaces are
/// preserved with a backslash.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            '#' => out.push_str("\\#"),
            '!' => out.push_str("\\!"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if i == 0 => out.push_str("\\ "),
            c => out.push(c),
        }
    }
    out
}

/// Path as a forward-slash string, which Gradle accepts on every OS.
pub fn gradle_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Render `key=value` lines in the given order, with a trailing newline.
pub fn render(header: &str, entries: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for line in header.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    out
}

/// Look up `key` in properties `content` and unescape its value.
pub fn lookup(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim_start)
        .filter(|l| !l.starts_with('#') && !l.starts_with('!'))
        .find_map(|l| {
            let (k, v) = l.split_once('=')?;
            (k.trim() == key).then(|| unescape_value(v))
        })
}

fn unescape_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_paths_are_escaped() {
        assert_eq!(escape_value(r"C:\Android\Sdk"), r"C\:\\Android\\Sdk");
    }

    #[test]
    fn render_keeps_entry_order() {
        let out = render("generated", &[("b", "2"), ("a", "x=y")]);
        assert_eq!(out, "# generated\nb=2\na=x\\=y\n");
    }

    #[test]
    fn lookup_reads_escaped_values() {
        let content = "# header\nsdk.dir=C\\:\\\\Android\\\\Sdk\nother=1\n";
        assert_eq!(lookup(content, "sdk.dir").as_deref(), Some(r"C:\Android\Sdk"));
        assert_eq!(lookup(content, "missing"), None);
    }
}
