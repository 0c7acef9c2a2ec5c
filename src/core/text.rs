// src/core/text.rs
// Small string helpers shared by the cell normalizer and the sheet writer.

/// Collapse every run of whitespace (newlines and no-break spaces included)
/// into a single space, then trim both ends.
pub fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop exactly one trailing line break (`\n`, `\r\n` or `\r`), if any.
pub fn chomp(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') { s.pop(); }
    } else if s.ends_with('\r') {
        s.pop();
    }
    s
}

/// Unicode-aware lowercase, used for every header-indicator comparison.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_handles_newlines_and_nbsp() {
        assert_eq!(collapse_ws("  Key\n\t Term\u{a0}\u{a0}ID  "), "Key Term ID");
        assert_eq!(collapse_ws(" \n "), "");
    }

    #[test]
    fn chomp_removes_one_break_only() {
        assert_eq!(chomp("a\n\n".into()), "a\n");
        assert_eq!(chomp("a\r\n".into()), "a");
        assert_eq!(chomp("a".into()), "a");
        assert_eq!(chomp(String::new()), "");
    }
}
