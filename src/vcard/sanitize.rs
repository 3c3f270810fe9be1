//! Field sanitizing for vCard text values.
//!
//! Values are escaped exactly once, straight from user input. Feeding an
//! already-escaped value back through [`sanitize`] escapes its backslashes a
//! second time; callers must only sanitize raw values.

/// Escapes a raw value so it can occupy one field slot of a record.
///
/// Backslash, comma and semicolon get a backslash prefix. Every newline
/// sequence (`\r\n`, `\r` or `\n`) becomes the two characters `\n`. All other
/// characters, Unicode included, pass through untouched.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }

    out
}

/// Reverses [`sanitize`].
///
/// Escaped newlines come back as `\n`, so a value that used `\r\n` round-trips
/// to its `\n`-normalized form. Unknown escapes keep the escaped character.
#[must_use]
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Escapes a parameter value (e.g. a social platform name used as `TYPE=`).
///
/// Uses RFC 6868 caret encoding and wraps the value in double quotes when it
/// contains `:`, `;` or `,`. Control characters are dropped.
#[must_use]
pub fn escape_param(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut needs_quotes = false;

    for c in raw.chars() {
        match c {
            '^' => value.push_str("^^"),
            '\n' => value.push_str("^n"),
            '"' => value.push_str("^'"),
            ':' | ';' | ',' => {
                value.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {}
            _ => value.push(c),
        }
    }

    if needs_quotes {
        format!("\"{}\"", value)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize("Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn test_reserved_characters_escaped() {
        assert_eq!(sanitize("a,b;c\\d"), "a\\,b\\;c\\\\d");
    }

    #[test]
    fn test_every_newline_form_becomes_escape() {
        assert_eq!(sanitize("one\r\ntwo\rthree\nfour"), "one\\ntwo\\nthree\\nfour");
        assert!(!sanitize("x\r\ny").contains('\r'));
        assert!(!sanitize("x\r\ny").contains('\n'));
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(sanitize("Zoë 日本 🚀"), "Zoë 日本 🚀");
        assert_eq!(sanitize("Ünïcödé, ok"), "Ünïcödé\\, ok");
    }

    #[test]
    fn test_sanitize_is_not_idempotent() {
        let once = sanitize("a,b");
        let twice = sanitize(&once);
        assert_ne!(once, twice);
        assert_eq!(twice, "a\\\\\\,b");
    }

    #[test]
    fn test_round_trip_normalizes_crlf() {
        assert_eq!(unescape(&sanitize("a\r\nb\rc")), "a\nb\nc");
        assert_eq!(unescape(&sanitize("trailing\\")), "trailing\\");
    }

    #[test]
    fn test_escape_param_simple() {
        assert_eq!(escape_param("linkedin"), "linkedin");
    }

    #[test]
    fn test_escape_param_quotes_separators() {
        assert_eq!(escape_param("My Blog: notes"), "\"My Blog: notes\"");
        assert_eq!(escape_param("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_escape_param_caret_encoding() {
        assert_eq!(escape_param("say \"hi\"^"), "say ^'hi^'^^");
        assert_eq!(escape_param("two\nlines"), "two^nlines");
    }
}
