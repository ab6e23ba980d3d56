// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Shell quoting utilities.
//!
//! Every value interpolated into a generated script passes through one of
//! these helpers, so paths like `src/app/[locale]/admin/(protected)` reach
//! bash as literal words instead of globs or subshells.

/// Characters that never need escaping in a bash word.
fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '/' | '.' | '_' | '-' | '+' | '=' | ':' | ',' | '@' | '%')
}

/// Escape word so bash treats it as one literal word.
///
/// Every character outside the safe set is prefixed with a backslash. Newlines
/// and carriage returns cannot be backslash-escaped, so they are written as
/// `$'\n'` and `$'\r'` instead. An empty word becomes `''` to keep its
/// position on the command line.
pub fn escape(word: impl AsRef<str>) -> String {
    let word = word.as_ref();
    if word.is_empty() {
        return "''".into();
    }

    let mut escaped = String::with_capacity(word.len() * 2);
    for ch in word.chars() {
        match ch {
            '\n' => escaped.push_str("$'\\n'"),
            '\r' => escaped.push_str("$'\\r'"),
            ch if is_safe(ch) => escaped.push(ch),
            ch => {
                escaped.push('\\');
                escaped.push(ch);
            }
        }
    }

    escaped
}

/// Wrap text in double quotes for use as an `echo` argument.
///
/// Only `"`, `$`, `` ` `` and `\` keep a special meaning inside double quotes,
/// so only those are escaped.
pub fn double_quote(text: impl AsRef<str>) -> String {
    let text = text.as_ref();
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if matches!(ch, '"' | '$' | '`' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');

    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case("/tmp/level_payload.json", "/tmp/level_payload.json"; "safe path untouched")]
    #[test_case(
        "/srv/app/[locale]/admin/(protected)/layout.tsx",
        r"/srv/app/\[locale\]/admin/\(protected\)/layout.tsx";
        "brackets and parentheses"
    )]
    #[test_case("new project/fix.sh", r"new\ project/fix.sh"; "space")]
    #[test_case("a;b&c|d", r"a\;b\&c\|d"; "command separators")]
    #[test_case("$HOME/*", r"\$HOME/\*"; "expansions")]
    #[test_case("it's", r"it\'s"; "single quote")]
    #[test_case("", "''"; "empty word")]
    #[test_case("a\nb", "a$'\\n'b"; "newline")]
    #[test_case("a\r\nb", "a$'\\r'$'\\n'b"; "carriage return")]
    #[test]
    fn escape_word(input: &str, expect: &str) {
        assert_eq!(escape(input), expect);
    }

    #[test]
    fn escape_leaves_url_intact() {
        let url = "https://api.englishom.com/api/courses/admin";
        assert_eq!(escape(url), url);
    }

    #[test_case("Done!", r#""Done!""#; "plain text")]
    #[test_case(r#"say "hi""#, r#""say \"hi\"""#; "inner quotes")]
    #[test_case("cost $5 `now` \\", r#""cost \$5 \`now\` \\""#; "specials")]
    #[test]
    fn double_quote_text(input: &str, expect: &str) {
        assert_eq!(double_quote(input), expect);
    }
}
