// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Filesystem- and identifier-safe name sanitization for baked manifest keys.

/// Reserved words a bare slug must not collide with, since the manifest may be
/// embedded as object keys in a JavaScript-like host.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true",
    "try", "typeof", "var", "void", "while", "with", "let", "static", "yield", "await", "enum",
];

/// Produce a filesystem- and identifier-safe slug: lower-case, non-alphanumerics
/// collapsed to `_`, leading/trailing `_` trimmed; prefixed with `_` if empty,
/// starting with a digit, colliding with a reserved word, or equal to the
/// empty-name fallback `"unnamed"` (so a literal name of "Unnamed" and an
/// empty name always produce the same, re-sanitization-stable slug).
pub fn sanitize_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    let mut result = if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    };

    let starts_with_digit = result.chars().next().is_some_and(|c| c.is_ascii_digit());
    let is_reserved = RESERVED_WORDS.contains(&result.as_str());
    // "unnamed" is always prefixed, whether it's the empty-input fallback or a
    // literal name, so that re-sanitizing an already-prefixed "_unnamed" (which
    // trims back down to "unnamed") lands on the same result instead of
    // shedding its leading underscore.
    if starts_with_digit || is_reserved || trimmed.is_empty() || trimmed == "unnamed" {
        result = format!("_{result}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_spaces_and_punctuation() {
        assert_eq!(sanitize_slug("My Map!"), "my_map");
    }

    #[test]
    fn prefixes_names_starting_with_a_digit() {
        assert_eq!(sanitize_slug("123abc"), "_123abc");
    }

    #[test]
    fn prefixes_reserved_words() {
        assert_eq!(sanitize_slug("class"), "_class");
    }

    #[test]
    fn empty_name_becomes_unnamed() {
        assert_eq!(sanitize_slug(""), "_unnamed");
    }

    #[test]
    fn literal_unnamed_matches_the_empty_fallback() {
        assert_eq!(sanitize_slug("Unnamed"), "_unnamed");
        assert_eq!(sanitize_slug("Unnamed"), sanitize_slug(""));
    }

    #[test]
    fn resanitizing_the_unnamed_fallback_keeps_its_prefix() {
        assert_eq!(sanitize_slug("_unnamed"), "_unnamed");
    }

    #[test]
    fn is_idempotent() {
        for input in ["My Map!", "123abc", "class", "", "___", "Already_Fine", "Unnamed", "_unnamed"] {
            let once = sanitize_slug(input);
            let twice = sanitize_slug(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn output_matches_identifier_charset() {
        for input in ["Weird!!@@Name??", "9lives", "_", "typeof"] {
            let slug = sanitize_slug(input);
            assert!(!slug.is_empty());
            let first = slug.chars().next().unwrap();
            assert!(first.is_ascii_lowercase() || first == '_');
            assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
