// src/extract/clean.rs
// Resolves literal escape sequences that survive text extraction:
// "\n" (backslash, n) becomes a newline and "\uXXXX" becomes the character.
// Surrogate pairs written as two escapes are combined; a lone surrogate has
// no char and is left as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Either a high surrogate directly followed by a low surrogate, or any
// single escape
static UNICODE_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\u([dD][89abAB][0-9a-fA-F]{2})\\u([dD][c-fC-F][0-9a-fA-F]{2})|\\u([0-9a-fA-F]{4})",
    )
    .expect("static escape pattern must compile")
});

pub fn clean_text(text: &str) -> String {
    let text = text.replace("\\n", "\n");
    UNICODE_ESCAPE
        .replace_all(&text, |caps: &Captures| decode_escape(caps))
        .into_owned()
}

fn decode_escape(caps: &Captures) -> String {
    match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(high), Some(low), _) => {
            let high = code_unit(high.as_str());
            let low = code_unit(low.as_str());
            debug_assert!(is_high_surrogate(high) && is_low_surrogate(low));
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(combined)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        }
        (_, _, Some(hex)) => single(code_unit(hex.as_str()), hex.as_str()),
        _ => caps[0].to_string(),
    }
}

fn code_unit(hex: &str) -> u32 {
    // The regex only matches four hex digits
    u32::from_str_radix(hex, 16).unwrap_or(0)
}

fn single(code: u32, hex: &str) -> String {
    char::from_u32(code)
        .map(String::from)
        .unwrap_or_else(|| format!("\\u{}", hex))
}

fn is_high_surrogate(code: u32) -> bool {
    (0xD800..0xDC00).contains(&code)
}

fn is_low_surrogate(code: u32) -> bool {
    (0xDC00..0xE000).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_escape() {
        assert_eq!(clean_text(r"line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(clean_text(r"caf\u00e9"), "café");
        assert_eq!(clean_text(r"\u00e9\u00E8"), "éè");
    }

    #[test]
    fn test_surrogate_pair() {
        assert_eq!(clean_text(r"smile \ud83d\ude00"), "smile 😀");
    }

    #[test]
    fn test_surrogate_pair_after_escape() {
        assert_eq!(clean_text(r"\u00e9\ud83d\ude00"), "\u{e9}\u{1f600}");
        assert_eq!(clean_text(r"\u0041\uD83D\uDE00\u0042"), "A\u{1f600}B");
    }

    #[test]
    fn test_reversed_surrogates_kept() {
        assert_eq!(clean_text(r"\ude00\ud83d"), r"\ude00\ud83d");
    }

    #[test]
    fn test_lone_surrogate_kept() {
        assert_eq!(clean_text(r"bad \ud83d end"), r"bad \ud83d end");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(clean_text("nothing to do"), "nothing to do");
    }
}
