//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The shallow tokenizer collects text runs and attribute values verbatim and
//! decodes references in one pass when the token is emitted. The WHATWG table
//! defines 2,231 named entities; we implement the ones that show up in
//! ordinary prose.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading '&' and trailing ';') to their
/// replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        ("shy", "\u{00AD}"),
        ("ensp", "\u{2002}"),
        ("emsp", "\u{2003}"),
        ("thinsp", "\u{2009}"),
        ("zwnj", "\u{200C}"),
        ("zwj", "\u{200D}"),
        ("lrm", "\u{200E}"),
        ("rlm", "\u{200F}"),
        // Punctuation
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("hellip", "\u{2026}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("para", "\u{00B6}"),
        ("sect", "\u{00A7}"),
        ("deg", "\u{00B0}"),
        // Currency
        ("cent", "\u{00A2}"),
        ("pound", "\u{00A3}"),
        ("euro", "\u{20AC}"),
        ("yen", "\u{00A5}"),
        // Math
        ("times", "\u{00D7}"),
        ("divide", "\u{00F7}"),
        ("plusmn", "\u{00B1}"),
        ("minus", "\u{2212}"),
        ("frac12", "\u{00BD}"),
        ("frac14", "\u{00BC}"),
        ("frac34", "\u{00BE}"),
        // Latin letters
        ("aacute", "\u{00E1}"),
        ("agrave", "\u{00E0}"),
        ("auml", "\u{00E4}"),
        ("eacute", "\u{00E9}"),
        ("egrave", "\u{00E8}"),
        ("iacute", "\u{00ED}"),
        ("oacute", "\u{00F3}"),
        ("ouml", "\u{00F6}"),
        ("uacute", "\u{00FA}"),
        ("uuml", "\u{00FC}"),
        ("ccedil", "\u{00E7}"),
        ("ntilde", "\u{00F1}"),
        ("szlig", "\u{00DF}"),
    ])
});

/// Entities that browsers still honour without the trailing semicolon.
const LEGACY_WITHOUT_SEMICOLON: &[&str] = &["amp", "lt", "gt", "quot", "nbsp", "copy", "reg"];

/// Longest entity name we try to match.
const MAX_ENTITY_NAME: usize = 32;

/// Look up a named character reference.
///
/// The `name` should include neither the leading '&' nor the ';'.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Decode every character reference in `input`.
///
/// Unknown or malformed references are left in place, matching how browsers
/// render them. Returns the input unchanged (borrowed) when there is no `&`.
#[must_use]
pub fn decode_character_references(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        if let Some((decoded, consumed)) = decode_one(after) {
            out.push_str(&decoded);
            rest = &after[consumed..];
        } else {
            out.push('&');
            rest = after;
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode a single reference starting right after the `&`.
///
/// Returns the replacement text and how many bytes of `after` it used.
fn decode_one(after: &str) -> Option<(String, usize)> {
    if let Some(numeric) = after.strip_prefix('#') {
        return decode_numeric(numeric).map(|(c, used)| (c.to_string(), used + 1));
    }

    let name_len = after
        .char_indices()
        .take(MAX_ENTITY_NAME)
        .take_while(|(_, c)| c.is_ascii_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    let name = &after[..name_len];
    let replacement = lookup_entity(name)?;

    if after[name_len..].starts_with(';') {
        Some((replacement.to_string(), name_len + 1))
    } else if LEGACY_WITHOUT_SEMICOLON.contains(&name) {
        Some((replacement.to_string(), name_len))
    } else {
        None
    }
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
///
/// `numeric` starts right after `&#`.
fn decode_numeric(numeric: &str) -> Option<(char, usize)> {
    let (digits_start, radix) = match numeric.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };
    let digits: &str = {
        let body = &numeric[digits_start..];
        let len = body
            .bytes()
            .take_while(|b| {
                if radix == 16 {
                    b.is_ascii_hexdigit()
                } else {
                    b.is_ascii_digit()
                }
            })
            .count();
        &body[..len]
    };
    if digits.is_empty() {
        return None;
    }

    let mut used = digits_start + digits.len();
    if numeric[used..].starts_with(';') {
        used += 1;
    }

    // [§ 13.2.5.80 Numeric character reference end state]
    // "If the number is 0x00 ... greater than 0x10FFFF ... a surrogate", use
    // U+FFFD. Overlong digit strings saturate into the same branch.
    let code = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    let c = char::from_u32(code)
        .filter(|&c| c != '\0')
        .unwrap_or('\u{FFFD}');
    Some((c, used))
}
