use super::*;
use pretty_assertions::assert_eq;

fn decode(content: &str) -> Unescaped {
    unescape_string(content).unwrap()
}

#[test]
fn no_backslash_takes_fast_path() {
    let out = decode("plain text");
    assert_eq!(out.decoded, None);
    assert!(out.invalid.is_empty());
}

#[test]
fn full_escape_set_decodes() {
    let out = decode(r#"\\ \' \" \? \a \b \f \n \r \t \v"#);
    assert_eq!(
        out.decoded.as_deref(),
        Some("\\ ' \" ? \x07 \x08 \x0C \n \r \t \x0B")
    );
    assert!(out.invalid.is_empty());
}

#[test]
fn unknown_escape_becomes_underscore() {
    let out = decode(r"a\qb");
    assert_eq!(out.decoded.as_deref(), Some("a_b"));
    assert_eq!(out.invalid.len(), 1);
    assert_eq!(out.invalid[0].offset, 1);
    assert_eq!(out.invalid[0].escape, 'q');
}

#[test]
fn trailing_backslash_is_invalid() {
    let out = decode(r"ab\");
    assert_eq!(out.decoded.as_deref(), Some("ab_"));
    assert_eq!(out.invalid[0].offset, 2);
    assert_eq!(out.invalid[0].escape, '\\');
}

#[test]
fn multiple_invalid_escapes_all_reported() {
    let out = decode(r"\q mid \z");
    assert_eq!(out.decoded.as_deref(), Some("_ mid _"));
    let offsets: Vec<_> = out.invalid.iter().map(|e| e.offset).collect();
    assert_eq!(offsets, [0, 7]);
}

#[test]
fn escaped_quote_does_not_terminate() {
    let out = decode(r#"say \"hi\""#);
    assert_eq!(out.decoded.as_deref(), Some(r#"say "hi""#));
}
