use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct Lexed {
    source: SourceBuffer,
    tokens: TokenList,
    diags: Diagnostics,
}

fn lex_all(source: &str) -> Lexed {
    let source = SourceBuffer::from_str(source).unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new();
    loop {
        let id = lexer
            .next_token(&source, &mut tokens, &mut diags)
            .expect("lexing terminated early");
        if tokens[id].kind == TokenKind::Eof {
            break;
        }
    }
    Lexed {
        source,
        tokens,
        diags,
    }
}

fn kinds(lexed: &Lexed) -> Vec<TokenKind> {
    lexed
        .tokens
        .iter()
        .map(|t| t.kind)
        .filter(|&k| k != TokenKind::Eof)
        .collect()
}

fn slices<'a>(lexed: &'a Lexed) -> Vec<&'a str> {
    lexed
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.slice(lexed.source.as_str()))
        .collect()
}

#[test]
fn tag_header_recognition() {
    let lexed = lex_all("*apples ~oranges +fruit\nkey = 1\n");
    assert_eq!(
        kinds(&lexed),
        [
            TokenKind::Tag,
            TokenKind::Tag,
            TokenKind::Tag,
            TokenKind::Name,
            TokenKind::Eq,
            TokenKind::Number,
        ]
    );
    assert_eq!(
        slices(&lexed),
        ["*apples", "~oranges", "+fruit", "key", "=", "1"]
    );

    let tokens: Vec<_> = lexed.tokens.iter().collect();
    assert!(tokens[0].flags.contains(TokenFlags::FILE_START));
    assert!(tokens[0].flags.contains(TokenFlags::START));
    assert!(!tokens[1].flags.contains(TokenFlags::START));
    assert!(tokens[3].flags.contains(TokenFlags::START), "key starts a line");
    assert_eq!(tokens[5].value, TokenValue::Unsigned(1));
}

#[test]
fn nested_block_comment() {
    let lexed = lex_all("/* a /* b */ c */ name");
    assert_eq!(kinds(&lexed), [TokenKind::Name]);
    assert_eq!(slices(&lexed), ["name"]);
    assert!(lexed.diags.is_empty());
}

#[test]
fn unterminated_block_comment() {
    let lexed = lex_all("/* a /* b */ c");
    assert_eq!(kinds(&lexed), []);
    assert_eq!(lexed.diags.len(), 1);
    let report = lexed.diags.iter().next().unwrap();
    assert_eq!(report.id, MessageId::LexerOpenComment);
}

#[test]
fn numeric_overflow_sets_flag() {
    let lexed = lex_all("18446744073709551616");
    let token = lexed.tokens.iter().next().unwrap();
    assert_eq!(token.kind, TokenKind::Number);
    assert!(token.flags.contains(TokenFlags::OVERFLOWED));
    assert!(matches!(token.value, TokenValue::Unsigned(_)));
}

#[test]
fn string_with_escapes_decodes() {
    let lexed = lex_all("\"a\\n\\tb\"");
    let token = lexed.tokens.iter().next().unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert!(token.flags.contains(TokenFlags::PROCESSED));
    assert_eq!(token.value, TokenValue::Str("a\n\tb".into()));
    assert!(lexed.diags.is_empty());
}

#[test]
fn string_without_escapes_keeps_raw_span() {
    let lexed = lex_all("\"plain\"");
    let token = lexed.tokens.iter().next().unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert!(!token.flags.contains(TokenFlags::PROCESSED));
    assert_eq!(token.value, TokenValue::None);
    assert_eq!(token.slice(lexed.source.as_str()), "\"plain\"");
}

#[test]
fn compound_punctuation_disambiguation() {
    let lexed = lex_all("a <= b");
    assert_eq!(kinds(&lexed), [TokenKind::Name, TokenKind::LtEq, TokenKind::Name]);

    let lexed = lex_all("a < b");
    assert_eq!(kinds(&lexed), [TokenKind::Name, TokenKind::Lt, TokenKind::Name]);
}

#[test]
fn assignment_operator_family() {
    let lexed = lex_all("a = b := c += d .= e ?= f == g != h >= i");
    assert_eq!(
        kinds(&lexed),
        [
            TokenKind::Name,
            TokenKind::Eq,
            TokenKind::Name,
            TokenKind::ColonEq,
            TokenKind::Name,
            TokenKind::PlusEq,
            TokenKind::Name,
            TokenKind::DotEq,
            TokenKind::Name,
            TokenKind::QuestionEq,
            TokenKind::Name,
            TokenKind::EqEq,
            TokenKind::Name,
            TokenKind::NotEq,
            TokenKind::Name,
            TokenKind::GtEq,
            TokenKind::Name,
        ]
    );
}

#[test]
fn tags_end_at_first_non_tag_token() {
    let lexed = lex_all("*one key *two");
    assert_eq!(
        kinds(&lexed),
        [TokenKind::Tag, TokenKind::Name, TokenKind::Name]
    );
    // `*two` after a non-tag token is an ordinary name run.
    assert_eq!(slices(&lexed)[2], "*two");
}

#[test]
fn lone_sigil_is_not_a_tag() {
    let lexed = lex_all("* apples");
    assert_eq!(kinds(&lexed), [TokenKind::Name, TokenKind::Name]);
}

#[test]
fn directive_flag_consumes_bang() {
    let lexed = lex_all("key = 1\n! include other\n");
    let tokens: Vec<_> = lexed.tokens.iter().collect();
    // key = 1, include, other
    assert_eq!(tokens[3].kind, TokenKind::Name);
    assert_eq!(tokens[3].slice(lexed.source.as_str()), "include");
    assert!(tokens[3].flags.contains(TokenFlags::DIRECTIVE));
    assert!(tokens[3].flags.contains(TokenFlags::START));
    assert!(!tokens[4].flags.contains(TokenFlags::DIRECTIVE));
}

#[test]
fn bang_mid_line_is_not_a_directive() {
    let lexed = lex_all("a != b");
    assert_eq!(kinds(&lexed), [TokenKind::Name, TokenKind::NotEq, TokenKind::Name]);

    let lexed = lex_all("a ! b");
    assert_eq!(slices(&lexed), ["a", "!", "b"]);
}

#[test]
fn invalid_byte_produces_diagnostic() {
    let lexed = lex_all("key @ value");
    assert_eq!(
        kinds(&lexed),
        [TokenKind::Name, TokenKind::Invalid, TokenKind::Name]
    );
    assert_eq!(lexed.diags.len(), 1);
    let report = lexed.diags.iter().next().unwrap();
    assert_eq!(report.id, MessageId::LexerInvalidToken);
    assert_eq!(report.args[0], "@");
    assert_eq!(report.location.line, 1);
    assert_eq!(report.location.column, 5);
}

#[test]
fn hash_and_semicolon_comments_are_skipped() {
    let lexed = lex_all("# header\nkey = 1 ; trailing\nother = 2");
    assert_eq!(
        slices(&lexed),
        ["key", "=", "1", "other", "=", "2"]
    );
}

#[test]
fn eof_token_is_appended_once_and_reused() {
    let source = SourceBuffer::from_str("x").unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new();

    let _name = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    let eof1 = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    let eof2 = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    assert_eq!(eof1, eof2);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[eof1].kind, TokenKind::Eof);
}

#[test]
fn unlex_hands_back_the_same_token() {
    let source = SourceBuffer::from_str("a = 1").unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new();

    let a = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    let eq = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    assert!(tokens.unlex());
    let again = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    assert_eq!(again, eq);
    assert_ne!(a, eq);

    // Lexing continues normally afterwards.
    let one = lexer.next_token(&source, &mut tokens, &mut diags).unwrap();
    assert_eq!(tokens[one].kind, TokenKind::Number);
}

#[test]
fn error_limit_stops_lexing_with_one_final_report() {
    let source = SourceBuffer::from_str("@ @ @").unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    diags.set_warning_severity(Severity::Error);
    diags.set_max_errors(2);
    let mut lexer = Lexer::new();

    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_some());
    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_some());
    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_none());
    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_none());

    let last = lexed_last(&diags);
    assert_eq!(last.id, MessageId::TooManyErrors);
    assert_eq!(last.severity, Severity::Normal);
    assert_eq!(
        diags.render_report(last),
        "Exiting because the limit of 2 errors was reached"
    );
    // Two invalid-token errors plus the final report.
    assert_eq!(diags.len(), 3);
}

fn lexed_last(diags: &Diagnostics) -> &Report {
    diags.iter().last().expect("at least one report")
}

#[test]
fn panic_tail_report_stops_lexing() {
    let source = SourceBuffer::from_str("a b c").unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new();

    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_some());
    diags.raise_oom(1024);
    assert!(lexer.next_token(&source, &mut tokens, &mut diags).is_none());
}

#[test]
fn invalid_escape_reports_and_decodes_underscore() {
    let lexed = lex_all("\"a\\qb\"");
    let token = lexed.tokens.iter().next().unwrap();
    assert_eq!(token.value, TokenValue::Str("a_b".into()));
    let report = lexed.diags.iter().next().unwrap();
    assert_eq!(report.id, MessageId::LexerInvalidEscape);
    assert_eq!(report.args[0], "\\q");
}

#[test]
fn unterminated_string_runs_to_eof() {
    let lexed = lex_all("\"no end");
    let token = lexed.tokens.iter().next().unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.span.end, lexed.source.len());
}

#[test]
fn name_splits_at_structural_bytes() {
    let lexed = lex_all("key=1");
    assert_eq!(
        kinds(&lexed),
        [TokenKind::Name, TokenKind::Eq, TokenKind::Number]
    );

    let lexed = lex_all("path/to/file-name.ext");
    assert_eq!(slices(&lexed), ["path/to/file-name.ext"]);
}

// === Property tests ===

fn lex_tolerant(source: &str) -> (SourceBuffer, TokenList) {
    let buf = SourceBuffer::from_str(source).unwrap();
    let mut tokens = TokenList::new();
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new();
    loop {
        match lexer.next_token(&buf, &mut tokens, &mut diags) {
            Some(id) if tokens[id].kind == TokenKind::Eof => break,
            Some(_) => {}
            None => break,
        }
    }
    (buf, tokens)
}

proptest! {
    /// Token spans are ordered and within bounds; joining each token's
    /// lexeme with the skipped gap before it reconstructs the source
    /// prefix up to the last token's end.
    #[test]
    fn token_coverage(source in "[ -~\t\n]{0,60}") {
        let (buf, tokens) = lex_tolerant(&source);
        let text = buf.as_str();
        let mut rebuilt = String::new();
        let mut prev_end = 0u32;
        for token in &tokens {
            prop_assert!(token.span.start >= prev_end);
            prop_assert!(token.span.end <= buf.len());
            rebuilt.push_str(&text[prev_end as usize..token.span.start as usize]);
            rebuilt.push_str(token.slice(text));
            prev_end = token.span.end;
        }
        prop_assert_eq!(&text[..prev_end as usize], rebuilt.as_str());
    }

    /// Once a non-tag token appears, no further token is a tag.
    #[test]
    fn tag_position(source in "[a-z*+~\\- \n]{0,40}") {
        let (_, tokens) = lex_tolerant(&source);
        let mut header_over = false;
        for token in &tokens {
            if token.kind == TokenKind::Tag {
                prop_assert!(!header_over, "tag after the header ended");
            } else {
                header_over = true;
            }
        }
    }

    /// After an unlex, the next lex returns the identical token id and
    /// restores the cursor.
    #[test]
    fn unlex_round_trip(source in "[a-z0-9=\" ]{1,40}") {
        let buf = SourceBuffer::from_str(&source).unwrap();
        let mut tokens = TokenList::new();
        let mut diags = Diagnostics::new();
        let mut lexer = Lexer::new();
        for _ in 0..8 {
            let Some(id) = lexer.next_token(&buf, &mut tokens, &mut diags) else {
                break;
            };
            let cursor_after = tokens.cursor();
            if tokens.unlex() {
                let again = lexer.next_token(&buf, &mut tokens, &mut diags);
                prop_assert_eq!(again, Some(id));
                prop_assert_eq!(tokens.cursor(), cursor_after);
            }
            if tokens[id].kind == TokenKind::Eof {
                break;
            }
        }
    }

    /// A decimal literal decodes exactly iff it fits in u64; otherwise the
    /// overflow flag is set.
    #[test]
    fn overflow_flag_matches_range(value in 0u128..(1u128 << 66)) {
        let source = value.to_string();
        let (_, tokens) = lex_tolerant(&source);
        let token = tokens.iter().next().unwrap();
        prop_assert_eq!(token.kind, TokenKind::Number);
        if let Ok(narrow) = u64::try_from(value) {
            prop_assert!(!token.flags.contains(TokenFlags::OVERFLOWED));
            prop_assert_eq!(&token.value, &TokenValue::Unsigned(narrow));
        } else {
            prop_assert!(token.flags.contains(TokenFlags::OVERFLOWED));
        }
    }

    /// Escaping a string and lexing it back yields the original bytes.
    #[test]
    fn escape_idempotence(text in "[ -~]{0,30}") {
        let mut encoded = String::from('"');
        let mut any_escape = false;
        for c in text.chars() {
            match c {
                '\\' => { encoded.push_str("\\\\"); any_escape = true; }
                '"' => { encoded.push_str("\\\""); any_escape = true; }
                _ => encoded.push(c),
            }
        }
        encoded.push('"');

        let (buf, tokens) = lex_tolerant(&encoded);
        let token = tokens.iter().next().unwrap();
        prop_assert_eq!(token.kind, TokenKind::String);
        if any_escape {
            prop_assert_eq!(&token.value, &TokenValue::Str(text.clone().into_boxed_str()));
        } else {
            let slice = token.slice(buf.as_str());
            prop_assert_eq!(&slice[1..slice.len() - 1], text.as_str());
        }
    }
}
