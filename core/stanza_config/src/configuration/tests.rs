use super::*;
use pretty_assertions::assert_eq;
use stanza_model::{TokenKind, TokenValue};

fn lex_to_eof(config: &mut Configuration) {
    loop {
        let Some(id) = config.lex() else { break };
        if config.tokens()[id].kind == TokenKind::Eof {
            break;
        }
    }
}

#[test]
fn fresh_configuration_defaults() {
    let config = Configuration::new();
    assert_eq!(config.max_errors(), u32::MAX);
    assert_eq!(config.warning_severity(), Severity::Warning);
    assert_eq!(config.min_severity(), Severity::Normal);
    assert_eq!(config.error_count(), 0);
    assert_eq!(config.warning_count(), 0);
    assert!(config.filename().is_none());
    assert!(config.context().is_none());
    assert!(config.tokens().is_empty());
    assert!(config.source().is_empty());
}

#[test]
fn lexes_through_the_facade() {
    let mut config = Configuration::new();
    config.set_source_str("key = 42\n").unwrap();
    lex_to_eof(&mut config);

    let kinds: Vec<_> = config
        .tokens()
        .iter()
        .map(|t| t.kind)
        .filter(|&k| k != TokenKind::Eof)
        .collect();
    assert_eq!(kinds, [TokenKind::Name, TokenKind::Eq, TokenKind::Number]);

    let number = config.tokens().iter().find(|t| t.kind == TokenKind::Number);
    assert_eq!(number.unwrap().value, TokenValue::Unsigned(42));
}

#[test]
fn unlex_through_the_facade() {
    let mut config = Configuration::new();
    config.set_source_str("a b").unwrap();

    let first = config.lex().unwrap();
    let second = config.lex().unwrap();
    assert!(config.unlex());
    assert_eq!(config.lex(), Some(second));
    assert_ne!(first, second);
}

#[test]
fn report_locations_inherit_the_filename() {
    let mut config = Configuration::new();
    config.set_filename("app.conf");
    config.set_source_str("key = 1\n@").unwrap();
    lex_to_eof(&mut config);

    assert_eq!(config.warning_count(), 1);
    let report = config.reports().next().unwrap();
    assert_eq!(
        config.render_report(report),
        "app.conf(2:1): warning: Invalid character '@'"
    );
}

#[test]
fn reports_iterate_both_directions() {
    let mut config = Configuration::new();
    config.set_source_str("@ `").unwrap();
    lex_to_eof(&mut config);

    let forward: Vec<_> = config.reports().map(|r| r.args[0].clone()).collect();
    let backward: Vec<_> = config.reports().rev().map(|r| r.args[0].clone()).collect();
    assert_eq!(forward, ["@", "`"]);
    assert_eq!(backward, ["`", "@"]);
}

#[test]
fn replacing_the_source_discards_tokens() {
    let mut config = Configuration::new();
    config.set_source_str("old tokens here").unwrap();
    lex_to_eof(&mut config);
    assert!(!config.tokens().is_empty());

    config.set_source_str("fresh").unwrap();
    assert!(config.tokens().is_empty());
    lex_to_eof(&mut config);
    assert_eq!(config.tokens().iter().next().unwrap().kind, TokenKind::Name);
}

#[test]
fn source_from_bytes_and_reader() {
    let mut config = Configuration::new();
    config.set_source_bytes(b"\xEF\xBB\xBFkey").unwrap();
    assert_eq!(config.source(), "key");

    config.set_source_reader(&b"a = 1"[..]).unwrap();
    assert_eq!(config.source(), "a = 1");
    assert_eq!(config.source_len(), 5);
}

#[test]
fn error_limit_forwards_to_the_lexer() {
    let mut config = Configuration::new();
    config.set_warning_severity(Severity::Error);
    config.set_max_errors(1);
    config.set_source_str("@ @").unwrap();

    assert!(config.lex().is_some());
    assert!(config.lex().is_none());
    let last = config.reports().last().unwrap();
    assert_eq!(last.id, stanza_diagnostic::MessageId::TooManyErrors);
}

#[test]
fn create_context_attaches() {
    let mut config = Configuration::new();
    let ctx = config.create_context();
    let id = config.id().unwrap();
    assert!(ctx.borrow().is_attached(id));
    assert!(config.context().is_some());

    config.detach_context();
    assert!(!ctx.borrow().is_attached(id));
    assert!(config.context().is_none());
}

#[test]
fn drop_detaches_from_the_context() {
    let mut config = Configuration::new();
    let ctx = config.create_context();
    let id = config.id().unwrap();
    drop(config);
    assert!(!ctx.borrow().is_attached(id));
}

#[test]
fn reattaching_moves_the_registration() {
    let mut config = Configuration::new();
    let first = config.create_context();
    let second = Context::shared();
    config.attach_context(&second);

    let id = config.id().unwrap();
    assert!(!first.borrow().is_attached(id));
    assert!(second.borrow().is_attached(id));
}

#[test]
fn finished_context_reads_as_detached() {
    let mut config = Configuration::new();
    let ctx = config.create_context();
    Context::finish(&ctx);
    // The handle is alive but the registry entry is gone.
    assert!(config.context().is_none());
}
