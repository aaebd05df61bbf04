use super::*;
use pretty_assertions::assert_eq;

#[test]
fn span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20)); // end is exclusive
    assert!(!span.contains(9));
}

#[test]
fn span_point() {
    let point = Span::point(42);
    assert_eq!(point.start, 42);
    assert_eq!(point.end, 42);
    assert!(point.is_empty());
    assert_eq!(point.len(), 0);
}

#[test]
fn span_to_range() {
    let span = Span::new(3, 7);
    assert_eq!(span.to_range(), 3..7);
}

#[test]
fn span_debug_display() {
    let span = Span::new(100, 200);
    assert_eq!(format!("{span:?}"), "100..200");
    assert_eq!(format!("{span}"), "100..200");
}

#[test]
fn span_default_is_dummy() {
    assert_eq!(Span::default(), Span::DUMMY);
    assert!(Span::DUMMY.is_empty());
}
