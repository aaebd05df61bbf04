use super::*;
use pretty_assertions::assert_eq;
use stanza_lexer_core::SourceBuffer;

fn scan(source: &str) -> (ScannedNumber, u32) {
    let buf = SourceBuffer::from_str(source).unwrap();
    let mut cursor = buf.cursor();
    let scanned = scan_number(&mut cursor, Radix::CStyle);
    (scanned, cursor.pos())
}

fn scan_value(source: &str) -> TokenValue {
    scan(source).0.value
}

#[test]
fn plain_decimal() {
    let (scanned, pos) = scan("1234");
    assert_eq!(scanned.value, TokenValue::Unsigned(1234));
    assert_eq!(scanned.flags, TokenFlags::empty());
    assert_eq!(pos, 4);
}

#[test]
fn signs_select_the_slot() {
    assert_eq!(scan_value("+42"), TokenValue::Unsigned(42));
    let (scanned, _) = scan("-42");
    assert_eq!(scanned.value, TokenValue::Signed(-42));
    assert!(scanned.flags.contains(TokenFlags::SIGNED));
}

#[test]
fn radix_prefixes_in_c_style_mode() {
    assert_eq!(scan_value("0xFF"), TokenValue::Unsigned(255));
    assert_eq!(scan_value("0X10"), TokenValue::Unsigned(16));
    assert_eq!(scan_value("0c17"), TokenValue::Unsigned(15));
    assert_eq!(scan_value("0b1010"), TokenValue::Unsigned(10));
}

#[test]
fn prefix_without_digit_is_a_plain_zero() {
    let (scanned, pos) = scan("0x");
    assert_eq!(scanned.value, TokenValue::Unsigned(0));
    assert_eq!(pos, 1);
}

#[test]
fn fixed_radix_disables_prefixes() {
    let buf = SourceBuffer::from_str("0x1").unwrap();
    let mut cursor = buf.cursor();
    let scanned = scan_number(&mut cursor, Radix::Decimal);
    assert_eq!(scanned.value, TokenValue::Unsigned(0));
    assert_eq!(cursor.pos(), 1);

    let buf = SourceBuffer::from_str("ff").unwrap();
    let mut cursor = buf.cursor();
    let scanned = scan_number(&mut cursor, Radix::Hexadecimal);
    assert_eq!(scanned.value, TokenValue::Unsigned(255));
}

#[test]
fn digit_separators_are_elided() {
    assert_eq!(scan_value("1'000_000"), TokenValue::Unsigned(1_000_000));
    assert_eq!(scan_value("0xdead_beef"), TokenValue::Unsigned(0xdead_beef));
}

#[test]
fn digits_outside_radix_terminate_the_run() {
    let (scanned, pos) = scan("0b102");
    assert_eq!(scanned.value, TokenValue::Unsigned(0b10));
    assert_eq!(pos, 4);
}

#[test]
fn overflow_saturates_at_pre_overflow_value() {
    // One more than u64::MAX.
    let (scanned, _) = scan("18446744073709551616");
    assert!(scanned.flags.contains(TokenFlags::OVERFLOWED));
    let TokenValue::Unsigned(v) = scanned.value else {
        panic!("expected unsigned value");
    };
    assert!(v <= u64::MAX);
    // The suppressed multiply-add leaves the prior accumulation.
    assert_eq!(v, 1_844_674_407_370_955_161);
}

#[test]
fn u64_max_itself_does_not_overflow() {
    let (scanned, _) = scan("18446744073709551615");
    assert_eq!(scanned.value, TokenValue::Unsigned(u64::MAX));
    assert!(!scanned.flags.contains(TokenFlags::OVERFLOWED));
}

#[test]
fn negative_magnitude_saturates_at_i64_min() {
    let (scanned, _) = scan("-9223372036854775808");
    assert_eq!(scanned.value, TokenValue::Signed(i64::MIN));
    assert!(!scanned.flags.contains(TokenFlags::OVERFLOWED));

    let (scanned, _) = scan("-9223372036854775809");
    assert_eq!(scanned.value, TokenValue::Signed(i64::MIN));
    assert!(scanned.flags.contains(TokenFlags::OVERFLOWED));
}

#[test]
fn fraction_makes_a_float() {
    let (scanned, _) = scan("3.25");
    assert!(scanned.flags.contains(TokenFlags::FLOAT));
    let TokenValue::Float(f) = scanned.value else {
        panic!("expected float value");
    };
    assert_eq!(f.whole, 3);
    assert_eq!(f.fract, 25);
    assert_eq!(f.fract_digits, 2);
    assert_eq!(f.radix, 10);
    assert_eq!(f.exp, 0);
    assert!((f.to_f64() - 3.25).abs() < 1e-12);
}

#[test]
fn exponent_makes_a_float() {
    let (scanned, _) = scan("2e3");
    let TokenValue::Float(f) = scanned.value else {
        panic!("expected float value");
    };
    assert_eq!((f.whole, f.exp), (2, 3));
    assert!((f.to_f64() - 2000.0).abs() < 1e-9);

    let (scanned, _) = scan("15e-1");
    let TokenValue::Float(f) = scanned.value else {
        panic!("expected float value");
    };
    assert_eq!(f.exp, -1);
    assert!((f.to_f64() - 1.5).abs() < 1e-12);
}

#[test]
fn negative_fraction_only_value_keeps_sign() {
    let (scanned, _) = scan("-0.5");
    let TokenValue::Float(f) = scanned.value else {
        panic!("expected float value");
    };
    assert!(f.negative);
    assert_eq!(f.whole, 0);
    assert!((f.to_f64() + 0.5).abs() < 1e-12);
}

#[test]
fn hex_float_uses_p_exponent_and_base_10_scaling() {
    // 'e' is a hex digit; only p/P can start the exponent.
    let (scanned, _) = scan("0x1e");
    assert_eq!(scanned.value, TokenValue::Unsigned(0x1e));

    let (scanned, _) = scan("0x10p2");
    let TokenValue::Float(f) = scanned.value else {
        panic!("expected float value");
    };
    assert_eq!((f.whole, f.radix, f.exp), (16, 16, 2));
    // Exponent scales by 10, not by the mantissa radix.
    assert!((f.to_f64() - 1600.0).abs() < 1e-9);
}

#[test]
fn exponent_without_digits_is_not_consumed() {
    let (scanned, pos) = scan("1e");
    assert_eq!(scanned.value, TokenValue::Unsigned(1));
    assert_eq!(pos, 1);

    let (scanned, pos) = scan("2e+");
    assert_eq!(scanned.value, TokenValue::Unsigned(2));
    assert_eq!(pos, 1);
}

#[test]
fn dot_without_digit_is_not_consumed() {
    let (scanned, pos) = scan("7.x");
    assert_eq!(scanned.value, TokenValue::Unsigned(7));
    assert_eq!(pos, 1);
}
