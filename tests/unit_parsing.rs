//! Unit tests for the textual pattern forms

use chumsky::Parser;
use conlat::parse::{interval, item_set, ngram_set};
use conlat::{IntervalPattern, ItemSetPattern, NgramSetPattern, PsError};

// ============================================================================
// Item sets
// ============================================================================

#[test]
fn test_parse_item_set() {
    let p: ItemSetPattern<String> = "{a, b, 'two words'}".parse().unwrap();
    assert_eq!(
        p,
        ItemSetPattern::from_iter(["a".to_string(), "b".to_string(), "two words".to_string()])
    );
}

#[test]
fn test_parse_item_set_empty_and_spacing() {
    let empty: ItemSetPattern<String> = "{}".parse().unwrap();
    assert!(empty.is_empty());
    let spaced: ItemSetPattern<String> = "  {  x ,y }  ".parse().unwrap();
    assert_eq!(
        spaced,
        ItemSetPattern::from_iter(["x".to_string(), "y".to_string()])
    );
}

#[test]
fn test_parse_item_set_rejects_garbage() {
    assert!(matches!(
        "{a, b".parse::<ItemSetPattern<String>>(),
        Err(PsError::Parse(_))
    ));
    assert!("a, b".parse::<ItemSetPattern<String>>().is_err());
}

// ============================================================================
// Intervals
// ============================================================================

#[test]
fn test_parse_interval_forms() {
    assert_eq!(
        "[0, 10]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::closed(0.0, 10.0)
    );
    assert_eq!(
        "(2, +inf]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::new(2.0, false, f64::INFINITY, true)
    );
    assert_eq!(
        "[-inf, 11]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::new(f64::NEG_INFINITY, true, 11.0, true)
    );
    assert_eq!(
        "(2, 11]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::new(2.0, false, 11.0, true)
    );
    assert_eq!(
        "(-1.5, 2.25)".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::open(-1.5, 2.25)
    );
}

#[test]
fn test_parse_interval_unicode() {
    assert_eq!("ø".parse::<IntervalPattern>().unwrap(), IntervalPattern::Empty);
    assert_eq!("∅".parse::<IntervalPattern>().unwrap(), IntervalPattern::Empty);
    assert_eq!(
        "[-∞, ∞)".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::full()
    );
}

#[test]
fn test_parse_interval_canonicalizes_contradictions() {
    assert_eq!(
        "[10, 2]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::Empty
    );
    assert_eq!(
        "(3, 3]".parse::<IntervalPattern>().unwrap(),
        IntervalPattern::Empty
    );
}

#[test]
fn test_parse_interval_rejects_garbage() {
    assert!("[5".parse::<IntervalPattern>().is_err());
    assert!("[a, b]".parse::<IntervalPattern>().is_err());
    assert!("[1..2, 3]".parse::<IntervalPattern>().is_err());
}

#[test]
fn test_interval_display_roundtrip() {
    for text in ["[0, 10]", "(2, +inf]", "[-inf, 11]", "ø", "[-inf, +inf]"] {
        let p: IntervalPattern = text.parse().unwrap();
        assert_eq!(p.to_string(), text);
        assert_eq!(p.to_string().parse::<IntervalPattern>().unwrap(), p);
    }
}

// ============================================================================
// Ngram sets
// ============================================================================

#[test]
fn test_parse_ngram_set() {
    let p: NgramSetPattern = "{'hello world', '!'}".parse().unwrap();
    assert_eq!(p, NgramSetPattern::from_phrases(["hello world", "!"]));
    assert_eq!(p.ngrams().len(), 2);
}

#[test]
fn test_parse_ngram_set_empty() {
    let p: NgramSetPattern = "{}".parse().unwrap();
    assert!(p.is_empty());
}

#[test]
fn test_parse_ngram_set_rejects_bare_words() {
    assert!("{hello}".parse::<NgramSetPattern>().is_err());
}

// ============================================================================
// Raw parsers
// ============================================================================

#[test]
fn test_parsers_compose() {
    assert!(item_set().parse("{a}").is_ok());
    assert!(interval().parse("[1, 2]").is_ok());
    assert!(ngram_set().parse("{'a b'}").is_ok());
}
