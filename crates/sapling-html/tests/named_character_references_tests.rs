//! Integration tests for character reference lookup and decoding.

use sapling_html::tokenizer::named_character_references::{
    ENTRY_COUNT, NAMES, any_entity_has_prefix, lookup_entity,
};
use sapling_html::{ErrorCode, IssueCode, parse_document_with_issues};

/// Helper to parse a body and return its text plus the lexical error codes.
fn decode(input: &str) -> (String, Vec<ErrorCode>) {
    let (tree, issues) = parse_document_with_issues(input);
    let text = tree.body().map(|body| tree.text_content(body)).unwrap_or_default();
    let codes = issues
        .iter()
        .filter_map(|issue| match issue.code {
            IssueCode::Lexical(code) => Some(code),
            IssueCode::Tree(_) => None,
        })
        .collect();
    (text, codes)
}

/// Helper to read the `title` attribute of the first `p`.
fn attribute_value(input: &str) -> String {
    let (tree, _) = parse_document_with_issues(&format!("<p title=\"{input}\">"));
    tree.find_element(tree.root(), "p")
        .and_then(|p| tree.as_element(p))
        .and_then(|p| p.attr("title"))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn test_table_size() {
    assert_eq!(NAMES.len(), ENTRY_COUNT);
    assert_eq!(ENTRY_COUNT, 2231);
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("not"), Some("\u{00AC}"));
    assert_eq!(lookup_entity("notin"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a"));
    assert!(any_entity_has_prefix("am"));
    assert!(any_entity_has_prefix("amp;"));
    assert!(!any_entity_has_prefix("ampx"));
    assert!(!any_entity_has_prefix("xyz"));
}

#[test]
fn test_named_references_in_text() {
    assert_eq!(decode("a &amp; b &lt;c&gt;").0, "a & b <c>");
    assert_eq!(decode("&notin;").0, "\u{2209}");
}

#[test]
fn test_longest_legacy_prefix_without_semicolon() {
    // "&notit;" is not a reference, but its prefix "&not" is.
    let (text, codes) = decode("I'm &notit; I tell you");
    assert_eq!(text, "I'm \u{00AC}it; I tell you");
    assert_eq!(codes, vec![ErrorCode::MissingSemicolonAfterCharacterReference]);
}

#[test]
fn test_unknown_named_reference_is_kept() {
    let (text, codes) = decode("&bogus;");
    assert_eq!(text, "&bogus;");
    assert_eq!(codes, vec![ErrorCode::UnknownNamedCharacterReference]);
}

#[test]
fn test_numeric_references() {
    assert_eq!(decode("&#65;&#x42;&#X43;").0, "ABC");
    let (text, codes) = decode("&#128;");
    assert_eq!(text, "\u{20AC}");
    assert_eq!(codes, vec![ErrorCode::ControlCharacterReference]);
}

#[test]
fn test_numeric_reference_errors() {
    let (text, codes) = decode("&#0;");
    assert_eq!(text, "\u{FFFD}");
    assert_eq!(codes, vec![ErrorCode::NullCharacterReference]);

    let (text, codes) = decode("&#x110000;");
    assert_eq!(text, "\u{FFFD}");
    assert_eq!(codes, vec![ErrorCode::CharacterReferenceOutsideUnicodeRange]);

    let (text, codes) = decode("&#xD800;");
    assert_eq!(text, "\u{FFFD}");
    assert_eq!(codes, vec![ErrorCode::SurrogateCharacterReference]);

    let (text, codes) = decode("&#;");
    assert_eq!(text, "&#;");
    assert_eq!(codes, vec![ErrorCode::AbsenceOfDigitsInNumericCharacterReference]);
}

#[test]
fn test_attribute_value_legacy_rule() {
    // "&amp" followed by "=" or an alphanumeric is left alone in attributes.
    assert_eq!(attribute_value("a?b&ampc=d"), "a?b&ampc=d");
    assert_eq!(attribute_value("x&amp=y"), "x&amp=y");
    assert_eq!(attribute_value("x&amp;y"), "x&y");
    assert_eq!(attribute_value("x&amp y"), "x& y");
}
