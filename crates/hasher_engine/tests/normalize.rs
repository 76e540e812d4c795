use hasher_engine::{
    is_plain_ascii, normalize_json, normalize_plaintext, select_handler, ContentHandler,
    DecodeError, NormalizeError,
};
use pretty_assertions::assert_eq;

fn utf16_le(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect()
}

#[test]
fn json_equivalent_documents_normalize_identically() {
    let first = normalize_json(br#"{"b":1,"a":2}"#, None).unwrap();
    let second = normalize_json(br#"{ "a": 2, "b": 1 }"#, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, br#"{"a":2,"b":1}"#.to_vec());
}

#[test]
fn json_normalization_is_idempotent() {
    let canonical = normalize_json(br#"{"a":2,"b":1}"#, None).unwrap();
    let again = normalize_json(&canonical, None).unwrap();
    assert_eq!(canonical, again);
}

#[test]
fn json_keys_sort_at_every_nesting_level() {
    let normalized =
        normalize_json(br#"{"b":{"d":1,"c":2},"a":[{"z":1,"y":2}]}"#, None).unwrap();
    assert_eq!(normalized, br#"{"a":[{"y":2,"z":1}],"b":{"c":2,"d":1}}"#.to_vec());
}

#[test]
fn json_decodes_declared_encoding() {
    let bytes = utf16_le(r#"{"a":1}"#);
    let normalized = normalize_json(&bytes, Some("utf-16")).unwrap();
    assert_eq!(normalized, br#"{"a":1}"#.to_vec());
}

#[test]
fn json_parse_failure_is_fatal() {
    let err = normalize_json(b"{not json", None).unwrap_err();
    assert!(matches!(err, NormalizeError::MalformedJson(_)));
}

#[test]
fn plaintext_reencodes_declared_encoding_as_utf8() {
    let bytes = utf16_le("caf\u{e9} au lait");
    let normalized = normalize_plaintext(&bytes, Some("utf-16")).unwrap();
    assert_eq!(normalized, "caf\u{e9} au lait".as_bytes().to_vec());
}

#[test]
fn plaintext_without_encoding_passes_through() {
    // Not valid UTF-8, but with no declared encoding nothing is decoded.
    let bytes = vec![0xe9, 0x20, 0x61];
    let normalized = normalize_plaintext(&bytes, None).unwrap();
    assert_eq!(normalized, bytes);
}

#[test]
fn plaintext_decode_failure_is_fatal() {
    let err = normalize_plaintext(&[0xe9, 0x61], Some("utf-8")).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Encoding(DecodeError::DecodeFailure { .. })
    ));
}

#[test]
fn unknown_encoding_label_is_fatal() {
    let err = normalize_plaintext(b"abc", Some("utf-99")).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Encoding(DecodeError::UnknownLabel(_))
    ));
}

#[test]
fn known_content_types_map_to_their_handlers() {
    assert_eq!(select_handler("text/plain", b"x"), ContentHandler::Plaintext);
    assert_eq!(select_handler("application/json", b"{}"), ContentHandler::Json);
    assert_eq!(select_handler("text/html", b"<p>x</p>"), ContentHandler::Html);
}

#[test]
fn exact_match_wins_over_body_shape() {
    // A declared text/plain body is handled as plaintext even when binary.
    assert_eq!(
        select_handler("text/plain", &[0x00, 0xff]),
        ContentHandler::Plaintext
    );
}

#[test]
fn unknown_type_with_ascii_body_falls_back_to_plaintext() {
    assert_eq!(
        select_handler("text/csv", b"a,b\n1,2\n"),
        ContentHandler::Plaintext
    );
    assert_eq!(
        select_handler("application/xml", b"<note>hello</note>"),
        ContentHandler::Plaintext
    );
}

#[test]
fn unknown_type_with_binary_body_falls_back_to_raw() {
    // NUL bytes read as binary even when everything else is ASCII.
    assert_eq!(
        select_handler("application/pdf", b"%PDF-1.4\x00"),
        ContentHandler::RawBytes
    );
    // PNG magic starts above 0x7f.
    assert_eq!(
        select_handler("image/png", &[0x89, b'P', b'N', b'G']),
        ContentHandler::RawBytes
    );
    // Non-ASCII UTF-8 text is not "plain ASCII" either.
    assert_eq!(
        select_handler("application/xml", "caf\u{e9}".as_bytes()),
        ContentHandler::RawBytes
    );
}

#[test]
fn ascii_detector_boundary_cases() {
    assert!(is_plain_ascii(b""));
    assert!(is_plain_ascii(b"plain text\twith\r\nwhitespace"));
    assert!(!is_plain_ascii(b"nul\x00byte"));
    assert!(!is_plain_ascii("\u{feff}bom".as_bytes()));
    assert!(!is_plain_ascii(&[0x7f]));
}
