use hasher_engine::{available_algorithms, digest_hex, DigestError};
use pretty_assertions::assert_eq;

#[test]
fn sha256_known_answer() {
    let digest = digest_hex("sha256", b"cisagov").unwrap();
    assert_eq!(
        digest,
        "d5f8f30f25636b1f3efc2f52a0a8724c9ffa280875a1fc9a92cfe3f644b7d5c3"
    );
}

#[test]
fn digests_are_deterministic() {
    for algorithm in available_algorithms() {
        let first = digest_hex(algorithm, b"same input").unwrap();
        let second = digest_hex(algorithm, b"same input").unwrap();
        assert_eq!(first, second, "{algorithm} must be deterministic");
    }
}

#[test]
fn hex_length_matches_algorithm_output_size() {
    let expected = [
        ("blake2b", 128),
        ("blake2s", 64),
        ("md5", 32),
        ("sha1", 40),
        ("sha224", 56),
        ("sha256", 64),
        ("sha384", 96),
        ("sha3_224", 56),
        ("sha3_256", 64),
        ("sha3_384", 96),
        ("sha3_512", 128),
        ("sha512", 128),
        ("sha512_224", 56),
        ("sha512_256", 64),
        ("shake_128", 32),
        ("shake_256", 64),
    ];
    assert_eq!(expected.len(), available_algorithms().len());
    for (algorithm, hex_len) in expected {
        let digest = digest_hex(algorithm, b"abc").unwrap();
        assert_eq!(digest.len(), hex_len, "unexpected length for {algorithm}");
    }
}

#[test]
fn digest_is_lowercase_hex() {
    let digest = digest_hex("sha512", b"AbC").unwrap();
    assert!(digest
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn unknown_algorithm_is_rejected() {
    let err = digest_hex("md4", b"x").unwrap_err();
    assert_eq!(err, DigestError::UnsupportedAlgorithm("md4".to_string()));
}

#[test]
fn algorithm_list_is_sorted() {
    let algorithms = available_algorithms();
    let mut sorted = algorithms.to_vec();
    sorted.sort_unstable();
    assert_eq!(algorithms, sorted.as_slice());
    assert!(algorithms.contains(&"sha256"));
}
