use digest::{DynDigest, ExtendableOutput, Update, XofReader};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

// SHAKE output length is caller-chosen; fixed defaults keep digests
// comparable across runs.
const SHAKE_128_OUTPUT_LEN: usize = 16;
const SHAKE_256_OUTPUT_LEN: usize = 32;

/// Hash algorithms compiled into this build, sorted by name.
pub fn available_algorithms() -> &'static [&'static str] {
    &[
        "blake2b",
        "blake2s",
        "md5",
        "sha1",
        "sha224",
        "sha256",
        "sha384",
        "sha3_224",
        "sha3_256",
        "sha3_384",
        "sha3_512",
        "sha512",
        "sha512_224",
        "sha512_256",
        "shake_128",
        "shake_256",
    ]
}

/// Compute the lowercase hex digest of `contents` under the named algorithm.
pub fn digest_hex(algorithm: &str, contents: &[u8]) -> Result<String, DigestError> {
    if let Some(hex) = xof_digest(algorithm, contents) {
        return Ok(hex);
    }
    let mut hasher = fixed_output_hasher(algorithm)
        .ok_or_else(|| DigestError::UnsupportedAlgorithm(algorithm.to_string()))?;
    hasher.update(contents);
    Ok(hex::encode(hasher.finalize()))
}

fn fixed_output_hasher(algorithm: &str) -> Option<Box<dyn DynDigest>> {
    Some(match algorithm {
        "blake2b" => Box::new(blake2::Blake2b512::default()),
        "blake2s" => Box::new(blake2::Blake2s256::default()),
        "md5" => Box::new(md5::Md5::default()),
        "sha1" => Box::new(sha1::Sha1::default()),
        "sha224" => Box::new(sha2::Sha224::default()),
        "sha256" => Box::new(sha2::Sha256::default()),
        "sha384" => Box::new(sha2::Sha384::default()),
        "sha512" => Box::new(sha2::Sha512::default()),
        "sha512_224" => Box::new(sha2::Sha512_224::default()),
        "sha512_256" => Box::new(sha2::Sha512_256::default()),
        "sha3_224" => Box::new(sha3::Sha3_224::default()),
        "sha3_256" => Box::new(sha3::Sha3_256::default()),
        "sha3_384" => Box::new(sha3::Sha3_384::default()),
        "sha3_512" => Box::new(sha3::Sha3_512::default()),
        _ => return None,
    })
}

fn xof_digest(algorithm: &str, contents: &[u8]) -> Option<String> {
    let output = match algorithm {
        "shake_128" => {
            let mut hasher = sha3::Shake128::default();
            hasher.update(contents);
            let mut output = vec![0u8; SHAKE_128_OUTPUT_LEN];
            hasher.finalize_xof().read(&mut output);
            output
        }
        "shake_256" => {
            let mut hasher = sha3::Shake256::default();
            hasher.update(contents);
            let mut output = vec![0u8; SHAKE_256_OUTPUT_LEN];
            hasher.finalize_xof().read(&mut output);
            output
        }
        _ => return None,
    };
    Some(hex::encode(output))
}
