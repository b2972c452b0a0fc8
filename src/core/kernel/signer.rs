use crate::core::errors::ExchangeError;
use crate::core::kernel::nonce::NonceGenerator;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha512;
use std::collections::HashMap;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "apisign";

/// Result type for signing operations: headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// The pipeline asks the signer for the query values it owns (`apikey`,
/// `nonce`), embeds them into the URL, and only then asks for the signature
/// over the final URL string. The string that is signed is the string that
/// is sent.
pub trait Signer: Send + Sync {
    /// Public API key, sent as the `apikey` query parameter
    fn api_key(&self) -> &str;

    /// Next nonce for this credential
    fn next_nonce(&self) -> u64;

    /// Sign a fully built request URL and return the headers to attach
    fn sign_request(&self, url: &str) -> SignatureResult;
}

/// Lowercase hex HMAC-SHA512 of `url` keyed by `secret`.
pub fn sign(secret: &[u8], url: &str) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = <HmacSha512 as Mac>::new_from_slice(secret)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(url.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex signature against `url` the way the exchange does.
pub fn verify(secret: &[u8], url: &str, signature_hex: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(mut mac) = <HmacSha512 as Mac>::new_from_slice(secret) else {
        return false;
    };
    mac.update(url.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// HMAC-SHA512 signer holding one credential and its nonce sequence
pub struct HmacSigner {
    api_key: String,
    secret_key: Secret<String>,
    nonces: NonceGenerator,
}

impl HmacSigner {
    pub fn new(api_key: String, secret_key: Secret<String>) -> Result<Self, ExchangeError> {
        if secret_key.expose_secret().is_empty() {
            return Err(ExchangeError::AuthError(
                "secret key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            api_key,
            secret_key,
            nonces: NonceGenerator::new(),
        })
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Signer for HmacSigner {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn next_nonce(&self) -> u64 {
        self.nonces.next()
    }

    fn sign_request(&self, url: &str) -> SignatureResult {
        let signature = sign(self.secret_key.expose_secret().as_bytes(), url);
        let mut headers = HashMap::new();
        headers.insert(SIGNATURE_HEADER.to_string(), signature);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key";
    const URL: &str =
        "https://bittrex.com/api/v1.1/account/getbalance?apikey=abc&currency=BTC&nonce=1500000000";

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign(SECRET, URL);
        let second = sign(SECRET, URL);
        assert_eq!(first, second);
        assert_eq!(first.len(), 128);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_known_vector() {
        // RFC 4231 test case 2
        let signature = sign(b"Jefe", "what do ya want for nothing?");
        assert_eq!(
            signature,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_one_byte_difference_changes_signature() {
        let altered = URL.replace("nonce=1500000000", "nonce=1500000001");
        assert_ne!(sign(SECRET, URL), sign(SECRET, &altered));
        assert_ne!(sign(SECRET, URL), sign(b"other_secret", URL));
    }

    #[test]
    fn test_reencoded_parameter_fails_verification() {
        let signed_url = "https://bittrex.com/api/v1.1/account/withdraw?apikey=abc&address=a+b&nonce=1";
        let signature = sign(SECRET, signed_url);
        assert!(verify(SECRET, signed_url, &signature));

        // Same logical value, different encoding on the wire
        let sent_url = signed_url.replace("a+b", "a%20b");
        assert!(!verify(SECRET, &sent_url, &signature));

        // Reordered parameters are a different message too
        let reordered = "https://bittrex.com/api/v1.1/account/withdraw?address=a+b&apikey=abc&nonce=1";
        assert!(!verify(SECRET, reordered, &signature));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(!verify(SECRET, URL, "not-hex"));
        assert!(!verify(SECRET, URL, ""));
    }

    #[test]
    fn test_signer_headers_and_debug() {
        let signer =
            HmacSigner::new("abc".to_string(), Secret::new("s3cr3t".to_string())).unwrap();
        let headers = signer.sign_request(URL).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[SIGNATURE_HEADER], sign(b"s3cr3t", URL));
        assert_eq!(signer.api_key(), "abc");
        assert!(!format!("{:?}", signer).contains("s3cr3t"));
    }

    #[test]
    fn test_signer_rejects_empty_secret() {
        assert!(matches!(
            HmacSigner::new("abc".to_string(), Secret::new(String::new())),
            Err(ExchangeError::AuthError(_))
        ));
    }
}
