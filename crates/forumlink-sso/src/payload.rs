//! Inbound SSO payload validation.
//!
//! The forum opens the handshake by redirecting the browser to the host
//! with two query parameters: `sso`, a base64-encoded query string
//! carrying at least a `nonce`, and `sig`, the lowercase-hex HMAC-SHA256
//! digest of `sso` under the shared secret. [`validate_payload`]
//! authenticates the payload and extracts its nonce in one step — there
//! is no way to obtain the nonce from a payload whose signature does not
//! match.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;

use crate::error::SsoError;
use crate::nonce::Nonce;
use crate::secret::SharedSecret;

/// Validate an inbound payload and extract its nonce.
///
/// The digest is computed over `payload` exactly as received (still
/// percent-encoded where the peer sent it so); decoding happens only
/// after the signature check passes. Signatures are compared in constant
/// time.
///
/// # Errors
///
/// * [`SsoError::InvalidSignature`] — `signature` does not match.
/// * [`SsoError::MalformedPayload`] — the payload does not decode to an
///   `&`-separated list of `key=value` pairs.
/// * [`SsoError::MissingNonce`] — the decoded payload has no `nonce` key.
pub fn validate_payload(
    secret: &SharedSecret,
    payload: &str,
    signature: &str,
) -> Result<Nonce, SsoError> {
    let expected = secret.sign(payload);
    if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        return Err(SsoError::InvalidSignature);
    }

    decode_payload(payload)?
        .into_iter()
        .find(|(key, _)| key == "nonce")
        .map(|(_, value)| Nonce::from(value))
        .ok_or(SsoError::MissingNonce)
}

/// Decode a payload into its `key=value` pairs, preserving order.
///
/// Undoes the transport encoding in sequence: percent-decoding, then
/// base64 (tolerating MIME-style line wrapping and trailing newlines),
/// then the query string itself with percent-decoded values.
pub fn decode_payload(payload: &str) -> Result<Vec<(String, String)>, SsoError> {
    let unquoted = urlencoding::decode(payload).map_err(|e| SsoError::MalformedPayload {
        reason: format!("invalid percent-encoding: {e}"),
    })?;

    let compact: String = unquoted
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let decoded = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SsoError::MalformedPayload {
            reason: format!("invalid base64: {e}"),
        })?;

    let query = String::from_utf8(decoded).map_err(|_| SsoError::MalformedPayload {
        reason: "decoded payload is not valid UTF-8".into(),
    })?;

    query
        .split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| SsoError::MalformedPayload {
                reason: format!("not a key=value pair: \"{pair}\""),
            })?;
            let value = urlencoding::decode(value).map_err(|e| SsoError::MalformedPayload {
                reason: format!("invalid percent-encoding in value: {e}"),
            })?;
            Ok((key.to_string(), value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: &str = "cb68251eefb5211e58c00ff1395f0c0b";
    // base64("nonce=cb68251eefb5211e58c00ff1395f0c0b") with the padding
    // percent-encoded and a trailing encoded newline, as MIME-style
    // encoders emit it.
    const PAYLOAD: &str = "bm9uY2U9Y2I2ODI1MWVlZmI1MjExZTU4YzAwZmYxMzk1ZjBjMGI%3D%0A";

    fn secret() -> SharedSecret {
        SharedSecret::new("s3cr3t").unwrap()
    }

    fn encode(query: &str) -> String {
        STANDARD.encode(query)
    }

    #[test]
    fn valid_payload_returns_embedded_nonce() {
        let secret = secret();
        let sig = secret.sign(PAYLOAD);

        let nonce = validate_payload(&secret, PAYLOAD, &sig).unwrap();
        assert_eq!(nonce.as_str(), NONCE);
    }

    #[test]
    fn plain_base64_payload_also_validates() {
        let secret = secret();
        let payload = encode("nonce=1234&return_sso_url=https%3A%2F%2Fforum.example.org");
        let sig = secret.sign(&payload);

        let nonce = validate_payload(&secret, &payload, &sig).unwrap();
        assert_eq!(nonce.as_str(), "1234");
    }

    #[test]
    fn corrupted_signature_is_rejected() {
        let secret = secret();
        let mut sig = secret.sign(PAYLOAD);
        // Flip the last hex digit.
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });

        assert_eq!(
            validate_payload(&secret, PAYLOAD, &sig),
            Err(SsoError::InvalidSignature)
        );
    }

    #[test]
    fn signature_under_wrong_secret_is_rejected() {
        let secret = secret();
        let other = SharedSecret::new("not-the-secret").unwrap();
        let sig = other.sign(PAYLOAD);

        assert_eq!(
            validate_payload(&secret, PAYLOAD, &sig),
            Err(SsoError::InvalidSignature)
        );
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let secret = secret();
        let sig = &secret.sign(PAYLOAD)[..32];

        assert_eq!(
            validate_payload(&secret, PAYLOAD, sig),
            Err(SsoError::InvalidSignature)
        );
    }

    #[test]
    fn signature_check_precedes_decoding() {
        // A payload that is not even base64 still fails on the signature
        // first when the signature is wrong.
        let secret = secret();
        assert_eq!(
            validate_payload(&secret, "!!!not-base64!!!", "0000"),
            Err(SsoError::InvalidSignature)
        );
    }

    #[test]
    fn payload_without_pairs_is_malformed_despite_valid_signature() {
        let secret = secret();
        let payload = encode("something");
        let sig = secret.sign(&payload);

        assert!(matches!(
            validate_payload(&secret, &payload, &sig),
            Err(SsoError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn invalid_base64_is_malformed_despite_valid_signature() {
        let secret = secret();
        let payload = "!!!not-base64!!!";
        let sig = secret.sign(payload);

        assert!(matches!(
            validate_payload(&secret, payload, &sig),
            Err(SsoError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn payload_without_nonce_is_rejected_despite_valid_signature() {
        let secret = secret();
        let payload = encode("user=jb&email=j%40b.com");
        let sig = secret.sign(&payload);

        assert_eq!(
            validate_payload(&secret, &payload, &sig),
            Err(SsoError::MissingNonce)
        );
    }

    #[test]
    fn decode_preserves_pair_order_and_percent_decodes_values() {
        let payload = encode("nonce=1234&email=j%40b.com&name=Joe%20Bloggs");
        let fields = decode_payload(&payload).unwrap();

        assert_eq!(
            fields,
            vec![
                ("nonce".to_string(), "1234".to_string()),
                ("email".to_string(), "j@b.com".to_string()),
                ("name".to_string(), "Joe Bloggs".to_string()),
            ]
        );
    }

    #[test]
    fn decode_tolerates_line_wrapped_base64() {
        // MIME base64 wraps at 76 columns; the whitespace must not leak
        // into the decoder.
        let encoded = encode("nonce=1234&user=jb");
        let (head, tail) = encoded.split_at(10);
        let wrapped = format!("{head}\n{tail}\n");

        let fields = decode_payload(&wrapped).unwrap();
        assert_eq!(fields[0], ("nonce".to_string(), "1234".to_string()));
    }
}
