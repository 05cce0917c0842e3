//! Provisioning URI for authenticator apps.
//!
//! Third-party apps parse this format literally, so the scheme, label
//! shape, and query parameter names are fixed:
//! `otpauth://totp/{issuer}:{account}?secret={base32}&issuer={issuer}`.

/// Builds the `otpauth://` provisioning URI for a secret.
///
/// Labels are URL-encoded; the secret is base32 and needs no encoding.
/// The caller renders this as a QR code (out of scope here) or shows it
/// for manual entry.
#[must_use]
pub fn provisioning_uri(secret: &str, account: &str, issuer: &str) -> String {
    format!(
        "otpauth://totp/{}:{}?secret={}&issuer={}",
        urlencoding::encode(issuer),
        urlencoding::encode(account),
        secret,
        urlencoding::encode(issuer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_has_fixed_scheme_and_fields() {
        let uri = provisioning_uri("GEZDGNBVGY3TQOJQ", "alice", "Example");
        assert_eq!(
            uri,
            "otpauth://totp/Example:alice?secret=GEZDGNBVGY3TQOJQ&issuer=Example"
        );
    }

    #[test]
    fn labels_are_url_encoded() {
        let uri = provisioning_uri("GEZDGNBVGY3TQOJQ", "alice@example.com", "Example Analytics");
        assert!(uri.starts_with("otpauth://totp/Example%20Analytics:alice%40example.com?"));
        assert!(uri.ends_with("&issuer=Example%20Analytics"));
    }
}
