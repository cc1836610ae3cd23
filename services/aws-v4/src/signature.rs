use crate::constants::{AUTHORIZATION, X_AMZ_SECURITY_TOKEN};
use awssign_core::Result;
use http::header::{HeaderName, HeaderValue};
use http::request::Parts;
use std::collections::BTreeMap;

/// Signature is the output of header based signing.
///
/// It carries the headers to merge into the outgoing request, along with
/// the intermediate strings that were signed. The intermediate strings are
/// only useful for debugging and testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    headers: BTreeMap<String, String>,
    string_to_sign: String,
    canonical_request: String,
    content_sha256: String,
}

impl Signature {
    pub(crate) fn new(
        headers: BTreeMap<String, String>,
        string_to_sign: String,
        canonical_request: String,
        content_sha256: String,
    ) -> Self {
        Self {
            headers,
            string_to_sign,
            canonical_request,
            content_sha256,
        }
    }

    /// Headers to set on the request, keyed by lower-cased name.
    ///
    /// Always contains `host`, `x-amz-date` and `authorization`.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Value of the `authorization` header.
    pub fn authorization(&self) -> &str {
        self.headers
            .get(AUTHORIZATION)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The string that has been signed.
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// The canonical request the string to sign was built from.
    pub fn canonical_request(&self) -> &str {
        &self.canonical_request
    }

    /// Payload hash used in the canonical request.
    pub fn content_sha256(&self) -> &str {
        &self.content_sha256
    }

    /// Merge the signed headers into an `http` request.
    ///
    /// Existing headers with the same name are replaced.
    pub fn apply(&self, parts: &mut Parts) -> Result<()> {
        for (k, v) in &self.headers {
            let name = HeaderName::from_bytes(k.as_bytes())?;
            let mut value = HeaderValue::from_str(v)?;
            if k == AUTHORIZATION || k == X_AMZ_SECURITY_TOKEN {
                value.set_sensitive(true);
            }
            parts.headers.insert(name, value);
        }

        Ok(())
    }
}
