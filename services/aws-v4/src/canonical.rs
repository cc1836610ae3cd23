//! Canonicalization rules of AWS SigV4.
//!
//! Every function here is pure: the same input always yields the same
//! bytes, which is what the server reproduces to verify the signature.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use awssign_core::{Error, Method, Result};
use http::Uri;
use percent_encoding::{percent_decode_str, percent_encode, utf8_percent_encode};

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};

/// Canonical request along with the signed header list it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CanonicalRequest {
    pub request: String,
    pub signed_headers: String,
}

/// Lower-case all header names.
///
/// Names that collide after lower-casing are merged into one value, each
/// part trimmed and joined by `,`.
pub(crate) fn lowercase_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut lowered: BTreeMap<String, String> = BTreeMap::new();
    for (k, v) in headers {
        let k = k.to_lowercase();
        match lowered.get_mut(&k) {
            Some(existing) => {
                let merged = format!("{},{}", existing.trim(), v.trim());
                *existing = merged;
            }
            None => {
                lowered.insert(k, v.clone());
            }
        }
    }
    lowered
}

/// Build the value of the `host` header from the url authority.
///
/// The port is kept only when it's given explicitly and isn't the default
/// port of the scheme.
pub(crate) fn host_header(uri: &Uri) -> Result<String> {
    let authority = uri
        .authority()
        .filter(|v| !v.host().is_empty())
        .ok_or_else(|| Error::missing_host(format!("url {uri} has no host")))?;

    let host = authority.host();
    let value = match (uri.scheme_str(), authority.port_u16()) {
        (Some("http"), Some(80)) | (Some("https"), Some(443)) | (_, None) => host.to_string(),
        (_, Some(port)) => format!("{host}:{port}"),
    };
    Ok(value)
}

/// Canonical path: every segment percent-encoded on its own, `/` kept.
///
/// Segments are handled as raw bytes, so escapes that are not valid utf-8
/// are encoded back exactly as given.
pub(crate) fn canonical_path(uri: &Uri) -> String {
    let path = uri.path();
    if path.is_empty() {
        return "/".to_string();
    }

    let path: Vec<u8> = percent_decode_str(path).collect();
    path.split(|b| *b == b'/')
        .map(|seg| percent_encode(seg, &AWS_URI_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical query: encoded `key=value` pairs sorted by the encoded string.
pub(crate) fn canonical_query(query: Option<&str>) -> String {
    let Some(query) = query else {
        return String::new();
    };

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(&k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(&v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>();
    pairs.sort_unstable();
    pairs.join("&")
}

/// Normalize header value.
///
/// Runs of whitespace are folded into a single space and both ends are
/// trimmed, unless the whole value is a quoted string.
pub(crate) fn normalize_header_value(v: &str) -> Cow<'_, str> {
    if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
        return Cow::Borrowed(v);
    }

    Cow::Owned(v.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Names of the headers to sign, sorted and joined by `;`.
///
/// `headers` must be lower-cased already.
pub(crate) fn signed_headers(
    headers: &BTreeMap<String, String>,
    unsigned: &HashSet<String>,
) -> String {
    headers
        .keys()
        .filter(|k| !unsigned.contains(*k))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";")
}

/// Canonical headers block, one `name:value\n` line per signed header.
///
/// `headers` must be lower-cased already.
pub(crate) fn canonical_headers(
    headers: &BTreeMap<String, String>,
    unsigned: &HashSet<String>,
) -> Result<String> {
    // BTreeMap keeps names sorted.
    let mut f = String::with_capacity(128);
    for (k, v) in headers.iter().filter(|(k, _)| !unsigned.contains(*k)) {
        writeln!(f, "{k}:{}", normalize_header_value(v))?;
    }
    Ok(f)
}

/// Build the canonical request.
///
/// ```text
/// GET
/// /resource
/// a=b&c=d
/// host:example.amazonaws.com
/// x-amz-date:20150830T123600Z
///
/// host;x-amz-date
/// UNSIGNED-PAYLOAD
/// ```
pub(crate) fn canonical_request(
    method: Method,
    uri: &Uri,
    headers: &BTreeMap<String, String>,
    unsigned: &HashSet<String>,
    content_sha256: &str,
) -> Result<CanonicalRequest> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{}", canonical_path(uri))?;
    writeln!(f, "{}", canonical_query(uri.query()))?;
    writeln!(f, "{}", canonical_headers(headers, unsigned)?)?;
    let signed_headers = signed_headers(headers, unsigned);
    writeln!(f, "{signed_headers}")?;
    write!(f, "{content_sha256}")?;

    Ok(CanonicalRequest {
        request: f,
        signed_headers,
    })
}
