use crate::canonical::{canonical_request, host_header, lowercase_headers, signed_headers};
use crate::constants::{
    ALGORITHM, ALWAYS_UNSIGNED_HEADERS, AUTHORIZATION, AWS4_REQUEST, AWS_QUERY_ENCODE_SET,
    DEFAULT_PRESIGN_EXPIRES, HOST, UNSIGNED_PAYLOAD, X_AMZ_ALGORITHM_QUERY,
    X_AMZ_CONTENT_SHA_256, X_AMZ_CREDENTIAL_QUERY, X_AMZ_DATE, X_AMZ_DATE_QUERY,
    X_AMZ_EXPIRES_QUERY, X_AMZ_SECURITY_TOKEN, X_AMZ_SECURITY_TOKEN_QUERY,
    X_AMZ_SIGNATURE_QUERY, X_AMZ_SIGNED_HEADERS_QUERY,
};
use crate::{Config, Credential, Signature};
use awssign_core::time::{format_iso8601, now, DateTime};
use awssign_core::{Context, Error, Result, SigningRequest};
use http::Uri;
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::time::Duration;

/// Signer that implements AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer is immutable after construction and can be shared across
/// threads freely.
#[derive(Debug, Clone)]
pub struct Signer {
    ctx: Context,

    service: String,
    region: String,
    credential: Credential,
    unsigned_headers: HashSet<String>,
    apply_checksum_header: bool,

    time: Option<DateTime>,
}

impl Signer {
    /// Create a new signer for the given service and region.
    pub fn new(ctx: Context, service: &str, region: &str, credential: Credential) -> Self {
        Self {
            ctx,

            service: service.to_string(),
            region: region.to_string(),
            credential,
            unsigned_headers: ALWAYS_UNSIGNED_HEADERS
                .iter()
                .map(|v| v.to_string())
                .collect(),
            apply_checksum_header: true,

            time: None,
        }
    }

    /// Create a new signer from config.
    ///
    /// Region missing from the config is loaded from env.
    pub fn from_config(
        ctx: Context,
        service: &str,
        config: &Config,
        credential: Credential,
    ) -> Result<Self> {
        let config = config.clone().from_env(&ctx);
        let region = config
            .region
            .ok_or_else(|| Error::config_invalid("region is required but not set"))?;

        Ok(Self::new(ctx, service, &region, credential)
            .with_unsigned_headers(config.unsigned_headers)
            .with_checksum_header(config.apply_checksum_header))
    }

    /// Exclude extra headers from signing.
    ///
    /// Names are case-insensitive.
    pub fn with_unsigned_headers(
        mut self,
        headers: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        self.unsigned_headers
            .extend(headers.into_iter().map(|v| v.as_ref().to_lowercase()));
        self
    }

    /// Whether to add `x-amz-content-sha256` to the signed headers.
    ///
    /// Default to `true`.
    pub fn with_checksum_header(mut self, apply: bool) -> Self {
        self.apply_checksum_header = apply;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in header mode.
    ///
    /// The returned [`Signature`] carries the headers that must be set on
    /// the request before sending.
    pub fn sign_request(&self, req: &SigningRequest) -> Result<Signature> {
        let mut headers = lowercase_headers(&req.headers);

        let amz_date = match headers.get(X_AMZ_DATE) {
            Some(v) => v.clone(),
            None => format_iso8601(self.time.unwrap_or_else(now)),
        };
        let content_sha256 = self.content_sha256(&headers, req)?;

        let mut injected = BTreeMap::new();
        injected.insert(HOST.to_string(), host_header(&req.uri)?);
        injected.insert(X_AMZ_DATE.to_string(), amz_date.clone());
        if let Some(token) = self.credential.session_token() {
            injected.insert(X_AMZ_SECURITY_TOKEN.to_string(), token.to_string());
        }
        if self.apply_checksum_header {
            injected.insert(X_AMZ_CONTENT_SHA_256.to_string(), content_sha256.clone());
        }
        headers.extend(injected.clone());

        let creq = canonical_request(
            req.method,
            &req.uri,
            &headers,
            &self.unsigned_headers,
            &content_sha256,
        )?;
        debug!("calculated canonical request: {}", creq.request);

        let scope = self.scope(&amz_date)?;
        let string_to_sign = self.string_to_sign(&amz_date, &scope, &creq.request)?;
        let signature = self.signature(&amz_date, &string_to_sign)?;

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            self.credential.access_key_id(),
            creq.signed_headers,
        );
        injected.insert(AUTHORIZATION.to_string(), authorization);

        Ok(Signature::new(
            injected,
            string_to_sign,
            creq.request,
            content_sha256,
        ))
    }

    /// Build a presigned url for the request.
    ///
    /// `expires_in` defaults to 900 seconds. The signing time is taken from
    /// `time`, then the `x-amz-date` header of the request, then the clock.
    pub fn presign_url(
        &self,
        req: &SigningRequest,
        expires_in: Option<Duration>,
        time: Option<DateTime>,
    ) -> Result<Uri> {
        self.presign(req, expires_in, time).map(|v| v.url)
    }

    pub(crate) fn presign(
        &self,
        req: &SigningRequest,
        expires_in: Option<Duration>,
        time: Option<DateTime>,
    ) -> Result<PresignedUrl> {
        let expires_in = expires_in.unwrap_or(DEFAULT_PRESIGN_EXPIRES);

        let mut headers = lowercase_headers(&req.headers);
        headers.insert(HOST.to_string(), host_header(&req.uri)?);

        let amz_date = match (time.or(self.time), headers.get(X_AMZ_DATE)) {
            (Some(t), _) => format_iso8601(t),
            (None, Some(v)) => v.clone(),
            (None, None) => format_iso8601(now()),
        };
        let content_sha256 = self.content_sha256(&headers, req)?;
        let scope = self.scope(&amz_date)?;

        let mut params = vec![
            (X_AMZ_ALGORITHM_QUERY, ALGORITHM.to_string()),
            (
                X_AMZ_CREDENTIAL_QUERY,
                format!("{}/{scope}", self.credential.access_key_id()),
            ),
            (X_AMZ_DATE_QUERY, amz_date.clone()),
            (X_AMZ_EXPIRES_QUERY, expires_in.as_secs().to_string()),
            (
                X_AMZ_SIGNED_HEADERS_QUERY,
                signed_headers(&headers, &self.unsigned_headers),
            ),
        ];
        if let Some(token) = self.credential.session_token() {
            params.push((X_AMZ_SECURITY_TOKEN_QUERY, token.to_string()));
        }
        let suffix = params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                    utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let mut url = req.uri.to_string();
        match req.uri.query() {
            Some("") => {}
            Some(_) => url.push('&'),
            None => url.push('?'),
        }
        url.push_str(&suffix);
        let intermediate = parse_url(&url)?;

        let creq = canonical_request(
            req.method,
            &intermediate,
            &headers,
            &self.unsigned_headers,
            &content_sha256,
        )?;
        debug!("calculated canonical request: {}", creq.request);

        let string_to_sign = self.string_to_sign(&amz_date, &scope, &creq.request)?;
        let signature = self.signature(&amz_date, &string_to_sign)?;

        write!(url, "&{X_AMZ_SIGNATURE_QUERY}={signature}")?;
        Ok(PresignedUrl {
            url: parse_url(&url)?,
            canonical_request: creq.request,
            string_to_sign,
        })
    }

    /// Payload hash: the caller's `x-amz-content-sha256` if given, then the
    /// hash of the body, then `UNSIGNED-PAYLOAD`.
    fn content_sha256(
        &self,
        headers: &BTreeMap<String, String>,
        req: &SigningRequest,
    ) -> Result<String> {
        if let Some(v) = headers.get(X_AMZ_CONTENT_SHA_256) {
            return Ok(v.clone());
        }

        match &req.body {
            Some(body) => self.ctx.hex_sha256(body),
            None => Ok(UNSIGNED_PAYLOAD.to_string()),
        }
    }

    /// Scope: "20220313/<region>/<service>/aws4_request"
    fn scope(&self, amz_date: &str) -> Result<String> {
        let scope = format!(
            "{}/{}/{}/{AWS4_REQUEST}",
            date_of(amz_date)?,
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");
        Ok(scope)
    }

    // StringToSign:
    //
    // AWS4-HMAC-SHA256
    // 20220313T072004Z
    // 20220313/<region>/<service>/aws4_request
    // <hashed_canonical_request>
    fn string_to_sign(&self, amz_date: &str, scope: &str, creq: &str) -> Result<String> {
        let mut f = String::new();
        writeln!(f, "{ALGORITHM}")?;
        writeln!(f, "{amz_date}")?;
        writeln!(f, "{scope}")?;
        write!(f, "{}", self.ctx.hex_sha256(creq.as_bytes())?)?;
        debug!("calculated string to sign: {f}");
        Ok(f)
    }

    fn signature(&self, amz_date: &str, string_to_sign: &str) -> Result<String> {
        let signing_key = generate_signing_key(
            &self.ctx,
            self.credential.secret_access_key(),
            date_of(amz_date)?,
            &self.region,
            &self.service,
        )?;
        self.ctx
            .hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())
    }
}

/// Presigned url along with the strings it was signed from.
#[derive(Debug, Clone)]
pub(crate) struct PresignedUrl {
    pub url: Uri,
    pub canonical_request: String,
    pub string_to_sign: String,
}

/// First 8 chars of an amz date: `20220313T072004Z` -> `20220313`.
fn date_of(amz_date: &str) -> Result<&str> {
    amz_date
        .get(..8)
        .ok_or_else(|| Error::request_invalid(format!("x-amz-date {amz_date} is too short")))
}

fn parse_url(url: &str) -> Result<Uri> {
    url.parse::<Uri>().map_err(|e| {
        Error::url_construction(format!("failed to parse presigned url {url}")).with_source(e)
    })
}

fn generate_signing_key(
    ctx: &Context,
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = ctx.hmac_sha256(secret.as_bytes(), date.as_bytes())?;
    // Sign region
    let sign_region = ctx.hmac_sha256(&sign_date, region.as_bytes())?;
    // Sign service
    let sign_service = ctx.hmac_sha256(&sign_region, service.as_bytes())?;
    // Sign request
    ctx.hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())
}
