//! Cases from the official AWS SigV4 test suite.
//!
//! The suite is generated without the `x-amz-content-sha256` header, so the
//! signer is built with the checksum header disabled.

use super::{init_signing_test, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use anyhow::Result;
use awssign_aws_v4::{Credential, Signer};
use awssign_core::{Method, SigningRequest};
use percent_encoding::{utf8_percent_encode, CONTROLS};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use test_case::test_case;

fn read_fixture(case: &str, ext: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata/aws-sig-v4-test-suite")
        .join(case)
        .join(format!("{case}.{ext}"));
    let content =
        fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {path:?} failed: {err}"));
    content.strip_suffix('\n').unwrap_or(&content).to_string()
}

/// Parse the raw http request of a `.req` file.
///
/// ```text
/// POST / HTTP/1.1
/// Host:example.amazonaws.com
/// X-Amz-Date:20150830T123600Z
///
/// Param1=value1
/// ```
fn parse_request(raw: &str) -> Result<SigningRequest> {
    let (head, body) = raw.split_once("\n\n").unwrap_or((raw, ""));
    let mut lines = head.lines();

    let request_line = lines.next().unwrap_or_default();
    let mut tokens = request_line.split(' ');
    let method: Method = tokens.next().unwrap_or_default().parse()?;
    let target = tokens.next().unwrap_or_default();

    let mut headers = BTreeMap::new();
    for line in lines {
        let (k, v) = line
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("invalid header line: {line}"))?;
        headers.insert(k.to_string(), v.to_string());
    }

    let host = headers
        .get("Host")
        .ok_or_else(|| anyhow::anyhow!("request has no host"))?;
    let url = format!("https://{host}{}", utf8_percent_encode(target, CONTROLS));

    let mut req = SigningRequest::new(method, url.parse()?).with_body(body.to_string());
    req.headers = headers;
    Ok(req)
}

/// Render the signed request the way `.sreq` files do.
fn render_signed_request(raw: &str, authorization: &str) -> String {
    match raw.split_once("\n\n") {
        Some((head, body)) => format!("{head}\nAuthorization: {authorization}\n\n{body}"),
        None => format!("{raw}\nAuthorization: {authorization}"),
    }
}

#[test_case("get-vanilla")]
#[test_case("get-vanilla-query-order-key-case")]
#[test_case("get-vanilla-empty-query-key")]
#[test_case("get-vanilla-query-unreserved")]
#[test_case("get-unreserved")]
#[test_case("get-utf8")]
#[test_case("post-vanilla")]
#[test_case("post-header-key-sort")]
#[test_case("post-x-www-form-urlencoded")]
#[test_case("post-sts-header-before")]
fn test_aws_sig_v4_suite(case: &str) {
    check_case(case).unwrap_or_else(|err| panic!("case {case} should pass: {err:?}"));
}

fn check_case(case: &str) -> Result<()> {
    let ctx = init_signing_test();

    let raw = read_fixture(case, "req");
    let req = parse_request(&raw)?;

    let mut cred = Credential::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY);
    if let Some(token) = req.headers.get("X-Amz-Security-Token") {
        cred = cred.with_session_token(token.as_str());
    }
    let signer = Signer::new(ctx, "service", "us-east-1", cred).with_checksum_header(false);

    let sig = signer.sign_request(&req)?;

    assert_eq!(sig.canonical_request(), read_fixture(case, "creq"));
    assert_eq!(sig.string_to_sign(), read_fixture(case, "sts"));
    assert_eq!(sig.authorization(), read_fixture(case, "authz"));
    assert_eq!(
        render_signed_request(&raw, sig.authorization()),
        read_fixture(case, "sreq")
    );
    Ok(())
}
