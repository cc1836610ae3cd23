use super::{request, test_signer, AMZ_DATE};
use anyhow::Result;
use awssign_core::Method;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pretty_assertions::assert_eq;

#[test]
fn test_head_object_with_special_characters() -> Result<()> {
    let signer = test_signer("s3", None);
    let url = format!(
        "https://example.amazonaws.com/bucket/{}",
        utf8_percent_encode("!@#$%^&*()_+-=;:'><,/?.txt", NON_ALPHANUMERIC)
    );
    let req = request(Method::Head, &url).with_header("X-Amz-Date", AMZ_DATE);

    let sig = signer.sign_request(&req)?;

    assert_eq!(
        sig.canonical_request(),
        "HEAD\n\
         /bucket/%21%40%23%24%25%5E%26%2A%28%29_%2B-%3D%3B%3A%27%3E%3C%2C/%3F.txt\n\
         \n\
         host:example.amazonaws.com\n\
         x-amz-content-sha256:UNSIGNED-PAYLOAD\n\
         x-amz-date:20150830T123600Z\n\
         \n\
         host;x-amz-content-sha256;x-amz-date\n\
         UNSIGNED-PAYLOAD"
    );
    assert!(sig.authorization().ends_with(
        "Signature=1d7f132cd55207a3896dbbd1bb55aa60dea4cac35083c861ee9065b3164bb5c4"
    ));
    Ok(())
}

#[test]
fn test_list_objects_with_encoded_characters() -> Result<()> {
    let signer = test_signer("s3", None);
    let url = "https://example.amazonaws.com/bucket/%E4%B8%AD%E6%96%87/a%20b.txt\
               ?prefix=a%2Fb&delimiter=%2F&encoding-type=url";
    let req = request(Method::Get, url).with_header("X-Amz-Date", AMZ_DATE);

    let sig = signer.sign_request(&req)?;

    assert_eq!(
        sig.canonical_request(),
        "GET\n\
         /bucket/%E4%B8%AD%E6%96%87/a%20b.txt\n\
         delimiter=%2F&encoding-type=url&prefix=a%2Fb\n\
         host:example.amazonaws.com\n\
         x-amz-content-sha256:UNSIGNED-PAYLOAD\n\
         x-amz-date:20150830T123600Z\n\
         \n\
         host;x-amz-content-sha256;x-amz-date\n\
         UNSIGNED-PAYLOAD"
    );
    assert!(sig.authorization().ends_with(
        "Signature=9232f30017aa316e5e7f6e317574d2fba6619ca1b6448af21f362556be8f702b"
    ));
    Ok(())
}

#[test]
fn test_encoded_and_plain_path_sign_the_same() -> Result<()> {
    let signer = test_signer("s3", None);

    let plain = request(Method::Get, "https://example.amazonaws.com/bucket/a-b_c.txt")
        .with_header("X-Amz-Date", AMZ_DATE);
    let encoded = request(
        Method::Get,
        "https://example.amazonaws.com/bucket/a%2Db%5Fc%2Etxt",
    )
    .with_header("X-Amz-Date", AMZ_DATE);

    assert_eq!(
        signer.sign_request(&plain)?.authorization(),
        signer.sign_request(&encoded)?.authorization()
    );
    Ok(())
}
