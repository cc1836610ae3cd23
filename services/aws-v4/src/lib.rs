//! AWS SigV4 signer
//!
//! Sign requests in header mode with [`Signer::sign_request`], or build a
//! presigned url with [`Signer::presign_url`].
//!
//! ## Example
//!
//! ```
//! use awssign_aws_v4::{Credential, Signer};
//! use awssign_core::{Context, Method, SigningRequest};
//! use awssign_hash_compute_rustcrypto::RustCryptoHashCompute;
//!
//! # fn main() -> awssign_core::Result<()> {
//! let ctx = Context::new().with_hash_compute(RustCryptoHashCompute);
//! let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
//! let signer = Signer::new(ctx, "s3", "us-east-1", cred);
//!
//! let req = SigningRequest::new(Method::Get, "https://s3.amazonaws.com/bucket/key".parse()?);
//! let sig = signer.sign_request(&req)?;
//! assert!(sig.authorization().starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
//!
//! let url = signer.presign_url(&req, None, None)?;
//! assert!(url.query().unwrap_or_default().contains("X-Amz-Signature="));
//! # Ok(())
//! # }
//! ```

mod canonical;

mod config;
pub use config::Config;

mod constants;
pub use constants::DEFAULT_PRESIGN_EXPIRES;
pub use constants::UNSIGNED_PAYLOAD;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::Signer;

mod signature;
pub use signature::Signature;
