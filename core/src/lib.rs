//! Core components for signing AWS SigV4 requests.
//!
//! This crate provides the foundational types and traits shared by the
//! awssign crates. It knows nothing about the signing protocol itself.
//!
//! ## Overview
//!
//! - **Context**: A container that holds the injected capabilities, the hash
//!   implementation and the environment access
//! - **HashCompute**: The abstract hashing capability (SHA256 and HMAC-SHA256)
//! - **SigningRequest**: The immutable description of a request to be signed
//!
//! ## Example
//!
//! ```
//! use awssign_core::{Context, HashCompute, Method, Result, SigningRequest};
//!
//! // Any conformant hash provider can be injected.
//! #[derive(Debug)]
//! struct MyHash;
//!
//! impl HashCompute for MyHash {
//!     fn sha256(&self, content: &[u8]) -> Result<Vec<u8>> {
//!         todo!()
//!     }
//!
//!     fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>> {
//!         todo!()
//!     }
//! }
//!
//! let ctx = Context::new().with_hash_compute(MyHash);
//! let req = SigningRequest::new(
//!     Method::Get,
//!     "https://example.amazonaws.com/".parse().unwrap(),
//! );
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hash capability trait and helpers
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub use hash::HashCompute;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, NoopEnv, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::{Method, SigningRequest};
