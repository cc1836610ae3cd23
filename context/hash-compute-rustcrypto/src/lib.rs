// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! RustCrypto based hash implementation for awssign.
//!
//! This crate provides `RustCryptoHashCompute`, which implements the
//! `HashCompute` trait from `awssign_core` using the `sha2` and `hmac` crates.
//!
//! ## Example
//!
//! ```
//! use awssign_core::Context;
//! use awssign_hash_compute_rustcrypto::RustCryptoHashCompute;
//!
//! let ctx = Context::new().with_hash_compute(RustCryptoHashCompute);
//!
//! let digest = ctx.hex_sha256(b"").unwrap();
//! assert_eq!(
//!     digest,
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```

use awssign_core::{Error, HashCompute, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// RustCrypto based implementation of the `HashCompute` trait.
///
/// The type is stateless, so it is safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoHashCompute;

impl HashCompute for RustCryptoHashCompute {
    fn sha256(&self, content: &[u8]) -> Result<Vec<u8>> {
        Ok(Sha256::digest(content).to_vec())
    }

    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>> {
        let mut h = Hmac::<Sha256>::new_from_slice(key)
            .map_err(|e| Error::hash_failure(format!("failed to build hmac from key: {e}")))?;
        h.update(content);

        Ok(h.finalize().into_bytes().to_vec())
    }
}
