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

//! Hash related traits.

use crate::{Error, Result};
use std::fmt::Debug;

/// HashCompute is the hashing capability used during the signing process.
///
/// awssign never implements the digest algorithms itself. Users inject an
/// implementation through [`crate::Context`], which makes it possible to
/// swap the crypto backend or to use fixed-output fakes in tests.
///
/// Implementations must tolerate concurrent calls: a signer is expected to be
/// shared across threads.
pub trait HashCompute: Debug + Send + Sync + 'static {
    /// SHA256 digest of the content, as raw bytes.
    fn sha256(&self, content: &[u8]) -> Result<Vec<u8>>;

    /// HMAC with SHA256 of the content under key, as raw bytes.
    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>>;
}

/// NoopHashCompute is a no-op implementation that always returns an error.
///
/// This is used when no hash implementation is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHashCompute;

impl HashCompute for NoopHashCompute {
    fn sha256(&self, _content: &[u8]) -> Result<Vec<u8>> {
        Err(Error::hash_failure(
            "sha256 not supported: no hash implementation configured",
        ))
    }

    fn hmac_sha256(&self, _key: &[u8], _content: &[u8]) -> Result<Vec<u8>> {
        Err(Error::hash_failure(
            "hmac-sha256 not supported: no hash implementation configured",
        ))
    }
}

/// Hex encode bytes in lower case.
pub fn hex_encode(content: &[u8]) -> String {
    hex::encode(content)
}
