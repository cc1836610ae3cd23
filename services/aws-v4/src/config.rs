use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION};
use awssign_core::Context;
use log::debug;

/// Config for aws signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// Extra header names that must not be signed.
    ///
    /// Names are case-insensitive. `authorization` and `x-amzn-trace-id` are
    /// always excluded and don't need to be listed here.
    pub unsigned_headers: Vec<String>,
    /// Whether to add the `x-amz-content-sha256` header while signing in header mode.
    ///
    /// Default to `true`.
    pub apply_checksum_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            unsigned_headers: Vec::new(),
            apply_checksum_header: true,
        }
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.region.is_none() {
            self.region = ctx
                .env_var(AWS_REGION)
                .or_else(|| ctx.env_var(AWS_DEFAULT_REGION))
                .filter(|v| !v.is_empty());
            if let Some(region) = &self.region {
                debug!("load region from env: {region}");
            }
        }

        self
    }
}
