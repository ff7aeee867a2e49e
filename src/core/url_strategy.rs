use crate::adapters::clock::SystemClock;
use crate::config::UrlConfig;
use crate::core::{AppDescriptor, Clock, DemoUrls, Result};
use crate::utils::validation::{validate_required_field, Validate};
use chrono::SecondsFormat;
use sha2::{Digest, Sha256};

/// Builds the load-balancer URL a demo deployment is reachable on right after
/// its stack comes up. DNS-based names are left out on purpose: propagation
/// is too slow for a live session.
#[derive(Debug)]
pub struct UrlStrategy<C: Clock> {
    config: UrlConfig,
    clock: C,
}

const DEMO_ID_MODULUS: i64 = 10_000;

impl UrlStrategy<SystemClock> {
    pub fn new(config: UrlConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> UrlStrategy<C> {
    /// Fails with `InvalidConfigValue` for a bad scheme, a blank host part, or
    /// a token length outside `1..=64`.
    pub fn with_clock(config: UrlConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    /// `.{region}.{domain_suffix}`, the part every resolved URL ends with.
    pub fn host_suffix(&self) -> String {
        format!(".{}.{}", self.config.region, self.config.domain_suffix)
    }

    pub fn resolve_url(&self, descriptor: &AppDescriptor) -> Result<String> {
        let app_name = validate_required_field("app_name", &descriptor.app_name)?;
        let url = format!(
            "{}://{}-{}-alb-{}{}",
            self.config.scheme,
            self.config.name_prefix,
            app_name,
            self.freshness_token(),
            self.host_suffix()
        );
        tracing::debug!("Resolved access point for {}: {}", app_name, url);
        Ok(url)
    }

    pub fn demo_urls(&self, descriptor: &AppDescriptor) -> Result<DemoUrls> {
        Ok(DemoUrls {
            immediate: self.resolve_url(descriptor)?,
        })
    }

    /// Short session label in the `demo1234` form.
    pub fn demo_id(&self) -> String {
        let secs = self.clock.now().timestamp();
        format!("demo{}", secs.rem_euclid(DEMO_ID_MODULUS))
    }

    /// Truncated hex SHA-256 of the current timestamp. Cosmetic only: two
    /// calls in the same nanosecond, or a prefix collision, repeat a token.
    pub fn freshness_token(&self) -> String {
        let stamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        let digest = Sha256::digest(stamp.as_bytes());
        let mut token: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        token.truncate(self.config.token_length);
        token
    }
}
