use crate::adapters::clock::SystemClock;
use crate::config::PoolConfig;
use crate::core::{Clock, DomainUsage, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique_entries};

const FALLBACK_MODULUS: i64 = 1000;

/// Ordered, immutable list of pre-registered subdomains. Earlier entries win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPool {
    domains: Vec<String>,
    fallback_prefix: String,
    base_domain: String,
}

impl DomainPool {
    /// Rejects blank or duplicate entries and a blank fallback prefix or base,
    /// so every name the allocator hands out is non-empty.
    pub fn new(
        domains: Vec<String>,
        fallback_prefix: impl Into<String>,
        base_domain: impl Into<String>,
    ) -> Result<Self> {
        let fallback_prefix = fallback_prefix.into();
        let base_domain = base_domain.into();

        validate_unique_entries("pool.domains", &domains)?;
        validate_non_empty_string("pool.fallback_prefix", &fallback_prefix)?;
        validate_non_empty_string("pool.base_domain", &base_domain)?;

        Ok(Self {
            domains,
            fallback_prefix,
            base_domain,
        })
    }

    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        Self::new(
            config.domains.clone(),
            config.fallback_prefix.clone(),
            config.base_domain.clone(),
        )
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn fallback_prefix(&self) -> &str {
        &self.fallback_prefix
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }
}

/// Hands out the first free pre-warmed domain, or a time-derived fallback.
pub struct DomainAllocator<U: DomainUsage, C: Clock> {
    pool: DomainPool,
    usage: U,
    clock: C,
}

impl<U: DomainUsage> DomainAllocator<U, SystemClock> {
    pub fn new(pool: DomainPool, usage: U) -> Self {
        Self::with_clock(pool, usage, SystemClock)
    }
}

impl<U: DomainUsage, C: Clock> DomainAllocator<U, C> {
    pub fn with_clock(pool: DomainPool, usage: U, clock: C) -> Self {
        Self { pool, usage, clock }
    }

    pub fn pool(&self) -> &DomainPool {
        &self.pool
    }

    /// Returns the first pool entry the usage predicate reports as free.
    ///
    /// When every entry is taken the result is `{prefix}{secs % 1000}.{base}`.
    /// That name is never checked against the predicate, so two fallback
    /// calls within the same second (or 1000 seconds apart) collide.
    pub fn acquire_domain(&self) -> String {
        for domain in self.pool.domains() {
            if self.usage.is_in_use(domain) {
                tracing::debug!("Domain {} is in use, trying next", domain);
                continue;
            }
            tracing::debug!("Acquired pre-warmed domain {}", domain);
            return domain.clone();
        }

        let fallback = self.fallback_domain();
        tracing::warn!(
            "All {} pre-warmed domains are in use, falling back to {}",
            self.pool.domains().len(),
            fallback
        );
        fallback
    }

    fn fallback_domain(&self) -> String {
        let secs = self.clock.now().timestamp();
        format!(
            "{}{}.{}",
            self.pool.fallback_prefix(),
            secs.rem_euclid(FALLBACK_MODULUS),
            self.pool.base_domain()
        )
    }
}
