use crate::core::DomainUsage;
use std::collections::HashSet;

/// Stand-in for the shared store: every domain is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInUse;

impl DomainUsage for NeverInUse {
    fn is_in_use(&self, _domain: &str) -> bool {
        false
    }
}

/// Fixed set of taken domains, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsage {
    taken: HashSet<String>,
}

impl InMemoryUsage {
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }
}

impl DomainUsage for InMemoryUsage {
    fn is_in_use(&self, domain: &str) -> bool {
        self.taken.contains(domain)
    }
}
