use showip_domain::{Endpoint, ResolveHints};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid hostname: {0}")]
    InvalidName(String),

    #[error("Lookup failed ({code}): {message}")]
    Lookup { code: i32, message: String },
}

/// Result of one lookup.
///
/// Can be walked any number of times and always yields endpoints in the
/// order the resolver produced them. Whatever the lookup holds on to is
/// released when the value is dropped.
pub trait ResolvedEndpoints {
    fn endpoints(&self) -> Box<dyn Iterator<Item = Endpoint> + '_>;
}

impl ResolvedEndpoints for Vec<Endpoint> {
    fn endpoints(&self) -> Box<dyn Iterator<Item = Endpoint> + '_> {
        Box::new(self.iter().cloned())
    }
}

/// Blocking hostname lookup against the host resolver.
pub trait NameResolver: Send + Sync {
    fn resolve(
        &self,
        hostname: &str,
        hints: &ResolveHints,
    ) -> Result<Box<dyn ResolvedEndpoints>, ResolveError>;
}
