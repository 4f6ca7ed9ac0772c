pub mod address_formatter;
pub mod gai_resolver;

pub use address_formatter::{InetNtopFormatter, StdAddressFormatter};
pub use gai_resolver::GaiResolver;

use showip_application::use_cases::BuildAddressPoolUseCase;
use showip_domain::ResolverConfig;
use std::sync::Arc;

/// Pool builder wired to the host resolver and `inet_ntop`.
pub fn build_address_pool_use_case(config: &ResolverConfig) -> BuildAddressPoolUseCase {
    BuildAddressPoolUseCase::new(Arc::new(GaiResolver::new()), Arc::new(InetNtopFormatter::new()))
        .with_hints(config.hints())
}
