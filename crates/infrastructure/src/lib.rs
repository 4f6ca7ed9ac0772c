pub mod logging;
pub mod system;

pub use logging::init_logging;
pub use system::{build_address_pool_use_case, GaiResolver, InetNtopFormatter, StdAddressFormatter};
