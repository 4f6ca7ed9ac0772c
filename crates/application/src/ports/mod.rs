mod address_formatter;
mod name_resolver;

pub use address_formatter::{AddressFormatter, FormatError};
pub use name_resolver::{NameResolver, ResolveError, ResolvedEndpoints};
