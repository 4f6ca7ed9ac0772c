//! showip domain layer: address records, pools and error reporting.
pub mod address_family;
pub mod address_pool;
pub mod address_record;
pub mod config;
pub mod error_record;
pub mod errors;
pub mod resolve_hints;

pub use address_family::{AddressFamily, Endpoint, RawAddress, ADDR_TEXT_MAX};
pub use address_pool::{
    AddressPool, FamilyCounts, PoolBlock, PoolHeader, UnsealedBlock, HEADER_LEN,
};
pub use address_record::{
    AddressRecord, RecordDecodeError, RecordIter, RecordWriter, RecordWriterError, TAG_LEN,
};
pub use config::{CliOverrides, Config, ConfigError, LogFormat, LoggingConfig, ResolverConfig};
pub use error_record::{report, ErrorRecord, ERR_MSG_MAX};
pub use errors::PoolError;
pub use resolve_hints::{FamilyHint, ResolveHints, SocketKind};
