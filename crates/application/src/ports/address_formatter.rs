use showip_domain::AddressFamily;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("{len}-byte payload does not fit {family}")]
    PayloadLength { family: AddressFamily, len: usize },

    #[error("output buffer of {0} bytes is too small")]
    NoSpace(usize),

    #[error("{0}")]
    System(String),
}

/// Binary address to canonical text, `inet_ntop` style.
pub trait AddressFormatter: Send + Sync {
    /// Write the text form of `address` into `out` and return its length.
    /// No terminator is written.
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError>;
}
