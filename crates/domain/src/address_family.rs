use smallvec::SmallVec;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Longest canonical text form of any address (`INET6_ADDRSTRLEN`, NUL included).
pub const ADDR_TEXT_MAX: usize = 46;

/// Binary address payload as handed back by the resolver.
///
/// Four bytes for IPv4, sixteen for IPv6. The length is not checked here:
/// a formatter is expected to reject payloads that do not fit their family.
pub type RawAddress = SmallVec<[u8; 16]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Four-byte tag that prefixes every packed record.
    pub const fn tag(&self) -> &'static [u8; 4] {
        match self {
            AddressFamily::Ipv4 => b"IPv4",
            AddressFamily::Ipv6 => b"IPv6",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"IPv4" => Some(AddressFamily::Ipv4),
            b"IPv6" => Some(AddressFamily::Ipv6),
            _ => None,
        }
    }

    /// Payload length expected for this family.
    pub const fn payload_len(&self) -> usize {
        match self {
            AddressFamily::Ipv4 => 4,
            AddressFamily::Ipv6 => 16,
        }
    }

    /// Interpret `payload` as an address of this family.
    pub fn decode(&self, payload: &[u8]) -> Option<IpAddr> {
        match self {
            AddressFamily::Ipv4 => <[u8; 4]>::try_from(payload)
                .ok()
                .map(|octets| IpAddr::V4(Ipv4Addr::from(octets))),
            AddressFamily::Ipv6 => <[u8; 16]>::try_from(payload)
                .ok()
                .map(|octets| IpAddr::V6(Ipv6Addr::from(octets))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate produced by the name resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub family: AddressFamily,
    pub address: RawAddress,
}

impl Endpoint {
    pub fn new(family: AddressFamily, address: &[u8]) -> Self {
        Self {
            family,
            address: RawAddress::from_slice(address),
        }
    }

    pub fn v4(octets: [u8; 4]) -> Self {
        Self::new(AddressFamily::Ipv4, &octets)
    }

    pub fn v6(octets: [u8; 16]) -> Self {
        Self::new(AddressFamily::Ipv6, &octets)
    }

    pub fn to_ip_addr(&self) -> Option<IpAddr> {
        self.family.decode(&self.address)
    }
}

impl From<IpAddr> for Endpoint {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Endpoint::v4(v4.octets()),
            IpAddr::V6(v6) => Endpoint::v6(v6.octets()),
        }
    }
}
