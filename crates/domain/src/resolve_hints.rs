use serde::{Deserialize, Serialize};

/// Which address families the resolver is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyHint {
    #[default]
    Any,
    Ipv4,
    Ipv6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketKind {
    #[default]
    Stream,
    Datagram,
}

/// Lookup hints passed through to the host resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveHints {
    pub family: FamilyHint,
    pub socket: SocketKind,
}
