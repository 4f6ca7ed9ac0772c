use serde::{Deserialize, Serialize};

use crate::resolve_hints::{FamilyHint, ResolveHints, SocketKind};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub family: FamilyHint,

    #[serde(default)]
    pub socket_type: SocketKind,
}

impl ResolverConfig {
    pub fn hints(&self) -> ResolveHints {
        ResolveHints {
            family: self.family,
            socket: self.socket_type,
        }
    }
}
