#![allow(dead_code)]

use showip_application::ports::{
    AddressFormatter, FormatError, NameResolver, ResolveError, ResolvedEndpoints,
};
use showip_domain::{AddressFamily, Endpoint, ResolveHints};
use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Lookup result that records when it is dropped.
pub struct TrackedEndpoints {
    endpoints: Vec<Endpoint>,
    released: Arc<AtomicUsize>,
}

impl ResolvedEndpoints for TrackedEndpoints {
    fn endpoints(&self) -> Box<dyn Iterator<Item = Endpoint> + '_> {
        Box::new(self.endpoints.iter().cloned())
    }
}

impl Drop for TrackedEndpoints {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct StubResolver {
    hosts: Arc<Mutex<HashMap<String, Vec<Endpoint>>>>,
    calls: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    last_hints: Arc<Mutex<Option<ResolveHints>>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(self, hostname: &str, addrs: &[&str]) -> Self {
        let endpoints = addrs
            .iter()
            .map(|a| Endpoint::from(a.parse::<IpAddr>().unwrap()))
            .collect();
        self.with_endpoints(hostname, endpoints)
    }

    pub fn with_endpoints(self, hostname: &str, endpoints: Vec<Endpoint>) -> Self {
        self.hosts
            .lock()
            .unwrap()
            .insert(hostname.to_string(), endpoints);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn last_hints(&self) -> Option<ResolveHints> {
        *self.last_hints.lock().unwrap()
    }
}

impl NameResolver for StubResolver {
    fn resolve(
        &self,
        hostname: &str,
        hints: &ResolveHints,
    ) -> Result<Box<dyn ResolvedEndpoints>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_hints.lock().unwrap() = Some(*hints);

        match self.hosts.lock().unwrap().get(hostname) {
            Some(endpoints) => Ok(Box::new(TrackedEndpoints {
                endpoints: endpoints.clone(),
                released: self.released.clone(),
            })),
            None => Err(ResolveError::Lookup {
                code: -2,
                message: "Name or service not known".to_string(),
            }),
        }
    }
}

/// Formats with `std::net`, like the production std formatter.
#[derive(Clone, Default)]
pub struct TextFormatter {
    calls: Arc<AtomicUsize>,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressFormatter for TextFormatter {
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format_std(family, address, out)
    }
}

pub fn format_std(
    family: AddressFamily,
    address: &[u8],
    out: &mut [u8],
) -> Result<usize, FormatError> {
    let ip = match family {
        AddressFamily::Ipv4 => <[u8; 4]>::try_from(address).map(|o| IpAddr::V4(Ipv4Addr::from(o))),
        AddressFamily::Ipv6 => <[u8; 16]>::try_from(address).map(|o| IpAddr::V6(Ipv6Addr::from(o))),
    }
    .map_err(|_| FormatError::PayloadLength {
        family,
        len: address.len(),
    })?;

    let capacity = out.len();
    let mut cursor = std::io::Cursor::new(out);
    write!(cursor, "{}", ip).map_err(|_| FormatError::NoSpace(capacity))?;
    Ok(cursor.position() as usize)
}

/// Succeeds for the first `succeed_for` calls, then fails every call.
#[derive(Clone)]
pub struct FailingFormatter {
    succeed_for: usize,
    calls: Arc<AtomicUsize>,
}

impl FailingFormatter {
    pub fn after(succeed_for: usize) -> Self {
        Self {
            succeed_for,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn always() -> Self {
        Self::after(0)
    }
}

impl AddressFormatter for FailingFormatter {
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.succeed_for {
            return Err(FormatError::System("Address family not supported".to_string()));
        }
        format_std(family, address, out)
    }
}

/// Returns a longer text on every call after the first `stable_for`.
#[derive(Clone)]
pub struct GrowingFormatter {
    stable_for: usize,
    calls: Arc<AtomicUsize>,
}

impl GrowingFormatter {
    pub fn after(stable_for: usize) -> Self {
        Self {
            stable_for,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl AddressFormatter for GrowingFormatter {
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let len = format_std(family, address, out)?;
        if call < self.stable_for {
            return Ok(len);
        }
        out[len] = b'x';
        Ok(len + 1)
    }
}
