use showip_application::ports::{NameResolver, ResolveError, ResolvedEndpoints};
use showip_domain::{Endpoint, FamilyHint, ResolveHints, SocketKind};
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::ptr;
use tracing::{debug, trace};

/// Host resolver backed by `getaddrinfo(3)`.
///
/// Blocks the calling thread for the duration of the lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct GaiResolver;

impl GaiResolver {
    pub fn new() -> Self {
        Self
    }

    fn raw_hints(hints: &ResolveHints) -> libc::addrinfo {
        let mut raw: libc::addrinfo = unsafe { std::mem::zeroed() };
        raw.ai_family = match hints.family {
            FamilyHint::Any => libc::AF_UNSPEC,
            FamilyHint::Ipv4 => libc::AF_INET,
            FamilyHint::Ipv6 => libc::AF_INET6,
        };
        raw.ai_socktype = match hints.socket {
            SocketKind::Stream => libc::SOCK_STREAM,
            SocketKind::Datagram => libc::SOCK_DGRAM,
        };
        raw
    }
}

impl NameResolver for GaiResolver {
    fn resolve(
        &self,
        hostname: &str,
        hints: &ResolveHints,
    ) -> Result<Box<dyn ResolvedEndpoints>, ResolveError> {
        let node =
            CString::new(hostname).map_err(|_| ResolveError::InvalidName(hostname.to_string()))?;
        let raw_hints = Self::raw_hints(hints);
        let mut head: *mut libc::addrinfo = ptr::null_mut();

        let rc = unsafe { libc::getaddrinfo(node.as_ptr(), ptr::null(), &raw_hints, &mut head) };
        if rc != 0 {
            let message = gai_message(rc);
            debug!(hostname, code = rc, error = %message, "getaddrinfo failed");
            return Err(ResolveError::Lookup { code: rc, message });
        }

        Ok(Box::new(AddrInfoList { head }))
    }
}

fn gai_message(rc: libc::c_int) -> String {
    if rc == libc::EAI_SYSTEM {
        return std::io::Error::last_os_error().to_string();
    }
    let text = unsafe { libc::gai_strerror(rc) };
    if text.is_null() {
        return format!("getaddrinfo error {rc}");
    }
    unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
}

/// Owns the list returned by `getaddrinfo` and frees it on drop.
struct AddrInfoList {
    head: *mut libc::addrinfo,
}

impl ResolvedEndpoints for AddrInfoList {
    fn endpoints(&self) -> Box<dyn Iterator<Item = Endpoint> + '_> {
        Box::new(AddrInfoIter {
            cur: self.head,
            _list: PhantomData,
        })
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.head.is_null() {
            unsafe { libc::freeaddrinfo(self.head) };
        }
    }
}

struct AddrInfoIter<'a> {
    cur: *const libc::addrinfo,
    _list: PhantomData<&'a AddrInfoList>,
}

impl Iterator for AddrInfoIter<'_> {
    type Item = Endpoint;

    fn next(&mut self) -> Option<Endpoint> {
        while !self.cur.is_null() {
            // SAFETY: nodes stay valid until the owning list is dropped, and
            // the iterator cannot outlive that list.
            let info = unsafe { &*self.cur };
            self.cur = info.ai_next;

            match endpoint_from(info) {
                Some(endpoint) => return Some(endpoint),
                None => trace!(family = info.ai_family, "Skipping non-IP addrinfo entry"),
            }
        }
        None
    }
}

fn endpoint_from(info: &libc::addrinfo) -> Option<Endpoint> {
    if info.ai_addr.is_null() {
        return None;
    }

    match info.ai_family {
        libc::AF_INET => {
            let sin = unsafe { ptr::read_unaligned(info.ai_addr as *const libc::sockaddr_in) };
            Some(Endpoint::v4(sin.sin_addr.s_addr.to_ne_bytes()))
        }
        libc::AF_INET6 => {
            let sin6 = unsafe { ptr::read_unaligned(info.ai_addr as *const libc::sockaddr_in6) };
            Some(Endpoint::v6(sin6.sin6_addr.s6_addr))
        }
        _ => None,
    }
}
