use showip_application::ports::{AddressFormatter, FormatError};
use showip_domain::{AddressFamily, ADDR_TEXT_MAX};
use std::ffi::CStr;
use std::io::Write;

// The libc crate exposes the sockaddr types but not inet_ntop(3) itself.
extern "C" {
    fn inet_ntop(
        af: libc::c_int,
        src: *const libc::c_void,
        dst: *mut libc::c_char,
        size: libc::socklen_t,
    ) -> *const libc::c_char;
}

fn check_payload(family: AddressFamily, address: &[u8]) -> Result<(), FormatError> {
    if address.len() != family.payload_len() {
        return Err(FormatError::PayloadLength {
            family,
            len: address.len(),
        });
    }
    Ok(())
}

/// Formats addresses with the C library's `inet_ntop(3)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InetNtopFormatter;

impl InetNtopFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl AddressFormatter for InetNtopFormatter {
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError> {
        check_payload(family, address)?;

        let mut text = [0 as libc::c_char; ADDR_TEXT_MAX];
        let ret = match family {
            AddressFamily::Ipv4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(address);
                let addr = libc::in_addr {
                    s_addr: u32::from_ne_bytes(octets),
                };
                unsafe {
                    inet_ntop(
                        libc::AF_INET,
                        &addr as *const libc::in_addr as *const libc::c_void,
                        text.as_mut_ptr(),
                        text.len() as libc::socklen_t,
                    )
                }
            }
            AddressFamily::Ipv6 => {
                let mut addr: libc::in6_addr = unsafe { std::mem::zeroed() };
                addr.s6_addr.copy_from_slice(address);
                unsafe {
                    inet_ntop(
                        libc::AF_INET6,
                        &addr as *const libc::in6_addr as *const libc::c_void,
                        text.as_mut_ptr(),
                        text.len() as libc::socklen_t,
                    )
                }
            }
        };

        if ret.is_null() {
            return Err(FormatError::System(
                std::io::Error::last_os_error().to_string(),
            ));
        }

        let text = unsafe { CStr::from_ptr(text.as_ptr()) }.to_bytes();
        let capacity = out.len();
        let dst = out
            .get_mut(..text.len())
            .ok_or(FormatError::NoSpace(capacity))?;
        dst.copy_from_slice(text);
        Ok(text.len())
    }
}

/// Formats addresses with `std::net` display rules (RFC 5952 for IPv6).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdAddressFormatter;

impl StdAddressFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl AddressFormatter for StdAddressFormatter {
    fn format(
        &self,
        family: AddressFamily,
        address: &[u8],
        out: &mut [u8],
    ) -> Result<usize, FormatError> {
        check_payload(family, address)?;
        let ip = family.decode(address).ok_or(FormatError::PayloadLength {
            family,
            len: address.len(),
        })?;

        let capacity = out.len();
        let mut cursor = std::io::Cursor::new(out);
        write!(cursor, "{ip}").map_err(|_| FormatError::NoSpace(capacity))?;
        Ok(cursor.position() as usize)
    }
}
