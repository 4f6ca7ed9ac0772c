use crate::ports::{AddressFormatter, NameResolver, ResolvedEndpoints};
use showip_domain::address_record::record_len;
use showip_domain::{
    AddressPool, ErrorRecord, FamilyCounts, PoolBlock, PoolError, PoolHeader, RecordWriter,
    ResolveHints, ADDR_TEXT_MAX,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sizes gathered by the first pass over a lookup result.
#[derive(Debug, Default, Clone, Copy)]
struct Measurement {
    bytes: usize,
    counts: FamilyCounts,
}

/// Resolves a hostname and packs every address into one record buffer.
///
/// The lookup result is walked twice: once to size the buffer exactly, once
/// to fill it. Both walks see the same endpoints in the same order, the
/// hostname is never resolved a second time.
pub struct BuildAddressPoolUseCase {
    resolver: Arc<dyn NameResolver>,
    formatter: Arc<dyn AddressFormatter>,
    hints: ResolveHints,
}

impl BuildAddressPoolUseCase {
    pub fn new(resolver: Arc<dyn NameResolver>, formatter: Arc<dyn AddressFormatter>) -> Self {
        Self {
            resolver,
            formatter,
            hints: ResolveHints::default(),
        }
    }

    pub fn with_hints(mut self, hints: ResolveHints) -> Self {
        self.hints = hints;
        self
    }

    /// Without a header the pool is self-contained. With one, only the record
    /// buffer is allocated and attached to it; the header keeps its previous
    /// contents if the build fails.
    pub fn execute<'h>(
        &self,
        header: Option<&'h mut PoolHeader>,
        hostname: Option<&str>,
    ) -> Result<AddressPool<'h>, PoolError> {
        let hostname = match hostname {
            Some(name) if !name.is_empty() => name,
            _ => {
                warn!("Refusing to resolve an empty hostname");
                return Err(PoolError::InvalidHostname);
            }
        };

        let resolved = self.resolver.resolve(hostname, &self.hints).map_err(|e| {
            warn!(hostname, error = %e, "Hostname resolution failed");
            PoolError::Resolution {
                reason: e.to_string(),
            }
        })?;

        let measured = self.measure(resolved.as_ref())?;
        debug!(
            hostname,
            v4 = measured.counts.v4,
            v6 = measured.counts.v6,
            bytes = measured.bytes,
            "Address pool measured"
        );

        let pool = match header {
            None => {
                let mut block = PoolBlock::allocate(measured.bytes)?;
                let counts = self.fill(resolved.as_ref(), block.writer())?;
                AddressPool::Owned(PoolBlock::seal(block, counts))
            }
            Some(header) => {
                let mut records = PoolHeader::allocate_records(measured.bytes)?;
                let writer = RecordWriter::new(&mut records, measured.bytes);
                let counts = self.fill(resolved.as_ref(), writer)?;
                header.attach(counts, records);
                AddressPool::Attached(header)
            }
        };

        debug!(
            hostname,
            owned = pool.is_owned(),
            records = pool.len(),
            "Address pool filled"
        );
        Ok(pool)
    }

    /// Same as [`execute`](Self::execute), additionally mirroring a failure
    /// into `err`.
    pub fn execute_reporting<'h>(
        &self,
        header: Option<&'h mut PoolHeader>,
        hostname: Option<&str>,
        err: Option<&mut ErrorRecord>,
    ) -> Result<AddressPool<'h>, PoolError> {
        let result = self.execute(header, hostname);
        if let Err(e) = &result {
            e.report_into(err);
        }
        result
    }

    fn measure(&self, resolved: &dyn ResolvedEndpoints) -> Result<Measurement, PoolError> {
        let mut scratch = [0u8; ADDR_TEXT_MAX];
        let mut measured = Measurement::default();

        for endpoint in resolved.endpoints() {
            let len = self
                .formatter
                .format(endpoint.family, &endpoint.address, &mut scratch)
                .map_err(|e| {
                    warn!(family = %endpoint.family, error = %e, "Address formatting failed while measuring");
                    PoolError::MeasureFormat {
                        reason: e.to_string(),
                    }
                })?;

            if len > scratch.len() {
                return Err(PoolError::MeasureFormat {
                    reason: format!("formatter reported {len} bytes"),
                });
            }

            measured.counts.bump(endpoint.family)?;
            measured.bytes += record_len(len);
        }

        Ok(measured)
    }

    fn fill(
        &self,
        resolved: &dyn ResolvedEndpoints,
        mut writer: RecordWriter<'_>,
    ) -> Result<FamilyCounts, PoolError> {
        let fill_error = |reason: String| {
            warn!(reason = %reason, "Address pool fill aborted");
            PoolError::FillFormat { reason }
        };

        let mut scratch = [0u8; ADDR_TEXT_MAX];
        let mut counts = FamilyCounts::default();

        for endpoint in resolved.endpoints() {
            counts.bump(endpoint.family)?;

            let len = self
                .formatter
                .format(endpoint.family, &endpoint.address, &mut scratch)
                .map_err(|e| fill_error(e.to_string()))?;
            let text = scratch
                .get(..len)
                .ok_or_else(|| fill_error(format!("formatter reported {len} bytes")))?;

            writer
                .push(endpoint.family, text)
                .map_err(|e| fill_error(e.to_string()))?;
        }

        if !writer.is_full() {
            return Err(fill_error(format!(
                "{} measured bytes left unwritten",
                writer.remaining()
            )));
        }

        Ok(counts)
    }
}
