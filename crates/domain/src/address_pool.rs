use std::net::IpAddr;

use crate::address_family::AddressFamily;
use crate::address_record::{
    AddressRecord, RecordDecodeError, RecordIter, RecordWriter, TAG_LEN,
};
use crate::errors::PoolError;

/// Size of the counter prefix of a self-contained [`PoolBlock`].
pub const HEADER_LEN: usize = 4;

/// Per-family record counters. Each family holds at most `u16::MAX` records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyCounts {
    pub v4: u16,
    pub v6: u16,
}

impl FamilyCounts {
    pub fn bump(&mut self, family: AddressFamily) -> Result<(), PoolError> {
        let slot = match family {
            AddressFamily::Ipv4 => &mut self.v4,
            AddressFamily::Ipv6 => &mut self.v6,
        };
        *slot = slot.checked_add(1).ok_or(PoolError::CounterOverflow {
            family: family.as_str(),
        })?;
        Ok(())
    }

    pub fn total(&self) -> usize {
        usize::from(self.v4) + usize::from(self.v6)
    }

    fn encode(&self) -> [u8; HEADER_LEN] {
        let [a, b] = self.v4.to_le_bytes();
        let [c, d] = self.v6.to_le_bytes();
        [a, b, c, d]
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            v4: u16::from_le_bytes([bytes[0], bytes[1]]),
            v6: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }
}

/// Header owned by the caller, with the record buffer attached to it.
///
/// The records belong to the header: they are released with
/// [`PoolHeader::release_records`] or when the header itself is dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolHeader {
    counts: FamilyCounts,
    records: Option<Box<[u8]>>,
}

impl PoolHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve exactly `records_len` bytes for a record buffer.
    pub fn allocate_records(records_len: usize) -> Result<Vec<u8>, PoolError> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(records_len)
            .map_err(|_| PoolError::RecordAllocation { bytes: records_len })?;
        Ok(records)
    }

    /// Replace counters and records in one step.
    pub fn attach(&mut self, counts: FamilyCounts, records: Vec<u8>) {
        self.counts = counts;
        self.records = Some(records.into_boxed_slice());
    }

    /// Detach the record buffer and reset the counters.
    pub fn release_records(&mut self) -> Option<Box<[u8]>> {
        self.counts = FamilyCounts::default();
        self.records.take()
    }

    pub fn counts(&self) -> FamilyCounts {
        self.counts
    }

    pub fn count_v4(&self) -> u16 {
        self.counts.v4
    }

    pub fn count_v6(&self) -> u16 {
        self.counts.v6
    }

    pub fn has_records(&self) -> bool {
        self.records.is_some()
    }

    pub fn records(&self) -> &[u8] {
        self.records.as_deref().unwrap_or_default()
    }
}

/// Self-contained pool: counter prefix and records in a single allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolBlock {
    bytes: Box<[u8]>,
}

/// A reserved [`PoolBlock`] still being filled.
///
/// Only [`PoolBlock::allocate`] creates one, so the counter prefix is always
/// in place when [`PoolBlock::seal`] stamps it.
#[derive(Debug)]
pub struct UnsealedBlock {
    bytes: Vec<u8>,
    records_len: usize,
}

impl UnsealedBlock {
    /// Appender for the record area, bounded by the reserved length.
    pub fn writer(&mut self) -> RecordWriter<'_> {
        let written = self.bytes.len() - HEADER_LEN;
        let budget = self.records_len.saturating_sub(written);
        RecordWriter::new(&mut self.bytes, budget)
    }

    pub fn records(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }
}

impl PoolBlock {
    /// Reserve a block for `records_len` record bytes with a zeroed header
    /// already in place.
    pub fn allocate(records_len: usize) -> Result<UnsealedBlock, PoolError> {
        let total = HEADER_LEN
            .checked_add(records_len)
            .ok_or(PoolError::PoolAllocation { bytes: records_len })?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(total)
            .map_err(|_| PoolError::PoolAllocation { bytes: total })?;
        bytes.extend_from_slice(&[0; HEADER_LEN]);
        Ok(UnsealedBlock { bytes, records_len })
    }

    /// Stamp the counters into the prefix and freeze the block.
    pub fn seal(block: UnsealedBlock, counts: FamilyCounts) -> Self {
        let mut bytes = block.bytes;
        bytes[..HEADER_LEN].copy_from_slice(&counts.encode());
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    pub fn counts(&self) -> FamilyCounts {
        FamilyCounts::decode(&self.bytes[..HEADER_LEN])
    }

    pub fn records(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Whole block, counter prefix included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A filled pool, tagged with who owns the header.
#[derive(Debug)]
pub enum AddressPool<'h> {
    /// Built without a header: the pool owns everything and frees it on drop.
    Owned(PoolBlock),
    /// Built into a caller-supplied header that now holds the records.
    Attached(&'h mut PoolHeader),
}

impl AddressPool<'_> {
    pub fn counts(&self) -> FamilyCounts {
        match self {
            AddressPool::Owned(block) => block.counts(),
            AddressPool::Attached(header) => header.counts(),
        }
    }

    pub fn count_v4(&self) -> u16 {
        self.counts().v4
    }

    pub fn count_v6(&self) -> u16 {
        self.counts().v6
    }

    pub fn len(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, AddressPool::Owned(_))
    }

    pub fn records(&self) -> &[u8] {
        match self {
            AddressPool::Owned(block) => block.records(),
            AddressPool::Attached(header) => header.records(),
        }
    }

    pub fn records_iter(&self) -> RecordIter<'_> {
        RecordIter::new(self.records())
    }

    pub fn to_ip_addrs(&self) -> Result<Vec<IpAddr>, RecordDecodeError> {
        let mut out = Vec::with_capacity(self.len());
        let mut offset = 0;
        for record in self.records_iter() {
            let record: AddressRecord<'_> = record?;
            let ip = record
                .to_ip_addr()
                .ok_or(RecordDecodeError::InvalidAddress(offset + TAG_LEN))?;
            offset += record.encoded_len();
            out.push(ip);
        }
        Ok(out)
    }
}
