use std::collections::HashMap;
use std::mem::size_of;

pub use config::Config;
pub use fs_store::FileStore;
pub use record::Record;

mod config;
mod fs_store;
mod record;
mod utils;

// [ver|crc|idsz|id|accessed|timeout|nattrs|(ksz|key|vsz|val)*]

pub(crate) const RECORD_VERSION: u8 = 1;

pub(crate) const VERSION_SIZE: usize = size_of::<u8>();
pub(crate) const CRC_SIZE: usize = size_of::<u32>();

pub(crate) const CRC_OFFSET: usize = VERSION_SIZE;
// the checksum covers every byte from here on; the version byte stays
// outside so it can be inspected before anything else is trusted
pub(crate) const BODY_OFFSET: usize = CRC_OFFSET + CRC_SIZE;

pub(crate) type Attributes = HashMap<String, Vec<u8>>;

/// What a single record file turned out to hold. Collapsed to
/// `Option<Record>` at the public boundary; the distinction only feeds logs.
pub(crate) enum ReadOutcome {
    Found(Record),
    NotFound,
    Corrupt,
}
