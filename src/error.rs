use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record truncated")]
    Truncated,

    #[error("unsupported record version: {0}")]
    UnsupportedVersion(u8),

    #[error("record checksum mismatch")]
    ChecksumMismatch,

    #[error("record contains invalid utf-8")]
    BadUtf8,
}
