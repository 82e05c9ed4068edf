use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn open_file_for_write<P>(dir: P, file_name: &str) -> anyhow::Result<fs::File> where P: AsRef<Path> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dir.as_ref().join(file_name))?;

    Ok(file)
}

#[inline]
pub(crate) fn timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}
