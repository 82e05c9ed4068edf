mod storage;
mod error;

pub use storage::{Config, FileStore, Record};
pub use error::StoreError;
