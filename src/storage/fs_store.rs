use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossbeam::atomic::AtomicCell;
use log::{debug, warn};

use crate::storage::config::Config;
use crate::storage::record::Record;
use crate::storage::{utils, ReadOutcome};

/// File-backed store for expiring session records, one file per record,
/// file name equal to the record id.
///
/// Expiry and corruption policy live in a single read path that both
/// `read` and `sweep` go through, so batch cleanup can never diverge from
/// per-record semantics.
pub struct FileStore {
    conf: Config,
    // epoch seconds; 0 forces a sweep on the first directory access
    next_sweep: AtomicCell<u64>,
}

impl FileStore {
    pub fn open(conf: Config) -> anyhow::Result<FileStore> {
        ensure_writable_dir(&conf.path)?;

        Ok(FileStore {
            conf,
            next_sweep: AtomicCell::new(0),
        })
    }

    /// New unpersisted record carrying the store's default timeout. Nothing
    /// touches disk until `write`.
    pub fn create(&self, id: impl Into<String>) -> Record {
        Record::new(id, self.conf.default_timeout_secs)
    }

    pub fn set_storage_directory(&mut self, path: impl Into<PathBuf>) -> anyhow::Result<()> {
        let path = path.into();
        ensure_writable_dir(&path)?;

        self.conf.path = path;
        // make the next directory access run a cleanup pass
        self.next_sweep.store(utils::timestamp());

        Ok(())
    }

    // A write can race a concurrent expiry deletion of the same id;
    // whichever filesystem operation lands last wins. Callers needing
    // read-modify-write atomicity must serialize per id themselves.
    pub fn write(&self, record: &Record) -> anyhow::Result<()> {
        let dir = self.storage_dir();
        let path = dir.join(record.id());

        let mut file = utils::open_file_for_write(&dir, record.id())
            .with_context(|| format!("record file open failed @ {}", path.display()))?;
        file.write_all(&record.encode())
            .with_context(|| format!("record file write failed @ {}", path.display()))?;
        file.flush()?;
        if self.conf.sync_on_write {
            file.sync_data()?;
        }

        Ok(())
    }

    /// Looks a record up by id, enforcing expiry and corruption policy on
    /// the way. Every read-side anomaly degrades to `None`; only `write`
    /// can surface an error. The returned record's last-access time is
    /// refreshed in memory only; callers must `write` it back if they want
    /// the bump durable.
    pub fn read(&self, id: &str) -> Option<Record> {
        match self.read_file(id) {
            ReadOutcome::Found(mut record) => {
                record.touch(utils::timestamp());
                Some(record)
            }
            ReadOutcome::NotFound | ReadOutcome::Corrupt => None,
        }
    }

    /// Best-effort removal; a missing file is a no-op and a failed removal
    /// is only logged.
    pub fn delete(&self, id: &str) {
        let path = self.storage_dir().join(id);
        if !path.exists() {
            return;
        }

        if let Err(e) = fs::remove_file(&path) {
            warn!("failed to delete record file @ {}, record may not be deleted: {}", path.display(), e);
        }
    }

    /// Applies the read-path expiry/corruption checks to every regular file
    /// in the storage directory, discarding the results.
    pub fn sweep(&self) {
        let dir = self.storage_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("storage directory listing failed @ {}: {}", dir.display(), e);
                return;
            }
        };

        debug!("sweeping storage directory @ {}", dir.display());
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match path.file_name().and_then(OsStr::to_str) {
                // expiry and corruption handling happen inside the read
                Some(id) => {
                    self.read_file(id);
                }
                None => warn!("skipping non-utf8 file name @ {}", path.display()),
            }
        }
    }

    fn read_file(&self, id: &str) -> ReadOutcome {
        let path = self.storage_dir().join(id);
        if !path.is_file() {
            warn!("record file @ {} is not a file", path.display());
            return ReadOutcome::NotFound;
        }

        let buf = match fs::read(&path) {
            Ok(buf) => buf,
            Err(e) => {
                warn!("record file read failed @ {}: {}", path.display(), e);
                if self.conf.clean_unreadable {
                    self.delete(id);
                }
                return ReadOutcome::Corrupt;
            }
        };

        let record = match Record::decode(&buf) {
            Ok(record) => record,
            Err(e) => {
                warn!("record decode failed @ {}: {}", path.display(), e);
                if self.conf.clean_unreadable {
                    self.delete(id);
                }
                return ReadOutcome::Corrupt;
            }
        };

        if record.id() != id {
            warn!("record with wrong id {} @ {}", record.id(), path.display());
            self.delete(id);
            return ReadOutcome::Corrupt;
        }

        if record.is_expired() {
            debug!("record {} expired, removing", id);
            self.delete(id);
            return ReadOutcome::NotFound;
        }

        ReadOutcome::Found(record)
    }

    // Every operation resolves the directory through here, which couples
    // "first access after open/reconfiguration" to a cleanup pass.
    fn storage_dir(&self) -> PathBuf {
        let path = self.conf.path.clone();
        if !path.is_dir() {
            if let Err(e) = fs::create_dir_all(&path) {
                warn!("storage directory creation failed @ {}: {}", path.display(), e);
            }
        }

        if self.conf.clean_expired_on_startup && self.sweep_due() {
            self.sweep();
        }

        path
    }

    // The deadline advances before the sweep runs, so the sweep's own
    // directory accesses cannot re-trigger it. A lost exchange means
    // another caller took this window's sweep.
    fn sweep_due(&self) -> bool {
        let now = utils::timestamp();
        let deadline = self.next_sweep.load();

        deadline < now
            && self
                .next_sweep
                .compare_exchange(deadline, now + self.conf.default_timeout_secs)
                .is_ok()
    }
}

fn ensure_writable_dir(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .with_context(|| format!("path '{}' is not a directory and could not be created", path.display()))?;
    }

    // the directory may exist but not accept writes from this process
    let probe = path.join(".write-probe");
    fs::write(&probe, b"")
        .with_context(|| format!("path '{}' is not writable", path.display()))?;
    let _ = fs::remove_file(&probe);

    Ok(())
}
