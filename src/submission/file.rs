use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{corpus_document, is_excluded, StoreError, SubmissionRecord, SubmissionStore};
use crate::document::Corpus;
use crate::types::identifiers::DocumentVersion;

pub const LOG_FORMAT_VERSION: &str = "1";
const LOG_FILE: &str = "log.json";
const TEXTS_DIR: &str = "texts";
const TEXT_NAME_LEN: usize = 16;

/// On-disk shape of `log.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionLog {
    pub format_version: String,
    pub updated_at: Option<DateTime<Utc>>, // informational only
    pub record_count: usize,
    pub records: Vec<SubmissionRecord>,
}

impl SubmissionLog {
    fn empty() -> Self {
        Self {
            format_version: LOG_FORMAT_VERSION.into(),
            updated_at: None,
            record_count: 0,
            records: Vec::new(),
        }
    }
}

/// Submission log persisted under a directory:
///
/// ```text
/// <root>/log.json            ordered records
/// <root>/texts/<hash>.txt    submitted texts, one file per distinct content
/// ```
///
/// Every file is written to a temporary path, synced, then renamed into place.
#[derive(Debug)]
pub struct FileSubmissionStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSubmissionStore {
    /// Open the store at `root`, creating an empty one if nothing is there yet.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(TEXTS_DIR))?;

        let store = Self {
            root,
            write_lock: Mutex::new(()),
        };
        // Surface a corrupt or foreign log at open time.
        store.read_log()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    fn text_path(&self, version: &DocumentVersion) -> Result<PathBuf, StoreError> {
        let digest = version
            .digest()
            .filter(|d| d.len() >= TEXT_NAME_LEN)
            .ok_or_else(|| StoreError::InvalidVersionFormat(version.as_str().to_string()))?;

        Ok(self
            .root
            .join(TEXTS_DIR)
            .join(format!("{}.txt", &digest[..TEXT_NAME_LEN])))
    }

    fn read_log(&self) -> Result<SubmissionLog, StoreError> {
        let f = match fs::File::open(self.log_path()) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SubmissionLog::empty()),
            Err(e) => return Err(e.into()),
        };
        let log: SubmissionLog = serde_json::from_reader(f)?;
        if log.format_version != LOG_FORMAT_VERSION {
            return Err(StoreError::UnsupportedFormat(log.format_version));
        }
        Ok(log)
    }

    fn read_text(&self, version: &DocumentVersion) -> Result<Option<String>, StoreError> {
        let path = self.text_path(version)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if DocumentVersion::from_content(text.as_bytes()) != *version {
            return Err(StoreError::HashMismatch(path.display().to_string()));
        }
        Ok(Some(text))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    let mut f = fs::File::create(&tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl SubmissionStore for FileSubmissionStore {
    fn append(&self, record: SubmissionRecord, text: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        if DocumentVersion::from_content(text.as_bytes()) != record.version {
            return Err(StoreError::HashMismatch(record.id.as_str().to_string()));
        }

        // Identical texts share one file.
        if self.read_text(&record.version)?.is_none() {
            write_atomic(&self.text_path(&record.version)?, text.as_bytes())?;
        }

        let mut log = self.read_log()?;
        log.records.push(record);
        log.record_count = log.records.len();
        log.updated_at = Some(Utc::now());

        let bytes = serde_json::to_vec_pretty(&log)?;
        write_atomic(&self.log_path(), &bytes)?;

        Ok(())
    }

    fn records(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(self.read_log()?.records)
    }

    fn corpus(&self, exclude_submitter: Option<&str>) -> Result<Corpus, StoreError> {
        let log = self.read_log()?;
        let mut corpus = Corpus::new();

        for record in log.records.iter().filter(|r| !is_excluded(r, exclude_submitter)) {
            match self.read_text(&record.version)? {
                Some(text) => corpus.push(corpus_document(record, text)),
                None => log::warn!(
                    "text for {} ({}) is missing, leaving it out of the corpus",
                    record.id.as_str(),
                    record.version.as_str()
                ),
            }
        }

        Ok(corpus)
    }
}
