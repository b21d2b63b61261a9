//! Persistence for the issueflow document.
//!
//! The whole `{ users, issues }` document is read on every query and
//! replaced on every write. There are no partial updates.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{IssueFlowError, Result};
use crate::model::Document;
use crate::seed;

/// Whole-document storage.
pub trait Store {
    /// Read the document, seeding storage with the bundled default when it is
    /// missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if storage cannot be read or seeded.
    fn load(&self) -> Result<Document>;

    /// Replace the persisted document.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write fails.
    fn save(&self, document: &Document) -> Result<()>;

    /// Overwrite storage with the bundled default and return it.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write fails.
    fn reset(&self) -> Result<Document> {
        let document = seed::default_document()?;
        self.save(&document)?;
        Ok(document)
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn load(&self) -> Result<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> Result<()> {
        (**self).save(document)
    }

    fn reset(&self) -> Result<Document> {
        (**self).reset()
    }
}

// ============================================================================
// JSON file
// ============================================================================

/// Document stored as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn seed(&self) -> Result<Document> {
        tracing::info!(path = %self.path.display(), "Seeding store with default dataset");
        self.reset()
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Document> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.seed(),
            Err(e) => return Err(IssueFlowError::persistence(&self.path, e)),
        };

        match serde_json::from_str::<Document>(&contents) {
            Ok(document) => {
                tracing::debug!(
                    path = %self.path.display(),
                    issues = document.issues.len(),
                    "Loaded document"
                );
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored document is unreadable; re-seeding"
                );
                self.seed()
            }
        }
    }

    /// Writes to a sibling temp file, then renames it over the target.
    fn save(&self, document: &Document) -> Result<()> {
        write_atomic(&self.path, document)
            .map_err(|e| IssueFlowError::persistence(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            issues = document.issues.len(),
            "Saved document"
        );
        Ok(())
    }
}

fn write_atomic(path: &Path, document: &Document) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(document)?;
    let tmp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)
}

// ============================================================================
// In memory
// ============================================================================

/// Store that keeps the serialized document in memory.
///
/// Holding JSON rather than a `Document` keeps load/save semantics identical
/// to the file store, including re-seeding on unreadable content.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// An empty store; the first `load` seeds it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `document`.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the document cannot be serialized.
    pub fn with_document(document: &Document) -> Result<Self> {
        let store = Self::new();
        store.raw.replace(Some(serde_json::to_string(document)?));
        Ok(store)
    }

    /// A store holding arbitrary raw content, e.g. corrupt JSON.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.raw.replace(Some(raw.into()));
        store
    }

    /// Make subsequent writes fail with `Persistence`, as a full or
    /// unavailable storage would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Current persisted content without triggering a seed.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    fn memory_path() -> PathBuf {
        PathBuf::from("<memory>")
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Document> {
        let parsed = self
            .raw
            .borrow()
            .as_deref()
            .map(serde_json::from_str::<Document>);

        match parsed {
            Some(Ok(document)) => Ok(document),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Stored document is unreadable; re-seeding");
                self.reset()
            }
            None => self.reset(),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        if self.fail_writes.get() {
            return Err(IssueFlowError::persistence(
                Self::memory_path(),
                "storage quota exceeded",
            ));
        }
        let json = serde_json::to_string(document)?;
        self.raw.replace(Some(json));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
