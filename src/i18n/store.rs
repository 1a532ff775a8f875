// SPDX-License-Identifier: MPL-2.0
//! The locale store: owns the [`LocaleTree`] and keeps it in sync with the
//! locale files on disk.
//!
//! # Locking
//!
//! The tree sits behind a read-write lock. Translations take read guards and
//! run in parallel. A scan is serialized by a mutex over the reload
//! bookkeeping; it reads and parses files without touching the tree lock and
//! only takes the write lock to swap the freshly parsed tables in.
//!
//! # Reloading
//!
//! [`ReloadPolicy`] decides when [`LocaleStore::ensure_loaded`] rescans the
//! locale root. A rescan only re-parses files whose modification time differs
//! from the one recorded at their last successful parse.

use super::table::{LocaleTree, MessageTable};
use super::yaml;
use crate::directory_scanner::{self, LocaleFile};
use crate::error::{Error, Result};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant, SystemTime};

/// When the store rescans the locale root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Load once; never look at the files again.
    #[default]
    Never,
    /// Rescan on every [`LocaleStore::ensure_loaded`] call.
    EveryCall,
    /// Rescan at most once per interval. Translations may be stale by up to
    /// the interval.
    Interval(Duration),
    /// Load once; rescan only on [`LocaleStore::reload`].
    Manual,
}

/// Construction options for a [`LocaleStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub reload: ReloadPolicy,
    /// Add lower-cased aliases to every loaded table; lookups lower-case keys.
    pub ignore_case: bool,
}

/// Outcome of one scan of the locale root.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Files parsed and installed by this scan.
    pub parsed: Vec<PathBuf>,
    /// Files skipped because their modification time did not change.
    pub unchanged: usize,
    /// Files that failed to load. Their previous tables, if any, are kept.
    pub failures: Vec<Error>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
struct Bookkeeping {
    timestamps: HashMap<PathBuf, SystemTime>,
    last_scan: Option<Instant>,
}

#[derive(Debug)]
pub struct LocaleStore {
    root: PathBuf,
    options: StoreOptions,
    tree: RwLock<LocaleTree>,
    bookkeeping: Mutex<Bookkeeping>,
    loaded: AtomicBool,
    parses: AtomicUsize,
}

impl LocaleStore {
    /// Creates an empty store; nothing is read until the first
    /// [`ensure_loaded`](Self::ensure_loaded).
    pub fn new(root: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            root: root.into(),
            options,
            tree: RwLock::new(LocaleTree::new()),
            bookkeeping: Mutex::new(Bookkeeping::default()),
            loaded: AtomicBool::new(false),
            parses: AtomicUsize::new(0),
        }
    }

    /// Creates a store and performs the initial load.
    ///
    /// Fails only if the locale root cannot be read; individual bad files are
    /// logged and skipped.
    pub fn open(root: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let store = Self::new(root, options);
        store.reload()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn ignore_case(&self) -> bool {
        self.options.ignore_case
    }

    /// Number of locale files parsed since the store was created.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    /// Read access to the loaded data.
    pub fn read(&self) -> RwLockReadGuard<'_, LocaleTree> {
        self.tree.read()
    }

    /// Brings the tree up to date as the reload policy requires.
    ///
    /// Returns `Ok(None)` when no scan was due.
    pub fn ensure_loaded(&self) -> Result<Option<LoadReport>> {
        if self.loaded.load(Ordering::Acquire)
            && matches!(self.options.reload, ReloadPolicy::Never | ReloadPolicy::Manual)
        {
            return Ok(None);
        }

        let mut bookkeeping = self.bookkeeping.lock();
        if !self.scan_due(&bookkeeping) {
            return Ok(None);
        }
        self.scan(&mut bookkeeping).map(Some)
    }

    /// Rescans the locale root now, regardless of policy.
    pub fn reload(&self) -> Result<LoadReport> {
        let mut bookkeeping = self.bookkeeping.lock();
        self.scan(&mut bookkeeping)
    }

    fn scan_due(&self, bookkeeping: &Bookkeeping) -> bool {
        match self.options.reload {
            // Failed scans count too, so a missing root is retried at most
            // once per interval.
            ReloadPolicy::Interval(interval) => bookkeeping
                .last_scan
                .is_none_or(|last| last.elapsed() >= interval),
            _ if !self.loaded.load(Ordering::Acquire) => true,
            ReloadPolicy::Never | ReloadPolicy::Manual => false,
            ReloadPolicy::EveryCall => true,
        }
    }

    fn scan(&self, bookkeeping: &mut Bookkeeping) -> Result<LoadReport> {
        bookkeeping.last_scan = Some(Instant::now());
        let files = directory_scanner::scan_locale_root(&self.root)?;
        let mut report = LoadReport::default();
        let mut fresh: Vec<(LocaleFile, MessageTable)> = Vec::new();

        for file in files {
            if let Some(modified) = file.modified {
                if bookkeeping.timestamps.get(&file.path) == Some(&modified) {
                    report.unchanged += 1;
                    continue;
                }
            }

            match yaml::load_table(&file.path) {
                Ok(mut table) => {
                    self.parses.fetch_add(1, Ordering::Relaxed);
                    if self.options.ignore_case {
                        table.add_lowercase_aliases();
                    }
                    if let Some(modified) = file.modified {
                        bookkeeping.timestamps.insert(file.path.clone(), modified);
                    }
                    tracing::debug!(
                        path = %file.path.display(),
                        scope = %file.scope,
                        language = %file.language,
                        messages = table.len(),
                        "loaded locale file"
                    );
                    report.parsed.push(file.path.clone());
                    fresh.push((file, table));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping locale file");
                    report.failures.push(err);
                }
            }
        }

        if !fresh.is_empty() {
            let mut tree = self.tree.write();
            for (file, table) in fresh {
                tree.insert(&file.scope, &file.language, table);
            }
        }

        self.loaded.store(true, Ordering::Release);
        tracing::debug!(
            root = %self.root.display(),
            parsed = report.parsed.len(),
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "scanned locale root"
        );
        Ok(report)
    }
}
