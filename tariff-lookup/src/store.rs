//! Shared, reloadable tariff data.
//!
//! A [`TariffSnapshot`] is an immutable table plus the corpus its queries
//! are matched against. Lookups borrow a snapshot, so any number of them
//! can run at once. A [`TariffStore`] holds the current snapshot and can
//! swap in a freshly loaded one without disturbing lookups in flight.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::domain::{Corpus, FareRecord, FareTable};
use crate::fares::{self, ResolutionError, RouteFares};
use crate::loader::{self, LoadError};
use crate::matcher::{self, MatchConfig};

/// Where a store loads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffSource {
    /// The tariff table (`.csv` or `.json`)
    pub table: PathBuf,
    /// Optional gazetteer; without one, the table's own places are used
    pub locations: Option<PathBuf>,
}

impl TariffSource {
    /// A source with no gazetteer.
    pub fn new(table: impl Into<PathBuf>) -> Self {
        Self {
            table: table.into(),
            locations: None,
        }
    }

    /// Use a gazetteer for the matching corpus.
    pub fn with_locations(mut self, locations: impl Into<PathBuf>) -> Self {
        self.locations = Some(locations.into());
        self
    }
}

/// An immutable table and matching corpus.
#[derive(Debug, Clone)]
pub struct TariffSnapshot {
    table: Arc<FareTable>,
    corpus: Arc<Corpus>,
}

impl TariffSnapshot {
    /// Snapshot a table, deriving the corpus from its places.
    pub fn new(table: FareTable) -> Self {
        let corpus = table.corpus();
        Self::with_corpus(table, corpus)
    }

    /// Snapshot a table with an explicit corpus.
    ///
    /// Logs a warning once here if the corpus is large enough to make
    /// every query slow.
    pub fn with_corpus(table: FareTable, corpus: Corpus) -> Self {
        if corpus.is_large() {
            warn!(
                locations = corpus.len(),
                "large matching corpus; every query scans it in full"
            );
        }
        Self {
            table: Arc::new(table),
            corpus: Arc::new(corpus),
        }
    }

    /// Load a snapshot from disk.
    pub fn load(source: &TariffSource) -> Result<Self, LoadError> {
        let table = loader::load_table(&source.table)?;
        match &source.locations {
            Some(path) => {
                let corpus = loader::load_locations(path)?;
                if corpus.is_empty() {
                    warn!(path = %path.display(), "gazetteer is empty; no query will resolve");
                }
                Ok(Self::with_corpus(table, corpus))
            }
            None => Ok(Self::new(table)),
        }
    }

    pub fn table(&self) -> &FareTable {
        &self.table
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// See [`fares::lookup`].
    pub fn lookup(
        &self,
        origin: &str,
        destination: &str,
        config: &MatchConfig,
    ) -> Result<RouteFares, ResolutionError> {
        fares::lookup(origin, destination, &self.table, &self.corpus, config)
    }

    /// See [`fares::find_fares`].
    pub fn find_fares(
        &self,
        origin: &str,
        destination: &str,
        config: &MatchConfig,
    ) -> Result<Vec<FareRecord>, ResolutionError> {
        fares::find_fares(origin, destination, &self.table, &self.corpus, config)
    }

    /// Resolve a single place name. See [`matcher::resolve`].
    pub fn resolve(&self, query: &str, config: &MatchConfig) -> Option<String> {
        matcher::resolve(query, &self.corpus, config)
    }
}

/// Thread-safe holder of the current snapshot, with reload support.
#[derive(Debug)]
pub struct TariffStore {
    source: TariffSource,
    current: RwLock<Arc<TariffSnapshot>>,
}

impl TariffStore {
    /// Load the initial snapshot. Fails if the source cannot be loaded.
    pub fn open(source: TariffSource) -> Result<Self, LoadError> {
        let snapshot = TariffSnapshot::load(&source)?;
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub fn source(&self) -> &TariffSource {
        &self.source
    }

    /// The current snapshot.
    ///
    /// The returned handle stays valid across reloads; it simply keeps
    /// pointing at the data it was taken from.
    pub fn snapshot(&self) -> Arc<TariffSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Reload from the source.
    ///
    /// On success, replaces the current snapshot and returns the number of
    /// records loaded. On failure, the existing snapshot is kept and the
    /// error is returned.
    pub fn reload(&self) -> Result<usize, LoadError> {
        let snapshot = match TariffSnapshot::load(&self.source) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "tariff reload failed; keeping previous table");
                return Err(e);
            }
        };
        let count = snapshot.table().len();

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
        drop(guard);

        info!(records = count, "reloaded tariff table");
        Ok(count)
    }
}
