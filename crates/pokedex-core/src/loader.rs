//! Incremental catalog loader.
//!
//! The loader owns a growing, ordered collection of [`DisplayRecord`]s and
//! tracks how much of the bounded universe has been fetched. Pages are
//! fetched strictly sequentially; offsets are derived from loader state, so
//! overlapping fetches would duplicate or skip ranges. Exclusive `&mut self`
//! on the mutating operations makes overlap unrepresentable.

use crate::error::CatalogError;
use crate::record::DisplayRecord;

/// Entries fetched per page.
pub const PAGE_SIZE: u32 = 30;

/// Total number of catalog entries considered complete (the Kanto dex).
pub const UNIVERSE_SIZE: usize = 151;

/// Read operations against the remote paginated catalog.
///
/// Implemented by the HTTP client in `pokedex-api` and by scripted fakes in
/// tests.
pub trait CatalogSource {
    /// Fetch one page of display records starting at `offset`.
    fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<DisplayRecord>, CatalogError>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<DisplayRecord>, CatalogError> {
        (**self).list_page(limit, offset)
    }
}

/// Loader-owned state. Mutated only by successful page fetches.
#[derive(Debug, Clone, Default)]
pub struct LoaderState {
    /// Insertion order equals fetch order, truncated to [`UNIVERSE_SIZE`].
    pub items: Vec<DisplayRecord>,
    /// Offset the next page will be requested at. Only ever increases.
    pub next_offset: u32,
    /// Terminal flag: once set, no further fetches occur.
    pub universe_complete: bool,
}

/// Outcome of a single [`CatalogLoader::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    /// A page was fetched and `appended` records were added.
    Fetched { appended: usize },
    /// The universe was already complete; no network access happened.
    AlreadyComplete,
}

/// Incremental loader over a [`CatalogSource`].
///
/// `load_more` and `load_all` are idempotent with respect to completion:
/// once `universe_complete` is set, both are observable no-ops.
pub struct CatalogLoader<S> {
    source: S,
    state: LoaderState,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoaderState::default(),
        }
    }

    /// Currently loaded records, in fetch order.
    pub fn items(&self) -> &[DisplayRecord] {
        &self.state.items
    }

    pub fn len(&self) -> usize {
        self.state.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    pub fn next_offset(&self) -> u32 {
        self.state.next_offset
    }

    pub fn universe_complete(&self) -> bool {
        self.state.universe_complete
    }

    /// Fetch the next page and append it.
    ///
    /// Exactly one attempt per page per call: a failed fetch leaves the
    /// state untouched (no partial append, offset unchanged) and propagates
    /// the error. A subsequent call retries the same offset.
    pub fn load_more(&mut self) -> Result<LoadStep, CatalogError> {
        if self.state.universe_complete {
            return Ok(LoadStep::AlreadyComplete);
        }

        let page = self.source.list_page(PAGE_SIZE, self.state.next_offset)?;

        let before = self.state.items.len();
        self.state.items.extend(page);
        self.state.items.truncate(UNIVERSE_SIZE);
        self.state.next_offset += PAGE_SIZE;
        if self.state.items.len() >= UNIVERSE_SIZE {
            self.state.universe_complete = true;
        }

        let appended = self.state.items.len() - before;
        log::debug!(
            "loaded page at offset {}: +{} records ({} total, complete={})",
            self.state.next_offset - PAGE_SIZE,
            appended,
            self.state.items.len(),
            self.state.universe_complete,
        );
        Ok(LoadStep::Fetched { appended })
    }

    /// Fetch pages sequentially until the universe is complete or a fetch
    /// fails. Each page waits for the previous one; requests never overlap.
    ///
    /// An empty page before completion means the upstream universe is
    /// smaller than advertised; that is surfaced as a decode failure rather
    /// than looping on the same offset.
    pub fn load_all(&mut self) -> Result<(), CatalogError> {
        while !self.state.universe_complete {
            if let LoadStep::Fetched { appended: 0 } = self.load_more()? {
                return Err(CatalogError::Decode(format!(
                    "catalog ended early at {} of {} entries",
                    self.state.items.len(),
                    UNIVERSE_SIZE
                )));
            }
        }
        Ok(())
    }
}
