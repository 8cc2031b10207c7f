//! Core state machines for the Pokedex catalog tools.
//!
//! This crate is I/O-free: the remote catalog is abstracted behind the
//! [`CatalogSource`] trait so the loader can be driven by the real HTTP
//! client (`pokedex-api`) or by scripted sources in tests. The three pieces
//! that live here:
//!
//! * [`loader::CatalogLoader`] – incremental page loading over a bounded
//!   universe of entries, with idempotent completion.
//! * [`filter`] – case/diacritic-insensitive matching over loaded entries.
//! * [`debounce::SearchDebouncer`] – keystroke quiescence detection with
//!   distinct-until-changed emissions.

pub mod debounce;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;

pub use debounce::{SearchDebouncer, DEBOUNCE_MS};
pub use error::CatalogError;
pub use filter::{filter_records, normalize};
pub use loader::{CatalogLoader, CatalogSource, LoadStep, LoaderState, PAGE_SIZE, UNIVERSE_SIZE};
pub use record::{DisplayRecord, FullRecord, StatLine, TypeSlot};
