//! Interactive terminal browser for the Pokedex catalog.
//!
//! The render thread never blocks on the network: page loads and detail
//! fetches run on [`worker`] threads and stream back over channels, while
//! [`app::App`] folds their messages into state once per frame.

pub mod app;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::run;
pub use theme::Theme;
