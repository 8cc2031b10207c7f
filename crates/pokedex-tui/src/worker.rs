//! Background catalog and detail worker threads.
//!
//! All network access happens off the render thread. The catalog worker owns
//! the [`CatalogLoader`], so page fetches are serialized by construction; the
//! UI talks to it through channels and only ever sees immutable snapshots.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use pokedex_api::PokeApiClient;
use pokedex_core::{CatalogError, CatalogLoader, CatalogSource, DisplayRecord, FullRecord};

/// Command sent to the catalog worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCommand {
    /// Fetch one more page.
    LoadMore,
    /// Fetch pages until the universe is complete.
    LoadAll,
}

/// Snapshot of loader state pushed to the UI after each page.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub items: Vec<DisplayRecord>,
    pub universe_complete: bool,
    /// Set when the triggering fetch failed; items reflect the state before
    /// the failed page.
    pub error: Option<String>,
}

/// Request to fetch the full entry for a list selection.
#[derive(Debug, Clone, Copy)]
pub struct DetailRequest {
    pub id: u32,
}

/// Response with the full entry, or the error that prevented it.
#[derive(Debug)]
pub struct DetailResponse {
    pub id: u32,
    pub record: Option<FullRecord>,
    pub error: Option<String>,
}

/// On-demand detail lookups, keyed by id.
///
/// Implemented by [`PokeApiClient`] and by scripted fakes in tests.
pub trait DetailSource {
    fn fetch_by_id(&self, id: u32) -> Result<FullRecord, CatalogError>;
}

impl DetailSource for PokeApiClient {
    fn fetch_by_id(&self, id: u32) -> Result<FullRecord, CatalogError> {
        self.fetch_detail(&id.to_string())
    }
}

fn snapshot_of<S: CatalogSource>(
    loader: &CatalogLoader<S>,
    error: Option<String>,
) -> CatalogSnapshot {
    CatalogSnapshot {
        items: loader.items().to_vec(),
        universe_complete: loader.universe_complete(),
        error,
    }
}

/// Spawn the catalog worker thread.
///
/// Commands are coalesced: if a `LoadAll` is queued behind `LoadMore`s, one
/// `LoadAll` wins. A failed fetch emits an error snapshot and returns to the
/// command loop with the loader state intact, so the next command retries
/// the same offset.
pub fn spawn_catalog_worker<S>(
    source: S,
    cmd_rx: Receiver<CatalogCommand>,
    snapshot_tx: Sender<CatalogSnapshot>,
) -> JoinHandle<()>
where
    S: CatalogSource + Send + 'static,
{
    thread::spawn(move || {
        let mut loader = CatalogLoader::new(source);

        while let Ok(mut cmd) = cmd_rx.recv() {
            while let Ok(next) = cmd_rx.try_recv() {
                if next == CatalogCommand::LoadAll {
                    cmd = CatalogCommand::LoadAll;
                }
            }

            match cmd {
                CatalogCommand::LoadMore => {
                    let error = loader.load_more().err().map(|e| e.to_string());
                    if snapshot_tx.send(snapshot_of(&loader, error)).is_err() {
                        return;
                    }
                }
                CatalogCommand::LoadAll => {
                    while !loader.universe_complete() {
                        let error = loader.load_more().err().map(|e| e.to_string());
                        let failed = error.is_some();
                        if snapshot_tx.send(snapshot_of(&loader, error)).is_err() {
                            return;
                        }
                        if failed {
                            break;
                        }
                    }
                }
            }
        }
    })
}

/// Spawn the detail worker thread.
///
/// Rapid selection changes are coalesced to the latest request; the UI drops
/// responses whose id no longer matches its pending selection.
pub fn spawn_detail_worker<D>(
    source: D,
    req_rx: Receiver<DetailRequest>,
    resp_tx: Sender<DetailResponse>,
) -> JoinHandle<()>
where
    D: DetailSource + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(mut req) = req_rx.recv() {
            while let Ok(next) = req_rx.try_recv() {
                req = next;
            }

            let (record, error) = match source.fetch_by_id(req.id) {
                Ok(record) => (Some(record), None),
                Err(e) => (None, Some(e.to_string())),
            };
            if resp_tx
                .send(DetailResponse {
                    id: req.id,
                    record,
                    error,
                })
                .is_err()
            {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::UNIVERSE_SIZE;
    use std::sync::mpsc;
    use std::time::Duration;

    struct FakeCatalog {
        total: usize,
        fail_at: Vec<u32>,
    }

    impl CatalogSource for FakeCatalog {
        fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<DisplayRecord>, CatalogError> {
            if self.fail_at.contains(&offset) {
                return Err(CatalogError::Network("connection reset".to_string()));
            }
            let start = offset as usize;
            let end = (start + limit as usize).min(self.total);
            Ok((start..end)
                .map(|i| {
                    let id = (i + 1) as u32;
                    DisplayRecord {
                        id,
                        name: format!("mon-{id}"),
                        image_url: format!("https://sprites.example/{id}.png"),
                    }
                })
                .collect())
        }
    }

    fn recv(rx: &Receiver<CatalogSnapshot>) -> CatalogSnapshot {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_load_all_streams_a_snapshot_per_page() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        spawn_catalog_worker(
            FakeCatalog {
                total: 1000,
                fail_at: vec![],
            },
            cmd_rx,
            snapshot_tx,
        );

        cmd_tx.send(CatalogCommand::LoadAll).unwrap();

        let mut sizes = Vec::new();
        loop {
            let snap = recv(&snapshot_rx);
            assert!(snap.error.is_none());
            sizes.push(snap.items.len());
            if snap.universe_complete {
                break;
            }
        }
        assert_eq!(sizes, vec![30, 60, 90, 120, 150, UNIVERSE_SIZE]);
    }

    #[test]
    fn test_failed_fetch_reports_error_and_keeps_progress() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        spawn_catalog_worker(
            FakeCatalog {
                total: 1000,
                fail_at: vec![30],
            },
            cmd_rx,
            snapshot_tx,
        );

        cmd_tx.send(CatalogCommand::LoadMore).unwrap();
        let first = recv(&snapshot_rx);
        assert_eq!(first.items.len(), 30);
        assert!(first.error.is_none());

        cmd_tx.send(CatalogCommand::LoadMore).unwrap();
        let failed = recv(&snapshot_rx);
        assert_eq!(failed.items.len(), 30);
        assert!(failed.error.as_deref().unwrap().contains("network error"));
        assert!(!failed.universe_complete);
    }

    #[test]
    fn test_commands_after_completion_are_cheap_noops() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        spawn_catalog_worker(
            FakeCatalog {
                total: 151,
                fail_at: vec![],
            },
            cmd_rx,
            snapshot_tx,
        );

        cmd_tx.send(CatalogCommand::LoadAll).unwrap();
        loop {
            if recv(&snapshot_rx).universe_complete {
                break;
            }
        }

        // LoadMore on a complete universe answers with an unchanged snapshot.
        cmd_tx.send(CatalogCommand::LoadMore).unwrap();
        let snap = recv(&snapshot_rx);
        assert_eq!(snap.items.len(), UNIVERSE_SIZE);
        assert!(snap.universe_complete);
        assert!(snap.error.is_none());
    }

    struct FakeDetail;

    impl DetailSource for FakeDetail {
        fn fetch_by_id(&self, id: u32) -> Result<FullRecord, CatalogError> {
            if id == 0 {
                return Err(CatalogError::NotFound(id.to_string()));
            }
            Ok(FullRecord {
                id,
                name: format!("mon-{id}"),
                height: 4,
                weight: 60,
                types: vec![],
                stats: vec![],
            })
        }
    }

    #[test]
    fn test_detail_worker_round_trip_and_error() {
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        spawn_detail_worker(FakeDetail, req_rx, resp_tx);

        req_tx.send(DetailRequest { id: 25 }).unwrap();
        let resp = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(resp.id, 25);
        assert_eq!(resp.record.unwrap().name, "mon-25");
        assert!(resp.error.is_none());

        req_tx.send(DetailRequest { id: 0 }).unwrap();
        let resp = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(resp.record.is_none());
        assert!(resp.error.as_deref().unwrap().contains("no such entry"));
    }
}
