#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use link_mapper::domain::click_event::ClickEvent;
use link_mapper::domain::click_worker::run_click_worker;
use link_mapper::domain::entities::{Link, NewLink};
use link_mapper::domain::repositories::LinkRepository;
use link_mapper::infrastructure::cache::NullCache;
use link_mapper::infrastructure::persistence::MemoryLinkRepository;
use link_mapper::state::{AppState, StateSettings};
use link_mapper::utils::code_generator::CodeSettings;

pub const BASE_URL: &str = "http://sho.rt";

fn settings() -> StateSettings {
    StateSettings {
        base_url: BASE_URL.to_string(),
        codes: CodeSettings::default(),
        recent_links_limit: 10,
        store_backend: "memory",
    }
}

/// State over an empty in-memory store; click events stay in the returned receiver.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        repository.clone(),
        Arc::new(NullCache::new()),
        tx,
        settings(),
    );

    (state, repository, rx)
}

/// State whose click events are applied by a running click worker.
///
/// The worker stops once every clone of the state is dropped.
pub fn create_test_state_with_worker() -> (AppState, Arc<MemoryLinkRepository>, JoinHandle<()>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let dyn_repository: Arc<dyn LinkRepository> = repository.clone();
    let worker = tokio::spawn(run_click_worker(rx, dyn_repository, 4));

    let state = AppState::new(
        repository.clone(),
        Arc::new(NullCache::new()),
        tx,
        settings(),
    );

    (state, repository, worker)
}

pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repository
        .put(NewLink::with_alias(code.to_string(), url.to_string(), None))
        .await
        .unwrap()
}
