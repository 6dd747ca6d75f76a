//! Async execution of session commands
//!
//! `CatalogDriver` runs each `Command` as a task on a tokio runtime and delivers
//! the outcome back as an `Event` over an unbounded channel. The session stays
//! owned by the caller, so all state mutation happens on one thread.
//!
//! The list, vocabulary and detail lanes are independent. Starting a request on
//! a lane aborts the task it supersedes; responses that still slip through are
//! dropped by the session's identity checks.

use super::location::{Location, LocationError};
use super::session::{BrowseSession, Command};
use crate::catalog::{CatalogApi, CatalogDetail, CatalogPage, FilterVocabulary, RequestError};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Response delivered by a lane task
#[derive(Debug)]
pub enum Event {
    ListLoaded {
        query: String,
        result: Result<CatalogPage, RequestError>,
    },
    VocabularyLoaded {
        filter_query: String,
        result: Result<FilterVocabulary, RequestError>,
    },
    DetailLoaded {
        id: String,
        result: Result<CatalogDetail, RequestError>,
    },
}

impl Event {
    /// Feed this response into the session, returning follow-up commands
    pub fn apply_to(self, session: &mut BrowseSession) -> Vec<Command> {
        match self {
            Self::ListLoaded { query, result } => session.on_list_loaded(&query, result),
            Self::VocabularyLoaded {
                filter_query,
                result,
            } => {
                session.on_vocabulary_loaded(&filter_query, result);
                Vec::new()
            }
            Self::DetailLoaded { id, result } => {
                session.on_detail_loaded(&id, result);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Default)]
struct Lane {
    task: Option<JoinHandle<()>>,
}

impl Lane {
    fn replace(&mut self, task: JoinHandle<()>) {
        if let Some(previous) = self.task.replace(task) {
            if !previous.is_finished() {
                previous.abort();
            }
        }
    }

    fn is_idle(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Runs session commands against a `CatalogApi`
#[derive(Debug)]
pub struct CatalogDriver {
    runtime: Handle,
    api: Arc<dyn CatalogApi>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    list: Lane,
    vocabulary: Lane,
    detail: Lane,
}

impl CatalogDriver {
    /// Create a driver that spawns its requests on `runtime`
    #[must_use]
    pub fn new(runtime: Handle, api: Arc<dyn CatalogApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            api,
            events_tx,
            events_rx,
            list: Lane::default(),
            vocabulary: Lane::default(),
            detail: Lane::default(),
        }
    }

    /// The API requests are sent to
    #[must_use]
    pub fn api(&self) -> &Arc<dyn CatalogApi> {
        &self.api
    }

    /// Execute commands
    ///
    /// Location updates happen immediately; fetches are spawned.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the location cannot be written. Fetches
    /// issued before the failing command keep running.
    pub fn dispatch(
        &mut self,
        commands: Vec<Command>,
        location: &mut dyn Location,
    ) -> Result<(), LocationError> {
        for command in commands {
            match command {
                Command::PublishLocation(query) => location.replace(&query)?,
                Command::FetchList { query } => {
                    let api = Arc::clone(&self.api);
                    let task = self.spawn(async move {
                        let result = api.list_catalog(&query).await;
                        Event::ListLoaded { query, result }
                    });
                    self.list.replace(task);
                }
                Command::FetchVocabulary { filter_query } => {
                    let api = Arc::clone(&self.api);
                    let task = self.spawn(async move {
                        let result = api.filter_vocabulary(&filter_query).await;
                        Event::VocabularyLoaded {
                            filter_query,
                            result,
                        }
                    });
                    self.vocabulary.replace(task);
                }
                Command::FetchDetail { id } => {
                    let api = Arc::clone(&self.api);
                    let task = self.spawn(async move {
                        let result = api.catalog_entry(&id).await;
                        Event::DetailLoaded { id, result }
                    });
                    self.detail.replace(task);
                }
            }
        }
        Ok(())
    }

    /// Drain delivered events without waiting
    pub fn try_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Apply every delivered event and dispatch the follow-ups
    ///
    /// Returns the number of events applied.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if a follow-up location update fails.
    pub fn pump(
        &mut self,
        session: &mut BrowseSession,
        location: &mut dyn Location,
    ) -> Result<usize, LocationError> {
        let events = self.try_events();
        let applied = events.len();
        for event in events {
            let follow_up = event.apply_to(session);
            self.dispatch(follow_up, location)?;
        }
        Ok(applied)
    }

    /// Whether no lane has a request outstanding
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.list.is_idle() && self.vocabulary.is_idle() && self.detail.is_idle()
    }

    /// Process events until every lane is idle
    ///
    /// Follow-up requests (such as the corrected request after a page clamp)
    /// are awaited as well.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if a location update fails.
    pub async fn settle(
        &mut self,
        session: &mut BrowseSession,
        location: &mut dyn Location,
    ) -> Result<(), LocationError> {
        loop {
            if self.pump(session, location)? > 0 {
                continue;
            }
            if self.is_idle() {
                // A lane may have finished between the drain and the idle check.
                if self.pump(session, location)? == 0 {
                    return Ok(());
                }
                continue;
            }
            match self.events_rx.recv().await {
                Some(event) => {
                    let follow_up = event.apply_to(session);
                    self.dispatch(follow_up, location)?;
                }
                None => return Ok(()),
            }
        }
    }

    /// Abort every outstanding request
    pub fn shutdown(&mut self) {
        debug!("aborting outstanding catalog requests");
        self.list.abort();
        self.vocabulary.abort();
        self.detail.abort();
    }

    fn spawn<F>(&self, request: F) -> JoinHandle<()>
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let events_tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let event = request.await;
            if events_tx.send(event).is_err() {
                error!("catalog event receiver dropped");
            }
        })
    }
}

impl Drop for CatalogDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::MemoryLocation;
    use crate::query::{DecodeOptions, FilterDimension};
    use crate::testing::FakeCatalog;
    use std::time::Duration;

    fn driver(api: FakeCatalog) -> (CatalogDriver, Arc<FakeCatalog>) {
        let api = Arc::new(api);
        let driver = CatalogDriver::new(Handle::current(), api.clone());
        (driver, api)
    }

    #[tokio::test]
    async fn test_settle_loads_page_and_vocabulary() {
        let (mut driver, api) = driver(FakeCatalog::with_total(30));
        let mut location = MemoryLocation::new("category=tools");
        let (mut session, commands) =
            BrowseSession::hydrate(&location.hydrate().unwrap(), &DecodeOptions::default());

        driver.dispatch(commands, &mut location).unwrap();
        driver.settle(&mut session, &mut location).await.unwrap();

        assert_eq!(session.page().map(|p| p.total), Some(30));
        assert!(!session.vocabulary().is_empty());
        assert_eq!(
            location.current(),
            "category=tools&page=1&page_size=24&sort=name&order=asc"
        );
        let mut requests = api.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec![
                "filters?category=tools".to_string(),
                "list?category=tools&page=1&page_size=24&sort=name&order=asc".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_settle_follows_page_clamp() {
        let (mut driver, _api) = driver(FakeCatalog::with_total(100));
        let mut location = MemoryLocation::new("page=10");
        let (mut session, commands) =
            BrowseSession::hydrate(&location.hydrate().unwrap(), &DecodeOptions::default());

        driver.dispatch(commands, &mut location).unwrap();
        driver.settle(&mut session, &mut location).await.unwrap();

        assert_eq!(session.state().page(), 5);
        assert_eq!(session.page().map(|p| p.page), Some(5));
        assert_eq!(location.current(), "page=5&page_size=24&sort=name&order=asc");
        assert_eq!(location.history().len(), 1);
    }

    #[tokio::test]
    async fn test_slow_superseded_request_does_not_win() {
        let api = FakeCatalog::with_total(5).delay_list(
            "q=old&page=1&page_size=24&sort=name&order=asc",
            Duration::from_millis(50),
        );
        let (mut driver, _api) = driver(api);
        let mut location = MemoryLocation::default();
        let (mut session, commands) = BrowseSession::hydrate("q=old", &DecodeOptions::default());
        driver.dispatch(commands, &mut location).unwrap();

        let commands = session.update(|store| {
            store.set_search_text("new");
            store.toggle_filter_value(FilterDimension::License, "MIT");
        });
        driver.dispatch(commands, &mut location).unwrap();
        driver.settle(&mut session, &mut location).await.unwrap();

        assert!(session.page_is_current());
        assert_eq!(
            session.query(),
            "q=new&license=MIT&page=1&page_size=24&sort=name&order=asc"
        );
    }

    #[tokio::test]
    async fn test_detail_lane() {
        let (mut driver, _api) = driver(FakeCatalog::with_total(1));
        let mut location = MemoryLocation::default();
        let (mut session, commands) = BrowseSession::hydrate("", &DecodeOptions::default());
        driver.dispatch(commands, &mut location).unwrap();

        let commands = session.open_detail("missing");
        driver.dispatch(commands, &mut location).unwrap();
        driver.settle(&mut session, &mut location).await.unwrap();

        assert_eq!(
            session.detail(),
            &crate::browse::DetailState::NotFound {
                id: "missing".into()
            }
        );
    }
}
