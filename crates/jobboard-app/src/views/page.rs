//! Paged list view state.
//!
//! A list view holds exactly one page. A response is applied only if it
//! belongs to the latest load and the view has not been dismissed; anything
//! else is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jobboard_client::PageRequest;
use jobboard_models::{ApiResponse, Page};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Loaded(Page<T>),
    /// Not an error: the page came back with no rows.
    Empty,
    Failed(String),
}

/// Handle that dismisses a view from anywhere.
#[derive(Debug, Clone)]
pub struct DismissHandle(Arc<AtomicBool>);

impl DismissHandle {
    pub fn dismiss(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Token identifying one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct PageView<T> {
    state: ListState<T>,
    request: PageRequest,
    empty_message: &'static str,
    generation: u64,
    dismissed: Arc<AtomicBool>,
}

impl<T> PageView<T> {
    pub fn new(size: u32, empty_message: &'static str) -> Self {
        Self {
            state: ListState::Idle,
            request: PageRequest::first(size),
            empty_message,
            generation: 0,
            dismissed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn empty_message(&self) -> &'static str {
        self.empty_message
    }

    pub fn items(&self) -> &[T] {
        match &self.state {
            ListState::Loaded(page) => &page.content,
            _ => &[],
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    pub fn dismiss_handle(&self) -> DismissHandle {
        DismissHandle(self.dismissed.clone())
    }

    pub fn dismiss(&self) {
        self.dismiss_handle().dismiss();
    }

    /// Jump to a page; the next load fetches it.
    pub fn go_to(&mut self, page: u32) {
        self.request = PageRequest::new(page, self.request.size);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = ListState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a response. Returns false when it was dropped.
    pub fn apply(&mut self, ticket: LoadTicket, response: ApiResponse<Page<T>>) -> bool {
        if self.is_dismissed() {
            debug!("Dropping response for dismissed view");
            return false;
        }
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "Dropping stale response");
            return false;
        }

        self.state = match response.into_result() {
            Ok(Some(page)) if !page.is_empty() => ListState::Loaded(page),
            Ok(_) => ListState::Empty,
            Err(message) => ListState::Failed(message),
        };
        true
    }

    /// Load the current page with `fetch`.
    pub async fn load<F, Fut>(&mut self, fetch: F) -> bool
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = ApiResponse<Page<T>>>,
    {
        let ticket = self.begin_load();
        let response = fetch(self.request).await;
        self.apply(ticket, response)
    }
}
