// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: the queue of URLs waiting to be fetched, plus the set
// of every URL we have already accepted.
//
// How it works:
// 1. URLs are normalized (fragment dropped) and deduplicated on that form
// 2. A URL is accepted only while the page budget has room; accepted URLs
//    are queued, then handed to workers by next()
// 3. Workers report back with mark_visited() or mark_failed()
// 4. A failed URL gives its budget slot back (it is never retried) and a
//    seed waiting in the reserve takes its place
// 5. next() suspends while the queue is empty but pages are still in flight,
//    because those pages may discover more links
// 6. next() returns None once the frontier is closed, or when nothing is
//    queued and nothing is in flight
//
// The frontier is shared by every worker (behind an Arc). All state sits
// behind one mutex that is never held across an await.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::scope::normalize_url;

#[derive(Debug, Default)]
struct FrontierState {
    // Every URL ever accepted (or observed as a redirect target)
    seen: HashSet<String>,
    // Accepted URLs waiting for a worker
    queue: VecDeque<String>,
    // Seeds that did not fit in the budget yet
    reserve: VecDeque<String>,
    // queued + in flight + visited
    accepted: usize,
    in_flight: usize,
    visited: usize,
    closed: bool,
}

impl FrontierState {
    // Moves reserved seeds into the queue while the budget has room
    fn refill(&mut self, capacity: usize) -> bool {
        let mut added = false;
        while self.accepted < capacity {
            let url = match self.reserve.pop_front() {
                Some(url) => url,
                None => break,
            };
            if self.seen.insert(url.clone()) {
                self.queue.push_back(url);
                self.accepted += 1;
                added = true;
            }
        }
        added
    }
}

#[derive(Debug)]
pub struct Frontier {
    capacity: usize,
    state: Mutex<FrontierState>,
    notify: Notify,
}

impl Frontier {
    /// Creates an empty frontier that accepts at most `capacity` URLs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(FrontierState::default()),
            notify: Notify::new(),
        }
    }

    // A panicking worker must not take the whole crawl down with it,
    // so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Loads the starting URLs
    //
    // As many as the budget allows are queued right away, in order; the rest
    // wait in the reserve and are promoted as failed URLs free up slots.
    // Returns how many were queued immediately.
    pub fn seed<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut state = self.state();
        let before = state.queue.len();
        state
            .reserve
            .extend(urls.into_iter().filter_map(|url| normalize_url(&url)));
        state.refill(self.capacity);
        let queued = state.queue.len() - before;
        drop(state);

        self.notify.notify_waiters();
        queued
    }

    // Accepts a URL for crawling
    //
    // Returns false when the URL is not crawlable, was seen before, the
    // budget is used up, or the frontier is closed. Nothing is recorded in
    // those cases.
    pub fn try_enqueue(&self, url: &str) -> bool {
        let url = match normalize_url(url) {
            Some(url) => url,
            None => return false,
        };

        let mut state = self.state();
        if state.closed || state.accepted >= self.capacity || state.seen.contains(&url) {
            return false;
        }
        state.seen.insert(url.clone());
        state.queue.push_back(url);
        state.accepted += 1;
        drop(state);

        self.notify.notify_waiters();
        true
    }

    /// Records a URL as known without queueing it or charging the budget.
    /// Used for redirect targets so they are not fetched a second time.
    pub fn mark_seen(&self, url: &str) {
        if let Some(url) = normalize_url(url) {
            self.state().seen.insert(url);
        }
    }

    // Hands out the next URL to fetch, waiting while other workers may still
    // discover more. None means this worker should stop.
    pub async fn next(&self) -> Option<String> {
        loop {
            // Registered before checking state so a wakeup in between is not lost
            let notified = self.notify.notified();

            {
                let mut state = self.state();
                if state.closed {
                    return None;
                }
                if let Some(url) = state.queue.pop_front() {
                    state.in_flight += 1;
                    return Some(url);
                }
                if state.in_flight == 0 {
                    // Nothing queued and nobody left to discover anything
                    state.closed = true;
                    drop(state);
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Reports a URL from `next()` as successfully harvested.
    pub fn mark_visited(&self, url: &str) {
        let mut state = self.state();
        debug_assert!(normalize_url(url).map_or(true, |url| state.seen.contains(&url)));
        state.in_flight = state.in_flight.saturating_sub(1);
        state.visited += 1;
        drop(state);

        self.notify.notify_waiters();
    }

    /// Reports a URL from `next()` as failed; its budget slot is released.
    pub fn mark_failed(&self, url: &str) {
        let mut state = self.state();
        debug_assert!(normalize_url(url).map_or(true, |url| state.seen.contains(&url)));
        state.in_flight = state.in_flight.saturating_sub(1);
        state.accepted = state.accepted.saturating_sub(1);
        state.refill(self.capacity);
        drop(state);

        self.notify.notify_waiters();
    }

    /// Stops the crawl: queued URLs are dropped and waiting workers wake up.
    pub fn close(&self) {
        let mut state = self.state();
        state.closed = true;
        state.queue.clear();
        drop(state);

        self.notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// URLs currently charged against the budget.
    pub fn accepted(&self) -> usize {
        self.state().accepted
    }

    pub fn visited(&self) -> usize {
        self.state().visited
    }
}
