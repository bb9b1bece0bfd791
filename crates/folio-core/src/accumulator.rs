//! Incremental, deduplicating content accumulator.
//!
//! An [`Accumulator`] owns the state of one consumer view: the items fetched
//! so far, the pagination cursor, and the flags that keep at most one request
//! in flight. It is driven with [`Accumulator::load_more`] and cleared with
//! [`Accumulator::reset`].
//!
//! Upstream failures never escape `load_more`. A failed page is treated as an
//! empty final page: the list is kept and the cursor is marked exhausted.
//!
//! Every request remembers the generation it started in. `reset` bumps the
//! generation, so a response that arrives after a reset is dropped instead of
//! being merged into the fresh state.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, trace, warn};

use crate::content::{ContentFilter, ContentItem, PageRequest, PaginationCursor};
use crate::traits::ContentSource;

/// Extra items requested on top of the caller's count.
pub const DEFAULT_OVERFETCH: usize = 2;

/// Accumulator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulatorConfig {
    /// Items added to every request, to make up for client-side filtering
    /// dropping some of them. A heuristic, not a guarantee.
    pub overfetch: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            overfetch: DEFAULT_OVERFETCH,
        }
    }
}

/// Where an accumulator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet.
    Empty,
    /// A request is in flight.
    Loading,
    /// At least one request completed and more may be available.
    Populated,
    /// The upstream has nothing more. Terminal until reset.
    Exhausted,
}

/// The result of one [`Accumulator::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged.
    Appended {
        /// New items appended to the list.
        added: usize,
        /// Items dropped because their id was already present.
        skipped_duplicates: usize,
    },
    /// Another request was already in flight; nothing was done.
    InFlight,
    /// The listing was already exhausted; nothing was done.
    Exhausted,
    /// The fetch failed; the listing is now exhausted.
    Failed,
    /// The accumulator was reset while the request was in flight; the
    /// response was dropped.
    Stale,
}

/// A point-in-time copy of an accumulator's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub items: Vec<ContentItem>,
    pub cursor: PaginationCursor,
    pub loading: bool,
    pub initialized: bool,
    pub total_hint: Option<u64>,
    pub phase: Phase,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct State {
    items: Vec<ContentItem>,
    seen: HashSet<String>,
    cursor: PaginationCursor,
    loading: bool,
    initialized: bool,
    total_hint: Option<u64>,
    generation: u64,
}

impl State {
    fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.initialized && !self.cursor.has_more {
            Phase::Exhausted
        } else if self.initialized || !self.items.is_empty() {
            Phase::Populated
        } else {
            Phase::Empty
        }
    }

    /// Append items whose id is new; returns (added, skipped).
    fn merge(&mut self, items: Vec<ContentItem>) -> (usize, usize) {
        let mut added = 0;
        let mut skipped = 0;
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
                added += 1;
            } else {
                trace!(id = %item.id, "skipping duplicate item");
                skipped += 1;
            }
        }
        (added, skipped)
    }
}

/// Clears the in-flight flag if a `load_more` future is dropped before its
/// request completes, so the next call can proceed.
struct LoadingFlag<'a> {
    state: &'a Mutex<State>,
    generation: u64,
    armed: bool,
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.loading {
            debug!("load cancelled before completion");
            state.loading = false;
        }
    }
}

/// Accumulates pages from a [`ContentSource`] into one ordered,
/// deduplicated list.
///
/// Methods take `&self`; the state sits behind a mutex that is never held
/// across an await, so an accumulator can be shared (for example in an
/// `Arc`) between the task that loads and the tasks that render or reset.
///
/// # Example
///
/// ```no_run
/// use folio_core::{Accumulator, ContentSource};
///
/// # async fn example(source: impl ContentSource) {
/// let articles = Accumulator::new(source);
/// articles.load_more(10, None).await;
/// for item in articles.items() {
///     println!("{}", item.title);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Accumulator<S> {
    source: S,
    config: AccumulatorConfig,
    state: Mutex<State>,
}

impl<S: ContentSource> Accumulator<S> {
    /// Create an accumulator with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, AccumulatorConfig::default())
    }

    /// Create an accumulator with an explicit configuration.
    pub fn with_config(source: S, config: AccumulatorConfig) -> Self {
        Self {
            source,
            config,
            state: Mutex::new(State::default()),
        }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the configuration.
    pub fn config(&self) -> AccumulatorConfig {
        self.config
    }

    /// Fetch the next page and merge it in.
    ///
    /// Requests `count` (at least 1) plus the configured over-fetch. The
    /// filter is only consulted on the first call after construction or
    /// reset, to ask the source for a total-count hint.
    ///
    /// This never fails; see [`LoadOutcome`] for what happened.
    #[instrument(skip(self, filter))]
    pub async fn load_more(&self, count: usize, filter: Option<&ContentFilter>) -> LoadOutcome {
        let (generation, request, hint_filter) = {
            let mut state = self.lock();
            if state.loading {
                debug!("load already in flight, skipping");
                return LoadOutcome::InFlight;
            }
            if state.initialized && !state.cursor.has_more {
                trace!("listing exhausted, skipping");
                return LoadOutcome::Exhausted;
            }

            state.loading = true;
            let request = PageRequest::new(
                count.max(1).saturating_add(self.config.overfetch),
                state.cursor.token.clone(),
            );
            let hint_filter = filter.filter(|_| !state.initialized && state.total_hint.is_none());
            (state.generation, request, hint_filter)
        };
        let mut loading = LoadingFlag {
            state: &self.state,
            generation,
            armed: true,
        };

        if let Some(filter) = hint_filter {
            match self.source.count_matching(filter).await {
                Ok(Some(total)) => {
                    let mut state = self.lock();
                    if state.generation == generation {
                        debug!(total, "total count hint");
                        state.total_hint = Some(total);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "total count lookup failed"),
            }

            if self.lock().generation != generation {
                debug!("reset during count lookup, dropping request");
                return LoadOutcome::Stale;
            }
        }

        debug!(count = request.count, after = ?request.after, "fetching page");
        let result = self.source.fetch_page(&request).await;
        loading.armed = false;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                started = generation,
                current = state.generation,
                "dropping response from before reset"
            );
            return LoadOutcome::Stale;
        }

        state.loading = false;
        state.initialized = true;

        match result {
            Ok(page) => {
                state.cursor.advance(&page);
                let (added, skipped_duplicates) = state.merge(page.items);
                debug!(
                    added,
                    skipped_duplicates,
                    total = state.items.len(),
                    has_more = state.cursor.has_more,
                    "merged page"
                );
                LoadOutcome::Appended {
                    added,
                    skipped_duplicates,
                }
            }
            Err(e) => {
                warn!(error = %e, "page fetch failed, treating as final empty page");
                state.cursor.exhaust();
                LoadOutcome::Failed
            }
        }
    }

    /// Drop everything fetched and start over.
    ///
    /// Any request still in flight will find its generation stale and be
    /// discarded when it completes.
    pub fn reset(&self) {
        let mut state = self.lock();
        let generation = state.generation.wrapping_add(1);
        *state = State {
            generation,
            ..State::default()
        };
        debug!(generation, "accumulator reset");
    }

    /// Copy of all accumulated items, in fetch order.
    pub fn items(&self) -> Vec<ContentItem> {
        self.lock().items.clone()
    }

    /// Accumulated items that pass a filter.
    pub fn visible(&self, filter: &ContentFilter) -> Vec<ContentItem> {
        self.lock()
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Number of accumulated items passing an optional filter.
    pub fn count_visible(&self, filter: Option<&ContentFilter>) -> usize {
        let state = self.lock();
        match filter {
            Some(filter) => state.items.iter().filter(|i| filter.matches(i)).count(),
            None => state.items.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    pub fn has_more(&self) -> bool {
        self.lock().cursor.has_more
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn total_hint(&self) -> Option<u64> {
        self.lock().total_hint
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            items: state.items.clone(),
            cursor: state.cursor.clone(),
            loading: state.loading,
            initialized: state.initialized,
            total_hint: state.total_hint,
            phase: state.phase(),
            generation: state.generation,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is always left consistent between statements, so a panic
        // elsewhere does not invalidate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
