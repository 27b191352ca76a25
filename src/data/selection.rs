use {
    crate::config::DF,
    std::sync::atomic::{AtomicU64, Ordering},
};

/// Identity of one user selection. Only the newest ticket's results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionTicket(u64);

impl SelectionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Last-write-wins by selection, not by arrival.
///
/// A slow fetch for an old selection can finish after a fast one for the new
/// selection; its result is dropped instead of overwriting the newer view.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    latest: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection, superseding every earlier ticket.
    pub fn begin(&self) -> SelectionTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        if DF.log_selection {
            log::debug!("selection #{} started", generation);
        }
        SelectionTicket(generation)
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// `Some(value)` if `ticket` is still the latest selection.
    pub fn accept<T>(&self, ticket: SelectionTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            if DF.log_selection {
                log::debug!(
                    "discarding result of selection #{} (latest is #{})",
                    ticket.0,
                    self.latest.load(Ordering::Acquire)
                );
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_selection_supersedes_older() {
        let tracker = SelectionTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(second > first);
        assert!(!tracker.is_current(first));

        // The older result arrives last and is still discarded.
        assert_eq!(tracker.accept(second, "new"), Some("new"));
        assert_eq!(tracker.accept(first, "old"), None);
    }

    #[test]
    fn tickets_are_unique_across_threads() {
        let tracker = std::sync::Arc::new(SelectionTracker::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    (0..100).map(|_| tracker.begin().generation()).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(all.last(), Some(&400));
    }
}
