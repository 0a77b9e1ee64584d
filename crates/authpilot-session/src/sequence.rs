use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;

/// Identity of one generation request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Orders generation requests so at most one is in flight and only the
/// newest result is ever applied.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    issued: u64,
    in_flight: Option<GenerationTicket>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a request unless one is already running.
    pub fn try_begin(&mut self) -> Result<GenerationTicket, SessionError> {
        if self.is_busy() {
            return Err(SessionError::GenerationInFlight);
        }
        Ok(self.issue())
    }

    /// Start a request, making any running one stale.
    pub fn supersede(&mut self) -> GenerationTicket {
        if let Some(previous) = self.in_flight {
            info!(superseded = previous.0, "superseding in-flight generation");
        }
        self.issue()
    }

    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Accept a result for `ticket`. Returns `None` and drops the result when
    /// a newer request has been issued since.
    pub fn complete<T>(&mut self, ticket: GenerationTicket, result: T) -> Option<T> {
        if !self.is_current(ticket) {
            info!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale generation result"
            );
            return None;
        }
        self.in_flight = None;
        Some(result)
    }

    fn issue(&mut self) -> GenerationTicket {
        self.issued += 1;
        let ticket = GenerationTicket(self.issued);
        self.in_flight = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_request_at_a_time() {
        let mut tracker = GenerationTracker::new();
        assert!(!tracker.is_busy());

        let ticket = tracker.try_begin().unwrap();
        assert!(tracker.is_busy());
        assert!(matches!(
            tracker.try_begin(),
            Err(SessionError::GenerationInFlight)
        ));

        assert_eq!(tracker.complete(ticket, "letter"), Some("letter"));
        assert!(!tracker.is_busy());
        assert!(tracker.try_begin().is_ok());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut tracker = GenerationTracker::new();
        let first = tracker.try_begin().unwrap();
        let second = tracker.supersede();
        assert!(second > first);

        assert_eq!(tracker.complete(first, "old"), None);
        assert!(tracker.is_busy());
        assert_eq!(tracker.complete(second, "new"), Some("new"));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn completed_ticket_cannot_complete_twice() {
        let mut tracker = GenerationTracker::new();
        let ticket = tracker.try_begin().unwrap();
        assert!(tracker.complete(ticket, ()).is_some());
        assert!(tracker.complete(ticket, ()).is_none());
    }
}
