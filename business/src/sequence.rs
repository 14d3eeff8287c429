//! Monotonic request tickets.
//!
//! Rapid page changes or searches can leave several list requests in flight.
//! Each request takes a ticket; when responses come back only the one holding
//! the latest ticket is applied, the rest are dropped.

/// Opaque ticket handed out by [`RequestSequence::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Whether a response tagged with `ticket` may be applied.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// A response value tagged with the ticket of the request that produced it.
#[derive(Debug, Clone)]
pub struct Sequenced<T> {
    pub ticket: RequestTicket,
    pub value: T,
}

impl<T> Sequenced<T> {
    pub fn new(ticket: RequestTicket, value: T) -> Self {
        Self { ticket, value }
    }

    /// Unwrap the value if its ticket is still current, logging the drop otherwise.
    pub fn accept(self, sequence: &RequestSequence) -> Option<T> {
        if sequence.is_current(self.ticket) {
            Some(self.value)
        } else {
            log::debug!(
                "dropping stale response (ticket {}, latest {})",
                self.ticket.0,
                sequence.latest
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut seq = RequestSequence::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(first < second);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut seq = RequestSequence::new();
        let page_two = seq.issue();
        let page_three = seq.issue();

        // page 3 answers first, then the slower page 2 response arrives
        assert_eq!(Sequenced::new(page_three, 3).accept(&seq), Some(3));
        assert_eq!(Sequenced::new(page_two, 2).accept(&seq), None);
    }

    #[test]
    fn test_invalidate_drops_everything_outstanding() {
        let mut seq = RequestSequence::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(Sequenced::new(ticket, ()).accept(&seq).is_none());
    }
}
