//! Stale-response guard for data fetches

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Issues fetch tickets; only the most recent one is current
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest: u64,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any outstanding one
    pub fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Whether a completed fetch may still be applied
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut guard = FetchGuard::new();
        let first = guard.issue();
        assert!(guard.is_current(first));

        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
        assert!(second.id() > first.id());
    }
}
