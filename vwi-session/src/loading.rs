//! Request correlation and the loading indicator.

use std::fmt;

/// Identifies one dispatched request. Ids increase monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks the most recently initiated request.
///
/// The indicator is on from `begin` until the latest request finishes.
/// Finishing an older request leaves it on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadingTracker {
    next: u64,
    latest: Option<RequestId>,
}

impl LoadingTracker {
    pub fn begin(&mut self) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        self.latest = Some(id);
        id
    }

    /// Returns `true` if this cleared the indicator.
    pub fn finish(&mut self, id: RequestId) -> bool {
        if self.latest == Some(id) {
            self.latest = None;
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.latest.is_some()
    }

    /// Turn the indicator off without touching the id counter.
    pub fn reset(&mut self) {
        self.latest = None;
    }
}
