//! Host environment seam for the memo viewer.
//!
//! # Responsibility
//! - Abstract the document-level side effects the viewer needs.
//! - Pair scroll lock and key subscription in one scoped guard.
//!
//! # Invariants
//! - Every acquired lease releases both resources exactly once.

use log::debug;
use std::rc::Rc;

/// Document-level facilities provided by the embedding UI.
///
/// Methods take `&self`; hosts use interior mutability for their own state.
pub trait ViewerHost {
    /// Prevents the page behind the modal from scrolling.
    fn lock_scroll(&self);
    /// Restores background scrolling.
    fn unlock_scroll(&self);
    /// Starts routing key-down events to the viewer.
    fn subscribe_keys(&self);
    /// Stops routing key-down events to the viewer.
    fn unsubscribe_keys(&self);
    /// Shows a blocking yes/no prompt and returns the answer.
    fn confirm(&self, message: &str) -> bool;
}

/// Scoped ownership of the scroll lock and key subscription.
///
/// Acquired when the viewer opens; dropping it releases both resources,
/// whether the viewer closed normally, lost its memo, or was dropped.
pub struct HostLease<H: ViewerHost> {
    host: Rc<H>,
}

impl<H: ViewerHost> HostLease<H> {
    pub fn acquire(host: Rc<H>) -> Self {
        host.subscribe_keys();
        host.lock_scroll();
        debug!("event=viewer_lease module=viewer status=acquired");
        Self { host }
    }
}

impl<H: ViewerHost> Drop for HostLease<H> {
    fn drop(&mut self) {
        self.host.unsubscribe_keys();
        self.host.unlock_scroll();
        debug!("event=viewer_lease module=viewer status=released");
    }
}

#[cfg(test)]
mod tests {
    use super::{HostLease, ViewerHost};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct TraceHost {
        calls: RefCell<Vec<&'static str>>,
    }

    impl ViewerHost for TraceHost {
        fn lock_scroll(&self) {
            self.calls.borrow_mut().push("lock");
        }
        fn unlock_scroll(&self) {
            self.calls.borrow_mut().push("unlock");
        }
        fn subscribe_keys(&self) {
            self.calls.borrow_mut().push("subscribe");
        }
        fn unsubscribe_keys(&self) {
            self.calls.borrow_mut().push("unsubscribe");
        }
        fn confirm(&self, _message: &str) -> bool {
            false
        }
    }

    #[test]
    fn lease_releases_in_reverse_pairs_on_drop() {
        let host = Rc::new(TraceHost::default());
        let lease = HostLease::acquire(Rc::clone(&host));
        assert_eq!(*host.calls.borrow(), vec!["subscribe", "lock"]);

        drop(lease);
        assert_eq!(
            *host.calls.borrow(),
            vec!["subscribe", "lock", "unsubscribe", "unlock"]
        );
    }
}
