//! Per-frame call result cache
//!
//! A call is realized by pushing a frame and suspending the calling
//! statement. When the callee returns, its value lands in the caller's
//! pending slot under the call-site identity, and the caller's statement is
//! replayed from the top. The replay reaches the same call expression again
//! and consumes the value.
//!
//! Consumed values move into a replay log that lives until the statement
//! completes. A statement with several calls (`f(1) + f(2)`) is replayed once
//! per call, and each replay must see every earlier result again without
//! re-dispatching it.

use crate::ast::CallSiteId;
use crate::value::Value;
use std::collections::HashMap;

/// Call result cache for one frame
#[derive(Debug, Default, Clone)]
pub struct CallCache {
    /// Result delivered by a returning callee, not yet consumed
    pending: Option<(CallSiteId, Value)>,
    /// Results already consumed by the statement in progress
    replay: HashMap<CallSiteId, Value>,
}

impl CallCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a callee's return value for `site`.
    ///
    /// The slot is empty here: the statement that dispatched the call
    /// consumed any earlier result before reaching it.
    pub fn fill(&mut self, site: CallSiteId, value: Value) {
        debug_assert!(self.pending.is_none(), "pending slot already occupied");
        self.pending = Some((site, value));
    }

    /// Look up the result for `site`, consuming the pending slot if it
    /// holds that site.
    pub fn take(&mut self, site: CallSiteId) -> Option<Value> {
        match self.pending {
            Some((pending_site, value)) if pending_site == site => {
                self.pending = None;
                self.replay.insert(site, value);
                Some(value)
            }
            _ => self.replay.get(&site).copied(),
        }
    }

    /// Pending entry, if any
    pub fn pending(&self) -> Option<(CallSiteId, Value)> {
        self.pending
    }

    /// Forget everything; called when the statement completes.
    pub fn clear(&mut self) {
        self.pending = None;
        self.replay.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none() && self.replay.is_empty()
    }
}
