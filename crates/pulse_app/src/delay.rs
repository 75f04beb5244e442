//! Frame-clocked delayed actions
//!
//! A timer queue advanced by the same frame clock that ticks the widgets, so
//! delayed work runs on the UI loop in a deterministic order.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct DelayId;
}

struct Pending<T> {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    payload: T,
}

/// Queue of payloads that come due after a delay
pub struct DelayQueue<T> {
    pending: SlotMap<DelayId, Pending<T>>,
    now_ms: f64,
    next_seq: u64,
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            now_ms: 0.0,
            next_seq: 0,
        }
    }

    /// Schedule `payload` to come due `delay_ms` from now
    pub fn after(&mut self, delay_ms: f32, payload: T) -> DelayId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_ms = self.now_ms + f64::from(delay_ms.max(0.0));
        tracing::trace!(delay_ms, due_ms, "delay scheduled");
        self.pending.insert(Pending {
            due_ms,
            seq,
            payload,
        })
    }

    /// Cancel a pending entry, returning its payload if it had not fired
    pub fn cancel(&mut self, id: DelayId) -> Option<T> {
        self.pending.remove(id).map(|pending| pending.payload)
    }

    pub fn is_pending(&self, id: DelayId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time advanced so far
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Milliseconds until the next entry comes due
    pub fn next_due_in(&self) -> Option<f64> {
        self.pending
            .values()
            .map(|pending| (pending.due_ms - self.now_ms).max(0.0))
            .min_by(f64::total_cmp)
    }

    /// Advance the clock and return every payload that came due, in due order
    pub fn advance(&mut self, dt_ms: f32) -> Vec<T> {
        self.now_ms += f64::from(dt_ms.max(0.0));

        let mut due: Vec<(f64, u64, DelayId)> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.due_ms <= self.now_ms)
            .map(|(id, pending)| (pending.due_ms, pending.seq, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, _, id)| self.pending.remove(id))
            .map(|pending| pending.payload)
            .collect()
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
