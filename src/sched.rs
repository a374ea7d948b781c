//! Deterministic stage scheduling.
//!
//! Timed effects are expressed as `(fire_at_ms, stage)` entries on a single
//! queue instead of chained wall-clock timers. The owner drives the queue
//! with `advance_to`, which makes every timing-sensitive sequence replayable
//! under a virtual clock in tests. Entries scheduled for the same instant
//! fire in insertion order.

#[derive(Clone, Debug)]
struct Entry<S> {
    fire_at_ms: u64,
    seq: u64,
    stage: S,
}

#[derive(Clone, Debug)]
pub struct StageSchedule<S> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Entry<S>>,
}

impl<S> Default for StageSchedule<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StageSchedule<S> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedules a stage `delay_ms` after the schedule's current time.
    pub fn schedule_after(&mut self, delay_ms: u64, stage: S) {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), stage);
    }

    /// Schedules a stage at an absolute instant. Instants already in the
    /// past fire on the next `advance_to`.
    pub fn schedule_at(&mut self, fire_at_ms: u64, stage: S) {
        self.pending.push(Entry {
            fire_at_ms,
            seq: self.next_seq,
            stage,
        });
        self.next_seq += 1;
    }

    /// Moves the clock forward and returns every stage that came due, in
    /// (fire time, insertion) order. The clock never moves backward; a stale
    /// `now_ms` fires nothing.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<S> {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;

        let mut due: Vec<Entry<S>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].fire_at_ms <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.fire_at_ms, e.seq));
        due.into_iter().map(|e| e.stage).collect()
    }
}
