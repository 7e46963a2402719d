use crate::foundation::core::Millis;

/// Handle to one scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer<E> {
    id: TimerId,
    due: Millis,
    event: E,
}

/// Owned set of fire-once timers.
///
/// Every handle is collected here at schedule time, so a single [`clear`](Self::clear) (or
/// dropping the set) releases all of them and nothing can fire afterwards.
#[derive(Clone, Debug)]
pub struct TimerSet<E> {
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<E> TimerSet<E> {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `due`.
    pub fn schedule(&mut self, due: Millis, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due, event });
        id
    }

    /// Cancel one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel everything; returns how many timers were pending.
    pub fn clear(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    /// Remove and return every event due at or before `now`, earliest first.
    ///
    /// Timers due at the same instant fire in scheduling order.
    pub fn take_due(&mut self, now: Millis) -> Vec<E> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due.0.total_cmp(&b.due.0).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| t.event).collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers
            .iter()
            .map(|t| t.due)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}
