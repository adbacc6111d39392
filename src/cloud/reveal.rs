use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Staged reveal of a fixed list of items on a virtual clock.
///
/// Item `idx` becomes due at `idx * delay` after scheduling. Each call to
/// [`RevealScheduler::advance`] moves the clock and hands every newly due
/// item to the caller exactly once. Completion is raised by the single
/// `advance` call after which every item has been revealed; an empty
/// schedule completes on its first `advance`.
#[derive(Debug, Clone)]
pub struct RevealScheduler<T> {
    items: Vec<T>,
    pending: BinaryHeap<Reverse<(Duration, usize)>>,
    elapsed: Duration,
    revealed: usize,
    finished_at: Option<Duration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealTick {
    /// Items materialized during this tick.
    pub revealed: usize,
    /// Set on exactly one tick over the scheduler's lifetime.
    pub finished: bool,
}

impl<T> RevealScheduler<T> {
    pub fn schedule(items: Vec<T>, delay: Duration) -> Self {
        let pending = (0..items.len())
            .map(|idx| Reverse((due_after(delay, idx), idx)))
            .collect();
        Self {
            items,
            pending,
            elapsed: Duration::ZERO,
            revealed: 0,
            finished_at: None,
        }
    }

    pub fn advance<F>(&mut self, dt: Duration, mut materialize: F) -> RevealTick
    where
        F: FnMut(usize, &T),
    {
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut tick = RevealTick::default();

        while let Some(&Reverse((due, idx))) = self.pending.peek() {
            if due > self.elapsed {
                break;
            }
            self.pending.pop();
            materialize(idx, &self.items[idx]);
            self.revealed += 1;
            tick.revealed += 1;
        }

        if self.finished_at.is_none() && self.revealed == self.items.len() {
            self.finished_at = Some(self.elapsed);
            tick.finished = true;
        }
        tick
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Logical time at which completion was raised.
    pub fn finished_at(&self) -> Option<Duration> {
        self.finished_at
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse((due, _))| *due)
    }
}

fn due_after(delay: Duration, idx: usize) -> Duration {
    delay.saturating_mul(u32::try_from(idx).unwrap_or(u32::MAX))
}
