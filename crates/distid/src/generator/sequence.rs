use core::cmp::Ordering;

use crate::Layout;

/// Outcome of asking the [`SequenceClock`] for a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A counter was issued for `timestamp`.
    Issued { timestamp: u64, counter: u64 },
    /// Every counter for the current millisecond has been issued.
    ///
    /// `first` is set when the previous call did not also report an
    /// exhausted tick, so callers can report the overflow once instead of
    /// once per retry.
    Exhausted { first: bool },
    /// The clock reads `behind` milliseconds earlier than the last issued
    /// timestamp. `first` follows the same rule as for `Exhausted`.
    Behind { behind: u64, first: bool },
}

/// Per-node counter state: the last timestamp a counter was issued for, and
/// the next counter to hand out within it.
///
/// The counter resets to zero whenever time moves forward and increases by
/// one per issued ID otherwise, so a (timestamp, counter) pair is never issued
/// twice. When the clock reads earlier than the last issued timestamp, no
/// counter is issued until it catches up.
///
/// ```
/// use distid::{Layout, SequenceClock, Tick};
///
/// let mut clock = SequenceClock::new(Layout::default());
/// assert_eq!(clock.next(5), Tick::Issued { timestamp: 5, counter: 0 });
/// assert_eq!(clock.next(5), Tick::Issued { timestamp: 5, counter: 1 });
/// assert_eq!(clock.next(6), Tick::Issued { timestamp: 6, counter: 0 });
/// ```
/// Why the clock last refused to issue a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stall {
    None,
    Exhausted,
    Behind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceClock {
    last_timestamp: u64,
    counter: u64,
    max_counter: u64,
    stall: Stall,
}

impl SequenceClock {
    pub const fn new(layout: Layout) -> Self {
        Self {
            last_timestamp: 0,
            counter: 0,
            max_counter: layout.max_counter(),
            stall: Stall::None,
        }
    }

    pub const fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    /// Attempts to issue a counter for relative timestamp `now`.
    pub fn next(&mut self, now: u64) -> Tick {
        match now.cmp(&self.last_timestamp) {
            Ordering::Greater => {
                self.last_timestamp = now;
                self.counter = 0;
            }
            Ordering::Equal => {
                if self.counter > self.max_counter {
                    return Tick::Exhausted {
                        first: self.enter(Stall::Exhausted),
                    };
                }
            }
            Ordering::Less => return self.cold_clock_behind(now),
        }

        let counter = self.counter;
        self.counter += 1;
        self.stall = Stall::None;
        Tick::Issued {
            timestamp: now,
            counter,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&mut self, now: u64) -> Tick {
        Tick::Behind {
            behind: self.last_timestamp - now,
            first: self.enter(Stall::Behind),
        }
    }

    /// Records a stall of `kind`, returning whether it differs from the
    /// previous refusal.
    fn enter(&mut self, kind: Stall) -> bool {
        core::mem::replace(&mut self.stall, kind) != kind
    }
}
