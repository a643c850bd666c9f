//! Snapshot hand-off from the control thread to the audio thread.
//!
//! Snapshots travel by value through a single-producer single-consumer ring
//! buffer. The producer writes a whole snapshot before advancing the ring's
//! write index, so the reader only ever sees complete values: fully old or
//! fully new. The reader drains the ring at the start of each callback and
//! keeps the newest value; it never waits on the control thread.
//!
//! When the ring is full the publisher writes into a single overflow slot
//! instead, overwriting whatever is there, and keeps doing so until the
//! reader has taken it. Everything in the ring is therefore older than the
//! slot. The reader only touches the slot when the `occupied` flag is set,
//! and then with `try_lock`: on contention it leaves the slot for the next
//! callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::params::SynthesisParameters;

struct Overflow {
    occupied: AtomicBool,
    slot: Mutex<Option<SynthesisParameters>>,
}

/// Create a connected publisher/reader pair. Both sides start at `initial`.
pub fn snapshot_channel(
    capacity: usize,
    initial: SynthesisParameters,
) -> (SnapshotPublisher, SnapshotReader) {
    let rb = HeapRb::<SynthesisParameters>::new(capacity.max(1));
    let (producer, consumer) = rb.split();
    let overflow = Arc::new(Overflow {
        occupied: AtomicBool::new(false),
        slot: Mutex::new(None),
    });
    (
        SnapshotPublisher {
            producer,
            overflow: overflow.clone(),
            last: initial,
        },
        SnapshotReader {
            consumer,
            overflow,
            current: initial,
        },
    )
}

/// Control-thread side of the hand-off.
pub struct SnapshotPublisher {
    producer: HeapProd<SynthesisParameters>,
    overflow: Arc<Overflow>,
    last: SynthesisParameters,
}

impl SnapshotPublisher {
    /// Publish a snapshot. The reader picks it up on its next `latest` call.
    ///
    /// Returns false if the ring was full and the snapshot went to the
    /// overflow slot instead.
    pub fn publish(&mut self, params: SynthesisParameters) -> bool {
        self.last = params;
        if !self.overflow.occupied.load(Ordering::Acquire)
            && self.producer.try_push(params).is_ok()
        {
            return true;
        }
        let mut slot = self
            .overflow
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(params);
        self.overflow.occupied.store(true, Ordering::Release);
        false
    }

    /// Whether a snapshot is sitting in the overflow slot.
    pub fn overflowed(&self) -> bool {
        self.overflow.occupied.load(Ordering::Acquire)
    }

    /// The most recently published snapshot.
    pub fn last(&self) -> &SynthesisParameters {
        &self.last
    }
}

/// Audio-thread side of the hand-off.
pub struct SnapshotReader {
    consumer: HeapCons<SynthesisParameters>,
    overflow: Arc<Overflow>,
    current: SynthesisParameters,
}

impl SnapshotReader {
    /// Drain everything published so far and return the newest snapshot.
    ///
    /// Never blocks and never allocates; call once at the start of a
    /// callback and hold the result for the whole callback.
    #[inline]
    pub fn latest(&mut self) -> &SynthesisParameters {
        while let Some(next) = self.consumer.try_pop() {
            self.current = next;
        }
        if self.overflow.occupied.load(Ordering::Acquire) {
            self.take_overflow();
        }
        &self.current
    }

    fn take_overflow(&mut self) {
        let mut slot = match self.overflow.slot.try_lock() {
            Ok(slot) => slot,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        if let Some(params) = slot.take() {
            self.current = params;
        }
        self.overflow.occupied.store(false, Ordering::Release);
    }

    /// The snapshot returned by the last `latest` call, without draining.
    pub fn current(&self) -> &SynthesisParameters {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_ir::ThemeId;

    #[test]
    fn reader_starts_at_initial() {
        let initial = SynthesisParameters::initial().with_theme(ThemeId::Focus);
        let (_publisher, mut reader) = snapshot_channel(4, initial);
        assert_eq!(*reader.latest(), initial);
    }

    #[test]
    fn latest_wins() {
        let initial = SynthesisParameters::initial();
        let (mut publisher, mut reader) = snapshot_channel(8, initial);
        let a = initial.with_theme(ThemeId::Crisis);
        let b = a.with_tension(0.5);
        let c = b.with_master_volume(0.9);
        assert!(publisher.publish(a));
        assert!(publisher.publish(b));
        assert!(publisher.publish(c));
        assert_eq!(*reader.latest(), c);
        // nothing new: stays on c
        assert_eq!(*reader.latest(), c);
        assert_eq!(*reader.current(), c);
    }

    #[test]
    fn full_ring_reaches_reader_without_another_publish() {
        let initial = SynthesisParameters::initial().with_theme(ThemeId::Crisis);
        let (mut publisher, mut reader) = snapshot_channel(2, initial);
        let a = initial.with_tension(0.1);
        let b = a.with_tension(0.2);
        let stop = b.stopped();
        assert!(publisher.publish(a));
        assert!(publisher.publish(b));
        assert!(!publisher.publish(stop));
        assert!(publisher.overflowed());
        assert_eq!(*publisher.last(), stop);

        assert_eq!(*reader.latest(), stop);
        assert!(!reader.latest().playing);
        assert!(!publisher.overflowed());
    }

    #[test]
    fn overflow_keeps_newest_and_ring_resumes() {
        let initial = SynthesisParameters::initial();
        let (mut publisher, mut reader) = snapshot_channel(1, initial);
        let a = initial.with_tension(0.1);
        let b = a.with_tension(0.2);
        let c = b.with_tension(0.3);
        assert!(publisher.publish(a));
        assert!(!publisher.publish(b));
        // slot still occupied: c overwrites b
        assert!(!publisher.publish(c));
        assert_eq!(*reader.latest(), c);

        let d = c.with_tension(0.4);
        assert!(publisher.publish(d));
        assert_eq!(*reader.latest(), d);
    }

    #[test]
    fn zero_capacity_is_rounded_up() {
        let initial = SynthesisParameters::initial();
        let (mut publisher, mut reader) = snapshot_channel(0, initial);
        assert!(publisher.publish(initial.with_tension(1.0)));
        assert_eq!(reader.latest().tension, 1.0);
    }
}
