// File: crates/streamline-core/src/series.rs
// Summary: Append-only time series store with running bounds and floor-respecting pruning.
// Notes:
// - `TimeSeries` is a shared handle. Cloning it yields another handle to the same
//   samples, so a producer can keep appending while one or more charts read.
// - Everything runs on the host's single frame thread; the handle is `!Send`.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::types::{Sample, Timestamp};

#[derive(Debug, Default)]
struct SeriesBuffer {
    data: VecDeque<Sample>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    disabled: bool,
}

impl SeriesBuffer {
    /// Index just past the last sample with a timestamp `<= timestamp`.
    fn insertion_point(&self, timestamp: Timestamp) -> usize {
        match self.data.back() {
            Some(last) if last.timestamp <= timestamp => self.data.len(),
            None => 0,
            Some(_) => self.data.partition_point(|s| s.timestamp <= timestamp),
        }
    }

    fn observe(&mut self, value: f64) {
        self.max_value = Some(self.max_value.map_or(value, |m| m.max(value)));
        self.min_value = Some(self.min_value.map_or(value, |m| m.min(value)));
    }
}

/// Ordered buffer of samples for one metric.
#[derive(Clone, Default)]
pub struct TimeSeries {
    inner: Rc<RefCell<SeriesBuffer>>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from samples, keeping timestamp order.
    pub fn from_samples(samples: impl IntoIterator<Item = (Timestamp, f64)>) -> Self {
        let series = Self::new();
        for (timestamp, value) in samples {
            series.append(timestamp, value);
        }
        series
    }

    /// Add a sample. In-order timestamps are pushed at the end; an older
    /// timestamp is inserted after any samples with an equal or smaller time.
    pub fn append(&self, timestamp: Timestamp, value: f64) {
        let mut buf = self.inner.borrow_mut();
        let pos = buf.insertion_point(timestamp);
        if pos == buf.data.len() {
            buf.data.push_back(Sample::new(timestamp, value));
        } else {
            buf.data.insert(pos, Sample::new(timestamp, value));
        }
        buf.observe(value);
    }

    /// Like [`append`](Self::append), except that a sample with exactly
    /// `timestamp` is updated in place: `sum_repeated` adds `value` to it,
    /// otherwise `value` replaces it.
    pub fn append_with(&self, timestamp: Timestamp, value: f64, sum_repeated: bool) {
        let mut buf = self.inner.borrow_mut();
        let pos = buf.insertion_point(timestamp);
        if pos > 0 && buf.data[pos - 1].timestamp == timestamp {
            let slot = &mut buf.data[pos - 1];
            slot.value = if sum_repeated { slot.value + value } else { value };
            let updated = slot.value;
            buf.observe(updated);
            return;
        }
        drop(buf);
        self.append(timestamp, value);
    }

    /// Recompute bounds from the retained samples only.
    pub fn reset_bounds(&self) {
        let mut buf = self.inner.borrow_mut();
        buf.min_value = None;
        buf.max_value = None;
        for i in 0..buf.data.len() {
            let v = buf.data[i].value;
            buf.observe(v);
        }
    }

    /// Drop samples that scrolled off the left edge.
    ///
    /// Sample `i` goes only while sample `i + 1` is also older than
    /// `oldest_valid_time`, so one expired sample survives to draw the line
    /// entering from off-screen. Never leaves fewer than `max(min_retained, 1)`
    /// samples. Returns how many were removed.
    pub fn drop_old_data(&self, oldest_valid_time: Timestamp, min_retained: usize) -> usize {
        let mut buf = self.inner.borrow_mut();
        let floor = min_retained.max(1);
        let len = buf.data.len();
        let mut remove = 0usize;
        while len - remove > floor && buf.data[remove + 1].timestamp < oldest_valid_time {
            remove += 1;
        }
        if remove > 0 {
            buf.data.drain(..remove);
        }
        remove
    }

    /// Remove all samples and forget the bounds.
    pub fn clear(&self) {
        let mut buf = self.inner.borrow_mut();
        buf.data.clear();
        buf.min_value = None;
        buf.max_value = None;
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().data.is_empty()
    }

    /// Smallest value seen since creation or the last [`reset_bounds`](Self::reset_bounds).
    pub fn min_value(&self) -> Option<f64> {
        self.inner.borrow().min_value
    }

    /// Largest value seen since creation or the last [`reset_bounds`](Self::reset_bounds).
    pub fn max_value(&self) -> Option<f64> {
        self.inner.borrow().max_value
    }

    pub fn first(&self) -> Option<Sample> {
        self.inner.borrow().data.front().copied()
    }

    pub fn last(&self) -> Option<Sample> {
        self.inner.borrow().data.back().copied()
    }

    pub fn sample(&self, index: usize) -> Option<Sample> {
        self.inner.borrow().data.get(index).copied()
    }

    /// Copy of the retained samples, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        self.inner.borrow().data.iter().copied().collect()
    }

    /// Borrow the retained samples as one contiguous slice.
    ///
    /// Reads of the same store (`len`, nested `with_samples`) are fine inside
    /// `f`; appending or pruning it there panics.
    pub fn with_samples<R>(&self, f: impl FnOnce(&[Sample]) -> R) -> R {
        let wrapped = !self.inner.borrow().data.as_slices().1.is_empty();
        if wrapped {
            self.inner.borrow_mut().data.make_contiguous();
        }
        let buf: Ref<'_, SeriesBuffer> = self.inner.borrow();
        let (head, _) = buf.data.as_slices();
        f(head)
    }

    /// Index of the sample whose timestamp is closest to `t` (earlier wins ties).
    pub fn nearest_index(&self, t: Timestamp) -> Option<usize> {
        let buf = self.inner.borrow();
        if buf.data.is_empty() {
            return None;
        }
        let upper = buf.data.partition_point(|s| s.timestamp < t);
        if upper == 0 {
            return Some(0);
        }
        if upper == buf.data.len() {
            return Some(upper - 1);
        }
        let before = t - buf.data[upper - 1].timestamp;
        let after = buf.data[upper].timestamp - t;
        Some(if after < before { upper } else { upper - 1 })
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    /// Hidden series keep their data but are skipped by scaling and painting.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.borrow_mut().disabled = disabled;
    }

    /// True when both handles point at the same underlying store.
    pub fn same_store(&self, other: &TimeSeries) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.inner.borrow();
        f.debug_struct("TimeSeries")
            .field("len", &buf.data.len())
            .field("min_value", &buf.min_value)
            .field("max_value", &buf.max_value)
            .field("disabled", &buf.disabled)
            .finish()
    }
}
