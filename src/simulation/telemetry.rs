//! Fixed-capacity ring buffer for the height-vs-time trace
//!
//! Stores (simulation time, height) samples in a circular array with a
//! single write cursor. Once full, the logically oldest slot is overwritten
//! on every push, so memory stays bounded and push is O(1). Unwritten slots
//! carry a negative sentinel time and are skipped on iteration.

/// Default number of live samples, matching the reference trace length.
pub const DEFAULT_CAPACITY: usize = 600;

/// Sentinel time marking a slot that has never been written.
const UNWRITTEN: f64 = -1.0;

/// One telemetry sample: simulation time and the body height at that time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub h: f64,
}

/// Circular sample store with a fixed capacity and a write cursor.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    cursor: usize, // next slot to write; also the logically oldest slot
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: vec![
                Sample {
                    t: UNWRITTEN,
                    h: 0.0
                };
                capacity
            ],
            cursor: 0,
        }
    }

    /// Write one sample at the cursor and advance it, overwriting the oldest
    /// entry once the buffer has wrapped.
    pub fn push(&mut self, t: f64, h: f64) {
        self.samples[self.cursor] = Sample { t, h };
        self.cursor = (self.cursor + 1) % self.samples.len();
    }

    /// Chronological walk over the live samples, oldest first.
    ///
    /// Walks every slot starting at the cursor and wrapping once, skipping
    /// slots still holding the sentinel. Restartable: each call yields a
    /// fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        let capacity = self.samples.len();
        (0..capacity)
            .map(move |k| self.samples[(self.cursor + k) % capacity])
            .filter(|s| s.t >= 0.0)
    }

    /// Number of live samples.
    pub fn len(&self) -> usize {
        self.samples.iter().filter(|s| s.t >= 0.0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Drop every sample and rewind the cursor.
    pub fn clear(&mut self) {
        for slot in &mut self.samples {
            *slot = Sample {
                t: UNWRITTEN,
                h: 0.0,
            };
        }
        self.cursor = 0;
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
