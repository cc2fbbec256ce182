//! Running estimate of the effective coefficient of restitution
//!
//! Between one apex and the next, energy conservation over a single idealized
//! bounce gives h_n / h_{n-1} = r^2, so each new observed peak republishes
//! the estimate sqrt(h_n / h_{n-1}). The estimate is overwritten, never
//! averaged, so it tracks the coefficient as the user adjusts it mid-run.

/// Peak record plus the current estimate derived from its last two entries.
#[derive(Debug, Clone)]
pub struct RestitutionEstimator {
    peaks: Vec<f64>,
    estimate: Option<f64>,
    peak_eps: f64, // peaks at or below this are numerical noise near rest
}

impl RestitutionEstimator {
    pub fn new(peak_eps: f64) -> Self {
        Self {
            peaks: Vec::new(),
            estimate: None,
            peak_eps,
        }
    }

    /// Record an observed apex height.
    ///
    /// Heights at or below `peak_eps` are discarded silently; the same bound
    /// guards the division, so no estimate is ever produced from a
    /// near-zero denominator.
    pub fn observe_peak(&mut self, height: f64) {
        if height <= self.peak_eps {
            return;
        }
        self.peaks.push(height);

        let n = self.peaks.len();
        if n >= 2 {
            let prev = self.peaks[n - 2];
            if prev > self.peak_eps {
                self.estimate = Some((self.peaks[n - 1] / prev).sqrt());
            }
        }
    }

    /// `None` until two peaks have been accepted.
    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    pub fn clear(&mut self) {
        self.peaks.clear();
        self.estimate = None;
    }
}
