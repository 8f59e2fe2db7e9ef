/// Time and height samples of one ascent. `time[k] == k * h`, `height[k]` is the
/// height at that time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectorySeries {
    time: Vec<f64>,
    height: Vec<f64>,
}

/// Where one flight phase ended, enough to seed the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseEnd {
    pub time: f64,
    pub height: f64,
    pub velocity: f64,
}

impl TrajectorySeries {
    pub(crate) fn with_len(len: usize) -> Self {
        TrajectorySeries {
            time: vec![0.0; len],
            height: vec![0.0; len],
        }
    }

    /// Builds a series from columns of equal length. Returns `None` on a length mismatch.
    pub fn from_columns(time: Vec<f64>, height: Vec<f64>) -> Option<Self> {
        if time.len() != height.len() {
            return None;
        }
        Some(TrajectorySeries { time, height })
    }

    pub(crate) fn push(&mut self, time: f64, height: f64) {
        self.time.push(time);
        self.height.push(height);
    }

    pub(crate) fn set(&mut self, index: usize, time: f64, height: f64) {
        self.time[index] = time;
        self.height[index] = height;
    }

    pub(crate) fn set_time(&mut self, index: usize, time: f64) {
        self.time[index] = time;
    }

    pub(crate) fn set_height(&mut self, index: usize, height: f64) {
        self.height[index] = height;
    }

    /// Drops every sample past `len`, used to hand back the filled prefix of a failed run.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.time.truncate(len);
        self.height.truncate(len);
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn height(&self) -> &[f64] {
        &self.height
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.height.iter().copied())
    }

    /// Highest sample as `(time, height)`. The earliest wins on equal heights.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.samples()
            .fold(None, |best: Option<(f64, f64)>, sample| match best {
                Some(current) if current.1 >= sample.1 => Some(current),
                _ => Some(sample),
            })
    }

    pub fn final_state(&self) -> Option<PhaseEnd> {
        let last = self.len().checked_sub(1)?;
        let velocity = if last == 0 {
            0.0
        } else {
            let dt = self.time[last] - self.time[last - 1];
            (self.height[last] - self.height[last - 1]) / dt
        };
        Some(PhaseEnd {
            time: self.time[last],
            height: self.height[last],
            velocity,
        })
    }

    /// Largest per-sample relative height difference against `baseline`.
    ///
    /// Samples are paired by index; returns `None` if the lengths differ.
    /// Heights with magnitude under `floor` are compared against `floor` instead.
    pub fn max_relative_deviation(&self, baseline: &TrajectorySeries, floor: f64) -> Option<f64> {
        if self.len() != baseline.len() {
            return None;
        }
        let deviation = self
            .height
            .iter()
            .zip(&baseline.height)
            .map(|(ours, theirs)| (ours - theirs).abs() / theirs.abs().max(floor))
            .fold(0.0, f64::max);
        Some(deviation)
    }
}
