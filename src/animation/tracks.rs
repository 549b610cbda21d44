use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// Remembers the segment found by the previous lookup.
///
/// Playback moves forward in small steps, so the next sample almost always
/// lands in the same segment or the one after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        debug_assert_eq!(times.len(), values.len(), "one value per keyframe");
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Latest keyframe time, or zero for an empty track. Times are not
    /// required to be sorted.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.iter().copied().fold(0.0, f32::max)
    }

    /// Stateless sampling (binary search). Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.sample_segment(self.segment_of(time), time))
    }

    /// Sampling that reuses the segment of the previous call.
    ///
    /// Falls back to a binary search when `time` is neither in the cached
    /// segment nor the one right after it (scrubbing, loop wrap-around).
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            return Some(self.values[0]);
        }

        let i = cursor.last_index.min(len - 1);
        let index = if self.segment_contains(i, time) {
            i
        } else if i + 1 < len && self.segment_contains(i + 1, time) {
            i + 1
        } else {
            self.segment_of(time)
        };

        cursor.last_index = index;
        Some(self.sample_segment(index, time))
    }

    /// Index of the keyframe starting the segment that holds `time`.
    fn segment_of(&self, time: f32) -> usize {
        // first index with t > time
        let next = self.times.partition_point(|&t| t <= time);
        next.saturating_sub(1)
    }

    fn segment_contains(&self, index: usize, time: f32) -> bool {
        let last = self.len() - 1;
        let start_ok = index == 0 || time >= self.times[index];
        let end_ok = index >= last || time < self.times[index + 1];
        start_ok && end_ok
    }

    fn sample_segment(&self, index: usize, time: f32) -> T {
        let last = self.len() - 1;
        if index >= last {
            return self.values[last];
        }

        let t0 = self.times[index];
        let t1 = self.times[index + 1];
        let span = t1 - t0;
        let t = if span > 1e-6 {
            ((time - t0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                T::interpolate_linear(&self.values[index], &self.values[index + 1], t)
            }
        }
    }
}
