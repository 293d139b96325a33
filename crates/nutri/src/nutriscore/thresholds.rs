//! Piecewise step function mapping a measurement onto integer points.

/// Ascending boundaries with an optional explicit point scale.
///
/// A value belongs to the first bucket whose boundary it does not exceed, so the boundary
/// itself scores in the lower bucket. Without an explicit scale, bucket `i` is worth `i`
/// points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable<'a> {
    boundaries: &'a [f64],
    points: Option<&'a [i32]>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdTableError {
    #[error("threshold table needs at least one boundary")]
    Empty,
    #[error("boundary {index} ({value}) is not a finite number")]
    NonFinite { index: usize, value: f64 },
    #[error("boundary {index} ({value}) does not exceed its predecessor")]
    NotIncreasing { index: usize, value: f64 },
    #[error("expected {expected} point values for {boundaries} boundaries, found {found}")]
    PointsLength {
        boundaries: usize,
        expected: usize,
        found: usize,
    },
}

impl<'a> ThresholdTable<'a> {
    /// Table using the default `0..=len` point scale.
    pub const fn new(boundaries: &'a [f64]) -> Self {
        Self {
            boundaries,
            points: None,
        }
    }

    /// Table using a custom point scale with one entry per bucket.
    pub const fn with_points(boundaries: &'a [f64], points: &'a [i32]) -> Self {
        Self {
            boundaries,
            points: Some(points),
        }
    }

    pub fn boundaries(&self) -> &'a [f64] {
        self.boundaries
    }

    pub fn bucket_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Points awarded for landing in `bucket`.
    pub fn points_for_bucket(&self, bucket: usize) -> i32 {
        let bucket = bucket.min(self.boundaries.len());
        match self.points {
            Some(points) => points
                .get(bucket)
                .or_else(|| points.last())
                .copied()
                .unwrap_or_default(),
            None => i32::try_from(bucket).unwrap_or(i32::MAX),
        }
    }

    /// Scores `value`; callers are expected to pass finite numbers.
    pub fn score(&self, value: f64) -> i32 {
        let bucket = self
            .boundaries
            .iter()
            .position(|boundary| value <= *boundary)
            .unwrap_or(self.boundaries.len());
        self.points_for_bucket(bucket)
    }

    pub fn validate(&self) -> Result<(), ThresholdTableError> {
        if self.boundaries.is_empty() {
            return Err(ThresholdTableError::Empty);
        }

        for (index, value) in self.boundaries.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(ThresholdTableError::NonFinite { index, value });
            }
            if index > 0 && value <= self.boundaries[index - 1] {
                return Err(ThresholdTableError::NotIncreasing { index, value });
            }
        }

        if let Some(points) = self.points {
            let expected = self.bucket_count();
            if points.len() != expected {
                return Err(ThresholdTableError::PointsLength {
                    boundaries: self.boundaries.len(),
                    expected,
                    found: points.len(),
                });
            }
        }

        Ok(())
    }
}
