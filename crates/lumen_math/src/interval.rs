/// A numeric range of ray parameters.
///
/// Bounds the valid hit distances of a ray query: the lower bound keeps a
/// scattered ray from re-hitting the surface it leaves, the upper bound
/// shrinks to the nearest hit found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Contains every finite value.
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `(min, +inf)`, the usual range for a fresh ray query.
    pub fn from_min(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Same lower bound, new upper bound.
    #[inline]
    pub fn with_max(self, max: f64) -> Self {
        Self::new(self.min, max)
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive containment: `min <= x <= max`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Strict containment: `min < x < max`.
    #[inline]
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    #[inline]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
