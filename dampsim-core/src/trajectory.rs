use glam::DVec2;

/// Position and velocity of the mass at one discrete step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSample {
    pub position: f64,
    pub velocity: f64,
}

impl StateSample {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.position, self.velocity)
    }
}

impl From<DVec2> for StateSample {
    fn from(x: DVec2) -> Self {
        Self::new(x.x, x.y)
    }
}

/// Samples produced by one simulation run, indexed by step
///
/// Read-only once built: there is no mutable access to the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<StateSample>,
    dt: f64,
}

impl Trajectory {
    /// Wrap precomputed samples spaced `dt` apart
    ///
    /// Panics if `samples` is empty; every trajectory holds at least its
    /// initial condition.
    pub fn from_samples(samples: Vec<StateSample>, dt: f64) -> Self {
        assert!(!samples.is_empty(), "trajectory needs at least one sample");
        Self { samples, dt }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: `from_samples` refuses an empty series
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of the final sample, N - 1
    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    /// Sample at step `k`
    ///
    /// Reading past the end is a logic error and panics.
    pub fn sample(&self, k: usize) -> StateSample {
        match self.samples.get(k) {
            Some(sample) => *sample,
            None => panic!(
                "trajectory index {} out of range for {} samples",
                k,
                self.samples.len()
            ),
        }
    }

    pub fn get(&self, k: usize) -> Option<StateSample> {
        self.samples.get(k).copied()
    }

    pub fn initial(&self) -> StateSample {
        self.samples[0]
    }

    pub fn last(&self) -> StateSample {
        self.samples[self.last_index()]
    }

    pub fn samples(&self) -> &[StateSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateSample> {
        self.samples.iter()
    }

    /// Time of step `k`
    pub fn time_at(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// (time, position) pairs
    pub fn position_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(move |(k, s)| (self.time_at(k), s.position))
    }

    /// (time, velocity) pairs
    pub fn velocity_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(move |(k, s)| (self.time_at(k), s.velocity))
    }

    /// (position, velocity) pairs for the phase portrait
    pub fn phase_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.position, s.velocity))
    }
}
