//! Tunable parameters for the world and the contact solver.

/// Parameters of the sequential impulse solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Velocity passes over all manifolds per step.
    pub iterations: usize,
    /// Penetration allowed to remain without positional correction.
    pub slop: f64,
    /// Fraction of the excess penetration removed per step.
    pub correction_percent: f64,
    /// Tangential speeds below this produce no friction impulse.
    pub friction_speed_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            iterations: 10,
            slop: 0.01,
            correction_percent: 0.2,
            friction_speed_threshold: 0.01,
        }
    }
}

/// World-level settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Each `update(dt)` runs this many steps of `dt / sub_steps`. Zero acts as one.
    pub sub_steps: usize,
    /// When false, manifolds are still detected but never resolved.
    pub collisions_enabled: bool,
    pub solver: SolverConfig,
}

impl WorldConfig {
    pub(crate) fn effective_sub_steps(&self) -> usize {
        self.sub_steps.max(1)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            sub_steps: 1,
            collisions_enabled: true,
            solver: SolverConfig::default(),
        }
    }
}
