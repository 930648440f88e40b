//! Simulation parameters supplied once at world construction

use spring_physics::{
    is_finite, FrictionModel, GroundParams, SandboxError, Vector2, DEFAULT_DRAG_COEFFICIENT,
    DEFAULT_GRAVITY, DEFAULT_TIME_STEP,
};

/// Global constants for one world.
///
/// ```
/// use spring_simulation::SimulationParams;
/// use spring_physics::{GroundParams, Vector2};
///
/// let params = SimulationParams::default()
///     .with_gravity(Vector2::new(0.0, -9.81))
///     .with_drag_coefficient(0.0)
///     .with_ground(GroundParams::new(0.0, 0.5, 0.8));
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub gravity: Vector2,
    pub drag_coefficient: f64,
    /// Fixed step used while running; pausing switches the world to 0
    pub time_step: f64,
    pub friction_model: FrictionModel,
    pub grounds: Vec<GroundParams>,
}

impl SimulationParams {
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            time_step: DEFAULT_TIME_STEP,
            friction_model: FrictionModel::default(),
            grounds: Vec::new(),
        }
    }

    pub fn with_gravity(mut self, gravity: Vector2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_drag_coefficient(mut self, drag_coefficient: f64) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_friction_model(mut self, friction_model: FrictionModel) -> Self {
        self.friction_model = friction_model;
        self
    }

    pub fn with_ground(mut self, ground: GroundParams) -> Self {
        self.grounds.push(ground);
        self
    }

    /// Check everything that would otherwise surface later as NaN in the integrator.
    pub fn validate(&self) -> Result<(), SandboxError> {
        if !is_finite(self.gravity) {
            return Err(SandboxError::InvalidCoefficient {
                name: "gravity",
                value: self.gravity.length(),
            });
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(SandboxError::InvalidCoefficient {
                name: "drag coefficient",
                value: self.drag_coefficient,
            });
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SandboxError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::new()
    }
}
