//! Horizontal ground planes with restitution and friction
//!
//! NOTE: the bounce term is an impulse expressed as a force divided by `dt`.
//! Combined with `vel += accel * dt` it reverses the vertical velocity by
//! `(restitution + 1)` in one tick, but it couples the response to the step
//! size and is undefined for `dt == 0`. Callers must not apply ground forces
//! while paused.

use crate::body::Body;
use crate::color::{named, Color};
use crate::error::{validate_unit_interval, SandboxError};
use crate::id::GroundId;
use crate::vector::Vector2;

/// Sign convention for the ground friction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrictionModel {
    /// `F.x = -vel.x * mass * |g| * mu`, capped at `mass * |vel.x| / dt` so
    /// one tick of friction can at most bring the body to rest.
    #[default]
    Opposing,
    /// `F.x = vel.x * mass * g.y * mu`, the formula as first written. It only
    /// opposes motion while gravity points down the y axis.
    GravitySigned,
}

/// Construction parameters for a ground plane.
#[derive(Debug, Clone)]
pub struct GroundParams {
    pub height: f64,
    /// Fraction of vertical speed kept on impact, in [0, 1]
    pub restitution: f64,
    /// Friction coefficient, in [0, 1]
    pub friction: f64,
    /// Cancel gravity on bodies that are being pushed out of the plane
    pub cancel_gravity: bool,
    pub color: Color,
}

impl GroundParams {
    pub fn new(height: f64, restitution: f64, friction: f64) -> Self {
        Self {
            height,
            restitution,
            friction,
            cancel_gravity: true,
            color: named::GREEN,
        }
    }

    pub fn with_cancel_gravity(mut self, cancel_gravity: bool) -> Self {
        self.cancel_gravity = cancel_gravity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for GroundParams {
    fn default() -> Self {
        Self::new(-100.0, 0.5, 0.8)
    }
}

#[derive(Debug, Clone)]
pub struct Ground {
    id: GroundId,
    height: f64,
    restitution: f64,
    friction: f64,
    cancel_gravity: bool,
    pub color: Color,
}

impl Ground {
    pub fn new(id: GroundId, params: &GroundParams) -> Result<Self, SandboxError> {
        if !params.height.is_finite() {
            return Err(SandboxError::InvalidCoefficient {
                name: "height",
                value: params.height,
            });
        }
        Ok(Self {
            id,
            height: params.height,
            restitution: validate_unit_interval("restitution", params.restitution)?,
            friction: validate_unit_interval("friction", params.friction)?,
            cancel_gravity: params.cancel_gravity,
            color: params.color,
        })
    }

    pub fn id(&self) -> GroundId {
        self.id
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Resolve contact for every body: bounce and positional correction for
    /// penetrating bodies, then friction for bodies on or below the plane.
    ///
    /// Static bodies are skipped. Does nothing when `dt` is not positive.
    pub fn apply_force(&self, bodies: &mut [Body], gravity: Vector2, dt: f64, model: FrictionModel) {
        // World::step never calls this at dt 0; direct callers get a no-op.
        if dt <= 0.0 {
            log::debug!("{}: contact skipped for non-positive dt {}", self.id, dt);
            return;
        }

        for body in bodies.iter_mut().filter(|b| !b.is_static()) {
            let mass = body.mass();

            if body.position().y < self.height {
                let vy = body.velocity().y;
                body.apply_force(Vector2::new(0.0, mass * vy * -1.0 * (self.restitution + 1.0) / dt));
                if self.cancel_gravity {
                    body.apply_force(-gravity * mass);
                }
                body.clamp_above(self.height);
            }

            if body.position().y <= self.height {
                body.apply_force(self.friction_force(body, gravity, dt, model));
            }
        }
    }

    fn friction_force(&self, body: &Body, gravity: Vector2, dt: f64, model: FrictionModel) -> Vector2 {
        let vx = body.velocity().x;
        let fx = match model {
            FrictionModel::Opposing => {
                let stopping = body.mass() * vx.abs() / dt;
                -vx.signum() * (vx.abs() * body.mass() * gravity.length() * self.friction).min(stopping)
            }
            FrictionModel::GravitySigned => vx * body.mass() * gravity.y * self.friction,
        };
        Vector2::new(fx, 0.0)
    }
}
