//! Point masses and their per-tick force/integration contract

use crate::color::Color;
use crate::error::{validate_mass, SandboxError};
use crate::id::BodyId;
use crate::vector::{is_finite, normalized, Vector2};

/// A simulated point mass.
///
/// Position is only changed through integration and the ground's positional
/// correction, so the "accumulate, integrate, clear" cycle cannot be bypassed.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    name: String,
    position: Vector2,
    velocity: Vector2,
    /// Accumulated acceleration for the current tick
    acceleration: Vector2,
    mass: f64,
    is_static: bool,
    /// Unit vector; velocity is projected onto it after every velocity update
    limit_axis: Option<Vector2>,
    pub color: Color,
}

impl Body {
    pub fn new(
        id: BodyId,
        name: impl Into<String>,
        position: Vector2,
        mass: f64,
        is_static: bool,
    ) -> Result<Self, SandboxError> {
        let mass = validate_mass(mass)?;
        Ok(Self {
            id,
            name: name.into(),
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            mass,
            is_static,
            limit_axis: None,
            color: Color::default(),
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn limit_axis(&self) -> Option<Vector2> {
        self.limit_axis
    }

    /// Constrain motion to a single world direction (a rail), or lift the
    /// constraint with `None`. The axis is stored normalized.
    pub fn set_limit_axis(&mut self, axis: Option<Vector2>) -> Result<(), SandboxError> {
        self.limit_axis = match axis {
            None => None,
            Some(axis) => {
                let unit = normalized(axis);
                if unit == Vector2::ZERO || !is_finite(unit) {
                    return Err(SandboxError::DegenerateAxis);
                }
                Some(unit)
            }
        };
        Ok(())
    }

    /// `accel += f / mass`. Static bodies accumulate too; the result is just
    /// never consumed.
    #[inline]
    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force / self.mass;
    }

    #[inline]
    pub fn clear_accel(&mut self) {
        self.acceleration = Vector2::ZERO;
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: Vector2) {
        self.apply_force(gravity * self.mass);
    }

    /// Quadratic drag: magnitude `c * |v|^2`, opposing the velocity.
    #[inline]
    pub fn apply_drag(&mut self, drag_coefficient: f64) {
        let speed_sq = self.velocity.length_squared();
        self.apply_force(-normalized(self.velocity) * drag_coefficient * speed_sq);
    }

    /// Semi-implicit Euler, first half: `vel += accel * dt`, then rail projection.
    pub fn integrate_velocity(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        self.velocity += self.acceleration * dt;
        if let Some(axis) = self.limit_axis {
            self.velocity = axis * self.velocity.dot(axis);
        }
    }

    /// Semi-implicit Euler, second half: `pos += vel * dt` with the updated velocity.
    pub fn integrate_position(&mut self, dt: f64) {
        if self.is_static {
            return;
        }
        self.position += self.velocity * dt;
    }

    /// Positional correction used by ground contact: lift the body so it
    /// sits exactly on `height`.
    pub fn clamp_above(&mut self, height: f64) {
        if self.position.y < height {
            self.position.y = height;
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            0.5 * self.mass * self.velocity.length_squared()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(mass: f64, is_static: bool) -> Body {
        Body::new(BodyId(0), "b", Vector2::ZERO, mass, is_static).unwrap()
    }

    #[test]
    fn test_rejects_bad_mass() {
        assert!(Body::new(BodyId(0), "b", Vector2::ZERO, 0.0, false).is_err());
        assert!(Body::new(BodyId(0), "b", Vector2::ZERO, -3.0, false).is_err());
    }

    #[test]
    fn test_apply_force_divides_by_mass() {
        let mut b = body(2.0, false);
        b.apply_force(Vector2::new(4.0, -2.0));
        assert_eq!(b.acceleration(), Vector2::new(2.0, -1.0));
        b.clear_accel();
        assert_eq!(b.acceleration(), Vector2::ZERO);
    }

    #[test]
    fn test_gravity_single_tick() {
        let mut b = body(2.0, false);
        b.apply_gravity(Vector2::new(0.0, -9.81));
        assert!((b.acceleration() - Vector2::new(0.0, -9.81)).length() < 1e-12);

        b.integrate_velocity(0.01);
        b.integrate_position(0.01);
        assert!((b.velocity().y + 0.0981).abs() < 1e-12);
        assert!((b.position().y + 0.000981).abs() < 1e-12);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let mut b = body(1.0, false).with_velocity(Vector2::new(3.0, 4.0));
        b.apply_drag(0.1);
        // |v|^2 = 25, force = 2.5 along -(0.6, 0.8)
        assert!((b.acceleration() - Vector2::new(-1.5, -2.0)).length() < 1e-12);
    }

    #[test]
    fn test_drag_at_rest_is_zero() {
        let mut b = body(1.0, false);
        b.apply_drag(0.5);
        assert_eq!(b.acceleration(), Vector2::ZERO);
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut b = body(1.0, true).with_velocity(Vector2::new(1.0, 1.0));
        let (pos, vel) = (b.position(), b.velocity());
        b.apply_force(Vector2::new(1000.0, -1000.0));
        b.integrate_velocity(0.1);
        b.integrate_position(0.1);
        assert_eq!(b.position(), pos);
        assert_eq!(b.velocity(), vel);
    }

    #[test]
    fn test_limit_axis_projects_velocity() {
        let mut b = body(1.0, false);
        b.set_limit_axis(Some(Vector2::new(2.0, 0.0))).unwrap();
        assert_eq!(b.limit_axis(), Some(Vector2::X));

        b.apply_force(Vector2::new(1.0, -10.0));
        b.integrate_velocity(1.0);
        assert_eq!(b.velocity(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_limit_axis_rejects_zero() {
        let mut b = body(1.0, false);
        assert_eq!(b.set_limit_axis(Some(Vector2::ZERO)), Err(SandboxError::DegenerateAxis));
        assert_eq!(b.limit_axis(), None);
    }

    #[test]
    fn test_velocity_used_for_position_is_updated_one() {
        let mut b = body(1.0, false);
        b.apply_force(Vector2::new(10.0, 0.0));
        b.integrate_velocity(0.5);
        b.integrate_position(0.5);
        // Explicit Euler would leave the body at the origin.
        assert_eq!(b.position(), Vector2::new(2.5, 0.0));
    }
}
