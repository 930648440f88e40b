//! User-pinned constant forces

use crate::body::Body;
use crate::constants::FORCE_ARROW_SCALE;
use crate::id::{BodyId, ForceId};
use crate::vector::Vector2;

/// A world-space force applied to one body every tick until removed.
#[derive(Debug, Clone)]
pub struct ConstantForce {
    id: ForceId,
    name: String,
    target: BodyId,
    vector: Vector2,
}

impl ConstantForce {
    pub fn new(id: ForceId, name: impl Into<String>, target: BodyId, vector: Vector2) -> Self {
        Self {
            id,
            name: name.into(),
            target,
            vector,
        }
    }

    pub fn id(&self) -> ForceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> BodyId {
        self.target
    }

    pub fn vector(&self) -> Vector2 {
        self.vector
    }

    pub fn apply(&self, body: &mut Body) {
        debug_assert_eq!(body.id(), self.target);
        body.apply_force(self.vector);
    }

    /// Where the force arrow ends when drawn from the body at `anchor`
    pub fn arrow_tip(&self, anchor: Vector2) -> Vector2 {
        anchor + self.vector * FORCE_ARROW_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_accumulates_every_call() {
        let mut body = Body::new(BodyId(0), "b", Vector2::ZERO, 4.0, false).unwrap();
        let force = ConstantForce::new(ForceId(1), "push", body.id(), Vector2::new(8.0, 0.0));
        force.apply(&mut body);
        force.apply(&mut body);
        assert_eq!(body.acceleration(), Vector2::new(4.0, 0.0));
    }

    #[test]
    fn test_arrow_tip() {
        let force = ConstantForce::new(ForceId(1), "f", BodyId(0), Vector2::new(0.5, -0.25));
        assert_eq!(force.arrow_tip(Vector2::new(1.0, 1.0)), Vector2::new(51.0, -24.0));
    }
}
