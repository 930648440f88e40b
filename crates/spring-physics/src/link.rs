//! Spring links between two bodies
//!
//! Links are undamped Hooke springs: `F = -k * e` along the line between the
//! endpoints, where `e` is the signed extension from the rest length.
//! All damping in the sandbox comes from per-body drag.

use crate::body::Body;
use crate::color::Color;
use crate::error::SandboxError;
use crate::id::{BodyId, LinkId};
use crate::vector::{distance, midpoint, unit_towards, Vector2};

#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    name: String,
    p1: BodyId,
    p2: BodyId,
    rest_length: f64,
    stiffness: f64,
    pub color: Color,
}

impl Link {
    /// Connect two bodies. The rest length is the distance between them right
    /// now and never changes afterwards.
    pub fn new(
        id: LinkId,
        name: impl Into<String>,
        p1: &Body,
        p2: &Body,
        stiffness: f64,
    ) -> Result<Self, SandboxError> {
        if p1.id() == p2.id() {
            return Err(SandboxError::SelfLink(p1.id()));
        }
        if !stiffness.is_finite() || stiffness < 0.0 {
            return Err(SandboxError::InvalidStiffness(stiffness));
        }
        Ok(Self {
            id,
            name: name.into(),
            p1: p1.id(),
            p2: p2.id(),
            rest_length: distance(p1.position(), p2.position()),
            stiffness,
            color: Color::default(),
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn p1(&self) -> BodyId {
        self.p1
    }

    pub fn p2(&self) -> BodyId {
        self.p2
    }

    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn connects(&self, body: BodyId) -> bool {
        self.p1 == body || self.p2 == body
    }

    /// Signed extension for the given endpoint positions; positive when stretched
    pub fn extension(&self, p1: Vector2, p2: Vector2) -> f64 {
        distance(p1, p2) - self.rest_length
    }

    /// Force acting on the first endpoint; the second gets the negation.
    ///
    /// Zero when at rest length, and zero when the endpoints coincide
    /// (there is no direction to push along).
    pub fn force_on_p1(&self, p1: Vector2, p2: Vector2) -> Vector2 {
        let extension = self.extension(p1, p2);
        if extension == 0.0 {
            return Vector2::ZERO;
        }
        // Stretched: pulled towards p2. Compressed: pushed away from it.
        unit_towards(p1, p2) * (self.stiffness * extension)
    }

    /// Apply equal and opposite spring forces to both endpoints.
    ///
    /// `a` and `b` must be the bodies this link was built from, in order.
    pub fn apply_force(&self, a: &mut Body, b: &mut Body) {
        debug_assert!(a.id() == self.p1 && b.id() == self.p2);
        let force = self.force_on_p1(a.position(), b.position());
        a.apply_force(force);
        b.apply_force(-force);
    }

    /// Stored elastic energy `½ k e²`
    pub fn potential_energy(&self, p1: Vector2, p2: Vector2) -> f64 {
        let e = self.extension(p1, p2);
        0.5 * self.stiffness * e * e
    }

    pub fn midpoint(&self, p1: Vector2, p2: Vector2) -> Vector2 {
        midpoint(p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Body, Body) {
        let a = Body::new(BodyId(0), "A", Vector2::new(0.0, 0.0), 1.0, true).unwrap();
        let b = Body::new(BodyId(1), "B", Vector2::new(10.0, 0.0), 1.0, false).unwrap();
        (a, b)
    }

    #[test]
    fn test_rest_length_from_initial_positions() {
        let (a, b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 1000.0).unwrap();
        assert_eq!(link.rest_length(), 10.0);
    }

    #[test]
    fn test_unperturbed_link_is_force_free() {
        let (mut a, mut b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 1000.0).unwrap();
        link.apply_force(&mut a, &mut b);
        assert_eq!(a.acceleration(), Vector2::ZERO);
        assert_eq!(b.acceleration(), Vector2::ZERO);
    }

    #[test]
    fn test_stretched_link_pulls_together() {
        let (a, b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 1000.0).unwrap();

        // B displaced to (12, 0): extension 2, force 2000 towards A.
        let f1 = link.force_on_p1(a.position(), Vector2::new(12.0, 0.0));
        assert!((f1 - Vector2::new(2000.0, 0.0)).length() < 1e-9);
        let f2 = -f1;
        assert!((f2 - Vector2::new(-2000.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_compressed_link_pushes_apart() {
        let (a, b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 10.0).unwrap();
        let f1 = link.force_on_p1(a.position(), Vector2::new(7.0, 0.0));
        // Extension -3: A pushed towards -x.
        assert!((f1 - Vector2::new(-30.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_coincident_endpoints_give_zero_force() {
        let (a, b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 10.0).unwrap();
        let p = Vector2::new(1.0, 1.0);
        assert_eq!(link.force_on_p1(p, p), Vector2::ZERO);
    }

    #[test]
    fn test_rejects_self_link_and_bad_stiffness() {
        let (a, b) = pair();
        assert_eq!(
            Link::new(LinkId(2), "l", &a, &a, 1.0).unwrap_err(),
            SandboxError::SelfLink(a.id())
        );
        assert!(Link::new(LinkId(2), "l", &a, &b, -1.0).is_err());
        assert!(Link::new(LinkId(2), "l", &a, &b, f64::NAN).is_err());
    }

    #[test]
    fn test_potential_energy() {
        let (a, b) = pair();
        let link = Link::new(LinkId(2), "l", &a, &b, 4.0).unwrap();
        assert_eq!(link.potential_energy(a.position(), Vector2::new(13.0, 0.0)), 18.0);
    }
}
