//! The world aggregate: entity collections, the fixed-step tick, and the
//! thin editor commands that mutate the collections between ticks.
//!
//! Tick order (semi-implicit Euler):
//! 1. links, grounds (only while running), pinned forces, gravity and drag
//!    accumulate into each body's acceleration
//! 2. every body integrates velocity, then every body integrates position
//! 3. every body's acceleration is cleared
//!
//! Collection order is insertion order and only matters for drawing.

use crate::params::SimulationParams;
use spring_physics::{
    distance, Body, BodyId, Color, ConstantForce, ForceId, Ground, GroundId, GroundParams,
    IdAllocator, Link, LinkId, SandboxError, Vector2,
};
use std::collections::HashMap;

/// Mass-weighted centroid of a set of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOfMass {
    pub position: Vector2,
    pub total_mass: f64,
}

#[derive(Debug, Clone)]
pub struct World {
    params: SimulationParams,
    /// Current step; 0 while paused
    dt: f64,
    ids: IdAllocator,

    bodies: Vec<Body>,
    body_index: HashMap<BodyId, usize>,
    links: Vec<Link>,
    grounds: Vec<Ground>,
    forces: Vec<ConstantForce>,

    elapsed: f64,
    ticks: u64,
}

impl World {
    /// Build an empty world (plus any grounds listed in `params`), running.
    pub fn new(params: SimulationParams) -> Result<Self, SandboxError> {
        params.validate()?;

        let mut world = Self {
            dt: params.time_step,
            params,
            ids: IdAllocator::new(),
            bodies: Vec::new(),
            body_index: HashMap::new(),
            links: Vec::new(),
            grounds: Vec::new(),
            forces: Vec::new(),
            elapsed: 0.0,
            ticks: 0,
        };

        let grounds = world.params.grounds.clone();
        for ground in &grounds {
            world.add_ground(ground)?;
        }

        log::info!(
            "World created: gravity={:?}, drag={}, dt={}, {} ground(s)",
            world.params.gravity,
            world.params.drag_coefficient,
            world.params.time_step,
            world.grounds.len()
        );
        Ok(world)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn gravity(&self) -> Vector2 {
        self.params.gravity
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.params.drag_coefficient
    }

    // Pause control

    /// Step the next `tick()` will use (0 while paused)
    pub fn time_step(&self) -> f64 {
        self.dt
    }

    pub fn is_paused(&self) -> bool {
        self.dt == 0.0
    }

    pub fn pause(&mut self) {
        self.dt = 0.0;
    }

    pub fn resume(&mut self) {
        self.dt = self.params.time_step;
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        log::debug!("Simulation {}", if self.is_paused() { "paused" } else { "resumed" });
    }

    /// Simulated time advanced so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Simulation

    /// Advance by the current step (a no-op tick while paused).
    pub fn tick(&mut self) -> Result<(), SandboxError> {
        self.step(self.dt)
    }

    /// Advance by exactly `dt`. `dt == 0` leaves every body where it is.
    pub fn step(&mut self, dt: f64) -> Result<(), SandboxError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SandboxError::InvalidTimeStep(dt));
        }

        if dt == 0.0 {
            // Ground contact divides by dt; nothing else would move anyway.
            self.clear_accelerations();
            return Ok(());
        }

        let gravity = self.params.gravity;
        let drag = self.params.drag_coefficient;

        self.apply_link_forces();
        for ground in &self.grounds {
            ground.apply_force(&mut self.bodies, gravity, dt, self.params.friction_model);
        }
        self.apply_constant_forces();
        for body in &mut self.bodies {
            body.apply_gravity(gravity);
            body.apply_drag(drag);
        }

        for body in &mut self.bodies {
            body.integrate_velocity(dt);
        }
        for body in &mut self.bodies {
            body.integrate_position(dt);
        }
        self.clear_accelerations();

        self.elapsed += dt;
        self.ticks += 1;
        log::trace!("tick {} (t={:.3})", self.ticks, self.elapsed);
        Ok(())
    }

    fn apply_link_forces(&mut self) {
        for link in &self.links {
            let (Some(&i), Some(&j)) = (self.body_index.get(&link.p1()), self.body_index.get(&link.p2()))
            else {
                continue;
            };
            let force = link.force_on_p1(self.bodies[i].position(), self.bodies[j].position());
            self.bodies[i].apply_force(force);
            self.bodies[j].apply_force(-force);
        }
    }

    fn apply_constant_forces(&mut self) {
        for force in &self.forces {
            if let Some(&i) = self.body_index.get(&force.target()) {
                force.apply(&mut self.bodies[i]);
            }
        }
    }

    fn clear_accelerations(&mut self) {
        for body in &mut self.bodies {
            body.clear_accel();
        }
    }

    // Queries

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn grounds(&self) -> &[Ground] {
        &self.grounds
    }

    pub fn forces(&self) -> &[ConstantForce] {
        &self.forces
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.body_index.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id() == id)
    }

    pub fn force(&self, id: ForceId) -> Option<&ConstantForce> {
        self.forces.iter().find(|f| f.id() == id)
    }

    pub fn contains_body(&self, id: BodyId) -> bool {
        self.body_index.contains_key(&id)
    }

    /// Current positions of a link's two endpoints
    pub fn link_endpoints(&self, link: &Link) -> Option<(Vector2, Vector2)> {
        Some((self.body(link.p1())?.position(), self.body(link.p2())?.position()))
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, SandboxError> {
        match self.body_index.get(&id) {
            Some(&i) => Ok(&mut self.bodies[i]),
            None => Err(SandboxError::UnknownBody(id)),
        }
    }

    fn reindex(&mut self) {
        self.body_index = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id(), i))
            .collect();
    }

    // Editor commands

    pub fn create_point(
        &mut self,
        position: Vector2,
        mass: f64,
        is_static: bool,
        name: impl Into<String>,
    ) -> Result<BodyId, SandboxError> {
        let body = Body::new(self.ids.body(), name, position, mass, is_static)?;
        Ok(self.insert_body(body))
    }

    /// Append an already-built body; its id must come from this world's allocator.
    pub(crate) fn insert_body(&mut self, body: Body) -> BodyId {
        let id = body.id();
        log::debug!("Created {} '{}' at {:?}", id, body.name(), body.position());
        self.body_index.insert(id, self.bodies.len());
        self.bodies.push(body);
        id
    }

    pub(crate) fn allocate_body_id(&mut self) -> BodyId {
        self.ids.body()
    }

    /// Remove a body together with every link and force that references it.
    pub fn delete_point(&mut self, id: BodyId) -> Result<(), SandboxError> {
        let Some(&index) = self.body_index.get(&id) else {
            log::warn!("delete_point: stale handle {}", id);
            return Err(SandboxError::UnknownBody(id));
        };

        self.bodies.remove(index);
        self.reindex();

        let links_before = self.links.len();
        self.links.retain(|l| !l.connects(id));
        let forces_before = self.forces.len();
        self.forces.retain(|f| f.target() != id);

        log::debug!(
            "Deleted {} (cascaded {} link(s), {} force(s))",
            id,
            links_before - self.links.len(),
            forces_before - self.forces.len()
        );
        Ok(())
    }

    pub fn pick_nearest_point(&self, position: Vector2) -> Option<BodyId> {
        self.bodies
            .iter()
            .min_by(|a, b| {
                distance(a.position(), position).total_cmp(&distance(b.position(), position))
            })
            .map(Body::id)
    }

    pub fn set_limit_axis(&mut self, id: BodyId, axis: Option<Vector2>) -> Result<(), SandboxError> {
        self.body_mut(id)?.set_limit_axis(axis)
    }

    pub fn set_body_color(&mut self, id: BodyId, color: Color) -> Result<(), SandboxError> {
        self.body_mut(id)?.color = color;
        Ok(())
    }

    /// Link two distinct bodies; the rest length is their current distance.
    pub fn create_link(
        &mut self,
        a: BodyId,
        b: BodyId,
        stiffness: f64,
        color: Color,
        name: impl Into<String>,
    ) -> Result<LinkId, SandboxError> {
        if a == b {
            return Err(SandboxError::SelfLink(a));
        }
        if !self.contains_body(a) {
            return Err(SandboxError::UnknownBody(a));
        }
        if !self.contains_body(b) {
            return Err(SandboxError::UnknownBody(b));
        }

        let id = self.ids.link();
        let p1 = &self.bodies[self.body_index[&a]];
        let p2 = &self.bodies[self.body_index[&b]];
        let link = Link::new(id, name, p1, p2, stiffness)?.with_color(color);
        log::debug!(
            "Created {} '{}' {}-{} (rest={:.3}, k={})",
            id,
            link.name(),
            a,
            b,
            link.rest_length(),
            stiffness
        );
        self.links.push(link);
        Ok(id)
    }

    pub fn delete_link(&mut self, id: LinkId) -> Result<(), SandboxError> {
        let index = self
            .links
            .iter()
            .position(|l| l.id() == id)
            .ok_or(SandboxError::UnknownLink(id))?;
        self.links.remove(index);
        log::debug!("Deleted {}", id);
        Ok(())
    }

    /// Nearest link by midpoint
    pub fn pick_nearest_link(&self, position: Vector2) -> Option<LinkId> {
        self.links
            .iter()
            .filter_map(|link| {
                let (p1, p2) = self.link_endpoints(link)?;
                Some((link.id(), distance(link.midpoint(p1, p2), position)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn attach_force(
        &mut self,
        target: BodyId,
        vector: Vector2,
        name: impl Into<String>,
    ) -> Result<ForceId, SandboxError> {
        if !self.contains_body(target) {
            return Err(SandboxError::UnknownBody(target));
        }
        let id = self.ids.force();
        let force = ConstantForce::new(id, name, target, vector);
        log::debug!("Attached {} '{}' to {}: {:?}", id, force.name(), target, vector);
        self.forces.push(force);
        Ok(id)
    }

    pub fn detach_force(&mut self, id: ForceId) -> Result<(), SandboxError> {
        let index = self
            .forces
            .iter()
            .position(|f| f.id() == id)
            .ok_or(SandboxError::UnknownForce(id))?;
        self.forces.remove(index);
        log::debug!("Detached {}", id);
        Ok(())
    }

    /// Nearest force by the tip of its drawn arrow
    pub fn pick_nearest_force(&self, position: Vector2) -> Option<ForceId> {
        self.forces
            .iter()
            .filter_map(|force| {
                let anchor = self.body(force.target())?.position();
                Some((force.id(), distance(force.arrow_tip(anchor), position)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn add_ground(&mut self, params: &GroundParams) -> Result<GroundId, SandboxError> {
        let ground = Ground::new(self.ids.ground(), params)?;
        let id = ground.id();
        self.grounds.push(ground);
        Ok(id)
    }

    /// `Σ(pos·m) / Σm` over the given bodies.
    pub fn compute_center_of_mass(&self, ids: &[BodyId]) -> Result<CenterOfMass, SandboxError> {
        if ids.is_empty() {
            return Err(SandboxError::EmptySelection);
        }

        let mut weighted = Vector2::ZERO;
        let mut total_mass = 0.0;
        for &id in ids {
            let body = self.body(id).ok_or(SandboxError::UnknownBody(id))?;
            weighted += body.position() * body.mass();
            total_mass += body.mass();
        }

        Ok(CenterOfMass {
            position: weighted / total_mass,
            total_mass,
        })
    }

    // Diagnostics

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn spring_potential_energy(&self) -> f64 {
        self.links
            .iter()
            .filter_map(|link| {
                let (p1, p2) = self.link_endpoints(link)?;
                Some(link.potential_energy(p1, p2))
            })
            .sum()
    }

    /// Potential energy of non-static bodies in the gravity field, relative to the origin
    pub fn gravitational_potential_energy(&self) -> f64 {
        let gravity = self.params.gravity;
        self.bodies
            .iter()
            .filter(|b| !b.is_static())
            .map(|b| -b.mass() * gravity.dot(b.position()))
            .sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.spring_potential_energy() + self.gravitational_potential_energy()
    }
}
