//! Caller-supplied initial scenes
//!
//! A scene is plain data: named bodies, links that refer to bodies by their
//! index in the scene, and ground planes. Nothing here is persisted.

use crate::params::SimulationParams;
use crate::world::World;
use rand::Rng;
use spring_physics::{
    named, Body, BodyId, Color, GroundParams, SandboxError, Vector2, DEFAULT_STIFFNESS,
};

#[derive(Debug, Clone)]
pub struct BodyDef {
    pub name: String,
    pub position: Vector2,
    pub velocity: Vector2,
    pub mass: f64,
    pub is_static: bool,
    pub color: Color,
}

impl BodyDef {
    pub fn new(name: impl Into<String>, position: Vector2, mass: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: Vector2::ZERO,
            mass,
            is_static: false,
            color: named::SEAGREEN,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }
}

#[derive(Debug, Clone)]
pub struct LinkDef {
    pub name: String,
    /// Index into `Scene::bodies`
    pub a: usize,
    pub b: usize,
    pub stiffness: f64,
    pub color: Color,
}

impl LinkDef {
    pub fn new(name: impl Into<String>, a: usize, b: usize, stiffness: f64, color: Color) -> Self {
        Self {
            name: name.into(),
            a,
            b,
            stiffness,
            color,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub bodies: Vec<BodyDef>,
    pub links: Vec<LinkDef>,
    pub grounds: Vec<GroundParams>,
}

impl Scene {
    /// The demo crane: a braced tower on two static feet, a counterweight arm
    /// and a jib with a light load swinging on a soft rope.
    pub fn crane() -> Self {
        let bodies = vec![
            BodyDef::new("n0", Vector2::new(-30.0, -100.0), 1.0).fixed(),
            BodyDef::new("n1", Vector2::new(30.0, -100.0), 1.0).fixed(),
            BodyDef::new("n2", Vector2::new(-30.0, 0.0), 1.0),
            BodyDef::new("n3", Vector2::new(30.0, 0.0), 1.0),
            BodyDef::new("n4", Vector2::new(-30.0, 100.0), 1.0),
            BodyDef::new("n5", Vector2::new(30.0, 100.0), 1.0),
            BodyDef::new("n6", Vector2::new(-30.0, 200.0), 1.0),
            BodyDef::new("n7", Vector2::new(30.0, 200.0), 1.0),
            BodyDef::new("t0", Vector2::new(-150.0, 100.0), 5.0),
            BodyDef::new("t1", Vector2::new(-150.0, 200.0), 7.5),
            BodyDef::new("z0", Vector2::new(350.0, 200.0), 1.5),
            BodyDef::new("z1", Vector2::new(450.0, 200.0), 1.0),
            BodyDef::new("z2", Vector2::new(350.0, 160.0), 1.5),
            BodyDef::new("z3", Vector2::new(350.0, 50.0), 0.05).with_velocity(Vector2::new(50.0, 0.0)),
        ];

        let strut = |name: &str, a, b| LinkDef::new(name, a, b, DEFAULT_STIFFNESS, named::SKYBLUE);
        let brace = |name: &str, a, b| LinkDef::new(name, a, b, 5000.0, named::HOTPINK);
        let soft = |name: &str, a, b| LinkDef::new(name, a, b, 200.0, named::MAGENTA4);

        let links = vec![
            // tower
            strut("m0", 0, 1),
            strut("m1", 2, 3),
            strut("m2", 4, 5),
            strut("m3", 6, 7),
            strut("m4", 0, 2),
            strut("m5", 2, 4),
            strut("m6", 4, 6),
            strut("m7", 1, 3),
            strut("m8", 3, 5),
            strut("m9", 5, 7),
            soft("m10", 0, 3),
            brace("m11", 2, 5),
            soft("m12", 4, 7),
            // counterweight
            strut("r0", 8, 4),
            strut("r1", 9, 6),
            strut("r2", 8, 9),
            brace("r3", 8, 6),
            // jib
            strut("f0", 7, 10),
            brace("f1", 5, 10),
            strut("f2", 10, 11),
            brace("f3", 5, 12),
            strut("f4", 12, 10),
            strut("f5", 12, 11),
            strut("f6", 12, 7),
            LinkDef::new("f7", 12, 13, 2.0, named::ORANGE),
        ];

        Self {
            bodies,
            links,
            grounds: vec![GroundParams::new(-100.0, 0.5, 0.8)],
        }
    }

    /// A random chain of `count` bodies inside `[-half_extent, half_extent]²`,
    /// each linked to the previous one, above a ground at `-half_extent`.
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, half_extent: f64) -> Self {
        let bodies: Vec<BodyDef> = (0..count)
            .map(|i| {
                let x = rng.random_range(-half_extent..=half_extent);
                let y = rng.random_range(-half_extent..=half_extent);
                let mass = rng.random_range(0.5..2.0);
                BodyDef::new(format!("p{i}"), Vector2::new(x, y), mass)
            })
            .collect();

        let links = (1..count)
            .map(|i| LinkDef::new(format!("l{i}"), i - 1, i, DEFAULT_STIFFNESS, named::SKYBLUE))
            .collect();

        Self {
            bodies,
            links,
            grounds: vec![GroundParams::new(-half_extent, 0.5, 0.8)],
        }
    }
}

impl World {
    /// Build a world from `params` plus everything in `scene`.
    ///
    /// The scene's grounds are added after any grounds already in `params`.
    pub fn from_scene(params: SimulationParams, scene: &Scene) -> Result<Self, SandboxError> {
        let mut world = World::new(params)?;

        for ground in &scene.grounds {
            world.add_ground(ground)?;
        }

        let mut ids: Vec<BodyId> = Vec::with_capacity(scene.bodies.len());
        for def in &scene.bodies {
            let body = Body::new(world.allocate_body_id(), def.name.as_str(), def.position, def.mass, def.is_static)?
                .with_velocity(def.velocity)
                .with_color(def.color);
            ids.push(world.insert_body(body));
        }

        for def in &scene.links {
            let lookup = |index: usize| {
                ids.get(index).copied().ok_or(SandboxError::InvalidCoefficient {
                    name: "link endpoint index",
                    value: index as f64,
                })
            };
            world.create_link(lookup(def.a)?, lookup(def.b)?, def.stiffness, def.color, def.name.as_str())?;
        }

        log::info!(
            "Scene loaded: {} bodies, {} links, {} ground(s)",
            world.bodies().len(),
            world.links().len(),
            world.grounds().len()
        );
        Ok(world)
    }
}
