//! Click-driven scene editing
//!
//! The UI layer converts a click to world coordinates and hands it to
//! [`Editor::primary_click`] or [`Editor::secondary_click`]. Multi-click
//! commands keep their progress in small tagged state machines rather than
//! shared buffers, so picking a link endpoint can never leak into a force
//! selection.

use crate::world::{CenterOfMass, World};
use spring_physics::{
    named, BodyId, Color, ForceId, LinkId, SandboxError, Vector2, DEFAULT_MASS, DEFAULT_STIFFNESS,
    FORCE_DRAG_SCALE,
};

/// What a click on the canvas does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickTool {
    #[default]
    CreatePoint,
    DeletePoint,
    CreateLink,
    DeleteLink,
    ApplyForce,
    RemoveForce,
    CenterOfMass,
}

/// Progress of the two-click link command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkSelection {
    #[default]
    Idle,
    FirstEndpoint(BodyId),
}

/// Bodies armed to receive a force on the next primary click
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ForceSelection {
    #[default]
    Idle,
    Armed(Vec<BodyId>),
}

/// Settings for points created by clicking (the UI's input fields)
#[derive(Debug, Clone)]
pub struct PointTemplate {
    pub name: String,
    pub mass: f64,
    pub is_static: bool,
    pub color: Color,
}

impl Default for PointTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            mass: DEFAULT_MASS,
            is_static: false,
            color: named::SEAGREEN,
        }
    }
}

/// Settings for links created by clicking
#[derive(Debug, Clone)]
pub struct LinkTemplate {
    pub name: String,
    pub stiffness: f64,
    pub color: Color,
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            stiffness: DEFAULT_STIFFNESS,
            color: named::SKYBLUE,
        }
    }
}

/// Result of a click, for the UI to react to
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Nothing,
    CreatedPoint(BodyId),
    DeletedPoint(BodyId),
    FirstEndpointSelected(BodyId),
    CreatedLink(LinkId),
    /// Second click landed on the first endpoint again
    LinkCancelled,
    DeletedLink(LinkId),
    Armed(BodyId),
    Disarmed(BodyId),
    AttachedForces(Vec<ForceId>),
    RemovedForce(ForceId),
    AddedToCenterOfMass(BodyId),
    RemovedFromCenterOfMass(BodyId),
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    tool: ClickTool,
    pub point_template: PointTemplate,
    pub link_template: LinkTemplate,
    pub force_name: String,
    link_selection: LinkSelection,
    force_selection: ForceSelection,
    com_selection: Vec<BodyId>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ClickTool {
        self.tool
    }

    /// Switch tool, dropping any half-finished link or force selection.
    pub fn set_tool(&mut self, tool: ClickTool) {
        if tool != self.tool {
            log::debug!("Tool {:?} -> {:?}", self.tool, tool);
            self.link_selection = LinkSelection::Idle;
            self.force_selection = ForceSelection::Idle;
            self.tool = tool;
        }
    }

    pub fn link_selection(&self) -> LinkSelection {
        self.link_selection
    }

    pub fn force_selection(&self) -> &ForceSelection {
        &self.force_selection
    }

    pub fn armed_bodies(&self) -> &[BodyId] {
        match &self.force_selection {
            ForceSelection::Idle => &[],
            ForceSelection::Armed(ids) => ids,
        }
    }

    pub fn com_selection(&self) -> &[BodyId] {
        &self.com_selection
    }

    /// Left click
    pub fn primary_click(&mut self, world: &mut World, at: Vector2) -> Result<EditOutcome, SandboxError> {
        let outcome = match self.tool {
            ClickTool::CreatePoint => {
                let t = &self.point_template;
                let id = world.create_point(at, t.mass, t.is_static, t.name.as_str())?;
                world.set_body_color(id, t.color)?;
                EditOutcome::CreatedPoint(id)
            }
            ClickTool::DeletePoint => match world.pick_nearest_point(at) {
                Some(id) => {
                    world.delete_point(id)?;
                    self.prune(world);
                    EditOutcome::DeletedPoint(id)
                }
                None => EditOutcome::Nothing,
            },
            ClickTool::CreateLink => self.pick_link_endpoint(world, at)?,
            ClickTool::DeleteLink => match world.pick_nearest_link(at) {
                Some(id) => {
                    world.delete_link(id)?;
                    EditOutcome::DeletedLink(id)
                }
                None => EditOutcome::Nothing,
            },
            ClickTool::ApplyForce => self.attach_armed_forces(world, at)?,
            ClickTool::RemoveForce => match world.pick_nearest_force(at) {
                Some(id) => {
                    world.detach_force(id)?;
                    EditOutcome::RemovedForce(id)
                }
                None => EditOutcome::Nothing,
            },
            ClickTool::CenterOfMass => match world.pick_nearest_point(at) {
                Some(id) if !self.com_selection.contains(&id) => {
                    self.com_selection.push(id);
                    EditOutcome::AddedToCenterOfMass(id)
                }
                _ => EditOutcome::Nothing,
            },
        };
        Ok(outcome)
    }

    /// Right click: arm/disarm for forces, or drop from the center-of-mass set
    pub fn secondary_click(&mut self, world: &World, at: Vector2) -> EditOutcome {
        match self.tool {
            ClickTool::ApplyForce => match world.pick_nearest_point(at) {
                Some(id) => self.toggle_armed(id),
                None => EditOutcome::Nothing,
            },
            ClickTool::CenterOfMass => match world.pick_nearest_point(at) {
                Some(id) if self.com_selection.contains(&id) => {
                    self.com_selection.retain(|&b| b != id);
                    EditOutcome::RemovedFromCenterOfMass(id)
                }
                _ => EditOutcome::Nothing,
            },
            _ => EditOutcome::Nothing,
        }
    }

    fn pick_link_endpoint(&mut self, world: &mut World, at: Vector2) -> Result<EditOutcome, SandboxError> {
        let Some(picked) = world.pick_nearest_point(at) else {
            return Ok(EditOutcome::Nothing);
        };

        match self.link_selection {
            LinkSelection::Idle => {
                self.link_selection = LinkSelection::FirstEndpoint(picked);
                Ok(EditOutcome::FirstEndpointSelected(picked))
            }
            LinkSelection::FirstEndpoint(first) => {
                self.link_selection = LinkSelection::Idle;
                if first == picked {
                    return Ok(EditOutcome::LinkCancelled);
                }
                let t = &self.link_template;
                let id = world.create_link(first, picked, t.stiffness, t.color, t.name.as_str())?;
                Ok(EditOutcome::CreatedLink(id))
            }
        }
    }

    fn toggle_armed(&mut self, id: BodyId) -> EditOutcome {
        let mut armed = match std::mem::take(&mut self.force_selection) {
            ForceSelection::Idle => Vec::new(),
            ForceSelection::Armed(ids) => ids,
        };

        let outcome = if let Some(pos) = armed.iter().position(|&b| b == id) {
            armed.remove(pos);
            EditOutcome::Disarmed(id)
        } else {
            armed.push(id);
            EditOutcome::Armed(id)
        };

        if !armed.is_empty() {
            self.force_selection = ForceSelection::Armed(armed);
        }
        outcome
    }

    /// Pin `(click - body) * FORCE_DRAG_SCALE` on every armed body.
    fn attach_armed_forces(&mut self, world: &mut World, at: Vector2) -> Result<EditOutcome, SandboxError> {
        let ForceSelection::Armed(armed) = std::mem::take(&mut self.force_selection) else {
            return Ok(EditOutcome::Nothing);
        };

        let mut attached = Vec::with_capacity(armed.len());
        for id in armed {
            let Some(body) = world.body(id) else {
                log::warn!("Armed body {} no longer exists", id);
                continue;
            };
            let vector = (at - body.position()) * FORCE_DRAG_SCALE;
            attached.push(world.attach_force(id, vector, self.force_name.as_str())?);
        }
        Ok(EditOutcome::AttachedForces(attached))
    }

    /// Forget selected bodies that no longer exist.
    pub fn prune(&mut self, world: &World) {
        if let LinkSelection::FirstEndpoint(id) = self.link_selection {
            if !world.contains_body(id) {
                self.link_selection = LinkSelection::Idle;
            }
        }
        if let ForceSelection::Armed(ids) = &mut self.force_selection {
            ids.retain(|&id| world.contains_body(id));
            if ids.is_empty() {
                self.force_selection = ForceSelection::Idle;
            }
        }
        self.com_selection.retain(|&id| world.contains_body(id));
    }

    /// Center of mass of the current selection, if it has any live bodies
    pub fn center_of_mass(&self, world: &World) -> Option<CenterOfMass> {
        let live: Vec<BodyId> = self
            .com_selection
            .iter()
            .copied()
            .filter(|&id| world.contains_body(id))
            .collect();
        world.compute_center_of_mass(&live).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;

    fn world_with_two() -> (World, BodyId, BodyId) {
        let mut world = World::new(SimulationParams::default()).unwrap();
        let a = world.create_point(Vector2::new(0.0, 0.0), 1.0, false, "a").unwrap();
        let b = world.create_point(Vector2::new(10.0, 0.0), 3.0, false, "b").unwrap();
        (world, a, b)
    }

    #[test]
    fn test_create_point_uses_template() {
        let mut world = World::new(SimulationParams::default()).unwrap();
        let mut editor = Editor::new();
        editor.point_template = PointTemplate {
            name: "anchor".into(),
            mass: 4.0,
            is_static: true,
            color: named::ORANGE,
        };

        let outcome = editor.primary_click(&mut world, Vector2::new(1.0, 2.0)).unwrap();
        let EditOutcome::CreatedPoint(id) = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        let body = world.body(id).unwrap();
        assert_eq!(body.name(), "anchor");
        assert_eq!(body.mass(), 4.0);
        assert!(body.is_static());
        assert_eq!(body.color, named::ORANGE);
    }

    #[test]
    fn test_create_point_with_invalid_mass_fails() {
        let mut world = World::new(SimulationParams::default()).unwrap();
        let mut editor = Editor::new();
        editor.point_template.mass = 0.0;
        assert!(editor.primary_click(&mut world, Vector2::ZERO).is_err());
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn test_link_state_machine() {
        let (mut world, a, b) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::CreateLink);

        assert_eq!(
            editor.primary_click(&mut world, Vector2::new(1.0, 0.0)).unwrap(),
            EditOutcome::FirstEndpointSelected(a)
        );
        assert_eq!(editor.link_selection(), LinkSelection::FirstEndpoint(a));

        let outcome = editor.primary_click(&mut world, Vector2::new(9.0, 0.0)).unwrap();
        assert!(matches!(outcome, EditOutcome::CreatedLink(_)));
        assert_eq!(editor.link_selection(), LinkSelection::Idle);
        assert_eq!(world.links().len(), 1);
        assert_eq!(world.links()[0].p1(), a);
        assert_eq!(world.links()[0].p2(), b);
        assert_eq!(world.links()[0].rest_length(), 10.0);
    }

    #[test]
    fn test_link_same_body_twice_cancels() {
        let (mut world, _, _) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::CreateLink);

        editor.primary_click(&mut world, Vector2::ZERO).unwrap();
        assert_eq!(
            editor.primary_click(&mut world, Vector2::new(0.5, 0.0)).unwrap(),
            EditOutcome::LinkCancelled
        );
        assert!(world.links().is_empty());
        assert_eq!(editor.link_selection(), LinkSelection::Idle);
    }

    #[test]
    fn test_switching_tool_resets_pending_link() {
        let (mut world, _, _) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::CreateLink);
        editor.primary_click(&mut world, Vector2::ZERO).unwrap();
        editor.set_tool(ClickTool::DeleteLink);
        assert_eq!(editor.link_selection(), LinkSelection::Idle);
    }

    #[test]
    fn test_delete_point_prunes_selection() {
        let (mut world, a, _) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::CenterOfMass);
        editor.primary_click(&mut world, Vector2::ZERO).unwrap();
        assert_eq!(editor.com_selection(), &[a]);

        editor.set_tool(ClickTool::DeletePoint);
        assert_eq!(
            editor.primary_click(&mut world, Vector2::ZERO).unwrap(),
            EditOutcome::DeletedPoint(a)
        );
        assert!(editor.com_selection().is_empty());
        assert!(editor.center_of_mass(&world).is_none());
    }

    #[test]
    fn test_force_arming_and_attach() {
        let (mut world, a, b) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::ApplyForce);

        // Nothing armed yet: primary click does nothing.
        assert_eq!(editor.primary_click(&mut world, Vector2::ZERO).unwrap(), EditOutcome::Nothing);

        assert_eq!(editor.secondary_click(&world, Vector2::ZERO), EditOutcome::Armed(a));
        assert_eq!(editor.secondary_click(&world, Vector2::new(10.0, 0.0)), EditOutcome::Armed(b));
        assert_eq!(editor.secondary_click(&world, Vector2::new(10.0, 0.0)), EditOutcome::Disarmed(b));
        assert_eq!(editor.armed_bodies(), &[a]);

        let outcome = editor.primary_click(&mut world, Vector2::new(0.0, 50.0)).unwrap();
        assert!(matches!(outcome, EditOutcome::AttachedForces(ref ids) if ids.len() == 1));
        assert_eq!(world.forces()[0].target(), a);
        assert_eq!(world.forces()[0].vector(), Vector2::new(0.0, 0.5));
        assert_eq!(editor.force_selection(), &ForceSelection::Idle);
    }

    #[test]
    fn test_disarming_last_body_returns_to_idle() {
        let (world, _, _) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::ApplyForce);
        editor.secondary_click(&world, Vector2::ZERO);
        editor.secondary_click(&world, Vector2::ZERO);
        assert_eq!(editor.force_selection(), &ForceSelection::Idle);
    }

    #[test]
    fn test_remove_force_and_delete_link() {
        let (mut world, a, b) = world_with_two();
        world.create_link(a, b, 10.0, named::SKYBLUE, "ab").unwrap();
        world.attach_force(a, Vector2::new(1.0, 0.0), "f").unwrap();
        let mut editor = Editor::new();

        editor.set_tool(ClickTool::RemoveForce);
        assert!(matches!(
            editor.primary_click(&mut world, Vector2::new(100.0, 0.0)).unwrap(),
            EditOutcome::RemovedForce(_)
        ));
        assert!(world.forces().is_empty());

        editor.set_tool(ClickTool::DeleteLink);
        assert!(matches!(
            editor.primary_click(&mut world, Vector2::new(5.0, 0.0)).unwrap(),
            EditOutcome::DeletedLink(_)
        ));
        assert!(world.links().is_empty());
        assert_eq!(
            editor.primary_click(&mut world, Vector2::new(5.0, 0.0)).unwrap(),
            EditOutcome::Nothing
        );
    }

    #[test]
    fn test_center_of_mass_selection() {
        let (mut world, a, b) = world_with_two();
        let mut editor = Editor::new();
        editor.set_tool(ClickTool::CenterOfMass);

        editor.primary_click(&mut world, Vector2::ZERO).unwrap();
        // Adding the same body twice is ignored.
        assert_eq!(editor.primary_click(&mut world, Vector2::ZERO).unwrap(), EditOutcome::Nothing);
        editor.primary_click(&mut world, Vector2::new(10.0, 0.0)).unwrap();
        assert_eq!(editor.com_selection(), &[a, b]);

        let com = editor.center_of_mass(&world).unwrap();
        assert_eq!(com.position, Vector2::new(7.5, 0.0));
        assert_eq!(com.total_mass, 4.0);

        assert_eq!(
            editor.secondary_click(&world, Vector2::ZERO),
            EditOutcome::RemovedFromCenterOfMass(a)
        );
        assert_eq!(editor.center_of_mass(&world).unwrap().position, Vector2::new(10.0, 0.0));
    }
}
