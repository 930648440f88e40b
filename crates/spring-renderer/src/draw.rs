//! Screen-space draw data
//!
//! [`DrawList::build`] walks the world once per frame and emits instance
//! buffers a backend can upload as-is. Layers are drawn in field order:
//! ground bands, lines, bodies, selection markers, overlay lines, labels.

use crate::camera::{Camera, CameraRig, Viewport};
use crate::palette::Palette;
use bytemuck::{Pod, Zeroable};
use spring_physics::{Color, SandboxError, Vector2};
use spring_simulation::{Editor, LinkSelection, World};

/// A filled or outlined disc
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 2],
    pub radius: f32,
    /// 0 = filled, 1 = outline only
    pub outline: u32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
    /// 1 = draw an arrow head at `to`
    pub arrow_head: u32,
    pub _padding: [u32; 2],
}

/// Axis-aligned screen rectangle
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vector2,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointLabels {
    #[default]
    Off,
    Names,
    Masses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkLabels {
    #[default]
    Off,
    Names,
    Stiffness,
}

/// Sizes in pixels
#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub point_labels: PointLabels,
    pub link_labels: LinkLabels,
    pub palette: Palette,
    pub point_radius: f32,
    pub marker_radius: f32,
    pub line_width: f32,
    pub cross_half_size: f32,
    pub label_offset: Vector2,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            point_labels: PointLabels::Off,
            link_labels: LinkLabels::Off,
            palette: Palette::default(),
            point_radius: 3.0,
            marker_radius: 6.0,
            line_width: 1.0,
            cross_half_size: 8.0,
            label_offset: Vector2::new(6.0, -6.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub clear_color: Color,
    pub grounds: Vec<RectInstance>,
    /// Links, then force arrows
    pub lines: Vec<LineInstance>,
    pub points: Vec<PointInstance>,
    pub markers: Vec<PointInstance>,
    /// Center-of-mass cross
    pub overlay: Vec<LineInstance>,
    pub labels: Vec<Label>,
}

fn screen(v: Vector2) -> [f32; 2] {
    v.as_vec2().to_array()
}

impl DrawList {
    pub fn build(
        world: &World,
        editor: &Editor,
        camera: &Camera,
        viewport: Viewport,
        options: &DrawOptions,
    ) -> Self {
        let to_screen = |p: Vector2| camera.world_to_screen(p, viewport);
        let palette = &options.palette;
        let mut list = Self {
            clear_color: palette.background,
            ..Self::default()
        };

        for ground in world.grounds() {
            let top = to_screen(Vector2::new(camera.position().x, ground.height())).y;
            if top >= viewport.height {
                continue;
            }
            list.grounds.push(RectInstance {
                min: [0.0, top.max(0.0) as f32],
                max: [viewport.width as f32, viewport.height as f32],
                color: ground.color.to_linear().to_array(),
            });
        }

        for link in world.links() {
            let Some((p1, p2)) = world.link_endpoints(link) else {
                continue;
            };
            let (s1, s2) = (to_screen(p1), to_screen(p2));
            list.lines.push(LineInstance {
                from: screen(s1),
                to: screen(s2),
                color: link.color.to_linear().to_array(),
                width: options.line_width,
                arrow_head: 0,
                _padding: [0; 2],
            });
            let text = match options.link_labels {
                LinkLabels::Off => None,
                LinkLabels::Names => Some(link.name().to_string()),
                LinkLabels::Stiffness => Some(link.stiffness().to_string()),
            };
            if let Some(text) = text {
                list.labels.push(Label {
                    text,
                    position: (s1 + s2) / 2.0,
                    color: link.color,
                });
            }
        }

        for force in world.forces() {
            let Some(body) = world.body(force.target()) else {
                continue;
            };
            let anchor = body.position();
            list.lines.push(LineInstance {
                from: screen(to_screen(anchor)),
                to: screen(to_screen(force.arrow_tip(anchor))),
                color: palette.force_arrow.to_linear().to_array(),
                width: options.line_width,
                arrow_head: 1,
                _padding: [0; 2],
            });
        }

        for body in world.bodies() {
            let s = to_screen(body.position());
            list.points.push(PointInstance {
                position: screen(s),
                radius: options.point_radius,
                outline: 0,
                color: body.color.to_linear().to_array(),
            });
            let text = match options.point_labels {
                PointLabels::Off => None,
                PointLabels::Names => Some(body.name().to_string()),
                PointLabels::Masses => Some(body.mass().to_string()),
            };
            if let Some(text) = text {
                list.labels.push(Label {
                    text,
                    position: s + options.label_offset,
                    color: palette.label,
                });
            }
        }

        let mut marker = |id, color: Color| {
            if let Some(body) = world.body(id) {
                list.markers.push(PointInstance {
                    position: screen(to_screen(body.position())),
                    radius: options.marker_radius,
                    outline: 1,
                    color: color.to_linear().to_array(),
                });
            }
        };
        if let LinkSelection::FirstEndpoint(id) = editor.link_selection() {
            marker(id, palette.link_pending);
        }
        for &id in editor.armed_bodies() {
            marker(id, palette.force_armed);
        }
        for &id in editor.com_selection() {
            marker(id, palette.center_of_mass);
        }

        if let Some(com) = editor.center_of_mass(world) {
            let c = to_screen(com.position);
            let h = options.cross_half_size as f64;
            for (from, to) in [
                (c - Vector2::new(h, 0.0), c + Vector2::new(h, 0.0)),
                (c - Vector2::new(0.0, h), c + Vector2::new(0.0, h)),
            ] {
                list.overlay.push(LineInstance {
                    from: screen(from),
                    to: screen(to),
                    color: palette.center_of_mass.to_linear().to_array(),
                    width: options.line_width * 2.0,
                    arrow_head: 0,
                    _padding: [0; 2],
                });
            }
        }

        list
    }

    /// Build from the rig's active camera.
    pub fn from_rig(
        world: &World,
        editor: &Editor,
        rig: &CameraRig,
        options: &DrawOptions,
    ) -> Result<Self, SandboxError> {
        Ok(Self::build(world, editor, rig.active()?, rig.viewport(), options))
    }

    pub fn is_empty(&self) -> bool {
        self.grounds.is_empty()
            && self.lines.is_empty()
            && self.points.is_empty()
            && self.markers.is_empty()
            && self.overlay.is_empty()
            && self.labels.is_empty()
    }
}
