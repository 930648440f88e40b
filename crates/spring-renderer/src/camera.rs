//! 2D pan/zoom camera and the world <-> screen transform
//!
//! Screen space has its origin at the top-left corner with y pointing down;
//! world space has y pointing up. `zoom` is world units per screen pixel, so
//! a larger zoom shows more of the world.

use bytemuck::{Pod, Zeroable};
use spring_physics::{
    SandboxError, Vector2, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, PAN_STEP_PIXELS,
    ZOOM_STEP,
};

/// Camera uniform for GPU
///
/// `screen = (world - position) * inv_zoom * (1, -1) + viewport / 2`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub position: [f32; 2],
    pub viewport: [f32; 2],
    pub inv_zoom: f32,
    pub _padding: [f32; 3],
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, SandboxError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(SandboxError::InvalidViewport { width, height })
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Active,
    Standby,
}

/// Camera for 2D scene navigation
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    /// World-space point shown at the viewport center
    position: Vector2,
    zoom: f64,
    state: CameraState,
}

impl Camera {
    /// A new camera starts in standby; a [`CameraRig`] decides which one is active.
    pub fn new(name: impl Into<String>, position: Vector2, zoom: f64) -> Result<Self, SandboxError> {
        Ok(Self {
            name: name.into(),
            position,
            zoom: validate_zoom(zoom)?,
            state: CameraState::Standby,
        })
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CameraState::Active
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), SandboxError> {
        self.zoom = validate_zoom(zoom)?;
        Ok(())
    }

    pub fn move_by(&mut self, delta: Vector2) {
        self.position += delta;
    }

    /// `zoom *= factor`; factors above 1 zoom out.
    pub fn zoom_by(&mut self, factor: f64) -> Result<(), SandboxError> {
        let factor = validate_zoom(factor)?;
        self.zoom = validate_zoom(self.zoom * factor)?;
        Ok(())
    }

    pub fn world_to_screen(&self, p: Vector2, viewport: Viewport) -> Vector2 {
        Vector2::new(
            (p.x - self.position.x) / self.zoom + viewport.width / 2.0,
            (-p.y + self.position.y) / self.zoom + viewport.height / 2.0,
        )
    }

    pub fn screen_to_world(&self, s: Vector2, viewport: Viewport) -> Vector2 {
        Vector2::new(
            (s.x - viewport.width / 2.0) * self.zoom + self.position.x,
            -((s.y - viewport.height / 2.0) * self.zoom - self.position.y),
        )
    }

    pub fn to_uniform(&self, viewport: Viewport) -> CameraUniform {
        CameraUniform {
            position: self.position.as_vec2().to_array(),
            viewport: [viewport.width as f32, viewport.height as f32],
            inv_zoom: (1.0 / self.zoom) as f32,
            _padding: [0.0; 3],
        }
    }
}

fn validate_zoom(zoom: f64) -> Result<f64, SandboxError> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(SandboxError::InvalidZoom(zoom))
    }
}

/// The set of cameras in a session; at most one is active at a time.
#[derive(Debug, Clone)]
pub struct CameraRig {
    cameras: Vec<Camera>,
    viewport: Viewport,
}

impl CameraRig {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            cameras: Vec::new(),
            viewport,
        }
    }

    /// A rig with one camera, already active
    pub fn single(camera: Camera, viewport: Viewport) -> Self {
        let mut rig = Self::new(viewport);
        rig.add(camera);
        rig.cameras[0].state = CameraState::Active;
        rig
    }

    /// Add a camera in standby and return its index.
    pub fn add(&mut self, mut camera: Camera) -> usize {
        camera.state = CameraState::Standby;
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SandboxError> {
        self.viewport = Viewport::new(width, height)?;
        Ok(())
    }

    /// Make camera `index` the only active one.
    pub fn activate(&mut self, index: usize) -> Result<(), SandboxError> {
        if index >= self.cameras.len() {
            return Err(SandboxError::UnknownCamera(index));
        }
        for (i, camera) in self.cameras.iter_mut().enumerate() {
            camera.state = if i == index {
                CameraState::Active
            } else {
                CameraState::Standby
            };
        }
        log::debug!("Camera '{}' active", self.cameras[index].name);
        Ok(())
    }

    pub fn active(&self) -> Result<&Camera, SandboxError> {
        self.cameras
            .iter()
            .find(|c| c.is_active())
            .ok_or(SandboxError::NoActiveCamera)
    }

    pub fn active_mut(&mut self) -> Result<&mut Camera, SandboxError> {
        self.cameras
            .iter_mut()
            .find(|c| c.is_active())
            .ok_or(SandboxError::NoActiveCamera)
    }

    pub fn world_to_screen(&self, p: Vector2) -> Result<Vector2, SandboxError> {
        Ok(self.active()?.world_to_screen(p, self.viewport))
    }

    pub fn screen_to_world(&self, s: Vector2) -> Result<Vector2, SandboxError> {
        Ok(self.active()?.screen_to_world(s, self.viewport))
    }

    /// Pan by a fixed number of screen pixels in the given direction
    fn pan_pixels(&mut self, direction: Vector2) -> Result<(), SandboxError> {
        let camera = self.active_mut()?;
        let delta = direction * PAN_STEP_PIXELS * camera.zoom();
        camera.move_by(delta);
        Ok(())
    }

    pub fn pan_left(&mut self) -> Result<(), SandboxError> {
        self.pan_pixels(Vector2::NEG_X)
    }

    pub fn pan_right(&mut self) -> Result<(), SandboxError> {
        self.pan_pixels(Vector2::X)
    }

    pub fn pan_up(&mut self) -> Result<(), SandboxError> {
        self.pan_pixels(Vector2::Y)
    }

    pub fn pan_down(&mut self) -> Result<(), SandboxError> {
        self.pan_pixels(Vector2::NEG_Y)
    }

    pub fn zoom_out(&mut self) -> Result<(), SandboxError> {
        self.active_mut()?.zoom_by(ZOOM_STEP)
    }

    pub fn zoom_in(&mut self) -> Result<(), SandboxError> {
        self.active_mut()?.zoom_by(1.0 / ZOOM_STEP)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_cam() -> Camera {
        Camera::new("main", Vector2::new(100.0, 50.0), 1.0).unwrap()
    }

    #[test]
    fn test_camera_center_maps_to_viewport_center() {
        let cam = main_cam();
        let s = cam.world_to_screen(Vector2::new(100.0, 50.0), Viewport::default());
        assert_eq!(s, Vector2::new(450.0, 250.0));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let cam = main_cam();
        let vp = Viewport::default();
        let above = cam.world_to_screen(Vector2::new(100.0, 60.0), vp);
        assert_eq!(above, Vector2::new(450.0, 240.0));
    }

    #[test]
    fn test_zoom_scales_distances() {
        let mut cam = main_cam();
        cam.zoom_by(2.0).unwrap();
        let s = cam.world_to_screen(Vector2::new(120.0, 50.0), Viewport::default());
        assert_eq!(s, Vector2::new(460.0, 250.0));
        assert!(cam.zoom_by(0.0).is_err());
        assert!(cam.zoom_by(-1.0).is_err());
        assert_eq!(cam.zoom(), 2.0);
    }

    #[test]
    fn test_rejects_bad_zoom_and_viewport() {
        assert!(Camera::new("c", Vector2::ZERO, 0.0).is_err());
        assert!(Viewport::new(0.0, 10.0).is_err());
        assert!(Viewport::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rig_without_active_camera() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.active().unwrap_err(), SandboxError::NoActiveCamera);
        rig.add(main_cam());
        assert!(rig.world_to_screen(Vector2::ZERO).is_err());
        assert!(rig.pan_left().is_err());
        assert_eq!(rig.activate(3), Err(SandboxError::UnknownCamera(3)));
    }

    #[test]
    fn test_only_one_camera_active() {
        let mut rig = CameraRig::single(main_cam(), Viewport::default());
        let second = rig.add(Camera::new("overview", Vector2::ZERO, 4.0).unwrap());
        assert_eq!(rig.active().unwrap().name, "main");

        rig.activate(second).unwrap();
        assert_eq!(rig.cameras().iter().filter(|c| c.is_active()).count(), 1);
        assert_eq!(rig.active().unwrap().name, "overview");
        assert_eq!(rig.cameras()[0].state(), CameraState::Standby);
    }

    #[test]
    fn test_pan_scales_with_zoom() {
        let mut rig = CameraRig::single(main_cam(), Viewport::default());
        rig.pan_right().unwrap();
        assert_eq!(rig.active().unwrap().position(), Vector2::new(130.0, 50.0));

        rig.zoom_out().unwrap();
        rig.pan_down().unwrap();
        assert_eq!(rig.active().unwrap().position(), Vector2::new(130.0, -10.0));

        rig.zoom_in().unwrap();
        rig.pan_left().unwrap();
        rig.pan_up().unwrap();
        assert_eq!(rig.active().unwrap().position(), Vector2::new(100.0, 20.0));
    }

    #[test]
    fn test_uniform_is_pod() {
        let uniform = main_cam().to_uniform(Viewport::default());
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 32);
        assert_eq!(uniform.inv_zoom, 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_screen_world_round_trip(
            cx in -1e4f64..1e4, cy in -1e4f64..1e4,
            zoom in 1e-3f64..1e3,
            sx in -2000f64..2000.0, sy in -2000f64..2000.0,
        ) {
            let cam = Camera::new("c", Vector2::new(cx, cy), zoom).unwrap();
            let vp = Viewport::default();
            let s = Vector2::new(sx, sy);
            let back = cam.world_to_screen(cam.screen_to_world(s, vp), vp);
            prop_assert!((back - s).length() < 1e-9 * (1.0 + (cx.abs() + cy.abs()) / zoom));
        }

        #[test]
        fn prop_world_screen_round_trip(
            px in -1e4f64..1e4, py in -1e4f64..1e4,
            zoom in 1e-3f64..1e3,
        ) {
            let cam = Camera::new("c", Vector2::new(10.0, -20.0), zoom).unwrap();
            let vp = Viewport::default();
            let p = Vector2::new(px, py);
            let back = cam.screen_to_world(cam.world_to_screen(p, vp), vp);
            prop_assert!((back - p).length() < 1e-9 * (1.0 + p.length()));
        }
    }
}
