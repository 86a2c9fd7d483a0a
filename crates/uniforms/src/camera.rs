use glam::{Vec2, Vec3};

/// Perspective camera as described by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width over height of the drawing surface.
    pub aspect: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 1.0,
            position: Vec3::new(0.0, 0.0, 4.0),
            target: Vec3::ZERO,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraParams {
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Drawing surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `None` until the surface has been laid out.
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Visible extent in world units on the plane through the camera target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Frustum cross-section at the camera-target distance.
    ///
    /// Degenerate cameras yield a zero viewport, which the driver treats as
    /// "not laid out yet".
    pub fn from_camera(camera: &CameraParams) -> Self {
        let fov = camera.fov_y_degrees.to_radians();
        let distance = camera.distance();
        let height = 2.0 * (fov / 2.0).tan() * distance;
        let width = height * camera.aspect;
        let viewport = Self { width, height };
        if viewport.is_degenerate() {
            Self::default()
        } else {
            viewport
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// UV scale that makes a background image cover a view of another aspect.
///
/// Returns `None` when either aspect is non-positive or not finite.
pub fn cover_scale(image_aspect: f32, view_aspect: f32) -> Option<Vec2> {
    let valid = |aspect: f32| aspect.is_finite() && aspect > 0.0;
    if !valid(image_aspect) || !valid(view_aspect) {
        return None;
    }
    if image_aspect > view_aspect {
        Some(Vec2::new(view_aspect / image_aspect, 1.0))
    } else {
        Some(Vec2::new(1.0, image_aspect / view_aspect))
    }
}
