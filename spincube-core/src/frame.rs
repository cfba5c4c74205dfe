//! Per-frame transform math.
//!
//! Everything here is recomputed from scratch every frame: the scene only has two
//! objects, so there is no caching or dirty tracking.

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{lighting::Camera, viewport::Viewport};

/// Phase units per second of elapsed time.
pub const ANIMATION_SPEED: f64 = 0.3;
/// Degrees each rotation axis turns per phase unit.
pub const DEGREES_PER_PHASE: f32 = 90.0;
pub const FIELD_OF_VIEW_DEGREES: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Converts elapsed seconds into the animation phase `f`.
#[inline]
pub fn animation_phase(time: f64) -> f32 {
    (time * ANIMATION_SPEED) as f32
}

/// Perspective projection for the given viewport, using OpenGL clip space.
pub fn projection_matrix(viewport: Viewport) -> Mat4 {
    Mat4::perspective_rh_gl(
        FIELD_OF_VIEW_DEGREES.to_radians(),
        viewport.aspect_ratio(),
        Z_NEAR,
        Z_FAR,
    )
}

/// Matrix that takes object-space normals to world space.
///
/// Only the upper-left 3x3 of the model matrix is used, so translation never
/// affects normals, and the inverse-transpose keeps them perpendicular to the
/// surface under non-uniform scale.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model).inverse().transpose()
}

/// Placement of one object: a fixed translation followed by a chain of
/// time-driven rotations, applied in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    pub translation: Vec3,
    pub rotation_axes: Vec<Vec3>,
}

impl ObjectTransform {
    pub fn new(translation: Vec3, rotation_axes: Vec<Vec3>) -> Self {
        Self {
            translation,
            rotation_axes,
        }
    }

    /// Number of rotation axes too short to normalize.
    pub fn zero_length_axes(&self) -> usize {
        self.rotation_axes
            .iter()
            .filter(|axis| axis.try_normalize().is_none())
            .count()
    }

    /// `translate(t) * rotate(f * 90deg, a0) * rotate(f * 90deg, a1) * ...`
    ///
    /// Zero-length axes are skipped.
    pub fn model_matrix(&self, phase: f32) -> Mat4 {
        let angle = phase * DEGREES_PER_PHASE.to_radians();
        self.rotation_axes
            .iter()
            .filter_map(|axis| axis.try_normalize())
            .fold(Mat4::from_translation(self.translation), |model, axis| {
                model * Mat4::from_axis_angle(axis, angle)
            })
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, vec![Vec3::Y, Vec3::X])
    }
}

/// Matrices uploaded for a single object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMatrices {
    pub model: Mat4,
    pub normal: Mat3,
}

impl ObjectMatrices {
    pub fn new(transform: &ObjectTransform, phase: f32) -> Self {
        let model = transform.model_matrix(phase);
        Self {
            model,
            normal: normal_matrix(&model),
        }
    }
}

/// Everything the renderer uploads as matrices during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrices {
    pub view: Mat4,
    pub projection: Mat4,
    pub objects: Vec<ObjectMatrices>,
}

impl FrameMatrices {
    /// Computes the view and projection shared by the frame and one set of
    /// object matrices per transform, in the same order.
    pub fn compute<'a>(
        time: f64,
        camera: &Camera,
        viewport: Viewport,
        transforms: impl IntoIterator<Item = &'a ObjectTransform>,
    ) -> Self {
        let phase = animation_phase(time);
        Self {
            view: camera.view_matrix(),
            projection: projection_matrix(viewport),
            objects: transforms
                .into_iter()
                .map(|transform| ObjectMatrices::new(transform, phase))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_axis(x: f32) -> ObjectTransform {
        ObjectTransform::new(Vec3::new(x, 0.0, 0.0), vec![Vec3::Y, Vec3::X])
    }

    #[test]
    fn test_animation_phase() {
        assert_eq!(animation_phase(0.0), 0.0);
        assert!((animation_phase(10.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_aspect_term() {
        for (w, h) in [(640, 480), (1280, 720), (100, 1000), (1, 1), (3, 7)] {
            let projection = projection_matrix(Viewport::new(w, h));
            let aspect = projection.y_axis.y / projection.x_axis.x;
            let expected = w as f32 / h as f32;
            assert!(
                (aspect - expected).abs() <= expected * 1e-6,
                "{w}x{h}: {aspect} != {expected}"
            );
        }
    }

    #[test]
    fn test_projection_field_of_view() {
        let projection = projection_matrix(Viewport::new(640, 480));
        let focal = 1.0 / (FIELD_OF_VIEW_DEGREES.to_radians() / 2.0).tan();
        assert!((projection.y_axis.y - focal).abs() < 1e-5);
    }

    #[test]
    fn test_zero_phase_is_pure_translation() {
        for x in [-0.5, 0.5, 1.0] {
            let model = two_axis(x).model_matrix(0.0);
            assert!(model.abs_diff_eq(Mat4::from_translation(Vec3::new(x, 0.0, 0.0)), 1e-6));
        }
    }

    #[test]
    fn test_rotation_composition_order() {
        let transform = two_axis(-0.5);
        let phase = 0.7;
        let angle = phase * DEGREES_PER_PHASE.to_radians();
        let expected = Mat4::from_translation(Vec3::new(-0.5, 0.0, 0.0))
            * Mat4::from_rotation_y(angle)
            * Mat4::from_rotation_x(angle);
        assert!(transform.model_matrix(phase).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_rotation_axes_are_normalized() {
        let scaled = ObjectTransform::new(Vec3::ZERO, vec![Vec3::new(0.0, 4.0, 0.0)]);
        let unit = ObjectTransform::new(Vec3::ZERO, vec![Vec3::Y]);
        assert!(scaled.model_matrix(1.3).abs_diff_eq(unit.model_matrix(1.3), 1e-6));

        let degenerate = ObjectTransform::new(Vec3::X, vec![Vec3::ZERO]);
        assert_eq!(degenerate.model_matrix(2.0), Mat4::from_translation(Vec3::X));
    }

    #[test]
    fn test_zero_length_axes() {
        assert_eq!(two_axis(0.5).zero_length_axes(), 0);

        let mixed = ObjectTransform::new(Vec3::ZERO, vec![Vec3::ZERO, Vec3::Y, Vec3::ZERO]);
        assert_eq!(mixed.zero_length_axes(), 2);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let model = two_axis(0.5).model_matrix(1.234);
        let normal = normal_matrix(&model);
        assert!(normal.abs_diff_eq(Mat3::from_mat4(model), 1e-5));
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let model = Mat4::from_translation(Vec3::new(5.0, -2.0, 9.0));
        assert!(normal_matrix(&model).abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)) * Mat4::from_rotation_z(0.3);
        let normal = normal_matrix(&model);
        let expected = Mat3::from_mat4(model).inverse().transpose();
        assert!(normal.abs_diff_eq(expected, 1e-6));

        // A surface tangent and its transformed normal stay perpendicular.
        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let surface_normal = Vec3::new(1.0, -1.0, 0.0);
        let world_tangent = Mat3::from_mat4(model) * tangent;
        let world_normal = normal * surface_normal;
        assert!(world_tangent.dot(world_normal).abs() < 1e-5);
    }

    #[test]
    fn test_frame_shares_view_and_projection() {
        let camera = Camera::default();
        let transforms = [two_axis(-0.5), two_axis(0.5)];
        let start = FrameMatrices::compute(0.0, &camera, Viewport::default(), &transforms);
        let later = FrameMatrices::compute(10.0, &camera, Viewport::default(), &transforms);

        assert_eq!(start.objects.len(), 2);
        assert_eq!(start.view, later.view);
        assert_eq!(start.projection, later.projection);
        assert_ne!(start.objects[0].model, later.objects[0].model);
        assert_ne!(start.objects[1].model, later.objects[1].model);
    }

    #[test]
    fn test_frame_follows_viewport() {
        let camera = Camera::default();
        let none: [ObjectTransform; 0] = [];
        let small = FrameMatrices::compute(1.0, &camera, Viewport::new(640, 480), &none);
        let wide = FrameMatrices::compute(1.0, &camera, Viewport::new(1600, 480), &none);
        assert!(small.objects.is_empty());
        assert_ne!(small.projection, wide.projection);
        assert_eq!(small.projection.y_axis.y, wide.projection.y_axis.y);
    }
}
