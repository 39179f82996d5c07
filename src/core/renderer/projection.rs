//! Aspect-ratio-preserving orthographic projection.
//!
//! The image is drawn on a square fan spanning `[-1, 1]` in x and y, so the
//! projection widens one frustum axis instead of stretching the image: the
//! axis on which the viewport is roomier gets scaled, the other stays clamped
//! to `[-1, 1]`.

use glam::{Mat4, Vec3};

/// Near clipping plane distance.
pub const NEAR_PLANE: f32 = 3.0;
/// Far clipping plane distance.
pub const FAR_PLANE: f32 = 7.0;
/// Eye sits on the +Z axis looking at the origin.
pub const EYE_DISTANCE: f32 = 7.0;

/// Left/right/bottom/top extents of the orthographic frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

/// Computes frustum extents that letterbox the image into the viewport.
///
/// Wider-than-tall viewports clamp the vertical extent to `[-1, 1]` and scale
/// the horizontal one; the scale factor depends on whether the image is
/// relatively wider than the viewport. Taller (or square) viewports clamp the
/// horizontal extent instead; there the relatively-wider and
/// relatively-narrower sub-cases reduce to the same expression.
pub fn aspect_fit_bounds(image_aspect: f32, viewport_width: u32, viewport_height: u32) -> FrustumBounds {
    let viewport_aspect = viewport_width as f32 / viewport_height as f32;

    if viewport_width > viewport_height {
        let half_width = if image_aspect > viewport_aspect {
            viewport_aspect * image_aspect
        } else {
            viewport_aspect / image_aspect
        };
        FrustumBounds {
            left: -half_width,
            right: half_width,
            bottom: -1.0,
            top: 1.0,
        }
    } else {
        let half_height = image_aspect / viewport_aspect;
        FrustumBounds {
            left: -1.0,
            right: 1.0,
            bottom: -half_height,
            top: half_height,
        }
    }
}

/// Combined model-view-projection for the current image and viewport.
pub fn model_view_projection(image_aspect: f32, viewport_width: u32, viewport_height: u32) -> Mat4 {
    let bounds = aspect_fit_bounds(image_aspect, viewport_width, viewport_height);
    let projection = Mat4::orthographic_rh_gl(
        bounds.left,
        bounds.right,
        bounds.bottom,
        bounds.top,
        NEAR_PLANE,
        FAR_PLANE,
    );
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, EYE_DISTANCE), Vec3::ZERO, Vec3::Y);
    projection * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPSILON: f32 = 1.0e-4;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn wide_viewport_with_relatively_wide_image_scales_horizontally() {
        // viewport 16:9 (~1.7778), image 2:1
        let bounds = aspect_fit_bounds(2.0, 1600, 900);
        let viewport_aspect = 1600.0 / 900.0;
        assert_close(bounds.right, viewport_aspect * 2.0);
        assert_close(bounds.left, -viewport_aspect * 2.0);
        assert_close(bounds.bottom, -1.0);
        assert_close(bounds.top, 1.0);
    }

    #[test]
    fn wide_viewport_with_relatively_narrow_image_scales_horizontally() {
        // viewport 16:9, image square
        let bounds = aspect_fit_bounds(1.0, 1600, 900);
        let viewport_aspect = 1600.0 / 900.0;
        assert_close(bounds.right, viewport_aspect / 1.0);
        assert_close(bounds.left, -viewport_aspect / 1.0);
        assert_close(bounds.bottom, -1.0);
        assert_close(bounds.top, 1.0);
    }

    #[test]
    fn tall_viewport_with_relatively_wide_image_scales_vertically() {
        // viewport 9:16 (0.5625), image square
        let bounds = aspect_fit_bounds(1.0, 900, 1600);
        let viewport_aspect = 900.0 / 1600.0;
        assert_close(bounds.top, 1.0 / viewport_aspect);
        assert_close(bounds.bottom, -1.0 / viewport_aspect);
        assert_close(bounds.left, -1.0);
        assert_close(bounds.right, 1.0);
    }

    #[test]
    fn tall_viewport_with_relatively_narrow_image_scales_vertically() {
        // viewport 9:16, image 1:2
        let bounds = aspect_fit_bounds(0.5, 900, 1600);
        let viewport_aspect = 900.0 / 1600.0;
        assert_close(bounds.top, 0.5 / viewport_aspect);
        assert_close(bounds.bottom, -0.5 / viewport_aspect);
        assert_close(bounds.left, -1.0);
        assert_close(bounds.right, 1.0);
    }

    #[test]
    fn square_viewport_takes_the_clamped_horizontal_branch() {
        let bounds = aspect_fit_bounds(1.0, 800, 800);
        assert_close(bounds.left, -1.0);
        assert_close(bounds.right, 1.0);
        assert_close(bounds.bottom, -1.0);
        assert_close(bounds.top, 1.0);
    }

    #[test]
    fn center_vertex_lands_on_the_far_plane_at_the_ndc_origin() {
        let mvp = model_view_projection(1.0, 800, 800);
        let clip = mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_close(clip.x / clip.w, 0.0);
        assert_close(clip.y / clip.w, 0.0);
        // eye distance 7 equals the far plane, so depth maps to the +1 edge
        assert_close(clip.z / clip.w, 1.0);
    }

    #[test]
    fn corner_vertices_reach_the_ndc_edges_on_a_square_viewport() {
        let mvp = model_view_projection(1.0, 640, 640);
        let clip = mvp * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert_close(clip.x / clip.w, 1.0);
        assert_close(clip.y / clip.w, 1.0);
        let clip = mvp * Vec4::new(-1.0, -1.0, 0.0, 1.0);
        assert_close(clip.x / clip.w, -1.0);
        assert_close(clip.y / clip.w, -1.0);
    }

    #[test]
    fn sixteen_by_nine_viewport_letterboxes_a_four_by_three_image() {
        let image_aspect = 4.0 / 3.0;
        let bounds = aspect_fit_bounds(image_aspect, 1920, 1080);
        let viewport_aspect = 1920.0 / 1080.0;
        // image is relatively narrower than the viewport
        assert!(image_aspect < viewport_aspect);
        assert_close(bounds.right, viewport_aspect / image_aspect);
        assert_close(bounds.top, 1.0);
    }
}
