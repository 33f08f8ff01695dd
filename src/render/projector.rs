//! Front-to-back ray march over depth slices, one sample per screen column.
use crate::core::camera::Camera;
use crate::core::terrain::Terrain;
use crate::render::framebuffer::{Framebuffer, rgb_to_color};
use crate::render::occlusion::OcclusionBuffer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnProjector {
    /// World distance between consecutive slices.
    pub depth_step: f32,
    /// Rows per unit of height difference at depth 1, before camera scale.
    pub projection_height: f32,
}

/// Distance of slice `k`: the first slice sits at 1, never at 0.
#[inline]
pub fn slice_depth(k: u32, depth_step: f32) -> f32 {
    1.0 + k as f32 * depth_step
}

/// Screen row of a terrain top, clamped into `[0, render_height]`.
#[inline]
pub fn project_row(elevation: f32, height: f32, k_over_z: f32, horizon: f32, render_height: u32) -> u32 {
    let row = (elevation - height) * k_over_z + horizon;
    // NaN collapses to 0 through the cast
    row.clamp(0.0, render_height as f32) as u32
}

impl ColumnProjector {
    pub fn new(depth_step: f32, projection_height: f32) -> Self {
        Self { depth_step, projection_height }
    }

    /// The `K` in `(elevation - height) * K / z + horizon`.
    pub fn projection_constant(&self, camera: &Camera) -> f32 {
        self.projection_height * camera.scale
    }

    /// Marches `camera.view_distance` slices away from the camera and
    /// composites each column through `occlusion` into `target`.
    pub fn project(
        &self,
        terrain: &Terrain,
        camera: &Camera,
        occlusion: &mut OcclusionBuffer,
        target: &mut Framebuffer,
    ) {
        let w = target.width;
        let h = target.height;
        if w == 0 {
            return;
        }
        let (sina, cosa) = camera.yaw.sin_cos();
        let k = self.projection_constant(camera);

        for slice in 0..camera.view_distance {
            let z = slice_depth(slice, self.depth_step);

            // left and right ends of the sampling line at this depth
            let mut px = (-cosa * z - sina * z) * camera.scale;
            let mut py = (sina * z - cosa * z) * camera.scale;
            let rx = (cosa * z - sina * z) * camera.scale;
            let ry = (-sina * z - cosa * z) * camera.scale;

            let dx = (rx - px) / w as f32;
            let dy = (ry - py) / w as f32;
            px += camera.x;
            py += camera.y;

            let k_over_z = k / z;
            for column in 0..w {
                let (sx, sy) = (px as i32, py as i32);
                let height = terrain.height(sx, sy) as f32;
                let top = project_row(camera.elevation, height, k_over_z, camera.horizon, h);
                if top < occlusion.top(column).unwrap_or(0) {
                    occlusion.composite(target, column, top, rgb_to_color(terrain.color(sx, sy)));
                }
                px += dx;
                py += dy;
            }
        }
    }
}
