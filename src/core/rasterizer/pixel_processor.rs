use super::shading::apply_lights;
use super::triangle_data::{BoundingBox, TriangleData};
use crate::core::blending::Blending;
use crate::core::frame_buffer::FrameBuffer;
use crate::core::stencil::Stencil;
use crate::geometry::interpolation::{
    barycentric_weights, interpolate, is_inside_triangle, perspective_weights,
};
use crate::geometry::math::{Vec2, Vec3};
use crate::geometry::transform::Viewport;

/// 光栅化时写入的缓冲区与逐像素状态
pub struct RasterTarget<'a> {
    pub frame_buffer: &'a mut FrameBuffer,
    pub stencil: &'a mut Stencil,
    pub blending: &'a Blending,
    pub viewport: &'a Viewport,
}

/// 光栅化单个三角形
///
/// 每个像素依次经过：覆盖测试、深度测试（通过即写入深度）、颜色与纹理插值、
/// 光照、模板测试、混合，最后写入颜色缓冲区。
pub fn rasterize_triangle(triangle: &TriangleData, target: &mut RasterTarget) {
    if !triangle.is_valid() {
        return;
    }

    let Some(bbox) = BoundingBox::from_triangle(
        triangle,
        target.viewport,
        target.frame_buffer.width(),
        target.frame_buffer.height(),
    ) else {
        return;
    };

    let [v0, v1, v2] = triangle.vertices.map(|v| v.pix());

    // 面积为零的三角形整个跳过
    if barycentric_weights(v0, v0, v1, v2).is_none() {
        return;
    }

    let inv_w = triangle.inv_w();
    let depths = triangle.depths();

    bbox.for_each_pixel(|x, y| {
        let p = Vec2::new(x as f32, y as f32);
        let Some(weights) = barycentric_weights(p, v0, v1, v2) else {
            return;
        };
        if !is_inside_triangle(&weights) {
            return;
        }

        let perspective = perspective_weights(&weights, &inv_w);
        let depth_weights = if triangle.perspective_correct_depth {
            &perspective
        } else {
            &weights
        };
        let depth = depths.dot(depth_weights);

        if !target.frame_buffer.test_and_set_depth(x, y, depth) {
            return;
        }

        process_fragment(triangle, &perspective, x, y, depth, target);
    });
}

fn process_fragment(
    triangle: &TriangleData,
    perspective: &Vec3,
    x: usize,
    y: usize,
    depth: f32,
    target: &mut RasterTarget,
) {
    let [a, b, c] = &triangle.vertices;

    let mut color = interpolate(perspective, a.color, b.color, c.color);

    if let Some(texture) = triangle.texture {
        let uv = interpolate(perspective, a.uv, b.uv, c.uv);
        color = color.component_mul(&texture.sample(&uv));
    }

    let frag_pos = Vec3::new(x as f32, y as f32, depth);
    color = apply_lights(
        color,
        &frag_pos,
        &triangle.eye,
        &triangle.normal,
        triangle.material,
        triangle.lights,
    );

    // 深度已提交，模板只决定是否写入颜色
    if target.stencil.test_and_apply(x, y) {
        return;
    }

    if target.blending.enabled {
        let dst = target.frame_buffer.pixel(x, y);
        color = target.blending.combine(&dst, &color);
    }

    target.frame_buffer.set_pixel(x, y, color);
}
