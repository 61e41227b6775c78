use crate::geometry::math::{Vec2, Vec3};
use crate::material_system::color::{Color, splat};

/// 物体空间顶点：位置、颜色、法线与纹理坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, color: Color, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            color,
            normal,
            uv,
        }
    }

    /// 白色、零法线、零纹理坐标的顶点
    pub fn at(position: Vec3) -> Self {
        Self::new(position, splat(1.0), Vec3::zeros(), Vec2::zeros())
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }
}
