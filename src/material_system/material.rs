use crate::material_system::color::{Color, splat};

/// 固定功能材质：环境光、漫反射、镜面反射系数与高光指数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: splat(1.0),
            diffuse: splat(1.0),
            specular: splat(1.0),
            shininess: 1.0,
        }
    }
}

impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}
