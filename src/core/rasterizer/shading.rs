use crate::geometry::math::Vec3;
use crate::material_system::color::Color;
use crate::material_system::light::Light;
use crate::material_system::material::Material;

/// 依次用每个启用光源的贡献乘以当前颜色
///
/// 多个光源的效果是相乘而不是相加：两个半亮度的光源会让颜色更暗。
pub fn apply_lights(
    color: Color,
    frag_pos: &Vec3,
    eye_pos: &Vec3,
    normal: &Vec3,
    material: &Material,
    lights: &[Light],
) -> Color {
    lights
        .iter()
        .filter(|light| light.enabled)
        .fold(color, |acc, light| {
            acc.component_mul(&light.contribution(frag_pos, eye_pos, normal, material))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::{rgba, splat};

    fn ambient_only(level: f32) -> Light {
        Light {
            enabled: true,
            ambient: splat(level),
            diffuse: splat(0.0),
            specular: splat(0.0),
            ..Light::new(Vec3::zeros())
        }
    }

    #[test]
    fn disabled_lights_leave_color_untouched() {
        let color = rgba(0.3, 0.6, 0.9, 1.0);
        let mut light = ambient_only(0.5);
        light.enabled = false;
        let lit = apply_lights(
            color,
            &Vec3::zeros(),
            &Vec3::z(),
            &Vec3::z(),
            &Material::default(),
            &[light],
        );
        assert_eq!(lit, color);
    }

    #[test]
    fn lights_combine_multiplicatively() {
        let color = splat(1.0);
        let lights = [ambient_only(0.5), ambient_only(0.5)];
        let lit = apply_lights(
            color,
            &Vec3::zeros(),
            &Vec3::z(),
            &Vec3::z(),
            &Material::default(),
            &lights,
        );
        assert!((lit - splat(0.25)).norm() < 1e-6);
    }
}
