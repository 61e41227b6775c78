use crate::geometry::math::{NormalizeSafe, Vec3, reflect};
use crate::material_system::color::{Color, rgba, splat};
use crate::material_system::material::Material;

/// 管线持有的光源槽位数量
pub const MAX_LIGHTS: usize = 8;

/// 带可选衰减的点光源
///
/// 位置与片元位置处于同一空间（屏幕空间 x、y 加深度）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub enabled: bool,
    pub position: Vec3,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub specular_strength: f32,
    /// 一次衰减系数，<= 0 表示不使用
    pub linear_attenuation: f32,
    /// 二次衰减系数，<= 0 表示不使用
    pub quadratic_attenuation: f32,
    pub radius: f32,
}

impl Light {
    /// 白光、无衰减的光源，默认关闭
    pub fn new(position: Vec3) -> Self {
        Self {
            enabled: false,
            position,
            ambient: splat(1.0),
            diffuse: splat(1.0),
            specular: splat(1.0),
            specular_strength: 0.5,
            linear_attenuation: 1.0,
            quadratic_attenuation: 0.0,
            radius: f32::INFINITY,
        }
    }

    /// 渲染器初始化时每个槽位的默认配置
    pub fn slot_default(width: usize, height: usize) -> Self {
        Self {
            enabled: false,
            position: Vec3::new(width as f32 / 2.0, height as f32 / 4.0, 1.5),
            ambient: rgba(0.0, 0.0, 0.0, 1.0),
            diffuse: rgba(0.0, 0.0, 0.0, 1.0),
            specular: splat(1.0),
            specular_strength: 0.5,
            linear_attenuation: 0.2,
            quadratic_attenuation: 0.0,
            radius: 200.0,
        }
    }

    /// 漫反射项：`diffuse * material.diffuse * max(n·l, 0) * attenuation`
    pub fn compute_diffuse(
        &self,
        light_dir: &Vec3,
        frag_pos: &Vec3,
        normal: &Vec3,
        material: &Material,
    ) -> Color {
        let diff = normal.dot(light_dir).max(0.0);
        let intensity = diff * self.compute_attenuation(frag_pos);
        self.diffuse.component_mul(&material.diffuse) * intensity
    }

    /// Phong 镜面反射项，视线方向为 `eye_pos - frag_pos`
    pub fn compute_specular(
        &self,
        light_dir: &Vec3,
        frag_pos: &Vec3,
        eye_pos: &Vec3,
        normal: &Vec3,
        material: &Material,
    ) -> Color {
        let view_dir = (eye_pos - frag_pos).normalize_safe();
        let reflect_dir = reflect(&-light_dir, normal);

        let spec = view_dir.dot(&reflect_dir).max(0.0).powf(material.shininess);
        let intensity = spec * self.specular_strength * self.compute_attenuation(frag_pos);
        self.specular.component_mul(&material.specular) * intensity
    }

    /// 单个光源在片元处的总贡献：环境光 + 漫反射 + 镜面反射
    pub fn contribution(
        &self,
        frag_pos: &Vec3,
        eye_pos: &Vec3,
        normal: &Vec3,
        material: &Material,
    ) -> Color {
        let light_dir = (self.position - frag_pos).normalize_safe();

        let ambient = self.ambient.component_mul(&material.ambient);
        let diffuse = self.compute_diffuse(&light_dir, frag_pos, normal, material);
        let specular = self.compute_specular(&light_dir, frag_pos, eye_pos, normal, material);

        ambient + diffuse + specular
    }

    /// 距离衰减，按系数符号选择公式：
    /// 二次 <= 0 只用一次项；一次 <= 0 只用二次项；否则两者相乘。
    pub fn compute_attenuation(&self, frag_pos: &Vec3) -> f32 {
        // 半径无穷大时各公式的极限均为 1
        if self.radius.is_infinite() {
            return 1.0;
        }

        if self.quadratic_attenuation <= 0.0 {
            return self.linear_falloff(frag_pos);
        }
        if self.linear_attenuation <= 0.0 {
            return self.quadratic_falloff(frag_pos);
        }
        self.linear_falloff(frag_pos) * self.quadratic_falloff(frag_pos)
    }

    fn linear_falloff(&self, frag_pos: &Vec3) -> f32 {
        let distance = (frag_pos - self.position).norm();
        safe_ratio(self.radius, self.radius + self.linear_attenuation * distance)
    }

    fn quadratic_falloff(&self, frag_pos: &Vec3) -> f32 {
        let distance_sq = (frag_pos - self.position).norm_squared();
        let radius_sq = self.radius * self.radius;
        safe_ratio(
            radius_sq,
            radius_sq + self.quadratic_attenuation * distance_sq,
        )
    }
}

/// 0/0（片元恰好位于零半径光源上）按不衰减处理
#[inline]
fn safe_ratio(num: f32, den: f32) -> f32 {
    if den == 0.0 { 1.0 } else { num / den }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn lit(linear: f32, quadratic: f32) -> Light {
        Light {
            enabled: true,
            linear_attenuation: linear,
            quadratic_attenuation: quadratic,
            radius: 10.0,
            ..Light::new(Vec3::zeros())
        }
    }

    #[test]
    fn linear_only_when_quadratic_disabled() {
        let light = lit(0.5, 0.0);
        let a = light.compute_attenuation(&Vec3::new(4.0, 0.0, 0.0));
        assert!((a - 10.0 / (10.0 + 0.5 * 4.0)).abs() < EPS);
    }

    #[test]
    fn quadratic_only_when_linear_disabled() {
        let light = lit(0.0, 0.25);
        let a = light.compute_attenuation(&Vec3::new(0.0, 4.0, 0.0));
        assert!((a - 100.0 / (100.0 + 0.25 * 16.0)).abs() < EPS);
    }

    #[test]
    fn both_falloffs_multiply() {
        let light = lit(0.5, 0.25);
        let a = light.compute_attenuation(&Vec3::new(0.0, 0.0, 4.0));
        let expected = (10.0 / 12.0) * (100.0 / 104.0);
        assert!((a - expected).abs() < EPS);
    }

    #[test]
    fn no_attenuation_coefficients_means_full_intensity() {
        let light = lit(0.0, 0.0);
        assert!((light.compute_attenuation(&Vec3::new(30.0, 0.0, 0.0)) - 1.0).abs() < EPS);
    }

    #[test]
    fn infinite_radius_does_not_produce_nan() {
        let light = Light::new(Vec3::zeros());
        let a = light.compute_attenuation(&Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(a, 1.0);
    }

    #[test]
    fn zero_radius_at_light_position_is_finite() {
        let light = Light {
            radius: 0.0,
            ..lit(1.0, 0.0)
        };
        assert!(light.compute_attenuation(&Vec3::zeros()).is_finite());
    }

    #[test]
    fn diffuse_ignores_back_lighting() {
        let light = lit(0.0, 0.0);
        let material = Material::default();
        let normal = Vec3::z();
        let front = light.compute_diffuse(&Vec3::z(), &Vec3::zeros(), &normal, &material);
        let back = light.compute_diffuse(&-Vec3::z(), &Vec3::zeros(), &normal, &material);
        assert!((front - splat(1.0)).norm() < EPS);
        assert_eq!(back, splat(0.0));
    }

    #[test]
    fn specular_peaks_along_reflection() {
        let light = lit(0.0, 0.0);
        let material = Material {
            shininess: 32.0,
            ..Material::default()
        };
        let normal = Vec3::z();
        let frag = Vec3::zeros();
        // 光线与视线都沿法线方向时，反射方向正对视点
        let spec = light.compute_specular(&Vec3::z(), &frag, &Vec3::new(0.0, 0.0, 5.0), &normal, &material);
        assert!((spec.x - 0.5).abs() < EPS);

        let off_axis =
            light.compute_specular(&Vec3::z(), &frag, &Vec3::new(5.0, 0.0, 1.0), &normal, &material);
        assert!(off_axis.x < spec.x);
    }
}
