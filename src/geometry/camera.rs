use crate::geometry::math::{Mat4, Vec3};
use crate::geometry::transform::TransformFactory;

/// 相机参数：眼睛位置、观察点、上方向、垂直视场角与深度范围
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// 垂直视场角（弧度）
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -1.5, 3.5),
            center: Vec3::zeros(),
            up: Vec3::y(),
            fov_y: std::f32::consts::FRAC_PI_2,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, center: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            center,
            fov_y,
            near,
            far,
            ..Default::default()
        }
    }

    /// 视图矩阵（世界坐标 -> 相机坐标）
    pub fn view_matrix(&self) -> Mat4 {
        TransformFactory::view(&self.position, &self.center, &self.up)
    }

    /// 投影矩阵（相机坐标 -> 裁剪坐标）
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        TransformFactory::perspective(self.fov_y, aspect_ratio, self.near, self.far)
    }

    /// 围绕观察点绕Y轴旋转相机
    pub fn orbit_y(&mut self, angle_rad: f32) {
        let offset = self.position - self.center;
        let rotated = TransformFactory::rotation(&Vec3::y(), angle_rad).transform_vector(&offset);
        self.position = self.center + rotated;
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_y = fov_degrees.to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_distance_to_center() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.0, 4.0), Vec3::zeros(), 1.0, 0.1, 50.0);
        let before = (camera.position - camera.center).norm();
        camera.orbit_y(1.3);
        let after = (camera.position - camera.center).norm();
        assert!((before - after).abs() < 1e-4);
        assert!((camera.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::zeros(), 1.0, 0.1, 50.0);
        let center = camera.view_matrix() * Vec3::zeros().push(1.0);
        assert!((center.z + 3.0).abs() < 1e-5);
    }
}
