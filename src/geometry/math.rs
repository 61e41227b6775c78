//! 管线使用的几何数学约定
//!
//! 向量与矩阵直接使用 nalgebra 的值类型。矩阵乘法为标准的“行·列”乘积，
//! 顶点变换写作 `M * v`，因此 `P * V * M` 先作用模型矩阵。

use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;
pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;

/// 安全归一化：零长度向量返回零向量而不是 NaN
pub trait NormalizeSafe {
    fn normalize_safe(&self) -> Self;
}

impl NormalizeSafe for Vec2 {
    fn normalize_safe(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 { Vec2::zeros() } else { self / norm }
    }
}

impl NormalizeSafe for Vec3 {
    fn normalize_safe(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 { Vec3::zeros() } else { self / norm }
    }
}

impl NormalizeSafe for Vec4 {
    fn normalize_safe(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 { Vec4::zeros() } else { self / norm }
    }
}

/// 以法线 `normal` 反射入射向量 `v`
#[inline]
pub fn reflect(v: &Vec3, normal: &Vec3) -> Vec3 {
    v - normal * (2.0 * v.dot(normal))
}

/// 取4x4矩阵左上角的3x3块（旋转/缩放部分）
pub fn upper_left_3x3(m: &Mat4) -> Mat3 {
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

/// 齐次坐标的前三个分量
#[inline]
pub fn xyz(v: &Vec4) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
