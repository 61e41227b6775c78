use crate::geometry::math::{Mat3, Mat4, NormalizeSafe, Vec3, Vec4};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
pub struct TransformFactory;

impl TransformFactory {
    /// 绕任意轴旋转（Rodrigues公式），`axis` 需为单位向量
    pub fn rotation(axis: &Vec3, angle_rad: f32) -> Mat4 {
        let (s, c) = angle_rad.sin_cos();
        let c2 = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Mat4::new(
            x * x * c2 + c,
            y * x * c2 - z * s,
            z * x * c2 + y * s,
            0.0,
            x * y * c2 + z * s,
            y * y * c2 + c,
            z * y * c2 - x * s,
            0.0,
            x * z * c2 - y * s,
            y * z * c2 + x * s,
            z * z * c2 + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    pub fn rotation_x(angle_rad: f32) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
    }

    pub fn rotation_y(angle_rad: f32) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
    }

    pub fn rotation_z(angle_rad: f32) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// 欧拉角旋转（弧度），组合顺序为 Rz * Ry * Rx
    pub fn rotation_euler(rotation: &Vec3) -> Mat4 {
        let rot = Self::rotation_z(rotation.z)
            * Self::rotation_y(rotation.y)
            * Self::rotation_x(rotation.x);
        rot.to_homogeneous()
    }

    /// 创建平移矩阵
    pub fn translation(translation: &Vec3) -> Mat4 {
        Mat4::new_translation(translation)
    }

    /// 创建非均匀缩放矩阵
    pub fn scaling(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }

    /// 平移-旋转-缩放：`[R·S | t]`
    pub fn trs(translation: &Vec3, rotation: &Vec3, scaling: &Vec3) -> Mat4 {
        let mut model = Self::rotation_euler(rotation) * Self::scaling(scaling);
        model[(0, 3)] = translation.x;
        model[(1, 3)] = translation.y;
        model[(2, 3)] = translation.z;
        model
    }

    /// 创建视图矩阵 (lookAt)
    ///
    /// 正交化顺序：`z = eye - center`，`x = up × z`，`y = z × x`，全部使用安全归一化。
    pub fn view(eye: &Vec3, center: &Vec3, up: &Vec3) -> Mat4 {
        let up = up.normalize_safe();
        let z = (eye - center).normalize_safe();
        let x = up.cross(&z).normalize_safe();
        let y = z.cross(&x).normalize_safe();

        Mat4::new(
            x.x,
            x.y,
            x.z,
            -x.dot(eye),
            y.x,
            y.y,
            y.z,
            -y.dot(eye),
            z.x,
            z.y,
            z.z,
            -z.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// 创建透视投影矩阵，输出到 [-1,1] NDC，透视除法编码在 w 分量中
    pub fn perspective(fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        assert!(far > near, "远平面必须大于近平面");

        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let z_diff = far - near;

        Mat4::new(
            f / aspect_ratio,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            -(far + near) / z_diff,
            -(2.0 * far * near) / z_diff,
            0.0,
            0.0,
            -1.0,
            0.0,
        )
    }

    /// 由视锥体六个面创建透视投影矩阵
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        assert!(far > near, "远平面必须大于近平面");

        let h_sub = right - left;
        let v_sub = top - bottom;
        let z_sub = far - near;

        Mat4::new(
            2.0 * near / h_sub,
            0.0,
            (right + left) / h_sub,
            0.0,
            0.0,
            2.0 * near / v_sub,
            (top + bottom) / v_sub,
            0.0,
            0.0,
            0.0,
            -(far + near) / z_sub,
            -(2.0 * far * near) / z_sub,
            0.0,
            0.0,
            -1.0,
            0.0,
        )
    }

    /// 创建正交投影矩阵
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let h_sub = right - left;
        let v_sub = top - bottom;
        let z_sub = far - near;

        Mat4::new(
            2.0 / h_sub,
            0.0,
            0.0,
            -(right + left) / h_sub,
            0.0,
            2.0 / v_sub,
            0.0,
            -(top + bottom) / v_sub,
            0.0,
            0.0,
            -2.0 / z_sub,
            -(far + near) / z_sub,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }
}

/// 帧缓冲中的活动矩形区域（像素单位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 将NDC坐标映射为屏幕像素坐标
    ///
    /// `raw_depth` 为真时 z 原样保留，否则从 [-1,1] 映射到 [0,1]。w 分量原样传递。
    pub fn ndc_to_screen(&self, ndc: &Vec4, raw_depth: bool) -> Vec4 {
        Vec4::new(
            self.width as f32 / 2.0 * (ndc.x + 1.0) + self.x as f32,
            self.height as f32 / 2.0 * (ndc.y + 1.0) + self.y as f32,
            if raw_depth { ndc.z } else { 0.5 * ndc.z + 0.5 },
            ndc.w,
        )
    }
}

/// 将物体空间位置变换到屏幕空间
///
/// 返回 `(screen_x, screen_y, depth, 1/w_clip)`。w 为零时 `1/w` 为无穷大，
/// 该三角形在光栅化阶段会因坐标非有限而被跳过。
pub fn object_to_screen(position: &Vec3, mvp: &Mat4, viewport: &Viewport) -> Vec4 {
    let clip = mvp * position.push(1.0);
    let inv_w = 1.0 / clip.w;
    let ndc = Vec4::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w, inv_w);
    viewport.ndc_to_screen(&ndc, false)
}
