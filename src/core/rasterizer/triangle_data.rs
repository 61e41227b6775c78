use crate::geometry::math::{Vec2, Vec3, Vec4};
use crate::geometry::transform::Viewport;
use crate::material_system::color::Color;
use crate::material_system::light::Light;
use crate::material_system::material::Material;
use crate::material_system::texture::Texture;

/// 变换后的顶点：屏幕坐标 `(x, y, depth, 1/w)` 加上需插值的属性
#[derive(Debug, Clone, Copy)]
pub struct ScreenVertex {
    pub screen: Vec4,
    pub color: Color,
    pub uv: Vec2,
}

impl ScreenVertex {
    #[inline]
    pub fn pix(&self) -> Vec2 {
        Vec2::new(self.screen.x, self.screen.y)
    }
}

/// 三角形光栅化数据
pub struct TriangleData<'a> {
    pub vertices: [ScreenVertex; 3],
    /// 由模型旋转块变换后的平面法线
    pub normal: Vec3,
    pub texture: Option<&'a Texture>,
    pub material: &'a Material,
    pub lights: &'a [Light],
    /// 相机的屏幕空间位置，作为镜面反射的视点
    pub eye: Vec3,
    pub perspective_correct_depth: bool,
}

impl TriangleData<'_> {
    /// 屏幕坐标与 1/w 均为有限值
    pub fn is_valid(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.screen.iter().all(|c| c.is_finite()))
    }

    #[inline]
    pub fn inv_w(&self) -> Vec3 {
        Vec3::new(
            self.vertices[0].screen.w,
            self.vertices[1].screen.w,
            self.vertices[2].screen.w,
        )
    }

    #[inline]
    pub fn depths(&self) -> Vec3 {
        Vec3::new(
            self.vertices[0].screen.z,
            self.vertices[1].screen.z,
            self.vertices[2].screen.z,
        )
    }
}

/// 屏幕空间包围盒，半开区间 `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// 三角形包围盒裁剪到视口（同时不超出缓冲区）
    ///
    /// 遍历 `min <= x < max_float` 的整数像素，与浮点上界比较等价于对上界取整。
    pub fn from_triangle(
        triangle: &TriangleData,
        viewport: &Viewport,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let [v0, v1, v2] = triangle.vertices.map(|v| v.pix());

        let vx0 = viewport.x as f32;
        let vy0 = viewport.y as f32;
        let vx1 = vx0 + viewport.width as f32;
        let vy1 = vy0 + viewport.height as f32;

        let min_x = v0.x.min(v1.x).min(v2.x).clamp(vx0, vx1).max(0.0);
        let max_x = v0.x.max(v1.x).max(v2.x).clamp(vx0, vx1).min(width as f32);
        let min_y = v0.y.min(v1.y).min(v2.y).clamp(vy0, vy1).max(0.0);
        let max_y = v0.y.max(v1.y).max(v2.y).clamp(vy0, vy1).min(height as f32);

        // 下界向零截断；上界向上取整，使小于浮点上界的最后一列/行仍被遍历
        let bbox = Self {
            min_x: min_x as usize,
            min_y: min_y as usize,
            max_x: max_x.ceil() as usize,
            max_y: max_y.ceil() as usize,
        };

        if bbox.max_x <= bbox.min_x || bbox.max_y <= bbox.min_y {
            None
        } else {
            Some(bbox)
        }
    }

    pub fn for_each_pixel<F>(&self, mut callback: F)
    where
        F: FnMut(usize, usize),
    {
        for y in self.min_y..self.max_y {
            for x in self.min_x..self.max_x {
                callback(x, y);
            }
        }
    }
}
