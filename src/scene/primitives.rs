use crate::core::vertex::Vertex;
use crate::geometry::math::{Vec2, Vec3};
use crate::material_system::color::splat;
use serde::{Deserialize, Serialize};

/// 内置网格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Triangle,
    Quad,
    Cube,
}

impl Primitive {
    pub fn vertices(self) -> Vec<Vertex> {
        match self {
            Primitive::Triangle => triangle(),
            Primitive::Quad => quad(),
            Primitive::Cube => cube(),
        }
    }
}

fn vertex(position: Vec3, normal: Vec3, uv: Vec2) -> Vertex {
    Vertex::new(position, splat(1.0), normal, uv)
}

/// z = 0 平面上朝 +z 的单个三角形
pub fn triangle() -> Vec<Vertex> {
    let n = Vec3::z();
    vec![
        vertex(Vec3::new(-0.5, -0.5, 0.0), n, Vec2::new(0.0, 0.0)),
        vertex(Vec3::new(0.5, -0.5, 0.0), n, Vec2::new(1.0, 0.0)),
        vertex(Vec3::new(0.0, 0.5, 0.0), n, Vec2::new(0.5, 1.0)),
    ]
}

/// z = 0 平面上朝 +z 的单位正方形，纹理坐标覆盖整张纹理
pub fn quad() -> Vec<Vertex> {
    face(
        [
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ],
        Vec3::z(),
    )
}

/// 以原点为中心、边长为 1 的立方体，法线朝外
pub fn cube() -> Vec<Vertex> {
    let h = 0.5;
    let p = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);

    let faces = [
        // +z
        ([p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)], Vec3::z()),
        // -z
        ([p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0)], -Vec3::z()),
        // +x
        ([p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0)], Vec3::x()),
        // -x
        ([p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)], -Vec3::x()),
        // +y
        ([p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0)], Vec3::y()),
        // -y
        ([p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)], -Vec3::y()),
    ];

    faces
        .into_iter()
        .flat_map(|(corners, normal)| face(corners, normal))
        .collect()
}

/// 逆时针四个角点拆成两个三角形
fn face(corners: [Vec3; 4], normal: Vec3) -> Vec<Vertex> {
    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|i| vertex(corners[i], normal, uvs[i]))
        .collect()
}
