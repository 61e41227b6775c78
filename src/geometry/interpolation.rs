use crate::geometry::math::{Vec2, Vec3};

/// 计算点 `p` 相对二维三角形 (v0, v1, v2) 的重心坐标 (w0, w1, w2)
///
/// 三角形面积为零时返回 None。
pub fn barycentric_weights(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<Vec3> {
    let den = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if den == 0.0 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / den;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / den;
    let w2 = 1.0 - w0 - w1;

    Some(Vec3::new(w0, w1, w2))
}

/// 没有严格为负的权重即视为覆盖，边上的像素（权重为 0）保留
#[inline(always)]
pub fn is_inside_triangle(weights: &Vec3) -> bool {
    !(weights.x < 0.0 || weights.y < 0.0 || weights.z < 0.0)
}

/// 用各顶点的 1/w 对屏幕空间权重做透视校正
pub fn perspective_weights(weights: &Vec3, inv_w: &Vec3) -> Vec3 {
    let scaled = weights.component_mul(inv_w);
    let sum = scaled.x + scaled.y + scaled.z;
    scaled * (1.0 / sum)
}

/// 按权重混合三个顶点属性
#[inline]
pub fn interpolate<T>(weights: &Vec3, a: T, b: T, c: T) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    a * weights.x + b * weights.y + c * weights.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::math::Vec4;

    const EPS: f32 = 1e-5;

    fn triangle() -> (Vec2, Vec2, Vec2) {
        (
            Vec2::new(10.0, 10.0),
            Vec2::new(50.0, 10.0),
            Vec2::new(10.0, 50.0),
        )
    }

    #[test]
    fn vertices_get_unit_weights() {
        let (a, b, c) = triangle();
        let wa = barycentric_weights(a, a, b, c).unwrap();
        let wb = barycentric_weights(b, a, b, c).unwrap();
        let wc = barycentric_weights(c, a, b, c).unwrap();
        assert!((wa - Vec3::new(1.0, 0.0, 0.0)).norm() < EPS);
        assert!((wb - Vec3::new(0.0, 1.0, 0.0)).norm() < EPS);
        assert!((wc - Vec3::new(0.0, 0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn weights_sum_to_one_inside() {
        let (a, b, c) = triangle();
        for (x, y) in [(12.0, 12.0), (20.0, 30.0), (29.5, 29.5), (15.0, 40.0)] {
            let w = barycentric_weights(Vec2::new(x, y), a, b, c).unwrap();
            assert!(is_inside_triangle(&w));
            assert!((w.x + w.y + w.z - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn outside_point_has_negative_weight() {
        let (a, b, c) = triangle();
        let w = barycentric_weights(Vec2::new(40.0, 40.0), a, b, c).unwrap();
        assert!(!is_inside_triangle(&w));
    }

    #[test]
    fn hypotenuse_point_is_kept() {
        let (a, b, c) = triangle();
        let w = barycentric_weights(Vec2::new(30.0, 30.0), a, b, c).unwrap();
        assert_eq!(w.x, 0.0);
        assert!(is_inside_triangle(&w));
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 1.0);
        let c = Vec2::new(2.0, 2.0);
        assert!(barycentric_weights(Vec2::new(1.0, 0.0), a, b, c).is_none());
    }

    #[test]
    fn perspective_weights_are_normalized() {
        let w = perspective_weights(&Vec3::new(0.2, 0.3, 0.5), &Vec3::new(1.0, 0.5, 0.25));
        assert!((w.x + w.y + w.z - 1.0).abs() < EPS);
        // 较远的顶点（1/w 较小）权重被压低
        assert!(w.z < 0.5);
    }

    #[test]
    fn equal_w_leaves_weights_unchanged() {
        let raw = Vec3::new(0.1, 0.6, 0.3);
        let w = perspective_weights(&raw, &Vec3::new(0.5, 0.5, 0.5));
        assert!((w - raw).norm() < EPS);
    }

    #[test]
    fn interpolate_blends_colors() {
        let c = interpolate(
            &Vec3::new(0.5, 0.5, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
        );
        assert!((c - Vec4::new(0.5, 0.5, 0.0, 1.0)).norm() < EPS);
    }
}
