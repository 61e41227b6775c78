use crate::geometry::math::Vec4;

/// RGBA颜色，分量通常位于 [0,1]，管线内部不做截断
pub type Color = Vec4;

#[inline]
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Vec4::new(r, g, b, a)
}

/// 四个分量均为 `value` 的颜色
#[inline]
pub fn splat(value: f32) -> Color {
    Vec4::repeat(value)
}

/// 将浮点颜色转换为 RGBA8，超出 [0,1] 的分量被截断
pub fn color_to_rgba8(color: &Color) -> [u8; 4] {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(color.x), to_u8(color.y), to_u8(color.z), to_u8(color.w)]
}

/// 从 RGBA8 字节恢复浮点颜色
pub fn rgba8_to_color(bytes: [u8; 4]) -> Color {
    Vec4::new(
        bytes[0] as f32 / 255.0,
        bytes[1] as f32 / 255.0,
        bytes[2] as f32 / 255.0,
        bytes[3] as f32 / 255.0,
    )
}
