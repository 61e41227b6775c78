use crate::material_system::color::{Color, color_to_rgba8};

/// 帧缓冲区实现，存储渲染结果
///
/// 颜色与深度均为按 `y * width + x` 索引的稠密数组，构造后尺寸不变。
pub struct FrameBuffer {
    width: usize,
    height: usize,
    /// 存储正深度值，数值越小表示越近
    depth_buffer: Vec<f32>,
    /// 浮点RGBA颜色，不做截断
    color_buffer: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;

        FrameBuffer {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; num_pixels],
            color_buffer: vec![Color::zeros(); num_pixels],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "像素坐标越界: ({}, {})，缓冲区尺寸 {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// 用清屏颜色填充颜色缓冲区，深度重置为无穷远
    pub fn clear(&mut self, clear_color: &Color) {
        self.color_buffer.fill(*clear_color);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.color_buffer[self.index(x, y)]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let index = self.index(x, y);
        self.color_buffer[index] = color;
    }

    #[inline]
    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.depth_buffer[self.index(x, y)]
    }

    /// 严格小于当前深度时写入并返回 true
    #[inline]
    pub fn test_and_set_depth(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let index = self.index(x, y);
        if depth < self.depth_buffer[index] {
            self.depth_buffer[index] = depth;
            true
        } else {
            false
        }
    }

    /// 原始浮点颜色数据
    pub fn colors(&self) -> &[Color] {
        &self.color_buffer
    }

    /// 原始深度数据
    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// 获取颜色缓冲区的 RGBA8 字节数据
    pub fn get_color_buffer_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(color_to_rgba8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::rgba;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(1, 2, rgba(1.0, 0.0, 0.0, 1.0));
        assert!(fb.test_and_set_depth(1, 2, 0.3));

        fb.clear(&rgba(0.1, 0.2, 0.3, 1.0));
        assert_eq!(fb.pixel(1, 2), rgba(0.1, 0.2, 0.3, 1.0));
        assert_eq!(fb.depth(1, 2), f32::INFINITY);
    }

    #[test]
    fn depth_test_is_strict() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.test_and_set_depth(0, 0, 0.5));
        assert!(!fb.test_and_set_depth(0, 0, 0.5));
        assert!(!fb.test_and_set_depth(0, 0, 0.7));
        assert!(fb.test_and_set_depth(0, 0, 0.2));
        assert_eq!(fb.depth(0, 0), 0.2);
    }

    #[test]
    fn bytes_are_row_major_rgba() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.set_pixel(1, 0, rgba(1.0, 1.0, 1.0, 1.0));
        assert_eq!(fb.get_color_buffer_bytes(), vec![0, 0, 0, 0, 255, 255, 255, 255]);
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let fb = FrameBuffer::new(2, 2);
        fb.pixel(2, 0);
    }
}
