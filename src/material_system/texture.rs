use crate::geometry::math::Vec2;
use crate::material_system::color::{Color, rgba};
use serde::{Deserialize, Serialize};

/// 纹理过滤模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFiltering {
    #[default]
    Nearest,
    /// 目前与 Nearest 采样结果相同
    Linear,
}

/// 已解码的纹理：按行存储的浮点颜色网格
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<Color>,
    width: usize,
    height: usize,
    filtering: TextureFiltering,
}

impl Texture {
    /// 从交错的8位通道数据构建纹理
    ///
    /// 通道数为 1（灰度）、2（灰度+alpha）、3（RGB）或 4（RGBA）。
    /// 缺失的 alpha 视为 1。
    pub fn from_raw(bytes: &[u8], width: usize, height: usize, channels: usize) -> Self {
        assert!(
            (1..=4).contains(&channels),
            "不支持的纹理通道数: {}",
            channels
        );
        assert!(
            bytes.len() >= width * height * channels,
            "纹理数据长度不足: 需要 {} 字节，实际 {} 字节",
            width * height * channels,
            bytes.len()
        );

        let data = bytes
            .chunks_exact(channels)
            .take(width * height)
            .map(|texel| {
                let c = |i: usize| texel[i] as f32 / 255.0;
                match channels {
                    1 => rgba(c(0), c(0), c(0), 1.0),
                    2 => rgba(c(0), c(0), c(0), c(1)),
                    3 => rgba(c(0), c(1), c(2), 1.0),
                    _ => rgba(c(0), c(1), c(2), c(3)),
                }
            })
            .collect();

        Self {
            data,
            width,
            height,
            filtering: TextureFiltering::Linear,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn filtering(&self) -> TextureFiltering {
        self.filtering
    }

    pub fn set_filtering(&mut self, filtering: TextureFiltering) {
        self.filtering = filtering;
    }

    /// 按归一化坐标采样
    ///
    /// 超出 [0,1] 的坐标被截断到最后一个有效纹素，不做重复寻址。
    pub fn sample(&self, uv: &Vec2) -> Color {
        if self.data.is_empty() {
            return rgba(1.0, 1.0, 1.0, 1.0);
        }

        let tx = (uv.x * self.width as f32).clamp(0.0, (self.width - 1) as f32);
        let ty = (uv.y * self.height as f32).clamp(0.0, (self.height - 1) as f32);

        match self.filtering {
            TextureFiltering::Nearest | TextureFiltering::Linear => self.texel(tx, ty),
        }
    }

    #[inline]
    fn texel(&self, tx: f32, ty: f32) -> Color {
        let x = tx.floor() as usize;
        let y = ty.floor() as usize;
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 纹理：红 绿 / 蓝 白
    fn checker() -> Texture {
        #[rustfmt::skip]
        let bytes = [
            255, 0, 0,     0, 255, 0,
            0, 0, 255,     255, 255, 255,
        ];
        Texture::from_raw(&bytes, 2, 2, 3)
    }

    #[test]
    fn missing_alpha_defaults_to_one() {
        let tex = checker();
        assert_eq!(tex.sample(&Vec2::new(0.0, 0.0)), rgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn samples_floor_into_texels() {
        let tex = checker();
        assert_eq!(tex.sample(&Vec2::new(0.75, 0.1)), rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(tex.sample(&Vec2::new(0.2, 0.6)), rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn out_of_range_clamps_to_edge_texels() {
        let tex = checker();
        assert_eq!(tex.sample(&Vec2::new(1.0, 1.0)), rgba(1.0, 1.0, 1.0, 1.0));
        assert_eq!(tex.sample(&Vec2::new(3.5, -2.0)), rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(tex.sample(&Vec2::new(-0.5, 7.0)), rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn linear_filtering_matches_nearest() {
        let mut tex = checker();
        assert_eq!(tex.filtering(), TextureFiltering::Linear);
        let uv = Vec2::new(0.49, 0.51);
        let linear = tex.sample(&uv);
        tex.set_filtering(TextureFiltering::Nearest);
        assert_eq!(tex.sample(&uv), linear);
    }

    #[test]
    fn rgba_channels_keep_alpha() {
        let tex = Texture::from_raw(&[0, 0, 0, 51], 1, 1, 4);
        assert!((tex.sample(&Vec2::new(0.5, 0.5)).w - 0.2).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn short_buffer_is_rejected() {
        Texture::from_raw(&[0, 0, 0], 2, 2, 3);
    }
}
