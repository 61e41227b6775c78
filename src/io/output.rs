use crate::core::frame_buffer::FrameBuffer;
use crate::core::renderer::FramePresenter;
use crate::io::error::{Error, Result};
use image::ColorType;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// 保存RGBA图像数据到PNG文件
pub fn save_image<P: AsRef<Path>>(path: P, data: &[u8], width: u32, height: u32) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    image::save_buffer(path, data, width, height, ColorType::Rgba8)
        .map_err(|e| Error::image(path, e))?;
    info!("图像已保存到 {:?}", path);
    Ok(())
}

/// 按行逆序排列 RGBA8 数据
///
/// 缓冲区第 0 行位于屏幕底部，图像文件与界面纹理的第 0 行位于顶部。
pub fn flip_rows(data: &[u8], width: usize) -> Vec<u8> {
    let stride = width * 4;
    if stride == 0 {
        return data.to_vec();
    }
    data.chunks_exact(stride).rev().flatten().copied().collect()
}

/// 将有限深度值线性归一化到 [0,1]，无穷远映射为 1
pub fn normalize_depth(depth_buffer: &[f32]) -> Vec<f32> {
    let (min_depth, max_depth) = depth_buffer
        .iter()
        .filter(|d| d.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });

    if !min_depth.is_finite() {
        warn!("深度缓冲区中没有有限深度值");
        return vec![1.0; depth_buffer.len()];
    }

    let range = max_depth - min_depth;
    let inv_range = if range > 1e-6 { 1.0 / range } else { 0.0 };

    depth_buffer
        .iter()
        .map(|&depth| {
            if depth.is_finite() {
                ((depth - min_depth) * inv_range).clamp(0.0, 1.0)
            } else {
                1.0
            }
        })
        .collect()
}

/// 深度缓冲区的灰度可视化，越近越亮，RGBA8
pub fn depth_to_grayscale(depth_buffer: &[f32]) -> Vec<u8> {
    normalize_depth(depth_buffer)
        .into_iter()
        .flat_map(|d| {
            let v = ((1.0 - d) * 255.0).round() as u8;
            [v, v, v, 255]
        })
        .collect()
}

/// 将帧写入 PNG 文件，可选同时输出深度图
pub struct PngPresenter {
    pub color_path: PathBuf,
    pub depth_path: Option<PathBuf>,
}

impl PngPresenter {
    pub fn new<P: Into<PathBuf>>(color_path: P) -> Self {
        Self {
            color_path: color_path.into(),
            depth_path: None,
        }
    }

    /// 深度图路径为颜色图路径加 `_depth` 后缀
    pub fn with_depth(mut self) -> Self {
        let stem = self
            .color_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "render".to_string());
        self.depth_path = Some(self.color_path.with_file_name(format!("{}_depth.png", stem)));
        self
    }
}

impl FramePresenter for PngPresenter {
    type Error = Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        let width = frame.width() as u32;
        let height = frame.height() as u32;

        let color = flip_rows(&frame.get_color_buffer_bytes(), frame.width());
        save_image(&self.color_path, &color, width, height)?;

        if let Some(depth_path) = &self.depth_path {
            let depth = flip_rows(&depth_to_grayscale(frame.depths()), frame.width());
            save_image(depth_path, &depth, width, height)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::rgba;

    #[test]
    fn depth_normalization_maps_range_and_background() {
        let normalized = normalize_depth(&[0.25, 0.75, f32::INFINITY, 0.5]);
        assert_eq!(normalized, vec![0.0, 1.0, 1.0, 0.5]);
    }

    #[test]
    fn empty_depth_is_all_far() {
        assert_eq!(normalize_depth(&[f32::INFINITY; 3]), vec![1.0; 3]);
    }

    #[test]
    fn grayscale_puts_near_pixels_bright() {
        let bytes = depth_to_grayscale(&[0.1, f32::INFINITY]);
        assert_eq!(&bytes[..4], &[255, 255, 255, 255]);
        assert_eq!(&bytes[4..], &[0, 0, 0, 255]);
    }

    #[test]
    fn rows_are_written_top_down() {
        let bytes = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
        assert_eq!(
            flip_rows(&bytes, 2),
            vec![3, 3, 3, 3, 4, 4, 4, 4, 1, 1, 1, 1, 2, 2, 2, 2]
        );
    }

    #[test]
    fn png_presenter_writes_color_and_depth() {
        let dir = std::env::temp_dir().join("softpipe_output_test");
        let color_path = dir.join("frame.png");

        let mut frame = FrameBuffer::new(3, 2);
        frame.clear(&rgba(1.0, 0.0, 0.0, 1.0));
        frame.set_pixel(0, 0, rgba(0.0, 1.0, 0.0, 1.0));

        let mut presenter = PngPresenter::new(&color_path).with_depth();
        presenter.present(&frame).unwrap();

        let img = image::open(&color_path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
        // 缓冲区左下角在图像中位于最后一行
        assert_eq!(img.get_pixel(0, 1).0, [0, 255, 0, 255]);
        assert!(dir.join("frame_depth.png").exists());
    }
}
