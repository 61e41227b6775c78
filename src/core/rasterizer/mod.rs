//! # 三角形光栅化模块
//!
//! 包围盒遍历、重心坐标覆盖测试、透视校正插值与逐像素着色

pub mod pixel_processor;
pub mod shading;
pub mod triangle_data;

// 重新导出主要类型和函数
pub use pixel_processor::{RasterTarget, rasterize_triangle};
pub use triangle_data::{BoundingBox, ScreenVertex, TriangleData};
