// core/mod.rs
// 渲染管线：缓冲区、光栅化与逐像素测试
pub mod blending;
pub mod frame_buffer;
pub mod rasterizer;
pub mod renderer;
pub mod stencil;
pub mod vertex;
