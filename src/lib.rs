//! 固定功能软件渲染管线
//!
//! 将物体空间三角形列表经过变换、光栅化、深度/模板测试、逐像素光照、
//! 纹理采样与混合，写入浮点颜色缓冲区。显示与文件输出在 `io` 和 `ui` 中实现。

pub mod core;
pub mod geometry;
pub mod io;
pub mod material_system;
pub mod scene;
pub mod ui;

pub use crate::core::blending::{BlendEquation, BlendOp};
pub use crate::core::renderer::{FramePresenter, Renderer, TextureId};
pub use crate::core::stencil::StencilOp;
pub use crate::core::vertex::Vertex;
pub use crate::material_system::light::{Light, MAX_LIGHTS};
pub use crate::material_system::material::Material;
