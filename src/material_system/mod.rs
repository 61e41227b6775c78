// material_system/mod.rs
// 颜色、材质、光源与纹理
pub mod color;
pub mod light;
pub mod material;
pub mod texture;
