// io/mod.rs
// 配置、资源加载与输出
pub mod cli;
pub mod config_loader;
pub mod error;
pub mod obj_loader;
pub mod output;
pub mod texture_loader;
