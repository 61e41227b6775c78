use crate::io::config_loader::{SceneConfig, TomlConfigLoader};
use crate::io::error::Result;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

/// 示例配置写出的位置
pub const EXAMPLE_CONFIG_PATH: &str = "example_scene.toml";

/// 命令行参数 - 场景配置文件与输出控制
#[derive(Parser, Debug)]
#[command(name = "softpipe")]
#[command(about = "TOML驱动的固定功能软件渲染管线")]
pub struct Cli {
    /// 场景配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 无头模式：渲染一帧并保存为PNG，不启动GUI
    #[arg(long)]
    pub headless: bool,

    /// 输出图像路径（无头模式）或截图目录（GUI模式取其所在目录）
    #[arg(short, long, value_name = "PNG", default_value = "output/render.png")]
    pub output: PathBuf,

    /// 同时保存深度图
    #[arg(long)]
    pub save_depth: bool,

    /// 写出示例配置并加载它
    #[arg(long)]
    pub use_example_config: bool,
}

impl Cli {
    /// 按参数加载场景配置，返回配置和相对路径的基准目录
    pub fn load_config(&self) -> Result<(SceneConfig, PathBuf)> {
        if self.use_example_config {
            TomlConfigLoader::create_example_config(EXAMPLE_CONFIG_PATH)?;
            info!("已创建示例配置: {}", EXAMPLE_CONFIG_PATH);
            let config = TomlConfigLoader::load_from_file(EXAMPLE_CONFIG_PATH)?;
            return Ok((config, PathBuf::from(".")));
        }

        match &self.config {
            Some(path) => {
                info!("加载配置文件: {:?}", path);
                let config = TomlConfigLoader::load_from_file(path)?;
                let base_dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((config, base_dir))
            }
            None => {
                info!("未指定配置文件，使用示例场景");
                Ok((SceneConfig::example(), PathBuf::from(".")))
            }
        }
    }

    /// GUI 截图目录
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
