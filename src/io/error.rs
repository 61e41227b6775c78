use std::path::PathBuf;
use thiserror::Error;

/// 配置、资源加载与输出过程中的错误
#[derive(Debug, Error)]
pub enum Error {
    #[error("文件读写失败 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析TOML失败: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("序列化TOML失败: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("加载 OBJ 失败 {path:?}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("图像处理失败 {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("配置错误: {0}")]
    Config(String),

    #[error("GUI 启动失败: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}
