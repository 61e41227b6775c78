use crate::core::renderer::{Renderer, TextureId};
use crate::io::error::{Error, Result};
use crate::material_system::texture::TextureFiltering;
use log::info;
use std::path::Path;

/// 解码后的 RGBA8 图像
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

/// 读取并解码图像文件，统一转换为 RGBA8
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| Error::image(path, e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width: width as usize,
        height: height as usize,
        bytes: rgba.into_raw(),
    })
}

/// 加载图像并注册到渲染器的纹理表
pub fn load_texture<P: AsRef<Path>>(
    renderer: &mut Renderer,
    path: P,
    filtering: Option<TextureFiltering>,
) -> Result<TextureId> {
    let path = path.as_ref();
    let decoded = decode_image(path)?;
    let id = renderer.add_texture(&decoded.bytes, decoded.width, decoded.height, 4);

    if let Some(filtering) = filtering {
        renderer.texture_mut(id).set_filtering(filtering);
    }

    info!(
        "纹理加载完成 {:?}: {}x{}，句柄 {}",
        path, decoded.width, decoded.height, id.0
    );
    Ok(id)
}
