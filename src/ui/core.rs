use crate::core::renderer::FramePresenter;
use crate::io::error::Result;
use crate::io::output::{PngPresenter, flip_rows};
use crate::ui::app::ViewerApp;
use egui::Context;
use log::{error, info};
use std::path::PathBuf;

/// 核心业务逻辑：渲染、结果显示、截图与错误处理
pub trait CoreMethods {
    /// 绘制一帧并更新显示纹理
    fn render(&mut self, ctx: &Context);

    /// 将颜色缓冲区上传为界面纹理
    fn display_render_result(&mut self, ctx: &Context);

    /// 参数有变化且未停止时重新渲染
    fn render_if_needed(&mut self, ctx: &Context);

    /// 保存当前帧为带时间戳的 PNG，返回文件路径
    fn take_screenshot(&mut self) -> Result<PathBuf>;

    fn set_error(&mut self, message: String);
}

impl CoreMethods for ViewerApp {
    fn render(&mut self, ctx: &Context) {
        self.last_stats = self.scene.render_frame(&mut self.renderer);
        self.display_render_result(ctx);
        self.needs_render = false;
    }

    fn display_render_result(&mut self, ctx: &Context) {
        let width = self.renderer.width();
        let height = self.renderer.height();
        let rgba_data = flip_rows(&self.renderer.frame_buffer().get_color_buffer_bytes(), width);
        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);

        match &mut self.rendered_image {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.rendered_image =
                    Some(ctx.load_texture("framebuffer", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn render_if_needed(&mut self, ctx: &Context) {
        if self.needs_render && !self.stopped {
            self.render(ctx);
        }
    }

    fn take_screenshot(&mut self) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .output_dir
            .join(format!("screenshot_{}.png", timestamp));

        PngPresenter::new(&path).present(self.renderer.frame_buffer())?;
        info!("截图已保存: {:?}", path);
        Ok(path)
    }

    fn set_error(&mut self, message: String) {
        error!("{}", message);
        self.status_message = format!("Error: {}", message);
    }
}
