use crate::core::renderer::Renderer;
use crate::io::error::{Error, Result};
use crate::scene::{FrameStats, Scene};
use egui::{Color32, RichText, Vec2};
use std::path::PathBuf;

use super::core::CoreMethods;
use super::widgets::WidgetMethods;

/// 帧缓冲显示的最大整数放大倍数
pub const MAX_FRAMEBUFFER_SCALE: u32 = 4;

/// GUI应用状态
pub struct ViewerApp {
    // ===== 渲染状态 =====
    pub renderer: Renderer,
    pub scene: Scene,
    pub last_stats: FrameStats,

    // ===== 界面状态 =====
    /// 渲染结果纹理句柄
    pub rendered_image: Option<egui::TextureHandle>,
    /// 帧缓冲显示放大倍数，1 到 4
    pub framebuffer_scale: u32,
    /// 参数变化后需要重新渲染
    pub needs_render: bool,
    /// 为真时参数变化不会自动触发渲染，只响应「Re-render」
    pub stopped: bool,
    pub status_message: String,
    /// 截图输出目录
    pub output_dir: PathBuf,
}

impl ViewerApp {
    pub fn new(
        renderer: Renderer,
        scene: Scene,
        output_dir: PathBuf,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        Self {
            renderer,
            scene,
            last_stats: FrameStats::default(),
            rendered_image: None,
            framebuffer_scale: 1,
            needs_render: true,
            stopped: false,
            status_message: "Ready".to_string(),
            output_dir,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("softpipe");
                ui.separator();
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} triangles, {:.2?}",
                            self.last_stats.triangles_rendered, self.last_stats.elapsed
                        ))
                        .color(Color32::LIGHT_GREEN),
                    );
                });
            });
        });

        egui::SidePanel::left("left_panel")
            .min_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_side_panel(ctx, ui);
            });

        // 中央面板 - 按整数倍数显示帧缓冲
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                if let Some(texture) = &self.rendered_image {
                    let scale = self.framebuffer_scale as f32;
                    let size = Vec2::new(
                        self.renderer.width() as f32 * scale,
                        self.renderer.height() as f32 * scale,
                    );
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                } else {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.label(RichText::new("No frame rendered").size(24.0).color(Color32::GRAY));
                    });
                }
            });
        });

        CoreMethods::render_if_needed(self, ctx);
    }
}

/// 启动GUI应用
pub fn start_gui(renderer: Renderer, scene: Scene, output_dir: PathBuf) -> Result<()> {
    let width = renderer.width() as f32 + 360.0;
    let height = (renderer.height() as f32 + 80.0).max(600.0);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "softpipe",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(renderer, scene, output_dir, cc)))),
    )
    .map_err(|e| Error::Gui(e.to_string()))
}
