use crate::geometry::math::Vec3;
use crate::material_system::color::{Color, rgba};
use egui::{Context, RichText};

use super::app::{MAX_FRAMEBUFFER_SCALE, ViewerApp};
use super::core::CoreMethods;

/// 侧边栏控件
pub trait WidgetMethods {
    /// 绘制UI的侧边栏
    fn draw_side_panel(&mut self, ctx: &Context, ui: &mut egui::Ui);

    fn draw_controls(&mut self, ctx: &Context, ui: &mut egui::Ui) -> bool;

    fn draw_objects(&mut self, ui: &mut egui::Ui) -> bool;

    fn draw_lights(&mut self, ui: &mut egui::Ui) -> bool;
}

impl WidgetMethods for ViewerApp {
    fn draw_side_panel(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let mut changed = false;

            egui::CollapsingHeader::new("Controls")
                .default_open(true)
                .show(ui, |ui| changed |= self.draw_controls(ctx, ui));

            ui.collapsing("Objects", |ui| changed |= self.draw_objects(ui));
            ui.collapsing("Lights", |ui| changed |= self.draw_lights(ui));

            if changed {
                self.needs_render = true;
            }
        });
    }

    fn draw_controls(&mut self, ctx: &Context, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.label(format!(
            "Triangles rendered: {}",
            self.last_stats.triangles_rendered
        ));

        ui.horizontal(|ui| {
            if ui.button("Re-render").clicked() {
                self.render(ctx);
            }
            ui.checkbox(&mut self.stopped, "Stop");
            if ui.button("Screenshot").clicked() {
                match self.take_screenshot() {
                    Ok(path) => self.status_message = format!("Saved {}", path.display()),
                    Err(e) => self.set_error(e.to_string()),
                }
            }
        });

        ui.add(
            egui::Slider::new(&mut self.framebuffer_scale, 1..=MAX_FRAMEBUFFER_SCALE)
                .text("Framebuffer scale"),
        );

        ui.separator();
        ui.label(RichText::new("Camera").strong());
        let camera = &mut self.renderer.camera;
        changed |= vec3_drag(ui, "Position", &mut camera.position, 0.05);
        changed |= vec3_drag(ui, "Center", &mut camera.center, 0.05);
        let mut fov_degrees = camera.fov_y.to_degrees();
        if ui
            .add(egui::Slider::new(&mut fov_degrees, 10.0..=90.0).text("FOV"))
            .changed()
        {
            camera.set_fov_degrees(fov_degrees);
            changed = true;
        }

        ui.separator();
        let mut culling = self.renderer.backface_culling();
        if ui.checkbox(&mut culling, "Backface culling").changed() {
            self.renderer.set_backface_culling(culling);
            changed = true;
        }
        let mut corrected = self.renderer.perspective_correct_depth();
        if ui
            .checkbox(&mut corrected, "Perspective-correct depth")
            .changed()
        {
            self.renderer.set_perspective_correct_depth(corrected);
            changed = true;
        }
        let mut markers = self.renderer.show_light_markers();
        if ui.checkbox(&mut markers, "Light markers").changed() {
            self.renderer.set_show_light_markers(markers);
            changed = true;
        }

        let mut clear_color = self.renderer.clear_color();
        ui.horizontal(|ui| {
            ui.label("Clear color");
            if color_edit(ui, &mut clear_color) {
                self.renderer.set_clear_color(clear_color);
                changed = true;
            }
        });

        changed
    }

    fn draw_objects(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        for (i, object) in self.scene.objects.iter_mut().enumerate() {
            ui.push_id(i, |ui| {
                ui.separator();
                ui.label(RichText::new(format!("{} ({})", object.name, i)).strong());

                ui.horizontal(|ui| {
                    changed |= ui.checkbox(&mut object.hidden, "Hidden").changed();
                    changed |= ui.checkbox(&mut object.outlined, "Outlined").changed();
                });

                changed |= vec3_drag(ui, "Position", &mut object.position, 0.05);
                ui.horizontal(|ui| {
                    ui.label("Rotation");
                    changed |= ui.drag_angle(&mut object.rotation.x).changed();
                    changed |= ui.drag_angle(&mut object.rotation.y).changed();
                    changed |= ui.drag_angle(&mut object.rotation.z).changed();
                });
                changed |= vec3_drag(ui, "Scaling", &mut object.scaling, 0.02);
            });
        }

        changed
    }

    fn draw_lights(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        for id in 0..self.renderer.lights().len() {
            let light = self.renderer.light_mut(id);

            ui.push_id(id, |ui| {
                ui.separator();
                changed |= ui
                    .checkbox(&mut light.enabled, format!("Light {}", id))
                    .changed();
                if !light.enabled {
                    return;
                }

                changed |= vec3_drag(ui, "Position", &mut light.position, 1.0);
                for (label, color) in [
                    ("Ambient", &mut light.ambient),
                    ("Diffuse", &mut light.diffuse),
                    ("Specular", &mut light.specular),
                ] {
                    ui.horizontal(|ui| {
                        ui.label(label);
                        changed |= color_edit(ui, color);
                    });
                }

                changed |= ui
                    .add(
                        egui::Slider::new(&mut light.specular_strength, 0.01..=10.0)
                            .text("Specular strength"),
                    )
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut light.linear_attenuation, 0.0..=1.0).text("Linear att."))
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut light.quadratic_attenuation, 0.0..=1.0)
                            .text("Quad att."),
                    )
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut light.radius, 0.0..=1000.0).text("Radius"))
                    .changed();
            });
        }

        changed
    }
}

fn vec3_drag(ui: &mut egui::Ui, label: &str, v: &mut Vec3, speed: f32) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let x = ui.add(egui::DragValue::new(&mut v.x).speed(speed)).changed();
        let y = ui.add(egui::DragValue::new(&mut v.y).speed(speed)).changed();
        let z = ui.add(egui::DragValue::new(&mut v.z).speed(speed)).changed();
        x || y || z
    })
    .inner
}

fn color_edit(ui: &mut egui::Ui, color: &mut Color) -> bool {
    let mut rgba_array = [color.x, color.y, color.z, color.w];
    let changed = ui
        .color_edit_button_rgba_unmultiplied(&mut rgba_array)
        .changed();
    if changed {
        *color = rgba(rgba_array[0], rgba_array[1], rgba_array[2], rgba_array[3]);
    }
    changed
}
