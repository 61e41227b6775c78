use crate::core::blending::{BlendEquation, BlendOp, Blending};
use crate::core::frame_buffer::FrameBuffer;
use crate::core::rasterizer::{RasterTarget, ScreenVertex, TriangleData, rasterize_triangle};
use crate::core::stencil::{Stencil, StencilOp};
use crate::core::vertex::Vertex;
use crate::geometry::camera::Camera;
use crate::geometry::math::{Mat4, NormalizeSafe, Vec3, upper_left_3x3, xyz};
use crate::geometry::transform::{Viewport, object_to_screen};
use crate::material_system::color::{Color, rgba};
use crate::material_system::light::{Light, MAX_LIGHTS};
use crate::material_system::material::Material;
use crate::material_system::texture::Texture;
use log::debug;
use std::time::Instant;

/// 渲染器纹理表中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// 将完成的颜色缓冲区交给外部显示或保存
pub trait FramePresenter {
    type Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// 光源标记方块的边长（像素）
const LIGHT_MARKER_SIZE: i32 = 10;

/// 软件渲染管线
///
/// 持有颜色/深度/模板缓冲区、变换矩阵、纹理表与光源槽位。
/// 每次调用 [`Renderer::process_vertices`] 处理一批三角形直到完成。
pub struct Renderer {
    width: usize,
    height: usize,
    frame_buffer: FrameBuffer,
    stencil: Stencil,
    blending: Blending,
    viewport: Viewport,
    clear_color: Color,

    model: Mat4,
    view: Mat4,
    projection: Mat4,
    pub camera: Camera,

    lights: [Light; MAX_LIGHTS],
    textures: Vec<Texture>,
    bound_texture: Option<TextureId>,
    material: Material,

    backface_culling: bool,
    perspective_correct_depth: bool,
    show_light_markers: bool,

    triangles_rendered: usize,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame_buffer: FrameBuffer::new(width, height),
            stencil: Stencil::new(width, height),
            blending: Blending::default(),
            viewport: Viewport::new(0, 0, width as u32, height as u32),
            clear_color: rgba(0.0, 0.0, 0.0, 1.0),
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera: Camera::default(),
            lights: [Light::slot_default(width, height); MAX_LIGHTS],
            textures: Vec::new(),
            bound_texture: None,
            material: Material::default(),
            backface_culling: false,
            perspective_correct_depth: false,
            show_light_markers: true,
            triangles_rendered: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    // ===== 缓冲区访问 =====

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.frame_buffer.pixel(x, y)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.frame_buffer.set_pixel(x, y, color);
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.frame_buffer.depth(x, y)
    }

    pub fn stencil_at(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "模板坐标越界: ({}, {})", x, y);
        self.stencil.value(x, y)
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// 颜色重置为清屏色，深度重置为无穷远，模板清零
    pub fn clear_buffers(&mut self) {
        self.frame_buffer.clear(&self.clear_color);
        self.stencil.clear();
    }

    pub fn present<P: FramePresenter>(&self, presenter: &mut P) -> Result<(), P::Error> {
        presenter.present(&self.frame_buffer)
    }

    // ===== 变换状态 =====

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, position: (i32, i32), size: (u32, u32)) {
        self.viewport = Viewport::new(position.0, position.1, size.0, size.1);
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    pub fn set_model_matrix(&mut self, model: Mat4) {
        self.model = model;
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// 由相机重新计算视图矩阵与投影矩阵，宽高比取缓冲区尺寸
    pub fn update_camera(&mut self) {
        let aspect_ratio = self.width as f32 / self.height as f32;
        self.view = self.camera.view_matrix();
        self.projection = self.camera.projection_matrix(aspect_ratio);
    }

    // ===== 纹理 =====

    /// 注册原始纹理数据，返回新纹理的句柄
    pub fn add_texture(
        &mut self,
        bytes: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> TextureId {
        self.textures
            .push(Texture::from_raw(bytes, width, height, channels));
        TextureId(self.textures.len() - 1)
    }

    pub fn texture(&self, id: TextureId) -> &Texture {
        self.assert_texture(id);
        &self.textures[id.0]
    }

    pub fn texture_mut(&mut self, id: TextureId) -> &mut Texture {
        self.assert_texture(id);
        &mut self.textures[id.0]
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// 绑定纹理，`None` 表示不使用纹理
    pub fn bind_texture(&mut self, id: Option<TextureId>) {
        if let Some(id) = id {
            self.assert_texture(id);
        }
        self.bound_texture = id;
    }

    pub fn bound_texture(&self) -> Option<TextureId> {
        self.bound_texture
    }

    fn assert_texture(&self, id: TextureId) {
        assert!(
            id.0 < self.textures.len(),
            "无效的纹理句柄 {}，当前共 {} 个纹理",
            id.0,
            self.textures.len()
        );
    }

    // ===== 材质与光源 =====

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn lights(&self) -> &[Light; MAX_LIGHTS] {
        &self.lights
    }

    pub fn light(&self, id: usize) -> &Light {
        assert!(id < MAX_LIGHTS, "光源编号越界: {}", id);
        &self.lights[id]
    }

    pub fn light_mut(&mut self, id: usize) -> &mut Light {
        assert!(id < MAX_LIGHTS, "光源编号越界: {}", id);
        &mut self.lights[id]
    }

    pub fn set_light_state(&mut self, id: usize, enabled: bool) {
        self.light_mut(id).enabled = enabled;
    }

    // ===== 混合与模板 =====

    pub fn blending(&self) -> &Blending {
        &self.blending
    }

    pub fn set_blend_enabled(&mut self, enabled: bool) {
        self.blending.enabled = enabled;
    }

    pub fn set_blend_func(&mut self, left: BlendOp, right: BlendOp, equation: BlendEquation) {
        self.blending.set(left, right, equation);
    }

    pub fn stencil_enabled(&self) -> bool {
        self.stencil.is_enabled()
    }

    pub fn stencil_operation(&self) -> StencilOp {
        self.stencil.operation()
    }

    pub fn set_stencil_enabled(&mut self, enabled: bool) {
        self.stencil.set_enabled(enabled);
    }

    pub fn set_stencil_operation(&mut self, operation: StencilOp) {
        self.stencil.set_operation(operation);
    }

    pub fn set_stencil_state(&mut self, enabled: bool, operation: StencilOp) {
        self.stencil.set_enabled(enabled);
        self.stencil.set_operation(operation);
    }

    // ===== 开关 =====

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    pub fn perspective_correct_depth(&self) -> bool {
        self.perspective_correct_depth
    }

    pub fn set_perspective_correct_depth(&mut self, enabled: bool) {
        self.perspective_correct_depth = enabled;
    }

    pub fn show_light_markers(&self) -> bool {
        self.show_light_markers
    }

    pub fn set_show_light_markers(&mut self, enabled: bool) {
        self.show_light_markers = enabled;
    }

    /// 最近一批中通过剔除且屏幕坐标有效、实际送入光栅化的三角形数量
    pub fn triangles_rendered(&self) -> usize {
        self.triangles_rendered
    }

    // ===== 管线 =====

    /// 变换、剔除并光栅化一批三角形
    ///
    /// 顶点按每 3 个一组构成三角形，数量必须是 3 的倍数。
    pub fn process_vertices(&mut self, vertices: &[Vertex]) {
        assert!(
            vertices.len() % 3 == 0,
            "顶点数量必须是 3 的倍数，实际为 {}",
            vertices.len()
        );

        let start = Instant::now();
        self.triangles_rendered = 0;

        if self.show_light_markers {
            self.draw_light_markers();
        }

        let mvp = self.projection * self.view * self.model;
        let normal_matrix = upper_left_3x3(&self.model);
        let eye = xyz(&self
            .viewport
            .ndc_to_screen(&self.camera.position.push(1.0), true));

        let screen: Vec<ScreenVertex> = vertices
            .iter()
            .map(|v| ScreenVertex {
                screen: object_to_screen(&v.position, &mvp, &self.viewport),
                color: v.color,
                uv: v.uv,
            })
            .collect();

        let texture = self.bound_texture.map(|id| &self.textures[id.0]);
        let mut target = RasterTarget {
            frame_buffer: &mut self.frame_buffer,
            stencil: &mut self.stencil,
            blending: &self.blending,
            viewport: &self.viewport,
        };

        for (tri, source) in screen.chunks_exact(3).zip(vertices.chunks_exact(3)) {
            let normal = (normal_matrix * source[0].normal).normalize_safe();

            if self.backface_culling && is_back_facing(&xyz(&tri[0].screen), &eye, &normal) {
                continue;
            }

            let triangle = TriangleData {
                vertices: [tri[0], tri[1], tri[2]],
                normal,
                texture,
                material: &self.material,
                lights: &self.lights,
                eye,
                perspective_correct_depth: self.perspective_correct_depth,
            };
            // w 为零等情况下屏幕坐标非有限，跳过且不计数
            if !triangle.is_valid() {
                continue;
            }
            self.triangles_rendered += 1;
            rasterize_triangle(&triangle, &mut target);
        }

        debug!(
            "批次完成: {} 个三角形中渲染 {} 个，耗时 {:?}",
            vertices.len() / 3,
            self.triangles_rendered,
            start.elapsed()
        );
    }

    /// 在每个启用光源的屏幕位置画一个实心方块
    fn draw_light_markers(&mut self) {
        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let half = LIGHT_MARKER_SIZE / 2;

        for light in self.lights.iter().filter(|l| l.enabled) {
            let color = light.ambient + light.diffuse + light.specular;
            for dy in -half..LIGHT_MARKER_SIZE - half {
                for dx in -half..LIGHT_MARKER_SIZE - half {
                    let x = (light.position.x + dx as f32).clamp(0.0, max_x) as usize;
                    let y = (light.position.y + dy as f32).clamp(0.0, max_y) as usize;
                    self.frame_buffer.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// 视线（相机指向三角形第一个顶点）与平面法线同向时为背面
fn is_back_facing(first_vertex: &Vec3, eye: &Vec3, normal: &Vec3) -> bool {
    let view = (first_vertex - eye).normalize_safe();
    view.dot(normal) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_toward_camera_is_front() {
        let eye = Vec3::new(32.0, 32.0, 5.0);
        let vertex = Vec3::new(10.0, 10.0, 0.5);
        assert!(!is_back_facing(&vertex, &eye, &Vec3::z()));
        assert!(is_back_facing(&vertex, &eye, &-Vec3::z()));
    }

    #[test]
    fn default_lights_are_disabled_slots() {
        let renderer = Renderer::new(64, 32);
        assert!(renderer.lights().iter().all(|l| !l.enabled));
        assert_eq!(renderer.light(7).position, Vec3::new(32.0, 8.0, 1.5));
    }

    #[test]
    fn light_markers_draw_clamped_square() {
        let mut renderer = Renderer::new(32, 32);
        renderer.set_show_light_markers(true);
        {
            let light = renderer.light_mut(0);
            light.enabled = true;
            light.position = Vec3::new(2.0, 2.0, 0.0);
            light.ambient = rgba(0.25, 0.0, 0.0, 0.0);
            light.diffuse = rgba(0.0, 0.25, 0.0, 0.0);
            light.specular = rgba(0.0, 0.0, 0.25, 1.0);
        }
        renderer.clear_buffers();
        renderer.process_vertices(&[]);

        let marker = rgba(0.25, 0.25, 0.25, 1.0);
        assert_eq!(renderer.pixel(0, 0), marker);
        assert_eq!(renderer.pixel(6, 6), marker);
        assert_eq!(renderer.pixel(7, 7), renderer.clear_color());
    }

    #[test]
    fn markers_are_drawn_for_enabled_lights_by_default() {
        let mut renderer = Renderer::new(32, 32);
        assert!(renderer.show_light_markers());
        renderer.clear_buffers();
        renderer.process_vertices(&[]);
        assert_eq!(renderer.pixel(16, 8), renderer.clear_color());

        renderer.set_light_state(0, true);
        renderer.process_vertices(&[]);
        // 默认槽位：位置 (w/2, h/4)，颜色 ambient + diffuse + specular
        assert_eq!(renderer.pixel(16, 8), rgba(1.0, 1.0, 1.0, 3.0));

        renderer.clear_buffers();
        renderer.set_show_light_markers(false);
        renderer.process_vertices(&[]);
        assert_eq!(renderer.pixel(16, 8), renderer.clear_color());
    }

    #[test]
    fn skipped_non_finite_triangles_are_not_counted() {
        let mut renderer = Renderer::new(16, 16);
        renderer.set_projection_matrix(Mat4::zeros());
        let triangle = [
            Vertex::at(Vec3::new(-0.5, -0.5, 0.0)),
            Vertex::at(Vec3::new(0.5, -0.5, 0.0)),
            Vertex::at(Vec3::new(0.0, 0.5, 0.0)),
        ];
        renderer.process_vertices(&triangle);
        assert_eq!(renderer.triangles_rendered(), 0);

        renderer.set_projection_matrix(Mat4::identity());
        renderer.process_vertices(&triangle);
        assert_eq!(renderer.triangles_rendered(), 1);
    }

    #[test]
    fn update_camera_uses_buffer_aspect() {
        let mut renderer = Renderer::new(200, 100);
        renderer.update_camera();
        let expected = renderer.camera.projection_matrix(2.0);
        assert_eq!(*renderer.projection_matrix(), expected);
        assert_eq!(*renderer.view_matrix(), renderer.camera.view_matrix());
    }

    #[test]
    fn texture_handles_are_sequential() {
        let mut renderer = Renderer::new(4, 4);
        let a = renderer.add_texture(&[255; 4], 1, 1, 4);
        let b = renderer.add_texture(&[0; 3], 1, 1, 3);
        assert_eq!((a, b), (TextureId(0), TextureId(1)));
        renderer.bind_texture(Some(b));
        assert_eq!(renderer.bound_texture(), Some(b));
        renderer.bind_texture(None);
        assert_eq!(renderer.bound_texture(), None);
    }

    #[test]
    #[should_panic]
    fn binding_unknown_texture_panics() {
        let mut renderer = Renderer::new(4, 4);
        renderer.bind_texture(Some(TextureId(0)));
    }
}
