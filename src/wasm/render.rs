//! WebGL2 renderer surface: owns the canvas, the camera, and two small
//! shader programs (colored points, uniform-colored lines). Implements
//! [`GeometryBackend`] so scene switches swap GPU buffers through one owned
//! handle.

use glam::{EulerRot, Mat4, Vec3};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, GRID_ALPHA, GRID_COLOR, GRID_DROP,
    ORB_ALPHA, ORB_COLOR, ORB_RADIUS, PARTICLE_ALPHA, PARTICLE_POINT_SIZE,
};
use crate::scene::{
    icosahedron_wireframe, GeometryBackend, OrbCluster, ParticleField, Scene, SceneState,
    SceneVariant, WaveGrid,
};

const POINT_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
uniform mat4 u_mvp;
uniform float u_size;
out vec3 v_color;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    gl_PointSize = u_size * (300.0 / max(gl_Position.w, 0.1));
    v_color = a_color;
}
"#;

const POINT_FS: &str = r#"#version 300 es
precision mediump float;
in vec3 v_color;
uniform float u_alpha;
out vec4 frag;
void main() {
    vec2 d = gl_PointCoord - vec2(0.5);
    if (dot(d, d) > 0.25) discard;
    frag = vec4(v_color, u_alpha);
}
"#;

const LINE_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_mvp;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

const LINE_FS: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 frag;
void main() {
    frag = u_color;
}
"#;

pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    point_program: WebGlProgram,
    point_mvp: WebGlUniformLocation,
    point_size: WebGlUniformLocation,
    point_alpha: WebGlUniformLocation,
    line_program: WebGlProgram,
    line_mvp: WebGlUniformLocation,
    line_color: WebGlUniformLocation,
}

/// GPU resources for the active scene. Exactly one of these is live at a
/// time; `Renderer::release` deletes every buffer it owns.
pub struct SceneGeometry {
    variant: SceneVariant,
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    color_buffer: Option<WebGlBuffer>,
    index_buffer: Option<WebGlBuffer>,
    index_count: i32,
    vertex_count: i32,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        let point_program = link_program(&gl, POINT_VS, POINT_FS)?;
        let point_mvp = uniform(&gl, &point_program, "u_mvp")?;
        let point_size = uniform(&gl, &point_program, "u_size")?;
        let point_alpha = uniform(&gl, &point_program, "u_alpha")?;

        let line_program = link_program(&gl, LINE_VS, LINE_FS)?;
        let line_mvp = uniform(&gl, &line_program, "u_mvp")?;
        let line_color = uniform(&gl, &line_program, "u_color")?;

        Ok(Self {
            gl,
            canvas,
            point_program,
            point_mvp,
            point_size,
            point_alpha,
            line_program,
            line_mvp,
            line_color,
        })
    }

    pub fn draw(&self, geometry: &SceneGeometry, state: &SceneState) {
        let gl = &self.gl;
        gl.viewport(
            0,
            0,
            self.canvas.width() as i32,
            self.canvas.height() as i32,
        );
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        // A switch installs the new handle before the next frame; skip the
        // frame if a stale handle is still bound.
        if geometry.variant != state.variant() {
            return;
        }

        let vp = self.view_projection();
        match &state.scene {
            Scene::ParticleField(field) => self.draw_particles(geometry, field, vp),
            Scene::WaveGrid(grid) => self.draw_grid(geometry, grid, vp),
            Scene::OrbCluster(cluster) => self.draw_orbs(geometry, cluster, vp),
        }
    }

    fn view_projection(&self) -> Mat4 {
        let width = self.canvas.width().max(1) as f32;
        let height = self.canvas.height().max(1) as f32;
        let projection = Mat4::perspective_rh_gl(
            CAMERA_FOV_DEG.to_radians(),
            width / height,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_Z));
        projection * view
    }

    fn draw_particles(&self, geometry: &SceneGeometry, field: &ParticleField, vp: Mat4) {
        let gl = &self.gl;
        gl.use_program(Some(&self.point_program));
        gl.bind_vertex_array(Some(&geometry.vao));

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&geometry.vertex_buffer));
        upload_f32(gl, GL::ARRAY_BUFFER, field.positions(), GL::DYNAMIC_DRAW);
        if let Some(colors) = &geometry.color_buffer {
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(colors));
            upload_f32(gl, GL::ARRAY_BUFFER, field.colors(), GL::DYNAMIC_DRAW);
        }

        let (rx, ry) = field.rotation();
        let mvp = vp * Mat4::from_euler(EulerRot::XYZ, rx, ry, 0.0);
        gl.uniform_matrix4fv_with_f32_array(Some(&self.point_mvp), false, &mvp.to_cols_array());
        gl.uniform1f(Some(&self.point_size), PARTICLE_POINT_SIZE);
        gl.uniform1f(Some(&self.point_alpha), PARTICLE_ALPHA);
        gl.draw_arrays(GL::POINTS, 0, geometry.vertex_count);
        gl.bind_vertex_array(None);
    }

    fn draw_grid(&self, geometry: &SceneGeometry, grid: &WaveGrid, vp: Mat4) {
        let gl = &self.gl;
        gl.use_program(Some(&self.line_program));
        gl.bind_vertex_array(Some(&geometry.vao));

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&geometry.vertex_buffer));
        upload_f32(gl, GL::ARRAY_BUFFER, grid.positions(), GL::DYNAMIC_DRAW);

        // Tilt near-horizontal, drop below the camera axis, spin about the
        // plane normal.
        let model = Mat4::from_translation(Vec3::new(0.0, GRID_DROP, 0.0))
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
            * Mat4::from_rotation_z(grid.spin());
        let mvp = vp * model;
        gl.uniform_matrix4fv_with_f32_array(Some(&self.line_mvp), false, &mvp.to_cols_array());
        gl.uniform4f(
            Some(&self.line_color),
            GRID_COLOR[0],
            GRID_COLOR[1],
            GRID_COLOR[2],
            GRID_ALPHA,
        );
        gl.draw_elements_with_i32(GL::LINES, geometry.index_count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }

    fn draw_orbs(&self, geometry: &SceneGeometry, cluster: &OrbCluster, vp: Mat4) {
        let gl = &self.gl;
        gl.use_program(Some(&self.line_program));
        gl.bind_vertex_array(Some(&geometry.vao));
        gl.uniform4f(
            Some(&self.line_color),
            ORB_COLOR[0],
            ORB_COLOR[1],
            ORB_COLOR[2],
            ORB_ALPHA,
        );

        let group = vp * Mat4::from_rotation_y(cluster.group_yaw());
        for orb in cluster.orbs() {
            let model = Mat4::from_translation(Vec3::from(orb.position))
                * Mat4::from_euler(EulerRot::XYZ, orb.rotation_x, orb.rotation_y, 0.0)
                * Mat4::from_scale(Vec3::splat(orb.scale));
            let mvp = group * model;
            gl.uniform_matrix4fv_with_f32_array(Some(&self.line_mvp), false, &mvp.to_cols_array());
            gl.draw_arrays(GL::LINES, 0, geometry.vertex_count);
        }
        gl.bind_vertex_array(None);
    }
}

impl GeometryBackend for Renderer {
    type Handle = SceneGeometry;
    type Error = JsValue;

    fn build(&mut self, scene: &Scene) -> Result<SceneGeometry, JsValue> {
        let gl = &self.gl;
        let vao = gl
            .create_vertex_array()
            .ok_or("vertex array allocation failed")?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = gl.create_buffer().ok_or("buffer allocation failed")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);

        let geometry = match scene {
            Scene::ParticleField(field) => {
                upload_f32(gl, GL::ARRAY_BUFFER, field.positions(), GL::DYNAMIC_DRAW);

                let color_buffer = gl.create_buffer().ok_or("buffer allocation failed")?;
                gl.bind_buffer(GL::ARRAY_BUFFER, Some(&color_buffer));
                upload_f32(gl, GL::ARRAY_BUFFER, field.colors(), GL::DYNAMIC_DRAW);
                gl.enable_vertex_attrib_array(1);
                gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, 0, 0);

                SceneGeometry {
                    variant: SceneVariant::ParticleField,
                    vao,
                    vertex_buffer,
                    color_buffer: Some(color_buffer),
                    index_buffer: None,
                    index_count: 0,
                    vertex_count: field.count() as i32,
                }
            }
            Scene::WaveGrid(grid) => {
                upload_f32(gl, GL::ARRAY_BUFFER, grid.positions(), GL::DYNAMIC_DRAW);

                let indices = WaveGrid::line_indices();
                let index_buffer = gl.create_buffer().ok_or("buffer allocation failed")?;
                gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
                upload_u16(gl, GL::ELEMENT_ARRAY_BUFFER, &indices, GL::STATIC_DRAW);

                SceneGeometry {
                    variant: SceneVariant::WaveGrid,
                    vao,
                    vertex_buffer,
                    color_buffer: None,
                    index_buffer: Some(index_buffer),
                    index_count: indices.len() as i32,
                    vertex_count: (grid.positions().len() / 3) as i32,
                }
            }
            Scene::OrbCluster(_) => {
                let lines = icosahedron_wireframe(ORB_RADIUS);
                upload_f32(gl, GL::ARRAY_BUFFER, &lines, GL::STATIC_DRAW);

                SceneGeometry {
                    variant: SceneVariant::OrbCluster,
                    vao,
                    vertex_buffer,
                    color_buffer: None,
                    index_buffer: None,
                    index_count: 0,
                    vertex_count: (lines.len() / 3) as i32,
                }
            }
        };

        gl.bind_vertex_array(None);
        Ok(geometry)
    }

    fn release(&mut self, handle: SceneGeometry) {
        let gl = &self.gl;
        gl.delete_buffer(Some(&handle.vertex_buffer));
        if let Some(buffer) = &handle.color_buffer {
            gl.delete_buffer(Some(buffer));
        }
        if let Some(buffer) = &handle.index_buffer {
            gl.delete_buffer(Some(buffer));
        }
        gl.delete_vertex_array(Some(&handle.vao));
    }
}

fn upload_f32(gl: &GL, target: u32, data: &[f32], usage: u32) {
    // The view aliases wasm linear memory; nothing may allocate between
    // creating it and handing it to buffer_data.
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }
}

fn upload_u16(gl: &GL, target: u32, data: &[u16], usage: u32) {
    unsafe {
        let view = js_sys::Uint16Array::view(data);
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }
}

fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("uniform {name} not found")))
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("shader allocation failed")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader compile error".into());
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&log))
    }
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;

    let program = gl.create_program().ok_or("program allocation failed")?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    // Shaders can be flagged for deletion once linked.
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program link error".into());
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&log))
    }
}
