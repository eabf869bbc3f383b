use std::rc::{Rc, Weak};

use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use wasm_bindgen::JsCast;

use crate::error::{Error, Result};
use crate::scene::{Blending, Geometry, PerspectiveCamera, Primitive, Renderer, SceneGraph, Viewport};

const POSITION_LOCATION: u32 = 0;

const VERTEX_SHADER: &str = r#"#version 300 es
uniform mat4 u_projection;
uniform mat4 u_model_view;
uniform float u_point_size;
uniform float u_point_scale;
in vec3 a_position;
void main() {
    vec4 mv = u_model_view * vec4(a_position, 1.0);
    gl_Position = u_projection * mv;
    gl_PointSize = max(u_point_size * u_point_scale / -mv.z, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 out_color;
void main() {
    out_color = u_color;
}
"#;

struct GpuMesh {
    source: Weak<Geometry>,
    vao: WebGlVertexArrayObject,
    _positions: WebGlBuffer,
    _indices: Option<WebGlBuffer>,
    mode: u32,
    count: i32,
}

struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
}

/// Raw WebGL2 renderer for one canvas. Meshes are uploaded the first time a
/// node is drawn and re-uploaded only if the node's geometry is replaced.
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    meshes: Vec<Option<GpuMesh>>,
    pixel_ratio: f64,
}

impl WebGlRenderer {
    pub fn new(canvas: HtmlCanvasElement, surface_id: &str, pixel_ratio: f64, size: Viewport) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or_else(|| Error::WebGlUnavailable(surface_id.to_string()))?
            .dyn_into()
            .map_err(|_| Error::WebGlUnavailable(surface_id.to_string()))?;

        let program = link(
            &gl,
            &compile(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?,
            &compile(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?,
        )?;
        let uniforms = Uniforms {
            projection: gl.get_uniform_location(&program, "u_projection"),
            model_view: gl.get_uniform_location(&program, "u_model_view"),
            color: gl.get_uniform_location(&program, "u_color"),
            point_size: gl.get_uniform_location(&program, "u_point_size"),
            point_scale: gl.get_uniform_location(&program, "u_point_scale"),
        };

        gl.enable(GL::BLEND);
        gl.enable(GL::DEPTH_TEST);
        gl.depth_func(GL::LEQUAL);

        let mut renderer = Self {
            canvas,
            gl,
            program,
            uniforms,
            meshes: Vec::new(),
            pixel_ratio,
        };
        renderer.set_size(size);
        Ok(renderer)
    }

    fn ensure_mesh(&mut self, index: usize, geometry: &Rc<Geometry>) -> Result<()> {
        if self.meshes.len() <= index {
            self.meshes.resize_with(index + 1, || None);
        }
        let stale = match &self.meshes[index] {
            Some(mesh) => mesh.source.as_ptr() != Rc::as_ptr(geometry),
            None => true,
        };
        if stale {
            self.meshes[index] = Some(upload(&self.gl, geometry)?);
        }
        Ok(())
    }
}

impl Renderer for WebGlRenderer {
    fn set_size(&mut self, viewport: Viewport) {
        self.canvas.set_width((viewport.width * self.pixel_ratio) as u32);
        self.canvas.set_height((viewport.height * self.pixel_ratio) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
        self.gl
            .viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
    }

    fn render(&mut self, graph: &SceneGraph, camera: &PerspectiveCamera) -> Result<()> {
        self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        self.gl.use_program(Some(&self.program));

        let projection = camera.projection().to_cols_array();
        self.gl
            .uniform_matrix4fv_with_f32_array(self.uniforms.projection.as_ref(), false, &projection);
        self.gl.uniform1f(
            self.uniforms.point_scale.as_ref(),
            self.canvas.height() as f32 / 2.0,
        );

        let view = camera.view();
        for (index, node) in graph.nodes().iter().enumerate() {
            let model_view = (view * node.transform.matrix()).to_cols_array();
            let material = node.material;
            self.ensure_mesh(index, &node.geometry)?;
            let Some(mesh) = self.meshes[index].as_ref() else {
                continue;
            };
            self.gl.bind_vertex_array(Some(&mesh.vao));
            let (mode, count) = (mesh.mode, mesh.count);

            let u = &self.uniforms;
            self.gl
                .uniform_matrix4fv_with_f32_array(u.model_view.as_ref(), false, &model_view);
            let [r, g, b] = material.color;
            self.gl.uniform4f(u.color.as_ref(), r, g, b, material.opacity);
            self.gl.uniform1f(u.point_size.as_ref(), material.point_size);

            match material.blending {
                Blending::Normal => self.gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA),
                Blending::Additive => self.gl.blend_func(GL::SRC_ALPHA, GL::ONE),
            }
            self.gl.depth_mask(!material.is_transparent());

            if node.geometry.indices.is_empty() {
                self.gl.draw_arrays(mode, 0, count);
            } else {
                self.gl.draw_elements_with_i32(mode, count, GL::UNSIGNED_SHORT, 0);
            }
        }

        self.gl.bind_vertex_array(None);
        self.gl.depth_mask(true);
        Ok(())
    }
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(Error::Gpu("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(Error::Shader(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(Error::Gpu("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.bind_attrib_location(&program, POSITION_LOCATION, "a_position");
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(Error::Link(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn upload(gl: &GL, geometry: &Rc<Geometry>) -> Result<GpuMesh> {
    let vao = gl.create_vertex_array().ok_or(Error::Gpu("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let positions = gl.create_buffer().ok_or(Error::Gpu("position buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&positions));
    let data = js_sys::Float32Array::from(geometry.positions.as_slice());
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(POSITION_LOCATION);
    gl.vertex_attrib_pointer_with_i32(POSITION_LOCATION, 3, GL::FLOAT, false, 0, 0);

    let indices = if geometry.indices.is_empty() {
        None
    } else {
        let buffer = gl.create_buffer().ok_or(Error::Gpu("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        let data = js_sys::Uint16Array::from(geometry.indices.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        Some(buffer)
    };

    gl.bind_vertex_array(None);

    let mode = match geometry.primitive {
        Primitive::Points => GL::POINTS,
        Primitive::Lines => GL::LINES,
        Primitive::Triangles => GL::TRIANGLES,
    };
    let count = if indices.is_some() {
        geometry.indices.len()
    } else {
        geometry.vertex_count()
    };

    Ok(GpuMesh {
        source: Rc::downgrade(geometry),
        vao,
        _positions: positions,
        _indices: indices,
        mode,
        count: count as i32,
    })
}
