//! Rendering: all WebGL calls live here.
//!
//! This module is the only place that touches [`web_sys::WebGlRenderingContext`].
//! Setup compiles one shader pair, links it, and allocates the single
//! shared vertex buffer; after that the surface is two operations —
//! [`GlState::upload`] re-specifies the buffer with the flattened scene,
//! and [`GlState::draw`] clears the canvas and issues one draw call per
//! stamp, walking byte offsets in the same canonical order the scene
//! flattens in.
//!
//! Setup failures (compile, link, allocation) are fatal and carry the
//! driver's info log; see [`crate::error::Error`]. Per-frame calls are
//! infallible in the `web-sys` API and are assumed to succeed, as the
//! original demo does.

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader};

use crate::consts::{BYTES_PER_VERTEX, CLEAR_COLOR, FLOATS_PER_VERTEX};
use crate::error::Error;
use crate::scene::Scene;
use crate::shape::{ALL_KINDS, PrimitiveMode};

/// Position attribute consumed by the vertex shader.
const A_POSITION: &str = "a_Position";

const VERTEX_SHADER: &str = r"
attribute vec4 a_Position;
void main() {
  gl_Position = a_Position;
  gl_PointSize = 5.;
}
";

const FRAGMENT_SHADER: &str = r"
precision mediump float;
void main() {
  gl_FragColor = vec4(.4, 0., 0., 1.);
}
";

/// Live GL objects for the pad: context, the shared vertex buffer, and
/// the resolved position attribute index. The linked program stays bound
/// for the lifetime of the context, so no handle to it is kept.
pub struct GlState {
    gl: WebGlRenderingContext,
    buffer: WebGlBuffer,
    a_position: u32,
}

impl GlState {
    /// Acquire a `"webgl"` context from `canvas` and set up the program
    /// and vertex buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the context is unavailable, a shader stage
    /// fails to compile, the program fails to link, or buffer allocation
    /// fails.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, Error> {
        let gl = canvas
            .get_context("webgl")
            .map_err(Error::from)?
            .ok_or(Error::ContextUnavailable)?
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|_| Error::ContextUnavailable)?;

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        gl.use_program(Some(&program));

        let a_position = u32::try_from(gl.get_attrib_location(&program, A_POSITION))
            .map_err(|_| Error::AttribNotFound(A_POSITION))?;

        let buffer = gl.create_buffer().ok_or(Error::BufferAlloc)?;
        gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&buffer));

        Ok(Self { gl, buffer, a_position })
    }

    /// Re-specify the shared vertex buffer with a freshly flattened scene.
    pub fn upload(&self, vertices: &[f32]) {
        self.gl
            .bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&self.buffer));
        let view = js_sys::Float32Array::from(vertices);
        self.gl.buffer_data_with_array_buffer_view(
            WebGlRenderingContext::ARRAY_BUFFER,
            &view,
            WebGlRenderingContext::STATIC_DRAW,
        );
    }

    /// Clear the canvas and draw every stamp in the scene.
    ///
    /// The byte offset advances by `BYTES_PER_VERTEX * vertex_count` per
    /// stamp, tracking the flatten order exactly.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn draw(&self, scene: &Scene) {
        let [r, g, b, a] = CLEAR_COLOR;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(WebGlRenderingContext::COLOR_BUFFER_BIT);

        let mut byte_offset: i32 = 0;
        for kind in ALL_KINDS {
            let call = kind.draw_call();
            let mode = gl_mode(call.mode);
            let count = call.vertex_count as i32;
            for _stamp in scene.stamps_for(kind) {
                self.gl.vertex_attrib_pointer_with_i32(
                    self.a_position,
                    FLOATS_PER_VERTEX as i32,
                    WebGlRenderingContext::FLOAT,
                    false,
                    BYTES_PER_VERTEX,
                    byte_offset,
                );
                self.gl.enable_vertex_attrib_array(self.a_position);
                self.gl.draw_arrays(mode, 0, count);
                byte_offset += BYTES_PER_VERTEX * count;
            }
        }
    }
}

fn gl_mode(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Points => WebGlRenderingContext::POINTS,
        PrimitiveMode::Triangles => WebGlRenderingContext::TRIANGLES,
        PrimitiveMode::TriangleFan => WebGlRenderingContext::TRIANGLE_FAN,
    }
}

fn compile_shader(gl: &WebGlRenderingContext, shader_type: u32, source: &str) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| Error::ShaderCompile("unable to create shader object".to_owned()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, WebGlRenderingContext::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error creating shader".to_owned());
        Err(Error::ShaderCompile(info))
    }
}

fn link_program(gl: &WebGlRenderingContext, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, Error> {
    let vert = compile_shader(gl, WebGlRenderingContext::VERTEX_SHADER, vert_src)?;
    let frag = compile_shader(gl, WebGlRenderingContext::FRAGMENT_SHADER, frag_src)?;

    let program = gl
        .create_program()
        .ok_or_else(|| Error::ProgramLink("unable to create program object".to_owned()))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, WebGlRenderingContext::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error linking program".to_owned());
        Err(Error::ProgramLink(info))
    }
}
