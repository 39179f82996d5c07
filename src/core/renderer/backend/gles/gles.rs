use crate::core::renderer::api::SurfaceRenderer;
use crate::core::renderer::{geometry, projection};
use crate::error::{AppError, GlResultExt, Result};

use glam::Mat4;
use glow::HasContext;
use log::{error, info};

/// Vertex stage source, bundled at compile time.
const VERTEX_SHADER_SOURCE: &str = include_str!("shaders/fan.vert");
/// Fragment stage source, bundled at compile time.
const FRAGMENT_SHADER_SOURCE: &str = include_str!("shaders/fan.frag");
/// Encoded image for the fan's texture.
const PICTURE_BYTES: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/picture.png"));

/// The fixed geometry lives in GPU buffers under one vertex array object.
struct GeometryBuffers {
    vertex_array: glow::NativeVertexArray,
    position_buffer: glow::NativeBuffer,
    texcoord_buffer: glow::NativeBuffer,
    index_buffer: glow::NativeBuffer,
}

/// OpenGL ES renderer for the textured fan.
/// Holds every GPU object and the per-frame transform.
#[derive(Default)]
pub struct GlesRenderer {
    program: Option<glow::NativeProgram>,                 // linked shader program
    matrix_location: Option<glow::NativeUniformLocation>, // uMatrix
    position_location: Option<u32>,                       // vPosition attribute slot
    texcoord_location: Option<u32>,                       // aTextCoord attribute slot
    geometry: Option<GeometryBuffers>,                    // uploaded fan geometry
    texture: Option<glow::NativeTexture>,                 // decoded picture on the GPU
    image_size: Option<(u32, u32)>,                       // picture dimensions in pixels
    mvp: Mat4,                                            // model-view-projection
}

impl GlesRenderer {
    /// Deletes every GPU object this renderer owns.
    /// Safe to call on a partially initialized or already-released renderer.
    fn release_gpu_resources(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
            if let Some(texture) = self.texture.take() {
                gl.delete_texture(texture);
            }
            if let Some(buffers) = self.geometry.take() {
                gl.delete_buffer(buffers.position_buffer);
                gl.delete_buffer(buffers.texcoord_buffer);
                gl.delete_buffer(buffers.index_buffer);
                gl.delete_vertex_array(buffers.vertex_array);
            }
        }

        // Clear CPU-side state derived from the released objects
        self.matrix_location = None;
        self.position_location = None;
        self.texcoord_location = None;
        self.image_size = None;
    }
}

impl SurfaceRenderer for GlesRenderer {
    /// Build the program, upload the geometry, upload the texture.
    /// Each concern fails independently: a failure is logged and leaves the
    /// corresponding handle empty, and the frame loop keeps running.
    fn on_surface_created(&mut self, gl: &glow::Context) {
        // A recreated surface means a fresh context; drop stale objects first.
        self.release_gpu_resources(gl);

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
        }

        match build_program(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE) {
            Ok(program) => {
                unsafe {
                    gl.use_program(Some(program));
                    self.matrix_location = gl.get_uniform_location(program, "uMatrix");
                    self.position_location = gl.get_attrib_location(program, "vPosition");
                    self.texcoord_location = gl.get_attrib_location(program, "aTextCoord");
                }
                self.program = Some(program);
                info!("✅ Shader program linked");
            }
            Err(e) => error!("shader program setup failed: {e}"),
        }

        match upload_geometry(gl) {
            Ok(buffers) => {
                self.geometry = Some(buffers);
                info!("✅ Fan geometry uploaded");
            }
            Err(e) => error!("geometry upload failed: {e}"),
        }

        match load_texture(gl, PICTURE_BYTES) {
            Ok((texture, (width, height))) => {
                self.texture = Some(texture);
                self.image_size = Some((width, height));
                info!("✅ Texture uploaded ({width}x{height})");
            }
            Err(e) => error!("texture setup failed: {e}"),
        }
    }

    /// Refit the orthographic frustum to the new viewport.
    fn on_surface_changed(&mut self, gl: &glow::Context, width: u32, height: u32) {
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        if height == 0 {
            // Minimized; keep the previous transform until a real size arrives.
            return;
        }

        // Fall back to a square aspect when the picture never decoded.
        let (image_width, image_height) = self.image_size.unwrap_or((1, 1));
        let image_aspect = image_width as f32 / image_height as f32;
        self.mvp = projection::model_view_projection(image_aspect, width, height);
    }

    /// The fixed draw sequence: clear, upload the transform, bind the
    /// attributes and the texture, one indexed draw, unbind the attributes.
    fn on_draw_frame(&mut self, gl: &glow::Context) {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        // Degraded state after a setup failure: present cleared frames only.
        let (Some(program), Some(buffers), Some(texture)) =
            (self.program, self.geometry.as_ref(), self.texture)
        else {
            return;
        };
        let (Some(position_location), Some(texcoord_location)) =
            (self.position_location, self.texcoord_location)
        else {
            return;
        };

        unsafe {
            gl.use_program(Some(program));

            // transform matrix to the vertex stage
            gl.uniform_matrix_4_f32_slice(
                self.matrix_location.as_ref(),
                false,
                &self.mvp.to_cols_array(),
            );

            gl.bind_vertex_array(Some(buffers.vertex_array));

            // vertex coordinates
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffers.position_buffer));
            gl.enable_vertex_attrib_array(position_location);
            gl.vertex_attrib_pointer_f32(
                position_location,
                geometry::POSITION_COMPONENTS,
                glow::FLOAT,
                false,
                0,
                0,
            );

            // texture coordinates
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffers.texcoord_buffer));
            gl.enable_vertex_attrib_array(texcoord_location);
            gl.vertex_attrib_pointer_f32(
                texcoord_location,
                geometry::TEXCOORD_COMPONENTS,
                glow::FLOAT,
                false,
                0,
                0,
            );

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.draw_elements(
                glow::TRIANGLES,
                geometry::FAN_INDICES.len() as i32,
                glow::UNSIGNED_SHORT,
                0,
            );

            // no attribute state is carried across frames
            gl.disable_vertex_attrib_array(position_location);
            gl.disable_vertex_attrib_array(texcoord_location);
        }
    }

    fn on_surface_destroyed(&mut self, gl: &glow::Context) {
        self.release_gpu_resources(gl);
    }
}

/// Compiles one shader stage, reporting the info log on failure.
fn compile_shader(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::NativeShader> {
    unsafe {
        let shader = gl.create_shader(stage).into_app_error("create shader")?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(AppError::Gl(log, "compile shader"));
        }

        Ok(shader)
    }
}

/// Compiles both stages and links them, reporting the info log on failure.
fn build_program(gl: &glow::Context, vertex_source: &str, fragment_source: &str) -> Result<glow::NativeProgram> {
    let vertex_shader = compile_shader(gl, glow::VERTEX_SHADER, vertex_source)?;
    let fragment_shader = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_source) {
        Ok(shader) => shader,
        Err(e) => {
            unsafe { gl.delete_shader(vertex_shader) };
            return Err(e);
        }
    };

    unsafe {
        let program = gl.create_program().into_app_error("create program")?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        // linked programs keep no reference to the stage objects
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(AppError::Gl(log, "link program"));
        }

        Ok(program)
    }
}

/// Uploads the fixed fan geometry into static GPU buffers.
fn upload_geometry(gl: &glow::Context) -> Result<GeometryBuffers> {
    unsafe {
        let vertex_array = gl.create_vertex_array().into_app_error("create vertex array")?;
        gl.bind_vertex_array(Some(vertex_array));

        let position_buffer = gl.create_buffer().into_app_error("create position buffer")?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(geometry::POSITION_VERTICES.as_slice()),
            glow::STATIC_DRAW,
        );

        let texcoord_buffer = gl.create_buffer().into_app_error("create texcoord buffer")?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(texcoord_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(geometry::TEXTURE_COORDS.as_slice()),
            glow::STATIC_DRAW,
        );

        // the index binding is recorded in the vertex array object
        let index_buffer = gl.create_buffer().into_app_error("create index buffer")?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(geometry::FAN_INDICES.as_slice()),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GeometryBuffers {
            vertex_array,
            position_buffer,
            texcoord_buffer,
            index_buffer,
        })
    }
}

/// Decodes the bundled picture and uploads it as a mipmapped 2D texture.
/// The decoded pixel buffer is dropped as soon as the upload returns; only
/// the dimensions are reported back.
fn load_texture(gl: &glow::Context, encoded: &[u8]) -> Result<(glow::NativeTexture, (u32, u32))> {
    let decoded = image::load_from_memory(encoded)?.to_rgba8();
    let (width, height) = decoded.dimensions();

    unsafe {
        let texture = gl.create_texture().into_app_error("create texture")?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            width as i32,
            height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(decoded.as_raw().as_slice())),
        );

        gl.generate_mipmap(glow::TEXTURE_2D);
        gl.bind_texture(glow::TEXTURE_2D, None);

        // GPU owns the pixels now
        drop(decoded);

        Ok((texture, (width, height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_shader_declares_the_expected_interface() {
        assert!(VERTEX_SHADER_SOURCE.starts_with("#version 300 es"));
        assert!(VERTEX_SHADER_SOURCE.contains("uniform mat4 uMatrix"));
        assert!(VERTEX_SHADER_SOURCE.contains("in vec3 vPosition"));
        assert!(VERTEX_SHADER_SOURCE.contains("in vec2 aTextCoord"));
    }

    #[test]
    fn fragment_shader_samples_a_2d_texture() {
        assert!(FRAGMENT_SHADER_SOURCE.starts_with("#version 300 es"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("sampler2D"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("texture("));
    }

    #[test]
    fn bundled_picture_decodes_to_rgba8() {
        let decoded = image::load_from_memory(PICTURE_BYTES)
            .expect("bundled picture must decode")
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        assert!(width > 0 && height > 0);
        assert_eq!(decoded.as_raw().len(), (width * height * 4) as usize);
    }

    #[test]
    fn renderer_starts_with_no_gpu_objects() {
        let renderer = GlesRenderer::default();
        assert!(renderer.program.is_none());
        assert!(renderer.geometry.is_none());
        assert!(renderer.texture.is_none());
        assert!(renderer.image_size.is_none());
        assert_eq!(renderer.mvp, Mat4::IDENTITY);
    }
}
