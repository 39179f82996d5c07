// src/app.rs

use crate::core::renderer::api::SurfaceRenderer;
use crate::core::renderer::capability;
use crate::error::{AppError, Result};

use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    raw_window_handle::HasWindowHandle,
    window::{Window, WindowAttributes, WindowId},
};

/// Everything tied to one live drawing surface.
struct GlSurfaceState {
    window: Window,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    gl: glow::Context,
}

impl GlSurfaceState {
    /// Window + display + ES 3.0 context + surface, made current, with glow
    /// loading through the display's proc-address lookup.
    fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let window_attributes = WindowAttributes::default()
            .with_title("Lynx Viewer")
            .with_inner_size(LogicalSize::new(960.0, 720.0));

        // RGBA8 with a 16-bit depth buffer, no stencil
        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(16)
            .with_stencil_size(0);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
        let (window, gl_config) = display_builder
            .build(event_loop, template, |mut configs| {
                configs.next().expect("at least one matching GL config")
            })
            .map_err(|e| AppError::Gl(e.to_string(), "create window and GL display"))?;
        let window = window.ok_or_else(|| {
            AppError::Gl("display builder produced no window".into(), "create window")
        })?;

        let raw_window_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| AppError::Gl(e.to_string(), "query window handle"))?;

        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(Some(raw_window_handle));
        let not_current_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes) }?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| AppError::Gl(e.to_string(), "build surface attributes"))?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }?;

        let gl_context = not_current_context.make_current(&gl_surface)?;

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        Ok(Self {
            window,
            gl_surface,
            gl_context,
            gl,
        })
    }
}

pub struct App<R: SurfaceRenderer + Default> {
    renderer: R,
    surface: Option<GlSurfaceState>,
}

impl<R: SurfaceRenderer + Default> ApplicationHandler for App<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        let state = match GlSurfaceState::new(event_loop) {
            Ok(state) => state,
            Err(e) => {
                // a refused ES 3.0 context is the same startup failure as an
                // unmet version report
                error!("failed to bring up a GL surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let reported = capability::reported_version(&state.gl);
        info!("detected GL version: {reported:#x}");
        if !capability::supports_minimum(reported) {
            error!("OpenGL ES 3.0 not supported (got {reported:#x}), exiting");
            event_loop.exit();
            return;
        }
        info!("🎉 GL context ready");

        self.renderer.on_surface_created(&state.gl);

        // the surface comes up at its initial size without a Resized event
        let size = state.window.inner_size();
        self.renderer.on_surface_changed(&state.gl, size.width, size.height);

        state.window.request_redraw();
        self.surface = Some(state);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // the host is taking the surface away; a later resume recreates it
        if let Some(state) = self.surface.take() {
            self.renderer.on_surface_destroyed(&state.gl);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let Some(state) = self.surface.as_ref() else {
                    return;
                };
                let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return; // minimized
                };
                state.gl_surface.resize(&state.gl_context, width, height);
                self.renderer.on_surface_changed(&state.gl, size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let Some(state) = self.surface.as_ref() else {
                    return;
                };
                self.renderer.on_draw_frame(&state.gl);
                if let Err(e) = state.gl_surface.swap_buffers(&state.gl_context) {
                    warn!("swap_buffers failed: {e}");
                }
                // continuous rendering: queue the next frame right away
                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

impl<R: SurfaceRenderer + Default> App<R> {
    pub fn run() -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            renderer: R::default(),
            surface: None,
        };
        event_loop.run_app(&mut app)?;

        // release GPU objects while the context is still alive
        if let Some(state) = app.surface.take() {
            app.renderer.on_surface_destroyed(&state.gl);
        }
        Ok(())
    }
}
