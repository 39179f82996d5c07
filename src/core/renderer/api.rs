/// Contract between the windowing shell and a renderer backend.
///
/// The shell owns the GL context and hands a reference into every callback,
/// so a backend never outlives the context it renders with. Callbacks run
/// strictly sequentially on the event-loop thread.
pub trait SurfaceRenderer {
    /// The drawing surface (and its GL context) just came up. Create every
    /// GPU object here; fires again if the surface is recreated.
    fn on_surface_created(&mut self, gl: &glow::Context);

    /// The drawing surface was resized.
    fn on_surface_changed(&mut self, gl: &glow::Context, width: u32, height: u32);

    /// Draw one frame. Host-driven, fires continuously.
    fn on_draw_frame(&mut self, gl: &glow::Context);

    /// The surface is about to go away while the context is still current.
    fn on_surface_destroyed(&mut self, _gl: &glow::Context) {}
}
