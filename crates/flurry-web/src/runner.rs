use flurry::bridge::protocol::FrameLayout;
use flurry::{
    start, AnimationDriver, FieldError, FieldScene, FrameReport, LatestSlot, ParticleField,
    PerspectiveCamera, SceneConfig, TickError, Viewport,
};
use glam::Vec2;

/// Generic runner that wires a scene to the browser frame loop.
///
/// Each concrete demo (e.g., `wave-cloud`) creates a `thread_local!` FieldRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct FieldRunner<S: FieldScene> {
    scene: S,
    config: SceneConfig,
    driver: Option<AnimationDriver<S::Motion>>,
    camera: PerspectiveCamera,
    viewport: LatestSlot<Viewport>,
    layout: FrameLayout,
    /// Header + sections, read by the host as one Float32Array view.
    frame_buffer: Vec<f32>,
}

impl<S: FieldScene> FieldRunner<S> {
    pub fn new(scene: S) -> Self {
        let config = scene.config();
        let viewport = Viewport::default();
        let camera = PerspectiveCamera::from_config(&config.camera, viewport.aspect());
        Self {
            scene,
            config,
            driver: None,
            camera,
            viewport: LatestSlot::new(viewport),
            layout: FrameLayout::new(0, false, false),
            frame_buffer: Vec::new(),
        }
    }

    /// Build the field with the scene's own config.
    pub fn init(&mut self) -> Result<(), FieldError> {
        let config = self.scene.config();
        self.start_with(config)
    }

    /// Build the field with a JSON patch over the scene's config.
    pub fn init_with_json(&mut self, json: &str) -> Result<(), FieldError> {
        let config = self.scene.config().merge_json(json)?;
        self.start_with(config)
    }

    /// Build the field with a host-chosen particle count.
    pub fn init_with_count(&mut self, count: i64) -> Result<(), FieldError> {
        let particle_count = ParticleField::checked_count(count)?;
        let config = SceneConfig {
            particle_count,
            ..self.scene.config()
        };
        self.start_with(config)
    }

    fn start_with(&mut self, config: SceneConfig) -> Result<(), FieldError> {
        let driver = start(&mut self.scene, &config)?;
        self.layout = FrameLayout::for_field(driver.field());
        self.frame_buffer = self.layout.allocate(driver.field());
        self.camera = PerspectiveCamera::from_config(&config.camera, self.viewport.latest().aspect());
        self.config = config;
        self.driver = Some(driver);
        Ok(())
    }

    /// Record a pointer move in client coordinates.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let offset = self
            .viewport
            .latest()
            .normalize_pointer(Vec2::new(client_x, client_y), self.config.pointer_scale);
        self.pointer_offset(offset.x, offset.y);
    }

    /// Record a pointer offset the host already normalized.
    pub fn pointer_offset(&mut self, x: f32, y: f32) {
        if let Some(driver) = self.driver.as_mut() {
            driver.post_pointer(Vec2::new(x, y));
        }
    }

    /// Record a viewport size. Pointer moves use it at once; the camera picks it
    /// up at init or on the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.post(Viewport::new(width, height));
    }

    /// Run one frame: apply pending resize, advance the field, pack dirty sections.
    pub fn tick(&mut self, host_seconds: f64) -> Result<FrameReport, TickError> {
        let driver = self.driver.as_mut().ok_or(TickError::NotStarted)?;

        if let Some(vp) = self.viewport.take_fresh() {
            self.camera.resize(vp.width, vp.height);
        }

        let report = driver.tick(host_seconds)?;
        self.layout.pack(&mut self.frame_buffer, driver.field(), report.dirty);
        self.layout
            .write_header(&mut self.frame_buffer, &report, &driver.transform());
        Ok(report)
    }

    /// Stop the animation and release the field. Returns frames produced.
    pub fn teardown(&mut self) -> u64 {
        let frames = self.driver.as_mut().map_or(0, |d| d.teardown());
        self.driver = None;
        self.frame_buffer = Vec::new();
        self.layout = FrameLayout::new(0, false, false);
        frames
    }

    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.is_running())
    }

    pub fn driver(&self) -> Option<&AnimationDriver<S::Motion>> {
        self.driver.as_ref()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    // ---- Pointer accessors for Float32Array views ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.layout.count as u32
    }

    pub fn dirty_mask(&self) -> u32 {
        self.driver.as_ref().map_or(0, |d| d.dirty().bits())
    }

    /// Column-major model matrix of the field.
    pub fn model_matrix(&self) -> [f32; 16] {
        self.driver
            .as_ref()
            .map_or(glam::Mat4::IDENTITY, |d| d.transform().model_matrix())
            .to_cols_array()
    }

    /// Column-major view-projection matrix.
    pub fn view_projection(&self) -> [f32; 16] {
        self.camera.view_projection().to_cols_array()
    }
}
