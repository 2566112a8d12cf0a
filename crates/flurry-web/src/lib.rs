pub mod runner;

pub use flurry;
pub use runner::FieldRunner;

/// Generate all `#[wasm_bindgen]` exports for a particle scene.
///
/// Generates:
/// - `thread_local!` storage for the FieldRunner
/// - `field_init*` entry points that take the host's initial viewport size
/// - `with_runner()` helper that fails with a `JsError` before `field_init()`
/// - wasm-bindgen exports for lifecycle, host callbacks and buffer access
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod cloud;
/// use cloud::WaveCloud;
///
/// flurry_web::export_field!(WaveCloud, "wave-cloud");
/// ```
///
/// # Arguments
///
/// - `$scene_type`: a type implementing `flurry::FieldScene` with a `new()` constructor
/// - `$scene_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_field {
    ($scene_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::FieldRunner<$scene_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::FieldRunner<$scene_type>) -> R,
        ) -> Result<R, JsError> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .ok_or_else(|| JsError::new("Field not initialized. Call field_init() first."))?;
                Ok(f(runner))
            })
        }

        fn install_runner(
            viewport_width: f32,
            viewport_height: f32,
            init: impl FnOnce(&mut $crate::FieldRunner<$scene_type>) -> Result<(), $crate::flurry::FieldError>,
        ) -> Result<(), JsError> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::FieldRunner::new(<$scene_type>::new());
            runner.resize(viewport_width, viewport_height);
            init(&mut runner).map_err(|e| JsError::new(&e.to_string()))?;
            let count = runner.particle_count();

            RUNNER.with(|cell| {
                if let Some(mut old) = cell.borrow_mut().replace(runner) {
                    old.teardown();
                }
            });
            log::info!("{}: initialized with {} particles", $scene_name, count);
            Ok(())
        }

        /// Start with the scene's default config. Pass the live window size;
        /// pointer moves are normalized against it until `field_resize`.
        #[wasm_bindgen]
        pub fn field_init(viewport_width: f32, viewport_height: f32) -> Result<(), JsError> {
            install_runner(viewport_width, viewport_height, |r| r.init())
        }

        /// Start with a JSON patch over the scene's default config.
        #[wasm_bindgen]
        pub fn field_init_with_config(
            viewport_width: f32,
            viewport_height: f32,
            json: &str,
        ) -> Result<(), JsError> {
            install_runner(viewport_width, viewport_height, |r| r.init_with_json(json))
        }

        #[wasm_bindgen]
        pub fn field_init_with_count(
            viewport_width: f32,
            viewport_height: f32,
            count: i32,
        ) -> Result<(), JsError> {
            install_runner(viewport_width, viewport_height, |r| {
                r.init_with_count(i64::from(count))
            })
        }

        /// Advance one frame. Returns the dirty mask for this frame.
        #[wasm_bindgen]
        pub fn field_tick(host_seconds: f64) -> Result<u32, JsError> {
            with_runner(|r| r.tick(host_seconds))?
                .map(|report| report.dirty.bits())
                .map_err(|e| JsError::new(&e.to_string()))
        }

        #[wasm_bindgen]
        pub fn field_pointer_move(client_x: f32, client_y: f32) -> Result<(), JsError> {
            with_runner(|r| r.pointer_move(client_x, client_y))
        }

        #[wasm_bindgen]
        pub fn field_pointer_offset(x: f32, y: f32) -> Result<(), JsError> {
            with_runner(|r| r.pointer_offset(x, y))
        }

        #[wasm_bindgen]
        pub fn field_resize(width: f32, height: f32) -> Result<(), JsError> {
            with_runner(|r| r.resize(width, height))
        }

        /// Stop the animation and drop the runner. Safe to call more than once.
        #[wasm_bindgen]
        pub fn field_teardown() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                let frames = runner.teardown();
                log::info!("{}: torn down after {} frames", $scene_name, frames);
            }
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> Result<*const f32, JsError> {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> Result<u32, JsError> {
            with_runner(|r| r.frame_len())
        }

        #[wasm_bindgen]
        pub fn get_particle_count() -> Result<u32, JsError> {
            with_runner(|r| r.particle_count())
        }

        #[wasm_bindgen]
        pub fn get_dirty_mask() -> Result<u32, JsError> {
            with_runner(|r| r.dirty_mask())
        }

        #[wasm_bindgen]
        pub fn get_model_matrix() -> Result<js_sys::Float32Array, JsError> {
            with_runner(|r| js_sys::Float32Array::from(&r.model_matrix()[..]))
        }

        #[wasm_bindgen]
        pub fn get_view_projection() -> Result<js_sys::Float32Array, JsError> {
            with_runner(|r| js_sys::Float32Array::from(&r.view_projection()[..]))
        }

        /// Effective config (camera, material, renderer) as JSON.
        #[wasm_bindgen]
        pub fn get_config_json() -> Result<String, JsError> {
            with_runner(|r| r.config().to_json())?.map_err(|e| JsError::new(&e.to_string()))
        }
    };
}
