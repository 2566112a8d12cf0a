use wasm_bindgen::prelude::*;

mod cloud;
use cloud::WaveCloud;

flurry_web::export_field!(WaveCloud, "wave-cloud");
