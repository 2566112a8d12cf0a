use wasm_bindgen::prelude::*;

mod sphere;
use sphere::PulseSphere;

flurry_web::export_field!(PulseSphere, "pulse-sphere");
