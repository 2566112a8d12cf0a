use flurry::*;

/// Full-screen cloud of colored points riding a travelling wave.
pub struct WaveCloud {
    params: WaveParams,
}

impl WaveCloud {
    pub fn new() -> Self {
        Self {
            params: WaveParams::default(),
        }
    }
}

impl FieldScene for WaveCloud {
    type Motion = WaveMotion;

    fn config(&self) -> SceneConfig {
        SceneConfig::wave_cloud()
    }

    fn build(&mut self, config: &SceneConfig) -> Result<(ParticleField, WaveMotion), FieldError> {
        let field = ParticleField::create(config.particle_count, WaveCloudGenerator::new(config.seed))?;
        Ok((field, WaveMotion::new(self.params)))
    }
}
