use flurry::*;

/// Orbiting shell of points whose radius breathes over time.
pub struct PulseSphere {
    params: SphereParams,
}

impl PulseSphere {
    pub fn new() -> Self {
        Self {
            params: SphereParams::default(),
        }
    }
}

impl FieldScene for PulseSphere {
    type Motion = SphereMotion;

    fn config(&self) -> SceneConfig {
        SceneConfig::pulse_sphere()
    }

    fn build(&mut self, config: &SceneConfig) -> Result<(ParticleField, SphereMotion), FieldError> {
        let field = ParticleField::create(config.particle_count, SphereShellGenerator::new(config.seed))?;
        Ok((field, SphereMotion::new(self.params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_shell() {
        let mut scene = PulseSphere::new();
        let config = scene.config();
        let driver = start(&mut scene, &config).unwrap();
        assert_eq!(driver.field().count(), 2_000);
        assert!(driver.field().colors().is_none());
        assert!(driver.field().spins().is_some());
        assert!(config.controls.is_some());
    }

    #[test]
    fn radius_stays_in_pulse_band() {
        let mut scene = PulseSphere::new();
        let config = SceneConfig {
            particle_count: 50,
            ..scene.config()
        };
        let mut driver = start(&mut scene, &config).unwrap();
        for step in 0..20 {
            driver.tick(100.0 + step as f64 * 0.25).unwrap();
            for i in 0..driver.field().count() {
                let r = driver.field().position(i).length();
                assert!((1.7 - 1e-4..=2.3 + 1e-4).contains(&r), "radius {r}");
            }
        }
    }

    #[test]
    fn rejects_negative_count() {
        assert!(matches!(
            ParticleField::checked_count(-1),
            Err(FieldError::NegativeCount(-1))
        ));
    }
}
