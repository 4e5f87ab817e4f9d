use rand::{SeedableRng, rngs::StdRng};

use crate::{
    audio::energy::BlockEnergy,
    flash::{bolt::Flash, outline::Outline},
    foundation::core::Reflect,
    foundation::error::{FlashError, FlashResult},
    geometry::point::Point,
};

/// How block energy is turned into a walk step ("long legs").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// `step_scale * rms`.
    #[default]
    Linear,
    /// `step_scale * (e^rms - 1) / (e - 1)`: quiet blocks barely move, loud ones take long legs.
    Exponential,
}

impl StepPolicy {
    pub fn step_length(self, rms: f64, scale: f64, min_step: f64) -> f64 {
        let raw = match self {
            Self::Linear => scale * rms,
            Self::Exponential => scale * rms.exp_m1() / 1.0f64.exp_m1(),
        };
        if raw.is_finite() {
            raw.max(min_step)
        } else {
            min_step
        }
    }
}

/// Where a freshly spawned bolt is aimed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnTarget {
    /// Whichever canvas anchor (bottom-center or top-center) lies farther from the new start.
    #[default]
    Anchor,
    /// Height picked from the strongest of `bins` spectrum bins; low bins aim low.
    Spectrum { bins: usize },
}

/// Tunables for a [`FlashField`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    /// Retire radius around a bolt's target.
    pub perimeter: f64,
    /// Blend between randomness (0) and the audio bias (1).
    pub mix: f64,
    pub walks_per_frame: usize,
    pub step_scale: f64,
    pub step_policy: StepPolicy,
    pub min_step: f64,
    pub spawn: SpawnTarget,
    pub thickness: f64,
    /// Retired bolts kept for rendering, oldest dropped first.
    pub max_retired: usize,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            perimeter: 20.0,
            mix: 0.5,
            walks_per_frame: 8,
            step_scale: 120.0,
            step_policy: StepPolicy::Linear,
            min_step: 2.0,
            spawn: SpawnTarget::Anchor,
            thickness: 1.0,
            max_retired: 4,
            seed: 0,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> FlashResult<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(FlashError::validation(format!(
                "field canvas must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.mix) {
            return Err(FlashError::validation(format!(
                "mix must be in [0, 1], got {}",
                self.mix
            )));
        }
        for (name, v) in [
            ("perimeter", self.perimeter),
            ("step_scale", self.step_scale),
            ("min_step", self.min_step),
            ("thickness", self.thickness),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FlashError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        // The farther anchor is at least `height / 2` away from any respawn point.
        if self.perimeter > self.height * 0.5 {
            return Err(FlashError::validation(format!(
                "perimeter {} exceeds half the field height {}",
                self.perimeter, self.height
            )));
        }
        if self.walks_per_frame == 0 {
            return Err(FlashError::validation("walks_per_frame must be > 0"));
        }
        if let SpawnTarget::Spectrum { bins: 0 } = self.spawn {
            return Err(FlashError::validation("spectrum spawn needs at least one bin"));
        }
        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> FlashResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| FlashError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &std::path::Path) -> FlashResult<Self> {
        use anyhow::Context as _;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read field config '{}'", path.display()))?;
        Self::from_json(&json)
    }
}

/// What a single [`FlashField::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStep {
    Walked,
    Respawned,
}

/// Driver that keeps one bolt growing and replaces it once it reaches its target.
#[derive(Debug)]
pub struct FlashField {
    cfg: FieldConfig,
    rng: StdRng,
    active: Flash,
    retired: Vec<Flash>,
    spawned: u64,
}

impl FlashField {
    pub fn new(cfg: FieldConfig) -> FlashResult<Self> {
        cfg.validate()?;
        let rng = StdRng::seed_from_u64(cfg.seed);
        let active = Flash::new(cfg.width, cfg.height);
        Ok(Self {
            cfg,
            rng,
            active,
            retired: Vec::new(),
            spawned: 1,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn active(&self) -> &Flash {
        &self.active
    }

    pub fn retired(&self) -> &[Flash] {
        &self.retired
    }

    /// Bolts spawned so far, including the active one.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Either retire a spent bolt and spawn its successor, or grow the active bolt by one node.
    pub fn step(&mut self, energy: &BlockEnergy, data: f64) -> FieldStep {
        if self.active.is_spent(self.cfg.perimeter) {
            self.respawn(energy);
            return FieldStep::Respawned;
        }

        let length = self
            .cfg
            .step_policy
            .step_length(energy.rms, self.cfg.step_scale, self.cfg.min_step);
        self.active
            .random_walk(&mut self.rng, length, data, self.cfg.mix);
        FieldStep::Walked
    }

    /// Spend one frame's walk budget.
    ///
    /// Step `k` is biased by the sample at `k * len / walks_per_frame`, sign-flipped by the
    /// channel's horizontal reflection.
    #[tracing::instrument(level = "trace", skip(self, block, energy))]
    pub fn advance_frame(&mut self, block: &[f32], energy: &BlockEnergy, reflect: Reflect) {
        let walks = self.cfg.walks_per_frame;
        for k in 0..walks {
            let data = if block.is_empty() {
                0.0
            } else {
                f64::from(block[k * block.len() / walks]) * reflect.sx()
            };
            self.step(energy, data);
        }
    }

    /// Outlines of the retired bolts (oldest first) followed by the active bolt.
    pub fn outlines(&self) -> Vec<Outline> {
        self.retired
            .iter()
            .chain(std::iter::once(&self.active))
            .map(|f| f.outline(self.cfg.thickness))
            .collect()
    }

    fn respawn(&mut self, energy: &BlockEnergy) {
        let start = self
            .active
            .current_point()
            .clamp(self.cfg.width, self.cfg.height);
        let end = self.spawn_target(start, energy);
        let next = Flash::with_endpoints(self.cfg.width, self.cfg.height, start, end);
        let spent = std::mem::replace(&mut self.active, next);
        tracing::debug!(
            nodes = spent.nodes().len(),
            end_x = end.x,
            end_y = end.y,
            "bolt retired"
        );

        self.retired.push(spent);
        if self.retired.len() > self.cfg.max_retired {
            let excess = self.retired.len() - self.cfg.max_retired;
            self.retired.drain(..excess);
        }
        self.spawned += 1;
    }

    fn spawn_target(&self, start: Point, energy: &BlockEnergy) -> Point {
        let (w, h) = (self.cfg.width, self.cfg.height);
        let cx = w * 0.5;
        if let SpawnTarget::Spectrum { bins } = self.cfg.spawn
            && let Some(peak) = energy.peak_bin()
        {
            let y = h * (1.0 - (peak.min(bins - 1) as f64 + 0.5) / bins as f64);
            let target = Point::new(cx, y);
            // A target inside the retire radius would be spent before it ever walks.
            if !start.within_perimeter(target, self.cfg.perimeter) {
                return target;
            }
        }

        let bottom = Point::new(cx, h);
        let top = Point::new(cx, 0.0);
        if start.distance(bottom) >= start.distance(top) {
            bottom
        } else {
            top
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flash/field.rs"]
mod tests;
