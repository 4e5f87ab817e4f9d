use rustfft::{FftPlanner, num_complex::Complex};

/// Per-block loudness summary handed to plotters and the flash field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockEnergy {
    /// Root-mean-square level of the block.
    pub rms: f64,
    /// Spectrum magnitudes (binned when the provider was asked for bins).
    pub spectrum: Option<Vec<f64>>,
}

impl BlockEnergy {
    pub fn silent() -> Self {
        Self::default()
    }

    /// Index of the strongest spectrum bin; `None` without a spectrum or when it is all zero.
    pub fn peak_bin(&self) -> Option<usize> {
        let spectrum = self.spectrum.as_deref()?;
        let (idx, max) = spectrum
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .fold((0, 0.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });
        (max > 0.0).then_some(idx)
    }
}

/// Source of [`BlockEnergy`] for a block of samples.
pub trait EnergyProvider {
    fn analyze(&mut self, block: &[f32]) -> BlockEnergy;
}

/// RMS plus an FFT magnitude spectrum, optionally summed into `bins` groups.
pub struct FftEnergy {
    bins: Option<usize>,
    with_spectrum: bool,
    planner: FftPlanner<f64>,
}

impl std::fmt::Debug for FftEnergy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftEnergy")
            .field("bins", &self.bins)
            .field("with_spectrum", &self.with_spectrum)
            .finish_non_exhaustive()
    }
}

impl FftEnergy {
    /// Provider computing the full half-spectrum, or `bins` grouped sums of it.
    pub fn new(bins: Option<usize>) -> Self {
        Self {
            bins,
            with_spectrum: true,
            planner: FftPlanner::new(),
        }
    }

    /// Provider that only computes RMS.
    pub fn rms_only() -> Self {
        Self {
            bins: None,
            with_spectrum: false,
            planner: FftPlanner::new(),
        }
    }
}

impl EnergyProvider for FftEnergy {
    fn analyze(&mut self, block: &[f32]) -> BlockEnergy {
        let spectrum = self
            .with_spectrum
            .then(|| spectrum_with(&mut self.planner, block, self.bins));
        BlockEnergy {
            rms: rms(block),
            spectrum,
        }
    }
}

/// Root-mean-square level; `0.0` for an empty block.
pub fn rms(block: &[f32]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let sum: f64 = block.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / block.len() as f64).sqrt()
}

/// `2/N * |FFT|` over the first `N/2` bins.
///
/// With `bins`, the half-spectrum is split into `bins` groups of `(N/2) / bins` consecutive
/// magnitudes and each group is summed; trailing magnitudes that do not fill a group are
/// dropped.
pub fn spectrum(block: &[f32], bins: Option<usize>) -> Vec<f64> {
    spectrum_with(&mut FftPlanner::new(), block, bins)
}

fn spectrum_with(planner: &mut FftPlanner<f64>, block: &[f32], bins: Option<usize>) -> Vec<f64> {
    let n = block.len();
    if n == 0 {
        return vec![0.0; bins.unwrap_or(0)];
    }

    let mut buf: Vec<Complex<f64>> = block
        .iter()
        .map(|&s| Complex::new(f64::from(s), 0.0))
        .collect();
    planner.plan_fft_forward(n).process(&mut buf);

    let norm = 2.0 / n as f64;
    let half: Vec<f64> = buf[..n / 2].iter().map(|c| c.norm() * norm).collect();

    match bins {
        None => half,
        Some(0) => Vec::new(),
        Some(bins) => {
            let rel = half.len() / bins;
            (0..bins)
                .map(|i| half[i * rel..(i + 1) * rel].iter().sum())
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/energy.rs"]
mod tests;
