use std::path::Path;

use crate::foundation::error::{FlashError, FlashResult};

/// Decoded audio, one `Vec<f32>` per channel, samples in `[-1, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<Vec<f32>>,
}

impl AudioClip {
    /// Sample frames per channel.
    pub fn len_frames(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    pub fn seconds(&self) -> f64 {
        self.len_frames() as f64 / f64::from(self.sample_rate)
    }

    pub fn channel(&self, channel: usize) -> FlashResult<&[f32]> {
        self.samples.get(channel).map(Vec::as_slice).ok_or_else(|| {
            FlashError::validation(format!(
                "channel {channel} out of range ({} channels)",
                self.channels
            ))
        })
    }

    /// Consecutive `block_size` blocks of one channel; the last block is zero-padded.
    pub fn blocks(&self, channel: usize, block_size: usize) -> FlashResult<Vec<Vec<f32>>> {
        if block_size == 0 {
            return Err(FlashError::validation("block size must be > 0"));
        }
        Ok(self
            .channel(channel)?
            .chunks(block_size)
            .map(|chunk| {
                let mut block = chunk.to_vec();
                block.resize(block_size, 0.0);
                block
            })
            .collect())
    }

    /// Number of blocks [`Self::blocks`] yields for `block_size`.
    pub fn block_count(&self, block_size: usize) -> usize {
        if block_size == 0 {
            return 0;
        }
        self.len_frames().div_ceil(block_size)
    }
}

/// Load a WAV file and convert it to per-channel floats.
///
/// Integer PCM is scaled by `2^(bits - 1)`; float PCM is passed through.
#[tracing::instrument]
pub fn load_wav(path: &Path) -> FlashResult<AudioClip> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| FlashError::audio(format!("open wav '{}': {e}", path.display())))?;
    decode(reader)
}

/// Decode WAV data from any reader (used for in-memory input).
pub fn load_wav_from_reader<R: std::io::Read>(reader: R) -> FlashResult<AudioClip> {
    let reader =
        hound::WavReader::new(reader).map_err(|e| FlashError::audio(format!("read wav: {e}")))?;
    decode(reader)
}

fn decode<R: std::io::Read>(reader: hound::WavReader<R>) -> FlashResult<AudioClip> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(FlashError::audio("wav declares zero channels"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| FlashError::audio(format!("decode float samples: {e}")))?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / f64::from(1u32 << (spec.bits_per_sample.clamp(1, 32) - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (f64::from(v) * scale) as f32))
                .collect::<Result<_, _>>()
                .map_err(|e| FlashError::audio(format!("decode int samples: {e}")))?
        }
    };

    let channels = usize::from(spec.channels);
    let mut samples = vec![Vec::with_capacity(interleaved.len() / channels); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (dst, &s) in samples.iter_mut().zip(frame) {
            dst.push(s);
        }
    }

    tracing::debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        frames = samples[0].len(),
        "decoded wav"
    );

    Ok(AudioClip {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/wav.rs"]
mod tests;
