//! Audio input: WAV decoding, block chunking and per-block energy analysis.

pub(crate) mod energy;
pub(crate) mod wav;
