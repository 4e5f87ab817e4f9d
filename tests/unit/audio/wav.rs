use std::io::Cursor;

use super::*;

fn wav_bytes_i16(channels: u16, frames: &[&[i16]]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut w = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for frame in frames {
            for &s in *frame {
                w.write_sample(s).unwrap();
            }
        }
        w.finalize().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn int_pcm_is_scaled_and_deinterleaved() {
    let bytes = wav_bytes_i16(2, &[&[16_384, -32_768], &[0, 8_192]]);
    let clip = load_wav_from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(clip.sample_rate, 8_000);
    assert_eq!(clip.channels, 2);
    assert_eq!(clip.samples[0], vec![0.5, 0.0]);
    assert_eq!(clip.samples[1], vec![-1.0, 0.25]);
    assert_eq!(clip.len_frames(), 2);
}

#[test]
fn float_pcm_passes_through() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut w = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for s in [0.25f32, -0.75, 0.5] {
            w.write_sample(s).unwrap();
        }
        w.finalize().unwrap();
    }
    let clip = load_wav_from_reader(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(clip.samples, vec![vec![0.25, -0.75, 0.5]]);
}

#[test]
fn malformed_input_is_an_audio_error() {
    let err = load_wav_from_reader(Cursor::new(b"not a wav file".to_vec())).unwrap_err();
    assert!(matches!(err, FlashError::Audio(_)));
}

#[test]
fn missing_file_is_an_audio_error() {
    let err = load_wav(Path::new("/definitely/not/here.wav")).unwrap_err();
    assert!(err.to_string().contains("audio error"));
}

#[test]
fn blocks_pad_the_tail_with_zeros() {
    let clip = AudioClip {
        sample_rate: 10,
        channels: 1,
        samples: vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
    };
    let blocks = clip.blocks(0, 2).unwrap();
    assert_eq!(blocks, vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 0.0]]);
    assert_eq!(clip.block_count(2), 3);
    assert!(clip.blocks(0, 0).is_err());
    assert!(clip.blocks(1, 2).is_err());
    assert_eq!(clip.seconds(), 0.5);
}
