use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::bit_depth::BitDepth;
use crate::waveform::domain::waveform_error::WaveformError;
use crate::waveform::domain::waveform_reader::WaveformReader;

/// Decodes PCM WAV files using `hound`.
///
/// Integer samples are scaled onto [-1.0, 1.0) by a power of two, so the
/// conversion is lossless and a rewrite at the same bit depth reproduces
/// the original sample values exactly. Chunks other than `fmt ` and `data`
/// are skipped.
pub struct WavFileReader;

impl WavFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WavFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformReader for WavFileReader {
    fn read(&self, path: &Path) -> Result<AudioBuffer, WaveformError> {
        log::debug!("Reading {}", path.display());

        let file = File::open(path).map_err(|e| WaveformError::from_io(path, e))?;
        let metadata = file.metadata().map_err(|e| WaveformError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(WaveformError::unsupported(path, "not a regular file"));
        }

        // Past this point the file exists and is readable, so any failure
        // means the contents are not a PCM WAV stream we can decode.
        let reader = hound::WavReader::new(BufReader::new(file))
            .map_err(|e| WaveformError::unsupported(path, format!("invalid header: {e}")))?;
        let spec = reader.spec();
        let bit_depth = BitDepth::from_bits(
            spec.bits_per_sample,
            spec.sample_format == hound::SampleFormat::Float,
        )
        .ok_or_else(|| {
            WaveformError::unsupported(
                path,
                format!(
                    "{}-bit {:?} samples are not supported",
                    spec.bits_per_sample, spec.sample_format
                ),
            )
        })?;

        let declared = reader.len() as usize;
        let samples = decode_samples(reader, bit_depth).map_err(|e| {
            WaveformError::unsupported(path, format!("truncated or corrupt data: {e}"))
        })?;
        if samples.len() != declared {
            return Err(WaveformError::unsupported(
                path,
                format!(
                    "truncated data: header declares {declared} samples, found {}",
                    samples.len()
                ),
            ));
        }

        let audio = AudioBuffer::from_interleaved(samples, spec.channels, spec.sample_rate, bit_depth)
            .map_err(|e| WaveformError::unsupported(path, e.to_string()))?;
        report(path, &audio);
        Ok(audio)
    }
}

fn decode_samples<R: io::Read>(
    reader: hound::WavReader<R>,
    bit_depth: BitDepth,
) -> hound::Result<Vec<f64>> {
    if bit_depth.is_float() {
        reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect()
    } else {
        let scale = bit_depth.full_scale();
        reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| f64::from(v) / scale))
            .collect()
    }
}

fn report(path: &Path, audio: &AudioBuffer) {
    let data_size = audio.data_size();
    log::info!("File information for {}:", path.display());
    log::info!("  Sample rate:      {} Hz", audio.sample_rate());
    log::info!("  Bits per sample:  {}", audio.bit_depth().bits());
    log::info!("  Bit rate:         {} bps", audio.bit_rate());
    log::info!(
        "  Data size:        {data_size} ({:.2} MiB)",
        data_size as f64 / (1024.0 * 1024.0)
    );
    log::info!("  Frames:           {}", audio.frames());
    log::info!("  Channels:         {}", audio.channels());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::fs;

    fn write_int_wav(path: &Path, bits: u16, channels: u16, samples: &[i32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: bits,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    /// Minimal RIFF/WAVE file with a hand-built header.
    fn raw_wav(format_tag: u16, bits: u16, extra_chunk: bool, data: &[u8], declared: u32) -> Vec<u8> {
        let channels: u16 = 1;
        let rate: u32 = 8000;
        let block_align = channels * bits / 8;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&format_tag.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&(rate * block_align as u32).to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&bits.to_le_bytes());
        if extra_chunk {
            bytes.extend_from_slice(b"LIST");
            bytes.extend_from_slice(&4u32.to_le_bytes());
            bytes.extend_from_slice(b"INFO");
        }
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&declared.to_le_bytes());
        bytes.extend_from_slice(data);
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
        bytes
    }

    #[test]
    fn test_read_stereo_16_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.wav");
        write_int_wav(&path, 16, 2, &[16384, -16384, 32767, -32768, 0, 1]);

        let audio = WavFileReader::new().read(&path).unwrap();
        assert_eq!(audio.sample_rate(), 44100);
        assert_eq!(audio.channels(), 2);
        assert_eq!(audio.bit_depth(), BitDepth::Int16);
        assert_eq!(audio.frames(), 3);
        assert_eq!(audio.channel(0).unwrap().to_vec(), vec![0.5, 32767.0 / 32768.0, 0.0]);
        assert_eq!(audio.channel(1).unwrap().to_vec(), vec![-0.5, -1.0, 1.0 / 32768.0]);
    }

    #[rstest]
    #[case(8, 127)]
    #[case(16, 32767)]
    #[case(24, 8_388_607)]
    #[case(32, i32::MAX)]
    fn test_read_integer_depths(#[case] bits: u16, #[case] max: i32) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depth.wav");
        write_int_wav(&path, bits, 1, &[max, -max - 1, 0]);

        let audio = WavFileReader::new().read(&path).unwrap();
        assert_eq!(audio.bit_depth().bits(), bits);
        let channel = audio.channel(0).unwrap();
        assert!(channel[0] < 1.0);
        assert_relative_eq!(channel[0], 1.0, epsilon = 0.01);
        assert_eq!(channel[1], -1.0);
        assert_eq!(channel[2], 0.0);
    }

    #[test]
    fn test_read_float_32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [0.25f32, -0.75, 1.5] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let audio = WavFileReader::new().read(&path).unwrap();
        assert_eq!(audio.bit_depth(), BitDepth::Float32);
        assert_eq!(audio.channel(0).unwrap().to_vec(), vec![0.25, -0.75, 1.5]);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.wav");
        let data: Vec<u8> = [100i16, -100].iter().flat_map(|s| s.to_le_bytes()).collect();
        fs::write(&path, raw_wav(1, 16, true, &data, data.len() as u32)).unwrap();

        let audio = WavFileReader::new().read(&path).unwrap();
        assert_eq!(audio.frames(), 2);
        assert_eq!(audio.channel(0).unwrap()[0], 100.0 / 32768.0);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.wav");
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::FileNotFound { .. }));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_not_a_wav_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.wav");
        fs::write(&path, b"ID3\x03\x00 definitely an mp3 file, not a riff container").unwrap();
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_empty_file_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        fs::write(&path, b"").unwrap();
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_compressed_codec_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adpcm.wav");
        // Format tag 2 is Microsoft ADPCM.
        fs::write(&path, raw_wav(2, 16, false, &[0u8; 8], 8)).unwrap();
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_directory_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let err = WavFileReader::new().read(dir.path()).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
        assert_eq!(err.path(), dir.path());
    }

    #[test]
    fn test_corrupt_header_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.wav");
        // RIFF/WAVE magic followed by nothing.
        fs::write(&path, b"RIFF\x04\x00\x00\x00WAVE").unwrap();
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_truncated_data_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.wav");
        // Header claims 400 bytes of samples but only 4 follow.
        fs::write(&path, raw_wav(1, 16, false, &[0u8; 4], 400)).unwrap();
        let err = WavFileReader::new().read(&path).unwrap_err();
        assert!(matches!(err, WaveformError::UnsupportedFormat { .. }));
    }
}
