use ndarray::{Array2, ArrayView1, ArrayViewMut2};
use thiserror::Error;

use super::bit_depth::BitDepth;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("audio must have at least one channel")]
    NoChannels,
    #[error("{0} channels exceeds the WAV limit of 65535")]
    TooManyChannels(usize),
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    RaggedChannels {
        channel: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{len} interleaved samples do not divide into {channels} channels")]
    PartialFrame { len: usize, channels: u16 },
}

/// Decoded PCM audio.
///
/// Samples are normalized to [-1.0, 1.0) and stored as a `(frames, channels)`
/// matrix, so every channel always has the same length. Sample rate, channel
/// count and bit depth are fixed at construction; only sample values can be
/// modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    samples: Array2<f64>,
    sample_rate: u32,
    bit_depth: BitDepth,
}

impl AudioBuffer {
    /// Builds a buffer from frame-interleaved samples (`L R L R ...`).
    pub fn from_interleaved(
        samples: Vec<f64>,
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
    ) -> Result<Self, BufferError> {
        Self::check_format(channels as usize, sample_rate)?;
        let len = samples.len();
        let width = channels as usize;
        if len % width != 0 {
            return Err(BufferError::PartialFrame { len, channels });
        }
        let samples = Array2::from_shape_vec((len / width, width), samples)
            .map_err(|_| BufferError::PartialFrame { len, channels })?;
        Ok(Self {
            samples,
            sample_rate,
            bit_depth,
        })
    }

    /// Builds a buffer from one sample vector per channel.
    pub fn from_channels(
        channels: Vec<Vec<f64>>,
        sample_rate: u32,
        bit_depth: BitDepth,
    ) -> Result<Self, BufferError> {
        Self::check_format(channels.len(), sample_rate)?;
        let expected = channels[0].len();
        if let Some((channel, samples)) = channels
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != expected)
        {
            return Err(BufferError::RaggedChannels {
                channel,
                expected,
                actual: samples.len(),
            });
        }
        let samples = Array2::from_shape_fn((expected, channels.len()), |(frame, channel)| {
            channels[channel][frame]
        });
        Ok(Self {
            samples,
            sample_rate,
            bit_depth,
        })
    }

    fn check_format(channels: usize, sample_rate: u32) -> Result<(), BufferError> {
        if channels == 0 {
            return Err(BufferError::NoChannels);
        }
        if channels > u16::MAX as usize {
            return Err(BufferError::TooManyChannels(channels));
        }
        if sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }
        Ok(())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.samples.ncols() as u16
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn channel(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.samples.ncols()).then(|| self.samples.column(index))
    }

    /// The `(frames, channels)` sample matrix.
    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    /// Mutable view of the samples; the shape cannot change through it.
    pub fn samples_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.samples.view_mut()
    }

    /// Samples in frame-interleaved order, as stored in a WAV data chunk.
    pub fn interleaved(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Size in bytes of the encoded sample data at this buffer's bit depth.
    pub fn data_size(&self) -> usize {
        self.samples.len() * self.bit_depth.bytes_per_sample()
    }

    /// Encoded bits per second across all channels.
    pub fn bit_rate(&self) -> u64 {
        self.bit_depth.bits() as u64 * self.sample_rate as u64 * self.channels() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_interleaved_deinterleaves_channels() {
        let audio =
            AudioBuffer::from_interleaved(vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3], 2, 44100, BitDepth::Int16)
                .unwrap();
        assert_eq!(audio.frames(), 3);
        assert_eq!(audio.channels(), 2);
        assert_eq!(audio.channel(0).unwrap().to_vec(), vec![0.1, 0.2, 0.3]);
        assert_eq!(audio.channel(1).unwrap().to_vec(), vec![-0.1, -0.2, -0.3]);
    }

    #[test]
    fn test_interleaved_restores_original_order() {
        let samples = vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3];
        let audio =
            AudioBuffer::from_interleaved(samples.clone(), 2, 44100, BitDepth::Int16).unwrap();
        assert_eq!(audio.interleaved().collect::<Vec<_>>(), samples);
    }

    #[test]
    fn test_from_interleaved_rejects_partial_frame() {
        let err = AudioBuffer::from_interleaved(vec![0.0; 5], 2, 44100, BitDepth::Int16).unwrap_err();
        assert_eq!(err, BufferError::PartialFrame { len: 5, channels: 2 });
    }

    #[test]
    fn test_from_interleaved_rejects_zero_channels() {
        let err = AudioBuffer::from_interleaved(vec![], 0, 44100, BitDepth::Int16).unwrap_err();
        assert_eq!(err, BufferError::NoChannels);
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let err = AudioBuffer::from_interleaved(vec![0.0; 4], 1, 0, BitDepth::Int16).unwrap_err();
        assert_eq!(err, BufferError::ZeroSampleRate);
    }

    #[test]
    fn test_from_channels_matches_interleaved() {
        let a = AudioBuffer::from_channels(vec![vec![0.1, 0.2], vec![0.3, 0.4]], 8000, BitDepth::Int8)
            .unwrap();
        let b = AudioBuffer::from_interleaved(vec![0.1, 0.3, 0.2, 0.4], 2, 8000, BitDepth::Int8)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_channels_rejects_ragged_channels() {
        let err = AudioBuffer::from_channels(
            vec![vec![0.0; 4], vec![0.0; 4], vec![0.0; 3]],
            8000,
            BitDepth::Int16,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BufferError::RaggedChannels {
                channel: 2,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_channels_rejects_empty() {
        let err = AudioBuffer::from_channels(vec![], 8000, BitDepth::Int16).unwrap_err();
        assert_eq!(err, BufferError::NoChannels);
    }

    #[test]
    fn test_empty_buffer_keeps_channel_count() {
        let audio = AudioBuffer::from_interleaved(vec![], 2, 44100, BitDepth::Int16).unwrap();
        assert!(audio.is_empty());
        assert_eq!(audio.channels(), 2);
    }

    #[test]
    fn test_channel_out_of_range() {
        let audio = AudioBuffer::from_interleaved(vec![0.0; 4], 2, 44100, BitDepth::Int16).unwrap();
        assert!(audio.channel(2).is_none());
    }

    #[test]
    fn test_samples_mut_changes_values() {
        let mut audio = AudioBuffer::from_interleaved(vec![0.0; 4], 2, 44100, BitDepth::Int16).unwrap();
        audio.samples_mut()[[1, 1]] = 0.5;
        assert_eq!(audio.channel(1).unwrap()[1], 0.5);
        assert_eq!(audio.frames(), 2);
    }

    #[test]
    fn test_duration_and_sizes() {
        let audio =
            AudioBuffer::from_interleaved(vec![0.0; 88200], 2, 44100, BitDepth::Int16).unwrap();
        assert_relative_eq!(audio.duration(), 1.0);
        assert_eq!(audio.data_size(), 176_400);
        assert_eq!(audio.bit_rate(), 1_411_200);
    }
}
