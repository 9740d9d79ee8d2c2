use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::bit_depth::BitDepth;
use crate::audio::domain::stem_result::StemResult;
use crate::shared::constants::PARTIAL_SUFFIX;
use crate::waveform::domain::waveform_error::WaveformError;
use crate::waveform::domain::waveform_writer::WaveformWriter;

/// Writes stems as PCM WAV files named `<stem>.wav` using `hound`.
///
/// Each stem is first encoded to `<stem>.wav.part` in the output directory.
/// Only once every part is finalized are they renamed into place, so a
/// failure part-way through leaves no new stem files behind. Directories
/// created for the run are removed again on failure if they are still empty.
pub struct WavFileWriter;

impl WavFileWriter {
    pub fn new() -> Self {
        Self
    }

    /// Encode a single buffer to `path` at the buffer's own bit depth.
    pub fn write_wav(&self, path: &Path, audio: &AudioBuffer) -> Result<(), WaveformError> {
        let depth = audio.bit_depth();
        let spec = hound::WavSpec {
            channels: audio.channels(),
            sample_rate: audio.sample_rate(),
            bits_per_sample: depth.bits(),
            sample_format: if depth.is_float() {
                hound::SampleFormat::Float
            } else {
                hound::SampleFormat::Int
            },
        };

        let mut writer =
            hound::WavWriter::create(path, spec).map_err(|e| map_hound_error(path, e))?;
        match depth {
            BitDepth::Float32 => {
                for sample in audio.interleaved() {
                    writer
                        .write_sample(sample as f32)
                        .map_err(|e| map_hound_error(path, e))?;
                }
            }
            _ => {
                let scale = depth.full_scale();
                for sample in audio.interleaved() {
                    writer
                        .write_sample(quantize(sample, scale))
                        .map_err(|e| map_hound_error(path, e))?;
                }
            }
        }
        writer.finalize().map_err(|e| map_hound_error(path, e))
    }
}

impl Default for WavFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformWriter for WavFileWriter {
    fn write_stems(
        &self,
        output_dir: &Path,
        stems: Vec<StemResult>,
    ) -> Result<Vec<PathBuf>, WaveformError> {
        let created_dirs = missing_dirs(output_dir);
        if let Err(e) = fs::create_dir_all(output_dir) {
            remove_empty_dirs(&created_dirs);
            return Err(WaveformError::from_io(output_dir, e));
        }

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(stems.len());
        for result in stems {
            let final_path = output_dir.join(result.stem.file_name());
            let part_path = partial_path(&final_path);
            log::info!("Writing {} to {}", result.stem, final_path.display());

            if let Err(e) = self.write_wav(&part_path, &result.audio) {
                let e = e.with_path(&final_path);
                staged.push((part_path, final_path));
                discard(&staged);
                remove_empty_dirs(&created_dirs);
                return Err(e);
            }
            staged.push((part_path, final_path));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (index, (part_path, final_path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(part_path, final_path) {
                discard(&staged[index..]);
                remove_empty_dirs(&created_dirs);
                return Err(WaveformError::from_io(final_path, e));
            }
            log::info!("File successfully saved as: {}", final_path.display());
            written.push(final_path.clone());
        }
        Ok(written)
    }
}

/// Maps a normalized sample back onto the integer grid, clamping to range.
fn quantize(sample: f64, scale: f64) -> i32 {
    (sample * scale).round().clamp(-scale, scale - 1.0) as i32
}

fn partial_path(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    final_path.with_file_name(name)
}

/// Directories in `dir`'s ancestry that do not exist yet, deepest first.
fn missing_dirs(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect()
}

/// Removes each directory, deepest first, stopping at the first non-empty one.
fn remove_empty_dirs(dirs: &[PathBuf]) {
    for dir in dirs {
        if fs::remove_dir(dir).is_err() {
            break;
        }
    }
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (part_path, _) in staged {
        if part_path.is_file() {
            if let Err(e) = fs::remove_file(part_path) {
                log::warn!("Failed to remove {}: {e}", part_path.display());
            }
        }
    }
}

fn map_hound_error(path: &Path, err: hound::Error) -> WaveformError {
    match err {
        hound::Error::IoError(source) => WaveformError::from_io(path, source),
        other => WaveformError::unsupported(path, other.to_string()),
    }
}
