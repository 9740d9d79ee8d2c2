pub mod waveform_error;
pub mod waveform_reader;
pub mod waveform_writer;
