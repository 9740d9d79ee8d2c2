pub mod audio;
pub mod config;
pub mod pipeline;
pub mod separation;
pub mod shared;
pub mod waveform;
