pub mod audio_buffer;
pub mod bit_depth;
pub mod stem;
pub mod stem_result;
