pub mod wav_file_reader;
pub mod wav_file_writer;
