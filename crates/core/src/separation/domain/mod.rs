pub mod separation_error;
pub mod stem_separator;
