pub mod passthrough_separator;
