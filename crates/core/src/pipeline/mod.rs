pub mod pipeline_logger;
pub mod run_error;
pub mod run_stage;
pub mod separate_stems_use_case;
