pub mod flag_parser;
pub mod run_config;
