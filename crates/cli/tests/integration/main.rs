mod common;
mod config_tests;
mod generate_tests;
mod preset_tests;
mod serve_tests;
