pub mod api_utils;
pub mod file_reader;
pub mod status;
