pub mod json_files;
pub mod memory;
