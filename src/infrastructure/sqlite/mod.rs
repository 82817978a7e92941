pub mod migrations;
pub mod scan_repo;
