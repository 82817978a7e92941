pub mod market_data;
pub mod result_export;
pub mod scan_repository;
