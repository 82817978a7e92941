pub mod analysis;
pub mod confirmation;
pub mod indicator;
pub mod key_levels;
pub mod market_context;
pub mod options;
pub mod risk;
pub mod scan_record;
pub mod setup;
pub mod snapshot;
