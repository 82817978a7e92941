pub mod analyze;
pub mod filters;
pub mod history;
pub mod pipeline;
pub mod scan;
pub mod stages;
