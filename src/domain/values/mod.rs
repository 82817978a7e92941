pub mod bias;
pub mod confidence;
pub mod setup_label;
pub mod zone;
