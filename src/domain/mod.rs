pub mod advisor_config;
pub mod asset_class;
pub mod error;
pub mod price;
pub mod price_panel;
pub mod profile;
pub mod risk;
pub mod selection;
pub mod sizing;
pub mod stats;
pub mod summary;
pub mod universe;
