pub mod campaigns;
pub mod card_grid;
pub mod dashboard;
pub mod data_sources;
pub mod templates;
pub mod top_sheet;
