pub mod history;
pub mod wizard;
