pub mod detail;
pub mod listing;
pub mod scope;
