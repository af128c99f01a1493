pub mod landmark;
pub mod query;
