pub mod classifier;
pub mod facilities;
pub mod ranking;
pub mod recommendations;
pub mod schema;
