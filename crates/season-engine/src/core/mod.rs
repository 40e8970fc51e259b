pub mod elevation;
pub mod orbit;
pub mod season;
