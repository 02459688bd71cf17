pub mod agent;
pub mod eval;
pub mod search;
