pub mod analysis;
pub mod search;
