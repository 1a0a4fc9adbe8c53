pub mod audit;
pub mod lookup;
