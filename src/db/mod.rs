pub mod initialize;
pub mod pool;
