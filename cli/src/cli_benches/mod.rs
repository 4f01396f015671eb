pub mod benches;
pub mod racer;
