pub mod year_worker;

pub use year_worker::spawn as spawn_year_worker;
pub use year_worker::{WorkerOutput, YearReport};
