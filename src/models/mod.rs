mod salary;
mod vacancy;

pub use salary::Salary;
pub use vacancy::{CityVacancy, YearVacancy};
