use crate::models::Salary;

/// One vacancy row oriented for per-year statistics
#[derive(Debug, Clone)]
pub struct YearVacancy {
    /// Vacancy title as published
    pub name: String,

    /// Advertised salary
    pub salary: Salary,

    /// Publication year
    pub year: i32,
}

impl YearVacancy {
    pub fn new(name: String, salary: Salary, year: i32) -> Self {
        Self { name, salary, year }
    }
}

/// One vacancy row oriented for per-city statistics
#[derive(Debug, Clone)]
pub struct CityVacancy {
    /// City the vacancy is located in
    pub city: String,

    /// Advertised salary
    pub salary: Salary,
}

impl CityVacancy {
    pub fn new(city: String, salary: Salary) -> Self {
        Self { city, salary }
    }
}
