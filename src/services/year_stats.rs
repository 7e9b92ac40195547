use crate::models::YearVacancy;

/// Aggregate statistics for one publication year
#[derive(Debug, Clone, PartialEq)]
pub struct YearStat {
    pub year: i32,

    /// Number of vacancies in the year
    pub total_count: usize,

    /// Number of vacancies whose name matches the profession filter
    pub prof_count: usize,

    /// Mean ruble salary over all vacancies, 0.0 when there are none
    pub avg_salary: f64,

    /// Mean ruble salary over matching vacancies, 0.0 when there are none
    pub avg_prof_salary: f64,
}

impl YearStat {
    /// Reduce one year's vacancies in a single pass.
    ///
    /// The profession filter is a case-sensitive substring match against
    /// the vacancy name. The year is supplied by the caller because an
    /// empty input carries no year of its own; per-record years are not
    /// re-validated here.
    pub fn collect(year: i32, vacancies: &[YearVacancy], profession: &str) -> Self {
        let mut salary_sum = 0i64;
        let mut prof_salary_sum = 0i64;
        let mut prof_count = 0usize;

        for vacancy in vacancies {
            salary_sum += vacancy.salary.rub_midpoint;

            if vacancy.name.contains(profession) {
                prof_count += 1;
                prof_salary_sum += vacancy.salary.rub_midpoint;
            }
        }

        let total_count = vacancies.len();
        let avg_salary = if total_count == 0 {
            0.0
        } else {
            salary_sum as f64 / total_count as f64
        };
        let avg_prof_salary = if prof_count == 0 {
            0.0
        } else {
            prof_salary_sum as f64 / prof_count as f64
        };

        Self {
            year,
            total_count,
            prof_count,
            avg_salary,
            avg_prof_salary,
        }
    }
}
