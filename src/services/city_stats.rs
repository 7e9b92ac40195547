use crate::constants::CITY_SHARE_THRESHOLD;
use crate::models::CityVacancy;
use std::collections::HashMap;

/// City-level statistics over the union of all years' vacancies.
///
/// Both views cover the same surviving city set: cities holding fewer than
/// `floor(0.01 * total)` vacancies are dropped from both. Each view has its
/// own descending order; ties keep first-seen record order.
#[derive(Debug, Clone, PartialEq)]
pub struct CityStats {
    /// City paired with its share of all vacancies, by share descending
    pub shares: Vec<(String, f64)>,

    /// City paired with its mean ruble salary, by salary descending
    pub salaries: Vec<(String, f64)>,
}

impl CityStats {
    /// Reduce the combined city records into the two ranked views.
    ///
    /// Deterministic for a given input order, and therefore idempotent.
    /// An empty input produces two empty views.
    pub fn collect(vacancies: &[CityVacancy]) -> Self {
        let total = vacancies.len();
        if total == 0 {
            return Self {
                shares: Vec::new(),
                salaries: Vec::new(),
            };
        }

        // first-seen order doubles as the tie-break for the sorts below
        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, (usize, i64)> = HashMap::new();

        for vacancy in vacancies {
            let city = vacancy.city.as_str();
            let entry = tallies.entry(city).or_insert_with(|| {
                order.push(city);
                (0, 0)
            });
            entry.0 += 1;
            entry.1 += vacancy.salary.rub_midpoint;
        }

        let threshold = (total as f64 * CITY_SHARE_THRESHOLD).floor() as usize;
        let surviving: Vec<(&str, usize, i64)> = order
            .iter()
            .filter_map(|&city| tallies.get(city).map(|&(count, sum)| (city, count, sum)))
            .filter(|&(_, count, _)| count >= threshold)
            .collect();

        let mut by_count = surviving.clone();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        let shares = by_count
            .into_iter()
            .map(|(city, count, _)| (city.to_string(), count as f64 / total as f64))
            .collect();

        let mut by_salary = surviving;
        by_salary.sort_by(|a, b| {
            let avg_a = a.2 as f64 / a.1 as f64;
            let avg_b = b.2 as f64 / b.1 as f64;
            avg_b.total_cmp(&avg_a)
        });
        let salaries = by_salary
            .into_iter()
            .map(|(city, count, sum)| (city.to_string(), sum as f64 / count as f64))
            .collect();

        Self { shares, salaries }
    }
}
