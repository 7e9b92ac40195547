pub mod city_stats;
pub mod currency;
pub mod dataset;
pub mod splitter;
pub mod year_stats;

pub use city_stats::CityStats;
pub use currency::CurrencyTable;
pub use dataset::YearDataset;
pub use splitter::{split_by_year, SplitStats};
pub use year_stats::YearStat;
