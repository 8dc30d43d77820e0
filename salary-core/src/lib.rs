//! Gross/net salary conversion under a progressive income tax schedule and a
//! flat pension deduction.
//!
//! ```
//! use rust_decimal_macros::dec;
//!
//! let result = salary_core::compute_from_gross(dec!(5000)).unwrap();
//! assert_eq!(result.income_tax, dec!(697.5));
//! assert_eq!(result.net_salary, dec!(3952.5));
//! ```

pub mod calculations;
pub mod loader;
pub mod models;
pub mod schedule;
pub mod utils;

pub use calculations::{
    BandTax, MAX_AMOUNT, SEARCH_PRECISION, SalaryCalculator, SalaryError, compute_from_gross,
    compute_from_net,
};
pub use loader::{ScheduleLoader, ScheduleLoaderError};
pub use models::*;
pub use schedule::{MIN_KEPT_SHARE, ScheduleError, TaxSchedule};
