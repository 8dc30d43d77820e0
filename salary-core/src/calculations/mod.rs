//! Salary calculations against a [`crate::TaxSchedule`].
//!
//! Forward (gross → net) is a direct marginal-band walk. Reverse (net →
//! gross) bisects over gross salary, relying on net being strictly increasing
//! in gross for any schedule accepted by [`crate::TaxSchedule::new`].

pub mod common;
pub mod salary;

pub use salary::{
    BandTax, MAX_AMOUNT, SEARCH_PRECISION, SalaryCalculator, SalaryError, compute_from_gross,
    compute_from_net,
};
