mod salary_result;
mod tax_bracket;

pub use salary_result::SalaryResult;
pub use tax_bracket::TaxBracket;
