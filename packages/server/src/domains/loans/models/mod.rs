pub mod loan_record;

pub use loan_record::{LoanRecord, LoanStatus};
