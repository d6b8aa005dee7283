mod errors;
mod loan_service;

pub use errors::{LoanApplicationError, Result};
pub use loan_service::{
    LoanTimeline, create_loan, delete_loan_by_id, get_loan_by_id, list_loans, loan_timeline,
    update_loan,
};
