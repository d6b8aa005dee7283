pub mod catalog;
pub mod chronology;
pub mod commands;
pub mod copy_sync;
pub mod eligibility;
pub mod errors;
pub mod loan;
pub mod member;
pub mod value_objects;

pub use catalog::*;
pub use errors::*;
pub use loan::{Loan, LoanChanges, LoanPatch, LoanReturn};
pub use member::*;
pub use value_objects::*;
