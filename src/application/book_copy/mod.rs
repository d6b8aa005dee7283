mod book_copy_service;
mod errors;

pub use book_copy_service::{
    create_book_copies, get_book_copy, get_book_copy_loans, update_book_copy,
};
pub use errors::{BookCopyApplicationError, Result};
