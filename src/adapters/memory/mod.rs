pub mod book_copy_repository;
pub mod loan_repository;
pub mod member_repository;
mod store;

pub use book_copy_repository::BookCopyRepository;
pub use loan_repository::LoanRepository;
pub use member_repository::MemberRepository;
pub use store::MemoryStore;
