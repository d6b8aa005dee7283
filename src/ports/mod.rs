pub mod book_copy_repository;
pub mod clock;
pub mod loan_repository;
pub mod member_repository;

pub use book_copy_repository::BookCopyRepository;
pub use clock::Clock;
pub use loan_repository::LoanRepository;
pub use member_repository::MemberRepository;
