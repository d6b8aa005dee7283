use chrono::NaiveDate;

use super::{BookCategory, BookCopy, CreateLoanError, Member};

/// 貸出の可否を判定し、不可の場合はその理由を返す
///
/// ビジネスルール：
/// - 未成年の会員は成人向けカテゴリを含む書籍を借りられない
/// - 貸出中または除籍済みの蔵書は貸し出せない
///
/// `categories`は蔵書の書籍が属するカテゴリ。
pub fn check_loan_eligibility(
    member: &Member,
    copy: &BookCopy,
    categories: &[BookCategory],
    today: NaiveDate,
) -> Result<(), CreateLoanError> {
    if member.is_minor(today) && categories.iter().any(|c| c.adult_only) {
        return Err(CreateLoanError::MinorCannotBorrowAdultBook);
    }

    if !copy.is_lendable() {
        return Err(CreateLoanError::CopyNotAvailable);
    }

    Ok(())
}

/// 貸出可能か（副作用なし）
pub fn is_loan_allowed(
    member: &Member,
    copy: &BookCopy,
    categories: &[BookCategory],
    today: NaiveDate,
) -> bool {
    check_loan_eligibility(member, copy, categories, today).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, CategoryId, Condition, MemberId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 12, 1).unwrap()
    }

    fn member(birthday: NaiveDate) -> Member {
        Member {
            id: MemberId::new(),
            name: "Martin".to_string(),
            first_name: "Paul".to_string(),
            birthday,
        }
    }

    fn minor() -> Member {
        member(NaiveDate::from_ymd_opt(2010, 5, 4).unwrap())
    }

    fn major() -> Member {
        member(NaiveDate::from_ymd_opt(1980, 5, 4).unwrap())
    }

    fn category(adult_only: bool) -> BookCategory {
        BookCategory {
            id: CategoryId::new(),
            code: if adult_only { "ADU" } else { "ROM" }.to_string(),
            name: "category".to_string(),
            adult_only,
        }
    }

    #[test]
    fn test_major_member_may_borrow_adult_book() {
        let copy = BookCopy::new(BookId::new(), Condition::Good);
        assert!(is_loan_allowed(&major(), &copy, &[category(true)], today()));
    }

    #[test]
    fn test_minor_member_cannot_borrow_adult_book() {
        let copy = BookCopy::new(BookId::new(), Condition::Good);
        let result = check_loan_eligibility(
            &minor(),
            &copy,
            &[category(false), category(true)],
            today(),
        );
        assert_eq!(result, Err(CreateLoanError::MinorCannotBorrowAdultBook));
    }

    #[test]
    fn test_minor_member_may_borrow_book_without_adult_category() {
        let copy = BookCopy::new(BookId::new(), Condition::Good);
        assert!(is_loan_allowed(&minor(), &copy, &[category(false)], today()));
        assert!(is_loan_allowed(&minor(), &copy, &[], today()));
    }

    #[test]
    fn test_unavailable_or_removed_copy_is_refused() {
        let unavailable = BookCopy {
            available: false,
            ..BookCopy::new(BookId::new(), Condition::Good)
        };
        let removed = BookCopy {
            removed: true,
            ..BookCopy::new(BookId::new(), Condition::Good)
        };
        assert_eq!(
            check_loan_eligibility(&major(), &unavailable, &[], today()),
            Err(CreateLoanError::CopyNotAvailable)
        );
        assert!(!is_loan_allowed(&major(), &removed, &[], today()));
    }
}
