use super::{BookCopy, Condition};

/// 貸出の遷移が蔵書に与える影響を反映する（純粋関数）
///
/// 蔵書の`state`と`available`は最新の貸出だけが決める。
/// `triggering_loan_is_most_recent`が false の場合、蔵書には触れない。
///
/// # 戻り値
/// 実際に値が変わった場合のみ更新後の蔵書を`Some`で返す（= 永続化が必要）
pub fn reconcile(
    copy: &BookCopy,
    triggering_loan_is_most_recent: bool,
    new_state: Option<Condition>,
    new_available: Option<bool>,
) -> Option<BookCopy> {
    if !triggering_loan_is_most_recent {
        return None;
    }

    let state = new_state.unwrap_or(copy.state);
    let available = new_available.unwrap_or(copy.available);

    if state == copy.state && available == copy.available {
        return None;
    }

    Some(BookCopy {
        state,
        available,
        ..copy.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;

    fn copy(state: Condition, available: bool) -> BookCopy {
        BookCopy {
            available,
            ..BookCopy::new(BookId::new(), state)
        }
    }

    #[test]
    fn test_reconcile_applies_state_and_availability() {
        let original = copy(Condition::Good, false);
        let updated = reconcile(&original, true, Some(Condition::Used), Some(true)).unwrap();
        assert_eq!(updated.state, Condition::Used);
        assert!(updated.available);
        assert_eq!(updated.id, original.id);
    }

    #[test]
    fn test_reconcile_ignores_loan_that_is_not_most_recent() {
        let original = copy(Condition::Good, true);
        assert!(reconcile(&original, false, Some(Condition::Bad), None).is_none());
    }

    #[test]
    fn test_reconcile_without_difference_needs_no_write() {
        let original = copy(Condition::Used, true);
        assert!(reconcile(&original, true, Some(Condition::Used), Some(true)).is_none());
        assert!(reconcile(&original, true, None, None).is_none());
    }

    #[test]
    fn test_reconcile_keeps_removed_flag() {
        let original = BookCopy {
            removed: true,
            ..copy(Condition::Good, false)
        };
        let updated = reconcile(&original, true, None, Some(true)).unwrap();
        assert!(updated.removed);
    }
}
