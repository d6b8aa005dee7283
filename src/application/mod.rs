pub mod book_copy;
pub mod loan;
pub mod member;

use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
///
/// 時刻も`Clock`として注入するため、同じ入力に対して結果は決定的になる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub loan_repository: Arc<dyn LoanRepository>,
    pub book_copy_repository: Arc<dyn BookCopyRepository>,
    pub member_repository: Arc<dyn MemberRepository>,
    pub clock: Arc<dyn Clock>,
}
