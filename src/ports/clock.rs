use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 貸出日時の既定値と会員の年齢計算に使う現在時刻を注入する。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
