//! 保存完了通知の送り先
//!
//! 投げっぱなし。通知側の失敗は本棚の更新に影響しない。

use tracing::info;

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// ログに流すだけの通知先
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!("{}", message);
    }
}

/// 保存完了メッセージ
pub fn added_message(title: &str) -> String {
    format!("{} added to Bookshelf!", title)
}
