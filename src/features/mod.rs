/// 請求書（一覧・作成）
pub mod bills;

/// 画面遷移
pub mod navigation;

/// セッション（現在のユーザー）
pub mod session;
