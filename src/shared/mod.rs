/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// 汎用APIクライアント
pub mod api_client;

/// 日付・ステータスの表示用ユーティリティ
pub mod utils;

// 便利な再エクスポート
pub use api_client::ApiClient;
pub use config::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
pub use errors::{AppError, AppResult, ErrorSeverity};
