use std::path::PathBuf;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: Environment,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// LOG_LEVEL が未設定の場合は実行環境ごとの既定値を使う
    pub fn from_env() -> Self {
        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level(&environment).to_string());

        Self {
            environment,
            log_level,
        }
    }
}

/// 実行環境ごとの既定ログレベル
fn default_log_level(environment: &Environment) -> &'static str {
    match environment {
        Environment::Development => "debug",
        Environment::Production => "info",
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// .envファイルから環境変数を読み込む
///
/// 本番ビルドでは.envファイルを読み込まず、環境変数は実行時に設定されることを前提とする
pub fn load_environment_variables() {
    if cfg!(debug_assertions) {
        match dotenv::dotenv() {
            Ok(path) => {
                eprintln!("環境ファイルを読み込みました: {}", path.display());
            }
            Err(e) => {
                eprintln!("環境ファイルの読み込みに失敗: {e}");
            }
        }
    } else {
        eprintln!("本番環境: 環境変数は実行時に設定されます");
    }
}

/// ログシステムを初期化する
///
/// # 処理内容
/// 1. 環境設定を取得
/// 2. ログレベルを設定
/// 3. env_loggerを初期化
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    let log_level = parse_log_level(&env_config.log_level);

    // 二重初期化はエラーになるため try_init を使う
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={:?}",
        env_config.log_level,
        env_config.environment
    );
}

/// ログレベル文字列を LevelFilter に変換する（不明な値は Info）
fn parse_log_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// API設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// APIサーバーのベースURL
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
    /// Authorization ヘッダーに付与するトークン
    pub auth_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 30,
            auth_token: None,
        }
    }
}

impl ApiConfig {
    /// 環境変数からAPI設定を読み込む
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("API_SERVER_URL").unwrap_or_else(|_| {
            log::debug!(
                "API_SERVER_URL が未設定のため、デフォルト値を使用します: {}",
                defaults.base_url
            );
            defaults.base_url.clone()
        });

        let timeout_seconds = match std::env::var("API_TIMEOUT_SECONDS") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                log::warn!(
                    "API_TIMEOUT_SECONDSのパースに失敗しました。デフォルト値{}秒を使用します",
                    defaults.timeout_seconds
                );
                defaults.timeout_seconds
            }),
            Err(_) => defaults.timeout_seconds,
        };

        let auth_token = std::env::var("API_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        log::info!(
            "API設定: base_url={base_url}, timeout={timeout_seconds}s, auth_token={}",
            if auth_token.is_some() { "あり" } else { "なし" }
        );

        Self {
            base_url,
            timeout_seconds,
            auth_token,
        }
    }

    /// 設定を検証する
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("APIサーバーのベースURLが設定されていません".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("APIタイムアウトは0より大きい値である必要があります".to_string());
        }

        Ok(())
    }
}

/// セッションファイルのパスを取得する
///
/// SESSION_FILE が設定されていればそれを使い、なければユーザーデータディレクトリ配下を使う
pub fn get_session_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("SESSION_FILE") {
        return PathBuf::from(path);
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billed")
        .join("session.json")
}
