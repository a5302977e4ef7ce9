use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// ストア（bills リソース）から返されたエラー
    ///
    /// メッセージは加工せずにそのまま表示する（例: "Erreur 404"）
    #[error("{0}")]
    Store(String),

    /// 外部サービス連携でのエラー
    #[error("外部サービスエラー: {0}")]
    ExternalService(String),

    /// セッション関連のエラー
    #[error("セッションエラー: {0}")]
    Session(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Store(msg) => msg,
            AppError::ExternalService(_) => "Erreur de communication avec le serveur",
            AppError::Session(_) => "Session utilisateur introuvable",
            AppError::Configuration(_) => "Erreur de configuration",
            AppError::Io(_) => "Erreur de lecture ou d'écriture de fichier",
            AppError::Json(_) => "Format de données invalide",
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Store(_) => ErrorSeverity::Medium,
            AppError::ExternalService(_) => ErrorSeverity::Medium,
            AppError::Session(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ストアエラーを作成するヘルパー関数
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// セッションエラーを作成するヘルパー関数
    pub fn session<S: Into<String>>(message: S) -> Self {
        AppError::Session(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        assert_eq!(
            AppError::validation("テスト").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::store("Erreur 500").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::ExternalService("接続失敗".to_string()).severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::configuration("API_SERVER_URL が不正").severity(),
            ErrorSeverity::High
        );
    }

    #[test]
    fn test_store_error_keeps_message_verbatim() {
        // ストアのエラーメッセージは加工されない
        let error = AppError::store("Erreur 404");
        assert_eq!(error.to_string(), "Erreur 404");
        assert_eq!(error.user_message(), "Erreur 404");
    }

    #[test]
    fn test_user_message() {
        let validation_error = AppError::validation("Format de fichier incorrect");
        assert_eq!(
            validation_error.user_message(),
            "Format de fichier incorrect"
        );

        let session_error = AppError::session("user キーがありません");
        assert_eq!(
            session_error.user_message(),
            "Session utilisateur introuvable"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AppError = parse_error.into();
        assert!(matches!(error, AppError::Json(_)));
        assert!(error.to_string().starts_with("JSON解析エラー"));
    }
}
