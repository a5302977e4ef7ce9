/// 汎用APIクライアント
///
/// Billed APIサーバーとの通信を行う。リトライはクライアント側では行わない。
use crate::shared::config::ApiConfig;
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境変数の設定からAPIクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        Self::new_with_config(ApiConfig::from_env())
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = self.client.get(self.url(endpoint));
        self.send(request, "GET", endpoint).await
    }

    /// PATCHリクエストを送信
    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let request = self.client.patch(self.url(endpoint)).json(body);
        self.send(request, "PATCH", endpoint).await
    }

    /// マルチパートPOSTリクエストを送信
    pub async fn post_multipart<T>(
        &self,
        endpoint: &str,
        form: multipart::Form,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.send(request, "POST", endpoint).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// リクエストを送信してレスポンスを解析する
    async fn send<T>(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let request = match &self.config.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            warn!("APIサーバーへの接続に失敗しました: {method} {endpoint}: {e}");
            AppError::ExternalService(format!("APIサーバーへの接続に失敗しました: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let result: T = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("レスポンス解析エラー: {e}")))?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// 失敗ステータスのレスポンスを "Erreur {status}" のストアエラーに変換する
    async fn status_error(response: Response) -> AppError {
        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        debug!("APIサーバーからエラーレスポンスを受信: status={status_code}, body={body}");
        AppError::Store(format!("Erreur {status_code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_invalid_config() {
        let config = ApiConfig {
            base_url: String::new(),
            ..ApiConfig::default()
        };

        let result = ApiClient::new_with_config(config);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:5678/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new_with_config(config).unwrap();

        assert_eq!(client.url("/bills"), "http://localhost:5678/bills");
    }
}
