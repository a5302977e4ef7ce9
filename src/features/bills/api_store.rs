/// Billed APIサーバー経由のストア実装
///
/// - `GET /bills` で一覧取得
/// - `POST /bills`（multipart: file, email）で証憑アップロード
/// - `PATCH /bills/{id}` で請求書の更新
use super::models::{Bill, FileUpload, NewBill, UploadedFile};
use super::store::{BillsResource, Store};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use reqwest::multipart;

/// APIサーバー上の bills リソース
#[derive(Debug, Clone)]
pub struct ApiBills {
    client: ApiClient,
}

#[async_trait]
impl BillsResource for ApiBills {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self.client.get("/bills").await?;
        info!("請求書一覧取得成功: count={}", bills.len());
        Ok(bills)
    }

    async fn create(&self, upload: FileUpload) -> AppResult<UploadedFile> {
        info!(
            "証憑アップロード開始: file_name={}, mime_type={}, size={} bytes",
            upload.file_name,
            upload.mime_type,
            upload.content.len()
        );

        let part = multipart::Part::bytes(upload.content)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("email", upload.email);

        let uploaded: UploadedFile = self.client.post_multipart("/bills", form).await?;
        info!("証憑アップロード成功: key={}", uploaded.key);
        Ok(uploaded)
    }

    async fn update(&self, selector: Option<&str>, draft: &NewBill) -> AppResult<Bill> {
        let id = selector.ok_or_else(|| {
            AppError::validation("更新対象の請求書IDがありません（証憑が未アップロード）")
        })?;

        let bill: Bill = self.client.patch(&format!("/bills/{id}"), draft).await?;
        info!("請求書更新成功: id={id}");
        Ok(bill)
    }
}

/// APIサーバー経由のストア
#[derive(Debug, Clone)]
pub struct HttpStore {
    bills: ApiBills,
}

impl HttpStore {
    /// APIクライアントからストアを作成
    pub fn new(client: ApiClient) -> Self {
        Self {
            bills: ApiBills { client },
        }
    }

    /// 環境変数の設定からストアを作成
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(ApiClient::new()?))
    }
}

impl Store for HttpStore {
    fn bills(&self) -> &dyn BillsResource {
        &self.bills
    }
}
