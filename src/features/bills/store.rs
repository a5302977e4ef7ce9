// ストア（bills リソース）の契約

use super::models::{Bill, FileUpload, NewBill, UploadedFile};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// 請求書リソースへのアクセス
///
/// 失敗時のエラーはコントローラー側で加工せずに扱う
#[async_trait]
pub trait BillsResource: Send + Sync {
    /// 請求書の一覧を取得する（ストアの順序のまま）
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 証憑ファイルをアップロードする
    async fn create(&self, upload: FileUpload) -> AppResult<UploadedFile>;

    /// 請求書を更新する
    ///
    /// # 引数
    /// * `selector` - アップロード時に払い出された請求書ID
    /// * `draft` - 送信するペイロード
    async fn update(&self, selector: Option<&str>, draft: &NewBill) -> AppResult<Bill>;
}

/// リモートストア
pub trait Store: Send + Sync {
    /// 請求書リソースのハンドルを取得する
    fn bills(&self) -> &dyn BillsResource;
}
