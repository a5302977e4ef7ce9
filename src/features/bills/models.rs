// 請求書機能のデータモデル

use crate::shared::utils::{format_date, format_status};
use serde::{Deserialize, Serialize};

/// 経費タイプの一覧（フォームの選択肢と同じ順序）
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// フォーム表示時に選択されている経費タイプ
pub const DEFAULT_EXPENSE_TYPE: &str = "Transports";

/// 割合（pct）が未入力の場合の既定値
pub const DEFAULT_PCT: f64 = 20.0;

/// 請求書のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// ストア上の生の値
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

/// ストアから取得した請求書データ
///
/// 部分的なレコードも受け付けるため、欠けているフィールドは既定値になる
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: String,
    pub pct: f64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

/// 一覧表示用の請求書
///
/// `date` と `status` は表示用の値。並び替え用に元の値も保持する。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: String,
    pub pct: f64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: String,
    pub raw_date: String,
    pub raw_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl From<Bill> for DisplayBill {
    fn from(bill: Bill) -> Self {
        // 日付とステータスは互いに独立して変換する
        let date = format_date(&bill.date);
        let status = format_status(&bill.status);

        Self {
            id: bill.id,
            email: bill.email,
            expense_type: bill.expense_type,
            name: bill.name,
            amount: bill.amount,
            date,
            vat: bill.vat,
            pct: bill.pct,
            commentary: bill.commentary,
            file_url: bill.file_url,
            file_name: bill.file_name,
            status,
            raw_date: bill.date,
            raw_status: bill.status,
            comment_admin: bill.comment_admin,
        }
    }
}

/// 作成中の請求書（ストアへ送信するペイロード）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: Option<f64>,
    pub date: String,
    pub vat: String,
    pub pct: f64,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

/// アップロードするファイル
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// アップロードしたユーザーのメールアドレス
    pub email: String,
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// ファイルアップロードのレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_url: String,
    /// 以降の更新で使う請求書ID
    pub key: String,
}
