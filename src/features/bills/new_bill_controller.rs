// 新規請求書画面のコントローラー

use super::models::{Bill, BillStatus, FileUpload, NewBill, DEFAULT_PCT};
use super::store::Store;
use super::view::{FileChangeEvent, NewBillForm, SelectedFile, SubmitEvent};
use crate::features::navigation::{Navigator, Route};
use crate::features::session::SessionReader;
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

/// 許可しない形式のファイルが選ばれたときの警告文
pub const FILE_FORMAT_ERROR: &str = "Format de fichier incorrect";

/// アップロードを許可する拡張子
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// アップロードを許可するMIMEタイプ
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// 証憑ファイルの添付状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAttachment {
    /// アップロード中、または未添付
    Pending,
    /// アップロード済み
    Attached,
}

/// 作成画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewBillState {
    Empty,
    Filling(FileAttachment),
    Submitting,
    /// 送信完了（終端状態）
    Submitted,
    /// 送信失敗（再送信可能）
    SubmitFailed,
}

/// ファイル選択の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeOutcome {
    NoFile,
    Rejected,
    Uploaded,
    UploadFailed,
}

/// 送信の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Failed,
    /// 送信済みのため無視した
    Ignored,
}

/// ファイル名の拡張子（小文字）
fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 証憑として受け付けるファイルかどうか
///
/// 拡張子が許可リストにあり、MIMEタイプも許可リストにあること。
/// MIMEタイプが空の場合は拡張子だけで判定する。
pub fn is_allowed_file(file: &SelectedFile) -> bool {
    let extension_allowed = ALLOWED_EXTENSIONS.contains(&file_extension(&file.name).as_str());
    let mime_type = file.mime_type.trim().to_lowercase();

    extension_allowed && (mime_type.is_empty() || ALLOWED_MIME_TYPES.contains(&mime_type.as_str()))
}

/// アップロード時のContent-Type（MIMEタイプが空なら拡張子から決める）
fn content_type(file: &SelectedFile) -> String {
    if !file.mime_type.trim().is_empty() {
        return file.mime_type.trim().to_lowercase();
    }

    match file_extension(&file.name).as_str() {
        "png" => "image/png",
        _ => "image/jpeg",
    }
    .to_string()
}

/// 数値入力を解析する（空や数値でない場合は None）
fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// 新規請求書コントローラー
pub struct NewBillController {
    store: Option<Arc<dyn Store>>,
    navigator: Arc<dyn Navigator>,
    session: Arc<dyn SessionReader>,
    form: Arc<dyn NewBillForm>,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
    state: NewBillState,
}

impl NewBillController {
    /// 依存を注入してコントローラーを作成
    ///
    /// # 引数
    /// * `store` - リモートストア（未設定の場合はアップロード・送信が失敗扱いになる）
    /// * `navigator` - 画面遷移
    /// * `session` - 現在のユーザーの読み取り
    /// * `form` - フォームへのアクセス
    pub fn new(
        store: Option<Arc<dyn Store>>,
        navigator: Arc<dyn Navigator>,
        session: Arc<dyn SessionReader>,
        form: Arc<dyn NewBillForm>,
    ) -> Self {
        Self {
            store,
            navigator,
            session,
            form,
            file_url: None,
            file_name: None,
            bill_id: None,
            state: NewBillState::Empty,
        }
    }

    pub fn state(&self) -> NewBillState {
        self.state
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// アップロードで払い出された請求書ID
    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// アップロード済みの証憑を下書きに紐付ける
    pub fn attach_file<S: Into<String>>(&mut self, file_url: S, file_name: S, bill_id: Option<String>) {
        self.file_url = Some(file_url.into());
        self.file_name = Some(file_name.into());
        self.bill_id = bill_id;
        self.state = NewBillState::Filling(FileAttachment::Attached);
    }

    /// ファイル入力の変更
    ///
    /// 許可されない形式の場合は警告を表示して入力をクリアし、アップロードしない
    pub async fn handle_change_file(&mut self, event: &FileChangeEvent) -> FileChangeOutcome {
        let Some(file) = event.file() else {
            debug!("ファイルが選択されていません");
            return FileChangeOutcome::NoFile;
        };

        if !is_allowed_file(file) {
            warn!(
                "許可されていない形式のファイルです: name={}, mime_type={}",
                file.name, file.mime_type
            );
            self.form.alert(FILE_FORMAT_ERROR);
            self.form.clear_file();
            return FileChangeOutcome::Rejected;
        }

        // 新しいファイルのアップロードが完了するまで、下書きは証憑を持たない
        self.file_url = None;
        self.file_name = None;
        self.bill_id = None;
        self.state = NewBillState::Filling(FileAttachment::Pending);

        let email = match self.session.get_current_user() {
            Ok(user) => user.email,
            Err(e) => {
                error!("証憑アップロード前のユーザー取得に失敗しました: {e}");
                return FileChangeOutcome::UploadFailed;
            }
        };

        let Some(store) = &self.store else {
            error!("ストアが未設定のため、証憑をアップロードできません");
            return FileChangeOutcome::UploadFailed;
        };

        let upload = FileUpload {
            email,
            file_name: file.name.clone(),
            mime_type: content_type(file),
            content: file.content.clone(),
        };

        match store.bills().create(upload).await {
            Ok(uploaded) => {
                info!(
                    "証憑をアップロードしました: file_name={}, key={}",
                    file.name, uploaded.key
                );
                self.file_url = Some(uploaded.file_url);
                self.file_name = Some(file.name.clone());
                self.bill_id = Some(uploaded.key);
                self.state = NewBillState::Filling(FileAttachment::Attached);
                FileChangeOutcome::Uploaded
            }
            Err(e) => {
                error!("証憑のアップロードに失敗しました: {e}");
                FileChangeOutcome::UploadFailed
            }
        }
    }

    /// フォームの送信
    ///
    /// 成功時のみ一覧画面へ一度だけ遷移する。失敗はログに残し、フォームに留まる。
    pub async fn handle_submit(&mut self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        if self.state == NewBillState::Submitted {
            warn!("送信済みの下書きは再送信できません");
            return SubmitOutcome::Ignored;
        }

        let email = match self.session.get_current_user() {
            Ok(user) => user.email,
            Err(e) => {
                error!("送信時のユーザー取得に失敗しました: {e}");
                self.state = NewBillState::SubmitFailed;
                return SubmitOutcome::Failed;
            }
        };

        let draft = self.build_draft(email);
        self.state = NewBillState::Submitting;

        match self.update_bill(&draft).await {
            Some(bill) => {
                info!("請求書を送信しました: id={}", bill.id);
                self.state = NewBillState::Submitted;
                self.navigator.navigate(Route::Bills.path());
                SubmitOutcome::Submitted
            }
            None => {
                self.state = NewBillState::SubmitFailed;
                SubmitOutcome::Failed
            }
        }
    }

    /// ストアへ請求書を書き込む
    ///
    /// 失敗はログに残すだけで呼び出し元へは返さない
    pub async fn update_bill(&self, draft: &NewBill) -> Option<Bill> {
        let Some(store) = &self.store else {
            error!("ストアが未設定のため、請求書を送信できません");
            return None;
        };

        match store.bills().update(self.bill_id.as_deref(), draft).await {
            Ok(bill) => Some(bill),
            Err(e) => {
                error!("請求書の更新に失敗しました: {e}");
                None
            }
        }
    }

    /// フォームの値と証憑情報から下書きを組み立てる
    fn build_draft(&self, email: String) -> NewBill {
        // pct は未入力・数値以外・0 の場合に既定値
        let pct = parse_number(&self.form.pct())
            .filter(|pct| *pct != 0.0)
            .unwrap_or(DEFAULT_PCT);

        NewBill {
            email,
            expense_type: self.form.expense_type(),
            name: self.form.expense_name(),
            amount: parse_number(&self.form.amount()),
            date: self.form.date(),
            vat: self.form.vat(),
            pct,
            commentary: self.form.commentary(),
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            status: BillStatus::Pending,
        }
    }
}
