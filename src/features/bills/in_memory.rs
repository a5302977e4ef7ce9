// プロセス内ストア（テスト・デモ用）

use super::models::{Bill, FileUpload, NewBill, UploadedFile};
use super::store::{BillsResource, Store};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::debug;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// アップロード時に返す証憑URLのベース
const FILE_URL_BASE: &str = "https://localhost:3456/images";

#[derive(Debug, Default)]
struct State {
    bills: Vec<Bill>,
    uploads: Vec<FileUpload>,
    updates: Vec<(Option<String>, NewBill)>,
    list_calls: usize,
    next_id: usize,
    list_failures: VecDeque<String>,
    create_failures: VecDeque<String>,
    update_failures: VecDeque<String>,
}

/// メモリ上の bills リソース
///
/// 失敗を予約すると、次の呼び出しがそのメッセージのストアエラーで失敗する
#[derive(Debug, Default)]
pub struct InMemoryBills {
    state: Mutex<State>,
}

impl InMemoryBills {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BillsResource for InMemoryBills {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let mut state = self.lock();
        state.list_calls += 1;

        if let Some(message) = state.list_failures.pop_front() {
            return Err(AppError::store(message));
        }

        Ok(state.bills.clone())
    }

    async fn create(&self, upload: FileUpload) -> AppResult<UploadedFile> {
        let mut state = self.lock();

        if let Some(message) = state.create_failures.pop_front() {
            return Err(AppError::store(message));
        }

        state.next_id += 1;
        let uploaded = UploadedFile {
            file_url: format!("{FILE_URL_BASE}/{}", upload.file_name),
            key: format!("bill-{}", state.next_id),
        };

        state.bills.push(Bill {
            id: uploaded.key.clone(),
            email: upload.email.clone(),
            file_url: uploaded.file_url.clone(),
            file_name: upload.file_name.clone(),
            ..Bill::default()
        });
        state.uploads.push(upload);

        debug!("メモリストアにアップロードしました: key={}", uploaded.key);
        Ok(uploaded)
    }

    async fn update(&self, selector: Option<&str>, draft: &NewBill) -> AppResult<Bill> {
        let mut state = self.lock();
        state
            .updates
            .push((selector.map(str::to_string), draft.clone()));

        if let Some(message) = state.update_failures.pop_front() {
            return Err(AppError::store(message));
        }

        let id = match selector {
            Some(id) => id.to_string(),
            None => {
                state.next_id += 1;
                format!("bill-{}", state.next_id)
            }
        };

        let bill = Bill {
            id: id.clone(),
            email: draft.email.clone(),
            expense_type: draft.expense_type.clone(),
            name: draft.name.clone(),
            amount: draft.amount.unwrap_or_default(),
            date: draft.date.clone(),
            vat: draft.vat.clone(),
            pct: draft.pct,
            commentary: draft.commentary.clone(),
            file_url: draft.file_url.clone().unwrap_or_default(),
            file_name: draft.file_name.clone().unwrap_or_default(),
            status: draft.status.as_str().to_string(),
            comment_admin: None,
        };

        match state.bills.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = bill.clone(),
            None => state.bills.push(bill.clone()),
        }

        debug!("メモリストアの請求書を更新しました: id={id}");
        Ok(bill)
    }
}

/// メモリ上のストア
#[derive(Debug, Default)]
pub struct InMemoryStore {
    bills: InMemoryBills,
}

impl InMemoryStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した請求書を持つストアを作成
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let store = Self::new();
        store.bills.lock().bills = bills;
        store
    }

    /// サンプルの請求書4件を持つストアを作成
    pub fn with_fixtures() -> Self {
        Self::with_bills(fixture_bills())
    }

    /// 次の list 呼び出しを失敗させる
    pub fn fail_next_list<S: Into<String>>(&self, message: S) {
        self.bills.lock().list_failures.push_back(message.into());
    }

    /// 次の create 呼び出しを失敗させる
    pub fn fail_next_create<S: Into<String>>(&self, message: S) {
        self.bills.lock().create_failures.push_back(message.into());
    }

    /// 次の update 呼び出しを失敗させる
    pub fn fail_next_update<S: Into<String>>(&self, message: S) {
        self.bills.lock().update_failures.push_back(message.into());
    }

    /// list が呼ばれた回数
    pub fn list_calls(&self) -> usize {
        self.bills.lock().list_calls
    }

    /// 受け付けたアップロード
    pub fn uploads(&self) -> Vec<FileUpload> {
        self.bills.lock().uploads.clone()
    }

    /// update に渡された (selector, ペイロード)
    pub fn updates(&self) -> Vec<(Option<String>, NewBill)> {
        self.bills.lock().updates.clone()
    }

    /// 保持している請求書
    pub fn stored_bills(&self) -> Vec<Bill> {
        self.bills.lock().bills.clone()
    }
}

impl Store for InMemoryStore {
    fn bills(&self) -> &dyn BillsResource {
        &self.bills
    }
}

/// サンプルの請求書（ストアの返却順）
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "a@a".to_string(),
            expense_type: "Hôtel et logement".to_string(),
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: "80".to_string(),
            pct: 20.0,
            commentary: "séminaire billed".to_string(),
            file_url: "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg".to_string(),
            file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
            status: "pending".to_string(),
            comment_admin: Some("ok".to_string()),
        },
        Bill {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            email: "a@a".to_string(),
            expense_type: "Transports".to_string(),
            name: "test1".to_string(),
            amount: 100.0,
            date: "2001-01-01".to_string(),
            vat: String::new(),
            pct: 20.0,
            commentary: "plop".to_string(),
            file_url: "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2F1592770761.jpeg".to_string(),
            file_name: "1592770761.jpeg".to_string(),
            status: "refused".to_string(),
            comment_admin: Some("en fait non".to_string()),
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            email: "a@a".to_string(),
            expense_type: "Services en ligne".to_string(),
            name: "test3".to_string(),
            amount: 300.0,
            date: "2003-03-03".to_string(),
            vat: "60".to_string(),
            pct: 20.0,
            commentary: String::new(),
            file_url: "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Ffacture-client-php-exportee.png".to_string(),
            file_name: "facture-client-php-exportee.png".to_string(),
            status: "accepted".to_string(),
            comment_admin: Some("bon bah d'accord".to_string()),
        },
        Bill {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            email: "a@a".to_string(),
            expense_type: "Restaurants et bars".to_string(),
            name: "test2".to_string(),
            amount: 200.0,
            date: "2002-02-02".to_string(),
            vat: "40".to_string(),
            pct: 20.0,
            commentary: "test2".to_string(),
            file_url: "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg".to_string(),
            file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
            status: "refused".to_string(),
            comment_admin: Some("pas la bonne facture".to_string()),
        },
    ]
}
