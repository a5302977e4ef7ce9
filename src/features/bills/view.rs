/// ビュー層との契約
///
/// コントローラーはDOMを直接参照せず、ここで定義する能力だけを使う
use super::models::{DEFAULT_EXPENSE_TYPE, EXPENSE_TYPES};
use std::sync::{Mutex, MutexGuard};

/// ビュー要素の識別子（data-testid）
pub mod test_ids {
    pub const EXPENSE_TYPE: &str = "expense-type";
    pub const EXPENSE_NAME: &str = "expense-name";
    pub const DATEPICKER: &str = "datepicker";
    pub const AMOUNT: &str = "amount";
    pub const VAT: &str = "vat";
    pub const PCT: &str = "pct";
    pub const COMMENTARY: &str = "commentary";
    pub const FILE: &str = "file";
    pub const FORM_NEW_BILL: &str = "form-new-bill";
    pub const BTN_NEW_BILL: &str = "btn-new-bill";
    pub const ICON_EYE: &str = "icon-eye";
}

/// 目のアイコンが証憑URLを保持する属性
pub const BILL_URL_ATTRIBUTE: &str = "data-bill-url";

/// 属性を持つビュー要素
pub trait ElementAttributes {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// モーダルに表示する証憑画像
#[derive(Debug, Clone, PartialEq)]
pub struct ProofImage {
    pub url: String,
    pub width: u32,
}

impl ProofImage {
    /// モーダル本文のマークアップ（属性値は引用符で囲みエスケープする）
    pub fn to_html(&self) -> String {
        format!(
            r#"<div style='text-align: center;' class="bill-proof-container"><img width="{}" src="{}" alt="Bill" /></div>"#,
            self.width,
            escape_attribute(&self.url)
        )
    }
}

/// HTML属性値のエスケープ
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 証憑表示用のモーダル
pub trait ProofModal: Send + Sync {
    /// モーダル本体の幅（px）
    fn width(&self) -> u32;
    fn set_content(&self, image: &ProofImage);
    fn show(&self);
}

/// 新規請求書フォームへのアクセス
pub trait NewBillForm: Send + Sync {
    fn expense_type(&self) -> String;
    fn expense_name(&self) -> String;
    fn date(&self) -> String;
    fn amount(&self) -> String;
    fn vat(&self) -> String;
    fn pct(&self) -> String;
    fn commentary(&self) -> String;
    /// ファイル入力の選択を解除する
    fn clear_file(&self);
    /// ユーザーに警告を表示する
    fn alert(&self, message: &str);
}

/// ファイル入力で選択されたファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new<S: Into<String>>(name: S, mime_type: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// ファイル入力の change イベント
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileChangeEvent {
    pub files: Vec<SelectedFile>,
}

impl FileChangeEvent {
    pub fn with_file(file: SelectedFile) -> Self {
        Self { files: vec![file] }
    }

    /// 選択された最初のファイル
    pub fn file(&self) -> Option<&SelectedFile> {
        self.files.first()
    }
}

/// フォームの submit イベント
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// ページ再読み込み（既定の動作）を抑止する
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone)]
struct FormFields {
    expense_type: String,
    expense_name: String,
    date: String,
    amount: String,
    vat: String,
    pct: String,
    commentary: String,
    file: String,
    alerts: Vec<String>,
}

/// メモリ上のフォーム状態
///
/// 初期状態は経費タイプ以外すべて空
#[derive(Debug)]
pub struct FormState {
    fields: Mutex<FormFields>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: Mutex::new(FormFields {
                expense_type: DEFAULT_EXPENSE_TYPE.to_string(),
                expense_name: String::new(),
                date: String::new(),
                amount: String::new(),
                vat: String::new(),
                pct: String::new(),
                commentary: String::new(),
                file: String::new(),
                alerts: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormFields> {
        self.fields
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// data-testid で指定したフィールドの値を取得する
    pub fn value(&self, test_id: &str) -> Option<String> {
        let fields = self.lock();
        let value = match test_id {
            test_ids::EXPENSE_TYPE => &fields.expense_type,
            test_ids::EXPENSE_NAME => &fields.expense_name,
            test_ids::DATEPICKER => &fields.date,
            test_ids::AMOUNT => &fields.amount,
            test_ids::VAT => &fields.vat,
            test_ids::PCT => &fields.pct,
            test_ids::COMMENTARY => &fields.commentary,
            test_ids::FILE => &fields.file,
            _ => return None,
        };
        Some(value.clone())
    }

    /// data-testid で指定したフィールドに値を設定する
    ///
    /// 未知の識別子、または経費タイプの選択肢にない値の場合は false
    pub fn set_value(&self, test_id: &str, value: &str) -> bool {
        if test_id == test_ids::EXPENSE_TYPE && !EXPENSE_TYPES.contains(&value) {
            return false;
        }

        let mut fields = self.lock();
        let slot = match test_id {
            test_ids::EXPENSE_TYPE => &mut fields.expense_type,
            test_ids::EXPENSE_NAME => &mut fields.expense_name,
            test_ids::DATEPICKER => &mut fields.date,
            test_ids::AMOUNT => &mut fields.amount,
            test_ids::VAT => &mut fields.vat,
            test_ids::PCT => &mut fields.pct,
            test_ids::COMMENTARY => &mut fields.commentary,
            test_ids::FILE => &mut fields.file,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// 表示された警告
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }
}

impl NewBillForm for FormState {
    fn expense_type(&self) -> String {
        self.lock().expense_type.clone()
    }

    fn expense_name(&self) -> String {
        self.lock().expense_name.clone()
    }

    fn date(&self) -> String {
        self.lock().date.clone()
    }

    fn amount(&self) -> String {
        self.lock().amount.clone()
    }

    fn vat(&self) -> String {
        self.lock().vat.clone()
    }

    fn pct(&self) -> String {
        self.lock().pct.clone()
    }

    fn commentary(&self) -> String {
        self.lock().commentary.clone()
    }

    fn clear_file(&self) {
        self.lock().file.clear();
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }
}
