// 請求書機能モジュール

pub mod api_store;
pub mod in_memory;
pub mod list_controller;
pub mod models;
pub mod new_bill_controller;
pub mod presentation;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_support;

// モデル
pub use models::{
    Bill, BillStatus, DisplayBill, FileUpload, NewBill, UploadedFile, DEFAULT_EXPENSE_TYPE,
    EXPENSE_TYPES,
};

// ストア
pub use api_store::HttpStore;
pub use in_memory::InMemoryStore;
pub use store::{BillsResource, Store};

// コントローラー
pub use list_controller::BillsController;
pub use new_bill_controller::{
    FileAttachment, FileChangeOutcome, NewBillController, NewBillState, SubmitOutcome,
    FILE_FORMAT_ERROR,
};

// ビュー
pub use presentation::sort_for_display;
pub use view::{
    ElementAttributes, FileChangeEvent, FormState, NewBillForm, ProofImage, ProofModal,
    SelectedFile, SubmitEvent,
};
