// コントローラーのテスト用ダブル

use super::view::{ElementAttributes, ProofImage, ProofModal};
use crate::features::navigation::Navigator;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

/// 遷移先を記録するナビゲーター
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// 表示内容と show 呼び出し回数を記録するモーダル
#[derive(Debug)]
pub struct RecordingModal {
    width: u32,
    contents: Mutex<Vec<ProofImage>>,
    show_calls: Mutex<usize>,
}

impl RecordingModal {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            contents: Mutex::new(Vec::new()),
            show_calls: Mutex::new(0),
        }
    }

    pub fn contents(&self) -> Vec<ProofImage> {
        self.contents.lock().unwrap().clone()
    }

    pub fn show_calls(&self) -> usize {
        *self.show_calls.lock().unwrap()
    }
}

impl ProofModal for RecordingModal {
    fn width(&self) -> u32 {
        self.width
    }

    fn set_content(&self, image: &ProofImage) {
        self.contents.lock().unwrap().push(image.clone());
    }

    fn show(&self) {
        *self.show_calls.lock().unwrap() += 1;
    }
}

/// 属性だけを持つ要素
#[derive(Debug, Default)]
pub struct FakeElement {
    attributes: HashMap<String, String>,
}

impl FakeElement {
    pub fn with_attribute(name: &str, value: &str) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert(name.to_string(), value.to_string());
        Self { attributes }
    }
}

impl ElementAttributes for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

thread_local! {
    static CAPTURED_LOGS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// ログをスレッドごとに記録するロガー
struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = (record.level(), record.args().to_string());
        CAPTURED_LOGS.with(|logs| logs.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// ログの記録を開始する（このスレッドの記録は空にする）
///
/// `#[tokio::test]` はカレントスレッドで動くため、テスト中のログはこのスレッドに残る
pub fn start_log_capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    CAPTURED_LOGS.with(|logs| logs.borrow_mut().clear());
}

/// このスレッドで記録された Error レベルのメッセージ
pub fn captured_errors() -> Vec<String> {
    CAPTURED_LOGS.with(|logs| {
        logs.borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
