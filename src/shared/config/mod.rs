/// 環境設定とログ初期化
pub mod environment;

pub use environment::{
    get_environment, get_session_file_path, initialize_logging_system,
    load_environment_variables, ApiConfig, Environment, EnvironmentConfig,
};
