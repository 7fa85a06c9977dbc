pub mod base;
pub mod error;
pub mod project;

pub use base::{BaseContext, parse_context_arg};
pub use error::*;
pub use project::{ProjectFile, load_global_context};

use std::path::{Path, PathBuf};
use tracing::debug;

/// プロジェクトファイル名の候補（優先順）
pub const PROJECT_FILE_CANDIDATES: &[&str] = &["stackflow.json", ".stackflow.json"];

/// プロジェクト固有ファイルを置くディレクトリ
pub const PROJECT_DIR: &str = ".stackflow";

/// プロジェクトファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";

/// stackflowの設定ディレクトリを取得（存在するとは限らない）
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("stackflow");
    Ok(config_dir)
}

/// プロジェクトファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 STACKFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリから上に向かって [`find_project_file_from`] で検索
pub fn find_project_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            debug!(path = %path.display(), "Using project file from environment variable");
            return Ok(path);
        }
    }

    // 2. カレントディレクトリから上に向かって探す
    let current_dir = std::env::current_dir()?;
    find_project_file_from(&current_dir)
}

/// 指定ディレクトリから上に向かってプロジェクトファイルを探す
///
/// 各ディレクトリで以下の順に確認:
/// 1. stackflow.json, .stackflow.json
/// 2. .stackflow/stackflow.json
pub fn find_project_file_from(start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for filename in PROJECT_FILE_CANDIDATES {
            let path = current.join(filename);
            if path.is_file() {
                debug!(path = %path.display(), "Found project file");
                return Ok(path);
            }
        }

        let in_dir = current.join(PROJECT_DIR).join(PROJECT_FILE_CANDIDATES[0]);
        if in_dir.is_file() {
            debug!(path = %in_dir.display(), "Found project file in .stackflow/");
            return Ok(in_dir);
        }

        // 親ディレクトリへ
        if !current.pop() {
            break;
        }
    }

    Err(ConfigError::ProjectFileNotFound)
}
