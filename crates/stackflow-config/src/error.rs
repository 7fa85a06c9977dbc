use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "プロジェクトファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリとその親: stackflow.json, .stackflow.json\n\
        - ./.stackflow/ ディレクトリ: stackflow.json\n\
        または STACKFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ProjectFileNotFound,

    #[error("JSONパースエラー: {path}\n理由: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'context' はオブジェクトである必要があります: {0}")]
    InvalidContext(PathBuf),

    #[error("無効なコンテキスト引数: '{0}'（key=value 形式で指定してください）")]
    InvalidContextArg(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
