use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("コンテキストファイルが見つかりません: {path}")]
    ContextFileNotFound { path: PathBuf },

    #[error("JSONパースエラー: {path}\n理由: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("コンテキストファイルのトップレベルはオブジェクトである必要があります: {path}")]
    NotAnObject { path: PathBuf },

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効なコンテキスト値: '{key}'\n理由: {message}")]
    InvalidContextValue { key: String, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("必須プロパティが未定義です: {0}")]
    MissingProperty(String),
}

impl StackError {
    /// デプロイ定義の誤りに起因するエラーかどうか
    ///
    /// `MissingProperty` と `IoError` 以外はすべて設定エラーとして扱う。
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StackError::ContextFileNotFound { .. }
                | StackError::InvalidJson { .. }
                | StackError::NotAnObject { .. }
                | StackError::InvalidContextValue { .. }
                | StackError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
