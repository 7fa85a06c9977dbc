//! ベースコンテキストの組み立て
//!
//! 優先順位（後ろほど強い）: グローバル設定 < プロジェクトファイル < CLI引数

use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};

/// ベースコンテキストのビルダー
#[derive(Debug, Clone, Default)]
pub struct BaseContext {
    global: Map<String, Value>,
    project: Map<String, Value>,
    overrides: Map<String, Value>,
    stage: Option<String>,
    default_stage: Option<String>,
    debug: bool,
}

impl BaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, global: Map<String, Value>) -> Self {
        self.global = global;
        self
    }

    pub fn with_project(mut self, project: Map<String, Value>) -> Self {
        self.project = project;
        self
    }

    /// CLI引数（`-c key=value`）を追加
    pub fn with_override(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// `--stage` で指定されたステージ（すべてのソースより優先）
    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        self.stage = stage;
        self
    }

    /// どのソースにもステージが無い場合に使うステージ
    pub fn with_default_stage(mut self, stage: impl Into<String>) -> Self {
        self.default_stage = Some(stage.into());
        self
    }

    /// `--debug` が指定された場合に `debug` フラグを立てる
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> Map<String, Value> {
        let mut context = self.global;
        for source in [self.project, self.overrides] {
            for (key, value) in source {
                context.insert(key, value);
            }
        }

        if let Some(stage) = self.stage {
            context.insert("stage".to_string(), Value::String(stage));
        }

        let has_stage = matches!(context.get("stage"), Some(Value::String(s)) if !s.is_empty());
        if !has_stage && let Some(default_stage) = self.default_stage {
            context.insert("stage".to_string(), Value::String(default_stage));
        }

        if self.debug {
            context.insert("debug".to_string(), Value::Bool(true));
        }

        context
    }
}

/// `key=value` 形式のコンテキスト引数をパース
///
/// 値がJSONとして解釈できればその値、できなければ文字列として扱う。
pub fn parse_context_arg(arg: &str) -> Result<(String, Value)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidContextArg(arg.to_string()))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidContextArg(arg.to_string()));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
