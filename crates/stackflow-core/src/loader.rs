//! コンテキスト解決パイプライン
//!
//! ベース設定 → 追加コンテキスト → ステージコンテキスト の順に重ねて、
//! スタックが使う最終的なコンテキストを組み立てます。
//!
//! - 追加コンテキスト (`extraContexts`): 宣言されたファイルは必須。トップレベルのキーを上書き
//! - ステージコンテキスト (`<stageContextPath>/<stage>.json`): 任意。オブジェクトは深いマージ

use crate::context::{
    ContextLayer, DEBUG_KEY, EXTRA_CONTEXTS_KEY, LayerKind, ResolvedContext,
    STAGE_CONTEXT_PATH_KEY, STAGE_KEY,
};
use crate::error::{Result, StackError};
use crate::merge::{ContextMap, overlay};
use crate::model::{DEFAULT_STAGE_CONTEXT_PATH, is_truthy};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// コンテキストローダー
#[derive(Debug, Clone)]
pub struct ContextLoader {
    project_root: PathBuf,
    base: ContextMap,
}

impl ContextLoader {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            base: ContextMap::new(),
        }
    }

    /// ベース設定を指定
    pub fn with_base(mut self, base: ContextMap) -> Self {
        self.base = base;
        self
    }

    /// 全フェーズを実行してコンテキストを解決
    #[instrument(skip(self), fields(project_root = %self.project_root.display()))]
    pub fn load(&self) -> Result<ResolvedContext> {
        let base = ContextLayer::base(self.base.clone());
        let mut summaries = vec![base.summary()];
        let mut values = base.values;

        // 1. 追加コンテキスト
        for layer in self.read_extra_contexts(&values)? {
            summaries.push(layer.summary());
            values = overlay(values, layer.values, LayerKind::Extra.merge_strategy());
        }

        // 2. ステージコンテキスト（追加コンテキスト適用後の値で決定）
        if let Some(layer) = self.read_stage_context(&values)? {
            summaries.push(layer.summary());
            values = overlay(values, layer.values, LayerKind::Stage.merge_strategy());
        }

        info!(
            keys = values.len(),
            layers = summaries.len(),
            "Context resolved"
        );

        Ok(ResolvedContext::new(values, summaries))
    }

    /// `extraContexts` に宣言されたファイルを順に読み込む
    fn read_extra_contexts(&self, values: &ContextMap) -> Result<Vec<ContextLayer>> {
        let diagnostics = debug_enabled(values);
        let paths = extra_context_paths(values)?;

        if paths.is_empty() {
            if diagnostics {
                debug!("No extra contexts declared");
            }
            return Ok(Vec::new());
        }

        let mut layers = Vec::with_capacity(paths.len());
        for relative in paths {
            let path = self.project_root.join(&relative);
            if diagnostics {
                debug!(file = %path.display(), "Loading extra context");
            }

            let context = read_required_context_file(&path)?;

            if diagnostics {
                debug!(
                    file = %path.display(),
                    keys = context.len(),
                    "Applied extra context"
                );
            }
            layers.push(ContextLayer {
                kind: LayerKind::Extra,
                path: Some(path),
                values: context,
            });
        }

        Ok(layers)
    }

    /// ステージコンテキストを読み込む（ファイルが無ければ None）
    fn read_stage_context(&self, values: &ContextMap) -> Result<Option<ContextLayer>> {
        let diagnostics = debug_enabled(values);

        let Some(path) = stage_context_file(&self.project_root, values)? else {
            if diagnostics {
                debug!("No stage set, skipping stage context");
            }
            return Ok(None);
        };

        match read_context_file(&path)? {
            Some(context) => {
                if diagnostics {
                    debug!(
                        file = %path.display(),
                        keys = context.len(),
                        "Applied stage context"
                    );
                }
                Ok(Some(ContextLayer {
                    kind: LayerKind::Stage,
                    path: Some(path),
                    values: context,
                }))
            }
            None => {
                if diagnostics {
                    debug!(
                        file = %path.display(),
                        "Stage context not found, using resolved defaults"
                    );
                }
                Ok(None)
            }
        }
    }
}

/// コンテキストを解決する
pub fn load_context(project_root: &Path, base: ContextMap) -> Result<ResolvedContext> {
    ContextLoader::new(project_root).with_base(base).load()
}

/// `extraContexts` の値をパス一覧として取り出す
///
/// 文字列の配列、またはカンマ区切りの文字列を受け付けます。
pub fn extra_context_paths(values: &ContextMap) -> Result<Vec<String>> {
    let invalid = |message: &str| StackError::InvalidContextValue {
        key: EXTRA_CONTEXTS_KEY.to_string(),
        message: message.to_string(),
    };

    match values.get(EXTRA_CONTEXTS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                _ => Err(invalid("パスは空でない文字列である必要があります")),
            })
            .collect(),
        Some(_) => Err(invalid("文字列の配列を指定してください")),
    }
}

/// ステージコンテキストファイルのパスを求める
///
/// `stage` が未設定なら None。
pub fn stage_context_file(project_root: &Path, values: &ContextMap) -> Result<Option<PathBuf>> {
    let stage = match values.get(STAGE_KEY) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim(),
        Some(_) => {
            return Err(StackError::InvalidContextValue {
                key: STAGE_KEY.to_string(),
                message: "文字列を指定してください".to_string(),
            });
        }
    };

    let dir = match values.get(STAGE_CONTEXT_PATH_KEY) {
        None | Some(Value::Null) => DEFAULT_STAGE_CONTEXT_PATH,
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(StackError::InvalidContextValue {
                key: STAGE_CONTEXT_PATH_KEY.to_string(),
                message: "文字列を指定してください".to_string(),
            });
        }
    };

    Ok(Some(project_root.join(dir).join(format!("{}.json", stage))))
}

/// 必須のJSONコンテキストファイルを読み込む
pub fn read_required_context_file(path: &Path) -> Result<ContextMap> {
    read_context_file(path)?.ok_or_else(|| StackError::ContextFileNotFound {
        path: path.to_path_buf(),
    })
}

/// JSONコンテキストファイルを読み込む
///
/// ファイルが存在しない場合は `Ok(None)`。
pub fn read_context_file(path: &Path) -> Result<Option<ContextMap>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| StackError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| StackError::InvalidJson {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(StackError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

fn debug_enabled(values: &ContextMap) -> bool {
    values.get(DEBUG_KEY).is_some_and(is_truthy)
}
