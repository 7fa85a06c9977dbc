//! 解決済みコンテキスト
//!
//! ローダーが組み立てた最終的なプロパティ集合。構築後は読み取り専用です。

use crate::error::{Result, StackError};
use crate::merge::{ContextMap, MergeStrategy, overlay};
use crate::model::{StackProps, is_truthy};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// コンテキストキー: 追加コンテキストファイルの一覧
pub const EXTRA_CONTEXTS_KEY: &str = "extraContexts";
/// コンテキストキー: ステージコンテキストのディレクトリ
pub const STAGE_CONTEXT_PATH_KEY: &str = "stageContextPath";
/// コンテキストキー: ステージ名
pub const STAGE_KEY: &str = "stage";
/// コンテキストキー: 診断ログの有効化
pub const DEBUG_KEY: &str = "debug";

/// コンテキストレイヤーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// CLI・プロジェクトファイルから渡されるベース設定
    Base,
    /// `extraContexts` で宣言された追加コンテキスト
    Extra,
    /// `<stageContextPath>/<stage>.json`
    Stage,
}

impl LayerKind {
    pub fn merge_strategy(&self) -> MergeStrategy {
        match self {
            LayerKind::Base | LayerKind::Extra => MergeStrategy::Replace,
            LayerKind::Stage => MergeStrategy::Deep,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LayerKind::Base => "base",
            LayerKind::Extra => "extra",
            LayerKind::Stage => "stage",
        };
        f.write_str(label)
    }
}

/// 1つの設定ソース
#[derive(Debug, Clone)]
pub struct ContextLayer {
    pub kind: LayerKind,
    /// 読み込み元ファイル（ベースレイヤーは None）
    pub path: Option<PathBuf>,
    pub values: ContextMap,
}

impl ContextLayer {
    pub fn base(values: ContextMap) -> Self {
        Self {
            kind: LayerKind::Base,
            path: None,
            values,
        }
    }

    pub fn summary(&self) -> LayerSummary {
        LayerSummary {
            kind: self.kind,
            path: self.path.clone(),
            keys: self.values.keys().cloned().collect(),
        }
    }
}

/// 適用されたレイヤーの記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSummary {
    pub kind: LayerKind,
    pub path: Option<PathBuf>,
    pub keys: Vec<String>,
}

/// レイヤーを順番に適用してコンテキストを求める
///
/// 各レイヤーは種類ごとのマージ戦略で適用されます。
pub fn resolve_layers(layers: &[ContextLayer]) -> ContextMap {
    layers.iter().fold(ContextMap::new(), |acc, layer| {
        overlay(acc, layer.values.clone(), layer.kind.merge_strategy())
    })
}

/// 解決済みコンテキスト
#[derive(Debug, Clone, Default)]
pub struct ResolvedContext {
    values: ContextMap,
    layers: Vec<LayerSummary>,
}

impl ResolvedContext {
    pub fn new(values: ContextMap, layers: Vec<LayerSummary>) -> Self {
        Self { values, layers }
    }

    /// レイヤー列から直接作成（ファイルを読まない）
    pub fn from_layers(layers: &[ContextLayer]) -> Self {
        Self {
            values: resolve_layers(layers),
            layers: layers.iter().map(ContextLayer::summary).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// キーの値を型付きで取得
    ///
    /// キーが無い、または null の場合は `Ok(None)`。
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                StackError::InvalidContextValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            }),
        }
    }

    pub fn stage(&self) -> Option<&str> {
        self.get_str(STAGE_KEY)
    }

    pub fn is_debug(&self) -> bool {
        self.values.get(DEBUG_KEY).is_some_and(is_truthy)
    }

    pub fn values(&self) -> &ContextMap {
        &self.values
    }

    pub fn layers(&self) -> &[LayerSummary] {
        &self.layers
    }

    /// スタックプロパティとして読み出す
    ///
    /// `stage` が無い場合は `MissingProperty`。
    /// `stage` の前後の空白は除去する（ステージファイルの選択と同じ正規化）。
    pub fn to_props(&self) -> Result<StackProps> {
        match self.values.get(STAGE_KEY) {
            None | Some(Value::Null) => {
                return Err(StackError::MissingProperty(STAGE_KEY.to_string()));
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(StackError::MissingProperty(STAGE_KEY.to_string()));
            }
            _ => {}
        }

        let mut props: StackProps = serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| {
                StackError::InvalidConfig(format!("スタックプロパティを読み込めません: {}", e))
            })?;
        props.stage = props.stage.trim().to_string();
        Ok(props)
    }
}
