//! スタックプロパティ
//!
//! 解決済みコンテキストのうち、コンストラクトが直接参照する値の型付きビュー。

use crate::naming::{NamingConvention, NamingOptions, ResourceKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// ステージコンテキストディレクトリのデフォルト
pub const DEFAULT_STAGE_CONTEXT_PATH: &str = "cdkEnv";

/// スタックプロパティ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackProps {
    /// スタック名
    #[serde(default)]
    pub stack_name: Option<String>,
    /// デプロイステージ（dev, tst, uat, prd など）
    pub stage: String,
    /// リージョン
    #[serde(default)]
    pub region: Option<String>,
    /// ドメイン名（example.com）
    #[serde(default)]
    pub domain_name: Option<String>,
    /// サブドメイン（api → api.example.com）
    #[serde(default)]
    pub sub_domain: Option<String>,
    #[serde(default)]
    pub global_prefix: Option<String>,
    #[serde(default)]
    pub global_suffix: Option<String>,
    #[serde(default)]
    pub resource_prefix: Option<String>,
    #[serde(default)]
    pub resource_suffix: Option<String>,
    /// リソース種別ごとの命名オプション
    #[serde(default)]
    pub resource_name_options: BTreeMap<ResourceKind, NamingOptions>,
    /// true の場合、DNSレコード名にステージを付けない
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub skip_stage_for_a_records: bool,
    #[serde(default)]
    pub stage_context_path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub debug: bool,
}

impl StackProps {
    /// 命名規約を組み立てる
    pub fn naming_convention(&self) -> NamingConvention {
        NamingConvention {
            global_prefix: self.global_prefix.clone(),
            global_suffix: self.global_suffix.clone(),
            resource_prefix: self.resource_prefix.clone(),
            resource_suffix: self.resource_suffix.clone(),
            options: self.resource_name_options.clone(),
        }
    }

    pub fn stage_context_path(&self) -> &str {
        self.stage_context_path
            .as_deref()
            .unwrap_or(DEFAULT_STAGE_CONTEXT_PATH)
    }
}

/// フラグ値の真偽判定
///
/// `true`、`"true"`（大文字小文字を区別しない）、`"1"`、0 以外の数値を真とみなす。
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn deserialize_truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}
