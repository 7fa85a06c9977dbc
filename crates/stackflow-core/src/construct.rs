//! コンストラクト
//!
//! リソースを作るコード（マネージャー）がスタックの解決済みプロパティを参照するための基底型。
//! 物理名の組み立てと必須プロパティの検証を担います。

use crate::error::{Result, StackError};
use crate::model::StageKind;
use crate::naming::ResourceKind;
use crate::stack::Stack;
use serde::de::DeserializeOwned;

/// スタック配下のコンストラクト
#[derive(Debug, Clone, Copy)]
pub struct Construct<'a> {
    stack: &'a Stack,
    id: &'a str,
}

impl<'a> Construct<'a> {
    pub fn new(stack: &'a Stack, id: &'a str) -> Self {
        Self { stack, id }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn stack(&self) -> &Stack {
        self.stack
    }

    /// リソースの物理名
    ///
    /// 論理名が空の場合は設定エラー。
    pub fn resource_name(&self, kind: ResourceKind, logical_name: &str) -> Result<String> {
        if logical_name.trim().is_empty() {
            return Err(StackError::InvalidConfig(format!(
                "{} のリソース名が空です（コンストラクト: {}）",
                kind, self.id
            )));
        }
        Ok(self.stack.naming().format_kind(kind, logical_name))
    }

    /// ステージ名を付けたリソースの物理名（`<name>-<stage>`）
    pub fn stage_resource_name(&self, kind: ResourceKind, logical_name: &str) -> Result<String> {
        let name = self.resource_name(kind, logical_name)?;
        Ok(format!("{}-{}", name, self.stack.stage()))
    }

    /// 必須プロパティを取得
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.optional(key)?.ok_or_else(|| {
            StackError::MissingProperty(format!("{}（コンストラクト: {}）", key, self.id))
        })
    }

    /// 任意プロパティを取得
    pub fn optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.stack.context().get_as(key)
    }

    /// DNSレコード名
    ///
    /// `skipStageForARecords` が有効、または本番ステージの場合はステージを付けない。
    pub fn dns_record_name(&self, record: &str) -> String {
        let skip_stage = self.stack.props().skip_stage_for_a_records
            || self.stack.stage_kind() == StageKind::Production;

        if skip_stage {
            record.to_string()
        } else {
            format!("{}-{}", record, self.stack.stage())
        }
    }

    pub fn fully_qualified_domain_name(&self) -> Result<String> {
        self.stack.fully_qualified_domain_name()
    }
}
