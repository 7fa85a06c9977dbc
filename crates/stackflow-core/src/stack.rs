//! スタック
//!
//! コンテキストを解決し、配下のコンストラクトが参照するプロパティと命名規約を保持します。

use crate::context::ResolvedContext;
use crate::error::{Result, StackError};
use crate::loader::ContextLoader;
use crate::merge::ContextMap;
use crate::model::{StackProps, StageKind};
use crate::naming::NamingConvention;
use std::path::Path;
use tracing::{info, instrument};

/// 1回のデプロイに対応するスタック
#[derive(Debug, Clone)]
pub struct Stack {
    context: ResolvedContext,
    props: StackProps,
    naming: NamingConvention,
}

impl Stack {
    /// コンテキストを解決してスタックを作成
    #[instrument(skip(project_root, base), fields(project_root = %project_root.display()))]
    pub fn new(project_root: &Path, base: ContextMap) -> Result<Self> {
        let context = ContextLoader::new(project_root).with_base(base).load()?;
        Self::from_resolved(context)
    }

    /// 解決済みコンテキストからスタックを作成
    pub fn from_resolved(context: ResolvedContext) -> Result<Self> {
        let props = context.to_props()?;
        let naming = props.naming_convention();

        info!(
            stage = %props.stage,
            stack_name = props.stack_name.as_deref().unwrap_or("(unnamed)"),
            "Stack initialized"
        );

        Ok(Self {
            context,
            props,
            naming,
        })
    }

    pub fn context(&self) -> &ResolvedContext {
        &self.context
    }

    pub fn props(&self) -> &StackProps {
        &self.props
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    pub fn stage(&self) -> &str {
        &self.props.stage
    }

    pub fn stage_kind(&self) -> StageKind {
        StageKind::classify(&self.props.stage)
    }

    pub fn is_development_stage(&self) -> bool {
        self.stage_kind() == StageKind::Development
    }

    pub fn is_test_stage(&self) -> bool {
        self.stage_kind() == StageKind::Test
    }

    pub fn is_uat_stage(&self) -> bool {
        self.stage_kind() == StageKind::Uat
    }

    pub fn is_production_stage(&self) -> bool {
        self.stage_kind() == StageKind::Production
    }

    /// 完全修飾ドメイン名（`subDomain.domainName` または `domainName`）
    pub fn fully_qualified_domain_name(&self) -> Result<String> {
        let domain = self
            .props
            .domain_name
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| StackError::MissingProperty("domainName".to_string()))?;

        Ok(match self.props.sub_domain.as_deref() {
            Some(sub) if !sub.is_empty() => format!("{}.{}", sub, domain),
            _ => domain.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::Construct;
    use crate::naming::ResourceKind;
    use serde_json::{Value, json};
    use std::fs;

    fn map(value: Value) -> ContextMap {
        match value {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_stack_from_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("cdkEnv")).unwrap();
        fs::write(
            root.join("cdkEnv/prd.json"),
            r#"{"subDomain": "api", "globalPrefix": "acme"}"#,
        )
        .unwrap();

        let stack = Stack::new(
            root,
            map(json!({"stage": "prd", "domainName": "example.com"})),
        )
        .unwrap();

        assert_eq!(stack.stage(), "prd");
        assert!(stack.is_production_stage());
        assert!(!stack.is_development_stage());
        assert_eq!(stack.fully_qualified_domain_name().unwrap(), "api.example.com");
        assert_eq!(stack.naming().global_prefix.as_deref(), Some("acme"));
        assert_eq!(stack.context().layers().len(), 2);
    }

    /// ステージファイルの選択と物理名で同じステージを使う
    #[test]
    fn test_padded_stage_is_normalized() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("cdkEnv")).unwrap();
        fs::write(root.join("cdkEnv/prd.json"), r#"{"retentionDays": 30}"#).unwrap();

        let stack = Stack::new(root, map(json!({"stage": " prd "}))).unwrap();
        let construct = Construct::new(&stack, "orders");

        assert_eq!(stack.context().get("retentionDays"), Some(&json!(30)));
        assert_eq!(stack.stage(), "prd");
        assert!(stack.is_production_stage());
        assert_eq!(
            construct
                .stage_resource_name(ResourceKind::Sqs, "queue")
                .unwrap(),
            "queue-prd"
        );
        assert_eq!(construct.dns_record_name("api"), "api");
    }

    #[test]
    fn test_stack_requires_stage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = Stack::new(temp_dir.path(), map(json!({"domainName": "example.com"})))
            .unwrap_err();

        assert!(matches!(err, StackError::MissingProperty(_)));
    }

    #[test]
    fn test_fully_qualified_domain_name_without_sub_domain() {
        let context = ResolvedContext::from_layers(&[crate::context::ContextLayer::base(map(
            json!({"stage": "dev", "domainName": "example.com"}),
        ))]);
        let stack = Stack::from_resolved(context).unwrap();

        assert_eq!(stack.fully_qualified_domain_name().unwrap(), "example.com");
        assert!(stack.is_development_stage());
    }

    #[test]
    fn test_fully_qualified_domain_name_requires_domain() {
        let context = ResolvedContext::from_layers(&[crate::context::ContextLayer::base(map(
            json!({"stage": "tst"}),
        ))]);
        let stack = Stack::from_resolved(context).unwrap();

        assert!(stack.is_test_stage());
        let err = stack.fully_qualified_domain_name().unwrap_err();
        assert!(matches!(err, StackError::MissingProperty(ref key) if key == "domainName"));
    }
}
