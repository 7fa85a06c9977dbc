//! モデル定義
//!
//! スタックが参照するデータモデルを定義します。

mod props;
mod stage;

// Re-exports
pub use props::*;
pub use stage::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{NamingOptions, ResourceKind};
    use serde_json::json;

    #[test]
    fn test_stack_props_from_json() {
        let props: StackProps = serde_json::from_value(json!({
            "stackName": "orders",
            "stage": "prd",
            "region": "eu-west-1",
            "domainName": "example.com",
            "subDomain": "api",
            "globalPrefix": "acme",
            "resourceNameOptions": {
                "route53": {"exclude": true},
                "lambda": {"prefix": "fn"}
            },
            "someOtherKey": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(props.stack_name.as_deref(), Some("orders"));
        assert_eq!(props.stage, "prd");
        assert_eq!(props.region.as_deref(), Some("eu-west-1"));
        assert_eq!(props.sub_domain.as_deref(), Some("api"));
        assert_eq!(
            props.resource_name_options[&ResourceKind::Route53],
            NamingOptions::excluded()
        );
        assert!(!props.debug);
        assert_eq!(props.stage_context_path(), DEFAULT_STAGE_CONTEXT_PATH);
    }

    #[test]
    fn test_stack_props_truthy_flags() {
        let props: StackProps = serde_json::from_value(json!({
            "stage": "dev",
            "debug": "true",
            "skipStageForARecords": 1
        }))
        .unwrap();

        assert!(props.debug);
        assert!(props.skip_stage_for_a_records);
    }

    #[test]
    fn test_naming_convention_from_props() {
        let props: StackProps = serde_json::from_value(json!({
            "stage": "dev",
            "globalPrefix": "acme",
            "resourcePrefix": "svc"
        }))
        .unwrap();

        let naming = props.naming_convention();
        assert_eq!(naming.format_kind(ResourceKind::Sqs, "queue"), "acme-svc-queue");
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("TRUE")));
        assert!(is_truthy(&json!("1")));
        assert!(is_truthy(&json!(2)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("no")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!({"a": 1})));
    }

    #[test]
    fn test_stage_classification() {
        assert_eq!(StageKind::classify("dev"), StageKind::Development);
        assert_eq!(StageKind::classify("Local"), StageKind::Development);
        assert_eq!(StageKind::classify("tst"), StageKind::Test);
        assert_eq!(StageKind::classify("uat"), StageKind::Uat);
        assert_eq!(StageKind::classify("prd"), StageKind::Production);
        assert_eq!(StageKind::classify("production"), StageKind::Production);
        assert_eq!(StageKind::classify("feature-123"), StageKind::Other);

        assert!(is_development_stage(DEFAULT_STAGE));
        assert!(is_test_stage("test"));
        assert!(is_uat_stage("UAT"));
        assert!(is_production_stage("prod"));
        assert!(!is_production_stage("dev"));
    }
}
