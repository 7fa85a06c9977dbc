//! リソース名フォーマッター
//!
//! 論理名からクラウドリソースの物理名を組み立てます。
//! 組み立て順序（区切り文字は `-`、空の要素はスキップ）:
//!
//! ```text
//! [globalPrefix] [prefix] <論理名> [suffix] [globalSuffix]
//! ```
//!
//! ステージ名は付与しません。ステージ付きの名前が必要な呼び出し側で
//! `-{stage}` を明示的に追加します。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 名前の要素を結合する区切り文字
pub const NAME_SEPARATOR: &str = "-";

/// 命名オプションを持つリソース種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    ApiGateway,
    AppConfig,
    CloudFront,
    CloudTrail,
    CloudWatch,
    DynamoDb,
    Ecr,
    Ecs,
    Efs,
    ElastiCache,
    EventBridge,
    Iam,
    Kms,
    Lambda,
    Route53,
    S3,
    SecretsManager,
    Sns,
    Sqs,
    Ssm,
    StepFunctions,
    Vpc,
    Waf,
    CloudflareWorker,
    CloudflareZone,
    CloudflarePage,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::ApiGateway,
        ResourceKind::AppConfig,
        ResourceKind::CloudFront,
        ResourceKind::CloudTrail,
        ResourceKind::CloudWatch,
        ResourceKind::DynamoDb,
        ResourceKind::Ecr,
        ResourceKind::Ecs,
        ResourceKind::Efs,
        ResourceKind::ElastiCache,
        ResourceKind::EventBridge,
        ResourceKind::Iam,
        ResourceKind::Kms,
        ResourceKind::Lambda,
        ResourceKind::Route53,
        ResourceKind::S3,
        ResourceKind::SecretsManager,
        ResourceKind::Sns,
        ResourceKind::Sqs,
        ResourceKind::Ssm,
        ResourceKind::StepFunctions,
        ResourceKind::Vpc,
        ResourceKind::Waf,
        ResourceKind::CloudflareWorker,
        ResourceKind::CloudflareZone,
        ResourceKind::CloudflarePage,
    ];

    /// 設定ファイル上のキー名
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ApiGateway => "apigateway",
            ResourceKind::AppConfig => "appconfig",
            ResourceKind::CloudFront => "cloudfront",
            ResourceKind::CloudTrail => "cloudtrail",
            ResourceKind::CloudWatch => "cloudwatch",
            ResourceKind::DynamoDb => "dynamodb",
            ResourceKind::Ecr => "ecr",
            ResourceKind::Ecs => "ecs",
            ResourceKind::Efs => "efs",
            ResourceKind::ElastiCache => "elasticache",
            ResourceKind::EventBridge => "eventbridge",
            ResourceKind::Iam => "iam",
            ResourceKind::Kms => "kms",
            ResourceKind::Lambda => "lambda",
            ResourceKind::Route53 => "route53",
            ResourceKind::S3 => "s3",
            ResourceKind::SecretsManager => "secretsmanager",
            ResourceKind::Sns => "sns",
            ResourceKind::Sqs => "sqs",
            ResourceKind::Ssm => "ssm",
            ResourceKind::StepFunctions => "stepfunctions",
            ResourceKind::Vpc => "vpc",
            ResourceKind::Waf => "waf",
            ResourceKind::CloudflareWorker => "cloudflareworker",
            ResourceKind::CloudflareZone => "cloudflarezone",
            ResourceKind::CloudflarePage => "cloudflarepage",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "未知のリソース種別: {}\n利用可能な種別: {}",
                    s,
                    ResourceKind::ALL
                        .iter()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// リソース種別ごとの命名オプション
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingOptions {
    /// true の場合、論理名をそのまま使う（他のフィールドはすべて無視）
    pub exclude: bool,
    /// false の場合、グローバルプレフィックスを付けない
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_prefix: Option<bool>,
    /// false の場合、グローバルサフィックスを付けない
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_suffix: Option<bool>,
    /// リソースプレフィックスの上書き（空文字で無効化）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// リソースサフィックスの上書き（空文字で無効化）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl NamingOptions {
    /// 論理名をそのまま通すオプション
    pub fn excluded() -> Self {
        Self {
            exclude: true,
            ..Default::default()
        }
    }
}

/// スタック全体で共通の命名規約
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingConvention {
    pub global_prefix: Option<String>,
    pub global_suffix: Option<String>,
    pub resource_prefix: Option<String>,
    pub resource_suffix: Option<String>,
    pub options: BTreeMap<ResourceKind, NamingOptions>,
}

impl NamingConvention {
    pub fn options_for(&self, kind: ResourceKind) -> Option<&NamingOptions> {
        self.options.get(&kind)
    }

    /// リソース種別の命名オプションを適用して物理名を作る
    pub fn format_kind(&self, kind: ResourceKind, logical_name: &str) -> String {
        self.format(logical_name, self.options_for(kind))
    }

    /// 論理名から物理名を作る
    pub fn format(&self, logical_name: &str, options: Option<&NamingOptions>) -> String {
        let default_options = NamingOptions::default();
        let options = options.unwrap_or(&default_options);

        if options.exclude {
            return logical_name.to_string();
        }

        let global_prefix = match options.global_prefix {
            Some(false) => None,
            _ => self.global_prefix.as_deref(),
        };
        let prefix = options
            .prefix
            .as_deref()
            .or(self.resource_prefix.as_deref());
        let suffix = options
            .suffix
            .as_deref()
            .or(self.resource_suffix.as_deref());
        let global_suffix = match options.global_suffix {
            Some(false) => None,
            _ => self.global_suffix.as_deref(),
        };

        [
            global_prefix,
            prefix,
            Some(logical_name),
            suffix,
            global_suffix,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
    }
}
