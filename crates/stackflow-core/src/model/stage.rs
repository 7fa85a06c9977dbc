//! ステージ定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// ステージ未指定時に使うステージ名
pub const DEFAULT_STAGE: &str = "dev";

/// ステージの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Development,
    Test,
    Uat,
    Production,
    Other,
}

impl StageKind {
    /// ステージ名から分類を判定
    ///
    /// 大文字小文字は区別しません。
    pub fn classify(stage: &str) -> Self {
        match stage.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => StageKind::Development,
            "tst" | "test" => StageKind::Test,
            "uat" => StageKind::Uat,
            "prd" | "prod" | "production" => StageKind::Production,
            _ => StageKind::Other,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Development => "development",
            StageKind::Test => "test",
            StageKind::Uat => "uat",
            StageKind::Production => "production",
            StageKind::Other => "other",
        };
        f.write_str(label)
    }
}

pub fn is_development_stage(stage: &str) -> bool {
    StageKind::classify(stage) == StageKind::Development
}

pub fn is_test_stage(stage: &str) -> bool {
    StageKind::classify(stage) == StageKind::Test
}

pub fn is_uat_stage(stage: &str) -> bool {
    StageKind::classify(stage) == StageKind::Uat
}

pub fn is_production_stage(stage: &str) -> bool {
    StageKind::classify(stage) == StageKind::Production
}
