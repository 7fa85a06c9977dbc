//! プロジェクトファイルとグローバル設定の読み込み

use crate::error::{ConfigError, Result};
use crate::{PROJECT_DIR, get_config_dir};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// グローバルなデフォルトコンテキストのファイル名（設定ディレクトリ直下）
pub const GLOBAL_CONTEXT_FILE: &str = "context.json";

#[derive(Debug, Deserialize)]
struct RawProjectFile {
    #[serde(default)]
    context: Option<Value>,
}

/// プロジェクトファイル（stackflow.json）
///
/// ```json
/// {
///   "context": {
///     "stackName": "orders",
///     "domainName": "example.com",
///     "extraContexts": ["contexts/common.json"]
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProjectFile {
    /// ファイルのパス
    pub path: PathBuf,
    /// プロジェクトルート（extraContexts などの基準ディレクトリ）
    pub root: PathBuf,
    /// ベースコンテキスト
    pub context: Map<String, Value>,
}

impl ProjectFile {
    /// プロジェクトファイルを読み込む
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: RawProjectFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source: e,
            })?;

        let context = match raw.context {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(ConfigError::InvalidContext(path.to_path_buf())),
        };

        let root = project_root_of(path);
        info!(
            root = %root.display(),
            keys = context.len(),
            "Loaded project file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            root,
            context,
        })
    }
}

/// プロジェクトファイルの位置からプロジェクトルートを求める
///
/// `.stackflow/` 内にある場合はその親ディレクトリ。
fn project_root_of(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if parent.file_name().is_some_and(|name| name == PROJECT_DIR) {
        parent.parent().map(Path::to_path_buf).unwrap_or(parent)
    } else {
        parent
    }
}

/// グローバルなデフォルトコンテキストを読み込む
///
/// `~/.config/stackflow/context.json` が無ければ None。
pub fn load_global_context() -> Result<Option<Map<String, Value>>> {
    let config_dir = match get_config_dir() {
        Ok(dir) => dir,
        Err(ConfigError::ConfigDirNotFound) => return Ok(None),
        Err(e) => return Err(e),
    };

    let path = config_dir.join(GLOBAL_CONTEXT_FILE);
    if !path.is_file() {
        debug!(path = %path.display(), "No global context file");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
        path: path.clone(),
        source: e,
    })?;

    match value {
        Value::Object(map) => {
            debug!(path = %path.display(), keys = map.len(), "Loaded global context");
            Ok(Some(map))
        }
        _ => Err(ConfigError::InvalidContext(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_load_project_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stackflow.json");
        fs::write(
            &path,
            r#"{
                "app": "npx ts-node bin/app.ts",
                "context": {"stackName": "orders", "extraContexts": ["contexts/common.json"]}
            }"#,
        )
        .unwrap();

        let project = ProjectFile::load(&path).unwrap();

        assert_eq!(project.root, temp_dir.path());
        assert_eq!(project.context["stackName"], "orders");
        assert_eq!(project.context.len(), 2);
    }

    #[test]
    fn test_load_project_file_without_context() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stackflow.json");
        fs::write(&path, "{}").unwrap();

        let project = ProjectFile::load(&path).unwrap();
        assert!(project.context.is_empty());
    }

    #[test]
    fn test_project_root_for_project_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_dir = temp_dir.path().join(".stackflow");
        fs::create_dir(&project_dir).unwrap();
        let path = project_dir.join("stackflow.json");
        fs::write(&path, r#"{"context": {}}"#).unwrap();

        let project = ProjectFile::load(&path).unwrap();
        assert_eq!(project.root, temp_dir.path());
    }

    #[test]
    fn test_invalid_project_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stackflow.json");

        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(
            ProjectFile::load(&path),
            Err(ConfigError::InvalidJson { .. })
        ));

        fs::write(&path, r#"{"context": ["a"]}"#).unwrap();
        assert!(matches!(
            ProjectFile::load(&path),
            Err(ConfigError::InvalidContext(_))
        ));
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_load_global_context() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_dir = temp_dir.path().join("stackflow");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(GLOBAL_CONTEXT_FILE),
            r#"{"region": "eu-west-1"}"#,
        )
        .unwrap();

        temp_env::with_var("XDG_CONFIG_HOME", Some(temp_dir.path()), || {
            let global = load_global_context().unwrap().unwrap();
            assert_eq!(global["region"], "eu-west-1");
        });
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_load_global_context_missing() {
        let temp_dir = tempfile::tempdir().unwrap();

        temp_env::with_var("XDG_CONFIG_HOME", Some(temp_dir.path()), || {
            assert!(load_global_context().unwrap().is_none());
        });
    }
}
