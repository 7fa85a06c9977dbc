use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
    /// グローバル設定を隔離するための XDG_CONFIG_HOME
    pub config_home: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let config_home = tempfile::tempdir().unwrap();
        Self { root, config_home }
    }

    /// `stackflow.json` を `{"context": ...}` 形式で書き出す
    pub fn write_project_file(&self, context: serde_json::Value) -> PathBuf {
        let path = self.root.path().join("stackflow.json");
        let content = serde_json::json!({ "context": context });
        fs::write(&path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
        path
    }

    /// プロジェクトルートからの相対パスにJSONを書き出す
    pub fn write_json(&self, relative: &str, value: serde_json::Value) {
        self.write_raw(relative, &serde_json::to_string_pretty(&value).unwrap());
    }

    pub fn write_raw(&self, relative: &str, content: &str) {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn write_global_context(&self, value: serde_json::Value) {
        let dir = self.config_home.path().join("stackflow");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("context.json"),
            serde_json::to_string_pretty(&value).unwrap(),
        )
        .unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn config_home(&self) -> &Path {
        self.config_home.path()
    }
}
