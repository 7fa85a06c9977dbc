//! コンテキスト値のマージ
//!
//! オブジェクト同士は再帰的にマージし、それ以外（配列、スカラー、型の不一致）は
//! 後から来た値で置き換えます。

use serde_json::{Map, Value};

/// トップレベルのコンテキストマップ
pub type ContextMap = Map<String, Value>;

/// レイヤーを適用する際のマージ戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// トップレベルのキーを無条件に上書き
    Replace,
    /// トップレベルのキーごとに [`merge_config`] で深いマージ
    Deep,
}

/// 2つの値をマージする
///
/// - 両方がオブジェクトの場合: キーごとに再帰的にマージ（衝突時は `incoming` が優先、
///   `existing` にしかないキーは残る）
/// - それ以外: `incoming` をそのまま返す
pub fn merge_config(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_entry(&mut base, key, value);
            }
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}

/// レイヤーをトップレベルマップに重ねる
///
/// `layer` のキー順に適用します。
pub fn overlay(mut base: ContextMap, layer: ContextMap, strategy: MergeStrategy) -> ContextMap {
    for (key, value) in layer {
        match strategy {
            MergeStrategy::Replace => {
                base.insert(key, value);
            }
            MergeStrategy::Deep => merge_entry(&mut base, key, value),
        }
    }
    base
}

/// 既存キーの位置を保ったまま1エントリをマージ
fn merge_entry(base: &mut ContextMap, key: String, value: Value) {
    match base.get_mut(&key) {
        Some(current) => {
            let existing = current.take();
            *current = merge_config(existing, value);
        }
        None => {
            base.insert(key, value);
        }
    }
}
