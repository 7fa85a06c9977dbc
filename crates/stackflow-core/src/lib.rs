//! stackflow core
//!
//! デプロイ（スタック）ごとの設定コンテキストを解決し、
//! クラウドリソースの物理名を共通の命名規約で組み立てます。
//!
//! ```text
//! base context ──▶ extraContexts (上書き) ──▶ <stageContextPath>/<stage>.json (深いマージ)
//!                                                        │
//!                                                        ▼
//!                                       ResolvedContext ─▶ Stack ─▶ Construct ─▶ resource names
//! ```

pub mod construct;
pub mod context;
pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod naming;
pub mod stack;

pub use construct::Construct;
pub use context::{ContextLayer, LayerKind, LayerSummary, ResolvedContext, resolve_layers};
pub use error::{Result, StackError};
pub use loader::{ContextLoader, load_context, read_context_file, read_required_context_file};
pub use merge::{ContextMap, MergeStrategy, merge_config, overlay};
pub use model::*;
pub use naming::{NamingConvention, NamingOptions, ResourceKind};
pub use stack::Stack;
