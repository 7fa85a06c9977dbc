mod commands;
mod utils;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "ステージごとのコンテキストを解決し、リソース名を組み立てる", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// 全コマンド共通のオプション
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// プロジェクトファイル（省略時は stackflow.json を探索）
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// ステージ名 (dev, tst, uat, prd)
    #[arg(short = 's', long = "stage", global = true, env = "STACKFLOW_STAGE")]
    pub stage: Option<String>,

    /// コンテキストの上書き（key=value、複数指定可）
    #[arg(short = 'c', long = "context", global = true, value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// 診断ログを有効化（debug コンテキストフラグを立てる）
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// `--debug` または `-c debug=<truthy>` が指定されているか
    pub fn debug_requested(&self) -> bool {
        self.debug
            || self.context.iter().any(|arg| {
                stackflow_config::parse_context_arg(arg)
                    .is_ok_and(|(key, value)| key == "debug" && stackflow_core::is_truthy(&value))
            })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 解決済みコンテキストをJSONで表示
    Context {
        /// 指定したキーの値のみ表示
        #[arg(short, long)]
        key: Option<String>,
    },
    /// リソースの物理名を表示
    Name {
        /// 論理名
        logical_name: String,
        /// リソース種別 (lambda, sqs, s3, dynamodb, ...)
        #[arg(short, long)]
        kind: String,
        /// 末尾にステージ名を付ける
        #[arg(long)]
        with_stage: bool,
    },
    /// 設定を検証
    Validate,
    /// バージョン情報を表示
    Version,
}

fn init_tracing(debug: bool) {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout はコマンド出力に使うので、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.global.debug_requested());

    match cli.command {
        Commands::Version => {
            println!("stackflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Context { key } => commands::context::handle(&cli.global, key.as_deref()),
        Commands::Name {
            logical_name,
            kind,
            with_stage,
        } => commands::name::handle(&cli.global, &logical_name, &kind, with_stage),
        Commands::Validate => commands::validate::handle(&cli.global),
    }
}
