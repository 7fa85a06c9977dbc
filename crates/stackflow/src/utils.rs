use crate::GlobalArgs;
use anyhow::Context as _;
use stackflow_config::{
    BaseContext, ProjectFile, find_project_file, load_global_context, parse_context_arg,
};
use stackflow_core::{DEFAULT_STAGE, Stack};

/// CLI引数からスタックを構築する（共通ロジック）
///
/// 読み込み順序: グローバル設定 → プロジェクトファイル → `-c` 引数 → `--stage`
/// その後、extraContexts とステージコンテキストを重ねる。
pub fn load_stack(args: &GlobalArgs) -> anyhow::Result<(ProjectFile, Stack)> {
    let project = load_project_file(args)?;
    let global = load_global_context()?.unwrap_or_default();

    let overrides = args
        .context
        .iter()
        .map(|arg| parse_context_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let base = BaseContext::new()
        .with_global(global)
        .with_project(project.context.clone())
        .with_overrides(overrides)
        .with_stage(args.stage.clone())
        .with_default_stage(DEFAULT_STAGE)
        .with_debug(args.debug)
        .build();

    let stack = Stack::new(&project.root, base)
        .with_context(|| format!("スタックを構築できません: {}", project.path.display()))?;

    Ok((project, stack))
}

fn load_project_file(args: &GlobalArgs) -> anyhow::Result<ProjectFile> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => find_project_file()?,
    };
    Ok(ProjectFile::load(&path)?)
}
