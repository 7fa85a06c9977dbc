use crate::GlobalArgs;
use crate::utils::load_stack;
use colored::Colorize;
use stackflow_core::{LayerKind, Stack};

pub fn handle(args: &GlobalArgs) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let (project, stack) = match load_stack(args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {:#}", e);
            std::process::exit(1);
        }
    };

    println!(
        "プロジェクトファイル: {}",
        project.path.display().to_string().cyan()
    );
    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();

    print_layers(&stack);
    print_summary(&stack);

    Ok(())
}

fn print_layers(stack: &Stack) {
    println!("📄 適用されたコンテキスト:");
    for layer in stack.context().layers() {
        let source = match (&layer.kind, &layer.path) {
            (LayerKind::Base, _) => "(base)".to_string(),
            (_, Some(path)) => path.display().to_string(),
            (_, None) => "(inline)".to_string(),
        };
        println!(
            "  • [{}] {} ({}個のキー)",
            layer.kind,
            source.cyan(),
            layer.keys.len()
        );
    }
    println!();
}

fn print_summary(stack: &Stack) {
    let props = stack.props();

    println!("サマリー:");
    println!(
        "  ステージ: {} ({})",
        stack.stage().cyan(),
        stack.stage_kind()
    );
    if let Some(name) = &props.stack_name {
        println!("  スタック: {}", name.cyan());
    }
    if let Some(region) = &props.region {
        println!("  リージョン: {}", region);
    }
    match stack.fully_qualified_domain_name() {
        Ok(domain) => println!("  ドメイン: {}", domain),
        Err(_) => println!("  ドメイン: {}", "(未設定)".dimmed()),
    }

    let naming = stack.naming();
    println!("  命名規約:");
    println!(
        "    globalPrefix: {}",
        naming.global_prefix.as_deref().unwrap_or("(未設定)")
    );
    println!(
        "    resourcePrefix: {}",
        naming.resource_prefix.as_deref().unwrap_or("(未設定)")
    );
    println!(
        "    resourceSuffix: {}",
        naming.resource_suffix.as_deref().unwrap_or("(未設定)")
    );
    println!(
        "    globalSuffix: {}",
        naming.global_suffix.as_deref().unwrap_or("(未設定)")
    );
    if !naming.options.is_empty() {
        println!("    リソース種別ごとのオプション: {}個", naming.options.len());
        for (kind, options) in &naming.options {
            let detail = if options.exclude {
                "exclude".to_string()
            } else {
                serde_json::to_string(options).unwrap_or_default()
            };
            println!("      - {} {}", kind.to_string().cyan(), detail);
        }
    }
}
