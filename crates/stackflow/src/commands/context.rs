use crate::GlobalArgs;
use crate::utils::load_stack;
use serde_json::Value;

pub fn handle(args: &GlobalArgs, key: Option<&str>) -> anyhow::Result<()> {
    let (_, stack) = load_stack(args)?;
    let context = stack.context();

    let output = match key {
        Some(key) => context
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("コンテキストにキーがありません: {}", key))?,
        None => Value::Object(context.values().clone()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
