use crate::GlobalArgs;
use crate::utils::load_stack;
use stackflow_core::{Construct, ResourceKind};

pub fn handle(
    args: &GlobalArgs,
    logical_name: &str,
    kind: &str,
    with_stage: bool,
) -> anyhow::Result<()> {
    let kind: ResourceKind = kind.parse().map_err(anyhow::Error::msg)?;
    let (_, stack) = load_stack(args)?;
    let construct = Construct::new(&stack, "cli");

    let name = if with_stage {
        construct.stage_resource_name(kind, logical_name)?
    } else {
        construct.resource_name(kind, logical_name)?
    };

    println!("{}", name);
    Ok(())
}
