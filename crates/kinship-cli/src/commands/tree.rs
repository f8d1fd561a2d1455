//! Tree command

use clap::Args;

use crate::output::{format_level, print_json, OutputFormat};
use crate::AppContext;
use kinship_core::{build_tree, TreeNode};

#[derive(Args)]
pub struct TreeArgs {
    /// Root member id (default: configured root, else first member)
    #[arg(short, long)]
    pub root: Option<String>,
}

fn describe(node: &TreeNode) -> String {
    format!("{} [{}]", node.member.full_name(), node.member.id)
}

pub async fn run(args: &TreeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let root_id = ctx.resolve_root(&snapshot, args.root.as_deref())?;

    let Some(tree) = build_tree(&snapshot.members, &snapshot.relationships, &root_id) else {
        anyhow::bail!("Member '{}' not found", root_id);
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&tree);
    }

    println!("Family tree rooted at {}:", describe(tree.root()));

    let generations = tree.generations();
    let mut reached = 0;
    for (level, row) in &generations {
        println!("\n  Generation {}:", format_level(*level));
        for &idx in row {
            reached += 1;
            let node = tree.node(idx);
            let spouse = tree
                .spouse_of(idx)
                .map(|s| format!("  (spouse: {})", s.member.full_name()))
                .unwrap_or_default();
            let deceased = if node.member.is_living { "" } else { " †" };
            println!("    {}{}{}", describe(node), deceased, spouse);
        }
    }

    let unreachable = tree.len() - reached;
    if unreachable > 0 {
        println!(
            "\n  ({} member(s) not connected to {})",
            unreachable,
            tree.root().member.full_name()
        );
    }

    Ok(())
}
