//! Stats command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use kinship_core::{build_tree, statistics};

#[derive(Args)]
pub struct StatsArgs {
    /// Root member id (default: configured root, else first member)
    #[arg(short, long)]
    pub root: Option<String>,
}

pub async fn run(args: &StatsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;

    // An empty family still has statistics (all zero)
    let tree = if snapshot.is_empty() {
        None
    } else {
        let root_id = ctx.resolve_root(&snapshot, args.root.as_deref())?;
        build_tree(&snapshot.members, &snapshot.relationships, &root_id)
    };

    let stats = statistics(&snapshot.members, tree.as_ref());

    if ctx.format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("Family statistics:");
    println!("  Members:     {}", stats.member_count);
    println!("  Living:      {}", stats.living_count);
    println!("  Connected:   {}", stats.connected_count);
    println!("  Generations: {}", stats.generation_count);

    Ok(())
}
