//! Path command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use kinship_core::{MemberId, PathFinder};

#[derive(Args)]
pub struct PathArgs {
    /// Starting member id
    pub from: String,
    /// Target member id
    pub to: String,
    /// Print only the chain of member ids
    #[arg(long)]
    pub ids: bool,
}

pub async fn run(args: &PathArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let from = MemberId::from(&args.from);
    let to = MemberId::from(&args.to);

    for id in [&from, &to] {
        if snapshot.member(id).is_none() {
            anyhow::bail!("Member '{}' not found", id);
        }
    }

    tracing::info!("Finding relationship path from {} to {}", from, to);
    let finder = PathFinder::new(&snapshot.relationships, &snapshot.members);
    let result = finder.find(&from, &to);

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    if !result.connected {
        println!("No relationship found between '{}' and '{}'", from, to);
        return Ok(());
    }

    if args.ids {
        let chain = result.member_ids();
        let ids: Vec<&str> = chain.iter().map(MemberId::as_str).collect();
        println!("{}", ids.join(" -> "));
        return Ok(());
    }

    println!("{}", result.description);
    if !result.is_empty() {
        println!("  ({} hop(s))", result.len());
    }

    Ok(())
}
