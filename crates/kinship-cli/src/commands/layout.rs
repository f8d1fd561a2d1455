//! Layout command

use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use kinship_core::{build_tree, layout, Bounds, MemberId, Position};

#[derive(Args)]
pub struct LayoutArgs {
    /// Root member id (default: configured root, else first member)
    #[arg(short, long)]
    pub root: Option<String>,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    root: &'a MemberId,
    positions: Vec<PlacedCard<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
}

#[derive(Serialize)]
struct PlacedCard<'a> {
    id: &'a MemberId,
    name: String,
    x: f64,
    y: f64,
}

pub async fn run(args: &LayoutArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let root_id = ctx.resolve_root(&snapshot, args.root.as_deref())?;

    let Some(tree) = build_tree(&snapshot.members, &snapshot.relationships, &root_id) else {
        anyhow::bail!("Member '{}' not found", root_id);
    };

    let placed = layout(&tree, &ctx.config.layout);
    tracing::info!("Placed {} cards", placed.len());

    // Top row first, left to right
    let mut cards: Vec<(&MemberId, &Position)> = placed.iter().collect();
    cards.sort_by(|a, b| {
        a.1.y
            .total_cmp(&b.1.y)
            .then(a.1.x.total_cmp(&b.1.x))
    });

    let positions: Vec<PlacedCard> = cards
        .into_iter()
        .map(|(id, pos)| PlacedCard {
            id,
            name: tree
                .get(id)
                .map(|node| node.member.full_name())
                .unwrap_or_default(),
            x: pos.x,
            y: pos.y,
        })
        .collect();

    let output = LayoutOutput {
        root: &root_id,
        positions,
        bounds: placed.bounds(),
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&output);
    }

    println!("Layout rooted at '{}' ({} cards):", root_id, output.positions.len());
    for card in &output.positions {
        println!(
            "  {:<12} {:<28} x={:>9.1} y={:>9.1}",
            card.id.as_str(),
            card.name,
            card.x,
            card.y
        );
    }
    if let Some(bounds) = output.bounds {
        println!(
            "\n  Bounds: {:.1} x {:.1} (x {:.1}..{:.1}, y {:.1}..{:.1})",
            bounds.width(),
            bounds.height(),
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y
        );
    }

    Ok(())
}
