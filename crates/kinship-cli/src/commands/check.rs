//! Check command

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use kinship_core::validate;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let issues = validate(&snapshot);

    if ctx.format == OutputFormat::Json {
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        print_json(&messages)?;
    } else if issues.is_empty() {
        println!(
            "No issues found ({} members, {} relationships)",
            snapshot.members.len(),
            snapshot.relationships.len()
        );
    } else {
        println!("Found {} issue(s):", issues.len());
        for issue in &issues {
            println!("  - {}", issue);
        }
    }

    if !issues.is_empty() {
        anyhow::bail!("{} issue(s) found in family data", issues.len());
    }

    Ok(())
}
