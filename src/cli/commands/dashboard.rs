use anyhow::Result;
use clap::Subcommand;

use super::Context;
use crate::output::print_table;

#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Submission totals and sync progress
    Overview,
    /// Detailed analytics by topic
    Analytics {
        /// Only print this section (e.g. facility, funding, infrastructure)
        #[arg(long)]
        section: Option<String>,
    },
}

pub async fn handle(action: DashboardCommands, ctx: &Context) -> Result<()> {
    ctx.require_session().await?;

    match action {
        DashboardCommands::Overview => {
            let overview = ctx.client.dashboard_overview().await?;
            if !ctx.format.print_structured(&overview)? {
                let rows = vec![
                    vec!["Total".to_string(), overview.total_submissions.to_string()],
                    vec!["Synced".to_string(), overview.synced_submissions.to_string()],
                    vec!["Pending".to_string(), overview.pending_submissions.to_string()],
                    vec![
                        "Synced %".to_string(),
                        format!("{:.1}", overview.synced_percentage),
                    ],
                ];
                print_table(&["SUBMISSIONS", "VALUE"], &rows);
            }
        }
        DashboardCommands::Analytics { section } => {
            let analytics = ctx.client.detailed_analytics().await?;
            if let Some(name) = section {
                let value = analytics
                    .section(&name)
                    .ok_or_else(|| anyhow::anyhow!("No analytics section named {:?}", name))?;
                if !ctx.format.print_structured(value)? {
                    println!("{}", serde_json::to_string_pretty(value)?);
                }
                return Ok(());
            }
            if !ctx.format.print_structured(&analytics)? {
                if let Some(summary) = &analytics.summary {
                    println!("Facilities:        {}", summary.total_facilities);
                    println!(
                        "Data completeness: {:.1}%",
                        summary.data_completeness_percentage
                    );
                }
                let sections: Vec<&String> = analytics.sections.keys().collect();
                if !sections.is_empty() {
                    println!(
                        "Sections: {}",
                        sections
                            .iter()
                            .map(|s| s.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                }
            }
        }
    }
    Ok(())
}
