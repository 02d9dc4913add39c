use anyhow::Result;
use clap::Subcommand;
use pfmo_admin::models::SubmissionFilter;
use pfmo_admin::models::submission::{distinct_lgas, distinct_states};

use super::Context;
use crate::output::{or_dash, print_table};

#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// List submissions, optionally filtered
    List {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        lga: Option<String>,
        /// synced or pending
        #[arg(long)]
        sync_status: Option<String>,
    },
    /// List the states and LGAs that appear in submissions
    Locations,
}

pub async fn handle(action: SubmissionCommands, ctx: &Context) -> Result<()> {
    ctx.require_session().await?;

    match action {
        SubmissionCommands::List {
            state,
            lga,
            sync_status,
        } => {
            let filter = SubmissionFilter {
                state,
                lga,
                sync_status,
            };
            let submissions = ctx.client.list_submissions(&filter).await?;
            if !ctx.format.print_structured(&submissions)? {
                let rows: Vec<Vec<String>> = submissions
                    .iter()
                    .map(|s| {
                        vec![
                            s.id.to_string(),
                            or_dash(s.facility_name.as_deref()),
                            or_dash(s.state.as_deref()),
                            or_dash(s.lga.as_deref()),
                            s.sync_status_or_pending().to_string(),
                            s.created_at
                                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "FACILITY", "STATE", "LGA", "SYNC", "CREATED"],
                    &rows,
                );
            }
        }
        SubmissionCommands::Locations => {
            let submissions = ctx
                .client
                .list_submissions(&SubmissionFilter::default())
                .await?;
            let states = distinct_states(&submissions);
            let lgas = distinct_lgas(&submissions);
            let locations = serde_json::json!({ "states": states, "lgas": lgas });
            if !ctx.format.print_structured(&locations)? {
                println!("States: {}", joined(&states));
                println!("LGAs:   {}", joined(&lgas));
            }
        }
    }
    Ok(())
}

fn joined(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
