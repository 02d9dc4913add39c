use anyhow::Result;
use clap::Subcommand;
use pfmo_admin::models::RecordId;
use pfmo_admin::models::insights::recommendation_text;

use super::Context;
use crate::output::{or_dash, print_table};

#[derive(Subcommand)]
pub enum AiCommands {
    /// Facilities flagged as at risk
    AtRisk,
    /// Recommendations grouped by category
    Recommendations,
    /// Analysis of one submission
    Insights { id: RecordId },
    /// Sentiment, priority and topics of a free-text note
    Analyze { text: String },
}

pub async fn handle(action: AiCommands, ctx: &Context) -> Result<()> {
    ctx.require_session().await?;

    match action {
        AiCommands::AtRisk => {
            let report = ctx.client.at_risk_facilities().await?;
            if !ctx.format.print_structured(&report)? {
                println!("{} facilities at risk", report.total_at_risk);
                let rows: Vec<Vec<String>> = report
                    .facilities
                    .iter()
                    .map(|f| {
                        vec![
                            f.id.to_string(),
                            or_dash(f.facility_name.as_deref()),
                            or_dash(f.state.as_deref()),
                            or_dash(f.lga.as_deref()),
                            or_dash(Some(f.priority.as_str())),
                            f.risk_factors.join("; "),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "FACILITY", "STATE", "LGA", "PRIORITY", "RISK FACTORS"],
                    &rows,
                );
            }
        }
        AiCommands::Recommendations => {
            let recommendations = ctx.client.recommendations().await?;
            if !ctx.format.print_structured(&recommendations)? {
                for (category, items) in &recommendations {
                    println!("{}:", category);
                    for item in items {
                        println!("  - {}", recommendation_text(item));
                    }
                }
            }
        }
        AiCommands::Insights { id } => {
            let insights = ctx.client.submission_insights(&id).await?;
            if !ctx.format.print_structured(&insights)? {
                let analysis = &insights.ai_analysis;
                if !analysis.summary.is_empty() {
                    println!("{}", analysis.summary);
                }
                if let Some(issues) = &analysis.issues_analysis {
                    println!("Sentiment: {}", or_dash(Some(issues.sentiment.as_str())));
                    println!("Priority:  {}", or_dash(Some(issues.priority.as_str())));
                    for insight in &issues.insights {
                        println!("  - {}", insight);
                    }
                }
                if let Some(predictions) = &analysis.predictions {
                    for need in &predictions.predicted_needs {
                        println!("Need: {}", need);
                    }
                    for recommendation in &predictions.recommendations {
                        println!("Recommendation: {}", recommendation);
                    }
                }
                if !analysis.anomalies.is_empty() {
                    println!("{} anomalies detected", analysis.anomalies.len());
                }
            }
        }
        AiCommands::Analyze { text } => {
            let analysis = ctx.client.analyze_text(&text).await?;
            if !ctx.format.print_structured(&analysis)? {
                println!("Sentiment: {}", or_dash(Some(analysis.sentiment.as_str())));
                println!("Priority:  {}", or_dash(Some(analysis.priority.as_str())));
                println!("Topics:    {}", analysis.topics.join(", "));
                if !analysis.summary.is_empty() {
                    println!("{}", analysis.summary);
                }
            }
        }
    }
    Ok(())
}
