use anyhow::{Context as _, Result, anyhow, bail};
use clap::Subcommand;
use pfmo_admin::models::{FieldType, Form, FormSchema, RecordId};
use pfmo_admin::services::{
    EditSession, FieldPatch, FormCatalog, FormEditor, SchemaBuilder, SchemaEditMode, from_text,
    lint_schema, to_text,
};
use std::fs;

use super::{Context, confirm};
use crate::output::{or_dash, print_table};

#[derive(Subcommand)]
pub enum FormCommands {
    /// List forms (soft-deleted forms are hidden)
    List,
    /// Show one form and its fields
    Show { id: RecordId },
    /// Create a new form
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "1.0")]
        version: String,
        #[arg(long, default_value = "")]
        description: String,
        /// JSON schema file to start from
        #[arg(long)]
        schema: Option<String>,
        /// Field to append: name:label[:type][:required][:opt1|opt2|...]
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Replace an existing form
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// JSON schema file replacing the current schema
        #[arg(long)]
        schema: Option<String>,
        /// Field to append: name:label[:type][:required][:opt1|opt2|...]
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Deactivate a form, or delete it for good with --permanent
    Delete {
        id: RecordId,
        #[arg(long)]
        permanent: bool,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Create the stock PFMO data collection form
    CreateDefault {
        /// Create it even if one already exists
        #[arg(long, short)]
        yes: bool,
    },
    /// Report data-quality issues in a schema file
    Lint { file: String },
    /// Print a schema file in canonical form
    Fmt { file: String },
}

pub async fn handle(action: FormCommands, ctx: &Context) -> Result<()> {
    match action {
        FormCommands::Lint { file } => lint(&file),
        FormCommands::Fmt { file } => fmt(&file),
        other => {
            ctx.require_session().await?;
            let catalog = FormCatalog::new(ctx.client.clone());
            manage(other, ctx, &catalog).await
        }
    }
}

async fn manage(action: FormCommands, ctx: &Context, catalog: &FormCatalog) -> Result<()> {
    match action {
        FormCommands::List => {
            let forms = catalog.list().await?;
            if !ctx.format.print_structured(&forms)? {
                let rows: Vec<Vec<String>> = forms
                    .iter()
                    .map(|f| {
                        vec![
                            f.id.to_string(),
                            f.name.clone(),
                            f.version.clone(),
                            f.status_label().to_string(),
                            f.form_schema.fields().len().to_string(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "NAME", "VERSION", "STATUS", "FIELDS"], &rows);
            }
        }
        FormCommands::Show { id } => {
            let form = catalog.get(&id).await?;
            if !ctx.format.print_structured(&form)? {
                show(&form);
            }
        }
        FormCommands::Create {
            name,
            version,
            description,
            schema,
            fields,
        } => {
            let mut editor = FormEditor::new();
            let session = editor.open_create()?;
            session.name = name;
            session.version = version;
            session.description = description;
            if let Some(path) = schema {
                load_schema_file(session, &path)?;
            }
            append_fields(session, &fields)?;
            let form = editor.save(catalog).await?;
            println!("Created form {} ({})", form.name, form.id);
        }
        FormCommands::Update {
            id,
            name,
            version,
            description,
            schema,
            fields,
        } => {
            let form = catalog.get(&id).await?;
            let mut editor = FormEditor::new();
            let session = editor.open_edit(&form)?;
            if let Some(name) = name {
                session.name = name;
            }
            if let Some(version) = version {
                session.version = version;
            }
            if let Some(description) = description {
                session.description = description;
            }
            if let Some(path) = schema {
                load_schema_file(session, &path)?;
            }
            append_fields(session, &fields)?;
            let form = editor.save(catalog).await?;
            println!("Updated form {} ({})", form.name, form.id);
        }
        FormCommands::Delete { id, permanent, yes } => {
            let prompt = if permanent {
                "Permanently delete this form? This cannot be undone and fails if the form has submissions."
            } else {
                "Deactivate this form? It will be hidden but can be restored."
            };
            if !yes && !confirm(prompt) {
                println!("Cancelled");
                return Ok(());
            }
            catalog.delete(&id, permanent).await?;
            let action = if permanent {
                "permanently deleted"
            } else {
                "deactivated"
            };
            println!("Form {} successfully", action);
        }
        FormCommands::CreateDefault { yes } => {
            let created = catalog
                .create_default(|existing| {
                    yes || confirm(&format!(
                        "Default PFMO form already exists (id {}). Create another one?",
                        existing.id
                    ))
                })
                .await?;
            match created {
                Some(form) => println!(
                    "Default PFMO form created ({}). It will now appear in the mobile app.",
                    form.id
                ),
                None => println!("Cancelled"),
            }
        }
        FormCommands::Lint { .. } | FormCommands::Fmt { .. } => {}
    }
    Ok(())
}

fn show(form: &Form) {
    println!("{} (id {})", form.name, form.id);
    println!("Version: {}", form.version);
    println!("Status:  {}", form.status_label());
    if let Some(description) = form.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!();

    if form.form_schema.fields.is_none() {
        println!("This form doesn't have a schema defined.");
        return;
    }
    let rows: Vec<Vec<String>> = form
        .form_schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            vec![
                (i + 1).to_string(),
                or_dash(Some(f.name.as_str())),
                or_dash(Some(f.label.as_str())),
                f.field_type().display_label().to_string(),
                if f.required { "yes" } else { "" }.to_string(),
                f.kind.options().map(|o| o.join(", ")).unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["#", "NAME", "LABEL", "TYPE", "REQUIRED", "OPTIONS"], &rows);
}

fn read_schema(path: &str) -> Result<FormSchema> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    Ok(from_text(&text)?)
}

/// Replace the session's schema with a file's content through the raw-text
/// editor, then return to the visual builder.
fn load_schema_file(session: &mut EditSession, path: &str) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    session.switch_mode(SchemaEditMode::RawText);
    let raw = session
        .raw()
        .ok_or_else(|| anyhow!("Raw schema editor unavailable"))?;
    if !raw.set_text(text) {
        let reason = raw
            .error()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown error".to_string());
        bail!("{}: {}", path, reason);
    }
    session.switch_mode(SchemaEditMode::Visual);
    Ok(())
}

fn append_fields(session: &mut EditSession, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }
    let builder = session
        .builder()
        .ok_or_else(|| anyhow!("Visual builder unavailable"))?;
    for arg in args {
        add_field_from_arg(builder, arg)?;
    }
    Ok(())
}

/// `name:label[:type][:required][:opt1|opt2|...]`
fn add_field_from_arg(builder: &mut SchemaBuilder, arg: &str) -> Result<()> {
    let mut parts = arg.split(':');
    let name = parts.next().unwrap_or_default().trim();
    let label = parts.next().unwrap_or_default().trim();
    let field_type: FieldType = match parts.next().map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.parse().map_err(|e: String| anyhow!("{} in field {:?}", e, arg))?,
        None => FieldType::Text,
    };

    let mut patch = FieldPatch::default()
        .name(name)
        .label(label)
        .field_type(field_type);
    for extra in parts.map(str::trim).filter(|p| !p.is_empty()) {
        if extra.eq_ignore_ascii_case("required") {
            patch = patch.required(true);
        } else if field_type.takes_options() {
            patch = patch.options(extra.split('|').map(str::trim).filter(|o| !o.is_empty()));
        } else {
            bail!("Field {:?}: {} fields take no options", arg, field_type);
        }
    }

    let id = builder.add_field();
    builder.update_field(id, patch);
    builder.toggle_editing(id);
    Ok(())
}

fn lint(path: &str) -> Result<()> {
    let schema = read_schema(path)?;
    let warnings = lint_schema(&schema);
    if warnings.is_empty() {
        println!("{}: {} fields, no issues found", path, schema.fields().len());
    } else {
        for warning in &warnings {
            println!("{}: {}", path, warning);
        }
    }
    Ok(())
}

fn fmt(path: &str) -> Result<()> {
    let schema = read_schema(path)?;
    let canonical = if schema.fields.is_some() {
        SchemaBuilder::from_schema(&schema).schema()
    } else {
        schema
    };
    println!("{}", to_text(&canonical));
    Ok(())
}
