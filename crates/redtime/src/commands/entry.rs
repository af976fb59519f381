use crate::cli::{EntryCommands, EntryFields, OutputFormat};
use crate::output::{output_list, output_result, output_success};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use redmine_backend::{IdName, IdRef, TimeEntry, TimeEntryTracker};

pub fn handle_entry(
    client: &dyn TimeEntryTracker,
    action: &EntryCommands,
    format: OutputFormat,
) -> Result<()> {
    match action {
        // limit/offset are folded into the client config before we get here
        EntryCommands::List { project, .. } => handle_list(client, *project, format),
        EntryCommands::Get { id } => handle_get(client, *id, format),
        EntryCommands::Create { fields } => handle_create(client, fields, format),
        EntryCommands::Update { id, fields } => handle_update(client, *id, fields, format),
        EntryCommands::Delete { id } => handle_delete(client, *id, format),
    }
}

fn handle_list(client: &dyn TimeEntryTracker, project: u64, format: OutputFormat) -> Result<()> {
    let entries = client
        .time_entries(project)
        .with_context(|| format!("Failed to list time entries for project {}", project))?;

    output_list(&entries, format);
    Ok(())
}

fn handle_get(client: &dyn TimeEntryTracker, id: u64, format: OutputFormat) -> Result<()> {
    let entry = client
        .time_entry(id)
        .with_context(|| format!("Failed to fetch time entry {}", id))?;

    output_result(&entry, format);
    Ok(())
}

fn handle_create(
    client: &dyn TimeEntryTracker,
    fields: &EntryFields,
    format: OutputFormat,
) -> Result<()> {
    if fields.hours.is_none() {
        return Err(anyhow!("--hours is required when creating a time entry"));
    }
    if fields.issue.is_none() && fields.project.is_none() {
        return Err(anyhow!("Either --issue or --project must be given"));
    }

    let mut entry = TimeEntry {
        spent_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
        ..Default::default()
    };
    apply_fields(&mut entry, fields)?;

    let created = client
        .create_time_entry(&entry)
        .context("Failed to create time entry")?;

    output_result(&created, format);
    Ok(())
}

fn handle_update(
    client: &dyn TimeEntryTracker,
    id: u64,
    fields: &EntryFields,
    format: OutputFormat,
) -> Result<()> {
    // Update replaces every writable field, so start from the current entry.
    let mut entry = client
        .time_entry(id)
        .with_context(|| format!("Failed to fetch time entry {}", id))?;
    apply_fields(&mut entry, fields)?;
    // The PUT targets the id that was asked for, whatever the server echoed back.
    entry.id = id;

    client
        .update_time_entry(&entry)
        .with_context(|| format!("Failed to update time entry {}", id))?;

    output_success(&format!("Time entry {} updated", id), format);
    Ok(())
}

fn handle_delete(client: &dyn TimeEntryTracker, id: u64, format: OutputFormat) -> Result<()> {
    client
        .delete_time_entry(id)
        .with_context(|| format!("Failed to delete time entry {}", id))?;

    output_success(&format!("Time entry {} deleted", id), format);
    Ok(())
}

/// Overlay the flags that were given onto `entry`
fn apply_fields(entry: &mut TimeEntry, fields: &EntryFields) -> Result<()> {
    if let Some(issue) = fields.issue {
        entry.issue = IdRef { id: issue };
    }
    if let Some(project) = fields.project {
        entry.project = IdName {
            id: project,
            name: String::new(),
        };
    }
    if let Some(date) = &fields.spent_on {
        entry.spent_on = validate_date(date)?;
    }
    if let Some(hours) = fields.hours {
        entry.hours = hours;
    }
    if let Some(activity) = fields.activity {
        entry.activity = IdName {
            id: activity,
            name: String::new(),
        };
    }
    if let Some(comments) = &fields.comments {
        entry.comments = comments.clone();
    }
    Ok(())
}

fn validate_date(date: &str) -> Result<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}
