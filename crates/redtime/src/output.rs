use crate::cli::{ColorChoice, OutputFormat};
use colored::Colorize;
use redmine_backend::TimeEntry;
use serde::Serialize;
use std::io::IsTerminal;

/// Set the global color override from `--color` and the environment
pub fn init_color(choice: ColorChoice) {
    let should_color = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        // https://no-color.org/
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    };
    colored::control::set_override(should_color);
}

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

pub fn output_list<T: Serialize + Displayable>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", "No time entries found.".dimmed());
            }
            for item in items {
                println!("{}", item.display());
                println!();
            }
        }
    }
}

/// Confirmation for operations that return nothing (update, delete)
pub fn output_success(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "success": true, "message": message });
            if let Ok(json) = serde_json::to_string_pretty(&json) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => println!("{}", message.green()),
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

fn error_code(err: &anyhow::Error) -> &'static str {
    use redmine_backend::RedmineError;

    match err.downcast_ref::<RedmineError>() {
        Some(RedmineError::NotFound) => "not_found",
        Some(RedmineError::Api { .. }) => "api_error",
        Some(RedmineError::Http(_)) => "http_error",
        Some(RedmineError::Parse(_)) => "parse_error",
        None => "error",
    }
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for TimeEntry {
    fn display(&self) -> String {
        let mut output = format!(
            "#{} - {}h\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}",
            self.id.to_string().cyan().bold(),
            format!("{:.2}", self.hours).white().bold(),
            "Project".dimmed(),
            reference(self.project.id, &self.project.name),
            "Activity".dimmed(),
            reference(self.activity.id, &self.activity.name),
            "User".dimmed(),
            reference(self.user.id, &self.user.name),
            "Spent on".dimmed(),
            self.spent_on,
        );

        if self.issue.id != 0 {
            output.push_str(&format!(
                "\n  {}: {}",
                "Issue".dimmed(),
                format!("#{}", self.issue.id).magenta()
            ));
        }

        if !self.comments.is_empty() {
            output.push_str(&format!("\n  {}: {}", "Comments".dimmed(), self.comments));
        }

        if !self.updated_on.is_empty() {
            output.push_str(&format!(
                "\n  {}: {}",
                "Updated".dimmed(),
                self.updated_on.dimmed()
            ));
        }

        output
    }
}

impl Displayable for crate::config::Config {
    fn display(&self) -> String {
        let unset = || "(not set)".dimmed().to_string();
        let number = |value: Option<String>| value.unwrap_or_else(unset);

        format!(
            "{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
            "url".dimmed(),
            self.url.clone().unwrap_or_else(unset),
            "key".dimmed(),
            self.key.clone().unwrap_or_else(unset),
            "limit".dimmed(),
            number(self.limit.map(|v| v.to_string())),
            "offset".dimmed(),
            number(self.offset.map(|v| v.to_string())),
            "timeout_secs".dimmed(),
            number(self.timeout_secs.map(|v| v.to_string())),
        )
    }
}

fn reference(id: u64, name: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        format!("{} ({})", name, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redmine_backend::{IdName, IdRef};

    #[test]
    fn time_entry_display_includes_optional_fields() {
        colored::control::set_override(false);
        let entry = TimeEntry {
            id: 12,
            project: IdName {
                id: 3,
                name: "Infra".to_string(),
            },
            issue: IdRef { id: 42 },
            hours: 1.5,
            spent_on: "2024-01-01".to_string(),
            comments: "Standup".to_string(),
            ..Default::default()
        };

        let text = entry.display();
        assert!(text.starts_with("#12 - 1.50h"));
        assert!(text.contains("Project: Infra (3)"));
        assert!(text.contains("Issue: #42"));
        assert!(text.contains("Comments: Standup"));
        assert!(!text.contains("Updated"));
    }

    #[test]
    fn error_code_classifies_redmine_errors() {
        let err = anyhow::Error::new(redmine_backend::RedmineError::NotFound)
            .context("Failed to fetch time entry 7");
        assert_eq!(error_code(&err), "not_found");

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(error_code(&err), "error");
    }
}
