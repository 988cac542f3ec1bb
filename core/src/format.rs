//! Plain-text rendering of the reminder message.

use crate::record::fallback;
use crate::record::TaskSummary;

const BULLET: &str = "•";
const INDENT: &str = "  ";

/// `• <due> / <status>[ / tags: ..][ / assignees: ..]`, then the title and
/// url on indented lines.
pub fn format_entry(task: &TaskSummary, today: &str) -> String {
    let due = task.due.as_deref().unwrap_or(today);
    let status = task.status.as_deref().unwrap_or(fallback::NO_STATUS);

    let mut head = format!("{BULLET} {due} / {status}");
    if !task.tags.is_empty() {
        head.push_str(" / tags: ");
        head.push_str(&task.tags.join(", "));
    }
    if !task.assignees.is_empty() {
        head.push_str(" / assignees: ");
        head.push_str(&task.assignees.join(", "));
    }

    format!("{head}\n{INDENT}{}\n{INDENT}{}", task.title, task.url)
}

pub fn format_message(header: &str, tasks: &[TaskSummary], today: &str) -> String {
    let entries: Vec<String> = tasks.iter().map(|t| format_entry(t, today)).collect();
    format!("{header}\n{}", entries.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task() -> TaskSummary {
        TaskSummary {
            id: None,
            title: "Report".to_string(),
            due: Some("2024-05-01".to_string()),
            status: Some("In Progress".to_string()),
            tags: vec!["A".to_string(), "B".to_string()],
            assignees: vec!["Taro".to_string()],
            url: "https://x/y".to_string(),
        }
    }

    #[test]
    fn golden_entry() {
        assert_eq!(
            format_entry(&task(), "2024-05-01"),
            "• 2024-05-01 / In Progress / tags: A, B / assignees: Taro\n  Report\n  https://x/y"
        );
    }

    #[test]
    fn empty_lists_omit_their_segments() {
        let mut t = task();
        t.tags.clear();
        t.assignees.clear();
        let out = format_entry(&t, "2024-05-01");
        assert!(!out.contains("tags:"));
        assert!(!out.contains("assignees:"));
        assert_eq!(out, "• 2024-05-01 / In Progress\n  Report\n  https://x/y");

        let mut t = task();
        t.tags.clear();
        assert_eq!(
            format_entry(&t, "2024-05-01").lines().next(),
            Some("• 2024-05-01 / In Progress / assignees: Taro")
        );
    }

    #[test]
    fn missing_due_and_status_use_fallbacks() {
        let mut t = task();
        t.due = None;
        t.status = None;
        assert!(format_entry(&t, "2024-06-30").starts_with("• 2024-06-30 / - / tags:"));
    }

    #[test]
    fn message_joins_entries_with_blank_line() {
        let mut second = task();
        second.title = "Review".to_string();
        second.tags.clear();
        second.assignees.clear();
        let msg = format_message("Header", &[task(), second], "2024-05-01");
        assert_eq!(
            msg,
            "Header\n\
             • 2024-05-01 / In Progress / tags: A, B / assignees: Taro\n  Report\n  https://x/y\n\
             \n\
             • 2024-05-01 / In Progress\n  Review\n  https://x/y"
        );
    }
}
