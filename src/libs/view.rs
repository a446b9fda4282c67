use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// One line per task: `[id] (p=priority) description [due D] - status`.
    pub fn task_line(task: &Task) -> String {
        let mut line = format!("[{}] (p={}) {}", task.id.unwrap_or(0), task.priority, task.description);
        if let Some(due_date) = task.due_date {
            line.push_str(&format!(" [due {}]", due_date.format("%Y-%m-%d")));
        }
        line.push_str(&format!(" - {}", task.effective_status()));
        line
    }

    pub fn task_lines(tasks: &[Task]) {
        for task in tasks {
            println!("{}", Self::task_line(task));
        }
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "PRIORITY", "DESCRIPTION", "DUE", "STATUS", "COMMENT", "COLOR"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.priority,
                task.description,
                task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                task.effective_status(),
                task.comment.as_deref().unwrap_or(""),
                task.color.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn json(tasks: &[Task]) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_task_line_with_due_date() {
        let mut task = Task::new("Buy groceries")
            .with_priority(2)
            .with_due_date(NaiveDate::from_ymd_opt(2024, 5, 1))
            .with_status(TaskStatus::InProgress);
        task.id = Some(7);
        assert_eq!(View::task_line(&task), "[7] (p=2) Buy groceries [due 2024-05-01] - in progress");
    }

    #[test]
    fn test_task_line_without_due_date() {
        let mut task = Task::new("Call the plumber").with_priority(3);
        task.id = Some(3);
        assert_eq!(View::task_line(&task), "[3] (p=3) Call the plumber - not started");
    }
}
