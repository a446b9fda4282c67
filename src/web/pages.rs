//! HTML rendering for the web front end.
//!
//! Pages are plain strings built with `format!`. Every value that comes from
//! the store or the request is escaped with `html-escape` before it is
//! written into the markup.

use super::handlers::{ListView, SORT_OPTIONS};
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskStatus};
use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const STYLE: &str = "
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
form.inline { display: inline; }
ul.tasks { list-style: none; padding: 0; }
ul.tasks li { padding: .5rem; margin-bottom: .4rem; border-left: .4rem solid #ccc; background: #fafafa; }
ul.tasks li.done .description { text-decoration: line-through; color: #888; }
.meta { color: #666; font-size: .9rem; }
.pager form { display: inline; }
";

/// Posts a comment form with `fetch` so saving does not leave the page.
const SCRIPT: &str = "
function saveComment(form) {
  fetch(form.action, { method: 'POST', body: new URLSearchParams(new FormData(form)) });
  return false;
}
";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n<script>{}</script>\n</body>\n</html>\n",
        text(title),
        STYLE,
        body,
        SCRIPT
    )
}

/// Colors are only echoed into `style` when they look like a hex code or a
/// CSS color name.
fn safe_color(color: Option<&str>) -> Option<&str> {
    color.filter(|c| !c.is_empty() && c.len() <= 32 && c.chars().all(|ch| ch == '#' || ch.is_ascii_alphanumeric()))
}

fn status_options(selected: Option<TaskStatus>, include_any: bool) -> String {
    let mut options = String::new();
    if include_any {
        options.push_str(&format!(
            "<option value=\"\"{}>any status</option>",
            if selected.is_none() { " selected" } else { "" }
        ));
    }
    for status in TaskStatus::ALL {
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            attr(status.as_str()),
            if selected == Some(status) { " selected" } else { "" },
            text(status.as_str())
        ));
    }
    options
}

fn task_item(task: &Task) -> String {
    let id = task.id.unwrap_or(0);
    let status = task.effective_status();
    let border = safe_color(task.color.as_deref())
        .map(|c| format!(" style=\"border-left-color: {}\"", attr(c)))
        .unwrap_or_default();
    let due = task
        .due_date
        .map(|d| format!(" due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    let done_button = if task.done {
        String::new()
    } else {
        format!(
            "<form class=\"inline\" method=\"post\" action=\"/done/{}\"><button type=\"submit\">Done</button></form>",
            id
        )
    };

    format!(
        "<li class=\"{class}\"{border}>\n\
         <span class=\"description\">[{id}] {description}</span> \
         <span class=\"meta\">(p={priority}){due} - {status}</span>\n\
         {done_button}\n\
         <a href=\"/edit/{id}\">Edit</a>\n\
         <form class=\"inline\" method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\n\
         <form class=\"inline\" method=\"post\" action=\"/comment/{id}\" onsubmit=\"return saveComment(this)\">\
         <input type=\"text\" name=\"comment\" placeholder=\"Comment\" value=\"{comment}\">\
         <input type=\"text\" name=\"color\" placeholder=\"Color\" size=\"8\" value=\"{color}\">\
         <button type=\"submit\">Save</button></form>\n\
         </li>",
        class = if task.done { "done" } else { "open" },
        border = border,
        id = id,
        description = text(&task.description),
        priority = task.priority,
        due = due,
        status = text(status.as_str()),
        done_button = done_button,
        comment = attr(task.comment.as_deref().unwrap_or("")),
        color = attr(task.color.as_deref().unwrap_or("")),
    )
}

/// A GET form that keeps the current filters and jumps to `page`.
fn page_link(view: &ListView, page: u32, label: &str) -> String {
    format!(
        "<form method=\"get\" action=\"/\">\
         <input type=\"hidden\" name=\"sort\" value=\"{}\">\
         <input type=\"hidden\" name=\"q\" value=\"{}\">\
         <input type=\"hidden\" name=\"status\" value=\"{}\">\
         <input type=\"hidden\" name=\"page\" value=\"{}\">\
         <button type=\"submit\">{}</button></form>",
        attr(&view.sort),
        attr(&view.search),
        attr(view.status.map(|s| s.as_str()).unwrap_or("")),
        page,
        text(label)
    )
}

pub fn index_page(tasks: &[Task], view: &ListView) -> String {
    let add_form = format!(
        "<form method=\"post\" action=\"/add\">\n\
         <input type=\"text\" name=\"description\" placeholder=\"Task description\" required>\n\
         <input type=\"number\" name=\"priority\" value=\"1\">\n\
         <input type=\"date\" name=\"due_date\">\n\
         <select name=\"status\">{}</select>\n\
         <input type=\"text\" name=\"comment\" placeholder=\"Comment\">\n\
         <input type=\"text\" name=\"color\" placeholder=\"Color\" size=\"8\">\n\
         <button type=\"submit\">Add Task</button>\n\
         </form>",
        status_options(Some(TaskStatus::NotStarted), false)
    );

    let sort_options: String = SORT_OPTIONS
        .iter()
        .map(|(value, label)| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                attr(value),
                if view.sort == *value { " selected" } else { "" },
                text(label)
            )
        })
        .collect();
    let filter_form = format!(
        "<form method=\"get\" action=\"/\">\n\
         <input type=\"search\" name=\"q\" placeholder=\"Search\" value=\"{}\">\n\
         <select name=\"status\">{}</select>\n\
         <select name=\"sort\">{}</select>\n\
         <button type=\"submit\">Apply</button>\n\
         </form>",
        attr(&view.search),
        status_options(view.status, true),
        sort_options
    );

    let items = if tasks.is_empty() {
        format!("<p>{}</p>", text(&Message::TasksNotFound.to_string()))
    } else {
        let items: Vec<String> = tasks.iter().map(task_item).collect();
        format!("<ul class=\"tasks\">\n{}\n</ul>", items.join("\n"))
    };

    let mut pager = String::from("<div class=\"pager\">");
    if view.has_prev() {
        pager.push_str(&page_link(view, view.page - 1, "Previous"));
    }
    pager.push_str(&format!(
        " <span class=\"meta\">Page {} of {} ({} tasks)</span> ",
        view.page, view.last_page, view.total
    ));
    if view.has_next() {
        pager.push_str(&page_link(view, view.page + 1, "Next"));
    }
    pager.push_str("</div>");

    layout(
        "Task Tracker",
        &format!("<h1>Tasks</h1>\n{}\n{}\n{}\n{}", add_form, filter_form, items, pager),
    )
}

pub fn edit_page(task: &Task) -> String {
    let id = task.id.unwrap_or(0);
    let body = format!(
        "<h1>Edit task [{id}]</h1>\n\
         <form method=\"post\" action=\"/edit/{id}\">\n\
         <p><label>Description <input type=\"text\" name=\"description\" value=\"{description}\" required></label></p>\n\
         <p><label>Priority <input type=\"number\" name=\"priority\" value=\"{priority}\"></label></p>\n\
         <p><label>Due date <input type=\"date\" name=\"due_date\" value=\"{due}\"></label></p>\n\
         <p><label>Status <select name=\"status\">{statuses}</select></label></p>\n\
         <p><label>Comment <input type=\"text\" name=\"comment\" value=\"{comment}\"></label></p>\n\
         <p><label>Color <input type=\"text\" name=\"color\" value=\"{color}\"></label></p>\n\
         <button type=\"submit\">Save</button> <a href=\"/\">Cancel</a>\n\
         </form>",
        id = id,
        description = attr(&task.description),
        priority = task.priority,
        due = task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        statuses = status_options(Some(task.effective_status()), false),
        comment = attr(task.comment.as_deref().unwrap_or("")),
        color = attr(task.color.as_deref().unwrap_or("")),
    );

    layout(&format!("Edit task {}", id), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to tasks</a></p>",
        text(&status.to_string()),
        text(message)
    );
    layout("Task Tracker - error", &body)
}
