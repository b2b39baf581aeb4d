//! Index page: the current task list as plain HTML

use axum::{extract::State, response::Html, routing::get, Router};

use todo_core::task::Task;

use super::todo::{map_store_error, RouteError};
use crate::state::AppState;

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render(tasks: &[Task]) -> String {
    let mut items = String::new();
    for task in tasks {
        items.push_str(&format!(
            "    <li data-id=\"{}\">{} <em>({})</em></li>\n",
            task.id,
            escape_html(&task.task),
            escape_html(&task.status)
        ));
    }
    if tasks.is_empty() {
        items.push_str("    <li><em>Nothing to do</em></li>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n\
         <head><meta charset=\"utf-8\"><title>Todo</title></head>\n\
         <body>\n  <h1>Todo</h1>\n  <ul>\n{items}  </ul>\n</body>\n</html>\n"
    )
}

/// GET / - Render the task list
async fn index(State(state): State<AppState>) -> Result<Html<String>, RouteError> {
    let tasks = state.tasks().list().await.map_err(map_store_error)?;
    Ok(Html(render(&tasks)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
