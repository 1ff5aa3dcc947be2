//! Telegram message template for task snapshots.

use crate::models::TaskDetails;

/// Render a task into the fixed Markdown message body.
///
/// The template is kept byte-identical across edits so existing messages in
/// the chat history keep a uniform shape.
#[must_use]
pub fn render_task(task: &TaskDetails) -> String {
    format!(
        "*Task in Asana*\n\n\
         \u{1f4cc} *Name*: {name}\n\
         \u{1f4c3} *Description*: {notes}\n\
         \u{1f464} *Assignee*: {assignee}\n\
         \u{1f4c5} *Due date*: {due_on}\n\n\
         \u{1f517} [Open in Asana]({permalink})",
        name = task.name,
        notes = task.notes,
        assignee = task.assignee,
        due_on = task.due_on,
        permalink = task.permalink_url,
    )
}
