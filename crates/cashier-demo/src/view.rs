//! Terminal rendering of the form, notifications, and version label.

use cashier_core::{AttemptRecord, FeedbackKind, FormState, Notification};

/// Version label shown under the banner
pub fn version_label() -> String {
    format!("Version: {}", env!("CARGO_PKG_VERSION"))
}

pub fn banner() -> String {
    format!(
        r#"
  Hosted Cashier Demo
  ━━━━━━━━━━━━━━━━━━━
  {}
"#,
        version_label()
    )
}

/// Field table, labels right-aligned
pub fn render_form(form: &FormState) -> String {
    let fields = form.fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    fields
        .iter()
        .map(|(label, value)| format!("  {:>width$}: {}\n", label, value, width = width))
        .collect()
}

/// Dialogs are boxed and wait for acknowledgement; toasts are one line
pub fn render_notification(notification: &Notification) -> String {
    match notification.kind {
        FeedbackKind::Dialog => {
            let bar = "═".repeat(notification.message.chars().count() + 4);
            format!(
                "╔{bar}╗\n║  {}  ║\n╚{bar}╝",
                notification.message,
                bar = bar
            )
        }
        FeedbackKind::Toast => format!("» {}", notification.message),
    }
}

pub fn render_attempt(record: &AttemptRecord) -> String {
    let elapsed = record.completed_at - record.submitted_at;
    format!(
        "{}\n  order {} finished in {}.{:03}s, next order id {}",
        render_notification(&record.notification),
        record.merchant_tx_id,
        elapsed.num_seconds(),
        elapsed.num_milliseconds().rem_euclid(1000),
        record.next_order_id
    )
}
