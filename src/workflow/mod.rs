//! Workflow-state notification routing.
//!
//! Each document type carries a workflow-state string; when a save changes
//! it, a static transition table maps the new state to notification
//! actions (a role's members, the document owner, a linked manager).
//! Delivery is best effort: failures are logged and never block the save.

mod notifier;
mod transitions;

pub use notifier::{
    DeliveryError, Notification, NotificationSink, RecordingSink, WorkflowDoc, WorkflowNotifier,
};
pub use transitions::{DocKind, NotificationAction, TransitionAction, transitions_for};
