//! Notification composition and best-effort delivery.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use super::transitions::{DocKind, NotificationAction, transitions_for};
use crate::store::HrStore;

/// A composed notification ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Delivery address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// Why a single delivery attempt failed.
#[derive(Debug, Error)]
#[error("notification delivery failed: {reason}")]
pub struct DeliveryError {
    /// Transport-level failure description.
    pub reason: String,
}

/// Outbound notification transport.
///
/// Implementations wrap whatever carries the message (mail, in-app log).
/// Delivery is attempted once per recipient; a failure is logged by the
/// notifier and never propagated to the triggering save.
pub trait NotificationSink: Send + Sync {
    /// Attempts to deliver one notification.
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// A sink that records every notification, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("sink lock poisoned").clone()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.sent.lock().expect("sink lock poisoned").push(notification.clone());
        Ok(())
    }
}

/// Summary of the document a transition fired on, enough to compose the
/// notification body and resolve recipients.
#[derive(Debug, Clone)]
pub struct WorkflowDoc<'a> {
    /// Which transition table applies.
    pub kind: DocKind,
    /// Document identifier.
    pub id: &'a str,
    /// Display title; the id stands in when empty.
    pub title: &'a str,
    /// The state just entered.
    pub state: &'a str,
    /// Posting date, when the document has one.
    pub date: Option<NaiveDate>,
    /// Document owner or requester (a user id).
    pub owner: &'a str,
    /// Linked manager (a legacy employee id), for `NotifyManager`.
    pub manager: Option<&'a str>,
}

/// Dispatches workflow-transition notifications through a sink.
pub struct WorkflowNotifier {
    sink: Arc<dyn NotificationSink>,
    base_url: String,
}

impl WorkflowNotifier {
    /// Creates a notifier delivering through `sink`, with document links
    /// rooted at `base_url`.
    pub fn new(sink: Arc<dyn NotificationSink>, base_url: impl Into<String>) -> Self {
        Self { sink, base_url: base_url.into() }
    }

    /// Fires the notifications for a state change on `doc`.
    ///
    /// No-op when the state did not change. Each recipient is attempted
    /// independently; a failed delivery is logged and skipped so the rest
    /// still go out.
    pub fn dispatch(&self, store: &HrStore, doc: &WorkflowDoc<'_>, previous_state: &str) {
        if previous_state == doc.state {
            return;
        }

        for transition in transitions_for(doc.kind, doc.state) {
            match transition.action {
                NotificationAction::NotifyRole(role) => {
                    for user in store.enabled_users_with_role(role) {
                        self.send(user.email.clone(), doc, transition.message);
                    }
                }
                NotificationAction::NotifyOwner => {
                    self.send(store.user_email(doc.owner), doc, transition.message);
                }
                NotificationAction::NotifyManager => {
                    let user = doc
                        .manager
                        .and_then(|m| store.employee(m))
                        .and_then(|e| e.user_id.clone());
                    if let Some(user) = user {
                        self.send(store.user_email(&user), doc, transition.message);
                    }
                }
            }
        }
    }

    fn send(&self, recipient: String, doc: &WorkflowDoc<'_>, message: &str) {
        let subject = format!("{}: {} - {}", doc.kind.label(), doc.id, message);
        let link = format!("{}/app/{}/{}", self.base_url, doc.kind.slug(), doc.id);
        let notification = Notification {
            recipient,
            subject,
            body: build_body(doc, message, &link),
        };

        if let Err(error) = self.sink.deliver(&notification) {
            warn!(
                recipient = %notification.recipient,
                subject = %notification.subject,
                %error,
                "notification delivery failed"
            );
        }
    }
}

/// Composes the HTML notification body.
fn build_body(doc: &WorkflowDoc<'_>, message: &str, link: &str) -> String {
    let title = if doc.title.is_empty() { doc.id } else { doc.title };
    let date = doc.date.map(|d| d.to_string()).unwrap_or_default();
    format!(
        "<p>Hello,</p>\n\
         <p><strong>{message}</strong></p>\n\
         <ul>\n\
         <li><strong>Document:</strong> {id}</li>\n\
         <li><strong>Title:</strong> {title}</li>\n\
         <li><strong>Status:</strong> {state}</li>\n\
         <li><strong>Date:</strong> {date}</li>\n\
         </ul>\n\
         <p><a href=\"{link}\">View Document</a></p>\n\
         <p>Regards,<br>HR System</p>",
        message = message,
        id = doc.id,
        title = title,
        state = doc.state,
        date = date,
        link = link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserAccount;

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn deliver(&self, _notification: &Notification) -> Result<(), DeliveryError> {
            Err(DeliveryError { reason: "smtp refused".to_string() })
        }
    }

    fn store_with_users() -> HrStore {
        let mut store = HrStore::new();
        store.put_user(UserAccount {
            id: "gm@example.com".to_string(),
            email: "gm@example.com".to_string(),
            roles: vec!["General Manager".to_string()],
            enabled: true,
        });
        store.put_user(UserAccount {
            id: "hr@example.com".to_string(),
            email: "hr@example.com".to_string(),
            roles: vec!["HR Manager".to_string()],
            enabled: true,
        });
        store.put_user(UserAccount {
            id: "requester@example.com".to_string(),
            email: "requester@example.com".to_string(),
            roles: vec![],
            enabled: true,
        });
        store
    }

    fn doc<'a>(kind: DocKind, state: &'a str) -> WorkflowDoc<'a> {
        WorkflowDoc {
            kind,
            id: "TWR-0001",
            title: "Rose picking week 23",
            state,
            date: None,
            owner: "requester@example.com",
            manager: None,
        }
    }

    #[test]
    fn test_unchanged_state_is_a_noop() {
        let store = store_with_users();
        let sink = Arc::new(RecordingSink::new());
        let notifier = WorkflowNotifier::new(sink.clone(), "https://erp.example.com");

        let d = doc(DocKind::WorkRequest, "Approved by HR");
        notifier.dispatch(&store, &d, "Approved by HR");

        assert!(sink.sent().is_empty());
    }

    #[test]
    fn test_transition_notifies_role_members() {
        let store = store_with_users();
        let sink = Arc::new(RecordingSink::new());
        let notifier = WorkflowNotifier::new(sink.clone(), "https://erp.example.com");

        let d = doc(DocKind::WorkRequest, "Awaiting Approval from General Manager");
        notifier.dispatch(&store, &d, "Draft");

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "gm@example.com");
        assert!(sent[0].subject.contains("TWR-0001"));
        assert!(sent[0].subject.contains("Pending your approval"));
    }

    #[test]
    fn test_gm_approval_fans_out_to_owner_and_hr() {
        let store = store_with_users();
        let sink = Arc::new(RecordingSink::new());
        let notifier = WorkflowNotifier::new(sink.clone(), "https://erp.example.com");

        let d = doc(DocKind::WorkRequest, "Approved by General Manager");
        notifier.dispatch(&store, &d, "Awaiting Approval from General Manager");

        let recipients: Vec<String> =
            sink.sent().into_iter().map(|n| n.recipient).collect();
        assert_eq!(recipients, vec!["requester@example.com", "hr@example.com"]);
    }

    #[test]
    fn test_manager_notified_through_linked_user() {
        use crate::models::LegacyEmployee;

        let mut store = store_with_users();
        store.put_employee(LegacyEmployee {
            id: "HR-EMP-0001".to_string(),
            employee_name: "Farm Manager".to_string(),
            mpesa_phone: None,
            cell_number: None,
            user_id: Some("manager@example.com".to_string()),
            business_unit: None,
            farm: None,
            company: None,
        });
        let sink = Arc::new(RecordingSink::new());
        let notifier = WorkflowNotifier::new(sink.clone(), "https://erp.example.com");

        let mut d = doc(DocKind::WorkRequest, "Approved by HR");
        d.manager = Some("HR-EMP-0001");
        notifier.dispatch(&store, &d, "Approved by General Manager");

        let recipients: Vec<String> =
            sink.sent().into_iter().map(|n| n.recipient).collect();
        assert!(recipients.contains(&"manager@example.com".to_string()));
    }

    #[test]
    fn test_delivery_failure_is_swallowed() {
        let store = store_with_users();
        let notifier = WorkflowNotifier::new(Arc::new(FailingSink), "https://erp.example.com");

        let d = doc(DocKind::WorkRequest, "Rejected by HR");
        // Must not panic or propagate.
        notifier.dispatch(&store, &d, "Approved by General Manager");
    }

    #[test]
    fn test_body_contains_document_fields_and_link() {
        let d = doc(DocKind::WorkPlan, "Approved");
        let body = build_body(&d, "Work plan approved", "https://erp.example.com/app/work-plan/TWR-0001");
        assert!(body.contains("TWR-0001"));
        assert!(body.contains("Rose picking week 23"));
        assert!(body.contains("Approved"));
        assert!(body.contains("https://erp.example.com/app/work-plan/TWR-0001"));
    }
}
