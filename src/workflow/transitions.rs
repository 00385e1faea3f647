//! Static transition tables: workflow state to notification actions.

/// The document types that participate in workflow notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    /// Bulk overtime requisition.
    OvertimeRequisition,
    /// Task work request.
    WorkRequest,
    /// Task work plan.
    WorkPlan,
    /// Employee change request.
    ChangeRequest,
}

impl DocKind {
    /// Human-readable label used in notification subjects.
    pub fn label(self) -> &'static str {
        match self {
            DocKind::OvertimeRequisition => "Overtime Requisition",
            DocKind::WorkRequest => "Work Request",
            DocKind::WorkPlan => "Work Plan",
            DocKind::ChangeRequest => "Employee Change Request",
        }
    }

    /// URL path segment for document links.
    pub fn slug(self) -> &'static str {
        match self {
            DocKind::OvertimeRequisition => "overtime-requisition",
            DocKind::WorkRequest => "work-request",
            DocKind::WorkPlan => "work-plan",
            DocKind::ChangeRequest => "employee-change-request",
        }
    }
}

/// Who a transition notifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Every enabled user holding the named role.
    NotifyRole(&'static str),
    /// The document owner (or requester).
    NotifyOwner,
    /// The manager linked on the document, through their login user.
    NotifyManager,
}

/// One notification fired by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionAction {
    /// Who to notify.
    pub action: NotificationAction,
    /// The message line carried in the subject and body.
    pub message: &'static str,
}

const fn role(name: &'static str, message: &'static str) -> TransitionAction {
    TransitionAction { action: NotificationAction::NotifyRole(name), message }
}

const fn owner(message: &'static str) -> TransitionAction {
    TransitionAction { action: NotificationAction::NotifyOwner, message }
}

const fn manager(message: &'static str) -> TransitionAction {
    TransitionAction { action: NotificationAction::NotifyManager, message }
}

/// The notification actions fired when `kind` enters `new_state`.
///
/// States without an entry are silent; callers must also skip dispatch
/// entirely when the state did not change on this save.
pub fn transitions_for(kind: DocKind, new_state: &str) -> &'static [TransitionAction] {
    match kind {
        DocKind::OvertimeRequisition => match new_state {
            "Awaiting Approval from General Manager" => {
                const T: &[TransitionAction] = &[role("General Manager", "Pending your approval")];
                T
            }
            "Approved by General Manager" => {
                const T: &[TransitionAction] = &[
                    owner("Approved by General Manager - Pending HR review"),
                    role("HR Manager", "Pending your review"),
                ];
                T
            }
            "Approved by HR" => {
                const T: &[TransitionAction] =
                    &[owner("Approved by HR - You can now create the overtime claim")];
                T
            }
            "Rejected by General Manager" => {
                const T: &[TransitionAction] = &[owner("Rejected by General Manager")];
                T
            }
            "Rejected by HR" => {
                const T: &[TransitionAction] = &[owner("Rejected by HR")];
                T
            }
            "Rejected" => {
                const T: &[TransitionAction] = &[owner("Rejected")];
                T
            }
            _ => &[],
        },
        DocKind::WorkRequest => match new_state {
            "Awaiting Approval from General Manager" => {
                const T: &[TransitionAction] = &[role("General Manager", "Pending your approval")];
                T
            }
            "Approved by General Manager" => {
                const T: &[TransitionAction] = &[
                    owner("Approved by General Manager - Pending HR review"),
                    role("HR Manager", "Pending your review"),
                ];
                T
            }
            "Approved by HR" => {
                const T: &[TransitionAction] = &[
                    owner("Approved by HR - Request is fully approved"),
                    manager("Your work request has been approved"),
                ];
                T
            }
            "Rejected by General Manager" => {
                const T: &[TransitionAction] = &[owner("Rejected by General Manager")];
                T
            }
            "Rejected by HR" => {
                const T: &[TransitionAction] = &[owner("Rejected by HR")];
                T
            }
            _ => &[],
        },
        DocKind::WorkPlan => match new_state {
            "Pending Approval" => {
                const T: &[TransitionAction] =
                    &[role("General Manager", "Work plan pending your approval")];
                T
            }
            "Approved" => {
                const T: &[TransitionAction] = &[
                    owner("Work plan approved"),
                    manager("Your work plan has been approved"),
                ];
                T
            }
            "Rejected" => {
                const T: &[TransitionAction] = &[owner("Work plan rejected")];
                T
            }
            _ => &[],
        },
        DocKind::ChangeRequest => match new_state {
            "Pending HR Approval" => {
                const T: &[TransitionAction] = &[role("HR Manager", "Pending your approval")];
                T
            }
            "Approved" => {
                const T: &[TransitionAction] =
                    &[owner("Your change request has been approved and applied")];
                T
            }
            "Rejected" => {
                const T: &[TransitionAction] = &[owner("Your change request has been rejected")];
                T
            }
            _ => &[],
        },
    }
}
