//! End-to-end scenarios: full document lifecycles through the operations
//! layer and the HTTP API.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tower::ServiceExt;

use taskwork_engine::api::{ApiError, AppState, create_router};
use taskwork_engine::config::{
    AppConfig, CompanySettings, DefaultAccounts, NotificationSettings,
};
use taskwork_engine::models::{
    AssignmentStage, ChangeRequest, ChangeStatus, ChangeType, Disbursement, DisbursementStatus,
    DocStatus, OvertimeRequisition, PaymentMethod, RequisitionEntry, TaskDetail, TaskWorker,
    WorkAssignment, WorkPlan, WorkerRow,
};
use taskwork_engine::ops::{self, OperationOutcome};
use taskwork_engine::store::{HrStore, LedgerAccount, UserAccount};
use taskwork_engine::workflow::{RecordingSink, WorkflowNotifier};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn test_config() -> AppConfig {
    AppConfig {
        company: CompanySettings { name: "Karen Roses".to_string() },
        accounts: DefaultAccounts {
            wages_account_name: "Daily Rate Wages".to_string(),
            payment_account_number: "1310262053257".to_string(),
        },
        notifications: NotificationSettings {
            base_url: "https://erp.example.com".to_string(),
            sender: "hr-no-reply@example.com".to_string(),
        },
    }
}

fn seed_chart_of_accounts(store: &mut HrStore) {
    store.put_account(LedgerAccount {
        name: "Daily Rate Wages - KR".to_string(),
        company: "Karen Roses".to_string(),
        account_name: "Daily Rate Wages".to_string(),
        account_number: None,
        is_group: false,
    });
    store.put_account(LedgerAccount {
        name: "Main Bank - KR".to_string(),
        company: "Karen Roses".to_string(),
        account_name: "Main Bank".to_string(),
        account_number: Some("1310262053257".to_string()),
        is_group: false,
    });
    store.put_cost_center("Farm A - KR");
    store.put_cost_center("Farm B - KR");
}

fn create_worker(id: &str, first: &str, last: &str) -> TaskWorker {
    TaskWorker {
        id: id.to_string(),
        first_name: first.to_string(),
        second_name: None,
        last_name: Some(last.to_string()),
        full_name: String::new(),
        payment_method: Some(PaymentMethod::Mpesa),
        bank_name: None,
        account_number: None,
        mpesa_phone: Some("+254700000001".to_string()),
    }
}

fn create_worker_row(worker: &str, task: &str, rate: &str, assigned: &str, actual: &str) -> WorkerRow {
    WorkerRow {
        worker: worker.to_string(),
        task: Some(task.to_string()),
        uom: Some("Stems".to_string()),
        rate: dec(rate),
        daily_target: None,
        quantity_assigned: dec(assigned),
        actual_quantity: dec(actual),
        days: Some(dec("5")),
        location: Some("Greenhouse 4".to_string()),
        assignment_date: Some(date("2025-06-02")),
        achievement: None,
        actual_cost: Decimal::ZERO,
    }
}

fn create_assignment(id: &str, start: &str, end: &str, rows: Vec<WorkerRow>) -> WorkAssignment {
    WorkAssignment {
        id: id.to_string(),
        title: String::new(),
        request: None,
        plan: None,
        business_unit: None,
        cost_center: None,
        unit_division: Some("Unit 2".to_string()),
        expected_start_date: date(start),
        expected_end_date: date(end),
        start_date: None,
        completion_date: None,
        stage: AssignmentStage::Pending,
        doc_status: DocStatus::Draft,
        task_details: vec![],
        worker_rows: rows,
    }
}

fn create_disbursement(id: &str, week_start: &str, week_end: &str) -> Disbursement {
    Disbursement {
        id: id.to_string(),
        company: None,
        year: 2025,
        week_number: 23,
        week_start_date: Some(date(week_start)),
        week_end_date: Some(date(week_end)),
        status: DisbursementStatus::Draft,
        doc_status: DocStatus::Draft,
        wages_account: None,
        payment_account: None,
        entries: vec![],
        breakdown: vec![],
        total_gross: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        total_net: Decimal::ZERO,
        total_workers: 0,
        paid_on: None,
        paid_by: None,
        journal_entry: None,
    }
}

fn notifier() -> WorkflowNotifier {
    WorkflowNotifier::new(Arc::new(RecordingSink::new()), "https://erp.example.com")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn outcome_from(response: axum::response::Response) -> OperationOutcome {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A full week of piece work: two assignments on different cost centers,
/// one shared worker, aggregated into a disbursement, approved, and paid
/// with a cost-center-split journal entry.
#[test]
fn test_weekly_disbursement_lifecycle() {
    let mut store = HrStore::new();
    seed_chart_of_accounts(&mut store);
    ops::save_worker(&mut store, create_worker("TW-0001", "Wanjiku", "Kamau")).unwrap();
    ops::save_worker(&mut store, create_worker("TW-0002", "Otieno", "Omondi")).unwrap();

    // Assignment A: worker 1 picks 1000 stems at 0.10, worker 2 picks 500.
    let mut a = create_assignment(
        "TWA-0001",
        "2025-06-02",
        "2025-06-06",
        vec![
            create_worker_row("TW-0001", "TASK-001", "0.10", "1200", "1000"),
            create_worker_row("TW-0002", "TASK-001", "0.10", "600", "500"),
        ],
    );
    a.cost_center = Some("Farm A - KR".to_string());
    a.task_details = vec![TaskDetail {
        task: "TASK-001".to_string(),
        subject: Some("Rose picking".to_string()),
        total_work: dec("1800"),
    }];
    ops::save_assignment(&mut store, a).unwrap();
    ops::submit_assignment(&mut store, "TWA-0001").unwrap();

    // Assignment B: worker 1 again, on another cost center.
    let mut b = create_assignment(
        "TWA-0002",
        "2025-06-05",
        "2025-06-07",
        vec![create_worker_row("TW-0001", "TASK-002", "0.25", "200", "200")],
    );
    b.cost_center = Some("Farm B - KR".to_string());
    ops::save_assignment(&mut store, b).unwrap();
    ops::submit_assignment(&mut store, "TWA-0002").unwrap();

    ops::save_disbursement(&mut store, create_disbursement("TWD-0001", "2025-06-02", "2025-06-08"))
        .unwrap();
    let loaded = ops::load_worker_payments(&mut store, "TWD-0001").unwrap();
    assert!(loaded.success);
    assert!(loaded.message.contains("2 worker payment(s)"));
    assert!(loaded.message.contains("2 assignment(s)"));

    {
        let d = store.disbursement("TWD-0001").unwrap();
        // Worker 1: 1000*0.10 + 200*0.25 = 150; worker 2: 500*0.10 = 50.
        assert_eq!(d.entries.len(), 2);
        let w1 = d.entries.iter().find(|e| e.worker == "TW-0001").unwrap();
        assert_eq!(w1.gross_amount, dec("150.00"));
        assert_eq!(w1.worker_name, "Wanjiku Kamau");
        assert_eq!(w1.payment_method, Some(PaymentMethod::Mpesa));
        assert_eq!(d.total_gross, dec("200.00"));
        assert_eq!(d.total_net, dec("200.00"));
        assert_eq!(d.total_workers, 2);
    }

    // Re-running replaces rows instead of duplicating them.
    ops::load_worker_payments(&mut store, "TWD-0001").unwrap();
    assert_eq!(store.disbursement("TWD-0001").unwrap().entries.len(), 2);

    ops::submit_disbursement(&mut store, "TWD-0001").unwrap();
    ops::approve_disbursement(&mut store, "TWD-0001").unwrap();

    let outcome = ops::mark_disbursement_paid(
        &mut store,
        &test_config(),
        "TWD-0001",
        "hr@example.com",
        date("2025-06-09"),
    )
    .unwrap();
    assert!(outcome.success);

    let d = store.disbursement("TWD-0001").unwrap();
    assert_eq!(d.status, DisbursementStatus::Paid);
    assert_eq!(d.paid_on, Some(date("2025-06-09")));
    assert!(d.entries.iter().all(|e| e.paid));

    let journal = store.journal_entry(d.journal_entry.as_deref().unwrap()).unwrap();
    assert!(journal.is_balanced());
    assert_eq!(journal.total_debit(), dec("200.00"));
    assert_eq!(journal.total_credit(), dec("200.00"));
    assert_eq!(journal.company, "Karen Roses");

    // Debits split by cost center: Farm A 150, Farm B 50.
    let farm_a = journal
        .lines
        .iter()
        .find(|l| l.cost_center.as_deref() == Some("Farm A - KR"))
        .unwrap();
    assert_eq!(farm_a.debit, dec("150.00"));
    let farm_b = journal
        .lines
        .iter()
        .find(|l| l.cost_center.as_deref() == Some("Farm B - KR"))
        .unwrap();
    assert_eq!(farm_b.debit, dec("50.00"));

    // Paying the same disbursement again fails.
    let err = ops::mark_disbursement_paid(
        &mut store,
        &test_config(),
        "TWD-0001",
        "hr@example.com",
        date("2025-06-09"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("already been paid"));

    // So does saving a second disbursement for the same week.
    let err = ops::save_disbursement(
        &mut store,
        create_disbursement("TWD-0002", "2025-06-02", "2025-06-08"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("TWD-0001"));
}

/// Over-allocated tasks block the save with a message naming the task.
#[test]
fn test_over_allocation_blocks_assignment_save() {
    let mut store = HrStore::new();
    let mut a = create_assignment(
        "TWA-0001",
        "2025-06-02",
        "2025-06-06",
        vec![
            create_worker_row("TW-0001", "TASK-001", "0.10", "600", "600"),
            create_worker_row("TW-0002", "TASK-001", "0.10", "600", "600"),
        ],
    );
    a.task_details = vec![TaskDetail {
        task: "TASK-001".to_string(),
        subject: Some("Rose picking".to_string()),
        total_work: dec("1000"),
    }];

    let err = ops::save_assignment(&mut store, a).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Rose picking"));
    assert!(message.contains("1200.00"));
    assert!(message.contains("1000.00"));
}

/// The requisition approval chain fires notifications at each state and
/// an approved requisition yields exactly one claim.
#[test]
fn test_requisition_approval_and_claim() {
    let sink = Arc::new(RecordingSink::new());
    let notifier = WorkflowNotifier::new(sink.clone(), "https://erp.example.com");
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
        id: "supervisor@example.com".to_string(),
        email: "supervisor@example.com".to_string(),
        roles: vec![],
        enabled: true,
    });

    let mut requisition = OvertimeRequisition {
        id: "OTR-0001".to_string(),
        title: "Weekend packing overtime".to_string(),
        supervisor: Some("Jane Njeri".to_string()),
        unit_division: Some("Packhouse".to_string()),
        business_unit: None,
        posting_date: date("2025-06-02"),
        hours: dec("3"),
        hourly_rate: dec("150"),
        from_time: None,
        to_time: None,
        overtime_type: Some("Weekend".to_string()),
        reason: Some("Valentine order backlog".to_string()),
        entries: vec![
            RequisitionEntry {
                employee_name: "Worker One".to_string(),
                payroll_no: Some("P-100".to_string()),
                department: Some("Packing".to_string()),
                greenhouse: None,
            },
            RequisitionEntry {
                employee_name: "Worker Two".to_string(),
                payroll_no: Some("P-101".to_string()),
                department: Some("Packing".to_string()),
                greenhouse: None,
            },
        ],
        total_employees: 0,
        estimated_cost: Decimal::ZERO,
        workflow_state: "Awaiting Approval from General Manager".to_string(),
        owner: "supervisor@example.com".to_string(),
    };
    ops::save_requisition(&mut store, requisition.clone(), &notifier).unwrap();
    assert_eq!(store.requisition("OTR-0001").unwrap().estimated_cost, dec("900"));
    assert_eq!(sink.sent().len(), 1);
    assert_eq!(sink.sent()[0].recipient, "gm@example.com");

    requisition.workflow_state = "Approved by General Manager".to_string();
    ops::save_requisition(&mut store, requisition.clone(), &notifier).unwrap();
    // Owner plus the HR role member.
    assert_eq!(sink.sent().len(), 3);

    requisition.workflow_state = "Approved by HR".to_string();
    ops::save_requisition(&mut store, requisition, &notifier).unwrap();
    assert_eq!(sink.sent().len(), 4);
    assert_eq!(sink.sent()[3].recipient, "supervisor@example.com");

    let first = ops::create_claim_from_requisition(&mut store, "OTR-0001").unwrap();
    assert!(first.success);
    let claim = store.claim(first.name.as_deref().unwrap()).unwrap();
    assert_eq!(claim.requisition, "OTR-0001");
    assert_eq!(claim.entries.len(), 2);
    assert_eq!(claim.entries[0].worked_hours, dec("3"));

    let second = ops::create_claim_from_requisition(&mut store, "OTR-0001").unwrap();
    assert!(!second.success);
}

/// Plan-level defaults flow into assignments created under the plan.
#[test]
fn test_plan_defaults_inherited_by_assignment() {
    let mut store = HrStore::new();
    store.put_company("Karen Roses", "KR");
    store.put_cost_center("Naivasha Farm - KR");
    store.put_employee(taskwork_engine::models::LegacyEmployee {
        id: "HR-EMP-0007".to_string(),
        employee_name: "Farm Manager".to_string(),
        mpesa_phone: None,
        cell_number: None,
        user_id: None,
        business_unit: Some("Flower Production".to_string()),
        farm: Some("Naivasha Farm".to_string()),
        company: Some("Karen Roses".to_string()),
    });

    let n = notifier();
    ops::save_work_plan(
        &mut store,
        WorkPlan {
            id: "TWP-0001".to_string(),
            title: String::new(),
            request: Some("TWR-0001".to_string()),
            manager: Some("HR-EMP-0007".to_string()),
            business_unit: None,
            cost_center: None,
            stage: String::new(),
            workflow_state: "Draft".to_string(),
            owner: "planner@example.com".to_string(),
            posting_date: Some(date("2025-06-01")),
        },
        &n,
    )
    .unwrap();

    let plan = store.work_plan("TWP-0001").unwrap();
    assert_eq!(plan.business_unit.as_deref(), Some("Flower Production"));
    assert_eq!(plan.cost_center.as_deref(), Some("Naivasha Farm - KR"));
    assert_eq!(plan.title, "TWR-0001");

    let mut a = create_assignment("TWA-0001", "2025-06-02", "2025-06-06", vec![]);
    a.plan = Some("TWP-0001".to_string());
    ops::save_assignment(&mut store, a).unwrap();

    let saved = store.assignment("TWA-0001").unwrap();
    assert_eq!(saved.business_unit.as_deref(), Some("Flower Production"));
    assert_eq!(saved.cost_center.as_deref(), Some("Naivasha Farm - KR"));
}

/// Change-request lifecycle over the HTTP API: submit, approve, and the
/// replacement applied only to rows without recorded output.
#[tokio::test]
async fn test_change_request_flow_over_api() {
    let mut store = HrStore::new();
    seed_chart_of_accounts(&mut store);
    ops::save_assignment(
        &mut store,
        create_assignment(
            "TWA-0001",
            "2025-06-02",
            "2025-06-06",
            vec![
                create_worker_row("TW-OLD", "TASK-001", "0.10", "600", "0"),
                create_worker_row("TW-OLD", "TASK-002", "0.10", "600", "100"),
            ],
        ),
    )
    .unwrap();
    store.put_change_request(ChangeRequest {
        id: "ECR-0001".to_string(),
        title: String::new(),
        assignment: "TWA-0001".to_string(),
        task: None,
        old_worker: Some("TW-OLD".to_string()),
        new_worker: "TW-NEW".to_string(),
        change_type: ChangeType::ReplaceWorker,
        status: ChangeStatus::Draft,
        requested_by: "supervisor@example.com".to_string(),
        request_date: date("2025-06-03"),
        approved_by: None,
        approval_date: None,
        approval_notes: None,
    });

    let state = AppState::new(store, test_config(), Arc::new(RecordingSink::new()));
    let router = create_router(state.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/change-requests/ECR-0001/submit",
            r#"{"caller": "supervisor@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(post_json(
            "/change-requests/ECR-0001/approve",
            r#"{"caller": "hr@example.com", "notes": "worker transferred"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = outcome_from(response).await;
    assert!(outcome.success);
    assert!(outcome.message.contains("1 row(s)"));

    let store = state.store().read().unwrap();
    let a = store.assignment("TWA-0001").unwrap();
    assert_eq!(a.worker_rows[0].worker, "TW-NEW");
    assert_eq!(a.worker_rows[1].worker, "TW-OLD");
    let record = store.change_request("ECR-0001").unwrap();
    assert_eq!(record.status, ChangeStatus::Approved);
    assert_eq!(record.approval_notes.as_deref(), Some("worker transferred"));
}

/// Disbursement lifecycle over the HTTP API, ending in a 409 on the second
/// payment attempt.
#[tokio::test]
async fn test_disbursement_flow_over_api() {
    let mut store = HrStore::new();
    seed_chart_of_accounts(&mut store);
    ops::save_worker(&mut store, create_worker("TW-0001", "Wanjiku", "Kamau")).unwrap();
    let mut a = create_assignment(
        "TWA-0001",
        "2025-06-02",
        "2025-06-06",
        vec![create_worker_row("TW-0001", "TASK-001", "0.10", "1200", "1000")],
    );
    a.cost_center = Some("Farm A - KR".to_string());
    ops::save_assignment(&mut store, a).unwrap();
    ops::submit_assignment(&mut store, "TWA-0001").unwrap();
    ops::save_disbursement(&mut store, create_disbursement("TWD-0001", "2025-06-02", "2025-06-08"))
        .unwrap();
    ops::submit_disbursement(&mut store, "TWD-0001").unwrap();

    let state = AppState::new(store, test_config(), Arc::new(RecordingSink::new()));
    let router = create_router(state.clone());
    let caller = r#"{"caller": "hr@example.com"}"#;

    let response = router
        .clone()
        .oneshot(post_json("/disbursements/TWD-0001/load-payments", caller))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = outcome_from(response).await;
    assert!(outcome.success);

    let response = router
        .clone()
        .oneshot(post_json("/disbursements/TWD-0001/approve", caller))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(post_json("/disbursements/TWD-0001/mark-paid", caller))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = outcome_from(response).await;
    assert!(outcome.success);
    let journal_id = outcome.name.unwrap();

    {
        let store = state.store().read().unwrap();
        let journal = store.journal_entry(&journal_id).unwrap();
        assert!(journal.is_balanced());
        assert_eq!(journal.total_debit(), dec("100.00"));
        let d = store.disbursement("TWD-0001").unwrap();
        assert_eq!(d.status, DisbursementStatus::Paid);
        assert_eq!(d.paid_by.as_deref(), Some("hr@example.com"));
    }

    let response = router
        .oneshot(post_json("/disbursements/TWD-0001/mark-paid", caller))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: ApiError = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, "ALREADY_PAID");
}

/// Paying without a resolvable wages account fails before anything is
/// created.
#[test]
fn test_missing_account_configuration_blocks_payment() {
    let mut store = HrStore::new();
    let mut d = create_disbursement("TWD-0001", "2025-06-02", "2025-06-08");
    d.doc_status = DocStatus::Submitted;
    d.status = DisbursementStatus::Approved;
    d.total_net = dec("100.00");
    store.put_disbursement(d);

    let err = ops::mark_disbursement_paid(
        &mut store,
        &test_config(),
        "TWD-0001",
        "hr@example.com",
        date("2025-06-09"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Wages Expense Account"));
    assert_eq!(store.disbursement("TWD-0001").unwrap().status, DisbursementStatus::Approved);
}
