//! Case handling rules mirrored from the backend service layer. The UI uses
//! these to hide or disable actions the backend would reject; the backend
//! remains the authority on every transition.

use crate::features::complaints::types::{
    CommunicationChannel, ComplaintOut, ComplaintStatus, RedressCreate, RedressPaymentStatus,
    RedressType,
};
use crate::features::users::types::UserRole;

/// Categories recognised by the intake form, in display order.
pub const FCA_CATEGORIES: [&str; 12] = [
    "Policy Administration",
    "Sales and Advice",
    "Pricing and Premiums",
    "Claims Handling",
    "Customer Service",
    "Cancellations and Refunds",
    "Disclosure and Documentation",
    "Vulnerability and Customer Treatment",
    "Data Protection and Privacy",
    "Third-Party / Supplier Issues",
    "Fraud or Financial Crime",
    "Other / Unclassified",
];

/// How a complaint reached the organisation.
pub const SOURCES: [&str; 6] = ["Web", "Email", "Letter", "Phone", "In Person", "Other"];

pub const VULNERABILITY_CATEGORY: &str = "Vulnerability and Customer Treatment";
pub const UNCLASSIFIED_CATEGORY: &str = "Other / Unclassified";

/// Acknowledgement applies to cases that have not been worked yet.
pub fn can_acknowledge(complaint: &ComplaintOut) -> bool {
    matches!(
        complaint.status,
        ComplaintStatus::New | ComplaintStatus::Reopened
    )
}

pub fn can_start_investigation(complaint: &ComplaintOut) -> bool {
    matches!(
        complaint.status,
        ComplaintStatus::Acknowledged | ComplaintStatus::New | ComplaintStatus::Reopened
    )
}

/// Outcomes may be recorded or revised at any point while the case is open.
pub fn can_record_outcome(complaint: &ComplaintOut) -> bool {
    complaint.status.is_open()
}

pub fn can_issue_final_response(complaint: &ComplaintOut) -> bool {
    complaint.status.is_open() && complaint.outcome.is_some()
}

/// Closing needs both a recorded outcome and an issued final response.
pub fn can_close(complaint: &ComplaintOut) -> bool {
    complaint.status.is_open()
        && complaint.outcome.is_some()
        && complaint.final_response_at.is_some()
}

/// Non-reportable closure skips the outcome and response preconditions.
pub fn can_close_non_reportable(complaint: &ComplaintOut) -> bool {
    complaint.status.is_open()
}

/// A case can be reopened after closure or once the final response is out.
pub fn can_reopen(complaint: &ComplaintOut) -> bool {
    matches!(
        complaint.status,
        ComplaintStatus::Closed | ComplaintStatus::FinalResponseIssued
    )
}

pub fn can_escalate(complaint: &ComplaintOut) -> bool {
    complaint.status.is_open() && !complaint.is_escalated
}

/// Every role except read-only may work cases.
pub fn role_can_work_cases(role: UserRole) -> bool {
    !matches!(role, UserRole::ReadOnly)
}

pub fn role_can_delete(role: UserRole) -> bool {
    matches!(role, UserRole::Admin)
}

/// Admins, reviewers, and managers may assign anyone.
pub fn role_can_assign_freely(role: UserRole) -> bool {
    matches!(
        role,
        UserRole::Admin | UserRole::Reviewer | UserRole::ComplaintsManager
    )
}

/// Handlers may pick up unassigned cases themselves.
pub fn can_self_assign(role: UserRole, complaint: &ComplaintOut) -> bool {
    matches!(role, UserRole::ComplaintsHandler) && complaint.assigned_handler_id.is_none()
}

/// Apologies and remedial actions carry no payment; everything else does.
pub fn is_monetary(redress_type: RedressType) -> bool {
    !matches!(
        redress_type,
        RedressType::ApologyOrExplanation | RedressType::RemedialAction
    )
}

/// Preflights a redress payment with the backend's own messages so the form
/// can reject it without a round trip.
pub fn validate_redress(create: &RedressCreate) -> Result<(), String> {
    if is_monetary(create.payment_type) {
        if create.amount.is_none() {
            return Err("Amount required for monetary redress".to_string());
        }
        if create
            .rationale
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            return Err("Rationale required for monetary redress".to_string());
        }
    } else if create
        .action_description
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .is_empty()
    {
        return Err("Action description required for non-monetary redress".to_string());
    }

    if create.status != RedressPaymentStatus::Pending && !create.approved {
        return Err("Redress must be approved before changing payment status".to_string());
    }

    Ok(())
}

/// Naming this category flags the complainant as vulnerable on intake.
pub fn forces_vulnerability_flag(category: &str) -> bool {
    category == VULNERABILITY_CATEGORY
}

/// Intake checks the backend would reject anyway, surfaced before submit.
pub fn validate_new_complaint(
    complainant_name: &str,
    description: &str,
    category: &str,
    reason: &str,
) -> Result<(), String> {
    if complainant_name.trim().is_empty() {
        return Err("Complainant name is required".to_string());
    }
    if description.trim().is_empty() {
        return Err("Description is required".to_string());
    }
    if category == UNCLASSIFIED_CATEGORY && reason.trim().is_empty() {
        return Err("Reason is required when category is Other / Unclassified".to_string());
    }
    Ok(())
}

/// Channel recorded for the optional intake attachment, derived from how the
/// complaint arrived.
pub fn source_channel(source: &str) -> CommunicationChannel {
    match source {
        "Email" => CommunicationChannel::Email,
        "Letter" => CommunicationChannel::Letter,
        "Phone" => CommunicationChannel::Phone,
        "Web" => CommunicationChannel::Web,
        _ => CommunicationChannel::Other,
    }
}

/// SLA check for rows in the list view. `now` is an ISO timestamp; uniform
/// ISO strings compare chronologically. Closed cases are never overdue.
pub fn is_overdue(complaint: &ComplaintOut, now: &str) -> bool {
    if complaint.status == ComplaintStatus::Closed {
        return false;
    }
    if complaint.acknowledged_at.is_none() {
        return complaint.ack_due_at.as_str() < now;
    }
    if complaint.final_response_at.is_none() {
        return complaint.final_due_at.as_str() < now;
    }
    false
}

/// Sortable columns of the list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Reference,
    Status,
    Complainant,
    Received,
    Handler,
}

fn handler_key(complaint: &ComplaintOut) -> (bool, &str) {
    // Unassigned rows sort after every named handler.
    match complaint.assigned_handler_name.as_deref() {
        Some(name) => (false, name),
        None => (true, ""),
    }
}

/// In-page sort for the list view; the fetch order stays server-defined.
pub fn sort_page(items: &mut [ComplaintOut], field: SortField, ascending: bool) {
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Reference => a.reference.cmp(&b.reference),
            SortField::Status => a.status.label().cmp(b.status.label()),
            SortField::Complainant => a.complainant.full_name.cmp(&b.complainant.full_name),
            SortField::Received => a.received_at.cmp(&b.received_at),
            SortField::Handler => handler_key(a).cmp(&handler_key(b)),
        };
        if ascending { ordering } else { ordering.reverse() }
    });
}

/// Queue order for work lists: SLA-breached cases first, oldest received
/// first within each group. ISO timestamps compare chronologically as
/// strings.
pub fn sort_queue(items: &mut [ComplaintOut]) {
    items.sort_by(|a, b| {
        let a_breached = a.ack_breached || a.final_breached;
        let b_breached = b.ack_breached || b.final_breached;
        b_breached
            .cmp(&a_breached)
            .then_with(|| a.received_at.cmp(&b.received_at))
    });
}

/// Oldest received first, for the backlog queue.
pub fn oldest_first(items: &mut [ComplaintOut]) {
    items.sort_by(|a, b| a.received_at.cmp(&b.received_at));
}

/// Drops closed cases from a queue.
pub fn retain_open(items: &mut Vec<ComplaintOut>) {
    items.retain(|c| c.status.is_open());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::types::{
        ActionStatus, ComplainantOut, OutcomeOut, OutcomeType, PolicyOut,
    };

    fn sample(status: ComplaintStatus) -> ComplaintOut {
        ComplaintOut {
            id: "c-1".to_string(),
            reference: "CMP-2026-000001".to_string(),
            status,
            source: "Web".to_string(),
            received_at: "2026-02-01T09:00:00Z".to_string(),
            description: "Premium doubled without notice".to_string(),
            category: "Pricing and Premiums".to_string(),
            reason: None,
            fca_complaint: true,
            fos_complaint: false,
            fos_reference: None,
            fos_referred_at: None,
            vulnerability_flag: false,
            vulnerability_notes: None,
            non_reportable: false,
            ack_due_at: "2026-02-04T09:00:00Z".to_string(),
            final_due_at: "2026-03-29T09:00:00Z".to_string(),
            acknowledged_at: None,
            final_response_at: None,
            closed_at: None,
            ack_breached: false,
            final_breached: false,
            assigned_handler_id: None,
            assigned_handler_name: None,
            product: None,
            scheme: None,
            broker: None,
            insurer: None,
            policy_number: None,
            is_escalated: false,
            complainant: ComplainantOut {
                id: "p-1".to_string(),
                full_name: "Jordan Hale".to_string(),
                email: None,
                phone: None,
                address: None,
                date_of_birth: None,
                preferred_contact_method: None,
            },
            policy: PolicyOut {
                id: "pol-1".to_string(),
                policy_number: None,
                insurer: None,
                broker: None,
                product: None,
                scheme: None,
            },
            communications: Vec::new(),
            tasks: Vec::new(),
            outcome: None,
            redress_payments: Vec::new(),
        }
    }

    fn with_outcome(mut complaint: ComplaintOut) -> ComplaintOut {
        complaint.outcome = Some(OutcomeOut {
            id: "o-1".to_string(),
            outcome: OutcomeType::Upheld,
            notes: None,
            recorded_at: "2026-02-10T10:00:00Z".to_string(),
        });
        complaint
    }

    #[test]
    fn acknowledge_applies_to_new_and_reopened_only() {
        assert!(can_acknowledge(&sample(ComplaintStatus::New)));
        assert!(can_acknowledge(&sample(ComplaintStatus::Reopened)));
        assert!(!can_acknowledge(&sample(ComplaintStatus::Acknowledged)));
        assert!(!can_acknowledge(&sample(ComplaintStatus::Closed)));
    }

    #[test]
    fn investigation_skips_closed_and_later_stages() {
        assert!(can_start_investigation(&sample(ComplaintStatus::New)));
        assert!(can_start_investigation(&sample(ComplaintStatus::Acknowledged)));
        assert!(can_start_investigation(&sample(ComplaintStatus::Reopened)));
        assert!(!can_start_investigation(&sample(
            ComplaintStatus::InInvestigation
        )));
        assert!(!can_start_investigation(&sample(ComplaintStatus::Closed)));
    }

    #[test]
    fn final_response_needs_a_recorded_outcome() {
        let open = sample(ComplaintStatus::InInvestigation);
        assert!(!can_issue_final_response(&open));
        assert!(can_issue_final_response(&with_outcome(open)));
    }

    #[test]
    fn closing_needs_outcome_and_final_response() {
        let mut complaint = with_outcome(sample(ComplaintStatus::FinalResponseIssued));
        assert!(!can_close(&complaint));

        complaint.final_response_at = Some("2026-03-01T10:00:00Z".to_string());
        assert!(can_close(&complaint));
        assert!(can_reopen(&complaint));

        complaint.status = ComplaintStatus::Closed;
        assert!(!can_close(&complaint));
        assert!(can_reopen(&complaint));
        assert!(!can_reopen(&sample(ComplaintStatus::InInvestigation)));
    }

    #[test]
    fn escalation_is_single_shot_per_open_case() {
        let mut complaint = sample(ComplaintStatus::InInvestigation);
        assert!(can_escalate(&complaint));

        complaint.is_escalated = true;
        assert!(!can_escalate(&complaint));
    }

    #[test]
    fn assignment_permissions_follow_roles() {
        let unassigned = sample(ComplaintStatus::New);
        let mut assigned = sample(ComplaintStatus::New);
        assigned.assigned_handler_id = Some("u-9".to_string());

        assert!(role_can_assign_freely(UserRole::Admin));
        assert!(role_can_assign_freely(UserRole::Reviewer));
        assert!(role_can_assign_freely(UserRole::ComplaintsManager));
        assert!(!role_can_assign_freely(UserRole::ComplaintsHandler));

        assert!(can_self_assign(UserRole::ComplaintsHandler, &unassigned));
        assert!(!can_self_assign(UserRole::ComplaintsHandler, &assigned));
        assert!(!can_self_assign(UserRole::ReadOnly, &unassigned));
    }

    #[test]
    fn monetary_redress_requires_amount_and_rationale() {
        let mut create = RedressCreate {
            amount: None,
            payment_type: RedressType::GoodwillPayment,
            status: RedressPaymentStatus::Pending,
            notes: None,
            outcome_id: None,
            rationale: None,
            action_status: ActionStatus::NotStarted,
            action_description: None,
            approved: false,
        };

        assert_eq!(
            validate_redress(&create),
            Err("Amount required for monetary redress".to_string())
        );

        create.amount = Some(150.0);
        assert_eq!(
            validate_redress(&create),
            Err("Rationale required for monetary redress".to_string())
        );

        create.rationale = Some("Goodwill for delayed response".to_string());
        assert_eq!(validate_redress(&create), Ok(()));
    }

    #[test]
    fn non_monetary_redress_requires_action_description() {
        let mut create = RedressCreate {
            amount: None,
            payment_type: RedressType::ApologyOrExplanation,
            status: RedressPaymentStatus::Pending,
            notes: None,
            outcome_id: None,
            rationale: None,
            action_status: ActionStatus::NotStarted,
            action_description: None,
            approved: false,
        };

        assert_eq!(
            validate_redress(&create),
            Err("Action description required for non-monetary redress".to_string())
        );

        create.action_description = Some("Send written apology".to_string());
        assert_eq!(validate_redress(&create), Ok(()));
    }

    #[test]
    fn unapproved_redress_stays_pending() {
        let create = RedressCreate {
            amount: Some(50.0),
            payment_type: RedressType::FinancialLoss,
            status: RedressPaymentStatus::Authorised,
            notes: None,
            outcome_id: None,
            rationale: Some("Refund of overcharge".to_string()),
            action_status: ActionStatus::NotStarted,
            action_description: None,
            approved: false,
        };

        assert_eq!(
            validate_redress(&create),
            Err("Redress must be approved before changing payment status".to_string())
        );
    }

    #[test]
    fn intake_rules_match_backend_service() {
        assert!(forces_vulnerability_flag(VULNERABILITY_CATEGORY));
        assert!(!forces_vulnerability_flag("Claims Handling"));

        assert_eq!(
            validate_new_complaint("Jordan Hale", "details", UNCLASSIFIED_CATEGORY, "  "),
            Err("Reason is required when category is Other / Unclassified".to_string())
        );
        assert_eq!(
            validate_new_complaint("Jordan Hale", "details", "Claims Handling", ""),
            Ok(())
        );
        assert!(validate_new_complaint(" ", "details", "Claims Handling", "").is_err());
    }

    #[test]
    fn intake_source_maps_to_a_recorded_channel() {
        assert_eq!(source_channel("Email"), CommunicationChannel::Email);
        assert_eq!(source_channel("Web"), CommunicationChannel::Web);
        assert_eq!(source_channel("In Person"), CommunicationChannel::Other);
        assert_eq!(source_channel("Other"), CommunicationChannel::Other);
    }

    #[test]
    fn queue_puts_breached_cases_first_then_oldest() {
        let mut fresh = sample(ComplaintStatus::New);
        fresh.id = "fresh".to_string();
        fresh.received_at = "2026-02-08T09:00:00Z".to_string();

        let mut old = sample(ComplaintStatus::Acknowledged);
        old.id = "old".to_string();
        old.received_at = "2026-01-02T09:00:00Z".to_string();

        let mut breached = sample(ComplaintStatus::InInvestigation);
        breached.id = "breached".to_string();
        breached.received_at = "2026-02-05T09:00:00Z".to_string();
        breached.final_breached = true;

        let mut queue = vec![fresh, old, breached];
        sort_queue(&mut queue);

        let order: Vec<&str> = queue.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["breached", "old", "fresh"]);
    }

    #[test]
    fn overdue_follows_the_next_pending_deadline() {
        let mut complaint = sample(ComplaintStatus::New);
        assert!(!is_overdue(&complaint, "2026-02-03T09:00:00Z"));
        assert!(is_overdue(&complaint, "2026-02-05T09:00:00Z"));

        // Once acknowledged, only the final-response deadline counts.
        complaint.acknowledged_at = Some("2026-02-02T09:00:00Z".to_string());
        assert!(!is_overdue(&complaint, "2026-02-05T09:00:00Z"));
        assert!(is_overdue(&complaint, "2026-04-01T09:00:00Z"));

        complaint.final_response_at = Some("2026-03-20T09:00:00Z".to_string());
        assert!(!is_overdue(&complaint, "2026-04-01T09:00:00Z"));

        let closed = sample(ComplaintStatus::Closed);
        assert!(!is_overdue(&closed, "2099-01-01T00:00:00Z"));
    }

    #[test]
    fn page_sort_handles_direction_and_missing_handlers() {
        let mut first = sample(ComplaintStatus::New);
        first.id = "a".to_string();
        first.reference = "CMP-2026-000001".to_string();
        first.assigned_handler_name = Some("Avery Quinn".to_string());

        let mut second = sample(ComplaintStatus::New);
        second.id = "b".to_string();
        second.reference = "CMP-2026-000002".to_string();

        let mut items = vec![second.clone(), first.clone()];
        sort_page(&mut items, SortField::Reference, true);
        assert_eq!(items[0].id, "a");

        sort_page(&mut items, SortField::Reference, false);
        assert_eq!(items[0].id, "b");

        // Ascending handler sort keeps unassigned rows at the bottom.
        let mut items = vec![second, first];
        sort_page(&mut items, SortField::Handler, true);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].id, "b");
    }

    #[test]
    fn retain_open_drops_closed_cases() {
        let mut items = vec![
            sample(ComplaintStatus::New),
            sample(ComplaintStatus::Closed),
            sample(ComplaintStatus::Reopened),
        ];
        retain_open(&mut items);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|c| c.status.is_open()));
    }
}
