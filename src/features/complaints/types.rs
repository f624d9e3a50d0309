//! Wire types for the complaints API. Field names and enum spellings follow
//! the backend exactly; display labels live next to the enums so screens
//! never invent their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    Acknowledged,
    InInvestigation,
    ResponseDrafted,
    FinalResponseIssued,
    Closed,
    Reopened,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::New => "new",
            ComplaintStatus::Acknowledged => "acknowledged",
            ComplaintStatus::InInvestigation => "in_investigation",
            ComplaintStatus::ResponseDrafted => "response_drafted",
            ComplaintStatus::FinalResponseIssued => "final_response_issued",
            ComplaintStatus::Closed => "closed",
            ComplaintStatus::Reopened => "reopened",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::New => "New",
            ComplaintStatus::Acknowledged => "Acknowledged",
            ComplaintStatus::InInvestigation => "In investigation",
            ComplaintStatus::ResponseDrafted => "Response drafted",
            ComplaintStatus::FinalResponseIssued => "Final response issued",
            ComplaintStatus::Closed => "Closed",
            ComplaintStatus::Reopened => "Reopened",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ComplaintStatus::Closed)
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }

    /// Statuses offered by the list filter, in display order.
    pub const ALL: [ComplaintStatus; 7] = [
        ComplaintStatus::New,
        ComplaintStatus::Acknowledged,
        ComplaintStatus::InInvestigation,
        ComplaintStatus::ResponseDrafted,
        ComplaintStatus::FinalResponseIssued,
        ComplaintStatus::Closed,
        ComplaintStatus::Reopened,
    ];
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationChannel {
    Phone,
    Email,
    Letter,
    Web,
    ThirdParty,
    Other,
}

impl CommunicationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationChannel::Phone => "phone",
            CommunicationChannel::Email => "email",
            CommunicationChannel::Letter => "letter",
            CommunicationChannel::Web => "web",
            CommunicationChannel::ThirdParty => "third_party",
            CommunicationChannel::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommunicationChannel::Phone => "Phone",
            CommunicationChannel::Email => "Email",
            CommunicationChannel::Letter => "Letter",
            CommunicationChannel::Web => "Web",
            CommunicationChannel::ThirdParty => "Third party",
            CommunicationChannel::Other => "Other",
        }
    }

    pub const ALL: [CommunicationChannel; 6] = [
        CommunicationChannel::Phone,
        CommunicationChannel::Email,
        CommunicationChannel::Letter,
        CommunicationChannel::Web,
        CommunicationChannel::ThirdParty,
        CommunicationChannel::Other,
    ];

    pub fn from_wire(value: &str) -> Option<Self> {
        CommunicationChannel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationDirection {
    Inbound,
    Outbound,
}

impl CommunicationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationDirection::Inbound => "inbound",
            CommunicationDirection::Outbound => "outbound",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommunicationDirection::Inbound => "Inbound",
            CommunicationDirection::Outbound => "Outbound",
        }
    }

    pub const ALL: [CommunicationDirection; 2] =
        [CommunicationDirection::Inbound, CommunicationDirection::Outbound];

    pub fn from_wire(value: &str) -> Option<Self> {
        CommunicationDirection::ALL
            .into_iter()
            .find(|direction| direction.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    Upheld,
    PartiallyUpheld,
    NotUpheld,
    Withdrawn,
    OutOfScope,
}

impl OutcomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Upheld => "upheld",
            OutcomeType::PartiallyUpheld => "partially_upheld",
            OutcomeType::NotUpheld => "not_upheld",
            OutcomeType::Withdrawn => "withdrawn",
            OutcomeType::OutOfScope => "out_of_scope",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutcomeType::Upheld => "Upheld",
            OutcomeType::PartiallyUpheld => "Partially upheld",
            OutcomeType::NotUpheld => "Not upheld",
            OutcomeType::Withdrawn => "Withdrawn",
            OutcomeType::OutOfScope => "Out of scope",
        }
    }

    pub const ALL: [OutcomeType; 5] = [
        OutcomeType::Upheld,
        OutcomeType::PartiallyUpheld,
        OutcomeType::NotUpheld,
        OutcomeType::Withdrawn,
        OutcomeType::OutOfScope,
    ];

    pub fn from_wire(value: &str) -> Option<Self> {
        OutcomeType::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedressPaymentStatus {
    Pending,
    Authorised,
    Paid,
}

impl RedressPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedressPaymentStatus::Pending => "pending",
            RedressPaymentStatus::Authorised => "authorised",
            RedressPaymentStatus::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RedressPaymentStatus::Pending => "Pending",
            RedressPaymentStatus::Authorised => "Authorised",
            RedressPaymentStatus::Paid => "Paid",
        }
    }

    pub const ALL: [RedressPaymentStatus; 3] = [
        RedressPaymentStatus::Pending,
        RedressPaymentStatus::Authorised,
        RedressPaymentStatus::Paid,
    ];

    pub fn from_wire(value: &str) -> Option<Self> {
        RedressPaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedressType {
    FinancialLoss,
    InterestOnFinancialLoss,
    DistressAndInconvenience,
    ConsequentialLoss,
    PremiumRefundAdjustment,
    GoodwillPayment,
    ThirdPartyPayment,
    ApologyOrExplanation,
    RemedialAction,
}

impl RedressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedressType::FinancialLoss => "financial_loss",
            RedressType::InterestOnFinancialLoss => "interest_on_financial_loss",
            RedressType::DistressAndInconvenience => "distress_and_inconvenience",
            RedressType::ConsequentialLoss => "consequential_loss",
            RedressType::PremiumRefundAdjustment => "premium_refund_adjustment",
            RedressType::GoodwillPayment => "goodwill_payment",
            RedressType::ThirdPartyPayment => "third_party_payment",
            RedressType::ApologyOrExplanation => "apology_or_explanation",
            RedressType::RemedialAction => "remedial_action",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RedressType::FinancialLoss => "Financial loss",
            RedressType::InterestOnFinancialLoss => "Interest on financial loss",
            RedressType::DistressAndInconvenience => "Distress and inconvenience",
            RedressType::ConsequentialLoss => "Consequential loss",
            RedressType::PremiumRefundAdjustment => "Premium refund or adjustment",
            RedressType::GoodwillPayment => "Goodwill payment",
            RedressType::ThirdPartyPayment => "Third party payment",
            RedressType::ApologyOrExplanation => "Apology or explanation",
            RedressType::RemedialAction => "Remedial action",
        }
    }

    pub const ALL: [RedressType; 9] = [
        RedressType::FinancialLoss,
        RedressType::InterestOnFinancialLoss,
        RedressType::DistressAndInconvenience,
        RedressType::ConsequentialLoss,
        RedressType::PremiumRefundAdjustment,
        RedressType::GoodwillPayment,
        RedressType::ThirdPartyPayment,
        RedressType::ApologyOrExplanation,
        RedressType::RemedialAction,
    ];

    pub fn from_wire(value: &str) -> Option<Self> {
        RedressType::ALL
            .into_iter()
            .find(|payment_type| payment_type.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::NotStarted => "not_started",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionStatus::NotStarted => "Not started",
            ActionStatus::InProgress => "In progress",
            ActionStatus::Completed => "Completed",
        }
    }

    pub const ALL: [ActionStatus; 3] = [
        ActionStatus::NotStarted,
        ActionStatus::InProgress,
        ActionStatus::Completed,
    ];

    pub fn from_wire(value: &str) -> Option<Self> {
        ActionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ComplainantCreate {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ComplainantOut {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub preferred_contact_method: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PolicyCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PolicyOut {
    pub id: String,
    pub policy_number: Option<String>,
    pub insurer: Option<String>,
    pub broker: Option<String>,
    pub product: Option<String>,
    pub scheme: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComplaintCreate {
    pub source: String,
    pub received_at: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub fca_complaint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fca_rationale: Option<String>,
    pub fos_complaint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fos_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fos_referred_at: Option<String>,
    pub vulnerability_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    pub complainant: ComplainantCreate,
    pub policy: PolicyCreate,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AttachmentOut {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CommunicationOut {
    pub id: String,
    pub channel: CommunicationChannel,
    pub direction: CommunicationDirection,
    pub summary: String,
    pub occurred_at: String,
    pub is_final_response: bool,
    pub created_at: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentOut>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TaskOut {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub is_checklist: bool,
    pub assigned_to_id: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutcomeCreate {
    pub outcome: OutcomeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OutcomeOut {
    pub id: String,
    pub outcome: OutcomeType,
    pub notes: Option<String>,
    pub recorded_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RedressCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub payment_type: RedressType,
    pub status: RedressPaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    pub action_status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_description: Option<String>,
    pub approved: bool,
}

/// Partial redress update; only set fields are sent.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RedressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RedressPaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_status: Option<ActionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RedressOut {
    pub id: String,
    pub amount: Option<f64>,
    pub payment_type: RedressType,
    pub status: RedressPaymentStatus,
    pub created_at: String,
    pub notes: Option<String>,
    pub rationale: Option<String>,
    pub action_description: Option<String>,
    pub action_status: ActionStatus,
    pub approved: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ReopenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reopened_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CloseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EscalateRequest {
    pub manager_id: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ComplaintOut {
    pub id: String,
    pub reference: String,
    pub status: ComplaintStatus,
    pub source: String,
    pub received_at: String,
    pub description: String,
    pub category: String,
    pub reason: Option<String>,
    pub fca_complaint: bool,
    pub fos_complaint: bool,
    pub fos_reference: Option<String>,
    pub fos_referred_at: Option<String>,
    pub vulnerability_flag: bool,
    pub vulnerability_notes: Option<String>,
    pub non_reportable: bool,
    pub ack_due_at: String,
    pub final_due_at: String,
    pub acknowledged_at: Option<String>,
    pub final_response_at: Option<String>,
    pub closed_at: Option<String>,
    pub ack_breached: bool,
    pub final_breached: bool,
    pub assigned_handler_id: Option<String>,
    pub assigned_handler_name: Option<String>,
    pub product: Option<String>,
    pub scheme: Option<String>,
    pub broker: Option<String>,
    pub insurer: Option<String>,
    pub policy_number: Option<String>,
    pub is_escalated: bool,
    pub complainant: ComplainantOut,
    pub policy: PolicyOut,
    #[serde(default)]
    pub communications: Vec<CommunicationOut>,
    #[serde(default)]
    pub tasks: Vec<TaskOut>,
    pub outcome: Option<OutcomeOut>,
    #[serde(default)]
    pub redress_payments: Vec<RedressOut>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EventOut {
    pub id: String,
    pub event_type: String,
    pub description: Option<String>,
    pub created_at: String,
    pub created_by_id: Option<String>,
    pub created_by_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MetricsResponse {
    pub as_of: String,
    pub kpis: MetricsKpis,
    pub sla_30d: SlaWindows,
    pub aging_open: AgingBuckets,
    pub flow_7d: FlowWindow,
    pub workload_open_by_handler: Vec<HandlerWorkload>,
    pub status_open: HashMap<String, i64>,
    pub risk: RiskMetrics,
    pub counts: MetricsCounts,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MetricsKpis {
    pub open: i64,
    pub my_open: i64,
    pub open_sla_breaches: i64,
    pub open_stale_21d: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SlaWindows {
    pub ack: SlaWindow,
    #[serde(rename = "final")]
    pub final_response: SlaWindow,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SlaWindow {
    pub on_time_pct: Option<f64>,
    pub on_time: i64,
    pub total: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AgingBuckets {
    #[serde(rename = "0-7")]
    pub days_0_7: i64,
    #[serde(rename = "8-21")]
    pub days_8_21: i64,
    #[serde(rename = "22-56")]
    pub days_22_56: i64,
    #[serde(rename = "56+")]
    pub days_56_plus: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FlowWindow {
    pub new: i64,
    pub closed: i64,
}

/// One handler's open-case count; `id` is `"unassigned"` for the unassigned
/// bucket.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HandlerWorkload {
    pub id: String,
    pub name: String,
    pub count: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RiskMetrics {
    pub open_vulnerable: VulnerableRisk,
    pub reopened: ReopenedRisk,
    pub escalated_open: i64,
    pub final_attachment_open_pct: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VulnerableRisk {
    pub count: i64,
    pub pct_of_open: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReopenedRisk {
    pub count: i64,
    pub pct_all_time: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MetricsCounts {
    pub total: i64,
    pub open: i64,
    pub closed: i64,
}

/// Server-side filters for the complaint list. `page` is 1-based and always
/// sent, so the query string is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplaintFilters {
    pub status: Option<ComplaintStatus>,
    pub handler_id: Option<String>,
    pub product: Option<String>,
    pub outcome: Option<OutcomeType>,
    pub vulnerability: Option<bool>,
    pub overdue: Option<bool>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ComplaintFilters {
    fn default() -> Self {
        Self {
            status: None,
            handler_id: None,
            product: None,
            outcome: None,
            vulnerability: None,
            overdue: None,
            search: None,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: 20,
        }
    }
}

impl ComplaintFilters {
    /// Query pairs in the backend's parameter names. Empty optional values
    /// are dropped.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status_filter", status.as_str().to_string()));
        }
        if let Some(handler_id) = &self.handler_id {
            pairs.push(("handler_id", handler_id.clone()));
        }
        if let Some(product) = &self.product {
            pairs.push(("product", product.clone()));
        }
        if let Some(outcome) = self.outcome {
            pairs.push(("outcome", outcome.as_str().to_string()));
        }
        if let Some(vulnerability) = self.vulnerability {
            pairs.push(("vulnerability", vulnerability.to_string()));
        }
        if let Some(overdue) = self.overdue {
            pairs.push(("overdue", overdue.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(date_from) = &self.date_from {
            pairs.push(("date_from", date_from.clone()));
        }
        if let Some(date_to) = &self.date_to {
            pairs.push(("date_to", date_to.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("page_size", self.page_size.to_string()));
        pairs
    }
}

/// Fields of a new case note; attachments travel alongside as multipart
/// files.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCommunication {
    pub channel: CommunicationChannel,
    pub direction: CommunicationDirection,
    pub summary: String,
    pub occurred_at: String,
    pub is_final_response: bool,
}

/// Date portion of an ISO timestamp, for table cells.
pub fn format_date(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}

/// Minute-resolution display of an ISO timestamp.
pub fn format_date_time(timestamp: &str) -> String {
    timestamp
        .chars()
        .take(16)
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}

/// Trims a form value; an empty result becomes `None` so serde skips the
/// field entirely.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_spellings_match_backend() {
        let json = serde_json::to_string(&RedressType::InterestOnFinancialLoss)
            .expect("serialize redress type");
        assert_eq!(json, "\"interest_on_financial_loss\"");

        let json =
            serde_json::to_string(&ComplaintStatus::FinalResponseIssued).expect("serialize status");
        assert_eq!(json, "\"final_response_issued\"");

        let channel: CommunicationChannel =
            serde_json::from_str("\"third_party\"").expect("deserialize channel");
        assert_eq!(channel, CommunicationChannel::ThirdParty);
    }

    #[test]
    fn every_status_except_closed_counts_as_open() {
        for status in ComplaintStatus::ALL {
            assert_eq!(status.is_open(), status != ComplaintStatus::Closed);
        }
    }

    #[test]
    fn complaint_out_parses_backend_shape() {
        let json = r#"{
            "id": "c-1",
            "reference": "CMP-2026-000042",
            "status": "in_investigation",
            "source": "Web",
            "received_at": "2026-02-01T09:15:00Z",
            "description": "Policy cancelled without notice",
            "category": "Cancellations and Refunds",
            "reason": null,
            "fca_complaint": true,
            "fos_complaint": false,
            "fos_reference": null,
            "fos_referred_at": null,
            "vulnerability_flag": false,
            "vulnerability_notes": null,
            "non_reportable": false,
            "ack_due_at": "2026-02-04T09:15:00Z",
            "final_due_at": "2026-03-29T09:15:00Z",
            "acknowledged_at": "2026-02-02T10:00:00Z",
            "final_response_at": null,
            "closed_at": null,
            "ack_breached": false,
            "final_breached": false,
            "assigned_handler_id": "u-1",
            "assigned_handler_name": "Case Handler",
            "product": "Motor",
            "scheme": null,
            "broker": null,
            "insurer": "Acme Underwriting",
            "policy_number": "POL-9912",
            "is_escalated": false,
            "complainant": {
                "id": "p-1",
                "full_name": "Jordan Hale",
                "email": "jordan@example.com",
                "phone": null,
                "address": null,
                "date_of_birth": null,
                "preferred_contact_method": "email"
            },
            "policy": {
                "id": "pol-1",
                "policy_number": "POL-9912",
                "insurer": "Acme Underwriting",
                "broker": null,
                "product": "Motor",
                "scheme": null
            },
            "communications": [
                {
                    "id": "comm-1",
                    "channel": "email",
                    "direction": "inbound",
                    "summary": "Initial complaint via Web",
                    "occurred_at": "2026-02-01T09:15:00Z",
                    "is_final_response": false,
                    "created_at": "2026-02-01T09:16:00Z",
                    "attachments": [
                        {
                            "id": "att-1",
                            "file_name": "letter.pdf",
                            "content_type": "application/pdf",
                            "url": "/attachments/att-1"
                        }
                    ]
                }
            ],
            "tasks": [],
            "outcome": null,
            "redress_payments": []
        }"#;

        let complaint: ComplaintOut = serde_json::from_str(json).expect("deserialize complaint");
        assert_eq!(complaint.status, ComplaintStatus::InInvestigation);
        assert!(complaint.status.is_open());
        assert_eq!(complaint.communications.len(), 1);
        assert_eq!(complaint.communications[0].attachments[0].file_name, "letter.pdf");
        assert_eq!(complaint.outcome, None);
    }

    #[test]
    fn metrics_parse_including_null_percentages() {
        let json = r#"{
            "as_of": "2026-02-10T12:00:00Z",
            "kpis": {"open": 12, "my_open": 3, "open_sla_breaches": 2, "open_stale_21d": 1},
            "sla_30d": {
                "ack": {"on_time_pct": 87.5, "on_time": 7, "total": 8},
                "final": {"on_time_pct": null, "on_time": 0, "total": 0}
            },
            "aging_open": {"0-7": 4, "8-21": 5, "22-56": 2, "56+": 1},
            "flow_7d": {"new": 6, "closed": 4},
            "workload_open_by_handler": [
                {"id": "u-1", "name": "Case Handler", "count": 5},
                {"id": "unassigned", "name": "Unassigned", "count": 3}
            ],
            "status_open": {"new": 4, "in_investigation": 8},
            "risk": {
                "open_vulnerable": {"count": 2, "pct_of_open": 16.7},
                "reopened": {"count": 1, "pct_all_time": 2.5},
                "escalated_open": 1,
                "final_attachment_open_pct": null
            },
            "counts": {"total": 40, "open": 12, "closed": 28}
        }"#;

        let metrics: MetricsResponse = serde_json::from_str(json).expect("deserialize metrics");
        assert_eq!(metrics.kpis.open, 12);
        assert_eq!(metrics.sla_30d.final_response.on_time_pct, None);
        assert_eq!(metrics.aging_open.days_56_plus, 1);
        assert_eq!(metrics.workload_open_by_handler[1].id, "unassigned");
        assert_eq!(metrics.risk.open_vulnerable.count, 2);
        assert_eq!(metrics.status_open.get("in_investigation"), Some(&8));
    }

    #[test]
    fn filters_emit_backend_parameter_names() {
        let filters = ComplaintFilters {
            status: Some(ComplaintStatus::New),
            overdue: Some(true),
            search: Some("CMP-2026".to_string()),
            page: 2,
            page_size: 50,
            ..ComplaintFilters::default()
        };

        let pairs = filters.to_pairs();
        assert!(pairs.contains(&("status_filter", "new".to_string())));
        assert!(pairs.contains(&("overdue", "true".to_string())));
        assert!(pairs.contains(&("search", "CMP-2026".to_string())));
        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("page_size", "50".to_string())));
        assert!(!pairs.iter().any(|(name, _)| *name == "handler_id"));
    }

    #[test]
    fn timestamp_display_helpers_trim_iso_strings() {
        assert_eq!(format_date("2026-02-01T09:15:00Z"), "2026-02-01");
        assert_eq!(format_date_time("2026-02-01T09:15:00Z"), "2026-02-01 09:15");
        assert_eq!(format_date("2026"), "2026");
        assert_eq!(format_date_time(""), "");
    }
}
