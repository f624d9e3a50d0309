//! Case detail route. The header carries the workflow actions the current
//! status and role allow; the tabs below cover the record itself, its
//! communications, outcome and redress, and the audit trail.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Modal, Spinner, StatusBadge};
use crate::features::auth::{Guarded, state::use_auth};
use crate::features::complaints::{
    client,
    types::{
        ActionStatus, CloseRequest, CommunicationChannel, CommunicationDirection,
        CommunicationOut, ComplaintOut, EscalateRequest, EventOut, NewCommunication,
        OutcomeCreate, OutcomeOut, OutcomeType, RedressCreate, RedressOut,
        RedressPaymentStatus, RedressType, RedressUpdate, ReopenRequest, format_date,
        format_date_time, optional_text,
    },
    workflow,
};
use crate::features::users::{client as users_client, types::UserOut, types::UserRole};
use crate::routes::NotFoundContent;
use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::File;

const CARD_CLASS: &str =
    "rounded-lg border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800";
const TAB_CLASS: &str =
    "px-3 py-2 text-sm font-medium text-gray-500 hover:text-gray-700 dark:text-gray-400 dark:hover:text-gray-200";
const ACTIVE_TAB_CLASS: &str =
    "px-3 py-2 text-sm font-medium text-blue-700 border-b-2 border-blue-700 dark:text-blue-400 dark:border-blue-400";
const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
const CHECKBOX_CLASS: &str = "w-4 h-4 text-blue-600 bg-gray-100 border-gray-300 rounded focus:ring-blue-500 dark:focus:ring-blue-600 dark:ring-offset-gray-800 focus:ring-2 dark:bg-gray-700 dark:border-gray-600";
const ACTION_CLASS: &str = "px-3 py-2 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700";
const DANGER_ACTION_CLASS: &str = "px-3 py-2 text-sm font-medium text-red-600 bg-white border border-red-300 rounded-lg hover:bg-red-50 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-red-400 dark:border-red-800 dark:hover:bg-red-900/30";
const DANGER_SOLID_CLASS: &str = "text-white bg-red-600 hover:bg-red-700 focus:ring-4 focus:outline-none focus:ring-red-300 font-medium rounded-lg text-sm px-5 py-2.5 text-center disabled:opacity-70 disabled:cursor-not-allowed dark:bg-red-600 dark:hover:bg-red-700 dark:focus:ring-red-900";
const CANCEL_BUTTON_CLASS: &str = "px-5 py-2.5 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 focus:ring-4 focus:ring-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700 dark:focus:ring-gray-700";

const CHIP_GRAY: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-gray-100 text-gray-800 dark:bg-gray-700 dark:text-gray-300";
const CHIP_RED: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-red-100 text-red-800 dark:bg-red-900/40 dark:text-red-300";
const CHIP_AMBER: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-amber-100 text-amber-800 dark:bg-amber-900/40 dark:text-amber-300";
const CHIP_GREEN: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-green-100 text-green-800 dark:bg-green-900/40 dark:text-green-300";
const CHIP_BLUE: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-blue-100 text-blue-800 dark:bg-blue-900/40 dark:text-blue-300";
const CHIP_PURPLE: &str = "px-2 py-0.5 text-xs font-medium rounded-full bg-purple-100 text-purple-800 dark:bg-purple-900/40 dark:text-purple-300";

#[derive(Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Overview,
    Communications,
    Outcome,
    History,
}

impl DetailTab {
    const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Communications,
        DetailTab::Outcome,
        DetailTab::History,
    ];

    fn label(self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Communications => "Communications",
            DetailTab::Outcome => "Outcome & redress",
            DetailTab::History => "History",
        }
    }
}

/// Workflow dialogs opened from the header or a tab.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Dialog {
    Communication,
    Outcome,
    Redress,
    Close { non_reportable: bool },
    Escalate,
    Reopen,
    Delete,
}

/// One-click transitions that need no form.
#[derive(Clone, Copy, PartialEq, Eq)]
enum QuickAction {
    Acknowledge,
    StartInvestigation,
    IssueFinalResponse,
}

async fn run_quick_action(id: &str, action: QuickAction) -> Result<ComplaintOut, AppError> {
    match action {
        QuickAction::Acknowledge => client::acknowledge(id).await,
        QuickAction::StartInvestigation => client::start_investigation(id).await,
        QuickAction::IssueFinalResponse => client::issue_final_response(id).await,
    }
}

/// Current time in the `datetime-local` input format.
fn now_datetime_value() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(16).collect()
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn ComplaintDetailPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <DetailContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn DetailContent() -> impl IntoView {
    let params = use_params_map();
    let id = Signal::derive(move || params.get().get("id").unwrap_or_default());

    let auth = use_auth();
    let session = auth.session;
    let role = Signal::derive(move || session.get().and_then(|current| current.role_parsed()));

    let (refresh, set_refresh) = signal(0u32);
    let (active_tab, set_active_tab) = signal(DetailTab::Overview);
    let (dialog, set_dialog) = signal(None::<Dialog>);
    let (action_error, set_action_error) = signal(None::<String>);

    let complaint = LocalResource::new(move || {
        let id = id.get();
        refresh.track();
        async move { client::get_complaint(&id).await }
    });
    let events = LocalResource::new(move || {
        let id = id.get();
        refresh.track();
        async move { client::list_events(&id).await }
    });
    // Only admins may list users; everyone else gets a degraded assign card.
    let users = LocalResource::new(move || async move { users_client::list_users().await });

    let quick = Action::new_local(move |action: &QuickAction| {
        let id = id.get_untracked();
        let action = *action;
        async move { run_quick_action(&id, action).await }
    });
    let quick_pending = quick.pending();
    Effect::new(move |_| {
        if let Some(result) = quick.value().get() {
            match result {
                Ok(_) => {
                    set_action_error.set(None);
                    set_refresh.update(|count| *count += 1);
                }
                Err(error) => set_action_error.set(Some(error.to_string())),
            }
        }
    });

    let on_saved = Callback::new(move |_| {
        set_dialog.set(None);
        set_action_error.set(None);
        set_refresh.update(|count| *count += 1);
    });
    let on_close_dialog = Callback::new(move |_| set_dialog.set(None));

    view! {
        {move || match complaint.get() {
            None => view! { <Spinner label="Loading complaint" /> }.into_any(),
            Some(Err(AppError::Http { status: 404, .. })) => {
                view! { <NotFoundContent /> }.into_any()
            }
            Some(Err(error)) => {
                view! {
                    <div class="space-y-4">
                        <Alert kind=AlertKind::Error message=error.to_string() />
                        <Button on_click=move |_| set_refresh.update(|count| *count += 1)>
                            "Retry"
                        </Button>
                    </div>
                }
                    .into_any()
            }
            Some(Ok(case)) => {
                let role_now = role.get();
                let can_work = role_now.is_some_and(workflow::role_can_work_cases);
                let can_delete_case = role_now.is_some_and(workflow::role_can_delete);

                let show_ack = can_work && workflow::can_acknowledge(&case);
                let show_invest = can_work && workflow::can_start_investigation(&case);
                let show_outcome = can_work && workflow::can_record_outcome(&case);
                let outcome_label = if case.outcome.is_some() {
                    "Update outcome"
                } else {
                    "Record outcome"
                };
                let show_final = can_work && workflow::can_issue_final_response(&case);
                let show_escalate = can_work && workflow::can_escalate(&case);
                let show_close = can_work && workflow::can_close(&case);
                let show_close_nr = can_work && workflow::can_close_non_reportable(&case);
                let show_reopen = can_work && workflow::can_reopen(&case);

                let reference = case.reference.clone();
                let complainant_name = case.complainant.full_name.clone();
                let received = format_date(&case.received_at);
                let status = case.status;
                let escalated = case.is_escalated;
                let vulnerable = case.vulnerability_flag;
                let non_reportable = case.non_reportable;
                let fos = case.fos_complaint;

                let tab_view = {
                    let case = case.clone();
                    move || match active_tab.get() {
                        DetailTab::Overview => view! {
                            <OverviewTab case=case.clone() role=role users=users on_saved=on_saved />
                        }
                            .into_any(),
                        DetailTab::Communications => view! {
                            <CommunicationsTab
                                communications=case.communications.clone()
                                can_add=can_work
                                on_add=Callback::new(move |_| {
                                    set_dialog.set(Some(Dialog::Communication))
                                })
                            />
                        }
                            .into_any(),
                        DetailTab::Outcome => view! {
                            <OutcomeTab
                                case=case.clone()
                                can_work=can_work
                                on_record=Callback::new(move |_| {
                                    set_dialog.set(Some(Dialog::Outcome))
                                })
                                on_add_redress=Callback::new(move |_| {
                                    set_dialog.set(Some(Dialog::Redress))
                                })
                                on_saved=on_saved
                            />
                        }
                            .into_any(),
                        DetailTab::History => view! { <HistoryTab events=events /> }.into_any(),
                    }
                };

                let dialog_view = {
                    let case = case.clone();
                    move || {
                        dialog.get().map(|open| {
                            match open {
                                Dialog::Communication => view! {
                                    <CommunicationModal
                                        complaint_id=case.id.clone()
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Outcome => view! {
                                    <OutcomeModal
                                        complaint_id=case.id.clone()
                                        existing=case.outcome.clone()
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Redress => view! {
                                    <RedressModal
                                        complaint_id=case.id.clone()
                                        outcome_id=case.outcome.as_ref().map(|outcome| outcome.id.clone())
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Close { non_reportable } => view! {
                                    <CloseModal
                                        complaint_id=case.id.clone()
                                        non_reportable=non_reportable
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Escalate => view! {
                                    <EscalateModal
                                        complaint_id=case.id.clone()
                                        users=users
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Reopen => view! {
                                    <ReopenModal
                                        complaint_id=case.id.clone()
                                        on_close=on_close_dialog
                                        on_saved=on_saved
                                    />
                                }
                                    .into_any(),
                                Dialog::Delete => view! {
                                    <DeleteModal
                                        complaint_id=case.id.clone()
                                        reference=case.reference.clone()
                                        on_close=on_close_dialog
                                    />
                                }
                                    .into_any(),
                            }
                        })
                    }
                };

                view! {
                    <div class="space-y-6">
                        <div class="flex flex-wrap items-start justify-between gap-4">
                            <div>
                                <A
                                    href="/complaints"
                                    {..}
                                    class="text-sm text-blue-700 hover:underline dark:text-blue-400"
                                >
                                    "Back to complaints"
                                </A>
                                <div class="flex flex-wrap items-center gap-2 mt-1">
                                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                        {reference}
                                    </h1>
                                    <StatusBadge status=status />
                                    {escalated
                                        .then(|| view! { <span class=CHIP_PURPLE>"Escalated"</span> })}
                                    {vulnerable
                                        .then(|| view! { <span class=CHIP_AMBER>"Vulnerable"</span> })}
                                    {non_reportable
                                        .then(|| view! { <span class=CHIP_GRAY>"Non-reportable"</span> })}
                                    {fos.then(|| view! { <span class=CHIP_PURPLE>"FOS"</span> })}
                                </div>
                                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                    {complainant_name} " • Received " {received}
                                </p>
                            </div>
                            <div class="flex flex-wrap items-center gap-2">
                                {show_ack
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            disabled=move || quick_pending.get()
                                            on:click=move |_| {
                                                quick.dispatch(QuickAction::Acknowledge);
                                            }
                                        >
                                            "Acknowledge"
                                        </button>
                                    })}
                                {show_invest
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            disabled=move || quick_pending.get()
                                            on:click=move |_| {
                                                quick.dispatch(QuickAction::StartInvestigation);
                                            }
                                        >
                                            "Start investigation"
                                        </button>
                                    })}
                                {show_outcome
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            on:click=move |_| set_dialog.set(Some(Dialog::Outcome))
                                        >
                                            {outcome_label}
                                        </button>
                                    })}
                                {show_final
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            disabled=move || quick_pending.get()
                                            on:click=move |_| {
                                                quick.dispatch(QuickAction::IssueFinalResponse);
                                            }
                                        >
                                            "Issue final response"
                                        </button>
                                    })}
                                {show_escalate
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            on:click=move |_| set_dialog.set(Some(Dialog::Escalate))
                                        >
                                            "Escalate"
                                        </button>
                                    })}
                                {show_close
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            on:click=move |_| {
                                                set_dialog.set(Some(Dialog::Close { non_reportable: false }))
                                            }
                                        >
                                            "Close"
                                        </button>
                                    })}
                                {show_close_nr
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            on:click=move |_| {
                                                set_dialog.set(Some(Dialog::Close { non_reportable: true }))
                                            }
                                        >
                                            "Close non-reportable"
                                        </button>
                                    })}
                                {show_reopen
                                    .then(|| view! {
                                        <button
                                            class=ACTION_CLASS
                                            on:click=move |_| set_dialog.set(Some(Dialog::Reopen))
                                        >
                                            "Reopen"
                                        </button>
                                    })}
                                {can_delete_case
                                    .then(|| view! {
                                        <button
                                            class=DANGER_ACTION_CLASS
                                            on:click=move |_| set_dialog.set(Some(Dialog::Delete))
                                        >
                                            "Delete"
                                        </button>
                                    })}
                            </div>
                        </div>
                        {move || {
                            action_error
                                .get()
                                .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                        }}
                        <div class="border-b border-gray-200 dark:border-gray-700">
                            <nav class="flex flex-wrap gap-2 -mb-px">
                                {DetailTab::ALL
                                    .into_iter()
                                    .map(|tab| {
                                        view! {
                                            <button
                                                class=move || {
                                                    if active_tab.get() == tab {
                                                        ACTIVE_TAB_CLASS
                                                    } else {
                                                        TAB_CLASS
                                                    }
                                                }
                                                on:click=move |_| set_active_tab.set(tab)
                                            >
                                                {tab.label()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </nav>
                        </div>
                        {tab_view}
                        {dialog_view}
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn OverviewTab(
    case: ComplaintOut,
    role: Signal<Option<UserRole>>,
    users: LocalResource<Result<Vec<UserOut>, AppError>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let description = if case.description.trim().is_empty() {
        "No description".to_string()
    } else {
        case.description.clone()
    };
    let vulnerability_notes = case
        .vulnerability_notes
        .clone()
        .filter(|notes| !notes.trim().is_empty())
        .unwrap_or_else(|| "No notes recorded.".to_string());

    let ack_row = match case.acknowledged_at.clone() {
        Some(timestamp) => (format!("Done {}", format_date(&timestamp)), false, true),
        None => (
            format!("Due {}", format_date(&case.ack_due_at)),
            case.ack_breached,
            false,
        ),
    };
    let final_row = match case.final_response_at.clone() {
        Some(timestamp) => (format!("Done {}", format_date(&timestamp)), false, true),
        None => (
            format!("Due {}", format_date(&case.final_due_at)),
            case.final_breached,
            false,
        ),
    };

    view! {
        <div class="grid gap-6 lg:grid-cols-3">
            <div class="space-y-6 lg:col-span-2">
                <section class=CARD_CLASS>
                    <h3 class="mb-3 text-sm font-semibold text-gray-900 dark:text-white">
                        "Complaint details"
                    </h3>
                    <p class="mb-4 text-sm text-gray-700 dark:text-gray-300">{description}</p>
                    <dl class="grid grid-cols-2 gap-4">
                        <DetailField label="Category" value=case.category.clone() />
                        <DetailField label="Reason" value=or_na(case.reason.clone()) />
                        <DetailField label="Source" value=case.source.clone() />
                        <DetailField
                            label="Received"
                            value=format_date_time(&case.received_at)
                        />
                    </dl>
                    {case.vulnerability_flag
                        .then(|| view! {
                            <div class="mt-4 rounded-lg border border-amber-200 bg-amber-50 p-3 text-sm text-amber-800 dark:border-amber-800 dark:bg-amber-900/20 dark:text-amber-300">
                                <span class="font-medium">"Vulnerable customer. "</span>
                                {vulnerability_notes}
                            </div>
                        })}
                    {(case.fca_complaint || case.fos_complaint)
                        .then(|| {
                            let fca = case.fca_complaint.then(|| {
                                view! {
                                    <p>
                                        <span class="font-medium">"FCA reportable."</span>
                                    </p>
                                }
                            });
                            let fos = case.fos_complaint.then(|| {
                                let referred = case
                                    .fos_referred_at
                                    .as_deref()
                                    .map(format_date)
                                    .map(|date| format!(", referred {date}"))
                                    .unwrap_or_default();
                                view! {
                                    <p>
                                        <span class="font-medium">"FOS. "</span>
                                        {or_na(case.fos_reference.clone())}
                                        {referred}
                                    </p>
                                }
                            });
                            view! {
                                <div class="mt-4 space-y-1 rounded-lg border border-purple-200 bg-purple-50 p-3 text-sm text-purple-800 dark:border-purple-800 dark:bg-purple-900/20 dark:text-purple-300">
                                    {fca}
                                    {fos}
                                </div>
                            }
                        })}
                </section>
                <section class=CARD_CLASS>
                    <h3 class="mb-3 text-sm font-semibold text-gray-900 dark:text-white">
                        "Complainant"
                    </h3>
                    <dl class="grid grid-cols-2 gap-4">
                        <DetailField label="Name" value=case.complainant.full_name.clone() />
                        <DetailField
                            label="Preferred contact"
                            value=or_na(case.complainant.preferred_contact_method.clone())
                        />
                        <DetailField label="Email" value=or_na(case.complainant.email.clone()) />
                        <DetailField label="Phone" value=or_na(case.complainant.phone.clone()) />
                    </dl>
                </section>
                <section class=CARD_CLASS>
                    <h3 class="mb-3 text-sm font-semibold text-gray-900 dark:text-white">
                        "Policy & product"
                    </h3>
                    <dl class="grid grid-cols-2 gap-4">
                        <DetailField label="Product" value=or_na(case.product.clone()) />
                        <DetailField label="Scheme" value=or_na(case.scheme.clone()) />
                        <DetailField
                            label="Policy number"
                            value=or_na(case.policy_number.clone())
                        />
                        <DetailField label="Insurer" value=or_na(case.insurer.clone()) />
                        <DetailField label="Broker" value=or_na(case.broker.clone()) />
                    </dl>
                </section>
            </div>
            <div class="space-y-6">
                <section class=CARD_CLASS>
                    <h3 class="mb-3 text-sm font-semibold text-gray-900 dark:text-white">
                        "Timeline & SLA"
                    </h3>
                    <div class="space-y-2">
                        <TimelineRow
                            label="Received"
                            value=format_date_time(&case.received_at)
                        />
                        <TimelineRow
                            label="Acknowledgement"
                            value=ack_row.0
                            breached=ack_row.1
                            done=ack_row.2
                        />
                        <TimelineRow
                            label="Final response"
                            value=final_row.0
                            breached=final_row.1
                            done=final_row.2
                        />
                        {case.closed_at
                            .clone()
                            .map(|timestamp| view! {
                                <TimelineRow
                                    label="Closed"
                                    value=format_date_time(&timestamp)
                                    done=true
                                />
                            })}
                    </div>
                </section>
                <AssignCard case=case.clone() role=role users=users on_saved=on_saved />
            </div>
        </div>
    }
}

#[component]
fn DetailField(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-xs font-medium uppercase text-gray-500 dark:text-gray-400">{label}</dt>
            <dd class="mt-0.5 text-sm text-gray-900 dark:text-white">{value}</dd>
        </div>
    }
}

#[component]
fn TimelineRow(
    label: &'static str,
    value: String,
    #[prop(optional)] breached: bool,
    #[prop(optional)] done: bool,
) -> impl IntoView {
    let value_class = if done {
        "text-sm font-medium text-green-700 dark:text-green-400"
    } else {
        "text-sm font-medium text-gray-900 dark:text-white"
    };

    view! {
        <div class="flex items-center justify-between gap-2">
            <span class="text-sm text-gray-500 dark:text-gray-400">{label}</span>
            <span class="flex items-center gap-2">
                <span class=value_class>{value}</span>
                {breached.then(|| view! { <span class=CHIP_RED>"Breached"</span> })}
            </span>
        </div>
    }
}

/// Assignment sidebar card. Admins, reviewers, and managers pick any handler;
/// handlers can pick up an unassigned case. The handler list itself is only
/// served to admins, so other roles may see it unavailable.
#[component]
fn AssignCard(
    case: ComplaintOut,
    role: Signal<Option<UserRole>>,
    users: LocalResource<Result<Vec<UserOut>, AppError>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let (error, set_error) = signal(None::<String>);
    let (selected, set_selected) = signal(case.assigned_handler_id.clone().unwrap_or_default());

    let free_assign = role
        .get_untracked()
        .is_some_and(workflow::role_can_assign_freely);
    let self_assign = role
        .get_untracked()
        .is_some_and(|current| workflow::can_self_assign(current, &case));
    let handler_name = case
        .assigned_handler_name
        .clone()
        .unwrap_or_else(|| "Unassigned".to_string());

    let complaint_id = case.id.clone();
    let assign = Action::new_local(move |handler_id: &String| {
        let id = complaint_id.clone();
        let handler_id = handler_id.clone();
        async move { client::assign(&id, &handler_id).await }
    });
    let pending = assign.pending();
    Effect::new(move |_| {
        if let Some(result) = assign.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    view! {
        <section class=CARD_CLASS>
            <h3 class="mb-3 text-sm font-semibold text-gray-900 dark:text-white">"Assignment"</h3>
            <p class="text-sm text-gray-900 dark:text-white">{handler_name}</p>
            {move || {
                error.get().map(|message| view! {
                    <div class="mt-3">
                        <Alert kind=AlertKind::Error message=message />
                    </div>
                })
            }}
            {free_assign
                .then(|| view! {
                    <div class="mt-3 space-y-2">
                        {move || match users.get() {
                            None => view! {
                                <p class="text-xs text-gray-500 dark:text-gray-400">
                                    "Loading handlers..."
                                </p>
                            }
                                .into_any(),
                            Some(Err(_)) => view! {
                                <p class="text-xs text-gray-500 dark:text-gray-400">
                                    "The handler list requires admin access."
                                </p>
                            }
                                .into_any(),
                            Some(Ok(list)) => {
                                let options = list
                                    .into_iter()
                                    .filter(|user| {
                                        user.is_active && workflow::role_can_work_cases(user.role)
                                    })
                                    .map(|user| {
                                        view! {
                                            <option value=user.id.clone()>{user.full_name.clone()}</option>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <div class="space-y-2">
                                        <select
                                            class=FIELD_CLASS
                                            prop:value=move || selected.get()
                                            on:change=move |ev| set_selected.set(event_target_value(&ev))
                                        >
                                            <option value="">"Select handler"</option>
                                            {options}
                                        </select>
                                        <button
                                            class=ACTION_CLASS
                                            disabled=move || {
                                                pending.get() || selected.get().is_empty()
                                            }
                                            on:click=move |_| {
                                                let handler = selected.get_untracked();
                                                if !handler.is_empty() {
                                                    assign.dispatch(handler);
                                                }
                                            }
                                        >
                                            {move || if pending.get() { "Assigning..." } else { "Assign" }}
                                        </button>
                                    </div>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                })}
            {self_assign
                .then(|| view! {
                    <button
                        class=format!("mt-3 {ACTION_CLASS}")
                        disabled=move || pending.get()
                        on:click=move |_| {
                            if let Some(current) = session.get_untracked() {
                                assign.dispatch(current.user_id);
                            }
                        }
                    >
                        {move || if pending.get() { "Assigning..." } else { "Assign to me" }}
                    </button>
                })}
        </section>
    }
}

#[component]
fn CommunicationsTab(
    communications: Vec<CommunicationOut>,
    can_add: bool,
    #[prop(into)] on_add: Callback<()>,
) -> impl IntoView {
    let mut items = communications;
    items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                    "Communications"
                </h2>
                {can_add
                    .then(|| view! {
                        <Button on_click=move |_| on_add.run(())>"Add communication"</Button>
                    })}
            </div>
            {if items.is_empty() {
                view! {
                    <div class="py-12 text-center">
                        <p class="text-gray-500 dark:text-gray-400">"No communications yet"</p>
                        <p class="mt-1 text-sm text-gray-400 dark:text-gray-500">
                            "Use \"Add communication\" to log the first contact on this case."
                        </p>
                    </div>
                }
                    .into_any()
            } else {
                view! {
                    <ul class="space-y-3">
                        {items
                            .into_iter()
                            .map(|communication| {
                                view! { <CommunicationCard communication=communication /> }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn CommunicationCard(communication: CommunicationOut) -> impl IntoView {
    let direction_class = match communication.direction {
        CommunicationDirection::Inbound => CHIP_BLUE,
        CommunicationDirection::Outbound => CHIP_GREEN,
    };
    let attachments = (!communication.attachments.is_empty()).then(|| {
        view! {
            <div class="mt-2 flex flex-wrap gap-3">
                {communication
                    .attachments
                    .iter()
                    .map(|attachment| {
                        view! {
                            <a
                                href=attachment.url.clone()
                                target="_blank"
                                rel="noreferrer"
                                class="inline-flex items-center gap-1 text-xs text-blue-700 hover:underline dark:text-blue-400"
                            >
                                <span class="material-symbols-outlined text-sm">"attach_file"</span>
                                {attachment.file_name.clone()}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <li class=CARD_CLASS>
            <div class="flex flex-wrap items-center justify-between gap-2">
                <div class="flex flex-wrap items-center gap-2">
                    <span class=CHIP_GRAY>{communication.channel.label()}</span>
                    <span class=direction_class>{communication.direction.label()}</span>
                    {communication
                        .is_final_response
                        .then(|| view! { <span class=CHIP_AMBER>"Final response"</span> })}
                </div>
                <span class="text-xs text-gray-500 dark:text-gray-400">
                    {format_date_time(&communication.occurred_at)}
                </span>
            </div>
            <p class="mt-2 text-sm text-gray-700 dark:text-gray-300">{communication.summary}</p>
            {attachments}
        </li>
    }
}

#[component]
fn OutcomeTab(
    case: ComplaintOut,
    can_work: bool,
    #[prop(into)] on_record: Callback<()>,
    #[prop(into)] on_add_redress: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let show_record = can_work && workflow::can_record_outcome(&case);
    let outcome_label = if case.outcome.is_some() {
        "Update outcome"
    } else {
        "Record outcome"
    };
    let complaint_id = case.id.clone();

    let outcome_view = match case.outcome.clone() {
        Some(outcome) => {
            let notes = outcome
                .notes
                .filter(|text| !text.trim().is_empty())
                .map(|text| view! { <p class="mt-2 text-sm text-gray-700 dark:text-gray-300">{text}</p> });
            view! {
                <div>
                    <p class="text-lg font-semibold text-gray-900 dark:text-white">
                        {outcome.outcome.label()}
                    </p>
                    <p class="text-xs text-gray-500 dark:text-gray-400">
                        "Recorded " {format_date_time(&outcome.recorded_at)}
                    </p>
                    {notes}
                </div>
            }
                .into_any()
        }
        None => view! {
            <p class="text-sm text-gray-500 dark:text-gray-400">"No outcome recorded yet."</p>
        }
            .into_any(),
    };

    view! {
        <div class="space-y-6">
            <section class=CARD_CLASS>
                <div class="mb-3 flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Outcome"</h2>
                    {show_record
                        .then(|| view! {
                            <Button on_click=move |_| on_record.run(())>{outcome_label}</Button>
                        })}
                </div>
                {outcome_view}
            </section>
            <section class=CARD_CLASS>
                <div class="mb-3 flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                        "Redress payments"
                    </h2>
                    {can_work
                        .then(|| view! {
                            <Button on_click=move |_| on_add_redress.run(())>"Add redress"</Button>
                        })}
                </div>
                {if case.redress_payments.is_empty() {
                    view! {
                        <p class="py-6 text-center text-sm text-gray-500 dark:text-gray-400">
                            "No redress payments have been recorded for this complaint."
                        </p>
                    }
                        .into_any()
                } else {
                    view! {
                        <ul class="space-y-3">
                            {case
                                .redress_payments
                                .iter()
                                .cloned()
                                .map(|redress| {
                                    view! {
                                        <RedressRow
                                            complaint_id=complaint_id.clone()
                                            redress=redress
                                            can_edit=can_work
                                            on_saved=on_saved
                                        />
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }}
            </section>
        </div>
    }
}

/// One redress payment with inline status controls. Approval is required
/// before the payment can leave pending.
#[component]
fn RedressRow(
    complaint_id: String,
    redress: RedressOut,
    can_edit: bool,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let (error, set_error) = signal(None::<String>);
    let (status, set_status) = signal(redress.status);
    let (approved, set_approved) = signal(redress.approved);

    let redress_id = redress.id.clone();
    let update = Action::new_local(move |request: &RedressUpdate| {
        let id = complaint_id.clone();
        let redress_id = redress_id.clone();
        let request = request.clone();
        async move { client::update_redress(&id, &redress_id, &request).await }
    });
    let pending = update.pending();
    Effect::new(move |_| {
        if let Some(result) = update.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let status_chip = match redress.status {
        RedressPaymentStatus::Paid => CHIP_GREEN,
        RedressPaymentStatus::Authorised => CHIP_AMBER,
        RedressPaymentStatus::Pending => CHIP_GRAY,
    };
    let action_chip = match redress.action_status {
        ActionStatus::Completed => CHIP_GREEN,
        ActionStatus::InProgress => CHIP_BLUE,
        ActionStatus::NotStarted => CHIP_GRAY,
    };
    let amount = redress
        .amount
        .map(|value| format!("£{value:.2}"))
        .unwrap_or_else(|| "Non-monetary".to_string());
    let rationale = redress
        .rationale
        .clone()
        .filter(|text| !text.trim().is_empty())
        .map(|text| view! {
            <p class="mt-1 text-sm text-gray-700 dark:text-gray-300">
                <span class="font-medium">"Rationale: "</span>
                {text}
            </p>
        });
    let action_description = redress
        .action_description
        .clone()
        .filter(|text| !text.trim().is_empty())
        .map(|text| view! {
            <p class="mt-1 text-sm text-gray-700 dark:text-gray-300">
                <span class="font-medium">"Action: "</span>
                {text}
            </p>
        });
    let notes = redress
        .notes
        .clone()
        .filter(|text| !text.trim().is_empty())
        .map(|text| view! {
            <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">{text}</p>
        });

    view! {
        <li class=CARD_CLASS>
            <div class="flex flex-wrap items-center justify-between gap-2">
                <div class="flex flex-wrap items-center gap-2">
                    <span class="text-sm font-semibold text-gray-900 dark:text-white">
                        {redress.payment_type.label()}
                    </span>
                    <span class="text-sm text-gray-700 dark:text-gray-300">{amount}</span>
                </div>
                <div class="flex flex-wrap items-center gap-2">
                    <span class=status_chip>{redress.status.label()}</span>
                    <span class=action_chip>{redress.action_status.label()}</span>
                    {redress
                        .approved
                        .then(|| view! { <span class=CHIP_GREEN>"Approved"</span> })}
                </div>
            </div>
            {rationale}
            {action_description}
            {notes}
            {move || {
                error.get().map(|message| view! {
                    <div class="mt-3">
                        <Alert kind=AlertKind::Error message=message />
                    </div>
                })
            }}
            {can_edit
                .then(|| view! {
                    <div class="mt-3 flex flex-wrap items-center gap-3 border-t border-gray-100 pt-3 dark:border-gray-700">
                        <select
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 p-2 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            prop:value=move || status.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = RedressPaymentStatus::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_status.set(choice);
                                }
                            }
                        >
                            {RedressPaymentStatus::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white">
                            <input
                                type="checkbox"
                                class=CHECKBOX_CLASS
                                prop:checked=move || approved.get()
                                on:change=move |ev| set_approved.set(event_target_checked(&ev))
                            />
                            "Approved"
                        </label>
                        <button
                            class=ACTION_CLASS
                            disabled=move || pending.get()
                            on:click=move |_| {
                                update
                                    .dispatch(RedressUpdate {
                                        status: Some(status.get_untracked()),
                                        approved: Some(approved.get_untracked()),
                                        ..Default::default()
                                    });
                            }
                        >
                            {move || if pending.get() { "Updating..." } else { "Update" }}
                        </button>
                    </div>
                })}
        </li>
    }
}

#[component]
fn HistoryTab(events: LocalResource<Result<Vec<EventOut>, AppError>>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"History"</h2>
            {move || match events.get() {
                None => view! { <Spinner label="Loading history" /> }.into_any(),
                Some(Err(error)) => {
                    view! { <Alert kind=AlertKind::Error message=error.to_string() /> }.into_any()
                }
                Some(Ok(items)) if items.is_empty() => view! {
                    <p class="py-6 text-center text-sm text-gray-500 dark:text-gray-400">
                        "No history events recorded."
                    </p>
                }
                    .into_any(),
                Some(Ok(items)) => view! {
                    <ol class="space-y-3">
                        {items
                            .into_iter()
                            .map(|event| {
                                let author = event
                                    .created_by_name
                                    .map(|name| format!(" by {name}"))
                                    .unwrap_or_default();
                                let description = event
                                    .description
                                    .filter(|text| !text.trim().is_empty())
                                    .map(|text| view! {
                                        <p class="text-sm text-gray-700 dark:text-gray-300">
                                            {text}
                                        </p>
                                    });
                                view! {
                                    <li class=CARD_CLASS>
                                        <p class="text-sm font-medium text-gray-900 dark:text-white">
                                            {event_title(&event.event_type)}
                                        </p>
                                        {description}
                                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                                            {format_date_time(&event.created_at)}
                                            {author}
                                        </p>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ol>
                }
                    .into_any(),
            }}
        </div>
    }
}

fn event_title(event_type: &str) -> String {
    let spaced = event_type.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[component]
fn CommunicationModal(
    complaint_id: String,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let (channel, set_channel) = signal(CommunicationChannel::Phone);
    let (direction, set_direction) = signal(CommunicationDirection::Inbound);
    let (occurred_at, set_occurred_at) = signal(now_datetime_value());
    let (summary, set_summary) = signal(String::new());
    let (is_final, set_is_final) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let files_ref = NodeRef::<html::Input>::new();

    // Files are read from the input at dispatch time; JS handles never pass
    // through reactive state.
    let save = Action::new_local(move |note: &NewCommunication| {
        let id = complaint_id.clone();
        let note = note.clone();
        let files: Vec<File> = files_ref
            .get_untracked()
            .and_then(|input| input.files())
            .map(|list| (0..list.length()).filter_map(|index| list.get(index)).collect())
            .unwrap_or_default();
        async move { client::add_communication(&id, &note, &files).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let text = summary.get_untracked();
        if text.trim().is_empty() {
            set_error.set(Some("A summary is required.".to_string()));
            return;
        }
        save.dispatch(NewCommunication {
            channel: channel.get_untracked(),
            direction: direction.get_untracked(),
            summary: text.trim().to_string(),
            occurred_at: occurred_at.get_untracked(),
            is_final_response: is_final.get_untracked(),
        });
    };

    view! {
        <Modal title="Add communication" wide=true on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label class=LABEL_CLASS>"Channel"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || channel.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = CommunicationChannel::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_channel.set(choice);
                                }
                            }
                        >
                            {CommunicationChannel::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Direction"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || direction.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = CommunicationDirection::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_direction.set(choice);
                                }
                            }
                        >
                            {CommunicationDirection::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Occurred at"</label>
                    <input
                        type="datetime-local"
                        class=FIELD_CLASS
                        prop:value=move || occurred_at.get()
                        on:input=move |ev| set_occurred_at.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS>"Summary"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=4
                        placeholder="What was said or agreed"
                        prop:value=move || summary.get()
                        on:input=move |ev| set_summary.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Attachments"</label>
                    <input
                        type="file"
                        multiple
                        node_ref=files_ref
                        class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg cursor-pointer bg-gray-50 focus:outline-none dark:text-gray-400 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400"
                    />
                </div>
                <label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white">
                    <input
                        type="checkbox"
                        class=CHECKBOX_CLASS
                        prop:checked=move || is_final.get()
                        on:change=move |ev| set_is_final.set(event_target_checked(&ev))
                    />
                    "This is the final response"
                </label>
                <p class="text-xs text-gray-500 dark:text-gray-400">
                    "Marking the final response requires a recorded outcome."
                </p>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Saving..." } else { "Save communication" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn OutcomeModal(
    complaint_id: String,
    existing: Option<OutcomeOut>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let title = if existing.is_some() {
        "Update outcome"
    } else {
        "Record outcome"
    };
    let (outcome, set_outcome) = signal(
        existing
            .as_ref()
            .map(|current| current.outcome)
            .unwrap_or(OutcomeType::Upheld),
    );
    let (notes, set_notes) = signal(
        existing
            .as_ref()
            .and_then(|current| current.notes.clone())
            .unwrap_or_default(),
    );
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(move |request: &OutcomeCreate| {
        let id = complaint_id.clone();
        let request = request.clone();
        async move { client::record_outcome(&id, &request).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        save.dispatch(OutcomeCreate {
            outcome: outcome.get_untracked(),
            notes: optional_text(&notes.get_untracked()),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div>
                    <label class=LABEL_CLASS>"Outcome"</label>
                    <select
                        class=FIELD_CLASS
                        prop:value=move || outcome.get().as_str()
                        on:change=move |ev| {
                            if let Some(choice) = OutcomeType::from_wire(&event_target_value(&ev)) {
                                set_outcome.set(choice);
                            }
                        }
                    >
                        {OutcomeType::ALL
                            .into_iter()
                            .map(|choice| {
                                view! { <option value=choice.as_str()>{choice.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Notes"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=4
                        placeholder="How the decision was reached"
                        prop:value=move || notes.get()
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Saving..." } else { "Save outcome" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn RedressModal(
    complaint_id: String,
    outcome_id: Option<String>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let (payment_type, set_payment_type) = signal(RedressType::FinancialLoss);
    let (amount, set_amount) = signal(String::new());
    let (status, set_status) = signal(RedressPaymentStatus::Pending);
    let (action_status, set_action_status) = signal(ActionStatus::NotStarted);
    let (rationale, set_rationale) = signal(String::new());
    let (action_description, set_action_description) = signal(String::new());
    let (notes, set_notes) = signal(String::new());
    let (approved, set_approved) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(move |request: &RedressCreate| {
        let id = complaint_id.clone();
        let request = request.clone();
        async move { client::add_redress(&id, &request).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let amount_text = amount.get_untracked();
        let trimmed = amount_text.trim();
        let parsed_amount = if trimmed.is_empty() {
            None
        } else {
            match trimmed.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    set_error.set(Some("Amount must be a number.".to_string()));
                    return;
                }
            }
        };
        let request = RedressCreate {
            amount: parsed_amount,
            payment_type: payment_type.get_untracked(),
            status: status.get_untracked(),
            notes: optional_text(&notes.get_untracked()),
            outcome_id: outcome_id.clone(),
            rationale: optional_text(&rationale.get_untracked()),
            action_status: action_status.get_untracked(),
            action_description: optional_text(&action_description.get_untracked()),
            approved: approved.get_untracked(),
        };
        if let Err(message) = workflow::validate_redress(&request) {
            set_error.set(Some(message));
            return;
        }
        save.dispatch(request);
    };

    view! {
        <Modal title="Add redress" wide=true on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label class=LABEL_CLASS>"Type"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || payment_type.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = RedressType::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_payment_type.set(choice);
                                }
                            }
                        >
                            {RedressType::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Amount (£)"</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            class=FIELD_CLASS
                            prop:value=move || amount.get()
                            on:input=move |ev| set_amount.set(event_target_value(&ev))
                        />
                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                            "Required for monetary types; leave empty for apologies and remedial actions."
                        </p>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Payment status"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || status.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = RedressPaymentStatus::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_status.set(choice);
                                }
                            }
                        >
                            {RedressPaymentStatus::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Action status"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || action_status.get().as_str()
                            on:change=move |ev| {
                                if let Some(choice) = ActionStatus::from_wire(
                                    &event_target_value(&ev),
                                ) {
                                    set_action_status.set(choice);
                                }
                            }
                        >
                            {ActionStatus::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <option value=choice.as_str()>{choice.label()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Rationale"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=2
                        placeholder="Why this redress is due"
                        prop:value=move || rationale.get()
                        on:input=move |ev| set_rationale.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Action description"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=2
                        placeholder="What will be done, for non-monetary redress"
                        prop:value=move || action_description.get()
                        on:input=move |ev| set_action_description.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div>
                    <label class=LABEL_CLASS>"Notes"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=2
                        prop:value=move || notes.get()
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white">
                    <input
                        type="checkbox"
                        class=CHECKBOX_CLASS
                        prop:checked=move || approved.get()
                        on:change=move |ev| set_approved.set(event_target_checked(&ev))
                    />
                    "Approved"
                </label>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Saving..." } else { "Add redress" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn CloseModal(
    complaint_id: String,
    non_reportable: bool,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let title = if non_reportable {
        "Close as non-reportable"
    } else {
        "Close complaint"
    };
    let note = if non_reportable {
        "Non-reportable closure skips the outcome and final response requirements and excludes the case from regulatory reporting."
    } else {
        "The closure date is recorded as now."
    };
    let (comment, set_comment) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(move |comment: &Option<String>| {
        let id = complaint_id.clone();
        let request = CloseRequest {
            closed_at: None,
            comment: comment.clone(),
        };
        async move {
            if non_reportable {
                client::close_non_reportable(&id, &request).await
            } else {
                client::close(&id, &request).await
            }
        }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        save.dispatch(optional_text(&comment.get_untracked()));
    };

    view! {
        <Modal title=title on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-sm text-gray-700 dark:text-gray-300">{note}</p>
                <div>
                    <label class=LABEL_CLASS>"Comment (optional)"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=3
                        prop:value=move || comment.get()
                        on:input=move |ev| set_comment.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Closing..." } else { title }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn EscalateModal(
    complaint_id: String,
    users: LocalResource<Result<Vec<UserOut>, AppError>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let (manager_id, set_manager_id) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(move |manager_id: &String| {
        let id = complaint_id.clone();
        let request = EscalateRequest {
            manager_id: manager_id.clone(),
        };
        async move { client::escalate(&id, &request).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let manager = manager_id.get_untracked();
        if manager.is_empty() {
            set_error.set(Some("Choose a manager.".to_string()));
            return;
        }
        save.dispatch(manager);
    };

    view! {
        <Modal title="Escalate complaint" on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-sm text-gray-700 dark:text-gray-300">
                    "Escalation reassigns the case to the chosen complaints manager."
                </p>
                <div>
                    <label class=LABEL_CLASS>"Manager"</label>
                    {move || match users.get() {
                        None => view! {
                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                "Loading managers..."
                            </p>
                        }
                            .into_any(),
                        Some(Err(_)) => view! {
                            <Alert
                                kind=AlertKind::Warning
                                message="The manager list requires admin access.".to_string()
                            />
                        }
                            .into_any(),
                        Some(Ok(list)) => {
                            let options = list
                                .into_iter()
                                .filter(|user| {
                                    user.is_active && user.role == UserRole::ComplaintsManager
                                })
                                .map(|user| {
                                    view! {
                                        <option value=user.id.clone()>{user.full_name.clone()}</option>
                                    }
                                })
                                .collect_view();
                            view! {
                                <select
                                    class=FIELD_CLASS
                                    prop:value=move || manager_id.get()
                                    on:change=move |ev| set_manager_id.set(event_target_value(&ev))
                                >
                                    <option value="">"Select manager"</option>
                                    {options}
                                </select>
                            }
                                .into_any()
                        }
                    }}
                </div>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button
                        button_type="submit"
                        disabled=Signal::derive(move || {
                            pending.get() || manager_id.get().is_empty()
                        })
                    >
                        {move || if pending.get() { "Escalating..." } else { "Escalate" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn ReopenModal(
    complaint_id: String,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let (reason, set_reason) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let save = Action::new_local(move |reason: &Option<String>| {
        let id = complaint_id.clone();
        let request = ReopenRequest {
            reason: reason.clone(),
            reopened_at: None,
        };
        async move { client::reopen(&id, &request).await }
    });
    let pending = save.pending();
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(_) => on_saved.run(()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        save.dispatch(optional_text(&reason.get_untracked()));
    };

    view! {
        <Modal title="Reopen complaint" on_close=on_close>
            <form on:submit=on_submit class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-sm text-gray-700 dark:text-gray-300">
                    "Reopening returns the case to the active queue and clears its closure."
                </p>
                <div>
                    <label class=LABEL_CLASS>"Reason (optional)"</label>
                    <textarea
                        class=FIELD_CLASS
                        rows=3
                        prop:value=move || reason.get()
                        on:input=move |ev| set_reason.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <Button button_type="submit" disabled=pending>
                        {move || if pending.get() { "Reopening..." } else { "Reopen" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn DeleteModal(
    complaint_id: String,
    reference: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (error, set_error) = signal(None::<String>);

    let delete = Action::new_local(move |_: &()| {
        let id = complaint_id.clone();
        async move { client::delete_complaint(&id).await }
    });
    let pending = delete.pending();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(result) = delete.value().get() {
            match result {
                Ok(()) => navigate("/complaints", Default::default()),
                Err(error) => set_error.set(Some(error.to_string())),
            }
        }
    });

    view! {
        <Modal title="Delete complaint" on_close=on_close>
            <div class="p-6 space-y-4">
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-sm text-gray-700 dark:text-gray-300">
                    "This permanently deletes "
                    <span class="font-medium">{reference}</span>
                    " with its communications, tasks, and history."
                </p>
                <div class="pt-4 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_close.run(())
                        class=CANCEL_BUTTON_CLASS
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class=DANGER_SOLID_CLASS
                        disabled=move || pending.get()
                        on:click=move |_| {
                            delete.dispatch(());
                        }
                    >
                        {move || if pending.get() { "Deleting..." } else { "Delete complaint" }}
                    </button>
                </div>
            </div>
        </Modal>
    }
}
