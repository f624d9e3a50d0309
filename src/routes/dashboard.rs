//! Dashboard route. One metrics snapshot drives the KPI tiles, SLA and aging
//! cards, workload and risk sections; a separate, tab-driven queue keeps the
//! list calls small.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Spinner, StatusBadge};
use crate::features::auth::{Guarded, state::use_auth};
use crate::features::complaints::{
    client,
    types::{ComplaintFilters, ComplaintOut, SlaWindow, format_date, format_date_time},
    workflow,
};
use leptos::prelude::*;
use leptos_router::components::A;

const CARD_CLASS: &str =
    "rounded-lg border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800";
const TAB_CLASS: &str =
    "px-3 py-2 text-sm font-medium text-gray-500 hover:text-gray-700 dark:text-gray-400 dark:hover:text-gray-200";
const ACTIVE_TAB_CLASS: &str =
    "px-3 py-2 text-sm font-medium text-blue-700 border-b-2 border-blue-700 dark:text-blue-400 dark:border-blue-400";

#[derive(Clone, Copy, PartialEq, Eq)]
enum QueueTab {
    Mine,
    Unassigned,
    Breached,
    Oldest,
}

impl QueueTab {
    const ALL: [QueueTab; 4] = [
        QueueTab::Mine,
        QueueTab::Unassigned,
        QueueTab::Breached,
        QueueTab::Oldest,
    ];

    fn label(self) -> &'static str {
        match self {
            QueueTab::Mine => "Assigned to me",
            QueueTab::Unassigned => "Unassigned",
            QueueTab::Breached => "SLA breached",
            QueueTab::Oldest => "Oldest open",
        }
    }
}

/// The list endpoint has no "not closed" filter, so every tab pulls a page
/// and drops closed cases client-side.
async fn load_queue(tab: QueueTab, user_id: String) -> Result<Vec<ComplaintOut>, AppError> {
    match tab {
        QueueTab::Mine => {
            let filters = ComplaintFilters {
                handler_id: Some(user_id),
                page_size: 50,
                ..Default::default()
            };
            let mut items = client::list_complaints(&filters).await?;
            workflow::retain_open(&mut items);
            workflow::sort_queue(&mut items);
            Ok(items)
        }
        QueueTab::Unassigned => {
            let filters = ComplaintFilters {
                page_size: 100,
                ..Default::default()
            };
            let mut items = client::list_complaints(&filters).await?;
            workflow::retain_open(&mut items);
            items.retain(|complaint| complaint.assigned_handler_id.is_none());
            workflow::sort_queue(&mut items);
            Ok(items)
        }
        QueueTab::Breached => {
            let filters = ComplaintFilters {
                overdue: Some(true),
                page_size: 100,
                ..Default::default()
            };
            let mut items = client::list_complaints(&filters).await?;
            workflow::retain_open(&mut items);
            workflow::sort_queue(&mut items);
            Ok(items)
        }
        QueueTab::Oldest => {
            let filters = ComplaintFilters {
                page_size: 100,
                ..Default::default()
            };
            let mut items = client::list_complaints(&filters).await?;
            workflow::retain_open(&mut items);
            workflow::oldest_first(&mut items);
            items.truncate(20);
            Ok(items)
        }
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:.0}%"),
        None => "—".to_string(),
    }
}

fn queue_secondary_line(complaint: &ComplaintOut) -> String {
    let received = format_date(&complaint.received_at);
    match complaint.product.as_deref() {
        Some(product) if !product.is_empty() => format!("{product} • Received {received}"),
        _ => format!("Received {received}"),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <DashboardContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth();
    let (queue_tab, set_queue_tab) = signal(QueueTab::Mine);
    let (show_risk_details, set_show_risk_details) = signal(false);

    let metrics = LocalResource::new(move || async move { client::metrics().await });
    let queue = LocalResource::new(move || {
        let tab = queue_tab.get();
        let user_id = auth
            .session
            .get()
            .map(|session| session.user_id)
            .unwrap_or_default();
        async move { load_queue(tab, user_id).await }
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-baseline justify-between">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Dashboard"</h1>
                {move || {
                    metrics
                        .get()
                        .and_then(Result::ok)
                        .map(|m| {
                            view! {
                                <span class="text-xs text-gray-500 dark:text-gray-400">
                                    {format!("As of {}", format_date_time(&m.as_of))}
                                </span>
                            }
                        })
                }}
            </div>

            {move || match metrics.get() {
                None => view! { <Spinner label="Loading metrics" /> }.into_any(),
                Some(Err(err)) => {
                    view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any()
                }
                Some(Ok(m)) => {
                    let mut status_rows: Vec<(String, i64)> = m
                        .status_open
                        .iter()
                        .map(|(status, count)| (status.replace('_', " "), *count))
                        .collect();
                    status_rows.sort_by(|a, b| b.1.cmp(&a.1));
                    status_rows.truncate(6);
                    let workload: Vec<_> = m.workload_open_by_handler.iter().take(6).cloned().collect();

                    view! {
                        <div class="space-y-6">
                            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
                                <KpiCard
                                    title="Open now"
                                    value=m.kpis.open
                                    subtitle="All open complaints"
                                    on_select=Callback::new(move |_| set_queue_tab.set(QueueTab::Oldest))
                                />
                                <KpiCard
                                    title="My open"
                                    value=m.kpis.my_open
                                    subtitle="Assigned to you"
                                    on_select=Callback::new(move |_| set_queue_tab.set(QueueTab::Mine))
                                />
                                <KpiCard
                                    title="SLA breached (open)"
                                    value=m.kpis.open_sla_breaches
                                    subtitle="Ack or Final breached"
                                    on_select=Callback::new(move |_| set_queue_tab.set(QueueTab::Breached))
                                />
                                <KpiCard
                                    title="Stale (21d+)"
                                    value=m.kpis.open_stale_21d
                                    subtitle="No activity 21+ days"
                                    on_select=Callback::new(move |_| set_queue_tab.set(QueueTab::Oldest))
                                />
                            </div>

                            <Section title="SLA & Aging">
                                <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                                    <div class=CARD_CLASS>
                                        <h3 class="text-sm font-semibold text-gray-900 dark:text-white">
                                            "SLA performance (30d)"
                                        </h3>
                                        <div class="mt-3 space-y-4">
                                            {sla_line("Ack", &m.sla_30d.ack)}
                                            {sla_line("Final", &m.sla_30d.final_response)}
                                        </div>
                                    </div>
                                    <div class=CARD_CLASS>
                                        <h3 class="text-sm font-semibold text-gray-900 dark:text-white">
                                            "Aging (open)"
                                        </h3>
                                        <div class="mt-3 space-y-3">
                                            {aging_bar("0–7 days", m.aging_open.days_0_7, m.kpis.open)}
                                            {aging_bar("8–21 days", m.aging_open.days_8_21, m.kpis.open)}
                                            {aging_bar("22–56 days", m.aging_open.days_22_56, m.kpis.open)}
                                            {aging_bar("56+ days", m.aging_open.days_56_plus, m.kpis.open)}
                                        </div>
                                    </div>
                                </div>
                            </Section>

                            <Section title="Workload">
                                <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                                    <div class=CARD_CLASS>
                                        <h3 class="text-sm font-semibold text-gray-900 dark:text-white">
                                            "Open by handler"
                                        </h3>
                                        <div class="mt-3 space-y-2">
                                            {workload
                                                .into_iter()
                                                .map(|handler| {
                                                    view! {
                                                        <div class="flex items-center justify-between">
                                                            <span class="text-sm text-gray-700 dark:text-gray-300">
                                                                {handler.name}
                                                            </span>
                                                            <span class="text-sm font-bold text-gray-900 dark:text-white">
                                                                {handler.count}
                                                            </span>
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                    <div class=CARD_CLASS>
                                        <h3 class="text-sm font-semibold text-gray-900 dark:text-white">
                                            "Flow (last 7d)"
                                        </h3>
                                        <div class="mt-3 flex gap-8">
                                            <div>
                                                <p class="text-sm text-gray-500 dark:text-gray-400">"New"</p>
                                                <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                    {m.flow_7d.new}
                                                </p>
                                            </div>
                                            <div>
                                                <p class="text-sm text-gray-500 dark:text-gray-400">"Closed"</p>
                                                <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                    {m.flow_7d.closed}
                                                </p>
                                            </div>
                                        </div>
                                        <h3 class="mt-4 text-sm font-semibold text-gray-900 dark:text-white">
                                            "Open status"
                                        </h3>
                                        <div class="mt-2 space-y-1">
                                            {status_rows
                                                .into_iter()
                                                .map(|(status, count)| {
                                                    view! {
                                                        <div class="flex items-center justify-between">
                                                            <span class="text-sm text-gray-700 dark:text-gray-300">
                                                                {status}
                                                            </span>
                                                            <span class="text-sm font-bold text-gray-900 dark:text-white">
                                                                {count}
                                                            </span>
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            </Section>

                            <Section title="Risk & Compliance">
                                <div class=CARD_CLASS>
                                    <div class="grid grid-cols-2 gap-4 lg:grid-cols-4">
                                        <div>
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Vulnerable (open)"
                                            </p>
                                            <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                {m.risk.open_vulnerable.count}
                                            </p>
                                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                                {fmt_pct(m.risk.open_vulnerable.pct_of_open)}
                                            </p>
                                        </div>
                                        <div>
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Escalated (open)"
                                            </p>
                                            <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                {m.risk.escalated_open}
                                            </p>
                                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                                "Current open escalations"
                                            </p>
                                        </div>
                                        <div>
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Reopened (all time)"
                                            </p>
                                            <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                {m.risk.reopened.count}
                                            </p>
                                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                                {fmt_pct(m.risk.reopened.pct_all_time)}
                                            </p>
                                        </div>
                                        <div>
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "Final attachments (open)"
                                            </p>
                                            <p class="text-2xl font-semibold text-gray-900 dark:text-white">
                                                {fmt_pct(m.risk.final_attachment_open_pct)}
                                            </p>
                                            <p class="text-xs text-gray-500 dark:text-gray-400">
                                                "Coverage on open cases"
                                            </p>
                                        </div>
                                    </div>
                                    <Show when=move || show_risk_details.get()>
                                        <div class="mt-4 border-t border-gray-200 pt-3 dark:border-gray-700">
                                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                                "\"Stale\" means no communications in 21+ days (or received date if no comms)."
                                            </p>
                                        </div>
                                    </Show>
                                    <button
                                        type="button"
                                        class="mt-3 text-sm text-blue-700 hover:underline dark:text-blue-400"
                                        on:click=move |_| set_show_risk_details.update(|open| *open = !*open)
                                    >
                                        {move || {
                                            if show_risk_details.get() { "Hide details" } else { "View details" }
                                        }}
                                    </button>
                                </div>
                            </Section>
                        </div>
                    }
                    .into_any()
                }
            }}

            <Section title="My Queue">
                <div class="rounded-lg border border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-800">
                    <div class="flex gap-1 border-b border-gray-200 px-2 dark:border-gray-700">
                        {QueueTab::ALL
                            .into_iter()
                            .map(|tab| {
                                view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            if queue_tab.get() == tab { ACTIVE_TAB_CLASS } else { TAB_CLASS }
                                        }
                                        on:click=move |_| set_queue_tab.set(tab)
                                    >
                                        {tab.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    {move || match queue.get() {
                        None => view! {
                            <div class="p-4">
                                <Spinner label="Loading queue" />
                            </div>
                        }
                        .into_any(),
                        Some(Err(err)) => view! {
                            <div class="p-4">
                                <Alert kind=AlertKind::Error message=err.to_string() />
                            </div>
                        }
                        .into_any(),
                        Some(Ok(items)) if items.is_empty() => view! {
                            <p class="p-4 text-sm text-gray-500 dark:text-gray-400">"No items"</p>
                        }
                        .into_any(),
                        Some(Ok(items)) => view! {
                            <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                                <For
                                    each=move || items.clone()
                                    key=|complaint| complaint.id.clone()
                                    children=|complaint| {
                                        let breached = complaint.ack_breached || complaint.final_breached;
                                        let secondary = queue_secondary_line(&complaint);
                                        view! {
                                            <li>
                                                <A
                                                    href=format!("/complaints/{}", complaint.id)
                                                    {..}
                                                    class="flex items-center justify-between gap-3 px-4 py-3 hover:bg-gray-50 dark:hover:bg-gray-700/50"
                                                >
                                                    <div>
                                                        <p class="text-sm font-medium text-gray-900 dark:text-white">
                                                            {format!(
                                                                "{} - {}",
                                                                complaint.reference,
                                                                complaint.complainant.full_name,
                                                            )}
                                                        </p>
                                                        <p class="text-xs text-gray-500 dark:text-gray-400">
                                                            {secondary}
                                                        </p>
                                                    </div>
                                                    <div class="flex items-center gap-2">
                                                        {breached
                                                            .then_some(view! {
                                                                <span class="inline-block rounded-full bg-red-100 px-2.5 py-0.5 text-xs font-medium text-red-700 dark:bg-red-900/40 dark:text-red-200">
                                                                    "Breach"
                                                                </span>
                                                            })}
                                                        <StatusBadge status=complaint.status />
                                                    </div>
                                                </A>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        }
                        .into_any(),
                    }}
                </div>
            </Section>
        </div>
    }
}

#[component]
fn KpiCard(
    title: &'static str,
    value: i64,
    subtitle: &'static str,
    on_select: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="w-full rounded-lg border border-gray-200 bg-white p-4 text-left transition-colors hover:border-blue-500 dark:border-gray-700 dark:bg-gray-800 dark:hover:border-blue-500"
            on:click=move |_| on_select.run(())
        >
            <p class="text-sm font-medium text-gray-500 dark:text-gray-400">{title}</p>
            <p class="text-3xl font-semibold text-gray-900 dark:text-white">{value}</p>
            <p class="text-xs text-gray-500 dark:text-gray-400">{subtitle}</p>
        </button>
    }
}

#[component]
fn Section(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <div class="mb-2 flex items-center gap-3">
                <h2 class="text-sm font-semibold uppercase tracking-wide text-gray-500 dark:text-gray-400">
                    {title}
                </h2>
                <div class="h-px flex-1 bg-gray-200 dark:bg-gray-700"></div>
            </div>
            {children()}
        </div>
    }
}

fn sla_line(label: &'static str, window: &SlaWindow) -> impl IntoView {
    let ratio = if window.total > 0 {
        format!("{}/{}", window.on_time, window.total)
    } else {
        "—".to_string()
    };
    let pct_label = fmt_pct(window.on_time_pct);
    let width = window.on_time_pct.unwrap_or(0.0).clamp(0.0, 100.0);

    view! {
        <div>
            <div class="flex items-center justify-between">
                <span class="text-sm font-bold text-gray-900 dark:text-white">{label}</span>
                <span class="text-sm text-gray-500 dark:text-gray-400">{ratio}</span>
            </div>
            <p class="text-sm text-gray-700 dark:text-gray-300">{pct_label}</p>
            <div class="mt-1 h-1.5 w-full rounded-full bg-gray-200 dark:bg-gray-700">
                <div
                    class="h-1.5 rounded-full bg-blue-600"
                    style=format!("width: {width:.0}%")
                ></div>
            </div>
        </div>
    }
}

fn aging_bar(label: &'static str, value: i64, total: i64) -> impl IntoView {
    let pct = if total > 0 {
        (value as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    view! {
        <div>
            <div class="flex items-center justify-between">
                <span class="text-sm text-gray-700 dark:text-gray-300">{label}</span>
                <span class="text-sm font-bold text-gray-900 dark:text-white">{value}</span>
            </div>
            <div class="mt-1 h-1.5 w-full rounded-full bg-gray-200 dark:bg-gray-700">
                <div
                    class="h-1.5 rounded-full bg-blue-600"
                    style=format!("width: {pct:.0}%")
                ></div>
            </div>
        </div>
    }
}
