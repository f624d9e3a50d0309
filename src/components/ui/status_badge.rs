use crate::features::complaints::types::ComplaintStatus;
use leptos::prelude::*;

/// Pill showing a complaint status with the colour coding used across the
/// list, detail, and dashboard views.
#[component]
pub fn StatusBadge(status: ComplaintStatus) -> impl IntoView {
    let class = match status {
        ComplaintStatus::New | ComplaintStatus::Reopened => {
            "inline-block rounded-full px-2.5 py-0.5 text-xs font-medium bg-gray-100 text-gray-700 dark:bg-gray-700 dark:text-gray-200"
        }
        ComplaintStatus::Acknowledged => {
            "inline-block rounded-full px-2.5 py-0.5 text-xs font-medium bg-blue-100 text-blue-700 dark:bg-blue-900/40 dark:text-blue-200"
        }
        ComplaintStatus::InInvestigation => {
            "inline-block rounded-full px-2.5 py-0.5 text-xs font-medium bg-amber-100 text-amber-800 dark:bg-amber-900/40 dark:text-amber-200"
        }
        ComplaintStatus::ResponseDrafted => {
            "inline-block rounded-full px-2.5 py-0.5 text-xs font-medium bg-purple-100 text-purple-700 dark:bg-purple-900/40 dark:text-purple-200"
        }
        ComplaintStatus::FinalResponseIssued | ComplaintStatus::Closed => {
            "inline-block rounded-full px-2.5 py-0.5 text-xs font-medium bg-emerald-100 text-emerald-700 dark:bg-emerald-900/40 dark:text-emerald-200"
        }
    };

    view! { <span class=class>{status.label()}</span> }
}
