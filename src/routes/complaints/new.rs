//! Intake wizard. Three steps gather the complainant, the complaint itself,
//! and the policy context; submit creates the case and, when a file was
//! attached, logs it as the first inbound communication.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button};
use crate::features::auth::{Guarded, state::use_auth};
use crate::features::complaints::{
    client,
    types::{
        ComplainantCreate, ComplaintCreate, CommunicationDirection, NewCommunication,
        PolicyCreate, optional_text,
    },
    workflow,
};
use crate::features::reference::{client as reference_client, types::ReferenceKind};
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const FIELD_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
const CHECKBOX_CLASS: &str = "w-4 h-4 text-blue-600 bg-gray-100 border-gray-300 rounded focus:ring-blue-500 dark:focus:ring-blue-600 dark:ring-offset-gray-800 focus:ring-2 dark:bg-gray-700 dark:border-gray-600";
const BACK_BUTTON_CLASS: &str = "px-5 py-2.5 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 disabled:opacity-50 disabled:cursor-not-allowed dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700";

#[derive(Clone, Copy, PartialEq, Eq)]
enum WizardStep {
    Complainant,
    Complaint,
    Policy,
}

impl WizardStep {
    const ALL: [WizardStep; 3] = [
        WizardStep::Complainant,
        WizardStep::Complaint,
        WizardStep::Policy,
    ];

    fn label(self) -> &'static str {
        match self {
            WizardStep::Complainant => "Complainant",
            WizardStep::Complaint => "Complaint",
            WizardStep::Policy => "Policy",
        }
    }

    fn number(self) -> usize {
        match self {
            WizardStep::Complainant => 1,
            WizardStep::Complaint => 2,
            WizardStep::Policy => 3,
        }
    }

    fn next(self) -> WizardStep {
        match self {
            WizardStep::Complainant => WizardStep::Complaint,
            WizardStep::Complaint | WizardStep::Policy => WizardStep::Policy,
        }
    }

    fn back(self) -> WizardStep {
        match self {
            WizardStep::Complainant | WizardStep::Complaint => WizardStep::Complainant,
            WizardStep::Policy => WizardStep::Complaint,
        }
    }
}

/// Today in the `date` input format.
fn today_value() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}

#[component]
pub fn NewComplaintPage() -> impl IntoView {
    view! {
        <Guarded>
            <AppShell>
                <WizardContent />
            </AppShell>
        </Guarded>
    }
}

#[component]
fn WizardContent() -> impl IntoView {
    let auth = use_auth();
    if auth
        .session
        .get_untracked()
        .is_some_and(|current| current.is_read_only())
    {
        return view! {
            <Alert
                kind=AlertKind::Info
                message="Your role is read-only; complaints cannot be created.".to_string()
            />
        }
        .into_any();
    }

    let (step, set_step) = signal(WizardStep::Complainant);
    let (error, set_error) = signal(None::<String>);

    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (vulnerable, set_vulnerable) = signal(false);

    let (description, set_description) = signal(String::new());
    let (category, set_category) = signal(workflow::FCA_CATEGORIES[0].to_string());
    let (reason, set_reason) = signal(String::new());
    let (source, set_source) = signal("Web".to_string());
    let (received_date, set_received_date) = signal(today_value());
    let (file_name, set_file_name) = signal(None::<String>);
    let file_ref = NodeRef::<html::Input>::new();

    let (policy_number, set_policy_number) = signal(String::new());
    let (product, set_product) = signal(String::new());
    let (insurer, set_insurer) = signal(String::new());
    let (broker, set_broker) = signal(String::new());

    // The three lists load once; a failed load leaves the selects on "(None)"
    // without blocking intake.
    let reference = LocalResource::new(move || async move {
        let products = reference_client::list(ReferenceKind::Products).await?;
        let insurers = reference_client::list(ReferenceKind::Insurers).await?;
        let brokers = reference_client::list(ReferenceKind::Brokers).await?;
        Ok::<_, AppError>((products, insurers, brokers))
    });

    // The attachment is read from the input at dispatch time. A failed upload
    // is logged and the case still opens; the file can be re-added from the
    // communications tab.
    let submit = Action::new_local(move |request: &ComplaintCreate| {
        let request = request.clone();
        let file = file_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        async move {
            let created = client::create_complaint(&request).await?;
            if let Some(file) = file {
                let note = NewCommunication {
                    channel: workflow::source_channel(&request.source),
                    direction: CommunicationDirection::Inbound,
                    summary: format!(
                        "Initial complaint via {} (with attachment: {})",
                        request.source,
                        file.name(),
                    ),
                    occurred_at: request.received_at.clone(),
                    is_final_response: false,
                };
                if let Err(upload_error) =
                    client::add_communication(&created.id, &note, &[file]).await
                {
                    log::warn!("intake attachment upload failed: {upload_error}");
                }
            }
            Ok::<_, AppError>(created.id)
        }
    });
    let pending = submit.pending();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(result) = submit.value().get() {
            match result {
                Ok(id) => navigate(&format!("/complaints/{id}"), Default::default()),
                Err(submit_error) => set_error.set(Some(submit_error.to_string())),
            }
        }
    });

    let advance = move |_| {
        let failed = match step.get_untracked() {
            WizardStep::Complainant => full_name
                .get_untracked()
                .trim()
                .is_empty()
                .then(|| "Complainant name is required".to_string()),
            WizardStep::Complaint => {
                if description.get_untracked().trim().is_empty() {
                    Some("Description is required".to_string())
                } else if category.get_untracked() == workflow::UNCLASSIFIED_CATEGORY
                    && reason.get_untracked().trim().is_empty()
                {
                    Some("Reason is required when category is Other / Unclassified".to_string())
                } else {
                    None
                }
            }
            WizardStep::Policy => None,
        };
        if let Some(message) = failed {
            set_error.set(Some(message));
            return;
        }
        set_error.set(None);
        set_step.update(|current| *current = current.next());
    };

    let go_back = move |_| {
        set_error.set(None);
        set_step.update(|current| *current = current.back());
    };

    let on_submit = move |_| {
        let name = full_name.get_untracked();
        let summary = description.get_untracked();
        let chosen_category = category.get_untracked();
        let reason_text = reason.get_untracked();
        if let Err(message) =
            workflow::validate_new_complaint(&name, &summary, &chosen_category, &reason_text)
        {
            set_error.set(Some(message));
            return;
        }

        let vulnerability = vulnerable.get_untracked()
            || workflow::forces_vulnerability_flag(&chosen_category);
        let request = ComplaintCreate {
            source: source.get_untracked(),
            received_at: format!("{}T00:00:00", received_date.get_untracked()),
            description: summary.trim().to_string(),
            category: chosen_category,
            reason: optional_text(&reason_text),
            fca_complaint: true,
            fca_rationale: None,
            fos_complaint: false,
            fos_reference: None,
            fos_referred_at: None,
            vulnerability_flag: vulnerability,
            vulnerability_notes: None,
            policy_number: optional_text(&policy_number.get_untracked()),
            insurer: optional_text(&insurer.get_untracked()),
            broker: optional_text(&broker.get_untracked()),
            product: optional_text(&product.get_untracked()),
            scheme: None,
            complainant: ComplainantCreate {
                full_name: name.trim().to_string(),
                email: optional_text(&email.get_untracked()),
                phone: optional_text(&phone.get_untracked()),
                address: None,
                date_of_birth: None,
                preferred_contact_method: None,
            },
            policy: PolicyCreate {
                policy_number: optional_text(&policy_number.get_untracked()),
                insurer: optional_text(&insurer.get_untracked()),
                broker: optional_text(&broker.get_untracked()),
                product: optional_text(&product.get_untracked()),
                scheme: None,
            },
        };
        set_error.set(None);
        submit.dispatch(request);
    };

    view! {
        <div class="mx-auto max-w-3xl space-y-6">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"New complaint"</h1>
            <ol class="flex flex-wrap items-center gap-4">
                {WizardStep::ALL
                    .into_iter()
                    .map(|item| {
                        view! {
                            <li class="flex items-center gap-2">
                                <span class=move || {
                                    if step.get() == item {
                                        "flex h-6 w-6 items-center justify-center rounded-full bg-blue-700 text-xs font-medium text-white"
                                    } else {
                                        "flex h-6 w-6 items-center justify-center rounded-full bg-gray-200 text-xs font-medium text-gray-600 dark:bg-gray-700 dark:text-gray-300"
                                    }
                                }>{item.number()}</span>
                                <span class=move || {
                                    if step.get() == item {
                                        "text-sm font-medium text-blue-700 dark:text-blue-400"
                                    } else {
                                        "text-sm text-gray-500 dark:text-gray-400"
                                    }
                                }>{item.label()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
            <div class="rounded-lg border border-gray-200 bg-white p-6 dark:border-gray-700 dark:bg-gray-800">
                <div
                    class="grid gap-4 sm:grid-cols-2"
                    class:hidden=move || step.get() != WizardStep::Complainant
                >
                    <div>
                        <label class=LABEL_CLASS>"Full name"</label>
                        <input
                            type="text"
                            class=FIELD_CLASS
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Email"</label>
                        <input
                            type="email"
                            class=FIELD_CLASS
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Phone"</label>
                        <input
                            type="text"
                            class=FIELD_CLASS
                            prop:value=move || phone.get()
                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                        />
                    </div>
                    <label class="flex items-center gap-2 self-end pb-2 text-sm text-gray-900 dark:text-white">
                        <input
                            type="checkbox"
                            class=CHECKBOX_CLASS
                            prop:checked=move || vulnerable.get()
                            on:change=move |ev| set_vulnerable.set(event_target_checked(&ev))
                        />
                        "Vulnerable customer"
                    </label>
                </div>
                <div
                    class="grid gap-4 sm:grid-cols-2"
                    class:hidden=move || step.get() != WizardStep::Complaint
                >
                    <div class="sm:col-span-2">
                        <label class=LABEL_CLASS>"Description"</label>
                        <textarea
                            class=FIELD_CLASS
                            rows=3
                            placeholder="Brief summary of the complaint"
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Category (FCA-aligned)"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || category.get()
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                if workflow::forces_vulnerability_flag(&value) {
                                    set_vulnerable.set(true);
                                }
                                set_category.set(value);
                            }
                        >
                            {workflow::FCA_CATEGORIES
                                .into_iter()
                                .map(|name| view! { <option value=name>{name}</option> })
                                .collect_view()}
                        </select>
                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                            "Choose one primary category."
                        </p>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Reason / sub-category"</label>
                        <textarea
                            class=FIELD_CLASS
                            rows=2
                            placeholder="Add specific reasons; multiple allowed"
                            prop:value=move || reason.get()
                            on:input=move |ev| set_reason.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Channel"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || source.get()
                            on:change=move |ev| set_source.set(event_target_value(&ev))
                        >
                            {workflow::SOURCES
                                .into_iter()
                                .map(|name| view! { <option value=name>{name}</option> })
                                .collect_view()}
                        </select>
                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                            "How the complaint was received."
                        </p>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Date received"</label>
                        <input
                            type="date"
                            class=FIELD_CLASS
                            prop:value=move || received_date.get()
                            on:input=move |ev| set_received_date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="sm:col-span-2">
                        <label class=LABEL_CLASS>"Attachment"</label>
                        <input
                            type="file"
                            accept=".pdf,.png,.jpg,.jpeg,.txt,.doc,.docx"
                            node_ref=file_ref
                            class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg cursor-pointer bg-gray-50 focus:outline-none dark:text-gray-400 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400"
                            on:change=move |_| {
                                let name = file_ref
                                    .get_untracked()
                                    .and_then(|input| input.files())
                                    .and_then(|list| list.get(0))
                                    .map(|file| file.name());
                                set_file_name.set(name);
                            }
                        />
                        <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                            {move || {
                                let hint = if matches!(
                                    source.get().as_str(),
                                    "Email" | "Letter"
                                ) {
                                    "For emails and letters, attach a PDF print rather than .eml or .msg files."
                                } else {
                                    "Upload supporting documents."
                                };
                                let selected = file_name
                                    .get()
                                    .unwrap_or_else(|| "none".to_string());
                                format!("{hint} Selected: {selected}")
                            }}
                        </p>
                    </div>
                </div>
                <div
                    class="grid gap-4 sm:grid-cols-2"
                    class:hidden=move || step.get() != WizardStep::Policy
                >
                    <div>
                        <label class=LABEL_CLASS>"Policy number or claim reference"</label>
                        <input
                            type="text"
                            class=FIELD_CLASS
                            prop:value=move || policy_number.get()
                            on:input=move |ev| set_policy_number.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Product"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || product.get()
                            on:change=move |ev| set_product.set(event_target_value(&ev))
                        >
                            <option value="">"(None)"</option>
                            {move || {
                                reference
                                    .get()
                                    .and_then(Result::ok)
                                    .map(|(products, _, _)| {
                                        products
                                            .into_iter()
                                            .map(|item| {
                                                view! {
                                                    <option value=item.name.clone()>{item.name}</option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Insurer"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || insurer.get()
                            on:change=move |ev| set_insurer.set(event_target_value(&ev))
                        >
                            <option value="">"(None)"</option>
                            {move || {
                                reference
                                    .get()
                                    .and_then(Result::ok)
                                    .map(|(_, insurers, _)| {
                                        insurers
                                            .into_iter()
                                            .map(|item| {
                                                view! {
                                                    <option value=item.name.clone()>{item.name}</option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </div>
                    <div>
                        <label class=LABEL_CLASS>"Broker"</label>
                        <select
                            class=FIELD_CLASS
                            prop:value=move || broker.get()
                            on:change=move |ev| set_broker.set(event_target_value(&ev))
                        >
                            <option value="">"(None)"</option>
                            {move || {
                                reference
                                    .get()
                                    .and_then(Result::ok)
                                    .map(|(_, _, brokers)| {
                                        brokers
                                            .into_iter()
                                            .map(|item| {
                                                view! {
                                                    <option value=item.name.clone()>{item.name}</option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </div>
                </div>
            </div>
            {move || {
                error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
            }}
            <div class="flex items-center justify-between">
                <button
                    type="button"
                    class=BACK_BUTTON_CLASS
                    disabled=move || step.get() == WizardStep::Complainant
                    on:click=go_back
                >
                    "Back"
                </button>
                {move || {
                    if step.get() == WizardStep::Policy {
                        view! {
                            <Button disabled=pending on_click=on_submit>
                                {move || {
                                    if pending.get() { "Creating..." } else { "Create complaint" }
                                }}
                            </Button>
                        }
                            .into_any()
                    } else {
                        view! { <Button on_click=advance>"Next"</Button> }.into_any()
                    }
                }}
            </div>
        </div>
    }
    .into_any()
}
