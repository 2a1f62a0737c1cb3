use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, RecurringPayload};
use crate::format::{format_currency, format_date, parse_positive_amount, today_value};
use crate::icons::{icon_pencil, icon_plus, icon_trash};
use crate::modal::Modal;
use crate::models::{
    eligible_categories, retain_category_selection, CategoryCache, Frequency,
    RecurringTransaction, TransactionType,
};
use crate::pages::{confirm, page_shell};
use crate::toast::Toaster;

#[derive(Clone, PartialEq)]
enum ModalState {
    Closed,
    Create,
    Edit(RecurringTransaction),
}

#[derive(Properties, PartialEq)]
pub struct RecurringPageProps {
    pub toaster: Toaster,
}

#[function_component(RecurringPage)]
pub fn recurring_page(props: &RecurringPageProps) -> Html {
    let items = use_state(|| Vec::<RecurringTransaction>::new());
    let loading = use_state(|| true);
    let show_inactive = use_state(|| false);
    let modal = use_state(|| ModalState::Closed);
    let refresh = use_state(|| 0u32);
    // Discards responses of superseded toggle fetches.
    let fetch_seq = use_mut_ref(|| 0u64);

    {
        let items = items.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        let fetch_seq = fetch_seq.clone();
        let show_inactive = show_inactive.clone();
        use_effect_with_deps(
            move |_| {
                let active_only = !*show_inactive;
                let seq = {
                    let mut next = fetch_seq.borrow_mut();
                    *next += 1;
                    *next
                };
                loading.set(true);
                spawn_local(async move {
                    let result = api::fetch_recurring(active_only).await;
                    if *fetch_seq.borrow() != seq {
                        return;
                    }
                    match result {
                        Ok(list) => items.set(list),
                        Err(err) => {
                            log::warn!("recurring transactions load failed: {err}");
                            toaster.error(err.message_or("Failed to load recurring transactions"));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *refresh,
        );
    }

    let reload = {
        let refresh = refresh.clone();
        Callback::from(move |_: ()| refresh.set(*refresh + 1))
    };

    let on_saved = {
        let modal = modal.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            modal.set(ModalState::Closed);
            reload.emit(());
        })
    };

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(ModalState::Closed))
    };

    let open_create = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(ModalState::Create))
    };

    let toggle_inactive = {
        let show_inactive = show_inactive.clone();
        let reload = reload.clone();
        Callback::from(move |_: Event| {
            show_inactive.set(!*show_inactive);
            reload.emit(());
        })
    };

    let on_deactivate = {
        let toaster = props.toaster.clone();
        let reload = reload.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to deactivate this recurring transaction?") {
                return;
            }
            let toaster = toaster.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::deactivate_recurring(id).await {
                    Ok(()) => {
                        toaster.success("Recurring transaction deactivated");
                        reload.emit(());
                    }
                    Err(err) => {
                        log::warn!("deactivate recurring {id} failed: {err}");
                        toaster.error(err.message_or("Failed to deactivate recurring transaction"));
                    }
                }
            });
        })
    };

    html! {
        { page_shell(
            "Recurring Transactions",
            html! {
                <div class="flex items-center gap-4">
                    <label class="flex items-center gap-2 text-sm text-slate-600">
                        <input type="checkbox" checked={*show_inactive} onchange={toggle_inactive} class="rounded border-slate-300" />
                        {"Show inactive"}
                    </label>
                    <button onclick={open_create} class="flex items-center gap-2 bg-indigo-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-indigo-700 transition-colors">
                        { icon_plus() }
                        {"Add Recurring"}
                    </button>
                </div>
            },
            html! {
                <>
                    <div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Description"}</th>
                                        <th class="px-6 py-4 font-bold">{"Schedule"}</th>
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold">{"Next Due"}</th>
                                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if *loading {
                                        html! {
                                            <tr><td colspan="7" class="px-6 py-8 text-center text-slate-400">{"Loading..."}</td></tr>
                                        }
                                    } else if items.is_empty() {
                                        html! {
                                            <tr><td colspan="7" class="px-6 py-10 text-center">
                                                <p class="font-semibold text-slate-600">{"No recurring transactions"}</p>
                                                <p class="text-sm text-slate-400 mt-1">{"Set up rent, salary or subscriptions to post on a schedule"}</p>
                                            </td></tr>
                                        }
                                    } else {
                                        html! {
                                            { for items.iter().map(|rt| {
                                                let is_income = rt.transaction_type == TransactionType::Income;
                                                let amount_label = if is_income {
                                                    format!("+{}", format_currency(rt.amount))
                                                } else {
                                                    format!("-{}", format_currency(rt.amount))
                                                };
                                                let amount_class = if is_income {
                                                    "px-6 py-4 text-right font-semibold text-emerald-600"
                                                } else {
                                                    "px-6 py-4 text-right font-semibold text-red-600"
                                                };
                                                let row_class = if rt.is_active {
                                                    "text-sm hover:bg-slate-50 transition-colors"
                                                } else {
                                                    "text-sm hover:bg-slate-50 transition-colors opacity-60"
                                                };
                                                let edit = {
                                                    let modal = modal.clone();
                                                    let rt = rt.clone();
                                                    Callback::from(move |_: MouseEvent| modal.set(ModalState::Edit(rt.clone())))
                                                };
                                                let deactivate = {
                                                    let on_deactivate = on_deactivate.clone();
                                                    let id = rt.id;
                                                    Callback::from(move |_: MouseEvent| on_deactivate.emit(id))
                                                };
                                                html! {
                                                    <tr key={rt.id} class={row_class}>
                                                        <td class="px-6 py-4 text-slate-800 font-medium">{ &rt.description }</td>
                                                        <td class="px-6 py-4 text-slate-500">{ rt.schedule_label() }</td>
                                                        <td class="px-6 py-4">
                                                            <span class="bg-slate-100 text-slate-600 px-3 py-1 rounded-full text-[10px] font-bold">
                                                                { rt.category_name.as_deref().unwrap_or("No category") }
                                                            </span>
                                                        </td>
                                                        <td class={amount_class}>{ amount_label }</td>
                                                        <td class="px-6 py-4 text-slate-500">{ format_date(rt.next_due_date) }</td>
                                                        <td class="px-6 py-4">
                                                            { if rt.is_active {
                                                                html! { <span class="bg-emerald-100 text-emerald-600 px-3 py-1 rounded-full text-[10px] font-bold">{"Active"}</span> }
                                                            } else {
                                                                html! { <span class="bg-slate-200 text-slate-500 px-3 py-1 rounded-full text-[10px] font-bold">{"Inactive"}</span> }
                                                            } }
                                                        </td>
                                                        <td class="px-6 py-4">
                                                            <div class="flex justify-end gap-2 text-slate-400">
                                                                <button onclick={edit} title="Edit" class="p-1 hover:text-indigo-600 transition-colors">{ icon_pencil() }</button>
                                                                { if rt.is_active {
                                                                    html! { <button onclick={deactivate} title="Deactivate" class="p-1 hover:text-red-600 transition-colors">{ icon_trash() }</button> }
                                                                } else {
                                                                    html! {}
                                                                } }
                                                            </div>
                                                        </td>
                                                    </tr>
                                                }
                                            }) }
                                        }
                                    } }
                                </tbody>
                            </table>
                        </div>
                    </div>

                    { match &*modal {
                        ModalState::Closed => html! {},
                        ModalState::Create => html! {
                            <RecurringModal
                                toaster={props.toaster.clone()}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                        ModalState::Edit(rt) => html! {
                            <RecurringModal
                                toaster={props.toaster.clone()}
                                editing={Some(rt.clone())}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                    } }
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
pub struct RecurringModalProps {
    pub toaster: Toaster,
    #[prop_or_default]
    pub editing: Option<RecurringTransaction>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

#[function_component(RecurringModal)]
pub fn recurring_modal(props: &RecurringModalProps) -> Html {
    let description = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.description.clone())
            .unwrap_or_default()
    });
    let amount = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.amount.to_string())
            .unwrap_or_default()
    });
    let tx_type = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.transaction_type.as_str().to_string())
            .unwrap_or_default()
    });
    let category = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|rt| rt.category_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let frequency = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.frequency.as_str().to_string())
            .unwrap_or_else(|| "monthly".to_string())
    });
    let interval = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.interval.to_string())
            .unwrap_or_else(|| "1".to_string())
    });
    let start_date = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|rt| rt.start_date.to_string())
            .unwrap_or_else(today_value)
    });
    let end_date = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|rt| rt.end_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let active = use_state(|| props.editing.as_ref().map(|rt| rt.is_active).unwrap_or(true));
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let categories = use_context::<CategoryCache>().unwrap_or_default().0;
    let offered = eligible_categories(&categories, TransactionType::parse(&tx_type));

    let on_type_change = {
        let tx_type = tx_type.clone();
        let category = category.clone();
        let categories = categories.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let next = select.value();
            let offered = eligible_categories(&categories, TransactionType::parse(&next));
            category.set(retain_category_selection(&offered, &category));
            tx_type.set(next);
        })
    };

    let on_submit = {
        let description = description.clone();
        let amount = amount.clone();
        let tx_type = tx_type.clone();
        let category = category.clone();
        let frequency = frequency.clone();
        let interval = interval.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let active = active.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let toaster = props.toaster.clone();
        let on_saved = props.on_saved.clone();
        let editing_id = props.editing.as_ref().map(|rt| rt.id);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let description_val = description.trim().to_string();
            if description_val.is_empty() {
                form_error.set(Some("Please enter a description".to_string()));
                return;
            }
            let transaction_type = match TransactionType::parse(&tx_type) {
                Some(t) => t,
                None => {
                    form_error.set(Some("Please select a transaction type".to_string()));
                    return;
                }
            };
            let amount_val = match parse_positive_amount(&amount) {
                Some(v) => v,
                None => {
                    form_error.set(Some("Amount must be a positive number".to_string()));
                    return;
                }
            };
            let frequency_val = match Frequency::parse(&frequency) {
                Some(f) => f,
                None => {
                    form_error.set(Some("Please select a frequency".to_string()));
                    return;
                }
            };
            let interval_val = match interval.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    form_error.set(Some("Interval must be a positive whole number".to_string()));
                    return;
                }
            };
            let start_val = match NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    form_error.set(Some("Please choose a start date".to_string()));
                    return;
                }
            };
            let end_val = end_date.trim().to_string();
            if !end_val.is_empty() {
                match NaiveDate::parse_from_str(&end_val, "%Y-%m-%d") {
                    Ok(d) if d < start_val => {
                        form_error.set(Some("End date cannot be before start date".to_string()));
                        return;
                    }
                    Ok(_) => {}
                    Err(_) => {
                        form_error.set(Some("End date is not a valid date".to_string()));
                        return;
                    }
                }
            }

            form_error.set(None);
            saving.set(true);

            let payload = RecurringPayload {
                description: description_val,
                amount: amount_val,
                transaction_type,
                category_id: category.parse::<i64>().ok(),
                frequency: frequency_val,
                interval: interval_val,
                start_date_str: start_val.to_string(),
                end_date_str: if end_val.is_empty() { None } else { Some(end_val) },
                is_active: editing_id.map(|_| *active),
            };
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api::update_recurring(id, &payload).await,
                    None => api::create_recurring(&payload).await,
                };
                match result {
                    Ok(()) => {
                        toaster.success(if editing_id.is_some() {
                            "Recurring transaction updated!"
                        } else {
                            "Recurring transaction added!"
                        });
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("save recurring transaction failed: {err}");
                        toaster.error(err.message_or("Failed to save recurring transaction"));
                    }
                }
                saving.set(false);
            });
        })
    };

    let cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let is_editing = props.editing.is_some();

    html! {
        <Modal
            title={if is_editing { "Edit Recurring Transaction" } else { "Add Recurring Transaction" }}
            on_close={props.on_close.clone()}
        >
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Description"}</label>
                    <input
                        type="text"
                        class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        value={(*description).clone()}
                        oninput={{
                            let description = description.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                description.set(input.value());
                            })
                        }}
                    />
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Type"}</label>
                        <select class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500" onchange={on_type_change}>
                            <option value="" selected={tx_type.is_empty()}>{"Select Type"}</option>
                            <option value="income" selected={*tx_type == "income"}>{"Income"}</option>
                            <option value="expense" selected={*tx_type == "expense"}>{"Expense"}</option>
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Amount"}</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*amount).clone()}
                            oninput={{
                                let amount = amount.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    amount.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Category"}</label>
                        // Remounts on type switch so the options and selection stay in sync.
                        <select
                            key={format!("category-for-{}", *tx_type)}
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            onchange={{
                                let category = category.clone();
                                Callback::from(move |e: Event| {
                                    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    category.set(select.value());
                                })
                            }}
                        >
                            <option value="" selected={category.is_empty()}>{"Select Category"}</option>
                            { for offered.iter().map(|c| html! {
                                <option value={c.id.to_string()} selected={*category == c.id.to_string()}>{ &c.name }</option>
                            }) }
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Frequency"}</label>
                        <select
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            onchange={{
                                let frequency = frequency.clone();
                                Callback::from(move |e: Event| {
                                    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    frequency.set(select.value());
                                })
                            }}
                        >
                            <option value="daily" selected={*frequency == "daily"}>{"Daily"}</option>
                            <option value="weekly" selected={*frequency == "weekly"}>{"Weekly"}</option>
                            <option value="monthly" selected={*frequency == "monthly"}>{"Monthly"}</option>
                            <option value="yearly" selected={*frequency == "yearly"}>{"Yearly"}</option>
                        </select>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Every"}</label>
                        <input
                            type="number"
                            min="1"
                            step="1"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*interval).clone()}
                            oninput={{
                                let interval = interval.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    interval.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Start Date"}</label>
                        <input
                            type="date"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*start_date).clone()}
                            oninput={{
                                let start_date = start_date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    start_date.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"End Date (optional)"}</label>
                        <input
                            type="date"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*end_date).clone()}
                            oninput={{
                                let end_date = end_date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    end_date.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>

                if is_editing {
                    <label class="flex items-center gap-2 text-sm text-slate-600">
                        <input
                            type="checkbox"
                            checked={*active}
                            onchange={{
                                let active = active.clone();
                                Callback::from(move |_: Event| active.set(!*active))
                            }}
                            class="rounded border-slate-300"
                        />
                        {"Active"}
                    </label>
                }

                if let Some(msg) = &*form_error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={cancel} class="px-4 py-2 rounded-lg font-semibold text-sm bg-slate-200 text-slate-700 hover:bg-slate-300 transition-colors">{"Cancel"}</button>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-lg font-semibold text-sm bg-indigo-600 text-white hover:bg-indigo-700 transition-colors disabled:opacity-60">
                        { if *saving { "Saving..." } else if is_editing { "Update Recurring" } else { "Add Recurring" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}
