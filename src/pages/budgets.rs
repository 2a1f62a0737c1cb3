use chrono::Datelike;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, BudgetPayload};
use crate::format::{
    current_month_value, format_currency, format_month_year, parse_positive_amount, today,
};
use crate::icons::{icon_pencil, icon_plus, icon_trash};
use crate::modal::Modal;
use crate::models::{BudgetSummary, CategoryCache};
use crate::pages::{confirm, page_shell};
use crate::toast::Toaster;

const MONTHS: [(&str, &str); 12] = [
    ("01", "January"),
    ("02", "February"),
    ("03", "March"),
    ("04", "April"),
    ("05", "May"),
    ("06", "June"),
    ("07", "July"),
    ("08", "August"),
    ("09", "September"),
    ("10", "October"),
    ("11", "November"),
    ("12", "December"),
];

#[derive(Clone, PartialEq)]
enum ModalState {
    Closed,
    Create,
    Edit(BudgetSummary),
}

#[derive(Properties, PartialEq)]
pub struct BudgetsPageProps {
    pub toaster: Toaster,
}

#[function_component(BudgetsPage)]
pub fn budgets_page(props: &BudgetsPageProps) -> Html {
    let rows = use_state(|| Vec::<BudgetSummary>::new());
    let loading = use_state(|| true);
    let modal = use_state(|| ModalState::Closed);
    let refresh = use_state(|| 0u32);
    // Discards responses of superseded month switches.
    let fetch_seq = use_mut_ref(|| 0u64);

    let year = use_state(|| today().year().to_string());
    let month = use_state(|| format!("{:02}", today().month()));

    {
        let rows = rows.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        let fetch_seq = fetch_seq.clone();
        let year = year.clone();
        let month = month.clone();
        use_effect_with_deps(
            move |_| {
                let month_year = format!("{}-{}", *year, *month);
                let seq = {
                    let mut next = fetch_seq.borrow_mut();
                    *next += 1;
                    *next
                };
                loading.set(true);
                spawn_local(async move {
                    let result = api::fetch_budget_summary(Some(&month_year)).await;
                    if *fetch_seq.borrow() != seq {
                        return;
                    }
                    match result {
                        Ok(list) => rows.set(list),
                        Err(err) => {
                            log::warn!("budget summary load failed: {err}");
                            toaster.error(err.message_or("Failed to load budgets"));
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

    let on_delete = {
        let toaster = props.toaster.clone();
        let reload = reload.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this budget?") {
                return;
            }
            let toaster = toaster.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_budget(id).await {
                    Ok(()) => {
                        toaster.success("Budget deleted!");
                        reload.emit(());
                    }
                    Err(err) => {
                        log::warn!("delete budget {id} failed: {err}");
                        toaster.error(err.message_or("Failed to delete budget"));
                    }
                }
            });
        })
    };

    let heading = format!(
        "Budgets for {}",
        format_month_year(&format!("{}-{}", *year, *month))
    );
    let current_year = today().year();

    html! {
        { page_shell(
            "Budgets",
            html! {
                <div class="flex items-center gap-2">
                    <select
                        class="px-3 py-2 border border-slate-300 rounded-lg bg-white text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        onchange={{
                            let month = month.clone();
                            let reload = reload.clone();
                            Callback::from(move |e: Event| {
                                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                month.set(select.value());
                                reload.emit(());
                            })
                        }}
                    >
                        { for MONTHS.iter().map(|(value, label)| html! {
                            <option value={*value} selected={*month == *value}>{ *label }</option>
                        }) }
                    </select>
                    <select
                        class="px-3 py-2 border border-slate-300 rounded-lg bg-white text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        onchange={{
                            let year = year.clone();
                            let reload = reload.clone();
                            Callback::from(move |e: Event| {
                                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                year.set(select.value());
                                reload.emit(());
                            })
                        }}
                    >
                        { for (current_year - 2..=current_year + 1).map(|y| html! {
                            <option value={y.to_string()} selected={*year == y.to_string()}>{ y }</option>
                        }) }
                    </select>
                    <button onclick={open_create} class="flex items-center gap-2 bg-indigo-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-indigo-700 transition-colors">
                        { icon_plus() }
                        {"Add Budget"}
                    </button>
                </div>
            },
            html! {
                <>
                    <div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden">
                        <div class="p-6 border-b border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg">{ heading }</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Budgeted"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Spent"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Remaining"}</th>
                                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if *loading {
                                        html! {
                                            <tr><td colspan="6" class="px-6 py-8 text-center text-slate-400">{"Loading..."}</td></tr>
                                        }
                                    } else if rows.is_empty() {
                                        html! {
                                            <tr><td colspan="6" class="px-6 py-10 text-center">
                                                <p class="font-semibold text-slate-600">{"No budgets found for this month"}</p>
                                                <p class="text-sm text-slate-400 mt-1">{"Add a budget to start tracking your spending"}</p>
                                            </td></tr>
                                        }
                                    } else {
                                        html! {
                                            { for rows.iter().map(|row| {
                                                let overspent = row.is_overspent();
                                                let remaining_class = if overspent {
                                                    "px-6 py-4 text-right font-semibold text-red-600"
                                                } else {
                                                    "px-6 py-4 text-right font-semibold text-slate-800"
                                                };
                                                let edit = {
                                                    let modal = modal.clone();
                                                    let row = row.clone();
                                                    Callback::from(move |_: MouseEvent| modal.set(ModalState::Edit(row.clone())))
                                                };
                                                let delete = {
                                                    let on_delete = on_delete.clone();
                                                    let id = row.budget_id;
                                                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                                };
                                                html! {
                                                    <tr key={row.budget_id} class="text-sm hover:bg-slate-50 transition-colors">
                                                        <td class="px-6 py-4 text-slate-800 font-medium">{ &row.category_name }</td>
                                                        <td class="px-6 py-4 text-right text-slate-600">{ format_currency(row.budgeted_amount) }</td>
                                                        <td class="px-6 py-4 text-right text-slate-600">{ format_currency(row.spent_amount) }</td>
                                                        <td class={remaining_class}>{ format_currency(row.remaining_amount) }</td>
                                                        <td class="px-6 py-4">
                                                            { if overspent {
                                                                html! { <span class="bg-red-100 text-red-600 px-3 py-1 rounded-full text-[10px] font-bold">{"Over budget"}</span> }
                                                            } else {
                                                                html! { <span class="bg-emerald-100 text-emerald-600 px-3 py-1 rounded-full text-[10px] font-bold">{"On track"}</span> }
                                                            } }
                                                        </td>
                                                        <td class="px-6 py-4">
                                                            <div class="flex justify-end gap-2 text-slate-400">
                                                                <button onclick={edit} title="Edit" class="p-1 hover:text-indigo-600 transition-colors">{ icon_pencil() }</button>
                                                                <button onclick={delete} title="Delete" class="p-1 hover:text-red-600 transition-colors">{ icon_trash() }</button>
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
                            <BudgetModal
                                toaster={props.toaster.clone()}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                        ModalState::Edit(row) => html! {
                            <BudgetModal
                                toaster={props.toaster.clone()}
                                editing={Some(row.clone())}
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
pub struct BudgetModalProps {
    pub toaster: Toaster,
    #[prop_or_default]
    pub editing: Option<BudgetSummary>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

#[function_component(BudgetModal)]
pub fn budget_modal(props: &BudgetModalProps) -> Html {
    let category = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|b| b.category_id.to_string())
            .unwrap_or_default()
    });
    let amount = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|b| b.budgeted_amount.to_string())
            .unwrap_or_default()
    });
    let budget_month = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|b| b.budget_month.clone())
            .unwrap_or_else(current_month_value)
    });
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let categories = use_context::<CategoryCache>().unwrap_or_default().0;

    let on_submit = {
        let category = category.clone();
        let amount = amount.clone();
        let budget_month = budget_month.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let toaster = props.toaster.clone();
        let on_saved = props.on_saved.clone();
        let editing_id = props.editing.as_ref().map(|b| b.budget_id);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let category_id = match category.parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    form_error.set(Some("Please select a category".to_string()));
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
            let month_val = budget_month.trim().to_string();
            if month_val.is_empty() {
                form_error.set(Some("Please choose a month".to_string()));
                return;
            }

            form_error.set(None);
            saving.set(true);

            let payload = BudgetPayload {
                category_id,
                amount: amount_val,
                budget_month_str: month_val,
                period: "monthly".to_string(),
            };
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api::update_budget(id, &payload).await,
                    None => api::create_budget(&payload).await,
                };
                match result {
                    Ok(()) => {
                        toaster.success(if editing_id.is_some() {
                            "Budget updated!"
                        } else {
                            "Budget added!"
                        });
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("save budget failed: {err}");
                        toaster.error(err.message_or("Failed to save budget"));
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
            title={if is_editing { "Edit Budget" } else { "Add Budget" }}
            on_close={props.on_close.clone()}
        >
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Category"}</label>
                    <select
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
                        { for categories.iter().map(|c| html! {
                            <option value={c.id.to_string()} selected={*category == c.id.to_string()}>{ &c.name }</option>
                        }) }
                    </select>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
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
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Month"}</label>
                        <input
                            type="month"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*budget_month).clone()}
                            oninput={{
                                let budget_month = budget_month.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    budget_month.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>

                if let Some(msg) = &*form_error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={cancel} class="px-4 py-2 rounded-lg font-semibold text-sm bg-slate-200 text-slate-700 hover:bg-slate-300 transition-colors">{"Cancel"}</button>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-lg font-semibold text-sm bg-indigo-600 text-white hover:bg-indigo-700 transition-colors disabled:opacity-60">
                        { if *saving { "Saving..." } else if is_editing { "Update Budget" } else { "Add Budget" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}
