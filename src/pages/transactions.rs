use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, TransactionPayload};
use crate::format::{format_currency, format_date, parse_positive_amount, today_value};
use crate::icons::{icon_arrow_down, icon_arrow_up, icon_pencil, icon_plus, icon_trash};
use crate::modal::Modal;
use crate::models::{
    eligible_categories, retain_category_selection, CategoryCache, Transaction,
    TransactionFilter, TransactionType,
};
use crate::pages::{confirm, page_shell};
use crate::toast::Toaster;

#[derive(Clone, PartialEq)]
enum ModalState {
    Closed,
    Create,
    Edit(Transaction),
}

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub toaster: Toaster,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let items = use_state(|| Vec::<Transaction>::new());
    let loading = use_state(|| true);
    let modal = use_state(|| ModalState::Closed);
    let refresh = use_state(|| 0u32);
    // Discards responses of superseded filter fetches.
    let fetch_seq = use_mut_ref(|| 0u64);

    let filter_type = use_state(|| "".to_string());
    let filter_category = use_state(|| "".to_string());
    let filter_start = use_state(|| "".to_string());
    let filter_end = use_state(|| "".to_string());
    // Bumped on "Clear Filters" so the selects remount showing placeholders.
    let filter_epoch = use_state(|| 0u32);

    let categories = use_context::<CategoryCache>().unwrap_or_default().0;

    {
        let items = items.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        let fetch_seq = fetch_seq.clone();
        let filter_type = filter_type.clone();
        let filter_category = filter_category.clone();
        let filter_start = filter_start.clone();
        let filter_end = filter_end.clone();
        use_effect_with_deps(
            move |_| {
                let filter = TransactionFilter {
                    transaction_type: (*filter_type).clone(),
                    category_id: (*filter_category).clone(),
                    start_date: (*filter_start).clone(),
                    end_date: (*filter_end).clone(),
                };
                let seq = {
                    let mut next = fetch_seq.borrow_mut();
                    *next += 1;
                    *next
                };
                loading.set(true);
                spawn_local(async move {
                    let result = api::fetch_transactions(&filter).await;
                    if *fetch_seq.borrow() != seq {
                        return;
                    }
                    match result {
                        Ok(list) => items.set(list),
                        Err(err) => {
                            log::warn!("transactions load failed: {err}");
                            toaster.error(err.message_or("Failed to load transactions"));
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

    let on_edit = {
        let modal = modal.clone();
        let toaster = props.toaster.clone();
        Callback::from(move |id: i64| {
            let modal = modal.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                match api::fetch_transaction(id).await {
                    Ok(tx) => modal.set(ModalState::Edit(tx)),
                    Err(err) => {
                        log::warn!("transaction {id} load failed: {err}");
                        toaster.error(err.message_or("Failed to load transaction"));
                    }
                }
            });
        })
    };

    let on_delete = {
        let toaster = props.toaster.clone();
        let reload = reload.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this transaction?") {
                return;
            }
            let toaster = toaster.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_transaction(id).await {
                    Ok(()) => {
                        toaster.success("Transaction deleted!");
                        reload.emit(());
                    }
                    Err(err) => {
                        log::warn!("delete transaction {id} failed: {err}");
                        toaster.error(err.message_or("Failed to delete transaction"));
                    }
                }
            });
        })
    };

    let apply_filters = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.emit(()))
    };

    let clear_filters = {
        let filter_type = filter_type.clone();
        let filter_category = filter_category.clone();
        let filter_start = filter_start.clone();
        let filter_end = filter_end.clone();
        let filter_epoch = filter_epoch.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            filter_type.set("".to_string());
            filter_category.set("".to_string());
            filter_start.set("".to_string());
            filter_end.set("".to_string());
            filter_epoch.set(*filter_epoch + 1);
            reload.emit(());
        })
    };

    html! {
        { page_shell(
            "Transactions",
            html! {
                <button onclick={open_create} class="flex items-center gap-2 bg-indigo-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-indigo-700 transition-colors">
                    { icon_plus() }
                    {"Add Transaction"}
                </button>
            },
            html! {
                <>
                    <div class="bg-white rounded-xl border border-slate-200 p-4">
                        <div class="grid grid-cols-1 md:grid-cols-5 gap-3 items-end">
                            <div class="space-y-1">
                                <label class="text-xs font-semibold text-slate-500 uppercase tracking-wide">{"Type"}</label>
                                <select
                                    key={format!("filter-type-{}", *filter_epoch)}
                                    class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500"
                                    onchange={{
                                        let filter_type = filter_type.clone();
                                        Callback::from(move |e: Event| {
                                            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                            filter_type.set(select.value());
                                        })
                                    }}
                                >
                                    <option value="" selected={filter_type.is_empty()}>{"All Types"}</option>
                                    <option value="income" selected={*filter_type == "income"}>{"Income"}</option>
                                    <option value="expense" selected={*filter_type == "expense"}>{"Expense"}</option>
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-xs font-semibold text-slate-500 uppercase tracking-wide">{"Category"}</label>
                                <select
                                    key={format!("filter-category-{}", *filter_epoch)}
                                    class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500"
                                    onchange={{
                                        let filter_category = filter_category.clone();
                                        Callback::from(move |e: Event| {
                                            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                            filter_category.set(select.value());
                                        })
                                    }}
                                >
                                    <option value="" selected={filter_category.is_empty()}>{"All Categories"}</option>
                                    { for categories.iter().map(|c| html! {
                                        <option value={c.id.to_string()} selected={*filter_category == c.id.to_string()}>{ &c.name }</option>
                                    }) }
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-xs font-semibold text-slate-500 uppercase tracking-wide">{"From"}</label>
                                <input type="date" value={(*filter_start).clone()} class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500" oninput={{
                                    let filter_start = filter_start.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        filter_start.set(input.value());
                                    })
                                }} />
                            </div>
                            <div class="space-y-1">
                                <label class="text-xs font-semibold text-slate-500 uppercase tracking-wide">{"To"}</label>
                                <input type="date" value={(*filter_end).clone()} class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500" oninput={{
                                    let filter_end = filter_end.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        filter_end.set(input.value());
                                    })
                                }} />
                            </div>
                            <div class="flex gap-2">
                                <button onclick={apply_filters} class="flex-1 bg-indigo-600 text-white px-3 py-2 rounded-lg font-semibold text-sm hover:bg-indigo-700 transition-colors">{"Apply"}</button>
                                <button onclick={clear_filters} class="flex-1 bg-slate-200 text-slate-700 px-3 py-2 rounded-lg font-semibold text-sm hover:bg-slate-300 transition-colors">{"Clear"}</button>
                            </div>
                        </div>
                    </div>

                    <div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold w-12"></th>
                                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                                        <th class="px-6 py-4 font-bold">{"Description"}</th>
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if *loading {
                                        html! {
                                            <tr><td colspan="6" class="px-6 py-8 text-center text-slate-400">{"Loading..."}</td></tr>
                                        }
                                    } else if items.is_empty() {
                                        html! {
                                            <tr><td colspan="6" class="px-6 py-10 text-center">
                                                <p class="font-semibold text-slate-600">{"No transactions found"}</p>
                                                <p class="text-sm text-slate-400 mt-1">{"Add some transactions to see them here"}</p>
                                            </td></tr>
                                        }
                                    } else {
                                        html! {
                                            { for items.iter().map(|tx| {
                                                let is_income = tx.transaction_type == TransactionType::Income;
                                                let amount_label = if is_income {
                                                    format!("+{}", format_currency(tx.amount))
                                                } else {
                                                    format!("-{}", format_currency(tx.amount))
                                                };
                                                let amount_class = if is_income {
                                                    "px-6 py-4 text-right font-semibold text-emerald-600"
                                                } else {
                                                    "px-6 py-4 text-right font-semibold text-red-600"
                                                };
                                                let icon_class = if is_income {
                                                    "w-8 h-8 rounded-full bg-emerald-100 text-emerald-600 flex items-center justify-center"
                                                } else {
                                                    "w-8 h-8 rounded-full bg-red-100 text-red-600 flex items-center justify-center"
                                                };
                                                let edit = {
                                                    let on_edit = on_edit.clone();
                                                    let id = tx.id;
                                                    Callback::from(move |_: MouseEvent| on_edit.emit(id))
                                                };
                                                let delete = {
                                                    let on_delete = on_delete.clone();
                                                    let id = tx.id;
                                                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                                };
                                                html! {
                                                    <tr key={tx.id} class="text-sm hover:bg-slate-50 transition-colors">
                                                        <td class="px-6 py-4">
                                                            <div class={icon_class}>
                                                                { if is_income { icon_arrow_up() } else { icon_arrow_down() } }
                                                            </div>
                                                        </td>
                                                        <td class="px-6 py-4 text-slate-500">{ format_date(tx.date) }</td>
                                                        <td class="px-6 py-4 text-slate-800">{ tx.description.as_deref().filter(|d| !d.is_empty()).unwrap_or("No description") }</td>
                                                        <td class="px-6 py-4">
                                                            <span class="bg-slate-100 text-slate-600 px-3 py-1 rounded-full text-[10px] font-bold">
                                                                { tx.category_name.as_deref().unwrap_or("No category") }
                                                            </span>
                                                        </td>
                                                        <td class={amount_class}>{ amount_label }</td>
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
                            <TransactionModal
                                toaster={props.toaster.clone()}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                        ModalState::Edit(tx) => html! {
                            <TransactionModal
                                toaster={props.toaster.clone()}
                                editing={Some(tx.clone())}
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
pub struct TransactionModalProps {
    pub toaster: Toaster,
    #[prop_or_default]
    pub editing: Option<Transaction>,
    #[prop_or_default]
    pub initial_type: Option<TransactionType>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

/// Create/edit dialog shared by the transactions page and the dashboard's
/// quick-add buttons. The category dropdown follows the selected type and a
/// still-valid selection survives a type switch.
#[function_component(TransactionModal)]
pub fn transaction_modal(props: &TransactionModalProps) -> Html {
    let amount = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|t| t.amount.to_string())
            .unwrap_or_default()
    });
    let tx_type = use_state(|| match (&props.editing, props.initial_type) {
        (Some(tx), _) => tx.transaction_type.as_str().to_string(),
        (None, Some(t)) => t.as_str().to_string(),
        (None, None) => "".to_string(),
    });
    let category = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|t| t.category_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let date = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|t| t.date.to_string())
            .unwrap_or_else(today_value)
    });
    let description = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|t| t.description.clone())
            .unwrap_or_default()
    });
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
        let amount = amount.clone();
        let tx_type = tx_type.clone();
        let category = category.clone();
        let date = date.clone();
        let description = description.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let toaster = props.toaster.clone();
        let on_saved = props.on_saved.clone();
        let editing_id = props.editing.as_ref().map(|t| t.id);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
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
            let date_val = match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    form_error.set(Some("Please choose a date".to_string()));
                    return;
                }
            };

            form_error.set(None);
            saving.set(true);

            let payload = TransactionPayload {
                amount: amount_val,
                transaction_type,
                category_id: category.parse::<i64>().ok(),
                date: date_val,
                description: description.trim().to_string(),
            };
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api::update_transaction(id, &payload).await,
                    None => api::create_transaction(&payload).await,
                };
                match result {
                    Ok(()) => {
                        toaster.success(if editing_id.is_some() {
                            "Transaction updated!"
                        } else {
                            "Transaction added!"
                        });
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("save transaction failed: {err}");
                        toaster.error(err.message_or("Failed to save transaction"));
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
            title={if is_editing { "Edit Transaction" } else { "Add Transaction" }}
            on_close={props.on_close.clone()}
        >
            <form class="space-y-4" onsubmit={on_submit}>
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
                        <label class="text-sm font-medium text-slate-700">{"Date"}</label>
                        <input
                            type="date"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*date).clone()}
                            oninput={{
                                let date = date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    date.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>

                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Description"}</label>
                    <textarea
                        rows="2"
                        class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        value={(*description).clone()}
                        oninput={{
                            let description = description.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                description.set(input.value());
                            })
                        }}
                    />
                </div>

                if let Some(msg) = &*form_error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={cancel} class="px-4 py-2 rounded-lg font-semibold text-sm bg-slate-200 text-slate-700 hover:bg-slate-300 transition-colors">{"Cancel"}</button>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-lg font-semibold text-sm bg-indigo-600 text-white hover:bg-indigo-700 transition-colors disabled:opacity-60">
                        { if *saving { "Saving..." } else if is_editing { "Update Transaction" } else { "Add Transaction" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}
