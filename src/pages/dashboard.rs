use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::chart::SpendingChart;
use crate::format::{format_currency, format_date};
use crate::icons::icon_plus;
use crate::models::{DashboardData, TransactionType};
use crate::pages::transactions::TransactionModal;
use crate::pages::{page_shell, StatCard, StatIcon};
use crate::toast::Toaster;
use crate::Section;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub toaster: Toaster,
    pub on_navigate: Callback<Section>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let data = use_state(|| None::<DashboardData>);
    let loading = use_state(|| true);
    let quick_add = use_state(|| None::<TransactionType>);
    let refresh = use_state(|| 0u32);

    {
        let data = data.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    match api::fetch_dashboard().await {
                        Ok(fetched) => data.set(Some(fetched)),
                        Err(err) => {
                            log::warn!("dashboard load failed: {err}");
                            toaster.error(err.message_or("Failed to load dashboard data"));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *refresh,
        );
    }

    let on_saved = {
        let quick_add = quick_add.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            quick_add.set(None);
            refresh.set(*refresh + 1);
        })
    };

    let close_modal = {
        let quick_add = quick_add.clone();
        Callback::from(move |_: ()| quick_add.set(None))
    };

    let add_income = {
        let quick_add = quick_add.clone();
        Callback::from(move |_: MouseEvent| quick_add.set(Some(TransactionType::Income)))
    };

    let add_expense = {
        let quick_add = quick_add.clone();
        Callback::from(move |_: MouseEvent| quick_add.set(Some(TransactionType::Expense)))
    };

    let view_all = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Section::Transactions))
    };

    let (balance, total_income, total_expense) = match &*data {
        Some(d) => (d.balance, d.total_income, d.total_expense),
        None => (0.0, 0.0, 0.0),
    };
    let recent = data
        .as_ref()
        .map(|d| d.recent_transactions.clone())
        .unwrap_or_default();
    let spending = data
        .as_ref()
        .map(|d| d.category_spending.clone())
        .unwrap_or_default();

    html! {
        { page_shell(
            "Dashboard",
            html! {
                <div class="flex items-center gap-2">
                    <button onclick={add_income} class="flex items-center gap-2 bg-emerald-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-emerald-700 transition-colors">
                        { icon_plus() }
                        {"Add Income"}
                    </button>
                    <button onclick={add_expense} class="flex items-center gap-2 bg-red-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-red-700 transition-colors">
                        { icon_plus() }
                        {"Add Expense"}
                    </button>
                </div>
            },
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="Current Balance" amount={balance} icon={StatIcon::Wallet} />
                        <StatCard title="Total Income" amount={total_income} icon={StatIcon::TrendingUp} />
                        <StatCard title="Total Expenses" amount={total_expense} icon={StatIcon::TrendingDown} />
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden">
                            <div class="p-6 flex justify-between items-center border-b border-slate-200">
                                <h3 class="font-bold text-slate-800 text-lg">{"Recent Transactions"}</h3>
                                <button onclick={view_all} class="text-sm text-indigo-600 font-semibold hover:text-indigo-700">{"View All"}</button>
                            </div>
                            { if *loading {
                                html! { <p class="p-8 text-center text-slate-400">{"Loading..."}</p> }
                            } else if recent.is_empty() {
                                html! {
                                    <div class="p-10 text-center">
                                        <p class="font-semibold text-slate-600">{"No transactions yet"}</p>
                                        <p class="text-sm text-slate-400 mt-1">{"Start by adding your first transaction"}</p>
                                    </div>
                                }
                            } else {
                                html! {
                                    <div class="divide-y divide-slate-100">
                                        { for recent.iter().map(|tx| {
                                            let is_income = tx.transaction_type == TransactionType::Income;
                                            let amount_label = if is_income {
                                                format!("+{}", format_currency(tx.amount))
                                            } else {
                                                format!("-{}", format_currency(tx.amount))
                                            };
                                            let amount_class = if is_income {
                                                "font-semibold text-emerald-600"
                                            } else {
                                                "font-semibold text-red-600"
                                            };
                                            html! {
                                                <div key={tx.id} class="px-6 py-4 flex items-center justify-between hover:bg-slate-50 transition-colors">
                                                    <div>
                                                        <p class="text-sm font-medium text-slate-800">
                                                            { tx.description.as_deref().filter(|d| !d.is_empty()).unwrap_or("No description") }
                                                        </p>
                                                        <p class="text-xs text-slate-400 mt-1">
                                                            { format!("{} \u{2022} {}", tx.category_name.as_deref().unwrap_or("No category"), format_date(tx.date)) }
                                                        </p>
                                                    </div>
                                                    <span class={amount_class}>{ amount_label }</span>
                                                </div>
                                            }
                                        }) }
                                    </div>
                                }
                            } }
                        </div>

                        <div class="bg-white rounded-xl shadow-sm border border-slate-200 p-6">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Spending by Category"}</h3>
                            <SpendingChart series={spending} />
                        </div>
                    </div>

                    { if let Some(tx_type) = *quick_add {
                        html! {
                            <TransactionModal
                                toaster={props.toaster.clone()}
                                initial_type={Some(tx_type)}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        }
                    } else {
                        html! {}
                    } }
                </>
            }
        ) }
    }
}
