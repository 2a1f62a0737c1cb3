use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::chart::SpendingChart;
use crate::format::format_currency;
use crate::models::DashboardData;
use crate::pages::{page_shell, StatCard, StatIcon};
use crate::toast::Toaster;

#[derive(Properties, PartialEq)]
pub struct ReportsPageProps {
    pub toaster: Toaster,
}

#[function_component(ReportsPage)]
pub fn reports_page(props: &ReportsPageProps) -> Html {
    let data = use_state(|| None::<DashboardData>);
    let loading = use_state(|| true);

    {
        let data = data.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::fetch_dashboard().await {
                        Ok(d) => data.set(Some(d)),
                        Err(err) => {
                            log::warn!("reports load failed: {err}");
                            toaster.error(err.message_or("Failed to load dashboard data"));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let (balance, income, expense) = data
        .as_ref()
        .map(|d| (d.balance, d.total_income, d.total_expense))
        .unwrap_or((0.0, 0.0, 0.0));
    let spending = data
        .as_ref()
        .map(|d| d.category_spending.clone())
        .unwrap_or_default();
    let spent_total: f64 = spending.iter().map(|s| s.amount).sum();

    html! {
        { page_shell(
            "Reports",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="Current Balance" amount={balance} icon={StatIcon::Wallet} />
                        <StatCard title="Total Income" amount={income} icon={StatIcon::TrendingUp} />
                        <StatCard title="Total Expenses" amount={expense} icon={StatIcon::TrendingDown} />
                    </div>

                    <div class="bg-white rounded-xl shadow-sm border border-slate-200 p-6">
                        <h2 class="font-bold text-slate-800 mb-4">{"Spending by Category"}</h2>
                        { if *loading {
                            html! { <p class="text-slate-400">{"Loading..."}</p> }
                        } else {
                            html! { <SpendingChart series={spending.clone()} width={900} height={360} /> }
                        } }
                    </div>

                    { if !spending.is_empty() {
                        html! {
                            <div class="bg-white rounded-xl shadow-sm border border-slate-200 overflow-hidden">
                                <div class="px-6 py-4 border-b border-slate-100">
                                    <h2 class="font-bold text-slate-800">{"Category Breakdown"}</h2>
                                </div>
                                <table class="w-full text-left border-collapse">
                                    <thead>
                                        <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                            <th class="px-6 py-4 font-bold">{"Category"}</th>
                                            <th class="px-6 py-4 font-bold text-right">{"Spent"}</th>
                                            <th class="px-6 py-4 font-bold text-right">{"Share"}</th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-slate-100">
                                        { for spending.iter().map(|row| {
                                            let share = if spent_total > 0.0 {
                                                row.amount / spent_total * 100.0
                                            } else {
                                                0.0
                                            };
                                            html! {
                                                <tr key={row.category.clone()} class="text-sm">
                                                    <td class="px-6 py-4 text-slate-800 font-medium">{ &row.category }</td>
                                                    <td class="px-6 py-4 text-right text-slate-600">{ format_currency(row.amount) }</td>
                                                    <td class="px-6 py-4 text-right text-slate-500">{ format!("{share:.1}%") }</td>
                                                </tr>
                                            }
                                        }) }
                                    </tbody>
                                </table>
                            </div>
                        }
                    } else {
                        html! {}
                    } }
                </>
            }
        ) }
    }
}
