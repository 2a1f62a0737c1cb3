pub mod budgets;
pub mod dashboard;
pub mod recurring;
pub mod reports;
pub mod savings;
pub mod transactions;

use yew::prelude::*;

use crate::format::format_currency;
use crate::icons::{icon_trending_down, icon_trending_up, icon_wallet};

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-slate-200">
                <h1 class="text-2xl font-bold text-slate-800">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    Wallet,
    TrendingUp,
    TrendingDown,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: f64,
    pub icon: StatIcon,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white p-6 rounded-xl shadow-sm border border-slate-200 flex justify-between items-start">
            <div>
                <p class="text-slate-500 text-[10px] font-bold mb-1 uppercase tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-slate-800 tracking-tight">{ format_currency(props.amount) }</h3>
            </div>
            <div class="p-3 bg-indigo-50 text-indigo-600 rounded-xl">
                {
                    match props.icon {
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::TrendingUp => icon_trending_up(),
                        StatIcon::TrendingDown => icon_trending_down(),
                    }
                }
            </div>
        </div>
    }
}

/// Native confirm dialog; a missing window counts as a refusal.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
