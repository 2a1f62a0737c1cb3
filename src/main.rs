mod api;
mod auth;
mod chart;
mod format;
mod icons;
mod modal;
mod models;
mod pages;
mod toast;

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::auth::AuthScreen;
use crate::icons::{
    icon_bar_chart, icon_credit_card, icon_flag, icon_layout_grid, icon_log_out, icon_repeat,
    icon_wallet,
};
use crate::models::CategoryCache;
use crate::pages::budgets::BudgetsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::recurring::RecurringPage;
use crate::pages::reports::ReportsPage;
use crate::pages::savings::SavingsGoalsPage;
use crate::pages::transactions::TransactionsPage;
use crate::toast::{ToastHost, ToastList, Toaster};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Transactions,
    Reports,
    Budgets,
    Recurring,
    SavingsGoals,
}

#[derive(Clone, PartialEq)]
enum SessionState {
    Checking,
    SignedOut,
    SignedIn(models::User),
}

struct NavItem {
    label: &'static str,
    section: Section,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_section: Section,
    on_select: Callback<Section>,
    username: String,
    on_logout: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-slate-100">
            <div class="hidden md:flex">
                <Sidebar
                    active_section={props.active_section}
                    on_select={props.on_select.clone()}
                    username={props.username.clone()}
                    on_logout={props.on_logout.clone()}
                />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_section: Section,
    on_select: Callback<Section>,
    username: String,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            section: Section::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Transactions",
            section: Section::Transactions,
            icon: icon_credit_card,
        },
        NavItem {
            label: "Reports",
            section: Section::Reports,
            icon: icon_bar_chart,
        },
        NavItem {
            label: "Budgets",
            section: Section::Budgets,
            icon: icon_wallet,
        },
        NavItem {
            label: "Recurring",
            section: Section::Recurring,
            icon: icon_repeat,
        },
        NavItem {
            label: "Savings Goals",
            section: Section::SavingsGoals,
            icon: icon_flag,
        },
    ];

    let initial = props
        .username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <div class="w-[240px] h-screen bg-slate-900 p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-10 h-10 bg-indigo-600 rounded-full flex items-center justify-center text-white">
                    { icon_wallet() }
                </div>
                <span class="text-white text-xl font-black tracking-tight">{"Money Manager"}</span>
            </div>

            <nav class="flex-1 space-y-2">
                { for nav_items.iter().map(|item| {
                    let is_active = item.section == props.active_section;
                    let class_name = if is_active {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-indigo-600 text-white w-full"
                    } else {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                    };
                    let on_select = props.on_select.clone();
                    let section = item.section;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(section))}>
                            <span class="shrink-0">{ (item.icon)() }</span>
                            <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>

            <div class="mt-auto pt-4 border-t border-white/10 space-y-2">
                <div class="flex items-center gap-3 px-2 py-2">
                    <div class="w-9 h-9 bg-white/10 rounded-full flex items-center justify-center text-white text-sm font-bold">
                        { initial }
                    </div>
                    <span class="text-slate-200 text-sm font-medium truncate">{ &props.username }</span>
                </div>
                <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                    { icon_log_out() }
                    <span>{"Log Out"}</span>
                </button>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let active_section = use_state(|| Section::Dashboard);
    let session = use_state(|| SessionState::Checking);
    let categories = use_state(CategoryCache::default);
    let toasts = use_reducer(ToastList::default);
    let toast_seq = use_mut_ref(|| 0u64);
    let toaster = Toaster::new(toasts.clone(), toast_seq);

    let on_select = {
        let active_section = active_section.clone();
        Callback::from(move |section: Section| active_section.set(section))
    };

    // restore the server session on page load
    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::check_auth().await {
                        Ok(check) => {
                            let signed_in = if check.authenticated { check.user } else { None };
                            match signed_in {
                                Some(user) => session.set(SessionState::SignedIn(user)),
                                None => session.set(SessionState::SignedOut),
                            }
                        }
                        Err(err) => {
                            log::warn!("session check failed: {err}");
                            session.set(SessionState::SignedOut);
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    // categories change only with the account, so one fetch per sign-in
    // serves every dropdown
    {
        let categories = categories.clone();
        let signed_in = matches!(*session, SessionState::SignedIn(_));
        use_effect_with_deps(
            move |signed_in| {
                if *signed_in {
                    let categories = categories.clone();
                    spawn_local(async move {
                        match api::fetch_categories().await {
                            Ok(list) => categories.set(CategoryCache(Rc::new(list))),
                            Err(err) => log::warn!("categories load failed: {err}"),
                        }
                    });
                } else {
                    categories.set(CategoryCache::default());
                }
                || ()
            },
            signed_in,
        );
    }

    let on_authenticated = {
        let session = session.clone();
        let active_section = active_section.clone();
        Callback::from(move |user: models::User| {
            session.set(SessionState::SignedIn(user));
            active_section.set(Section::Dashboard);
        })
    };

    let on_logout = {
        let session = session.clone();
        let active_section = active_section.clone();
        let toaster = toaster.clone();
        Callback::from(move |_: ()| {
            let session = session.clone();
            let active_section = active_section.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                // the cookie may already be gone; drop the local session either way
                match api::logout().await {
                    Ok(()) => toaster.success("Logged out successfully"),
                    Err(err) => log::warn!("logout request failed: {err}"),
                }
                session.set(SessionState::SignedOut);
                active_section.set(Section::Dashboard);
            });
        })
    };

    let content = match *active_section {
        Section::Dashboard => html! {
            <DashboardPage toaster={toaster.clone()} on_navigate={on_select.clone()} />
        },
        Section::Transactions => html! { <TransactionsPage toaster={toaster.clone()} /> },
        Section::Reports => html! { <ReportsPage toaster={toaster.clone()} /> },
        Section::Budgets => html! { <BudgetsPage toaster={toaster.clone()} /> },
        Section::Recurring => html! { <RecurringPage toaster={toaster.clone()} /> },
        Section::SavingsGoals => html! { <SavingsGoalsPage toaster={toaster.clone()} /> },
    };

    html! {
        <>
            <ToastHost toasts={(*toasts).items.clone()} />
            { match &*session {
                SessionState::Checking => html! {
                    <div class="min-h-screen flex items-center justify-center bg-slate-100 text-slate-400">
                        {"Checking session..."}
                    </div>
                },
                SessionState::SignedOut => html! {
                    <AuthScreen toaster={toaster.clone()} on_authenticated={on_authenticated.clone()} />
                },
                SessionState::SignedIn(user) => html! {
                    <ContextProvider<CategoryCache> context={(*categories).clone()}>
                        <Layout
                            active_section={*active_section}
                            on_select={on_select.clone()}
                            username={user.username.clone()}
                            on_logout={on_logout.clone()}
                        >
                            { content }
                        </Layout>
                    </ContextProvider<CategoryCache>>
                },
            } }
        </>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
