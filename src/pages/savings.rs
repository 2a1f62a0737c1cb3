use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, SavingsGoalPayload};
use crate::format::{format_currency, format_date, parse_non_negative_amount, parse_positive_amount};
use crate::icons::{icon_pencil, icon_plus, icon_trash};
use crate::modal::Modal;
use crate::models::{Priority, SavingsGoal};
use crate::pages::{confirm, page_shell};
use crate::toast::Toaster;

#[derive(Clone, PartialEq)]
enum ModalState {
    Closed,
    Create,
    Edit(SavingsGoal),
    Contribute(SavingsGoal),
}

fn priority_badge(priority: Priority) -> Html {
    let class = match priority {
        Priority::Low => "bg-slate-100 text-slate-600 px-3 py-1 rounded-full text-[10px] font-bold",
        Priority::Medium => "bg-amber-100 text-amber-600 px-3 py-1 rounded-full text-[10px] font-bold",
        Priority::High => "bg-red-100 text-red-600 px-3 py-1 rounded-full text-[10px] font-bold",
    };
    html! { <span class={class}>{ priority.label() }</span> }
}

#[derive(Properties, PartialEq)]
pub struct SavingsGoalsPageProps {
    pub toaster: Toaster,
}

#[function_component(SavingsGoalsPage)]
pub fn savings_goals_page(props: &SavingsGoalsPageProps) -> Html {
    let goals = use_state(|| Vec::<SavingsGoal>::new());
    let loading = use_state(|| true);
    let modal = use_state(|| ModalState::Closed);
    let refresh = use_state(|| 0u32);

    {
        let goals = goals.clone();
        let loading = loading.clone();
        let toaster = props.toaster.clone();
        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    match api::fetch_savings_goals().await {
                        Ok(list) => goals.set(list),
                        Err(err) => {
                            log::warn!("savings goals load failed: {err}");
                            toaster.error(err.message_or("Failed to load savings goals"));
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
            if !confirm("Are you sure you want to delete this savings goal?") {
                return;
            }
            let toaster = toaster.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_savings_goal(id).await {
                    Ok(()) => {
                        toaster.success("Savings goal deleted!");
                        reload.emit(());
                    }
                    Err(err) => {
                        log::warn!("delete savings goal {id} failed: {err}");
                        toaster.error(err.message_or("Failed to delete savings goal"));
                    }
                }
            });
        })
    };

    html! {
        { page_shell(
            "Savings Goals",
            html! {
                <button onclick={open_create} class="flex items-center gap-2 bg-indigo-600 text-white px-4 py-2 rounded-xl font-bold text-sm hover:bg-indigo-700 transition-colors">
                    { icon_plus() }
                    {"Add Goal"}
                </button>
            },
            html! {
                <>
                    { if *loading {
                        html! { <p class="text-slate-400">{"Loading..."}</p> }
                    } else if goals.is_empty() {
                        html! {
                            <div class="bg-white rounded-xl shadow-sm border border-slate-200 px-6 py-12 text-center">
                                <p class="font-semibold text-slate-600">{"No savings goals yet"}</p>
                                <p class="text-sm text-slate-400 mt-1">{"Create a goal to start putting money aside"}</p>
                            </div>
                        }
                    } else {
                        html! {
                            <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-6">
                                { for goals.iter().map(|goal| {
                                    let progress = goal.progress_percent();
                                    let contribute = {
                                        let modal = modal.clone();
                                        let goal = goal.clone();
                                        Callback::from(move |_: MouseEvent| modal.set(ModalState::Contribute(goal.clone())))
                                    };
                                    let edit = {
                                        let modal = modal.clone();
                                        let goal = goal.clone();
                                        Callback::from(move |_: MouseEvent| modal.set(ModalState::Edit(goal.clone())))
                                    };
                                    let delete = {
                                        let on_delete = on_delete.clone();
                                        let id = goal.id;
                                        Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                    };
                                    html! {
                                        <div key={goal.id} class="bg-white rounded-xl shadow-sm border border-slate-200 p-6 flex flex-col gap-4">
                                            <div class="flex items-start justify-between gap-3">
                                                <div>
                                                    <h3 class="font-bold text-slate-800">{ &goal.name }</h3>
                                                    { if let Some(desc) = goal.description.as_deref().filter(|d| !d.is_empty()) {
                                                        html! { <p class="text-sm text-slate-400 mt-1">{ desc }</p> }
                                                    } else {
                                                        html! {}
                                                    } }
                                                </div>
                                                <div class="flex items-center gap-2">
                                                    { if goal.is_achieved() {
                                                        html! { <span class="bg-emerald-100 text-emerald-600 px-3 py-1 rounded-full text-[10px] font-bold">{"Achieved"}</span> }
                                                    } else {
                                                        html! {}
                                                    } }
                                                    { priority_badge(goal.priority) }
                                                </div>
                                            </div>
                                            <div>
                                                <div class="flex justify-between text-sm mb-1">
                                                    <span class="text-slate-500">
                                                        { format!("{} of {}", format_currency(goal.current_amount), format_currency(goal.target_amount)) }
                                                    </span>
                                                    <span class="font-semibold text-slate-700">{ format!("{progress:.1}%") }</span>
                                                </div>
                                                <div class="h-2 bg-slate-100 rounded-full overflow-hidden">
                                                    <div
                                                        class="h-full bg-indigo-500 rounded-full"
                                                        style={format!("width: {progress:.1}%")}
                                                    ></div>
                                                </div>
                                            </div>
                                            { if let Some(date) = goal.target_date {
                                                html! { <p class="text-xs text-slate-400">{ format!("Target: {}", format_date(date)) }</p> }
                                            } else {
                                                html! {}
                                            } }
                                            <div class="flex items-center justify-between pt-1">
                                                <button onclick={contribute} class="text-sm font-semibold text-indigo-600 hover:text-indigo-700 transition-colors">
                                                    {"Contribute"}
                                                </button>
                                                <div class="flex gap-2 text-slate-400">
                                                    <button onclick={edit} title="Edit" class="p-1 hover:text-indigo-600 transition-colors">{ icon_pencil() }</button>
                                                    <button onclick={delete} title="Delete" class="p-1 hover:text-red-600 transition-colors">{ icon_trash() }</button>
                                                </div>
                                            </div>
                                        </div>
                                    }
                                }) }
                            </div>
                        }
                    } }

                    { match &*modal {
                        ModalState::Closed => html! {},
                        ModalState::Create => html! {
                            <GoalModal
                                toaster={props.toaster.clone()}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                        ModalState::Edit(goal) => html! {
                            <GoalModal
                                toaster={props.toaster.clone()}
                                editing={Some(goal.clone())}
                                on_close={close_modal.clone()}
                                on_saved={on_saved.clone()}
                            />
                        },
                        ModalState::Contribute(goal) => html! {
                            <ContributeModal
                                toaster={props.toaster.clone()}
                                goal={goal.clone()}
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
pub struct GoalModalProps {
    pub toaster: Toaster,
    #[prop_or_default]
    pub editing: Option<SavingsGoal>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

#[function_component(GoalModal)]
pub fn goal_modal(props: &GoalModalProps) -> Html {
    let name = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|g| g.name.clone())
            .unwrap_or_default()
    });
    let target = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|g| g.target_amount.to_string())
            .unwrap_or_default()
    });
    let current = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|g| g.current_amount.to_string())
            .unwrap_or_else(|| "0".to_string())
    });
    let target_date = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|g| g.target_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let description = use_state(|| {
        props
            .editing
            .as_ref()
            .and_then(|g| g.description.clone())
            .unwrap_or_default()
    });
    let priority = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|g| g.priority.as_str().to_string())
            .unwrap_or_else(|| "medium".to_string())
    });
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = {
        let name = name.clone();
        let target = target.clone();
        let current = current.clone();
        let target_date = target_date.clone();
        let description = description.clone();
        let priority = priority.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let toaster = props.toaster.clone();
        let on_saved = props.on_saved.clone();
        let editing_id = props.editing.as_ref().map(|g| g.id);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let name_val = name.trim().to_string();
            if name_val.is_empty() {
                form_error.set(Some("Please enter a goal name".to_string()));
                return;
            }
            let target_val = match parse_positive_amount(&target) {
                Some(v) => v,
                None => {
                    form_error.set(Some("Target amount must be a positive number".to_string()));
                    return;
                }
            };
            let current_val = match parse_non_negative_amount(&current) {
                Some(v) => v,
                None => {
                    form_error.set(Some("Current amount cannot be negative".to_string()));
                    return;
                }
            };
            let date_val = target_date.trim().to_string();
            let target_date_val = if date_val.is_empty() {
                None
            } else {
                match NaiveDate::parse_from_str(&date_val, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        form_error.set(Some("Target date is not a valid date".to_string()));
                        return;
                    }
                }
            };
            let priority_val = match Priority::parse(&priority) {
                Some(p) => p,
                None => Priority::Medium,
            };

            form_error.set(None);
            saving.set(true);

            let payload = SavingsGoalPayload {
                name: name_val,
                target_amount: target_val,
                current_amount: current_val,
                target_date: target_date_val,
                description: description.trim().to_string(),
                priority: priority_val,
            };
            let toaster = toaster.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api::update_savings_goal(id, &payload).await,
                    None => api::create_savings_goal(&payload).await,
                };
                match result {
                    Ok(()) => {
                        toaster.success(if editing_id.is_some() {
                            "Savings goal updated!"
                        } else {
                            "Savings goal added!"
                        });
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("save savings goal failed: {err}");
                        toaster.error(err.message_or("Failed to save savings goal"));
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
            title={if is_editing { "Edit Savings Goal" } else { "Add Savings Goal" }}
            on_close={props.on_close.clone()}
        >
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Goal Name"}</label>
                    <input
                        type="text"
                        class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        value={(*name).clone()}
                        oninput={{
                            let name = name.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                name.set(input.value());
                            })
                        }}
                    />
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Target Amount"}</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*target).clone()}
                            oninput={{
                                let target = target.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    target.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Current Amount"}</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*current).clone()}
                            oninput={{
                                let current = current.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    current.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Target Date (optional)"}</label>
                        <input
                            type="date"
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*target_date).clone()}
                            oninput={{
                                let target_date = target_date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    target_date.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Priority"}</label>
                        <select
                            class="w-full px-3 py-2 border border-slate-300 rounded-lg bg-white focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            onchange={{
                                let priority = priority.clone();
                                Callback::from(move |e: Event| {
                                    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    priority.set(select.value());
                                })
                            }}
                        >
                            <option value="low" selected={*priority == "low"}>{"Low"}</option>
                            <option value="medium" selected={*priority == "medium"}>{"Medium"}</option>
                            <option value="high" selected={*priority == "high"}>{"High"}</option>
                        </select>
                    </div>
                </div>

                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Description (optional)"}</label>
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
                    ></textarea>
                </div>

                if let Some(msg) = &*form_error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={cancel} class="px-4 py-2 rounded-lg font-semibold text-sm bg-slate-200 text-slate-700 hover:bg-slate-300 transition-colors">{"Cancel"}</button>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-lg font-semibold text-sm bg-indigo-600 text-white hover:bg-indigo-700 transition-colors disabled:opacity-60">
                        { if *saving { "Saving..." } else if is_editing { "Update Goal" } else { "Add Goal" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContributeModalProps {
    pub toaster: Toaster,
    pub goal: SavingsGoal,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

#[function_component(ContributeModal)]
pub fn contribute_modal(props: &ContributeModalProps) -> Html {
    let amount = use_state(|| "".to_string());
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = {
        let amount = amount.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let toaster = props.toaster.clone();
        let on_saved = props.on_saved.clone();
        let goal_id = props.goal.id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            // No request goes out until the amount passes validation.
            let amount_val = match parse_positive_amount(&amount) {
                Some(v) => v,
                None => {
                    form_error.set(Some("Contribution must be a positive number".to_string()));
                    return;
                }
            };
            form_error.set(None);
            saving.set(true);

            let toaster = toaster.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api::contribute_to_goal(goal_id, amount_val).await {
                    Ok(()) => {
                        toaster.success("Contribution added!");
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::warn!("contribute to goal {goal_id} failed: {err}");
                        toaster.error(err.message_or("Failed to add contribution"));
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

    let progress = props.goal.progress_percent();

    html! {
        <Modal title={"Add Contribution"} on_close={props.on_close.clone()}>
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="bg-slate-50 rounded-lg p-4">
                    <p class="font-semibold text-slate-800">{ &props.goal.name }</p>
                    <p class="text-sm text-slate-500 mt-1">
                        { format!(
                            "{} of {} ({progress:.1}%)",
                            format_currency(props.goal.current_amount),
                            format_currency(props.goal.target_amount),
                        ) }
                    </p>
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

                if let Some(msg) = &*form_error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={cancel} class="px-4 py-2 rounded-lg font-semibold text-sm bg-slate-200 text-slate-700 hover:bg-slate-300 transition-colors">{"Cancel"}</button>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-lg font-semibold text-sm bg-indigo-600 text-white hover:bg-indigo-700 transition-colors disabled:opacity-60">
                        { if *saving { "Saving..." } else { "Add Contribution" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}
