use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::models::User;
use crate::toast::Toaster;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Signup,
}

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub toaster: Toaster,
    pub on_authenticated: Callback<User>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let mode = use_state(|| AuthMode::Login);
    let username = use_state(|| "".to_string());
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let form_error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_submit = {
        let mode = mode.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let form_error = form_error.clone();
        let submitting = submitting.clone();
        let toaster = props.toaster.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let username_val = username.trim().to_string();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            match *mode {
                AuthMode::Login => {
                    if username_val.is_empty() || password_val.is_empty() {
                        form_error.set(Some("Username and password are required".to_string()));
                        return;
                    }
                }
                AuthMode::Signup => {
                    if username_val.is_empty() || email_val.is_empty() || password_val.is_empty() {
                        form_error.set(Some("All fields are required".to_string()));
                        return;
                    }
                    if password_val.len() < 6 {
                        form_error
                            .set(Some("Password must be at least 6 characters long".to_string()));
                        return;
                    }
                }
            }

            form_error.set(None);
            submitting.set(true);

            let is_login = *mode == AuthMode::Login;
            let submitting = submitting.clone();
            let toaster = toaster.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                let result = if is_login {
                    api::login(&username_val, &password_val).await
                } else {
                    api::signup(&username_val, &email_val, &password_val).await
                };
                match result {
                    Ok(user) => {
                        toaster.success(if is_login {
                            "Login successful!"
                        } else {
                            "Account created successfully!"
                        });
                        on_authenticated.emit(user);
                    }
                    Err(err) => {
                        log::warn!("auth request failed: {err}");
                        toaster.error(err.message_or(if is_login {
                            "Login failed. Please try again."
                        } else {
                            "Signup failed. Please try again."
                        }));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let form_error = form_error.clone();
        Callback::from(move |_| {
            mode.set(match *mode {
                AuthMode::Login => AuthMode::Signup,
                AuthMode::Signup => AuthMode::Login,
            });
            form_error.set(None);
        })
    };

    let is_login = *mode == AuthMode::Login;

    html! {
        <div class="min-h-screen flex items-center justify-center bg-slate-100 p-4">
            <div class="w-full max-w-md bg-white border border-slate-200 rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-slate-800">{"Money Manager"}</h1>
                    <p class="text-sm text-slate-500 mt-2">
                        { if is_login { "Sign in to your account." } else { "Create an account to get started." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">
                            { if is_login { "Username or Email" } else { "Username" } }
                        </label>
                        <input
                            type="text"
                            class="w-full px-4 py-2 border border-slate-300 rounded-lg text-slate-800 focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*username).clone()}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if !is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-slate-700">{"Email"}</label>
                            <input
                                type="email"
                                class="w-full px-4 py-2 border border-slate-300 rounded-lg text-slate-800 focus:outline-none focus:ring-2 focus:ring-indigo-500"
                                value={(*email).clone()}
                                oninput={{
                                    let email = email.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        email.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    }

                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 border border-slate-300 rounded-lg text-slate-800 focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if let Some(msg) = &*form_error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-indigo-600 text-white py-2 rounded-lg font-semibold hover:bg-indigo-700 transition-colors disabled:opacity-60"
                        disabled={*submitting}
                    >
                        { if *submitting { "Please wait..." } else if is_login { "Login" } else { "Sign Up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-slate-500">
                    { if is_login { "No account yet?" } else { "Already have an account?" } }
                    <button class="ml-2 text-indigo-600 font-semibold" onclick={toggle_mode}>
                        { if is_login { "Sign Up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
