//! Auth Panel Component
//!
//! Login and registration forms behind two tabs.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::SignupRequest;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    Login,
    Register,
}

#[component]
pub fn AuthPanel() -> impl IntoView {
    let (tab, set_tab) = signal(AuthTab::Login);

    let tab_class = move |which: AuthTab| {
        if tab.get() == which { "auth-tab active" } else { "auth-tab" }
    };

    view! {
        <section class="auth-container">
            <div class="auth-tabs">
                <button class=move || tab_class(AuthTab::Login) on:click=move |_| set_tab.set(AuthTab::Login)>
                    "Login"
                </button>
                <button class=move || tab_class(AuthTab::Register) on:click=move |_| set_tab.set(AuthTab::Register)>
                    "Register"
                </button>
            </div>
            <Show
                when=move || tab.get() == AuthTab::Login
                fallback=move || view! { <RegisterForm on_registered=move || set_tab.set(AuthTab::Login) /> }
            >
                <LoginForm />
            </Show>
        </section>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let (user, pass) = (username.get(), password.get());
        ctx.run(async move {
            if state.login(&user, &pass).await {
                set_password.set(String::new());
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            <input
                type="text"
                placeholder="Username"
                prop:value=move || username.get()
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="btn primary">"Login"</button>
        </form>
    }
}

#[component]
fn RegisterForm(on_registered: impl Fn() + Send + Sync + Copy + 'static) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let form = RwSignal::new(SignupRequest::default());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = ctx.state();
        let request = form.get();
        ctx.run(async move {
            if state.register(&request).await {
                form.set(SignupRequest::default());
                on_registered();
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            {signup_input(form, "text", "Username", |f| &f.username, |f, v| f.username = v)}
            {signup_input(form, "email", "Email", |f| &f.email, |f, v| f.email = v)}
            {signup_input(form, "password", "Password", |f| &f.password, |f, v| f.password = v)}
            {signup_input(form, "text", "First name", |f| &f.first_name, |f, v| f.first_name = v)}
            {signup_input(form, "text", "Last name", |f| &f.last_name, |f, v| f.last_name = v)}
            <button type="submit" class="btn primary">"Register"</button>
        </form>
    }
}

/// One text input bound to one field of the signup form
fn signup_input(
    form: RwSignal<SignupRequest>,
    kind: &'static str,
    placeholder: &'static str,
    get: fn(&SignupRequest) -> &String,
    set: fn(&mut SignupRequest, String),
) -> impl IntoView {
    view! {
        <input
            type=kind
            placeholder=placeholder
            prop:value=move || form.with(|f| get(f).clone())
            on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
        />
    }
}
