use shared::Goal;
use yew::prelude::*;

use crate::components::utils::debounce;
use crate::{AuthTab, Model, Msg};

pub fn render_session_checking() -> Html {
    html! {
        <div class="session-checking">
            <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            <p>{"Checking session..."}</p>
        </div>
    }
}

/// Login/register card, shown whenever the profile fetch reports an
/// anonymous caller. Exactly one of the two forms is visible.
pub fn render_auth_card(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="auth-card" id="auth-card">
            <div class="auth-tabs">
                <button
                    id="show-login"
                    class={classes!("tab-btn", (model.auth_tab == AuthTab::Login).then_some("active"))}
                    onclick={link.callback(|_| Msg::SwitchAuthTab(AuthTab::Login))}
                >
                    {"Login"}
                </button>
                <button
                    id="show-register"
                    class={classes!("tab-btn", (model.auth_tab == AuthTab::Register).then_some("active"))}
                    onclick={link.callback(|_| Msg::SwitchAuthTab(AuthTab::Register))}
                >
                    {"Register"}
                </button>
            </div>
            {
                match model.auth_tab {
                    AuthTab::Login => render_login_form(model, ctx),
                    AuthTab::Register => render_register_form(model, ctx),
                }
            }
        </div>
    }
}

fn render_login_form(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="login-form" class="auth-form">
            <input id="login-username" type="text" placeholder="Username" />
            <input id="login-password" type="password" placeholder="Password" />
            <button
                id="login-btn"
                class="auth-btn"
                disabled={model.auth_busy}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::SubmitLogin)
                })}
            >
                { if model.auth_busy {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Logging in..."}</> }
                } else {
                    html! { {"Login"} }
                }}
            </button>
        </div>
    }
}

fn render_register_form(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="register-form" class="auth-form">
            <input id="reg-username" type="text" placeholder="Username" />
            <input id="reg-password" type="password" placeholder="Password" />
            <input id="reg-age" type="number" placeholder="Age" />
            <input id="reg-height" type="number" placeholder="Height (cm)" />
            <input id="reg-weight" type="number" placeholder="Weight (kg)" />
            <select id="reg-goal">
                { for Goal::options().map(|goal| html! {
                    <option value={goal.to_string()} selected={goal == Goal::default()}>
                        { goal.label() }
                    </option>
                })}
            </select>
            <button
                id="register-btn"
                class="auth-btn"
                disabled={model.auth_busy}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::SubmitRegister)
                })}
            >
                { if model.auth_busy {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Registering..."}</> }
                } else {
                    html! { {"Create account"} }
                }}
            </button>
        </div>
    }
}
