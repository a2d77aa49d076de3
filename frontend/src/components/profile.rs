use shared::User;
use yew::prelude::*;

use crate::{Model, Msg};

/// Welcome line and profile summary for the signed-in user. Missing
/// fields render as "-", matching what the backend may omit.
pub fn render_profile_bar(user: &User, ctx: &Context<Model>) -> Html {
    let age = user
        .age
        .map(|age| age.to_string())
        .unwrap_or_else(|| "-".to_string());
    let bmi = user
        .bmi
        .map(|bmi| format!("{bmi:.1}"))
        .unwrap_or_else(|| "-".to_string());
    let goal = user.goal.clone().unwrap_or_else(|| "-".to_string());

    html! {
        <div class="profile-bar">
            <div class="user-details">
                <span id="welcome" class="welcome">{ format!("Welcome, {}", user.username) }</span>
                <span id="profile-summary" class="profile-summary">
                    { format!("Age: {age} • BMI: {bmi} • Goal: {goal}") }
                </span>
            </div>
            <button
                id="logout-btn"
                class="logout-button"
                onclick={ctx.link().callback(|_| Msg::Logout)}
                title="Logout"
            >
                <i class="fa-solid fa-sign-out-alt"></i>
                {" Logout"}
            </button>
        </div>
    }
}
