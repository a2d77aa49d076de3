use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-utensils"></i> {" Calorie Tracker"}</h1>
            <p class="subtitle">{"Log meals, get recommendations, estimate calories from a photo"}</p>
        </header>
    }
}
