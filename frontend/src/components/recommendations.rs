use yew::prelude::*;

use crate::components::utils::{debounce, render_inline_error};
use crate::{Model, Msg};

/// Diet recommendation list with a manual refresh. A failed refresh keeps
/// whatever was last shown and adds an inline note instead.
pub fn render_recommendations(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <section class="panel recommendations-panel">
            <div class="panel-header">
                <h2><i class="fa-solid fa-lightbulb"></i>{" Recommendations"}</h2>
                <button
                    id="refresh-recs"
                    class="refresh-btn"
                    title="Refresh recommendations"
                    disabled={model.recommendations_loading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::LoadRecommendations)
                    })}
                >
                    { if model.recommendations_loading {
                        html! { <i class="fa-solid fa-spinner fa-spin"></i> }
                    } else {
                        html! { <i class="fa-solid fa-rotate"></i> }
                    }}
                </button>
            </div>
            { render_inline_error(&model.recommendations_error) }
            {
                if model.recommendations.is_empty() {
                    html! { <p class="empty-note">{"No recommendations yet."}</p> }
                } else {
                    html! {
                        <ul id="recommendations" class="rec-list">
                            { for model.recommendations.iter().map(|rec| html! {
                                <li class="rec-item">{ rec }</li>
                            })}
                        </ul>
                    }
                }
            }
        </section>
    }
}
