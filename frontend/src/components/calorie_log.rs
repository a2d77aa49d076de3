use chrono::NaiveDate;
use shared::entries::{format_kcal, same_day_total, total_calories, TimeLabel};
use shared::CalorieEntry;
use yew::prelude::*;

use crate::components::utils::{self, debounce, render_inline_error};
use crate::{Model, Msg};

/// Calorie log: newest-first rows, a prominent same-day total, and the
/// manual entry form. Rows survive a failed refresh; only an inline error
/// is added.
pub fn render_calorie_log(model: &Model, ctx: &Context<Model>) -> Html {
    let today = utils::client_today();
    let today_total = same_day_total(&model.entries, today);
    let all_total = total_calories(&model.entries);

    html! {
        <section class="panel calorie-panel">
            <div class="panel-header">
                <h2><i class="fa-solid fa-fire"></i>{" Calorie Log"}</h2>
                <div
                    id="today-total"
                    class="today-total"
                    title={format!("All entries: {}", format_kcal(all_total))}
                >
                    <span class="total-label">{"Today: "}</span>
                    <span class="total-value">{ format_kcal(today_total) }</span>
                </div>
            </div>
            { render_inline_error(&model.entries_error) }
            { render_manual_form(model, ctx) }
            {
                if model.entries.is_empty() {
                    html! { <p class="empty-note">{"No entries yet. Add your first meal above."}</p> }
                } else {
                    html! {
                        <ul id="cal-items" class="cal-items">
                            { for model.entries.iter().map(|entry| render_entry_row(ctx, entry, today)) }
                        </ul>
                    }
                }
            }
        </section>
    }
}

fn render_manual_form(_model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="cal-manual-form" class="manual-form">
            <input id="cal-desc" type="text" placeholder="What did you eat?" />
            <input id="cal-num" type="number" min="0" placeholder="kcal" />
            <button
                id="cal-add-btn"
                class="add-btn"
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::SubmitManualEntry)
                })}
            >
                <i class="fa-solid fa-plus"></i>{" Add"}
            </button>
        </div>
    }
}

fn render_entry_row(ctx: &Context<Model>, entry: &CalorieEntry, today: NaiveDate) -> Html {
    let time_label = match TimeLabel::for_entry(entry, today) {
        TimeLabel::Today { time } => html! {
            <span class="entry-time">
                <i class="fa-solid fa-clock"></i>
                { format!(" {time}") }
            </span>
        },
        TimeLabel::OnDate { date, time } => html! {
            <span class="entry-time">
                <i class="fa-solid fa-calendar-day"></i>
                { format!(" {date} {time}") }
            </span>
        },
        TimeLabel::Unknown { raw } => html! {
            <span class="entry-time">{ raw }</span>
        },
    };

    let delete_target = entry.clone();
    html! {
        <li class="cal-item" key={entry.id.to_string()}>
            <span class="entry-desc">{ &entry.description }</span>
            <span class="entry-calories">{ format_kcal(entry.calories) }</span>
            { time_label }
            <button
                class="remove-btn"
                title="Delete this entry"
                onclick={ctx.link().callback(move |_| Msg::RequestDeleteEntry(delete_target.clone()))}
            >
                <i class="fa-solid fa-times"></i>
            </button>
        </li>
    }
}
