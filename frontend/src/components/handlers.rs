use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_storage::{LocalStorage, Storage};
use shared::{entries, ApiError, CalorieEntry, NewEntry, PhotoEstimate, User};
use std::str::FromStr;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

use crate::api;
use crate::components::utils;
use crate::{AuthTab, Model, Msg, PhotoState, SessionState};

// Session gate

pub fn check_session(ctx: &Context<Model>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::fetch_profile().await {
            Ok(user) => link.send_message(Msg::SessionChecked(user)),
            Err(err) => {
                log::warn!("session check failed: {err}");
                link.send_message(Msg::SessionChecked(None));
            }
        }
    });
}

pub fn handle_session_checked(
    model: &mut Model,
    ctx: &Context<Model>,
    user: Option<User>,
) -> bool {
    match user {
        Some(user) => {
            model.session = SessionState::Authenticated(user);
            ctx.link().send_message(Msg::LoadRecommendations);
            ctx.link().send_message(Msg::LoadEntries);
        }
        None => {
            model.session = SessionState::Anonymous;
        }
    }
    true
}

// Auth card

pub fn handle_switch_auth_tab(model: &mut Model, tab: AuthTab) -> bool {
    if model.auth_tab == tab {
        return false;
    }
    model.auth_tab = tab;
    true
}

pub fn handle_submit_login(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.auth_busy {
        return false;
    }
    let username = utils::input_value("login-username");
    let password = utils::input_value("login-password");
    model.auth_busy = true;

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::login(&username, &password).await {
            Ok(()) => utils::navigate_to("/home"),
            Err(err) => link.send_message(Msg::AuthFailed(err.user_message("Login failed"))),
        }
    });
    true
}

pub fn handle_submit_register(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.auth_busy {
        return false;
    }
    // Raw field strings go over the wire; only the username is trimmed and
    // the goal select is normalized to a known value.
    let goal = shared::Goal::from_str(&utils::select_value("reg-goal")).unwrap_or_default();
    let form = api::RegisterForm {
        username: utils::input_value("reg-username").trim().to_string(),
        password: utils::input_value("reg-password"),
        age: utils::input_value("reg-age"),
        height_cm: utils::input_value("reg-height"),
        weight_kg: utils::input_value("reg-weight"),
        goal: goal.to_string(),
    };
    model.auth_busy = true;

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::register(&form).await {
            Ok(()) => utils::navigate_to("/home"),
            Err(err) => {
                link.send_message(Msg::AuthFailed(err.user_message("Registration failed")))
            }
        }
    });
    true
}

pub fn handle_auth_failed(model: &mut Model, message: String) -> bool {
    utils::alert(&message);
    model.auth_busy = false;
    true
}

/// Fire-and-forget: the UI treats a failed logout as a logout and returns
/// to the landing page either way.
pub fn handle_logout() -> bool {
    spawn_local(async move {
        if let Err(err) = api::logout().await {
            log::warn!("logout request failed: {err}");
        }
        utils::navigate_to("/");
    });
    false
}

// Recommendations panel

pub fn handle_load_recommendations(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.recommendations_loading {
        return false;
    }
    model.recommendations_loading = true;

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::fetch_recommendations().await {
            Ok(recs) => link.send_message(Msg::RecommendationsLoaded(recs)),
            Err(err) => link.send_message(Msg::RecommendationsFailed(err)),
        }
    });
    true
}

pub fn handle_recommendations_loaded(model: &mut Model, recs: Vec<String>) -> bool {
    model.recommendations = recs;
    model.recommendations_error = None;
    model.recommendations_loading = false;
    true
}

/// Last-good recommendations stay on screen; the failure surfaces as an
/// inline note next to them.
pub fn handle_recommendations_failed(model: &mut Model, err: ApiError) -> bool {
    gloo_console::error!(format!("recommendations load failed: {err}"));
    model.recommendations_error = Some("Could not refresh recommendations".to_string());
    model.recommendations_loading = false;
    true
}

// Calorie log panel

pub fn handle_load_entries(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.entries_loading {
        return false;
    }
    model.entries_loading = true;

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::fetch_entries().await {
            Ok(items) => link.send_message(Msg::EntriesLoaded(items)),
            Err(err) => link.send_message(Msg::EntriesFailed(err)),
        }
    });
    true
}

pub fn handle_entries_loaded(model: &mut Model, mut items: Vec<CalorieEntry>) -> bool {
    entries::sort_newest_first(&mut items);
    model.entries = items;
    model.entries_error = None;
    model.entries_loading = false;
    true
}

/// Same policy as the recommendations panel: keep the last-good rows and
/// totals, show an inline error instead of wiping the list.
pub fn handle_entries_failed(model: &mut Model, err: ApiError) -> bool {
    log::error!("calorie log load failed: {err}");
    model.entries_error = Some("Could not refresh entries. Please try again.".to_string());
    model.entries_loading = false;
    true
}

pub fn handle_submit_manual_entry(model: &mut Model, ctx: &Context<Model>) -> bool {
    let entry = NewEntry::manual(&utils::input_value("cal-desc"), &utils::input_value("cal-num"));

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::add_entry(&entry).await {
            Ok(()) => link.send_message(Msg::ManualEntrySaved),
            Err(err) => link.send_message(Msg::ManualEntryFailed(err)),
        }
    });
    model.entries_error = None;
    true
}

pub fn handle_manual_entry_saved(_model: &mut Model, ctx: &Context<Model>) -> bool {
    utils::set_input_value("cal-desc", "");
    utils::set_input_value("cal-num", "");
    ctx.link().send_message(Msg::LoadEntries);
    false
}

/// Form fields keep their values so the user can correct and resubmit.
pub fn handle_manual_entry_failed(_model: &mut Model, err: ApiError) -> bool {
    utils::alert(&err.user_message("Could not add entry"));
    false
}

pub fn handle_request_delete_entry(
    _model: &mut Model,
    ctx: &Context<Model>,
    entry: CalorieEntry,
) -> bool {
    let prompt = format!(
        "Delete \"{}\" ({})?",
        entry.description,
        entries::format_kcal(entry.calories)
    );
    if !utils::confirm(&prompt) {
        return false;
    }

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::delete_entry(entry.id).await {
            Ok(()) => link.send_message(Msg::EntryDeleted),
            Err(err) => link.send_message(Msg::EntryDeleteFailed(err)),
        }
    });
    false
}

pub fn handle_entry_deleted(_model: &mut Model, ctx: &Context<Model>) -> bool {
    ctx.link().send_message(Msg::LoadEntries);
    false
}

pub fn handle_entry_delete_failed(_model: &mut Model, err: ApiError) -> bool {
    utils::alert(&err.user_message("Could not delete entry"));
    false
}

// Photo estimation

/// A new pick replaces the previous selection. Ignored while an upload is
/// in flight.
pub fn handle_photo_picked(model: &mut Model, file: GlooFile) -> bool {
    if matches!(model.photo, PhotoState::Uploading { .. }) {
        return false;
    }
    let preview_url = ObjectUrl::from(file.clone());
    model.photo = PhotoState::Selected { file, preview_url };
    model.photo_error = None;
    true
}

pub fn handle_set_photo_error(model: &mut Model, error: Option<String>) -> bool {
    model.photo_error = error;
    true
}

pub fn handle_upload_photo(model: &mut Model, ctx: &Context<Model>) -> bool {
    // Only a fresh selection or a failed attempt can start an upload;
    // `Uploading` ignores the trigger, which closes the double-submit gap.
    let (file, preview_url) = match std::mem::replace(&mut model.photo, PhotoState::Idle) {
        PhotoState::Selected { file, preview_url }
        | PhotoState::Failed {
            file, preview_url, ..
        } => (file, preview_url),
        other => {
            model.photo = other;
            return false;
        }
    };

    let link = ctx.link().clone();
    let upload_file = file.clone();
    spawn_local(async move {
        match api::upload_photo(&upload_file).await {
            Ok(estimate) => link.send_message(Msg::EstimateReceived(estimate)),
            Err(err) => {
                link.send_message(Msg::UploadFailed(err.user_message("Error analyzing image")))
            }
        }
    });

    model.photo = PhotoState::Uploading { file, preview_url };
    model.photo_error = None;
    true
}

pub fn handle_estimate_received(model: &mut Model, estimate: PhotoEstimate) -> bool {
    match std::mem::replace(&mut model.photo, PhotoState::Idle) {
        PhotoState::Uploading { file, preview_url } => {
            model.photo = PhotoState::Estimated {
                file,
                preview_url,
                estimate,
                saving: false,
            };
            true
        }
        other => {
            // Stale response after a discard; drop it.
            model.photo = other;
            false
        }
    }
}

pub fn handle_upload_failed(model: &mut Model, message: String) -> bool {
    match std::mem::replace(&mut model.photo, PhotoState::Idle) {
        PhotoState::Uploading { file, preview_url } => {
            model.photo = PhotoState::Failed {
                file,
                preview_url,
                message,
            };
            true
        }
        other => {
            model.photo = other;
            false
        }
    }
}

pub fn handle_save_estimate(model: &mut Model, ctx: &Context<Model>) -> bool {
    if let PhotoState::Estimated {
        estimate, saving, ..
    } = &mut model.photo
    {
        if *saving {
            return false;
        }
        *saving = true;

        let entry = NewEntry::from_estimate(estimate);
        let link = ctx.link().clone();
        spawn_local(async move {
            match api::add_entry(&entry).await {
                Ok(()) => link.send_message(Msg::EstimateSaved),
                Err(err) => link.send_message(Msg::EstimateSaveFailed(
                    err.user_message("Could not save entry"),
                )),
            }
        });
        true
    } else {
        false
    }
}

pub fn handle_estimate_saved(model: &mut Model, ctx: &Context<Model>) -> bool {
    utils::alert("Saved to tracker");
    model.photo = PhotoState::Idle;
    ctx.link().send_message(Msg::LoadEntries);
    true
}

/// The estimate stays on screen so saving can be retried.
pub fn handle_estimate_save_failed(model: &mut Model, message: String) -> bool {
    utils::alert(&message);
    if let PhotoState::Estimated { saving, .. } = &mut model.photo {
        *saving = false;
    }
    true
}

pub fn handle_discard_photo(model: &mut Model) -> bool {
    model.photo = PhotoState::Idle;
    model.photo_error = None;
    true
}

// Input events

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

pub fn handle_set_dragging(model: &mut Model, is_dragging: bool) -> bool {
    model.is_dragging = is_dragging;
    true
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match utils::first_image_file(&file_list) {
        Some(file) => ctx.link().send_message(Msg::PhotoPicked(file)),
        None if file_list.length() > 0 => {
            log::warn!("ignoring non-image files");
            ctx.link().send_message(Msg::SetPhotoError(Some(
                "Only image files can be analyzed.".to_string(),
            )));
        }
        None => {}
    }
}

// UI states

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let next = if model.theme == "light" { "dark" } else { "light" };
    utils::apply_theme(next);
    if let Err(err) = LocalStorage::set("theme", next) {
        log::warn!("could not persist theme: {err}");
    }
    model.theme = next.to_string();
    true
}
