use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_storage::{LocalStorage, Storage};
use shared::{ApiError, CalorieEntry, PhotoEstimate, User};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

mod api;
mod components;

use components::{
    auth, calorie_log, handlers, header, photo, profile, recommendations, theme_toggle, utils,
};

// Models

#[derive(Clone, PartialEq)]
pub enum SessionState {
    Checking,
    Anonymous,
    Authenticated(User),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

/// Photo estimation flow. One variant at a time; `update` handles every
/// transition exhaustively, so a second upload while one is in flight is
/// unrepresentable rather than merely discouraged.
pub enum PhotoState {
    Idle,
    Selected {
        file: GlooFile,
        preview_url: ObjectUrl,
    },
    Uploading {
        file: GlooFile,
        preview_url: ObjectUrl,
    },
    Estimated {
        file: GlooFile,
        preview_url: ObjectUrl,
        estimate: PhotoEstimate,
        saving: bool,
    },
    Failed {
        file: GlooFile,
        preview_url: ObjectUrl,
        message: String,
    },
}

// Yew msg components
pub enum Msg {
    // Session gate
    SessionChecked(Option<User>),

    // Auth card
    SwitchAuthTab(AuthTab),
    SubmitLogin,
    SubmitRegister,
    AuthFailed(String),
    Logout,

    // Recommendations panel
    LoadRecommendations,
    RecommendationsLoaded(Vec<String>),
    RecommendationsFailed(ApiError),

    // Calorie log panel
    LoadEntries,
    EntriesLoaded(Vec<CalorieEntry>),
    EntriesFailed(ApiError),
    SubmitManualEntry,
    ManualEntrySaved,
    ManualEntryFailed(ApiError),
    RequestDeleteEntry(CalorieEntry),
    EntryDeleted,
    EntryDeleteFailed(ApiError),

    // Photo estimation
    PhotoPicked(GlooFile),
    SetPhotoError(Option<String>),
    UploadPhoto,
    EstimateReceived(PhotoEstimate),
    UploadFailed(String),
    SaveEstimate,
    EstimateSaved,
    EstimateSaveFailed(String),
    DiscardPhoto,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
    SetDragging(bool),

    // UI states
    ToggleTheme,
}

// Main component
pub struct Model {
    session: SessionState,
    auth_tab: AuthTab,
    auth_busy: bool,

    recommendations: Vec<String>,
    recommendations_error: Option<String>,
    recommendations_loading: bool,

    entries: Vec<CalorieEntry>,
    entries_error: Option<String>,
    entries_loading: bool,

    photo: PhotoState,
    photo_error: Option<String>,
    is_dragging: bool,

    theme: String,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let theme: String = LocalStorage::get("theme").unwrap_or_else(|_| "light".to_string());
        utils::apply_theme(&theme);

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let paste_listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });

        handlers::check_session(ctx);

        Self {
            session: SessionState::Checking,
            auth_tab: AuthTab::Login,
            auth_busy: false,
            recommendations: Vec::new(),
            recommendations_error: None,
            recommendations_loading: false,
            entries: Vec::new(),
            entries_error: None,
            entries_loading: false,
            photo: PhotoState::Idle,
            photo_error: None,
            is_dragging: false,
            theme,
            paste_listener: Some(paste_listener),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Session gate
            Msg::SessionChecked(user) => handlers::handle_session_checked(self, ctx, user),

            // Auth card
            Msg::SwitchAuthTab(tab) => handlers::handle_switch_auth_tab(self, tab),
            Msg::SubmitLogin => handlers::handle_submit_login(self, ctx),
            Msg::SubmitRegister => handlers::handle_submit_register(self, ctx),
            Msg::AuthFailed(message) => handlers::handle_auth_failed(self, message),
            Msg::Logout => handlers::handle_logout(),

            // Recommendations panel
            Msg::LoadRecommendations => handlers::handle_load_recommendations(self, ctx),
            Msg::RecommendationsLoaded(recs) => handlers::handle_recommendations_loaded(self, recs),
            Msg::RecommendationsFailed(err) => handlers::handle_recommendations_failed(self, err),

            // Calorie log panel
            Msg::LoadEntries => handlers::handle_load_entries(self, ctx),
            Msg::EntriesLoaded(items) => handlers::handle_entries_loaded(self, items),
            Msg::EntriesFailed(err) => handlers::handle_entries_failed(self, err),
            Msg::SubmitManualEntry => handlers::handle_submit_manual_entry(self, ctx),
            Msg::ManualEntrySaved => handlers::handle_manual_entry_saved(self, ctx),
            Msg::ManualEntryFailed(err) => handlers::handle_manual_entry_failed(self, err),
            Msg::RequestDeleteEntry(entry) => {
                handlers::handle_request_delete_entry(self, ctx, entry)
            }
            Msg::EntryDeleted => handlers::handle_entry_deleted(self, ctx),
            Msg::EntryDeleteFailed(err) => handlers::handle_entry_delete_failed(self, err),

            // Photo estimation
            Msg::PhotoPicked(file) => handlers::handle_photo_picked(self, file),
            Msg::SetPhotoError(error) => handlers::handle_set_photo_error(self, error),
            Msg::UploadPhoto => handlers::handle_upload_photo(self, ctx),
            Msg::EstimateReceived(estimate) => handlers::handle_estimate_received(self, estimate),
            Msg::UploadFailed(message) => handlers::handle_upload_failed(self, message),
            Msg::SaveEstimate => handlers::handle_save_estimate(self, ctx),
            Msg::EstimateSaved => handlers::handle_estimate_saved(self, ctx),
            Msg::EstimateSaveFailed(message) => handlers::handle_estimate_save_failed(self, message),
            Msg::DiscardPhoto => handlers::handle_discard_photo(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
            Msg::SetDragging(is_dragging) => handlers::handle_set_dragging(self, is_dragging),

            // UI states
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }
                { theme_toggle::render_theme_toggle(&self.theme, ctx.link()) }

                <main class="main-content">
                {
                    match &self.session {
                        SessionState::Checking => auth::render_session_checking(),
                        SessionState::Anonymous => auth::render_auth_card(self, ctx),
                        SessionState::Authenticated(user) => html! {
                            <>
                                { profile::render_profile_bar(user, ctx) }
                                { recommendations::render_recommendations(self, ctx) }
                                { calorie_log::render_calorie_log(self, ctx) }
                                { photo::render_photo_panel(self, ctx) }
                            </>
                        },
                    }
                }
                </main>

                <footer class="app-footer">
                    <p>{"Calorie Tracker | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
