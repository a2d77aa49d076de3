use chrono::NaiveDate;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{FileList, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Current value of a text/number input, empty string when the element is
/// missing.
pub fn input_value(id: &str) -> String {
    document()
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = document()
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

pub fn select_value(id: &str) -> String {
    document()
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}

/// Opens the hidden file input behind the visible picker button.
pub fn trigger_file_input(id: &str) {
    if let Some(input) = document().get_element_by_id(id) {
        if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
            html_input.click();
        }
    }
}

/// First image file in a dropped/pasted/picked list; the photo flow holds
/// a single selection at a time.
pub fn first_image_file(file_list: &FileList) -> Option<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .find(|file| file.type_().starts_with("image/"))
        .map(GlooFile::from)
}

pub fn alert(message: &str) {
    let _ = web_sys::window().unwrap().alert_with_message(message);
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .unwrap()
        .confirm_with_message(message)
        .unwrap_or(false)
}

/// Full-page navigation, the auth flow's success path.
pub fn navigate_to(path: &str) {
    let _ = web_sys::window().unwrap().location().set_href(path);
}

/// The date on the user's wall clock. Daily totals are client-relative:
/// an entry counts as "today" when its recorded date matches this one.
pub fn client_today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Non-destructive inline error block shown above a panel's content.
pub fn render_inline_error(error: &Option<String>) -> Html {
    if let Some(message) = error {
        html! {
            <div class="inline-error">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn apply_theme(theme: &str) {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    if theme == "dark" {
        body.class_list().add_1("dark-mode").unwrap();
    } else {
        body.class_list().remove_1("dark-mode").unwrap();
    }
}
