use gloo_file::ObjectUrl;
use shared::entries::format_kcal;
use shared::{confidence_percent, EstimateItem, PhotoEstimate};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

use crate::components::utils::{self, debounce, render_inline_error};
use crate::{Model, Msg, PhotoState};

/// Photo estimation panel: picker, local preview, upload, estimate
/// breakdown with a save action.
pub fn render_photo_panel(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section class="panel photo-panel">
            <h2><i class="fa-solid fa-camera"></i>{" Photo Estimate"}</h2>
            { render_inline_error(&model.photo_error) }
            { render_picker(model, ctx) }
            { render_photo_state(model, ctx) }
        </section>
    }
}

fn render_picker(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let picked = input.files().as_ref().and_then(utils::first_image_file);

        input.set_value("");

        match picked {
            Some(file) => Msg::PhotoPicked(file),
            None => Msg::SetPhotoError(Some("No valid image file selected.".to_string())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <>
            <input
                type="file"
                id="photo-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="photo-drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, || utils::trigger_file_input("photo-input"))}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a food photo here, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG"}</p>
                </div>
            </div>
        </>
    }
}

fn render_photo_state(model: &Model, ctx: &Context<Model>) -> Html {
    match &model.photo {
        PhotoState::Idle => html! {},
        PhotoState::Selected { file, preview_url } => html! {
            <div class="photo-stage">
                { render_preview(preview_url, &file.name()) }
                { render_upload_controls(ctx, &file.name(), false) }
            </div>
        },
        PhotoState::Uploading { file, preview_url } => html! {
            <div class="photo-stage">
                { render_preview(preview_url, &file.name()) }
                <div id="photo-result" class="photo-uploading">
                    <i class="fa-solid fa-spinner fa-spin"></i>
                    <p>{"Uploading & analyzing..."}</p>
                </div>
                { render_upload_controls(ctx, &file.name(), true) }
            </div>
        },
        PhotoState::Estimated {
            file,
            preview_url,
            estimate,
            saving,
        } => html! {
            <div class="photo-stage">
                { render_preview(preview_url, &file.name()) }
                { render_estimate(ctx, estimate, *saving) }
            </div>
        },
        PhotoState::Failed {
            file,
            preview_url,
            message,
        } => html! {
            <div class="photo-stage">
                { render_preview(preview_url, &file.name()) }
                <div id="photo-result" class="inline-error">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <p>{ message }</p>
                </div>
                { render_upload_controls(ctx, &file.name(), false) }
            </div>
        },
    }
}

fn render_preview(preview_url: &ObjectUrl, filename: &str) -> Html {
    html! {
        <img
            id="photo-preview"
            class="photo-preview"
            src={preview_url.to_string()}
            alt={filename.to_string()}
        />
    }
}

fn render_upload_controls(ctx: &Context<Model>, filename: &str, uploading: bool) -> Html {
    let link = ctx.link().clone();
    let display_name = if filename.len() > 20 {
        format!("{}...", &filename[..17])
    } else {
        filename.to_string()
    };

    html! {
        <div class="button-container">
            <button
                id="upload-photo"
                class="analyze-btn"
                disabled={uploading}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::UploadPhoto)
                })}
            >
                { if uploading {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
                } else {
                    html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{display_name}\"") }</> }
                }}
            </button>
            <button
                class="discard-btn"
                disabled={uploading}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::DiscardPhoto)
                })}
            >
                <i class="fa-solid fa-trash"></i>{" Discard"}
            </button>
        </div>
    }
}

fn render_estimate(ctx: &Context<Model>, estimate: &PhotoEstimate, saving: bool) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="photo-result" class="estimate-result">
            <strong>
                { format!("Estimated total calories: {}", format_kcal(estimate.total_calories)) }
            </strong>
            {
                if let Some(url) = &estimate.image_url {
                    html! { <img class="estimate-image" src={url.clone()} alt="Analyzed photo" /> }
                } else {
                    html! {}
                }
            }
            <ul class="estimate-items">
                { for estimate.items.iter().map(render_estimate_item) }
            </ul>
            <div class="button-container">
                <button
                    id="save-photo-cal"
                    class="save-btn"
                    disabled={saving}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::SaveEstimate)
                    })}
                >
                    { if saving {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Saving..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-floppy-disk"></i>{" Save as entry"} </> }
                    }}
                </button>
                <button
                    class="discard-btn"
                    disabled={saving}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::DiscardPhoto)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Discard"}
                </button>
            </div>
        </div>
    }
}

fn render_estimate_item(item: &EstimateItem) -> Html {
    html! {
        <li class="estimate-item">
            { format!(
                "{} — {} ({}% confidence, {})",
                item.name,
                format_kcal(item.calories),
                confidence_percent(item.confidence),
                item.serving_size
            )}
        </li>
    }
}
