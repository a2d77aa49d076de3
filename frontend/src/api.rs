//! Typed calls for the backend JSON contract. Every function maps
//! transport, status, and decode failures into [`ApiError`]; callers
//! decide how each failure surfaces in the UI.

use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use shared::{
    ApiError, CalorieEntry, EntriesResponse, ErrorBody, NewEntry, PhotoEstimate, ProfileResponse,
    RecommendationsResponse, UploadResponse, User,
};

/// Registration form, submitted with the raw field strings; the backend
/// owns the numeric coercion.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub age: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub goal: String,
}

fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn decode_error(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

/// Non-2xx bodies follow the `{error?}` convention; a missing or
/// unreadable message is left empty for the caller's fallback.
async fn server_error(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_default();
    ApiError::Server { status, message }
}

async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<(), ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(decode_error)?
        .send()
        .await
        .map_err(network_error)?;
    if response.ok() {
        Ok(())
    } else {
        Err(server_error(response).await)
    }
}

/// `GET /api/profile`. `Ok(Some(user))` when the backend recognizes the
/// session, `Ok(None)` when it reports an anonymous caller. The server
/// response is the only session authority; nothing is cached locally.
pub async fn fetch_profile() -> Result<Option<User>, ApiError> {
    let response = Request::get("/api/profile")
        .send()
        .await
        .map_err(network_error)?;
    if !response.ok() {
        return Ok(None);
    }
    let profile: ProfileResponse = response.json().await.map_err(decode_error)?;
    Ok(if profile.ok { profile.user } else { None })
}

pub async fn register(form: &RegisterForm) -> Result<(), ApiError> {
    post_json("/register", form).await
}

pub async fn login(username: &str, password: &str) -> Result<(), ApiError> {
    post_json(
        "/login",
        &serde_json::json!({ "username": username, "password": password }),
    )
    .await
}

pub async fn logout() -> Result<(), ApiError> {
    let response = Request::post("/logout").send().await.map_err(network_error)?;
    if response.ok() {
        Ok(())
    } else {
        Err(server_error(response).await)
    }
}

pub async fn fetch_recommendations() -> Result<Vec<String>, ApiError> {
    let response = Request::get("/api/recommendations")
        .send()
        .await
        .map_err(network_error)?;
    if !response.ok() {
        return Err(server_error(response).await);
    }
    let payload: RecommendationsResponse = response.json().await.map_err(decode_error)?;
    Ok(payload.recs)
}

pub async fn fetch_entries() -> Result<Vec<CalorieEntry>, ApiError> {
    let response = Request::get("/api/calories")
        .send()
        .await
        .map_err(network_error)?;
    if !response.ok() {
        return Err(server_error(response).await);
    }
    let payload: EntriesResponse = response.json().await.map_err(decode_error)?;
    Ok(payload.items)
}

pub async fn add_entry(entry: &NewEntry) -> Result<(), ApiError> {
    post_json("/api/calories", entry).await
}

pub async fn delete_entry(id: i64) -> Result<(), ApiError> {
    let response = Request::delete("/api/calories")
        .json(&serde_json::json!({ "id": id }))
        .map_err(decode_error)?
        .send()
        .await
        .map_err(network_error)?;
    if response.ok() {
        Ok(())
    } else {
        Err(server_error(response).await)
    }
}

/// `POST /api/upload_photo`, multipart field `photo`. The original
/// filename rides along so the backend's extension check still applies.
pub async fn upload_photo(file: &GlooFile) -> Result<PhotoEstimate, ApiError> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("could not build form data".to_string()))?;
    form_data
        .append_with_blob_and_filename("photo", file.as_ref(), &file.name())
        .map_err(|_| ApiError::Network("could not attach photo".to_string()))?;

    let response = Request::post("/api/upload_photo")
        .body(form_data)
        .map_err(decode_error)?
        .send()
        .await
        .map_err(network_error)?;
    if !response.ok() {
        return Err(server_error(response).await);
    }
    let payload: UploadResponse = response.json().await.map_err(decode_error)?;
    Ok(payload.result)
}

#[cfg(test)]
mod tests {
    use super::RegisterForm;

    #[test]
    fn register_form_serializes_raw_field_strings() {
        let form = RegisterForm {
            username: "ana".into(),
            password: "hunter2".into(),
            age: "31".into(),
            height_cm: "170".into(),
            weight_kg: "65".into(),
            goal: "maintain".into(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "username": "ana",
                "password": "hunter2",
                "age": "31",
                "height_cm": "170",
                "weight_kg": "65",
                "goal": "maintain"
            })
        );
    }
}
