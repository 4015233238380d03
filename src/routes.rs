use chrono::Utc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use crate::error::{bad_request, db_err, not_found, ApiError, ApiFailure};
use crate::models::{AuthorName, BlogPost, CreatePostReq, PostResponse, UpdatePostReq};
use crate::{DbPool, DbPoolExt};

fn missing(field: &str) -> ApiFailure {
    bad_request(&format!("Missing `{}` in request body", field))
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

#[get("/posts")]
pub fn list_posts(db: &State<DbPool>) -> Result<Json<Vec<PostResponse>>, ApiFailure> {
    let conn = db.conn();
    let posts = crate::db::list_posts(&conn).map_err(db_err)?;
    Ok(Json(posts.iter().map(BlogPost::to_response).collect()))
}

#[get("/posts/<id>")]
pub fn get_post(id: &str, db: &State<DbPool>) -> Result<Json<PostResponse>, ApiFailure> {
    let conn = db.conn();
    crate::db::get_post(&conn, id)
        .map_err(db_err)?
        .map(|post| Json(post.to_response()))
        .ok_or_else(|| not_found("Post not found"))
}

#[post("/posts", format = "json", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, db: &State<DbPool>) -> Result<(Status, Json<PostResponse>), ApiFailure> {
    let req = req.into_inner();
    let title = req.title.ok_or_else(|| missing("title"))?;
    let content = req.content.ok_or_else(|| missing("content"))?;
    let author = req.author.ok_or_else(|| missing("author"))?;
    let author = match (author.first_name, author.last_name) {
        (Some(first_name), Some(last_name)) => AuthorName { first_name, last_name },
        _ => return Err(bad_request("`author` must include `firstName` and `lastName`")),
    };

    // Client-supplied ids are never trusted.
    let post = BlogPost {
        id: uuid::Uuid::new_v4().to_string(),
        author,
        title,
        content,
        created: req.created.unwrap_or_else(Utc::now),
    };

    let conn = db.conn();
    crate::db::insert_post(&conn, &post).map_err(db_err)?;
    tracing::info!(id = %post.id, "post created");

    Ok((Status::Created, Json(post.to_response())))
}

#[put("/posts/<id>", format = "json", data = "<req>")]
pub fn update_post(id: &str, req: Json<UpdatePostReq>, db: &State<DbPool>) -> Result<Status, ApiFailure> {
    if let Some(body_id) = req.id.as_deref() {
        if body_id != id {
            return Err(bad_request(&format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            )));
        }
    }

    let conn = db.conn();
    let found = crate::db::update_post(&conn, id, req.title.as_deref(), req.content.as_deref()).map_err(db_err)?;
    if !found {
        return Err(not_found("Post not found"));
    }
    tracing::info!(id, "post updated");

    Ok(Status::NoContent)
}

#[delete("/posts/<id>")]
pub fn delete_post(id: &str, db: &State<DbPool>) -> Result<Status, ApiFailure> {
    let conn = db.conn();
    let removed = crate::db::delete_post(&conn, id).map_err(db_err)?;
    tracing::info!(id, removed, "post deleted");
    Ok(Status::NoContent)
}

// ─── Catchers ───

#[catch(400)]
pub fn bad_request_catcher() -> Json<ApiError> {
    Json(ApiError { error: "Bad request".to_string(), code: "BAD_REQUEST".to_string() })
}

#[catch(404)]
pub fn not_found_catcher() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable() -> Json<ApiError> {
    Json(ApiError { error: "Malformed request body".to_string(), code: "UNPROCESSABLE".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}
