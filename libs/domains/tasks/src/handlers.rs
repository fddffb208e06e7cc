use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
};
use futures::StreamExt;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::service::TaskService;
use crate::store::TaskStore;

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        create_task,
        stream_tasks,
        get_task,
        replace_task,
        partial_update_task,
        delete_task,
    ),
    components(
        schemas(Task),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Task management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the tasks router with all HTTP endpoints
pub fn router<S: TaskStore + 'static>(service: TaskService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/stream", get(stream_tasks))
        .route(
            "/{id}",
            get(get_task)
                .put(replace_task)
                .patch(partial_update_task)
                .delete(delete_task),
        )
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "Tasks",
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.get_all().await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "Tasks",
    request_body = Task,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
    Json(input): Json<Task>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create(input).await?;

    // The store always assigns an identifier on create
    let location = match task.id.as_deref() {
        Some(id) => format!("/api/tasks/{id}"),
        None => "/api/tasks".to_string(),
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

/// Stream all tasks as newline-delimited JSON
#[utoipa::path(
    get,
    path = "/stream",
    tag = "Tasks",
    responses(
        (status = 200, description = "NDJSON stream of tasks", content_type = "application/x-ndjson"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn stream_tasks<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
) -> TaskResult<impl IntoResponse> {
    let stream = service.get_all_streamed().await?;

    // One JSON object per line. The body is produced lazily from the store
    // cursor; a client that disconnects mid-stream drops the cursor with it.
    let body = Body::from_stream(stream.map(|item| {
        item.and_then(|task| {
            serde_json::to_vec(&task)
                .map(|mut line| {
                    line.push(b'\n');
                    line
                })
                .map_err(|e| TaskError::Store(e.to_string()))
        })
    }));

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    ))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<Task>> {
    let task = service
        .get_one(&id)
        .await?
        .ok_or(TaskError::NotFound(id))?;
    Ok(Json(task))
}

/// Replace a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = Task,
    responses(
        (status = 200, description = "Task replaced successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_task<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
    Path(id): Path<String>,
    Json(input): Json<Task>,
) -> TaskResult<Json<Task>> {
    let task = service.replace(&id, input).await?;
    Ok(Json(task))
}

/// Partially update a task (merge patch)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = Task,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn partial_update_task<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
    Path(id): Path<String>,
    Json(input): Json<Task>,
) -> TaskResult<Json<Task>> {
    let task = service.partial_update(&id, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<S: TaskStore>(
    State(service): State<Arc<TaskService<S>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
