use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use shared::{
    domain::ProgrammeId,
    error::{ApiError, ErrorCode},
    model::{Programme, ProgrammeWrite, UploadedImage},
};
use tokio::net::TcpListener;

use crate::{
    api::ApiClient,
    cache::CollectionCache,
    error::RemoteError,
    views::{drive, ProgrammeListView},
};

#[derive(Clone, Default)]
struct ServerState {
    programmes: Arc<Mutex<Vec<Programme>>>,
}

impl ServerState {
    fn assign_id(&self) -> ProgrammeId {
        ProgrammeId::new(format!("p{}", self.programmes.lock().expect("lock").len() + 1))
    }
}

async fn list_programmes(State(state): State<ServerState>) -> Json<Vec<Programme>> {
    Json(state.programmes.lock().expect("lock").clone())
}

async fn create_programme(
    State(state): State<ServerState>,
    Json(write): Json<ProgrammeWrite>,
) -> Result<Json<Programme>, (StatusCode, Json<ApiError>)> {
    if write.name == "Duplicate" {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(ErrorCode::Validation, "programme name already taken")),
        ));
    }
    let programme = Programme {
        id: state.assign_id(),
        name: write.name,
        day_number: write.day_number,
        date: write.date,
        start_datetime: write.start_datetime,
        end_datetime: write.end_datetime,
        venue: write.venue,
    };
    state.programmes.lock().expect("lock").push(programme.clone());
    Ok(Json(programme))
}

async fn get_programme(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Programme>, StatusCode> {
    state
        .programmes
        .lock()
        .expect("lock")
        .iter()
        .find(|p| p.id.as_str() == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_programme(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(write): Json<ProgrammeWrite>,
) -> Result<Json<Programme>, StatusCode> {
    let mut programmes = state.programmes.lock().expect("lock");
    let Some(existing) = programmes.iter_mut().find(|p| p.id.as_str() == id) else {
        return Err(StatusCode::NOT_FOUND);
    };
    *existing = Programme {
        id: existing.id.clone(),
        name: write.name,
        day_number: write.day_number,
        date: write.date,
        start_datetime: write.start_datetime,
        end_datetime: write.end_datetime,
        venue: write.venue,
    };
    Ok(Json(existing.clone()))
}

async fn delete_programme(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut programmes = state.programmes.lock().expect("lock");
    let before = programmes.len();
    programmes.retain(|p| p.id.as_str() != id);
    if programmes.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn upload_image(mut multipart: Multipart) -> Result<Json<UploadedImage>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            if bytes.is_empty() {
                return Err(StatusCode::BAD_REQUEST);
            }
            return Ok(Json(UploadedImage {
                url: format!("https://img.example/{filename}"),
            }));
        }
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn spawn_admin_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/programmes", get(list_programmes).post(create_programme))
        .route(
            "/programmes/:id",
            get(get_programme).put(update_programme).delete(delete_programme),
        )
        .route(
            "/speakers",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/upload-image", post(upload_image))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn sample_write(name: &str) -> ProgrammeWrite {
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).expect("date");
    ProgrammeWrite {
        name: name.into(),
        day_number: 1,
        date,
        start_datetime: date.and_hms_opt(9, 0, 0).expect("time").and_utc(),
        end_datetime: date.and_hms_opt(10, 30, 0).expect("time").and_utc(),
        venue: "Main Hall".into(),
    }
}

#[tokio::test]
async fn create_then_get_round_trips_the_payload() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let client = api.programmes();

    let created = client.create(&sample_write("Keynote")).await.expect("create");
    assert_eq!(created.name, "Keynote");

    let fetched = client.get(&created.id).await.expect("get");
    assert_eq!(fetched, created);

    let listed = client.list().await.expect("list");
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn get_of_an_unknown_id_is_not_found() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let err = api
        .programmes()
        .get(&ProgrammeId::new("missing"))
        .await
        .expect_err("absent");
    assert_eq!(err, RemoteError::NotFound);
}

#[tokio::test]
async fn update_fully_replaces_the_mutable_fields() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let client = api.programmes();

    let created = client.create(&sample_write("Keynote")).await.expect("create");
    let mut write = sample_write("Keynote (moved)");
    write.venue = "Annex".into();
    let updated = client.update(&created.id, &write).await.expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Keynote (moved)");
    assert_eq!(updated.venue, "Annex");
}

#[tokio::test]
async fn delete_twice_yields_success_then_not_found_and_the_cache_reflects_it() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let client = api.programmes();
    let cache = CollectionCache::new();

    let created = client.create(&sample_write("Keynote")).await.expect("create");
    let loaded = drive::load_programmes(&client, &cache).await.expect("load");
    assert_eq!(loaded.len(), 1);

    // First delete through the confirmed view flow.
    let mut view = ProgrammeListView::new();
    view.request_delete(&created);
    assert!(drive::delete_programme(&mut view, &client, &cache).await);
    assert!(view
        .take_notifications()
        .iter()
        .any(|n| n.message == "Programme Deleted Successfully!"));

    // Invalidation happened; the re-fetched list no longer holds the entity.
    let reloaded = drive::load_programmes(&client, &cache).await.expect("reload");
    assert!(reloaded.is_empty());

    // Second delete of the same id surfaces NotFound.
    let err = client.delete(&created.id).await.expect_err("already gone");
    assert_eq!(err, RemoteError::NotFound);
}

#[tokio::test]
async fn server_side_rejection_carries_the_structured_message() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let err = api
        .programmes()
        .create(&sample_write("Duplicate"))
        .await
        .expect_err("rejected");
    assert_eq!(err, RemoteError::Rejected("programme name already taken".into()));
}

#[tokio::test]
async fn five_hundred_maps_to_a_server_error() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let err = api
        .speakers()
        .create(&shared::model::SpeakerWrite {
            name: "Ada".into(),
            bio: "writer".into(),
            programmes: vec![ProgrammeId::new("p1")],
            image_url: None,
            priority: 0,
        })
        .await
        .expect_err("server error");
    assert_eq!(err, RemoteError::Server { status: 500 });
}

#[tokio::test]
async fn unreachable_server_surfaces_a_network_error() {
    // Grab a port nothing listens on by binding and dropping a listener.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = ApiClient::new(format!("http://{addr}"));
    let err = api.programmes().list().await.expect_err("unreachable");
    assert!(matches!(err, RemoteError::Network(_)));
}

#[tokio::test]
async fn upload_image_posts_the_multipart_field_and_returns_the_url() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let uploaded = api
        .upload_image("ada.png", b"fake png bytes".to_vec())
        .await
        .expect("upload");
    assert_eq!(uploaded.url, "https://img.example/ada.png");
}

#[tokio::test]
async fn empty_upload_is_a_failure() {
    let (url, _) = spawn_admin_server().await;
    let api = ApiClient::new(url);
    let err = api.upload_image("ada.png", Vec::new()).await.expect_err("rejected");
    assert!(matches!(err, RemoteError::Rejected(_)));
}
