//! Remote resource clients: one thin method per CRUD verb, mapped onto the
//! conventional collection endpoints.

use reqwest::{multipart, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{ProgrammeId, SpeakerId},
    error::ApiError,
    model::{Programme, ProgrammeWrite, Speaker, SpeakerWrite, UploadedImage},
};
use tracing::debug;

use crate::error::RemoteError;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn programmes(&self) -> ProgrammeClient<'_> {
        ProgrammeClient { api: self }
    }

    pub fn speakers(&self) -> SpeakerClient<'_> {
        SpeakerClient { api: self }
    }

    /// `POST /upload-image` with a multipart file field named `image`.
    /// Only a 200 with a `{ url }` body counts as success.
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, RemoteError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("image", part);
        let response = self
            .http
            .post(format!("{}/upload-image", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(error_for_status(response).await);
        }
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }
    Ok(response.json().await?)
}

async fn error_for_status(response: Response) -> RemoteError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return RemoteError::NotFound;
    }
    if status.is_client_error() {
        // Prefer the server's structured message when it sent one.
        let message = match response.json::<ApiError>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("invalid request")
                .to_string(),
        };
        return RemoteError::Rejected(message);
    }
    RemoteError::Server {
        status: status.as_u16(),
    }
}

pub struct ProgrammeClient<'a> {
    api: &'a ApiClient,
}

impl ProgrammeClient<'_> {
    /// Entities in server order; no client-side sort guarantee.
    pub async fn list(&self) -> Result<Vec<Programme>, RemoteError> {
        self.api.get_json("/programmes").await
    }

    pub async fn get(&self, id: &ProgrammeId) -> Result<Programme, RemoteError> {
        self.api.get_json(&format!("/programmes/{id}")).await
    }

    pub async fn create(&self, write: &ProgrammeWrite) -> Result<Programme, RemoteError> {
        self.api.post_json("/programmes", write).await
    }

    /// Full replacement of the mutable field set.
    pub async fn update(
        &self,
        id: &ProgrammeId,
        write: &ProgrammeWrite,
    ) -> Result<Programme, RemoteError> {
        self.api.put_json(&format!("/programmes/{id}"), write).await
    }

    pub async fn delete(&self, id: &ProgrammeId) -> Result<(), RemoteError> {
        self.api.delete(&format!("/programmes/{id}")).await
    }
}

pub struct SpeakerClient<'a> {
    api: &'a ApiClient,
}

impl SpeakerClient<'_> {
    pub async fn list(&self) -> Result<Vec<Speaker>, RemoteError> {
        self.api.get_json("/speakers").await
    }

    pub async fn get(&self, id: &SpeakerId) -> Result<Speaker, RemoteError> {
        self.api.get_json(&format!("/speakers/{id}")).await
    }

    pub async fn create(&self, write: &SpeakerWrite) -> Result<Speaker, RemoteError> {
        self.api.post_json("/speakers", write).await
    }

    pub async fn update(
        &self,
        id: &SpeakerId,
        write: &SpeakerWrite,
    ) -> Result<Speaker, RemoteError> {
        self.api.put_json(&format!("/speakers/{id}"), write).await
    }

    pub async fn delete(&self, id: &SpeakerId) -> Result<(), RemoteError> {
        self.api.delete(&format!("/speakers/{id}")).await
    }
}
