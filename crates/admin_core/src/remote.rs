//! Trait seams over the remote resource clients so coordinators and views can
//! run against in-memory fakes in tests.

use async_trait::async_trait;
use shared::{
    domain::{ProgrammeId, SpeakerId},
    model::{Programme, ProgrammeWrite, Speaker, SpeakerWrite},
};

use crate::{
    api::{ProgrammeClient, SpeakerClient},
    error::RemoteError,
};

#[async_trait]
pub trait ProgrammeRemote: Send + Sync {
    async fn list(&self) -> Result<Vec<Programme>, RemoteError>;
    async fn get(&self, id: &ProgrammeId) -> Result<Programme, RemoteError>;
    async fn create(&self, write: &ProgrammeWrite) -> Result<Programme, RemoteError>;
    async fn update(
        &self,
        id: &ProgrammeId,
        write: &ProgrammeWrite,
    ) -> Result<Programme, RemoteError>;
    async fn delete(&self, id: &ProgrammeId) -> Result<(), RemoteError>;
}

#[async_trait]
impl ProgrammeRemote for ProgrammeClient<'_> {
    async fn list(&self) -> Result<Vec<Programme>, RemoteError> {
        ProgrammeClient::list(self).await
    }

    async fn get(&self, id: &ProgrammeId) -> Result<Programme, RemoteError> {
        ProgrammeClient::get(self, id).await
    }

    async fn create(&self, write: &ProgrammeWrite) -> Result<Programme, RemoteError> {
        ProgrammeClient::create(self, write).await
    }

    async fn update(
        &self,
        id: &ProgrammeId,
        write: &ProgrammeWrite,
    ) -> Result<Programme, RemoteError> {
        ProgrammeClient::update(self, id, write).await
    }

    async fn delete(&self, id: &ProgrammeId) -> Result<(), RemoteError> {
        ProgrammeClient::delete(self, id).await
    }
}

#[async_trait]
pub trait SpeakerRemote: Send + Sync {
    async fn list(&self) -> Result<Vec<Speaker>, RemoteError>;
    async fn get(&self, id: &SpeakerId) -> Result<Speaker, RemoteError>;
    async fn create(&self, write: &SpeakerWrite) -> Result<Speaker, RemoteError>;
    async fn update(&self, id: &SpeakerId, write: &SpeakerWrite) -> Result<Speaker, RemoteError>;
    async fn delete(&self, id: &SpeakerId) -> Result<(), RemoteError>;
}

#[async_trait]
impl SpeakerRemote for SpeakerClient<'_> {
    async fn list(&self) -> Result<Vec<Speaker>, RemoteError> {
        SpeakerClient::list(self).await
    }

    async fn get(&self, id: &SpeakerId) -> Result<Speaker, RemoteError> {
        SpeakerClient::get(self, id).await
    }

    async fn create(&self, write: &SpeakerWrite) -> Result<Speaker, RemoteError> {
        SpeakerClient::create(self, write).await
    }

    async fn update(&self, id: &SpeakerId, write: &SpeakerWrite) -> Result<Speaker, RemoteError> {
        SpeakerClient::update(self, id, write).await
    }

    async fn delete(&self, id: &SpeakerId) -> Result<(), RemoteError> {
        SpeakerClient::delete(self, id).await
    }
}
