//! Async drivers binding a view, a remote seam and the collection cache
//! together for one operation. Each driver runs a single-attempt remote call
//! to completion and feeds the outcome back through the view; there is no
//! cancellation of in-flight calls, and a response that lands after its
//! surface closed is neutralized by the cache generation check.

use chrono::TimeZone;
use shared::model::{Programme, Speaker};

use crate::{
    cache::{read_through, CollectionCache},
    error::RemoteError,
    remote::{ProgrammeRemote, SpeakerRemote},
    views::{ProgrammeListView, SpeakerListView},
};

/// The programme collection, read through the cache.
pub async fn load_programmes(
    remote: &dyn ProgrammeRemote,
    cache: &CollectionCache<Programme>,
) -> Result<Vec<Programme>, RemoteError> {
    read_through(cache, || remote.list()).await
}

pub async fn load_speakers(
    remote: &dyn SpeakerRemote,
    cache: &CollectionCache<Speaker>,
) -> Result<Vec<Speaker>, RemoteError> {
    read_through(cache, || remote.list()).await
}

/// Submits the create drawer. Returns whether a remote call was issued;
/// `false` means validation blocked the submission (or a call was already
/// pending) and zero network traffic occurred.
pub async fn create_programme<Tz: TimeZone>(
    view: &mut ProgrammeListView,
    remote: &dyn ProgrammeRemote,
    cache: &CollectionCache<Programme>,
    tz: &Tz,
) -> bool {
    let Some(write) = view.begin_create(tz) else {
        return false;
    };
    let outcome = remote.create(&write).await.into();
    view.settle_create(outcome, cache);
    true
}

pub async fn update_programme<Tz: TimeZone>(
    view: &mut ProgrammeListView,
    remote: &dyn ProgrammeRemote,
    cache: &CollectionCache<Programme>,
    tz: &Tz,
) -> bool {
    let Some((id, write)) = view.begin_update(tz) else {
        return false;
    };
    let outcome = remote.update(&id, &write).await.into();
    view.settle_update(outcome, cache);
    true
}

/// Runs a delete already confirmed through the modal.
pub async fn delete_programme(
    view: &mut ProgrammeListView,
    remote: &dyn ProgrammeRemote,
    cache: &CollectionCache<Programme>,
) -> bool {
    let Some(id) = view.confirm_delete() else {
        return false;
    };
    let outcome = remote.delete(&id).await.into();
    view.settle_delete(outcome, cache);
    true
}

pub async fn create_speaker(
    view: &mut SpeakerListView,
    remote: &dyn SpeakerRemote,
    cache: &CollectionCache<Speaker>,
) -> bool {
    let Some(write) = view.begin_create() else {
        return false;
    };
    let outcome = remote.create(&write).await.into();
    view.settle_create(outcome, cache);
    true
}

pub async fn update_speaker(
    view: &mut SpeakerListView,
    remote: &dyn SpeakerRemote,
    cache: &CollectionCache<Speaker>,
) -> bool {
    let Some((id, write)) = view.begin_update() else {
        return false;
    };
    let outcome = remote.update(&id, &write).await.into();
    view.settle_update(outcome, cache);
    true
}

pub async fn delete_speaker(
    view: &mut SpeakerListView,
    remote: &dyn SpeakerRemote,
    cache: &CollectionCache<Speaker>,
) -> bool {
    let Some(id) = view.confirm_delete() else {
        return false;
    };
    let outcome = remote.delete(&id).await.into();
    view.settle_delete(outcome, cache);
    true
}
