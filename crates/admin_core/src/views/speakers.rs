use shared::{
    domain::SpeakerId,
    model::{Speaker, SpeakerWrite},
};

use crate::{
    cache::CollectionCache,
    coordinator::{Effect, MutationCoordinator, MutationOutcome, MutationVerb, Notification},
    validate::{FieldError, SpeakerDraft},
    views::{matches_search, Surface},
};

/// State of the speakers screen. Same shape as the programmes view; the
/// speaker-specific parts are the upload step that fills `image_url` before
/// submission and the priority ordering of the visible rows.
pub struct SpeakerListView {
    search_term: String,
    surface: Surface,
    selected: Option<Speaker>,
    draft: SpeakerDraft,
    field_errors: Vec<FieldError>,
    notifications: Vec<Notification>,
    create: MutationCoordinator,
    update: MutationCoordinator,
    delete: MutationCoordinator,
}

impl SpeakerListView {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            surface: Surface::None,
            selected: None,
            draft: SpeakerDraft::default(),
            field_errors: Vec::new(),
            notifications: Vec::new(),
            create: MutationCoordinator::new("Speaker", MutationVerb::Create),
            update: MutationCoordinator::new("Speaker", MutationVerb::Update),
            delete: MutationCoordinator::new("Speaker", MutationVerb::Delete),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Search-filtered rows ordered by priority, lower first. Ordering is
    /// display-only; the cached collection keeps server order.
    pub fn filter<'a>(&self, speakers: &'a [Speaker]) -> Vec<&'a Speaker> {
        let mut rows: Vec<&Speaker> = speakers
            .iter()
            .filter(|s| matches_search(&self.search_term, s.id.as_str(), &s.name))
            .collect();
        rows.sort_by_key(|s| s.priority);
        rows
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn selected(&self) -> Option<&Speaker> {
        self.selected.as_ref()
    }

    pub fn draft(&self) -> &SpeakerDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SpeakerDraft {
        &mut self.draft
    }

    /// Records the URL returned by the upload endpoint into the open draft.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.draft.image_url = url.into();
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn busy(&self) -> bool {
        self.create.is_in_flight() || self.update.is_in_flight() || self.delete.is_in_flight()
    }

    pub fn open_create(&mut self) {
        self.draft = SpeakerDraft::default();
        self.field_errors.clear();
        self.selected = None;
        self.surface = Surface::CreateDrawer;
    }

    pub fn open_edit(&mut self, speaker: &Speaker) {
        self.draft = SpeakerDraft {
            name: speaker.name.clone(),
            bio: speaker.bio.clone(),
            programmes: speaker.programmes.clone(),
            image_url: speaker.image_url.clone().unwrap_or_default(),
            priority: speaker.priority,
        };
        self.field_errors.clear();
        self.selected = Some(speaker.clone());
        self.surface = Surface::EditDrawer;
    }

    pub fn request_delete(&mut self, speaker: &Speaker) {
        self.selected = Some(speaker.clone());
        self.surface = Surface::DeleteModal;
    }

    pub fn close_surface(&mut self) {
        self.surface = Surface::None;
        self.selected = None;
        self.draft = SpeakerDraft::default();
        self.field_errors.clear();
    }

    pub fn begin_create(&mut self) -> Option<SpeakerWrite> {
        if self.create.is_in_flight() {
            return None;
        }
        match self.draft.validate() {
            Ok(write) => {
                self.field_errors.clear();
                self.create.begin().ok()?;
                Some(write)
            }
            Err(errors) => {
                self.field_errors = errors.fields;
                None
            }
        }
    }

    pub fn settle_create(
        &mut self,
        outcome: MutationOutcome<Speaker>,
        cache: &CollectionCache<Speaker>,
    ) {
        let effects = self.create.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    pub fn begin_update(&mut self) -> Option<(SpeakerId, SpeakerWrite)> {
        if self.update.is_in_flight() {
            return None;
        }
        let id = self.selected.as_ref()?.id.clone();
        match self.draft.validate() {
            Ok(write) => {
                self.field_errors.clear();
                self.update.begin().ok()?;
                Some((id, write))
            }
            Err(errors) => {
                self.field_errors = errors.fields;
                None
            }
        }
    }

    pub fn settle_update(
        &mut self,
        outcome: MutationOutcome<Speaker>,
        cache: &CollectionCache<Speaker>,
    ) {
        let effects = self.update.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    pub fn confirm_delete(&mut self) -> Option<SpeakerId> {
        if self.surface != Surface::DeleteModal || self.delete.is_in_flight() {
            return None;
        }
        let id = self.selected.as_ref()?.id.clone();
        self.delete.begin().ok()?;
        Some(id)
    }

    pub fn settle_delete(
        &mut self,
        outcome: MutationOutcome<()>,
        cache: &CollectionCache<Speaker>,
    ) {
        let effects = self.delete.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, cache: &CollectionCache<Speaker>) {
        for effect in effects {
            match effect {
                Effect::InvalidateList => cache.invalidate(),
                Effect::Notify(notification) => self.notifications.push(notification),
                Effect::CloseSurface => {
                    self.surface = Surface::None;
                    self.selected = None;
                }
                Effect::ClearDraft => {
                    self.draft = SpeakerDraft::default();
                    self.field_errors.clear();
                }
            }
        }
    }
}

impl Default for SpeakerListView {
    fn default() -> Self {
        Self::new()
    }
}
