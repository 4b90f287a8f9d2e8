use chrono::TimeZone;
use shared::{
    domain::ProgrammeId,
    model::{Programme, ProgrammeWrite},
};

use crate::{
    cache::CollectionCache,
    coordinator::{Effect, MutationCoordinator, MutationOutcome, MutationVerb, Notification},
    schedule,
    validate::{FieldError, ProgrammeDraft},
    views::{matches_search, Surface},
};

/// State of the programmes screen.
///
/// Flows, mirroring the admin screen: `open_create`/`open_edit` stage a
/// draft behind a drawer, `begin_*` validates and arms the matching
/// coordinator, the driver runs the remote call, and `settle_*` applies the
/// coordinator's effects. Deletion goes through an explicit confirmation
/// modal first.
pub struct ProgrammeListView {
    search_term: String,
    surface: Surface,
    selected: Option<Programme>,
    draft: ProgrammeDraft,
    field_errors: Vec<FieldError>,
    notifications: Vec<Notification>,
    create: MutationCoordinator,
    update: MutationCoordinator,
    delete: MutationCoordinator,
}

impl ProgrammeListView {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            surface: Surface::None,
            selected: None,
            draft: ProgrammeDraft::default(),
            field_errors: Vec::new(),
            notifications: Vec::new(),
            create: MutationCoordinator::new("Programme", MutationVerb::Create),
            update: MutationCoordinator::new("Programme", MutationVerb::Update),
            delete: MutationCoordinator::new("Programme", MutationVerb::Delete),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Applies the search term to the cached collection without mutating it.
    pub fn filter<'a>(&self, programmes: &'a [Programme]) -> Vec<&'a Programme> {
        programmes
            .iter()
            .filter(|p| matches_search(&self.search_term, p.id.as_str(), &p.name))
            .collect()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn selected(&self) -> Option<&Programme> {
        self.selected.as_ref()
    }

    pub fn draft(&self) -> &ProgrammeDraft {
        &self.draft
    }

    /// Form inputs write through this; the draft is exclusively owned by the
    /// open surface and discarded on close or successful submit.
    pub fn draft_mut(&mut self) -> &mut ProgrammeDraft {
        &mut self.draft
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Drains pending notifications for the presenter to display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// True while any write verb has a call pending; the renderer disables
    /// the form controls off this.
    pub fn busy(&self) -> bool {
        self.create.is_in_flight() || self.update.is_in_flight() || self.delete.is_in_flight()
    }

    pub fn open_create(&mut self) {
        self.draft = ProgrammeDraft::default();
        self.field_errors.clear();
        self.selected = None;
        self.surface = Surface::CreateDrawer;
    }

    /// Loads the selected programme into the draft, projecting its absolute
    /// timestamps back to local `HH:MM` strings for the time inputs.
    pub fn open_edit<Tz: TimeZone>(&mut self, programme: &Programme, tz: &Tz) {
        self.draft = ProgrammeDraft {
            name: programme.name.clone(),
            day_number: programme.day_number,
            date: programme.date,
            start_time: schedule::time_of_day(programme.start_datetime, tz),
            end_time: schedule::time_of_day(programme.end_datetime, tz),
            venue: programme.venue.clone(),
        };
        self.field_errors.clear();
        self.selected = Some(programme.clone());
        self.surface = Surface::EditDrawer;
    }

    pub fn request_delete(&mut self, programme: &Programme) {
        self.selected = Some(programme.clone());
        self.surface = Surface::DeleteModal;
    }

    /// Discards the draft and selection without submitting.
    pub fn close_surface(&mut self) {
        self.surface = Surface::None;
        self.selected = None;
        self.draft = ProgrammeDraft::default();
        self.field_errors.clear();
    }

    /// Validates the draft and arms the create coordinator. `None` means the
    /// submission was blocked: field errors are staged, or a call is already
    /// pending. No network traffic happens here.
    pub fn begin_create<Tz: TimeZone>(&mut self, tz: &Tz) -> Option<ProgrammeWrite> {
        if self.create.is_in_flight() {
            return None;
        }
        match self.draft.validate(tz) {
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
        outcome: MutationOutcome<Programme>,
        cache: &CollectionCache<Programme>,
    ) {
        let effects = self.create.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    /// Like `begin_create`, but for the edit drawer; also yields the id of
    /// the programme being replaced.
    pub fn begin_update<Tz: TimeZone>(&mut self, tz: &Tz) -> Option<(ProgrammeId, ProgrammeWrite)> {
        if self.update.is_in_flight() {
            return None;
        }
        let id = self.selected.as_ref()?.id.clone();
        match self.draft.validate(tz) {
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
        outcome: MutationOutcome<Programme>,
        cache: &CollectionCache<Programme>,
    ) {
        let effects = self.update.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    /// Only valid from the confirmation modal; the sole path that arms the
    /// delete coordinator.
    pub fn confirm_delete(&mut self) -> Option<ProgrammeId> {
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
        cache: &CollectionCache<Programme>,
    ) {
        let effects = self.delete.settle(&outcome);
        self.apply_effects(effects, cache);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, cache: &CollectionCache<Programme>) {
        for effect in effects {
            match effect {
                Effect::InvalidateList => cache.invalidate(),
                Effect::Notify(notification) => self.notifications.push(notification),
                Effect::CloseSurface => {
                    self.surface = Surface::None;
                    self.selected = None;
                }
                Effect::ClearDraft => {
                    self.draft = ProgrammeDraft::default();
                    self.field_errors.clear();
                }
            }
        }
    }
}

impl Default for ProgrammeListView {
    fn default() -> Self {
        Self::new()
    }
}
