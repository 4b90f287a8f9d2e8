//! Form validation models. Each draft enumerates its fields and constraints
//! in one place; validation is synchronous, purely local, and gates
//! submission. The server re-validates independently, and its rejections
//! travel the coordinator failure path instead.

use chrono::{Local, NaiveDate, TimeZone};
use shared::{
    domain::ProgrammeId,
    model::{ProgrammeWrite, SpeakerWrite},
};
use thiserror::Error;

use crate::schedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }
}

/// Accumulates per-field failures so the form can show every message at once.
#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn require_len(&mut self, field: &'static str, value: &str, min: usize, message: &str) {
        if value.chars().count() < min {
            self.reject(field, message);
        }
    }

    fn require_min(&mut self, field: &'static str, value: i64, min: i64, message: &str) {
        if value < min {
            self.reject(field, message);
        }
    }

    fn require_items(&mut self, field: &'static str, len: usize, min: usize, message: &str) {
        if len < min {
            self.reject(field, message);
        }
    }

    fn require_url(&mut self, field: &'static str, value: &str, message: &str) {
        if url::Url::parse(value).is_err() {
            self.reject(field, message);
        }
    }

    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                fields: self.errors,
            })
        }
    }
}

/// Transient unsaved copy of a programme while its form is open. Times of day
/// are held as the `HH:MM` strings the time inputs produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeDraft {
    pub name: String,
    pub day_number: u32,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
}

impl Default for ProgrammeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            day_number: 1,
            date: Local::now().date_naive(),
            start_time: String::new(),
            end_time: String::new(),
            venue: String::new(),
        }
    }
}

impl ProgrammeDraft {
    /// Validates the draft and, when it passes, normalizes the schedule into
    /// the write payload.
    pub fn validate<Tz: TimeZone>(&self, tz: &Tz) -> Result<ProgrammeWrite, ValidationErrors> {
        let mut v = Validator::default();
        v.require_len(
            "name",
            &self.name,
            3,
            "Programme name must be at least 3 characters",
        );
        v.require_min(
            "day_number",
            i64::from(self.day_number),
            1,
            "Day number must be positive",
        );
        v.require_len("start_time", &self.start_time, 1, "Start time is required");
        v.require_len("end_time", &self.end_time, 1, "End time is required");
        v.require_len("venue", &self.venue, 2, "Venue must be at least 2 characters");

        let mut window = None;
        if !self.start_time.is_empty() && !self.end_time.is_empty() {
            match schedule::normalize(self.date, &self.start_time, &self.end_time, tz) {
                Ok(w) => window = Some(w),
                Err(err) => v.reject(err.field(), err.to_string()),
            }
        }
        v.finish()?;

        let Some(window) = window else {
            // Both times were present, or finish() returned above.
            return Err(ValidationErrors::single("start_time", "Start time is required"));
        };
        Ok(ProgrammeWrite {
            name: self.name.clone(),
            day_number: self.day_number,
            date: self.date,
            start_datetime: window.start,
            end_datetime: window.end,
            venue: self.venue.clone(),
        })
    }
}

/// Transient unsaved copy of a speaker. `image_url` is filled by the separate
/// upload step before submission; empty means "no image".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerDraft {
    pub name: String,
    pub bio: String,
    pub programmes: Vec<ProgrammeId>,
    pub image_url: String,
    pub priority: i32,
}

impl SpeakerDraft {
    pub fn validate(&self) -> Result<SpeakerWrite, ValidationErrors> {
        let mut v = Validator::default();
        v.require_len("name", &self.name, 1, "Name is required");
        v.require_len("bio", &self.bio, 1, "Bio is required");
        v.require_items(
            "programmes",
            self.programmes.len(),
            1,
            "At least one programme is required",
        );
        if !self.image_url.is_empty() {
            v.require_url("image_url", &self.image_url, "Image URL must be a valid URL");
        }
        v.finish()?;

        Ok(SpeakerWrite {
            name: self.name.clone(),
            bio: self.bio.clone(),
            programmes: self.programmes.clone(),
            image_url: (!self.image_url.is_empty()).then(|| self.image_url.clone()),
            priority: self.priority,
        })
    }
}
