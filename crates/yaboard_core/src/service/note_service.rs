//! Notes book use-case service.
//!
//! # Responsibility
//! - Owner-scoped note list and owner-only detail/edit/delete pages.
//! - Note create/edit with slug derivation and uniqueness checks.
//!
//! # Invariants
//! - Anonymous callers are turned away before any record lookup.
//! - Non-owners get `ServiceError::NotFound`, same as a missing note.
//! - A blank slug is derived from the title via transliteration.
//! - Successful mutations redirect to `notes:success`.

use crate::config::BoardConfig;
use crate::model::note::{validate_slug, Note, NoteId, NOTE_SLUG_MAX_CHARS};
use crate::model::principal::Principal;
use crate::model::ValidationError;
use crate::policy::content::ContentPolicy;
use crate::policy::gate::{authorize, Action, Decision};
use crate::policy::listing::ListingPolicy;
use crate::repo::note_repo::NoteRepository;
use crate::route::Route;
use crate::service::error::{Mutation, ServiceError, ServiceResult};
use crate::slug::slugify;
use log::{info, warn};

/// Submitted note form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub text: String,
    /// Derived from `title` when `None` or blank.
    pub slug: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Add/edit page model: current field values and the form target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub action: Route,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    listing: ListingPolicy,
    content: ContentPolicy,
    slug_max_chars: usize,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service with default content rules.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            listing: ListingPolicy::default(),
            content: ContentPolicy::default(),
            slug_max_chars: NOTE_SLUG_MAX_CHARS,
        }
    }

    pub fn with_config(repo: R, config: &BoardConfig) -> Self {
        Self {
            repo,
            listing: config.listing_policy(),
            content: config.content_policy(),
            slug_max_chars: config.slug_max_length,
        }
    }

    /// Notes owned by `principal`; anonymous principals get an empty list.
    pub fn owner_scoped_notes(&self, principal: &Principal) -> ServiceResult<Vec<Note>> {
        let Some(user_id) = principal.user_id() else {
            return Ok(Vec::new());
        };
        let notes = self.repo.list_notes_by_author(user_id)?;
        Ok(self.listing.owner_scoped(principal, notes))
    }

    /// `notes:list` page; login required.
    pub fn notes_page(&self, principal: &Principal) -> ServiceResult<Vec<Note>> {
        if !principal.is_authenticated() {
            return Err(ServiceError::auth_required(&Route::NotesList));
        }
        self.owner_scoped_notes(principal)
    }

    /// Empty `notes:add` form; login required.
    pub fn add_form(&self, principal: &Principal) -> ServiceResult<NoteForm> {
        if !principal.is_authenticated() {
            return Err(ServiceError::auth_required(&Route::NoteAdd));
        }
        Ok(NoteForm {
            title: String::new(),
            text: String::new(),
            slug: String::new(),
            action: Route::NoteAdd,
        })
    }

    /// Creates a note owned by `principal`.
    ///
    /// # Errors
    /// - `AuthRequired` for anonymous principals.
    /// - `ProhibitedContent` when `text` contains a denylisted word.
    /// - `SlugConflict` when the supplied or derived slug is taken.
    /// - `Invalid` when fields fail validation.
    pub fn create_note(
        &self,
        principal: &Principal,
        input: NoteInput,
    ) -> ServiceResult<Mutation<Note>> {
        let Some(author) = principal.user_id() else {
            info!("event=note_create module=notes status=denied reason=anonymous");
            return Err(ServiceError::auth_required(&Route::NoteAdd));
        };
        self.check_content(&input.text, "note_create")?;

        let slug = self.resolve_slug(&input, None)?;
        let note = Note::new(input.title, input.text, slug, author);
        note.validate()?;

        let note_id = self.repo.create_note(&note)?;
        info!("event=note_create module=notes status=ok note_id={note_id}");

        let record = self.read_back(&note.slug, "created note not found in read-back")?;
        Ok(Mutation {
            record,
            redirect: Route::NotesSuccess,
        })
    }

    /// Note detail page; owner only.
    pub fn note_detail(&self, principal: &Principal, slug: &str) -> ServiceResult<Note> {
        self.owned_note(principal, slug, Action::View)
    }

    /// Pre-filled `notes:edit` form; owner only.
    pub fn edit_form(&self, principal: &Principal, slug: &str) -> ServiceResult<NoteForm> {
        let note = self.owned_note(principal, slug, Action::Edit)?;
        Ok(NoteForm {
            action: Route::NoteEdit(note.slug.clone()),
            title: note.title,
            text: note.text,
            slug: note.slug,
        })
    }

    /// Note delete confirmation page; owner only.
    pub fn note_for_delete(&self, principal: &Principal, slug: &str) -> ServiceResult<Note> {
        self.owned_note(principal, slug, Action::Delete)
    }

    /// Replaces title/text/slug of the note at `slug`; owner only.
    pub fn edit_note(
        &self,
        principal: &Principal,
        slug: &str,
        input: NoteInput,
    ) -> ServiceResult<Mutation<Note>> {
        let current = self.owned_note(principal, slug, Action::Edit)?;
        self.check_content(&input.text, "note_edit")?;

        let new_slug = self.resolve_slug(&input, Some(current.id))?;
        let updated = Note {
            title: input.title,
            text: input.text,
            slug: new_slug,
            ..current
        };
        updated.validate()?;

        self.repo.update_note(&updated)?;
        info!("event=note_edit module=notes status=ok note_id={}", updated.id);

        let record = self.read_back(&updated.slug, "updated note not found in read-back")?;
        Ok(Mutation {
            record,
            redirect: Route::NotesSuccess,
        })
    }

    /// Deletes the note at `slug`; owner only.
    pub fn delete_note(&self, principal: &Principal, slug: &str) -> ServiceResult<Route> {
        let note = self.owned_note(principal, slug, Action::Delete)?;
        self.repo.delete_note(note.id)?;
        info!("event=note_delete module=notes status=ok note_id={}", note.id);
        Ok(Route::NotesSuccess)
    }

    fn owned_note(&self, principal: &Principal, slug: &str, action: Action) -> ServiceResult<Note> {
        let requested = match action {
            Action::View => Route::NoteDetail(slug.to_string()),
            Action::Edit => Route::NoteEdit(slug.to_string()),
            Action::Delete => Route::NoteDelete(slug.to_string()),
        };
        if !principal.is_authenticated() {
            info!(
                "event=note_{} module=notes status=denied reason=anonymous",
                action.as_str()
            );
            return Err(ServiceError::auth_required(&requested));
        }

        let note = self
            .repo
            .get_note_by_slug(slug)?
            .ok_or(ServiceError::NotFound)?;
        let decision = authorize(principal, note.author, action);
        match decision {
            Decision::Allow => Ok(note),
            Decision::DenyNotFound => {
                warn!(
                    "event=note_{} module=notes status=denied decision={} note_id={}",
                    action.as_str(),
                    decision.as_str(),
                    note.id
                );
                Err(ServiceError::NotFound)
            }
            Decision::DenyAuthRequired => Err(ServiceError::auth_required(&requested)),
        }
    }

    fn check_content(&self, text: &str, event: &str) -> ServiceResult<()> {
        self.content.check(text).map_err(|err| {
            warn!("event={event} module=notes status=rejected reason=prohibited_content");
            ServiceError::from(err)
        })
    }

    /// Picks the supplied slug or derives one from the title, then checks
    /// that no other note (besides `except`) uses it.
    ///
    /// Both forms are held to the configured slug length.
    fn resolve_slug(&self, input: &NoteInput, except: Option<NoteId>) -> ServiceResult<String> {
        let slug = match input.slug.as_deref().map(str::trim) {
            Some(supplied) if !supplied.is_empty() => supplied.to_string(),
            _ => slugify(&input.title, self.slug_max_chars),
        };
        if slug.is_empty() {
            return Err(ValidationError::EmptyField("slug").into());
        }
        validate_slug(&slug, self.slug_max_chars)?;
        if self.repo.slug_exists(&slug, except)? {
            warn!("event=note_slug module=notes status=rejected reason=slug_conflict");
            return Err(ServiceError::SlugConflict(slug));
        }
        Ok(slug)
    }

    fn read_back(&self, slug: &str, details: &'static str) -> ServiceResult<Note> {
        self.repo
            .get_note_by_slug(slug)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
