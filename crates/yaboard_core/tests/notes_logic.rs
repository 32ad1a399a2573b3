use rusqlite::Connection;
use yaboard_core::db::open_db_in_memory;
use yaboard_core::{
    slugify, BoardConfig, Note, NoteInput, NoteRepository, NoteService, Principal, Route,
    ServiceError, SqliteNoteRepository, SqliteUserRepository, User, UserRepository,
    ValidationError,
};

const TEST_SLUG: &str = "Slug_text";
const NOTE_TITLE: &str = "title";
const NEW_NOTE_TITLE: &str = "updated title";
const NOTE_TEXT: &str = "text";
const NEW_NOTE_TEXT: &str = "updated text";

struct Fixture {
    conn: Connection,
    author: User,
    reader: User,
}

fn setup() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let author = User::new("Лев Толстой");
    let reader = User::new("Читатель простой");
    {
        let users = SqliteUserRepository::try_new(&conn).unwrap();
        users.create_user(&author).unwrap();
        users.create_user(&reader).unwrap();
    }
    Fixture {
        conn,
        author,
        reader,
    }
}

fn seed_note(fx: &Fixture) -> Note {
    let note = Note::new(NOTE_TITLE, NOTE_TEXT, "note-slug", fx.author.id);
    SqliteNoteRepository::try_new(&fx.conn)
        .unwrap()
        .create_note(&note)
        .unwrap();
    note
}

fn note_count(conn: &Connection) -> u64 {
    SqliteNoteRepository::try_new(conn)
        .unwrap()
        .count_notes()
        .unwrap()
}

fn form_data() -> NoteInput {
    NoteInput::new("Заголовок", "Текст").with_slug(TEST_SLUG)
}

#[test]
fn user_can_create_note() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let created = service
        .create_note(&Principal::from(&fx.author), form_data())
        .unwrap();
    assert_eq!(created.redirect, Route::NotesSuccess);
    assert_eq!(note_count(&fx.conn), 1);

    let note = created.record;
    assert_eq!(note.title, "Заголовок");
    assert_eq!(note.text, "Текст");
    assert_eq!(note.slug, TEST_SLUG);
    assert_eq!(note.author, fx.author.id);
}

#[test]
fn anonymous_cant_create_note() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .create_note(&Principal::Anonymous, form_data())
        .unwrap_err();
    match err {
        ServiceError::AuthRequired { login_redirect } => {
            assert_eq!(login_redirect, "/auth/login/?next=/notes/add/");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(note_count(&fx.conn), 0);
}

#[test]
fn slug_must_be_unique() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());
    let author = Principal::from(&fx.author);

    service.create_note(&author, form_data()).unwrap();
    let err = service.create_note(&author, form_data()).unwrap_err();
    match &err {
        ServiceError::SlugConflict(slug) => assert_eq!(slug, TEST_SLUG),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with(TEST_SLUG));
    assert_eq!(note_count(&fx.conn), 1);
}

#[test]
fn slug_is_unique_across_owners() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    service
        .create_note(&Principal::from(&fx.author), form_data())
        .unwrap();
    let err = service
        .create_note(&Principal::from(&fx.reader), form_data())
        .unwrap_err();
    assert!(matches!(err, ServiceError::SlugConflict(_)));
}

#[test]
fn empty_slug_is_derived_from_title() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let title = "Заметка без slug";
    let created = service
        .create_note(
            &Principal::from(&fx.author),
            NoteInput::new(title, "Содержание без slug"),
        )
        .unwrap();
    assert_eq!(created.record.slug, slugify(title, 100));
    assert_eq!(created.record.slug, "zametka-bez-slug");
}

#[test]
fn blank_supplied_slug_is_derived_from_title() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let created = service
        .create_note(
            &Principal::from(&fx.author),
            NoteInput::new("Заголовок", "Текст").with_slug("   "),
        )
        .unwrap();
    assert_eq!(created.record.slug, "zagolovok");
}

#[test]
fn derived_slug_collision_is_rejected() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());
    let author = Principal::from(&fx.author);

    service
        .create_note(&author, NoteInput::new("Заголовок", "раз"))
        .unwrap();
    let err = service
        .create_note(&author, NoteInput::new("Заголовок", "два"))
        .unwrap_err();
    match err {
        ServiceError::SlugConflict(slug) => assert_eq!(slug, "zagolovok"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn title_without_slug_material_is_invalid() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .create_note(&Principal::from(&fx.author), NoteInput::new("?!", "Текст"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Invalid(ValidationError::EmptyField("slug"))
    ));
}

#[test]
fn note_text_with_bad_words_is_rejected() {
    let fx = setup();
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .create_note(
            &Principal::from(&fx.author),
            NoteInput::new("Заголовок", "какой негодяй"),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::ProhibitedContent(_)));
    assert_eq!(note_count(&fx.conn), 0);
}

#[test]
fn author_can_edit_note() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let edited = service
        .edit_note(
            &Principal::from(&fx.author),
            &note.slug,
            NoteInput::new(NEW_NOTE_TITLE, NEW_NOTE_TEXT),
        )
        .unwrap();
    assert_eq!(edited.redirect, Route::NotesSuccess);
    assert_eq!(edited.record.id, note.id);
    assert_eq!(edited.record.title, NEW_NOTE_TITLE);
    assert_eq!(edited.record.text, NEW_NOTE_TEXT);
    assert_eq!(edited.record.slug, "updated-title");
    assert_eq!(edited.record.author, fx.author.id);
}

#[test]
fn author_can_keep_own_slug_on_edit() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let edited = service
        .edit_note(
            &Principal::from(&fx.author),
            &note.slug,
            NoteInput::new(NEW_NOTE_TITLE, NEW_NOTE_TEXT).with_slug(note.slug.clone()),
        )
        .unwrap();
    assert_eq!(edited.record.slug, note.slug);
}

#[test]
fn edit_cannot_take_another_notes_slug() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());
    let author = Principal::from(&fx.author);
    service.create_note(&author, form_data()).unwrap();

    let err = service
        .edit_note(
            &author,
            &note.slug,
            NoteInput::new(NEW_NOTE_TITLE, NEW_NOTE_TEXT).with_slug(TEST_SLUG),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::SlugConflict(_)));
}

#[test]
fn other_user_cant_edit_note_of_another_user() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .edit_note(
            &Principal::from(&fx.reader),
            &note.slug,
            NoteInput::new(NEW_NOTE_TITLE, NEW_NOTE_TEXT),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));

    let stored = SqliteNoteRepository::try_new(&fx.conn)
        .unwrap()
        .get_note_by_slug(&note.slug)
        .unwrap()
        .unwrap();
    assert_eq!(stored, note);
}

#[test]
fn author_can_delete_note() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let redirect = service
        .delete_note(&Principal::from(&fx.author), &note.slug)
        .unwrap();
    assert_eq!(redirect, Route::NotesSuccess);
    assert_eq!(note_count(&fx.conn), 0);
}

#[test]
fn other_user_cant_delete_note_of_another_user() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .delete_note(&Principal::from(&fx.reader), &note.slug)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
    assert_eq!(note_count(&fx.conn), 1);
}

#[test]
fn anonymous_delete_redirects_to_login() {
    let fx = setup();
    let note = seed_note(&fx);
    let service = NoteService::new(SqliteNoteRepository::try_new(&fx.conn).unwrap());

    let err = service
        .delete_note(&Principal::Anonymous, &note.slug)
        .unwrap_err();
    match err {
        ServiceError::AuthRequired { login_redirect } => {
            assert_eq!(login_redirect, "/auth/login/?next=/notes/delete/note-slug/");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(note_count(&fx.conn), 1);
}

#[test]
fn supplied_slug_respects_configured_length() {
    let fx = setup();
    let config = BoardConfig {
        slug_max_length: 20,
        ..BoardConfig::default()
    };
    let service =
        NoteService::with_config(SqliteNoteRepository::try_new(&fx.conn).unwrap(), &config);
    let author = Principal::from(&fx.author);

    let err = service
        .create_note(&author, NoteInput::new(NOTE_TITLE, NOTE_TEXT).with_slug("a".repeat(50)))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Invalid(ValidationError::TooLong {
            field: "slug",
            max: 20
        })
    ));
    assert_eq!(note_count(&fx.conn), 0);

    let created = service
        .create_note(&author, NoteInput::new(NOTE_TITLE, NOTE_TEXT).with_slug("a".repeat(20)))
        .unwrap();
    assert_eq!(created.record.slug.len(), 20);
}
