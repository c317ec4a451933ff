//! Integration tests for the add/edit view-model.
//!
//! Covers validation, the owner and rating rules applied on create, the
//! rating prompt on edit, and how write failures leave the form.

mod common;

use bookshelf::error::{AuthError, PersistenceError, ShelfError, ValidationError};
use bookshelf::models::{Genre, ReadingStatus};
use bookshelf::state::{CommitOutcome, CommitState};
use bookshelf::view_state::Route;
use common::*;

fn fill(editor: &mut bookshelf::state::BookEditor, title: &str, author: &str, genre: Genre) {
    editor.set_title(title);
    editor.set_author(author);
    editor.set_genre(Some(genre));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_stores_unread_book_for_current_user() {
    let shelf = TestShelf::signed_in();
    let mut editor = shelf.create_editor();
    fill(&mut editor, "  Dune ", " Herbert ", Genre::Novel);

    let (id, route) = match editor.save().await.unwrap() {
        CommitOutcome::Saved { id, route } => (id, route),
        other => panic!("expected Saved, got {:?}", other),
    };
    assert_eq!(route, Route::Back);

    let stored = shelf.record(&id);
    assert_eq!(stored.title, "Dune");
    assert_eq!(stored.author, "Herbert");
    assert_eq!(stored.owner_id, TEST_USER_ID);
    assert_eq!(stored.status, ReadingStatus::NotDone);
    assert_eq!(stored.rating, 0);
    assert!(stored.rating_is_consistent());
}

#[tokio::test]
async fn test_create_resets_form_and_leaves_notice() {
    let shelf = TestShelf::signed_in();
    let mut editor = shelf.create_editor();
    fill(&mut editor, "Dune", "Herbert", Genre::Novel);

    editor.save().await.unwrap();

    assert!(editor.draft().title.is_empty());
    assert!(editor.draft().genre.is_none());
    let notice = editor.notice().unwrap();
    assert!(!notice.is_error());
    assert_eq!(notice.message, "Book added.");
}

#[tokio::test]
async fn test_create_with_missing_fields_writes_nothing() {
    let shelf = TestShelf::signed_in();
    let mut editor = shelf.create_editor();
    editor.set_title("Dune");
    editor.set_author("   ");
    editor.set_genre(Some(Genre::Novel));

    let err = editor.save().await.unwrap_err();
    assert_eq!(err, ShelfError::Validation(ValidationError::MissingFields));
    assert!(editor.notice().is_some_and(|n| n.is_error()));
    assert_eq!(editor.draft().title, "Dune");
    assert_eq!(shelf.store.write_count(), 0);
}

#[tokio::test]
async fn test_create_without_genre_is_rejected() {
    let shelf = TestShelf::signed_in();
    let mut editor = shelf.create_editor();
    editor.set_title("Dune");
    editor.set_author("Herbert");

    assert!(editor.save().await.unwrap_err().is_validation());
    assert!(shelf.store.records().is_empty());
}

#[tokio::test]
async fn test_create_without_session_fails() {
    let shelf = TestShelf::signed_out();
    let mut editor = shelf.create_editor();
    fill(&mut editor, "Dune", "Herbert", Genre::Novel);

    assert_eq!(
        editor.save().await,
        Err(ShelfError::Auth(AuthError::NotSignedIn))
    );
    assert!(shelf.store.records().is_empty());
}

#[tokio::test]
async fn test_create_failure_keeps_form() {
    let shelf = TestShelf::signed_in();
    shelf.store.set_create_should_fail(true);
    let mut editor = shelf.create_editor();
    fill(&mut editor, "Dune", "Herbert", Genre::Novel);

    let err = editor.save().await.unwrap_err();
    assert!(matches!(err, ShelfError::Persistence(PersistenceError::Rejected { .. })));
    assert_eq!(editor.draft().title, "Dune");
    assert_eq!(editor.state(), CommitState::Idle);
    assert!(editor.notice().is_some_and(|n| n.is_error()));

    shelf.store.set_create_should_fail(false);
    assert!(matches!(editor.save().await, Ok(CommitOutcome::Saved { .. })));
}

// ============================================================================
// Edit
// ============================================================================

#[tokio::test]
async fn test_edit_updates_fields() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);

    editor.set_title("Dune Messiah");
    editor.set_genre_label("Komik").unwrap();
    let outcome = editor.save().await.unwrap();

    assert_eq!(
        outcome,
        CommitOutcome::Saved {
            id: id.clone(),
            route: Route::Back
        }
    );
    let stored = shelf.record(&id);
    assert_eq!(stored.title, "Dune Messiah");
    assert_eq!(stored.genre, Genre::Comic);
    assert_eq!(stored.owner_id, TEST_USER_ID);
    assert_eq!(editor.notice().map(|n| n.message.as_str()), Some("Book updated."));
}

#[tokio::test]
async fn test_edit_finished_with_rating_commits_directly() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);

    editor.set_status(ReadingStatus::Done);
    editor.set_rating_input("4");
    assert!(matches!(editor.save().await, Ok(CommitOutcome::Saved { .. })));

    let stored = shelf.record(&id);
    assert_eq!(stored.status, ReadingStatus::Done);
    assert_eq!(stored.rating, 4);
}

#[tokio::test]
async fn test_edit_back_to_unread_stores_rating_zero() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed(finished_book("Dune", "Herbert", Genre::Novel, 5));
    let mut editor = shelf.edit_editor(&id);

    editor.set_status(ReadingStatus::NotDone);
    editor.save().await.unwrap();

    let stored = shelf.record(&id);
    assert_eq!(stored.status, ReadingStatus::NotDone);
    assert_eq!(stored.rating, 0);
}

#[tokio::test]
async fn test_rating_prompt_then_submit() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);

    editor.set_status(ReadingStatus::Done);
    assert_eq!(editor.save().await, Ok(CommitOutcome::RatingRequired));
    assert_eq!(editor.state(), CommitState::AwaitingRating);
    assert_eq!(shelf.store.write_count(), 0);

    let outcome = editor.submit_rating("5").await.unwrap();
    assert!(matches!(outcome, CommitOutcome::Saved { .. }));
    assert_eq!(editor.state(), CommitState::Idle);

    let stored = shelf.record(&id);
    assert_eq!(stored.status, ReadingStatus::Done);
    assert_eq!(stored.rating, 5);
}

#[tokio::test]
async fn test_invalid_rating_keeps_prompt_open() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);
    editor.set_status(ReadingStatus::Done);
    editor.save().await.unwrap();

    for input in ["0", "6", "abc", ""] {
        assert_eq!(
            editor.submit_rating(input).await,
            Err(ShelfError::Validation(ValidationError::InvalidRating)),
            "input {:?}",
            input
        );
        assert_eq!(editor.state(), CommitState::AwaitingRating);
    }
    assert_eq!(shelf.store.write_count(), 0);

    assert!(matches!(
        editor.submit_rating(" 3 ").await,
        Ok(CommitOutcome::Saved { .. })
    ));
    assert_eq!(shelf.record(&id).rating, 3);
}

#[tokio::test]
async fn test_cancel_rating_writes_nothing_and_allows_resave() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);
    editor.set_status(ReadingStatus::Done);
    editor.save().await.unwrap();

    assert_eq!(editor.save().await, Ok(CommitOutcome::Ignored));
    editor.cancel_rating();
    assert_eq!(editor.state(), CommitState::Idle);
    assert_eq!(shelf.store.write_count(), 0);
    assert_eq!(shelf.record(&id).status, ReadingStatus::NotDone);
    assert_eq!(editor.draft().status, ReadingStatus::Done);
    assert_eq!(editor.draft().rating, 0);

    editor.set_status(ReadingStatus::NotDone);
    assert!(matches!(editor.save().await, Ok(CommitOutcome::Saved { .. })));
}

#[tokio::test]
async fn test_submit_rating_outside_prompt_is_ignored() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);

    assert_eq!(editor.submit_rating("4").await, Ok(CommitOutcome::Ignored));

    let mut creator = shelf.create_editor();
    assert_eq!(creator.submit_rating("4").await, Ok(CommitOutcome::Ignored));
    assert_eq!(shelf.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_failure_keeps_draft() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    shelf.store.set_update_should_fail(true);
    let mut editor = shelf.edit_editor(&id);
    editor.set_title("Dune Messiah");

    let err = editor.save().await.unwrap_err();
    assert!(matches!(err, ShelfError::Persistence(_)));
    assert_eq!(editor.draft().title, "Dune Messiah");
    assert_eq!(editor.state(), CommitState::Idle);
    assert_eq!(shelf.record(&id).title, "Dune");
}

#[tokio::test]
async fn test_update_of_deleted_book_reports_missing_document() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);
    shelf.store.delete(&id).await.unwrap();

    let err = editor.save().await.unwrap_err();
    assert!(matches!(
        err,
        ShelfError::Persistence(PersistenceError::MissingDocument { .. })
    ));
}

#[tokio::test]
async fn test_edit_route_from_list_opens_editor() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut list = shelf.list();
    let _handle = list.activate(TEST_USER_ID);
    list.poll_snapshots();

    let Some(Route::EditBook(record)) = list.edit_route(&id) else {
        panic!("book should be editable");
    };
    let editor = bookshelf::state::BookEditor::for_edit(
        std::sync::Arc::new(shelf.store.clone()),
        Some(&record),
    )
    .unwrap();
    assert_eq!(editor.draft().title, "Dune");
}

#[test]
fn test_edit_without_record_is_not_found() {
    let shelf = TestShelf::signed_in();
    let result = bookshelf::state::BookEditor::for_edit(std::sync::Arc::new(shelf.store), None);
    let err = result.err().unwrap();
    assert_eq!(err.user_message(), "Book data not found.");
}

#[tokio::test]
async fn test_finished_book_with_stale_rating_asks_again() {
    for stale in [0, 6, 9, 255] {
        let shelf = TestShelf::signed_in();
        let id = shelf.seed(finished_book("Dune", "Herbert", Genre::Novel, stale));
        let mut editor = shelf.edit_editor(&id);
        editor.set_title("Dune Messiah");

        assert_eq!(
            editor.save().await,
            Ok(CommitOutcome::RatingRequired),
            "stored rating {}",
            stale
        );
        assert_eq!(shelf.store.write_count(), 0);
        assert_eq!(shelf.record(&id).title, "Dune");

        assert!(matches!(
            editor.submit_rating("4").await,
            Ok(CommitOutcome::Saved { .. })
        ));
        let stored = shelf.record(&id);
        assert_eq!(stored.title, "Dune Messiah");
        assert_eq!(stored.status, ReadingStatus::Done);
        assert_eq!(stored.rating, 4);
        assert!(stored.rating_is_consistent());
    }
}

#[tokio::test]
async fn test_draft_is_frozen_while_rating_prompt_is_open() {
    let shelf = TestShelf::signed_in();
    let id = shelf.seed_book("Dune", "Herbert", Genre::Novel);
    let mut editor = shelf.edit_editor(&id);
    editor.set_status(ReadingStatus::Done);
    assert_eq!(editor.save().await, Ok(CommitOutcome::RatingRequired));

    editor.set_title("   ");
    editor.set_genre(None);
    editor.set_status(ReadingStatus::NotDone);
    assert_eq!(editor.draft().title, "Dune");
    assert_eq!(editor.draft().genre, Some(Genre::Novel));
    assert_eq!(editor.draft().status, ReadingStatus::Done);
    assert_eq!(editor.state(), CommitState::AwaitingRating);

    assert!(matches!(
        editor.submit_rating("2").await,
        Ok(CommitOutcome::Saved { .. })
    ));
    assert_eq!(shelf.record(&id).rating, 2);
}
