//! History scenarios against the git backend, driven the way a
//! deployment client would: populate a start version, then branch
//! sessions off it and exercise reset/undo/redo.

mod common;

use cfgrepo_core::{ConfigRepository, Provider, Version, WriteSession};
use cfgrepo_git::GitRepository;
use cfgrepo_test_utils::{init_tracing, store};
use common::{check_entry, content_of};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FILE1: &str = "history-file1.xml";
const FILE2: &str = "history-file2.xml";
const FILE3: &str = "history-file3.xml";
const FILE4: &str = "history-file4.xml";

/// Populate a repository with three files tagged as the start version.
fn populated(name: &str) -> (TempDir, GitRepository, Version) {
    init_tracing();
    let (temp, provider) = store::git_provider();
    let repo = provider.repository(name).unwrap();

    let session = repo.init(None).unwrap();
    check_entry(&session, FILE1, b"history1");
    check_entry(&session, FILE2, b"history2");
    check_entry(&session, FILE3, b"history3");

    let start = Version::new("start");
    session.tag(&start).unwrap();
    repo.set_production_version(&start).unwrap();

    (temp, repo, start)
}

#[test]
fn test_reset_one_path_restores_start_content() {
    let (_temp, repo, start) = populated("reset-one");
    let original = repo.read(None).unwrap().unwrap();

    let session = repo.init(Some(&start)).unwrap();
    check_entry(&session, FILE1, b"history1a");
    assert_ne!(content_of(&session, FILE1), content_of(&original, FILE1));

    session.reset_path(FILE1).unwrap();

    assert_eq!(content_of(&session, FILE1), content_of(&original, FILE1));
}

#[test]
fn test_reset_all_restores_every_path() {
    let (_temp, repo, start) = populated("reset-all");
    let original = repo.read(None).unwrap().unwrap();

    let session = repo.init(Some(&start)).unwrap();
    check_entry(&session, FILE1, b"history1a");
    check_entry(&session, FILE2, b"history2a");

    assert_ne!(content_of(&session, FILE1), content_of(&original, FILE1));
    assert_ne!(content_of(&session, FILE2), content_of(&original, FILE2));
    // FILE3 untouched
    assert_eq!(content_of(&session, FILE3), content_of(&original, FILE3));

    session.reset_all().unwrap();

    assert_eq!(content_of(&session, FILE1), content_of(&original, FILE1));
    assert_eq!(content_of(&session, FILE2), content_of(&original, FILE2));
    assert_eq!(content_of(&session, FILE3), content_of(&original, FILE3));
}

/// Commit LOOP times, undo back to the first commit, redo to the last,
/// checking the content at every step.
#[test]
fn test_undo_redo_walks_every_recorded_state() {
    let (_temp, repo, start) = populated("undo-redo");
    let session = repo.init(Some(&start)).unwrap();

    const LOOP: usize = 10;
    let contents: Vec<String> = (1..=LOOP).map(|i| format!("history3.0.{i}")).collect();
    for content in &contents {
        check_entry(&session, FILE4, content.as_bytes());
    }

    let mut undone = 0;
    while session.is_undoable().unwrap() {
        assert!(session.undo().unwrap());
        undone += 1;
        assert_eq!(
            content_of(&session, FILE4),
            contents[LOOP - undone - 1].as_bytes()
        );
    }
    assert_eq!(undone, LOOP - 1);
    assert!(!session.undo().unwrap());

    let mut redone = 0;
    while session.is_redoable().unwrap() {
        assert!(session.redo().unwrap());
        redone += 1;
        assert_eq!(content_of(&session, FILE4), contents[redone].as_bytes());
    }
    assert_eq!(redone, LOOP - 1);
    assert!(!session.redo().unwrap());

    // The fully redone state is taggable
    session.tag(&Version::new("undo-redo-done")).unwrap();
    let view = repo
        .read(Some(&Version::new("undo-redo-done")))
        .unwrap()
        .unwrap();
    assert_eq!(content_of(&view, FILE4), contents[LOOP - 1].as_bytes());
}

/// Commit 10 times, undo 5, commit again: the five undone states are
/// gone for good and the new history continues from the fork point.
#[test]
fn test_new_commit_after_undo_abandons_old_future() {
    let (_temp, repo, start) = populated("fork");
    let session = repo.init(Some(&start)).unwrap();

    const LOOP: usize = 10;
    const UNDO: usize = 5;

    let contents: Vec<String> = (1..=LOOP).map(|i| format!("gen1.{i}")).collect();
    for content in &contents {
        check_entry(&session, FILE4, content.as_bytes());
    }

    for _ in 0..UNDO {
        assert!(session.undo().unwrap());
    }
    assert!(session.is_redoable().unwrap());
    assert_eq!(content_of(&session, FILE4), contents[LOOP - UNDO - 1].as_bytes());

    check_entry(&session, FILE4, b"gen2.1");

    assert!(
        !session.is_redoable().unwrap(),
        "a new commit must discard the redo tail"
    );

    // The new history walks: gen2.1 back to gen1.5
    assert!(session.undo().unwrap());
    assert_eq!(content_of(&session, FILE4), contents[LOOP - UNDO - 1].as_bytes());
    assert!(session.redo().unwrap());
    assert_eq!(content_of(&session, FILE4), b"gen2.1");
}

/// Undo to an intermediate state and tag it: the tag captures that
/// state while the session's redo tail stays live.
#[test]
fn test_tagging_after_undo_forks_from_the_past() {
    let (_temp, repo, start) = populated("tag-fork");
    let session = repo.init(Some(&start)).unwrap();

    check_entry(&session, FILE4, b"step-1");
    check_entry(&session, FILE4, b"step-2");
    check_entry(&session, FILE4, b"step-3");

    session.undo().unwrap();
    session.tag(&Version::new("at-step-2")).unwrap();

    // Tagging did not consume the redo tail
    assert!(session.is_redoable().unwrap());
    assert!(session.redo().unwrap());
    assert_eq!(content_of(&session, FILE4), b"step-3");

    let view = repo
        .read(Some(&Version::new("at-step-2")))
        .unwrap()
        .unwrap();
    assert_eq!(content_of(&view, FILE4), b"step-2");
}
