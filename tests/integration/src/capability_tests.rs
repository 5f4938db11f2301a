//! Capability gate on the history-less backend: every history operation
//! fails fast with `HistoryUnsupported`, while the ordinary
//! session/tag/production lifecycle keeps working.

mod common;

use cfgrepo_core::{ConfigRepository, Error, Provider, Version, WriteSession};
use cfgrepo_test_utils::{init_tracing, store};
use common::{check_entry, content_of};
use pretty_assertions::assert_eq;

#[test]
fn test_backend_reports_no_history_support() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    let repo = provider.repository("instance").unwrap();
    assert!(!repo.supports_history());
}

#[test]
fn test_every_history_operation_fails_with_history_unsupported() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    let repo = provider.repository("instance").unwrap();
    let session = repo.init(None).unwrap();
    check_entry(&session, "app.xml", b"content");

    let operations: Vec<(&str, Box<dyn Fn() -> Option<Error> + '_>)> = vec![
        ("reset_path", Box::new(|| session.reset_path("app.xml").err())),
        ("reset_all", Box::new(|| session.reset_all().err())),
        ("is_undoable", Box::new(|| session.is_undoable().err())),
        ("undo", Box::new(|| session.undo().err())),
        ("is_redoable", Box::new(|| session.is_redoable().err())),
        ("redo", Box::new(|| session.redo().err())),
    ];

    for (name, call) in operations {
        match call() {
            Some(Error::HistoryUnsupported { operation }) => {
                assert_eq!(operation, name);
            }
            other => panic!("{name} should fail with HistoryUnsupported, got {other:?}"),
        }
    }
}

/// The gate does not get in the way of the supported lifecycle.
#[test]
fn test_lifecycle_still_works_without_history() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    let repo = provider.repository("instance").unwrap();

    let session = repo.init(None).unwrap();
    check_entry(&session, "conf/app.xml", b"generation-1");
    let v1 = Version::new("v1");
    session.tag(&v1).unwrap();
    repo.set_production_version(&v1).unwrap();

    let session = repo.init(None).unwrap();
    check_entry(&session, "conf/app.xml", b"generation-2");
    let v2 = Version::new("v2");
    session.tag(&v2).unwrap();

    // Production still serves generation-1 until moved
    let view = repo.read(None).unwrap().unwrap();
    assert_eq!(content_of(&view, "conf/app.xml"), b"generation-1");

    repo.set_production_version(&v2).unwrap();
    let view = repo.read(None).unwrap().unwrap();
    assert_eq!(content_of(&view, "conf/app.xml"), b"generation-2");
}
