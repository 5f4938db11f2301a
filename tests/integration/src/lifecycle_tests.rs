//! Backend-generic lifecycle suite: creation, population, tagging,
//! production pointer, reuse. Runs identically against both backends.

mod common;

use cfgrepo_core::{ConfigRepository, Error, Provider, ReadView, Resource, Version, WriteSession};
use cfgrepo_test_utils::{content, init_tracing, store};
use common::{check_entry, content_of, tag_version};
use pretty_assertions::assert_eq;

fn fresh_repository_starts_empty(repo: &impl ConfigRepository) {
    assert!(repo.versions().unwrap().is_empty());
    assert_eq!(repo.production_version().unwrap(), None);
    assert!(repo.read(None).unwrap().is_none());
}

#[test]
fn test_fresh_repository_starts_empty_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    fresh_repository_starts_empty(&provider.repository("instance").unwrap());
}

#[test]
fn test_fresh_repository_starts_empty_copy() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    fresh_repository_starts_empty(&provider.repository("instance").unwrap());
}

/// init → push entries → tag → set production → read() serves the content.
fn populate_flow(repo: &impl ConfigRepository) {
    let session = repo.init(None).unwrap();
    check_entry(&session, "conf/one.xml", b"one");
    check_entry(&session, "conf/two.xml", b"two");
    check_entry(&session, "three.xml", b"three");

    let v1 = Version::new("v1");
    session.tag(&v1).unwrap();
    repo.set_production_version(&v1).unwrap();

    assert_eq!(repo.versions().unwrap(), vec![v1.clone()]);
    assert_eq!(repo.production_version().unwrap(), Some(v1));

    let view = repo.read(None).unwrap().unwrap();
    assert_eq!(content_of(&view, "conf/one.xml"), b"one");
    assert_eq!(content_of(&view, "conf/two.xml"), b"two");
    assert_eq!(view.paths().unwrap().len(), 3);
}

#[test]
fn test_populate_flow_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    populate_flow(&provider.repository("instance").unwrap());
}

#[test]
fn test_populate_flow_copy() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    populate_flow(&provider.repository("instance").unwrap());
}

fn tag_errors(repo: &impl ConfigRepository) {
    let session = repo.init(None).unwrap();
    assert!(matches!(
        session.tag(&content::unique_version("empty")),
        Err(Error::EmptySession)
    ));
    assert!(matches!(
        session.tag(&Version::new("")),
        Err(Error::InvalidArgument { .. })
    ));

    check_entry(&session, "app.xml", b"content");
    let taken = Version::new("taken");
    session.tag(&taken).unwrap();

    let other = repo.init(Some(&taken)).unwrap();
    check_entry(&other, "app.xml", b"different");
    assert!(matches!(
        other.tag(&taken),
        Err(Error::DuplicateVersion { .. })
    ));
}

#[test]
fn test_tag_errors_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    tag_errors(&provider.repository("instance").unwrap());
}

#[test]
fn test_tag_errors_copy() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    tag_errors(&provider.repository("instance").unwrap());
}

fn traversal_rejected(repo: &impl ConfigRepository) {
    let session = repo.init(None).unwrap();
    for path in [
        "../escape.xml",
        "..\\escape.xml",
        "conf/../../escape.xml",
        "conf\\..\\..\\escape.xml",
    ] {
        assert!(
            matches!(
                session.push_resource(path, &Resource::new("x")),
                Err(Error::PathViolation { .. })
            ),
            "push accepted {path:?}"
        );
        assert!(
            matches!(session.resource(path), Err(Error::PathViolation { .. })),
            "read accepted {path:?}"
        );
    }
}

#[test]
fn test_traversal_rejected_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    traversal_rejected(&provider.repository("instance").unwrap());
}

#[test]
fn test_traversal_rejected_copy() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    traversal_rejected(&provider.repository("instance").unwrap());
}

#[test]
fn test_session_isolation_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    let repo = provider.repository("instance").unwrap();

    let v1 = tag_version(&repo, "v1", b"v1-content");

    // A live session pinned to v1 keeps observing v1 while another
    // session tags new content and production moves on.
    let pinned = repo.init(Some(&v1)).unwrap();

    let other = repo.init(Some(&v1)).unwrap();
    check_entry(&other, "app.xml", b"v2-content");
    other.tag(&Version::new("v2")).unwrap();
    repo.set_production_version(&Version::new("v2")).unwrap();

    assert_eq!(content_of(&pinned, "app.xml"), b"v1-content");
}

#[test]
fn test_view_isolation_copy() {
    init_tracing();
    let (_temp, provider) = store::copy_provider();
    let repo = provider.repository("instance").unwrap();

    let v1 = tag_version(&repo, "v1", b"v1-content");

    // The copy backend has a single working directory, so isolation is
    // guaranteed for views over tagged snapshots rather than between
    // live sessions.
    let pinned = repo.read(Some(&v1)).unwrap().unwrap();

    let session = repo.init(Some(&v1)).unwrap();
    check_entry(&session, "app.xml", b"v2-content");
    session.tag(&Version::new("v2")).unwrap();
    repo.set_production_version(&Version::new("v2")).unwrap();

    assert_eq!(content_of(&pinned, "app.xml"), b"v1-content");
}

#[test]
fn test_reuse_across_providers_git() {
    init_tracing();
    let (temp, provider) = store::git_provider();
    {
        let repo = provider.repository("instance").unwrap();
        let v1 = tag_version(&repo, "v1", b"kept");
        repo.set_production_version(&v1).unwrap();
    }
    drop(provider);

    let provider = store::reopen_git_provider(&temp);
    let repo = provider.repository("instance").unwrap();
    assert_eq!(repo.versions().unwrap(), vec![Version::new("v1")]);
    assert_eq!(repo.production_version().unwrap(), Some(Version::new("v1")));
    let view = repo.read(None).unwrap().unwrap();
    assert_eq!(content_of(&view, "app.xml"), b"kept");
}

#[test]
fn test_reuse_across_providers_copy() {
    init_tracing();
    let (temp, provider) = store::copy_provider();
    {
        let repo = provider.repository("instance").unwrap();
        let v1 = tag_version(&repo, "v1", b"kept");
        repo.set_production_version(&v1).unwrap();
    }
    drop(provider);

    let provider = store::reopen_copy_provider(&temp);
    let repo = provider.repository("instance").unwrap();
    assert_eq!(repo.versions().unwrap(), vec![Version::new("v1")]);
    assert_eq!(repo.production_version().unwrap(), Some(Version::new("v1")));
    let view = repo.read(None).unwrap().unwrap();
    assert_eq!(content_of(&view, "app.xml"), b"kept");
}

#[test]
fn test_many_unique_versions_accumulate_git() {
    init_tracing();
    let (_temp, provider) = store::git_provider();
    let repo = provider.repository("instance").unwrap();

    for _ in 0..5 {
        let session = repo.init(None).unwrap();
        session
            .push_resource("app.xml", &content::unique_resource("round"))
            .unwrap();
        session.tag(&content::unique_version("v")).unwrap();
    }

    assert_eq!(repo.versions().unwrap().len(), 5);
}
