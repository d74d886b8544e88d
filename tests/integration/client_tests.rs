//! Job board scenarios against the in-memory server.

use jobboard::jobs::CreateJobInput;
use jobboard::{CacheConfig, ErrorKind};

use crate::common::TestFixture;

#[tokio::test]
async fn test_load_job_twice_sends_once() {
    let fixture = TestFixture::new();

    let first = fixture.client.load_job("j1").await.unwrap().unwrap();
    let second = fixture.client.load_job("j1").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.title, "Engineer");
    assert_eq!(first.description.as_deref(), Some("Build things"));
    assert_eq!(fixture.server.request_count(), 1);
}

#[tokio::test]
async fn test_load_jobs_always_sends() {
    let fixture = TestFixture::new();

    let jobs = fixture.client.load_jobs().await.unwrap();
    fixture.client.load_jobs().await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company.name, "Acme");
    assert_eq!(fixture.server.request_count(), 2);
}

#[tokio::test]
async fn test_load_company_with_jobs() {
    let fixture = TestFixture::new();

    let company = fixture.client.load_company("c1").await.unwrap().unwrap();

    assert_eq!(company.name, "Acme");
    assert_eq!(company.jobs.len(), 1);
    assert_eq!(company.jobs[0].id, "j1");
    assert_eq!(company.jobs[0].title, "Engineer");
}

#[tokio::test]
async fn test_unknown_ids_are_none() {
    let fixture = TestFixture::new();

    assert!(fixture.client.load_job("nope").await.unwrap().is_none());
    assert!(fixture.client.load_company("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_then_load_needs_no_request() {
    let fixture = TestFixture::new();
    fixture.login();

    let created = fixture
        .client
        .create_job(&CreateJobInput::new("Engineer", "Build things"))
        .await
        .unwrap();
    assert_eq!(created.company.id, "c1");
    assert_eq!(fixture.server.request_count(), 1);

    let loaded = fixture.client.load_job(&created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(fixture.server.request_count(), 1);
}

#[tokio::test]
async fn test_created_job_listed_by_load_jobs() {
    let fixture = TestFixture::new();
    fixture.login();

    let created = fixture
        .client
        .create_job(&CreateJobInput::new("Designer", "Draw things"))
        .await
        .unwrap();
    let jobs = fixture.client.load_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().any(|j| j.id == created.id));
}

#[tokio::test]
async fn test_create_job_logged_out_is_unauthorized() {
    let fixture = TestFixture::new();

    let err = fixture
        .client
        .create_job(&CreateJobInput::new("Engineer", "Build things"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Unauthorized");
    assert!(fixture.client.cache().is_empty());
    assert_eq!(fixture.server.resolvers().jobs().len(), 1);
}

#[tokio::test]
async fn test_logout_drops_authorization() {
    let fixture = TestFixture::new();
    fixture.login();
    fixture.session.logout();

    let err = fixture
        .client
        .create_job(&CreateJobInput::new("Engineer", "Build things"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_disabled_cache_always_sends() {
    let fixture = TestFixture::with_cache_config(CacheConfig::disabled());
    fixture.login();

    let created = fixture
        .client
        .create_job(&CreateJobInput::new("Engineer", "Build things"))
        .await
        .unwrap();
    fixture.client.load_job(&created.id).await.unwrap();
    fixture.client.load_job(&created.id).await.unwrap();

    assert_eq!(fixture.server.request_count(), 3);
    assert!(fixture.client.cache().is_empty());
}

#[tokio::test]
async fn test_job_and_company_share_entities() {
    let fixture = TestFixture::new();

    fixture.client.load_job("j1").await.unwrap();
    fixture.client.load_company("c1").await.unwrap();

    // Job j1 and company c1 are each stored once.
    assert_eq!(fixture.client.cache().entity_count(), 2);
    assert_eq!(fixture.client.cache().len(), 2);
}

#[tokio::test]
async fn test_concurrent_loads() {
    let fixture = TestFixture::new();

    let loads = (0..4).map(|_| {
        let client = fixture.client.clone();
        async move { client.load_job("j1").await }
    });
    let results = futures::future::join_all(loads).await;

    let first = results[0].as_ref().unwrap().clone();
    for result in &results {
        assert_eq!(result.as_ref().unwrap(), &first);
    }
    let sent = fixture.server.request_count();
    assert!((1..=4).contains(&sent));

    fixture.client.load_job("j1").await.unwrap();
    assert_eq!(fixture.server.request_count(), sent);
}
