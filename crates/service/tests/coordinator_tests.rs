//! Integration tests for the file storage coordinator.

mod common;

use common::{TestContext, upload};
use dossier_core::CaseNumber;
use dossier_metadata::{CaseFileRepo, CaseRepo};
use dossier_service::{CaseDraft, ServiceError};
use dossier_storage::FileStore;

fn number(s: &str) -> CaseNumber {
    CaseNumber::new(s).unwrap()
}

#[tokio::test]
async fn batch_continues_past_a_failing_file() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let files = vec![
        upload("a.pdf", b"one"),
        upload("b.pdf", b"two"),
        upload("payload.exe", b"three"), // fails validation
        upload("d.pdf", b"four"),
        upload("e.pdf", b"five"),
    ];

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), files, Some("tester"))
        .await
        .unwrap();

    assert_eq!(outcome.submitted, 5);
    assert_eq!(outcome.saved_count(), 4);
    assert_eq!(outcome.failed_count(), 1);

    for record in &outcome.saved {
        assert!(ctx.on_disk(&record.file_name), "missing {}", record.file_name);
        assert_eq!(record.uploaded_by.as_deref(), Some("tester"));
    }
}

#[tokio::test]
async fn duplicate_desired_names_get_distinct_stored_names() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let files = vec![upload("report.pdf", b"first"), upload("report.pdf", b"second")];
    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), files, None)
        .await
        .unwrap();

    assert_eq!(outcome.saved_count(), 2);
    let a = &outcome.saved[0];
    let b = &outcome.saved[1];
    assert_ne!(a.file_name, b.file_name);
    // Both keep the user-supplied name for display.
    assert_eq!(a.original_file_name, "report.pdf");
    assert_eq!(b.original_file_name, "report.pdf");
    assert!(ctx.on_disk(&a.file_name));
    assert!(ctx.on_disk(&b.file_name));
}

#[tokio::test]
async fn add_files_to_unknown_case_is_a_hard_failure() {
    let ctx = TestContext::new().await;

    let result = ctx
        .coordinator
        .add_files(&number("GHOST"), vec![upload("a.pdf", b"data")], None)
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert!(!ctx.on_disk("a.pdf"));
}

#[tokio::test]
async fn empty_batch_is_fine() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), Vec::new(), None)
        .await
        .unwrap();
    assert_eq!(outcome.submitted, 0);
    assert_eq!(outcome.saved_count(), 0);
}

#[tokio::test]
async fn successful_batch_bumps_update_date() {
    let ctx = TestContext::new().await;
    let before = ctx.create_case("CASE-1").await;
    assert!(before.update_date.is_none());

    ctx.coordinator
        .add_files(&number("CASE-1"), vec![upload("a.pdf", b"data")], None)
        .await
        .unwrap();

    let after = ctx
        .metadata
        .get_case_by_number("CASE-1")
        .await
        .unwrap()
        .unwrap();
    assert!(after.update_date.is_some());
}

#[tokio::test]
async fn create_case_with_files_rejects_duplicate_number() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let draft = CaseDraft {
        number: number("CASE-1"),
        author: None,
        investigator: None,
        policeman: None,
        object: None,
    };
    let result = ctx
        .coordinator
        .create_case_with_files(draft, vec![upload("a.pdf", b"data")], None)
        .await;
    assert!(matches!(result, Err(ServiceError::AlreadyExists(_))));
    // Nothing was written for the rejected case.
    assert!(!ctx.on_disk("a.pdf"));
    assert!(!ctx.metadata.file_name_exists("a.pdf").await.unwrap());
}

#[tokio::test]
async fn create_case_with_files_stores_the_batch() {
    let ctx = TestContext::new().await;

    let draft = CaseDraft {
        number: number("CASE-9"),
        author: Some("author".to_string()),
        investigator: Some("investigator".to_string()),
        policeman: None,
        object: Some("object".to_string()),
    };
    let (case, outcome) = ctx
        .coordinator
        .create_case_with_files(
            draft,
            vec![upload("a.pdf", b"one"), upload("b.txt", b"two")],
            Some("author"),
        )
        .await
        .unwrap();

    assert_eq!(case.number, "CASE-9");
    assert_eq!(outcome.saved_count(), 2);
    assert_eq!(ctx.metadata.count_case_files(case.case_id).await.unwrap(), 2);
}

#[tokio::test]
async fn delete_removes_disk_and_record() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), vec![upload("a.pdf", b"data")], None)
        .await
        .unwrap();
    let record = &outcome.saved[0];
    assert!(ctx.on_disk(&record.file_name));

    ctx.coordinator
        .delete_file(&number("CASE-1"), record.file_id)
        .await
        .unwrap();

    assert!(!ctx.on_disk(&record.file_name));
    assert!(ctx.metadata.get_case_file(record.file_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_bumps_update_date() {
    let ctx = TestContext::new().await;
    let case = ctx.create_case("CASE-1").await;
    assert!(case.update_date.is_none());

    // Seed the file through the stores directly so the only mutation the
    // coordinator performs is the delete itself.
    ctx.storage
        .put("a.pdf", bytes::Bytes::from_static(b"data"))
        .await
        .unwrap();
    let record = ctx
        .metadata
        .insert_case_file(&dossier_metadata::models::NewCaseFile {
            case_id: case.case_id,
            file_name: "a.pdf".to_string(),
            original_file_name: "a.pdf".to_string(),
            file_size: 4,
            file_type: "pdf".to_string(),
            uploaded_at: time::OffsetDateTime::now_utc(),
            uploaded_by: None,
        })
        .await
        .unwrap();

    ctx.coordinator
        .delete_file(&number("CASE-1"), record.file_id)
        .await
        .unwrap();

    let after = ctx
        .metadata
        .get_case_by_number("CASE-1")
        .await
        .unwrap()
        .unwrap();
    assert!(after.update_date.is_some());
}

#[tokio::test]
async fn delete_with_missing_disk_file_still_succeeds() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), vec![upload("a.pdf", b"data")], None)
        .await
        .unwrap();
    let record = &outcome.saved[0];

    // Simulate the divergence: the physical file vanished out-of-band.
    std::fs::remove_file(ctx.disk_path(&record.file_name)).unwrap();

    ctx.coordinator
        .delete_file(&number("CASE-1"), record.file_id)
        .await
        .unwrap();
    assert!(ctx.metadata.get_case_file(record.file_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_checks_ownership() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-A").await;
    ctx.create_case("CASE-B").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-A"), vec![upload("a.pdf", b"data")], None)
        .await
        .unwrap();
    let record = &outcome.saved[0];

    let result = ctx
        .coordinator
        .delete_file(&number("CASE-B"), record.file_id)
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    // Both stores untouched.
    assert!(ctx.on_disk(&record.file_name));
    assert!(ctx.metadata.get_case_file(record.file_id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_unknown_file_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let result = ctx.coordinator.delete_file(&number("CASE-1"), 424242).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn download_roundtrip() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), vec![upload("a.pdf", b"payload")], None)
        .await
        .unwrap();
    let record = &outcome.saved[0];

    let (fetched, data) = ctx
        .coordinator
        .download_file(&number("CASE-1"), record.file_id)
        .await
        .unwrap();
    assert_eq!(fetched.file_name, record.file_name);
    assert_eq!(&data[..], b"payload");
}

#[tokio::test]
async fn download_with_missing_disk_file_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    let outcome = ctx
        .coordinator
        .add_files(&number("CASE-1"), vec![upload("a.pdf", b"payload")], None)
        .await
        .unwrap();
    let record = &outcome.saved[0];
    std::fs::remove_file(ctx.disk_path(&record.file_name)).unwrap();

    let result = ctx
        .coordinator
        .download_file(&number("CASE-1"), record.file_id)
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn list_files_pages_newest_first() {
    let ctx = TestContext::new().await;
    ctx.create_case("CASE-1").await;

    for batch in 0..3 {
        ctx.coordinator
            .add_files(
                &number("CASE-1"),
                vec![upload(&format!("doc_{batch}.pdf"), b"data")],
                None,
            )
            .await
            .unwrap();
    }

    let page = ctx
        .coordinator
        .list_files(&number("CASE-1"), 0, 2)
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].original_file_name, "doc_2.pdf");

    let result = ctx.coordinator.list_files(&number("CASE-1"), 0, 0).await;
    assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
}
