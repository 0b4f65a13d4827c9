//! Integration tests for the project and file lifecycle repositories.
//!
//! Each test works against a fresh temporary data directory.

use assert_matches::assert_matches;
use tempfile::TempDir;
use verso_core::error::CoreError;
use verso_store::models::file::NewUpload;
use verso_store::models::legacy::{DEFAULT_PROJECT_NAME, FORMER_DEFAULT_PROJECT_NAME};
use verso_store::models::project::{CreateProject, UpdateProject};
use verso_store::repositories::{FileRepo, LegacyFileRepo, ProjectRepo};
use verso_store::{ArtifactStore, DocumentStore, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open_stores(dir: &TempDir) -> (DocumentStore, ArtifactStore) {
    let store = DocumentStore::open(dir.path().join("database.json"))
        .await
        .unwrap();
    let artifacts = ArtifactStore::open(dir.path().join("projects"))
        .await
        .unwrap();
    (store, artifacts)
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
    }
}

fn text_upload(file_name: &str, text: &str) -> NewUpload {
    NewUpload {
        file_name: file_name.to_string(),
        content: text.as_bytes().to_vec(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_project_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let project = ProjectRepo::create(&store, &artifacts, &new_project("Demo"))
        .await
        .unwrap();

    assert_eq!(project.name, "Demo");
    assert_eq!(project.description, "");
    assert_eq!(project.completion_rate, 0);
    assert!(project.files.is_empty());
    assert_eq!(project.creation_date, project.last_modified);
    assert!(artifacts.files_dir(project.id).is_dir());

    let found = ProjectRepo::find_by_id(&store, project.id).await.unwrap();
    assert_eq!(found.unwrap().name, "Demo");
}

#[tokio::test]
async fn create_project_requires_name() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let err = ProjectRepo::create(&store, &artifacts, &new_project("   "))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn project_ids_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let a = ProjectRepo::create(&store, &artifacts, &new_project("Same"))
        .await
        .unwrap();
    let b = ProjectRepo::create(&store, &artifacts, &new_project("Same"))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(ProjectRepo::list(&store).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_project_is_partial() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(
        &store,
        &artifacts,
        &CreateProject {
            name: "Original".into(),
            description: Some("first".into()),
        },
    )
    .await
    .unwrap();

    let updated = ProjectRepo::update(
        &store,
        project.id,
        &UpdateProject {
            name: None,
            description: Some("second".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Original");
    assert_eq!(updated.description, "second");
    assert!(updated.last_modified >= project.last_modified);

    // A blank name is ignored rather than clearing the existing one.
    let updated = ProjectRepo::update(
        &store,
        project.id,
        &UpdateProject {
            name: Some("".into()),
            description: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Original");
    assert_eq!(updated.description, "second");
}

#[tokio::test]
async fn update_missing_project_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _artifacts) = open_stores(&dir).await;

    let result = ProjectRepo::update(&store, uuid::Uuid::new_v4(), &UpdateProject::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("Demo"))
        .await
        .unwrap();

    let file = FileRepo::upload(
        &store,
        &artifacts,
        project.id,
        &text_upload("demo.txt", "Hello\n\nWorld"),
    )
    .await
    .unwrap();
    assert_eq!(file.original_segments, strings(&["Hello", "World"]));
    assert_eq!(file.translated_segments, strings(&["", ""]));
    assert_eq!(file.completion_rate, 0);
    assert!(file.file_path.is_file());
    assert_eq!(
        std::fs::read_to_string(&file.file_path).unwrap(),
        "Hello\n\nWorld"
    );

    let update = FileRepo::update_translation(
        &store,
        project.id,
        file.id,
        strings(&["Bonjour", ""]),
    )
    .await
    .unwrap();
    assert_eq!(update.file_completion_rate, 50);
    assert_eq!(update.project_completion_rate, 50);

    let err = FileRepo::download(&store, project.id, file.id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::IncompleteTranslation { remaining: 1, .. })
    );

    let update = FileRepo::update_translation(
        &store,
        project.id,
        file.id,
        strings(&["Bonjour", "Monde"]),
    )
    .await
    .unwrap();
    assert_eq!(update.file_completion_rate, 100);
    assert_eq!(update.project_completion_rate, 100);

    let rendered = FileRepo::download(&store, project.id, file.id)
        .await
        .unwrap();
    assert_eq!(rendered.body, "Bonjour\n\nMonde");
    assert_eq!(rendered.file_name, "demo-translated.txt");

    let stored = ProjectRepo::find_by_id(&store, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.completion_rate, 100);
    assert_eq!(stored.files[0].completion_rate, 100);
}

#[tokio::test]
async fn upload_to_missing_project_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let missing = uuid::Uuid::new_v4();

    let err = FileRepo::upload(&store, &artifacts, missing, &text_upload("a.txt", "A"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity: "Project", .. })
    );
    assert!(!artifacts.project_dir(missing).exists());
}

#[tokio::test]
async fn upload_to_missing_project_is_checked_before_content() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let upload = NewUpload {
        file_name: "binary.bin".into(),
        content: vec![0xFF, 0xFE],
    };
    let err = FileRepo::upload(&store, &artifacts, uuid::Uuid::new_v4(), &upload)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity: "Project", .. })
    );
}

#[tokio::test]
async fn upload_rejects_non_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();

    let upload = NewUpload {
        file_name: "binary.bin".into(),
        content: vec![0xFF, 0x00, 0xFE],
    };
    let err = FileRepo::upload(&store, &artifacts, project.id, &upload)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    assert!(FileRepo::list_by_project(&store, project.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn empty_upload_has_zero_segments_and_zero_rate() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();

    let file = FileRepo::upload(&store, &artifacts, project.id, &text_upload("e.txt", "\n\n"))
        .await
        .unwrap();
    assert!(file.original_segments.is_empty());
    assert_eq!(file.completion_rate, 0);

    let update = FileRepo::update_translation(&store, project.id, file.id, Vec::new())
        .await
        .unwrap();
    assert_eq!(update.file_completion_rate, 0);
    assert_eq!(update.project_completion_rate, 0);
}

#[tokio::test]
async fn translation_length_must_match() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();
    let file = FileRepo::upload(&store, &artifacts, project.id, &text_upload("a.txt", "A\n\nB"))
        .await
        .unwrap();

    let err = FileRepo::update_translation(&store, project.id, file.id, strings(&["a"]))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));

    let stored = FileRepo::find(&store, project.id, file.id).await.unwrap();
    assert_eq!(stored.translated_segments, strings(&["", ""]));
}

#[tokio::test]
async fn project_rate_sums_segments_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();

    let small = FileRepo::upload(&store, &artifacts, project.id, &text_upload("s.txt", "only"))
        .await
        .unwrap();
    let large = FileRepo::upload(
        &store,
        &artifacts,
        project.id,
        &text_upload("l.txt", "1\n\n2\n\n3\n\n4\n\n5\n\n6\n\n7\n\n8\n\n9"),
    )
    .await
    .unwrap();
    assert_eq!(large.original_segments.len(), 9);

    let update = FileRepo::update_translation(&store, project.id, small.id, strings(&["done"]))
        .await
        .unwrap();
    assert_eq!(update.file_completion_rate, 100);
    assert_eq!(update.project_completion_rate, 10);

    // Removing the large file leaves only the finished one.
    FileRepo::delete(&store, &artifacts, project.id, large.id)
        .await
        .unwrap();
    assert!(!large.file_path.exists());
    let stored = ProjectRepo::find_by_id(&store, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.completion_rate, 100);
    assert_eq!(stored.files.len(), 1);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();
    let missing = uuid::Uuid::new_v4();

    assert_matches!(
        FileRepo::find(&store, project.id, missing).await,
        Err(StoreError::Core(CoreError::NotFound { entity: "File", .. }))
    );
    assert_matches!(
        FileRepo::delete(&store, &artifacts, project.id, missing).await,
        Err(StoreError::Core(CoreError::NotFound { entity: "File", .. }))
    );
    assert_matches!(
        FileRepo::update_translation(&store, project.id, missing, Vec::new()).await,
        Err(StoreError::Core(CoreError::NotFound { entity: "File", .. }))
    );
}

#[tokio::test]
async fn deleting_project_cascades_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("Doomed"))
        .await
        .unwrap();
    let file = FileRepo::upload(&store, &artifacts, project.id, &text_upload("a.txt", "A"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&store, &artifacts, project.id)
        .await
        .unwrap());
    assert!(!artifacts.project_dir(project.id).exists());

    assert_matches!(
        FileRepo::list_by_project(&store, project.id).await,
        Err(StoreError::Core(CoreError::NotFound { .. }))
    );
    assert_matches!(
        FileRepo::find(&store, project.id, file.id).await,
        Err(StoreError::Core(CoreError::NotFound { .. }))
    );
    assert_matches!(
        LegacyFileRepo::find(&store, file.id).await,
        Err(StoreError::Core(CoreError::NotFound { .. }))
    );

    // Second delete reports nothing removed.
    assert!(!ProjectRepo::delete(&store, &artifacts, project.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn deleting_project_survives_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();
    std::fs::remove_dir_all(artifacts.project_dir(project.id)).unwrap();

    assert!(ProjectRepo::delete(&store, &artifacts, project.id)
        .await
        .unwrap());
    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Flat (legacy) view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_upload_uses_one_default_project() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let first = LegacyFileRepo::upload(&store, &artifacts, &text_upload("a.txt", "A\n\nB"))
        .await
        .unwrap();
    let second = LegacyFileRepo::upload(&store, &artifacts, &text_upload("b.txt", "C"))
        .await
        .unwrap();
    assert_eq!(first.project_id, second.project_id);
    assert_eq!(first.id, first.file.id);

    let projects = ProjectRepo::list(&store).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, DEFAULT_PROJECT_NAME);
    assert_eq!(projects[0].files.len(), 2);

    // The flat view is derived; nothing is duplicated in the document.
    assert!(store.read().await.unwrap().files.is_empty());
    let listed = LegacyFileRepo::list(&store).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|f| f.project_name.as_deref() == Some(DEFAULT_PROJECT_NAME)));
}

#[tokio::test]
async fn rejected_legacy_upload_creates_no_project() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;

    let blank_name = NewUpload {
        file_name: "".into(),
        content: b"Hello".to_vec(),
    };
    let binary = NewUpload {
        file_name: "a.bin".into(),
        content: vec![0xFF, 0xFE],
    };
    for upload in [blank_name, binary] {
        let err = LegacyFileRepo::upload(&store, &artifacts, &upload)
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    }

    assert!(ProjectRepo::list(&store).await.unwrap().is_empty());
    assert_eq!(
        std::fs::read_dir(artifacts.projects_dir()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn legacy_upload_reuses_former_default_project() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let existing = ProjectRepo::create(
        &store,
        &artifacts,
        &new_project(FORMER_DEFAULT_PROJECT_NAME),
    )
    .await
    .unwrap();

    let uploaded = LegacyFileRepo::upload(&store, &artifacts, &text_upload("a.txt", "A"))
        .await
        .unwrap();

    assert_eq!(uploaded.project_id, existing.id);
    assert_eq!(ProjectRepo::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn legacy_path_matches_project_path() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let project = ProjectRepo::create(&store, &artifacts, &new_project("P"))
        .await
        .unwrap();
    let file = FileRepo::upload(&store, &artifacts, project.id, &text_upload("x.txt", "A\n\nB"))
        .await
        .unwrap();

    let found = LegacyFileRepo::find(&store, file.id).await.unwrap();
    assert_eq!(found.project_id, Some(project.id));
    assert_eq!(found.project_name.as_deref(), Some("P"));

    assert_matches!(
        LegacyFileRepo::update_translation(&store, file.id, strings(&["a"])).await,
        Err(StoreError::Core(CoreError::Validation(_)))
    );

    let update = LegacyFileRepo::update_translation(&store, file.id, strings(&["a", ""]))
        .await
        .unwrap();
    assert_eq!(update.file_completion_rate, 50);
    assert_eq!(update.project_completion_rate, 50);
    assert_eq!(
        FileRepo::find(&store, project.id, file.id)
            .await
            .unwrap()
            .translated_segments,
        strings(&["a", ""])
    );

    LegacyFileRepo::update_translation(&store, file.id, strings(&["a", "b"]))
        .await
        .unwrap();
    let rendered = LegacyFileRepo::download(&store, file.id).await.unwrap();
    assert_eq!(rendered.body, "a\n\nb");

    LegacyFileRepo::delete(&store, &artifacts, file.id)
        .await
        .unwrap();
    assert!(FileRepo::list_by_project(&store, project.id)
        .await
        .unwrap()
        .is_empty());
    let stored = ProjectRepo::find_by_id(&store, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.completion_rate, 0);
}

#[tokio::test]
async fn orphaned_legacy_records_stay_reachable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");
    let file_id = uuid::Uuid::new_v4();
    let old_document = serde_json::json!({
        "projects": [],
        "files": [{
            "id": file_id,
            "fileName": "old.txt",
            "filePath": "/nonexistent/old.txt",
            "uploadDate": "2024-01-01T00:00:00Z",
            "originalSegments": ["One", "Two"],
            "translatedSegments": ["", ""],
            "completionRate": 0
        }]
    });
    std::fs::write(&path, old_document.to_string()).unwrap();

    let store = DocumentStore::open(&path).await.unwrap();
    let artifacts = ArtifactStore::open(dir.path().join("projects"))
        .await
        .unwrap();

    let listed = LegacyFileRepo::list(&store).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].project_id, None);

    let update = LegacyFileRepo::update_translation(&store, file_id, strings(&["Un", ""]))
        .await
        .unwrap();
    assert_eq!(update.file_completion_rate, 50);
    assert_eq!(update.project_completion_rate, 0);

    LegacyFileRepo::delete(&store, &artifacts, file_id)
        .await
        .unwrap();
    assert!(LegacyFileRepo::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_uploads_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let (store, artifacts) = open_stores(&dir).await;
    let store = std::sync::Arc::new(store);
    let artifacts = std::sync::Arc::new(artifacts);
    let project = ProjectRepo::create(&store, &artifacts, &new_project("Busy"))
        .await
        .unwrap();
    let project_id = project.id;

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = std::sync::Arc::clone(&store);
        let artifacts = std::sync::Arc::clone(&artifacts);
        handles.push(tokio::spawn(async move {
            FileRepo::upload(
                &store,
                &artifacts,
                project_id,
                &text_upload(&format!("{i}.txt"), "segment"),
            )
            .await
            .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let files = FileRepo::list_by_project(&store, project_id).await.unwrap();
    assert_eq!(files.len(), 10);
}
