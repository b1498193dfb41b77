// Runs against a real PostgreSQL started with testcontainers.
// Needs Docker: `cargo test -- --ignored`

use crate::e2e::helpers;

use helpers::db::isolated_database;
use helpers::fakes::FakeStorage;
use podcast_backend::domain::podcast::{
    NewPodcast, PodcastService, PodcastServiceApi, PodcastServiceError,
};
use podcast_backend::infrastructure::repositories::{AudioStorage, PodcastRepository};
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires Docker"]
async fn it_should_store_list_and_delete_podcasts() {
    let pool = Arc::new(isolated_database().await.unwrap());
    let repo = PodcastRepository::new(pool);

    let first = repo
        .create("user-1", "Primeiro", Some("Rust"), Some(3), "https://a/1.wav", "podcasts/user-1/1.wav")
        .await
        .unwrap();
    let second = repo
        .create("user-1", "Segundo", None, None, "https://a/2.wav", "podcasts/user-1/2.wav")
        .await
        .unwrap();
    repo.create("user-2", "Outro", None, None, "https://a/3.wav", "podcasts/user-2/3.wav")
        .await
        .unwrap();

    assert_eq!(repo.count_by_user("user-1").await.unwrap(), 2);

    // Newest first
    let page = repo.list_by_user("user-1", 20, 0).await.unwrap();
    let ids: Vec<Uuid> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let page = repo.list_by_user("user-1", 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first.id);

    let found = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(found.theme.as_deref(), Some("Rust"));
    assert_eq!(found.duration_minutes, Some(3));

    // Only the owner can delete
    assert!(!repo.delete(first.id, "user-2").await.unwrap());
    assert!(repo.delete(first.id, "user-1").await.unwrap());
    assert!(repo.find_by_id(first.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn it_should_save_and_delete_through_the_service() {
    let pool = Arc::new(isolated_database().await.unwrap());
    let storage = Arc::new(FakeStorage::default());
    let storage_dyn: Arc<dyn AudioStorage> = storage.clone();
    let service = PodcastService::new(Arc::new(PodcastRepository::new(pool)), Some(storage_dyn), 2);

    let saved = service
        .save(
            NewPodcast {
                user_id: "user-9".to_string(),
                title: "Episódio".to_string(),
                theme: Some("Café".to_string()),
                duration_minutes: Some(5),
            },
            vec![1, 2, 3],
        )
        .await
        .unwrap();

    assert!(saved.audio_path.starts_with("podcasts/user-9/"));
    assert_eq!(storage.objects.lock().unwrap().len(), 1);

    let listed = service.list("user-9", None, None).await.unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.limit, 20);
    assert_eq!(listed.offset, 0);
    assert_eq!(
        listed.podcasts[0].audio_url,
        format!("https://storage.test/{}?expires=2h", saved.audio_path)
    );

    let err = service.delete(saved.id, "someone-else").await.unwrap_err();
    assert!(matches!(err, PodcastServiceError::NotFound));

    service.delete(saved.id, "user-9").await.unwrap();
    assert!(storage.objects.lock().unwrap().is_empty());
    assert!(matches!(
        service.get(saved.id).await.unwrap_err(),
        PodcastServiceError::NotFound
    ));
}
