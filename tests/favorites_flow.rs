#![allow(dead_code)]
/// End-to-end favorites flows over the in-memory store
mod utils;

use frikidex::{AppError, ItemKey, ToggleAction};
use utils::factories;
use utils::helpers::{build_test_services, sign_in_and_sync, wait_until};

#[tokio::test]
async fn add_favorite_requires_a_signed_in_user() {
    let services = build_test_services();

    let result = services.favorites.add_favorite(&factories::pikachu()).await;

    assert!(matches!(result, Err(AppError::Unauthenticated)));
    assert!(services.favorites.all().is_empty());
}

#[tokio::test]
async fn toggle_round_trip_adds_then_removes() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    let pikachu = factories::pikachu();

    let outcome = services.favorites.toggle_favorite(&pikachu).await.unwrap();
    assert_eq!(outcome.action, ToggleAction::Added);

    let favorites = &services.favorites;
    wait_until(|| favorites.is_favorite(&pikachu)).await;

    let outcome = services.favorites.toggle_favorite(&pikachu).await.unwrap();
    assert_eq!(outcome.action, ToggleAction::Removed);

    wait_until(|| !favorites.is_favorite(&pikachu)).await;
    assert!(services.favorites.all().is_empty());
}

#[tokio::test]
async fn add_favorite_is_idempotent_per_key() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    let pikachu = factories::pikachu();
    services.favorites.add_favorite(&pikachu).await.unwrap();
    services.favorites.add_favorite(&pikachu).await.unwrap();

    let favorites = &services.favorites;
    wait_until(|| favorites.all().len() == 1).await;
}

#[tokio::test]
async fn same_id_in_different_categories_are_distinct_favorites() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    let anime = factories::one_piece();
    let mut movie = factories::one_piece();
    movie.category = frikidex::Category::Movies;

    services.favorites.add_favorite(&anime).await.unwrap();
    services.favorites.add_favorite(&movie).await.unwrap();

    let favorites = &services.favorites;
    wait_until(|| favorites.all().len() == 2).await;
}

#[tokio::test]
async fn remove_favorite_for_absent_key_is_a_noop() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    let key = ItemKey::resolve(&factories::charizard());
    services.favorites.remove_favorite(&key).await.unwrap();

    assert!(services.favorites.all().is_empty());
}

#[tokio::test]
async fn rejected_write_leaves_the_snapshot_untouched() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    services.store.set_fail_writes(true);
    let result = services.favorites.add_favorite(&factories::pikachu()).await;

    assert!(matches!(result, Err(AppError::RemoteWriteFailure(_))));
    assert!(services.favorites.all().is_empty());
}

#[tokio::test]
async fn clear_all_favorites_empties_the_set() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    services
        .favorites
        .add_favorite(&factories::pikachu())
        .await
        .unwrap();
    services
        .favorites
        .add_favorite(&factories::iron_man())
        .await
        .unwrap();

    let favorites = &services.favorites;
    wait_until(|| favorites.all().len() == 2).await;

    services.favorites.clear_all_favorites().await.unwrap();
    wait_until(|| favorites.all().is_empty()).await;
}

#[tokio::test]
async fn favorites_can_be_listed_by_category() {
    let services = build_test_services();
    sign_in_and_sync(&services, "ash").await;

    services
        .favorites
        .add_favorite(&factories::pikachu())
        .await
        .unwrap();
    services
        .favorites
        .add_favorite(&factories::iron_man())
        .await
        .unwrap();

    let favorites = &services.favorites;
    wait_until(|| favorites.all().len() == 2).await;

    let pokemon = services.favorites.by_category(frikidex::Category::Pokemon);
    assert_eq!(pokemon.len(), 1);
    assert_eq!(pokemon[0].item.title, "Pikachu");
}
