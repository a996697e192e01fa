mod common;

use common::setup_app;
use itemstash_backend::errors::internal::ItemError;
use itemstash_backend::errors::{ErrorKind, InternalError};
use itemstash_backend::providers::TokenVerifier;
use itemstash_backend::types::internal::{Credentials, ItemStatus, NewItem, NewUser, RequestUser, UserStatus};

async fn register(app: &itemstash_backend::app_data::AppData, name: &str, email: &str) -> RequestUser {
    app.auth_service
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw-for-tests".to_string(),
            status: UserStatus::Free,
        })
        .await
        .expect("Failed to create user");

    let token = app
        .auth_service
        .sign_in(Credentials {
            email: email.to_string(),
            password: "pw-for-tests".to_string(),
        })
        .await
        .expect("Failed to sign in");

    app.token_provider
        .validate(token.access_token.as_str())
        .expect("Issued token must validate")
}

fn widget() -> NewItem {
    NewItem {
        name: "Widget".to_string(),
        price: 100,
        description: Some(String::new()),
    }
}

#[tokio::test]
async fn test_widget_example_flow() {
    let app = setup_app().await;
    let u1 = register(&app, "u1", "u1@example.com").await;
    let u2 = register(&app, "u2", "u2@example.com").await;

    let item = app.item_service.create(widget(), &u1).await.unwrap();
    assert_eq!(item.status, ItemStatus::OnSale);
    assert_eq!(item.owner_id, u1.id);

    let sold = app.item_service.update_status(&item.id, &u1).await.unwrap();
    assert_eq!(sold.status, ItemStatus::SoldOut);

    let err = app.item_service.update_status(&item.id, &u2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_concurrent_status_updates_single_winner() {
    let app = setup_app().await;
    let u1 = register(&app, "u1", "u1@example.com").await;
    let item = app.item_service.create(widget(), &u1).await.unwrap();

    let (a, b) = tokio::join!(
        app.item_service.update_status(&item.id, &u1),
        app.item_service.update_status(&item.id, &u1)
    );

    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
        (a, b) => panic!("expected exactly one success, got {:?} and {:?}", a.is_ok(), b.is_ok()),
    };
    assert_eq!(winner.status, ItemStatus::SoldOut);
    assert!(matches!(loser, InternalError::Item(ItemError::AlreadySoldOut { .. })));
}

#[tokio::test]
async fn test_delete_then_lookup_not_found() {
    let app = setup_app().await;
    let u1 = register(&app, "u1", "u1@example.com").await;
    let item = app.item_service.create(widget(), &u1).await.unwrap();

    app.item_service.delete(&item.id, &u1).await.unwrap();

    let err = app.item_service.find_by_id(&item.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
