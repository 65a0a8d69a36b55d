mod common;

use actix_web::{http::StatusCode, test};
use common::{client::{bearer, TestClient}, TestContext};
use folio_api::types::contact::{ContactQuery, ContactRes, RContactCreate, RContactUpdate};
use serde_json::json;

#[actix_web::test]
async fn test_contacts_are_private_to_their_owner() {
    println!("\n\n[+] Running test: test_contacts_are_private_to_their_owner");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (alice_id, alice_token) = client.create_test_user(Some("alice")).await.unwrap();
    let (_bob_id, bob_token) = client.create_test_user(Some("bob")).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts")
        .insert_header(bearer(&alice_token))
        .set_json(json!({"name": "Zhang Wei", "city": "Hangzhou", "postal_code": "310000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let contact: ContactRes = test::read_body_json(resp).await;
    assert_eq!(contact.user_id, alice_id);
    assert_eq!(contact.city.as_deref(), Some("Hangzhou"));

    for uri in ["/api/v1/contacts", "/api/v1/contacts?search=zhang", "/api/v1/contacts?search="] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&bob_token))
            .to_request();
        let listed: Vec<ContactRes> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty(), "bob saw alice's contacts via {uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/contacts?search=ZHANG")
        .insert_header(bearer(&alice_token))
        .to_request();
    let listed: Vec<ContactRes> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![contact.clone()]);

    let uri = format!("/api/v1/contacts/{}", contact.id);
    let req = test::TestRequest::get().uri(&uri).insert_header(bearer(&bob_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&bob_token))
        .set_json(json!({"name": "mine now"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&uri).insert_header(bearer(&bob_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&alice_token))
        .set_json(json!({"address": "1 West Lake Rd"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: ContactRes = test::read_body_json(resp).await;
    assert_eq!(updated.name, "Zhang Wei");
    assert_eq!(updated.city.as_deref(), Some("Hangzhou"));
    assert_eq!(updated.address.as_deref(), Some("1 West Lake Rd"));

    let req = test::TestRequest::delete().uri(&uri).insert_header(bearer(&alice_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).insert_header(bearer(&alice_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    println!("[/] Test passed: contacts stay owner-scoped.");
}

#[actix_web::test]
async fn test_contact_validation() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let (_id, token) = client.create_test_user(None).await.unwrap();

    for body in [
        json!({"name": ""}),
        json!({"city": "nameless"}),
        json!({"name": "ok", "postal_code": "x".repeat(21)}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/contacts")
            .insert_header(bearer(&token))
            .set_json(&body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

// ========== DIRECT DATABASE FLOWS ==========

#[tokio::test]
async fn test_contact_search_never_crosses_owners() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let (alice, _) = client.create_test_user(Some("alice")).await.unwrap();
    let (bob, _) = client.create_test_user(Some("bob")).await.unwrap();

    for name in ["Ann", "Annabel", "Bert"] {
        ctx.db.create_contact(alice, RContactCreate {
            name: name.into(),
            province: None,
            city: None,
            address: None,
            postal_code: None,
        }).await.unwrap();
    }
    ctx.db.create_contact(bob, RContactCreate {
        name: "Anne".into(),
        province: Some("Ontario".into()),
        city: None,
        address: None,
        postal_code: None,
    }).await.unwrap();

    for search in [None, Some("ann"), Some("e"), Some("%"), Some("_")] {
        let rows = ctx.db.list_contacts(bob, ContactQuery {
            search: search.map(str::to_string),
            ..Default::default()
        }).await.unwrap();
        assert!(rows.iter().all(|c| c.user_id == bob), "search {search:?} leaked");
    }

    let alice_ann = ctx.db.list_contacts(alice, ContactQuery {
        search: Some("ann".into()),
        ..Default::default()
    }).await.unwrap();
    assert_eq!(alice_ann.len(), 2);

    let wildcard = ctx.db.list_contacts(alice, ContactQuery {
        search: Some("%".into()),
        ..Default::default()
    }).await.unwrap();
    assert!(wildcard.is_empty());

    let bobs = ctx.db.list_contacts(bob, ContactQuery::default()).await.unwrap();
    let err = ctx.db.update_contact(bobs[0].id, RContactUpdate::default(), alice).await.unwrap_err();
    assert!(matches!(err, folio_api::types::error::AppError::NotFound));
}
