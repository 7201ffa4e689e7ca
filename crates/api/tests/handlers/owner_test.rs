use axum::http::StatusCode;
use mockall::predicate;
use petclinic_core::models::{
    owner::{Owner, OwnerDetailsResponse},
    visit::Visit,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{self, next_weekday, owner, pet, TestContext};

fn owner_payload(first_name: &str, last_name: &str) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "address": "638 Cardinal Ave.",
        "city": "Sun Prairie",
        "telephone": "6085551749",
    })
}

#[tokio::test]
async fn test_create_owner_trims_and_saves() {
    let mut ctx = TestContext::new();
    ctx.owners
        .expect_find_by_last_name()
        .withf(|last_name| last_name == "Black")
        .times(1)
        .returning(|_| Ok(vec![]));
    ctx.owners
        .expect_save()
        .times(1)
        .returning(|owner| Ok(owner.clone()));
    let server = ctx.server();

    let response = server
        .post("/api/owners")
        .json(&owner_payload("  Jeff ", "Black  "))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Owner>();
    assert_eq!(created.first_name, "Jeff");
    assert_eq!(created.last_name, "Black");
}

#[tokio::test]
async fn test_create_owner_rejects_same_name_in_other_case() {
    let mut ctx = TestContext::new();
    let existing = vec![owner("Max", "Mahler"), owner("Lysundra", "Lee")];
    ctx.owners
        .expect_find_by_last_name()
        .withf(|last_name| last_name == "lee")
        .times(1)
        .returning(move |_| Ok(existing.clone()));
    ctx.owners.expect_save().never();
    let server = ctx.server();

    let response = server
        .post("/api/owners")
        .json(&owner_payload("LYSUNDRA", "lee"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_owner_rejects_bad_telephone() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/owners")
        .json(&json!({
            "first_name": "Eduardo",
            "last_name": "Rodriquez",
            "address": "2693 Commerce St.",
            "city": "McFarland",
            "telephone": "608-555-8763",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_owner_requires_every_field() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/owners")
        .json(&json!({ "first_name": "Harold", "last_name": "Davis" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_owner_may_keep_own_name() {
    let mut ctx = TestContext::new();
    let original = owner("Max", "Mahler");
    let owner_id = original.id;
    let namesakes = vec![original.clone()];
    ctx.owners
        .expect_find_by_id()
        .with(predicate::eq(owner_id))
        .times(1)
        .returning(move |_| Ok(Some(original.clone())));
    ctx.owners
        .expect_find_by_last_name()
        .times(1)
        .returning(move |_| Ok(namesakes.clone()));
    ctx.owners
        .expect_save()
        .withf(move |owner| owner.id == owner_id && owner.city == "Sun Prairie")
        .times(1)
        .returning(|owner| Ok(owner.clone()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}", owner_id))
        .json(&owner_payload("Max", "Mahler"))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_update_owner_rejects_another_owners_name() {
    let mut ctx = TestContext::new();
    let original = owner("Max", "Mahler");
    let owner_id = original.id;
    let namesakes = vec![original.clone(), owner("Richard", "Mahler")];
    ctx.owners
        .expect_find_by_id()
        .returning(move |_| Ok(Some(original.clone())));
    ctx.owners
        .expect_find_by_last_name()
        .returning(move |_| Ok(namesakes.clone()));
    ctx.owners.expect_save().never();
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}", owner_id))
        .json(&owner_payload("richard", "MAHLER"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_owner_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.owners.expect_find_by_id().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}", Uuid::new_v4()))
        .json(&owner_payload("Jean", "Coleman"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_owners_by_last_name_prefix() {
    let mut ctx = TestContext::new();
    let found = vec![owner("Harold", "Davis"), owner("Betty", "Davis")];
    ctx.owners
        .expect_find_by_last_name()
        .withf(|prefix| prefix == "Dav")
        .times(1)
        .returning(move |_| Ok(found.clone()));
    let server = ctx.server();

    let response = server
        .get("/api/owners")
        .add_query_param("last_name", "Dav")
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Vec<Owner>>().len(), 2);
}

#[tokio::test]
async fn test_find_owners_without_filter_lists_all() {
    let mut ctx = TestContext::new();
    ctx.owners
        .expect_find_by_last_name()
        .withf(|prefix| prefix.is_empty())
        .times(1)
        .returning(|_| Ok(vec![owner("George", "Franklin")]));
    let server = ctx.server();

    let response = server.get("/api/owners").await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_get_owner_includes_pets_and_visits() {
    let mut ctx = TestContext::new();
    let george = owner("George", "Franklin");
    let owner_id = george.id;
    let leo = pet(owner_id, "Leo");
    let pet_id = leo.id;
    let vet_id = Uuid::new_v4();
    let upcoming = test_utils::visit(pet_id, vet_id, next_weekday(), 6);
    let past = Visit {
        date: test_utils::today() - chrono::Duration::days(30),
        ..test_utils::visit(pet_id, vet_id, next_weekday(), 1)
    };
    let visits = vec![upcoming, past];

    ctx.owners
        .expect_find_by_id()
        .returning(move |_| Ok(Some(george.clone())));
    ctx.pets
        .expect_find_by_owner_id()
        .with(predicate::eq(owner_id))
        .returning(move |_| Ok(vec![leo.clone()]));
    ctx.visits
        .expect_find_by_pet_id()
        .with(predicate::eq(pet_id))
        .returning(move |_| Ok(visits.clone()));
    let server = ctx.server();

    let response = server.get(&format!("/api/owners/{}", owner_id)).await;

    response.assert_status(StatusCode::OK);
    let details = response.json::<OwnerDetailsResponse>();
    assert_eq!(details.owner.first_name, "George");
    assert_eq!(details.pets.len(), 1);

    let visits = &details.pets[0].visits;
    assert_eq!(visits.len(), 2);
    assert!(visits[0].is_upcoming);
    assert_eq!(visits[0].time_slot_label, "1 PM to 2 PM");
    assert!(!visits[1].is_upcoming);
}

#[tokio::test]
async fn test_get_missing_owner_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.owners.expect_find_by_id().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server.get(&format!("/api/owners/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
}
