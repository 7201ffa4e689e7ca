use axum::http::StatusCode;
use chrono::Duration;
use mockall::predicate;
use petclinic_core::models::pet::{Pet, PetType};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{owner, pet, pet_type, today, TestContext};

fn catalog() -> Vec<PetType> {
    vec![pet_type("cat"), pet_type("dog"), pet_type("hamster")]
}

#[tokio::test]
async fn test_list_pet_types() {
    let mut ctx = TestContext::new();
    ctx.pets
        .expect_find_pet_types()
        .times(1)
        .returning(|| Ok(catalog()));
    let server = ctx.server();

    let response = server.get("/api/pet-types").await;

    response.assert_status(StatusCode::OK);
    let names: Vec<String> = response
        .json::<Vec<PetType>>()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["cat", "dog", "hamster"]);
}

#[tokio::test]
async fn test_create_pet_for_owner() {
    let mut ctx = TestContext::new();
    let jean = owner("Jean", "Coleman");
    let owner_id = jean.id;
    let types = catalog();
    let dog_id = types[1].id;

    ctx.owners
        .expect_find_by_id()
        .with(predicate::eq(owner_id))
        .returning(move |_| Ok(Some(jean.clone())));
    ctx.pets
        .expect_find_pet_types()
        .returning(move || Ok(types.clone()));
    ctx.pets
        .expect_find_by_owner_id()
        .returning(move |id| Ok(vec![pet(id, "Samantha")]));
    ctx.pets
        .expect_save()
        .times(1)
        .returning(|pet| Ok(pet.clone()));
    let server = ctx.server();

    let response = server
        .post(&format!("/api/owners/{}/pets", owner_id))
        .json(&json!({ "name": " Max ", "birth_date": "2012-09-04", "type_id": dog_id }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Pet>();
    assert_eq!(created.name, "Max");
    assert_eq!(created.owner_id, owner_id);
    assert_eq!(created.pet_type.name, "dog");
}

#[tokio::test]
async fn test_create_pet_rejects_duplicate_name() {
    let mut ctx = TestContext::new();
    let jean = owner("Jean", "Coleman");
    let owner_id = jean.id;
    let types = catalog();
    let cat_id = types[0].id;

    ctx.owners
        .expect_find_by_id()
        .returning(move |_| Ok(Some(jean.clone())));
    ctx.pets
        .expect_find_pet_types()
        .returning(move || Ok(types.clone()));
    ctx.pets
        .expect_find_by_owner_id()
        .returning(move |id| Ok(vec![pet(id, "Samantha"), pet(id, "Max")]));
    ctx.pets.expect_save().never();
    let server = ctx.server();

    let response = server
        .post(&format!("/api/owners/{}/pets", owner_id))
        .json(&json!({ "name": "Max", "birth_date": "2012-09-04", "type_id": cat_id }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_pet_rejects_future_birth_date() {
    let mut ctx = TestContext::new();
    let jean = owner("Jean", "Coleman");
    let owner_id = jean.id;
    let types = catalog();
    let cat_id = types[0].id;

    ctx.owners
        .expect_find_by_id()
        .returning(move |_| Ok(Some(jean.clone())));
    ctx.pets
        .expect_find_pet_types()
        .returning(move || Ok(types.clone()));
    let server = ctx.server();

    let tomorrow = today() + Duration::days(1);
    let response = server
        .post(&format!("/api/owners/{}/pets", owner_id))
        .json(&json!({ "name": "Basil", "birth_date": tomorrow, "type_id": cat_id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_pet_for_missing_owner() {
    let mut ctx = TestContext::new();
    ctx.owners.expect_find_by_id().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .post(&format!("/api/owners/{}/pets", Uuid::new_v4()))
        .json(&json!({ "name": "Rosy", "birth_date": "2011-04-17", "type_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_pet_may_change_case_of_own_name() {
    let mut ctx = TestContext::new();
    let owner_id = Uuid::new_v4();
    let original = pet(owner_id, "leo");
    let pet_id = original.id;
    let siblings = vec![original.clone(), pet(owner_id, "Basil")];
    let types = catalog();
    let cat_id = types[0].id;

    ctx.pets
        .expect_find_by_id()
        .with(predicate::eq(pet_id))
        .returning(move |_| Ok(Some(original.clone())));
    ctx.pets
        .expect_find_pet_types()
        .returning(move || Ok(types.clone()));
    ctx.pets
        .expect_find_by_owner_id()
        .returning(move |_| Ok(siblings.clone()));
    ctx.pets
        .expect_save()
        .withf(move |pet| pet.id == pet_id && pet.name == "Leo")
        .times(1)
        .returning(|pet| Ok(pet.clone()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}/pets/{}", owner_id, pet_id))
        .json(&json!({ "name": "Leo", "birth_date": "2010-09-07", "type_id": cat_id }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_update_pet_of_another_owner_is_not_found() {
    let mut ctx = TestContext::new();
    let stranger = pet(Uuid::new_v4(), "Jewel");
    let pet_id = stranger.id;

    ctx.pets
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stranger.clone())));
    ctx.pets.expect_save().never();
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}/pets/{}", Uuid::new_v4(), pet_id))
        .json(&json!({ "name": "Jewel", "birth_date": "2010-03-07", "type_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_pet_to_exact_name_of_sibling() {
    let mut ctx = TestContext::new();
    let owner_id = Uuid::new_v4();
    let original = pet(owner_id, "Rex");
    let pet_id = original.id;
    let siblings = vec![original.clone(), pet(owner_id, "rex")];
    let types = catalog();
    let cat_id = types[0].id;

    ctx.pets
        .expect_find_by_id()
        .returning(move |_| Ok(Some(original.clone())));
    ctx.pets
        .expect_find_pet_types()
        .returning(move || Ok(types.clone()));
    ctx.pets
        .expect_find_by_owner_id()
        .returning(move |_| Ok(siblings.clone()));
    ctx.pets.expect_save().never();
    let server = ctx.server();

    let response = server
        .put(&format!("/api/owners/{}/pets/{}", owner_id, pet_id))
        .json(&json!({ "name": "rex", "birth_date": "2010-09-07", "type_id": cat_id }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}
