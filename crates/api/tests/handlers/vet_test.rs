use axum::http::StatusCode;
use petclinic_core::models::vet::{Specialty, Vet};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{specialty, vet, TestContext};

fn catalog() -> Vec<Specialty> {
    vec![specialty("radiology"), specialty("surgery"), specialty("dentistry")]
}

#[tokio::test]
async fn test_list_vets() {
    let mut ctx = TestContext::new();
    ctx.vets
        .expect_find_all()
        .times(1)
        .returning(|| Ok(vec![vet("James", "Carter"), vet("Helen", "Leary")]));
    let server = ctx.server();

    let response = server.get("/api/vets").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Vec<Vet>>().len(), 2);
}

#[tokio::test]
async fn test_get_missing_vet_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.vets.expect_find_by_id().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server.get(&format!("/api/vets/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_specialties() {
    let mut ctx = TestContext::new();
    ctx.vets
        .expect_find_specialties()
        .returning(|| Ok(catalog()));
    let server = ctx.server();

    let response = server.get("/api/specialties").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Vec<Specialty>>().len(), 3);
}

#[tokio::test]
async fn test_create_vet_with_specialties() {
    let mut ctx = TestContext::new();
    let specialties = catalog();
    let surgery = specialties[1].id;
    let radiology = specialties[0].id;

    ctx.vets
        .expect_find_specialties()
        .returning(move || Ok(specialties.clone()));
    ctx.vets
        .expect_find_all()
        .returning(|| Ok(vec![vet("James", "Carter")]));
    ctx.vets
        .expect_save()
        .times(1)
        .returning(|vet| Ok(vet.clone()));
    let server = ctx.server();

    let response = server
        .post("/api/vets")
        .json(&json!({
            "first_name": "Linda",
            "last_name": "Douglas",
            "specialty_ids": [surgery, radiology],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Vet>();
    let names: Vec<&str> = created.specialties.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["radiology", "surgery"]);
}

#[tokio::test]
async fn test_create_vet_rejects_unknown_specialty() {
    let mut ctx = TestContext::new();
    ctx.vets
        .expect_find_specialties()
        .returning(|| Ok(catalog()));
    ctx.vets.expect_save().never();
    let server = ctx.server();

    let response = server
        .post("/api/vets")
        .json(&json!({
            "first_name": "Rafael",
            "last_name": "Ortega",
            "specialty_ids": [Uuid::new_v4()],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_vet_rejects_duplicate_name() {
    let mut ctx = TestContext::new();
    ctx.vets
        .expect_find_specialties()
        .returning(|| Ok(catalog()));
    ctx.vets
        .expect_find_all()
        .returning(|| Ok(vec![vet("Henry", "Stevens"), vet("Sharon", "Jenkins")]));
    ctx.vets.expect_save().never();
    let server = ctx.server();

    let response = server
        .post("/api/vets")
        .json(&json!({ "first_name": "henry", "last_name": "STEVENS" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_vet_may_keep_own_name() {
    let mut ctx = TestContext::new();
    let original = vet("Helen", "Leary");
    let vet_id = original.id;
    let everyone = vec![original.clone(), vet("James", "Carter")];

    ctx.vets
        .expect_find_by_id()
        .returning(move |_| Ok(Some(original.clone())));
    ctx.vets
        .expect_find_specialties()
        .returning(|| Ok(catalog()));
    ctx.vets
        .expect_find_all()
        .returning(move || Ok(everyone.clone()));
    ctx.vets
        .expect_save()
        .withf(move |vet| vet.id == vet_id)
        .times(1)
        .returning(|vet| Ok(vet.clone()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/vets/{}", vet_id))
        .json(&json!({ "first_name": "Helen", "last_name": "Leary" }))
        .await;

    response.assert_status(StatusCode::OK);
}
