mod common;

use std::collections::HashSet;

use common::{TestServer, mint_jwt, validator};
use crudkit_api::app::trivia_app;
use crudkit_api::context::TriviaContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn spawn() -> TestServer {
    TestServer::spawn(trivia_app(TriviaContext::in_memory(validator()))).await
}

async fn send(req: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let res = req.send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn add_question(server: &TestServer, question: &str, category: i64, difficulty: i64) -> i64 {
    let (status, body) = send(
        server
            .client
            .post(server.url("/questions"))
            .bearer_auth(mint_jwt(&["post:questions"]))
            .json(&json!({
                "question": question,
                "answer": "42",
                "category": category,
                "difficulty": difficulty,
            })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["created"].as_i64().unwrap()
}

#[tokio::test]
async fn categories_are_keyed_by_id() {
    let server = spawn().await;
    let (status, body) = send(server.client.get(server.url("/categories"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_categories"], json!(6));
    assert_eq!(body["categories"]["1"], json!("Science"));
    assert_eq!(body["categories"]["6"], json!("Sports"));
}

#[tokio::test]
async fn question_listing_orders_by_difficulty_and_reports_categories() {
    let server = spawn().await;

    let (status, _) = send(server.client.get(server.url("/questions"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let hard = add_question(&server, "Hardest question?", 1, 5).await;
    let easy = add_question(&server, "Easiest question?", 4, 1).await;

    let (status, body) = send(server.client.get(server.url("/questions?page=1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(2));
    assert_eq!(body["questions"][0]["id"], json!(easy));
    assert_eq!(body["questions"][1]["id"], json!(hard));
    assert_eq!(body["current_category"], json!([1, 4]));
    assert_eq!(body["categories"]["3"], json!("Geography"));

    let (status, body) = send(server.client.get(server.url("/questions?page=2"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn create_validates_fields_and_category() {
    let server = spawn().await;
    let token = mint_jwt(&["post:questions"]);

    let (status, _) = send(
        server
            .client
            .post(server.url("/questions"))
            .bearer_auth(&token)
            .json(&json!({"question": "No answer?", "category": 1, "difficulty": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        server
            .client
            .post(server.url("/questions"))
            .bearer_auth(&token)
            .json(&json!({"question": "Q", "answer": "A", "category": 99, "difficulty": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        server
            .client
            .post(server.url("/questions"))
            .json(&json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_and_category_listing() {
    let server = spawn().await;
    add_question(&server, "What is the title of the 1990 fantasy film?", 5, 3).await;
    add_question(&server, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 4, 2).await;
    add_question(&server, "Which planet is closest to the sun?", 1, 1).await;

    let (status, body) = send(
        server
            .client
            .post(server.url("/questions/search"))
            .json(&json!({"searchTerm": "TITLE"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(2));
    assert_eq!(body["current_category"], json!([4, 5]));

    let (status, body) = send(
        server
            .client
            .post(server.url("/questions/search"))
            .json(&json!({"searchTerm": "nothing like this"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));

    let (status, body) = send(server.client.get(server.url("/categories/1/questions"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(1));
    assert_eq!(body["current_category"], json!([1]));

    let (status, body) = send(server.client.get(server.url("/categories/2/questions"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("no questions in category 2"));

    let (status, body) = send(server.client.get(server.url("/categories/99/questions"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("category 99 not found"));
}

#[tokio::test]
async fn delete_reports_absent_questions_as_unprocessable() {
    let server = spawn().await;
    let id = add_question(&server, "Doomed?", 2, 2).await;
    let token = mint_jwt(&["delete:questions"]);

    let (status, body) = send(
        server
            .client
            .delete(server.url(&format!("/questions/{id}")))
            .bearer_auth(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(id));
    assert_eq!(body["total_questions"], json!(0));

    let (status, body) = send(
        server
            .client
            .delete(server.url(&format!("/questions/{id}")))
            .bearer_auth(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!(422));
}

#[tokio::test]
async fn quiz_hands_out_each_question_once_then_finishes() {
    let server = spawn().await;
    let mut expected = HashSet::new();
    for i in 0..3 {
        expected.insert(add_question(&server, &format!("Science {i}?"), 1, 1).await);
    }
    add_question(&server, "Art?", 2, 1).await;

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let (status, body) = send(server.client.post(server.url("/quizzes")).json(&json!({
            "quiz_category": {"id": 1, "type": "Science"},
            "previous_questions": previous,
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        assert_eq!(body["question"]["category"], json!(1));
        previous.push(id);
    }
    assert_eq!(previous.iter().copied().collect::<HashSet<_>>(), expected);

    let (status, body) = send(server.client.post(server.url("/quizzes")).json(&json!({
        "quiz_category": {"id": 1},
        "previous_questions": previous,
    })))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "question": null}));

    let (status, body) = send(server.client.post(server.url("/quizzes")).json(&json!({
        "quiz_category": {"id": 0, "type": "click"},
        "previous_questions": previous,
    })))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["category"], json!(2));
}

#[tokio::test]
async fn quiz_rejects_missing_fields_and_empty_pools() {
    let server = spawn().await;

    let (status, _) = send(
        server
            .client
            .post(server.url("/quizzes"))
            .json(&json!({"previous_questions": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(server.client.post(server.url("/quizzes")).json(&json!({
        "quiz_category": {"id": 3},
        "previous_questions": [],
    })))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
}
