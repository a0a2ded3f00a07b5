mod common;

use axum::http::{Method, StatusCode};
use chrono::Datelike;
use common::{
    build_test_app, category_row, create_category, create_expense, register, request,
};

#[tokio::test]
async fn budget_report_reflects_expenses_and_shifts() {
    let (app, _tmp) = build_test_app().await;
    let token = register(&app, "alice@example.com").await;

    let groceries = create_category(&app, &token, "Groceries", Some(500.0)).await;
    let fun = create_category(&app, &token, "Fun", None).await;

    create_expense(&app, &token, &groceries, 100.0, "2024-03-05").await;
    create_expense(&app, &token, &groceries, 50.0, "2024-03-20").await;

    let (status, report) =
        request(&app, Method::GET, "/api/v1/budget/2024/3", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let row = category_row(&report, &groceries);
    assert_eq!(row["budgeted"].as_f64().unwrap(), 500.0);
    assert_eq!(row["actual"].as_f64().unwrap(), 150.0);
    assert_eq!(row["difference"].as_f64().unwrap(), 350.0);
    assert_eq!(row["percentUsed"].as_f64().unwrap(), 30.0);
    assert_eq!(row["isOverBudget"], false);

    // No budget figure and no expenses still reports zeros, not an error
    let row = category_row(&report, &fun);
    assert_eq!(row["budgeted"].as_f64().unwrap(), 0.0);
    assert_eq!(row["actual"].as_f64().unwrap(), 0.0);

    assert_eq!(report["totals"]["budgeted"].as_f64().unwrap(), 500.0);
    assert_eq!(report["totals"]["actual"].as_f64().unwrap(), 150.0);
    assert_eq!(report["monthKey"], "2024-03");

    // Month navigation rolls over year boundaries and never points at the future
    assert_eq!(report["navigation"]["previous"]["month"], 2);
    assert_eq!(report["navigation"]["next"]["month"], 4);
    assert_eq!(report["navigation"]["isCurrent"], false);

    let (status, january) =
        request(&app, Method::GET, "/api/v1/budget/2024/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(january["navigation"]["previous"]["year"], 2023);
    assert_eq!(january["navigation"]["previous"]["month"], 12);

    // Invalid month is an input error
    let (status, _) =
        request(&app, Method::GET, "/api/v1/budget/2024/13", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A shift moves budget between categories for that month only
    let dining = create_category(&app, &token, "Dining", Some(200.0)).await;
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/budget/shifts",
        Some(&token),
        Some(serde_json::json!({
            "year": 2024,
            "month": 3,
            "fromCategoryId": groceries,
            "toCategoryId": dining,
            "amount": 100.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, shifted) =
        request(&app, Method::GET, "/api/v1/budget/2024/3", Some(&token), None).await;
    assert_eq!(
        category_row(&shifted, &groceries)["budgeted"].as_f64().unwrap(),
        400.0
    );
    assert_eq!(
        category_row(&shifted, &dining)["budgeted"].as_f64().unwrap(),
        300.0
    );

    let (_, april) =
        request(&app, Method::GET, "/api/v1/budget/2024/4", Some(&token), None).await;
    assert_eq!(
        category_row(&april, &groceries)["budgeted"].as_f64().unwrap(),
        500.0
    );

    let (status, shifts) = request(
        &app,
        Method::GET,
        "/api/v1/budget/2024/3/shifts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shifts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ownership_is_enforced_between_users() {
    let (app, _tmp) = build_test_app().await;
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;

    let category = create_category(&app, &alice, "Groceries", Some(500.0)).await;
    let expense = create_expense(&app, &alice, &category, 100.0, "2024-03-05").await;
    let expense_uri = format!("/api/v1/expenses/{expense}");

    // Reads are scoped: Bob cannot even see the row
    let (status, _) = request(&app, Method::GET, &expense_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, bobs_categories) =
        request(&app, Method::GET, "/api/v1/categories", Some(&bob), None).await;
    assert_eq!(bobs_categories, serde_json::json!([]));

    // Writes against a foreign row fail with an ownership error
    let (status, _) = request(
        &app,
        Method::PUT,
        &expense_uri,
        Some(&bob),
        Some(serde_json::json!({ "amount": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = request(&app, Method::DELETE, &expense_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // ... and leave the row unmodified
    let (status, body) = request(&app, Method::GET, &expense_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "100");

    // The owner's write works
    let (status, body) = request(
        &app,
        Method::PUT,
        &expense_uri,
        Some(&alice),
        Some(serde_json::json!({ "amount": 75.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "75.5");
}

#[tokio::test]
async fn search_endpoint_semantics() {
    let (app, _tmp) = build_test_app().await;

    // Missing or blank query is a 400
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        None,
        Some(serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        None,
        Some(serde_json::json!({ "query": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown source values are input errors
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        None,
        Some(serde_json::json!({ "query": "budget", "source": "everything" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Private sources require an identity
    for source in ["user", "all"] {
        let (status, _) = request(
            &app,
            Method::POST,
            "/api/v1/search",
            None,
            Some(serde_json::json!({ "query": "budget", "source": source })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // The knowledge base is searchable anonymously
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        None,
        Some(serde_json::json!({ "query": "tracked categories budget" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "kb");
    assert_eq!(body["query"], "tracked categories budget");
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["docId"], "doc_kb_tracked_categories");
    assert!(body.get("context").is_none());

    // Authenticated callers can search their own notes and build context
    let token = register(&app, "carol@example.com").await;
    let (status, doc) = request(
        &app,
        Method::POST,
        "/api/v1/documents",
        Some(&token),
        Some(serde_json::json!({
            "title": "Trip plan",
            "content": "tokyo trip budget and itinerary",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        Some(&token),
        Some(serde_json::json!({
            "query": "tokyo trip",
            "source": "user",
            "buildContext": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["docId"], doc["id"]);
    assert_eq!(results[0]["source"], "user");
    let context = body["context"].as_str().unwrap();
    assert!(context.contains("[user] Trip plan"));

    // Another account cannot see those notes through "all"
    let other = register(&app, "dave@example.com").await;
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/search",
        Some(&other),
        Some(serde_json::json!({ "query": "tokyo trip", "source": "all" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|hit| hit["docId"] != doc["id"]));
}

#[tokio::test]
async fn overview_composes_current_month_and_revalidates_after_writes() {
    let (app, _tmp) = build_test_app().await;

    let (status, _) = request(&app, Method::GET, "/api/v1/overview", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register(&app, "alice@example.com").await;
    let category = create_category(&app, &token, "Everyday", Some(300.0)).await;

    let today = chrono::Local::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();
    create_expense(&app, &token, &category, 25.0, &date).await;

    let (status, overview) =
        request(&app, Method::GET, "/api/v1/overview", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["month"]["year"], today.year());
    assert_eq!(overview["month"]["month"], today.month());
    assert_eq!(overview["categories"].as_array().unwrap().len(), 1);
    assert_eq!(overview["recentExpenses"].as_array().unwrap().len(), 1);
    assert_eq!(
        category_row(&overview["budget"], &category)["actual"]
            .as_f64()
            .unwrap(),
        25.0
    );

    // A write drops the cached view, so the next read is fresh
    create_expense(&app, &token, &category, 10.0, &date).await;
    let (status, refreshed) =
        request(&app, Method::GET, "/api/v1/overview", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["recentExpenses"].as_array().unwrap().len(), 2);
    assert_eq!(
        category_row(&refreshed["budget"], &category)["actual"]
            .as_f64()
            .unwrap(),
        35.0
    );
}
