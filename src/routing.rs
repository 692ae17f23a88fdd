//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_edit_expense_page, get_expenses_page, get_new_expense_page,
    },
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(
            endpoints::EXPENSE_API,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_expenses() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::EXPENSES_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde::Serialize;

    use crate::{AppState, build_router, endpoints};

    #[derive(Serialize)]
    struct ExpenseFormData {
        title: String,
        amount: String,
        category: String,
        date: String,
    }

    fn coffee_form() -> ExpenseFormData {
        ExpenseFormData {
            title: "Coffee".to_owned(),
            amount: "4.5".to_owned(),
            category: "food".to_owned(),
            date: "2024-03-01".to_owned(),
        }
    }

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, "Etc/UTC").unwrap();
        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn recorded_expense_appears_on_the_expenses_page() {
        let server = get_test_server();

        server.post(endpoints::EXPENSES_API).form(&coffee_form()).await;

        let page = server.get(endpoints::EXPENSES_VIEW).await;
        page.assert_status_ok();
        let text = page.text();
        assert!(text.contains("Coffee"), "want the new expense on the page");
        assert!(text.contains("$4.5"), "want the formatted amount on the page");
        assert!(text.contains("1 Mar 2024"), "want the formatted date on the page");
    }

    #[tokio::test]
    async fn edited_expense_keeps_its_id_and_shows_new_fields() {
        let server = get_test_server();
        server.post(endpoints::EXPENSES_API).form(&coffee_form()).await;

        let edit_form = ExpenseFormData {
            title: "Espresso".to_owned(),
            amount: "5".to_owned(),
            category: "other".to_owned(),
            date: "2024-03-01".to_owned(),
        };
        server
            .put(&endpoints::format_endpoint(endpoints::EXPENSE_API, 1))
            .form(&edit_form)
            .await;

        let page = server.get(endpoints::EXPENSES_VIEW).await;
        let text = page.text();
        assert!(text.contains("Espresso"));
        assert!(!text.contains("Coffee"), "the old title must be gone");
        // The edit link still points at id 1.
        assert!(text.contains("/expenses/1/edit"));
    }

    #[tokio::test]
    async fn deleted_expense_disappears_from_the_expenses_page() {
        let server = get_test_server();
        server.post(endpoints::EXPENSES_API).form(&coffee_form()).await;

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::EXPENSE_API, 1))
            .await;
        response.assert_status_ok();

        let page = server.get(endpoints::EXPENSES_VIEW).await;
        assert!(!page.text().contains("Coffee"));
    }

    #[tokio::test]
    async fn date_range_filter_narrows_the_expenses_page() {
        let server = get_test_server();
        server.post(endpoints::EXPENSES_API).form(&coffee_form()).await;
        server
            .post(endpoints::EXPENSES_API)
            .form(&ExpenseFormData {
                title: "Bus fare".to_owned(),
                amount: "20".to_owned(),
                category: "transport".to_owned(),
                date: "2024-03-15".to_owned(),
            })
            .await;

        let page = server
            .get(endpoints::EXPENSES_VIEW)
            .add_query_param("start_date", "2024-03-10")
            .add_query_param("end_date", "2024-03-31")
            .await;

        let text = page.text();
        assert!(text.contains("Bus fare"));
        assert!(!text.contains("Coffee"));
    }

    #[tokio::test]
    async fn unknown_route_renders_the_not_found_page() {
        let server = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status_not_found();
    }
}
