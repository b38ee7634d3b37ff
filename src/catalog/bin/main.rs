use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use circulation::catalog::controller::{add_book, find_book_by_id, list_books, search_books};
use circulation::core::controller::AppState;
use circulation::utils::sql::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::from_env("dev")?
    } else {
        AppState::from_env("prod")?
    };

    let app = Router::new()
        .route("/catalog", post(add_book).get(list_books))
        .route("/catalog/search", get(search_books))
        .route("/catalog/:id", get(find_book_by_id))
        .with_state(state);

    run(app).await
}
