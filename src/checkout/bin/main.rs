use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use circulation::checkout::controller::{borrow_book, late_fee, return_book};
use circulation::core::controller::AppState;
use circulation::utils::sql::setup_tracing;

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
        .route("/checkout", post(borrow_book))
        .route("/checkout/return", post(return_book))
        .route("/checkout/fees/:patron_id/:book_id", get(late_fee))
        .with_state(state);

    run(app).await
}
