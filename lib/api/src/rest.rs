use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use actix_cors::Cors;
use peermatch_core::{Error, UserProfile};
use peermatch_engine::Recommender;
use peermatch_store::UserStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

fn default_nums() -> usize {
    5
}

#[derive(Deserialize)]
struct RecommendRequest {
    user: Option<UserProfile>,
    #[serde(default = "default_nums")]
    nums: usize,
}

struct AppState {
    store: Arc<dyn UserStore>,
    recommender: Recommender,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        store: Arc<dyn UserStore>,
        recommender: Recommender,
        port: u16,
    ) -> std::io::Result<()> {
        let state = web::Data::new(AppState { store, recommender });

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .route("/recommendations", web::post().to(recommend))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let query = req.user.clone().unwrap_or_default();

    let population = match state.store.fetch_all_users().await {
        Ok(users) => users,
        Err(e) => return Ok(error_response(&e)),
    };
    info!(
        population = population.len(),
        nums = req.nums,
        "recommendation requested"
    );

    match state
        .recommender
        .recommend(&population, &query, req.nums, &mut rand::rng())
    {
        Ok(recommendations) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": recommendations
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

fn error_response(error: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": error.to_string() });
    match error {
        Error::Store(_) => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}
