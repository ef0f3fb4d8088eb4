//! JSON API for running cups over HTTP. Tournaments are saved as JSON files in the data dir.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, CUP_DATA_DIR, CUP_DRAW_SEED.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cup_tournament_draw::{
    check_unique_names, Config, CupTournament, DriverError, DriverOptions, JsonFileStore, Score,
    ScriptedScores, Step, Team, TournamentDriver, TournamentStatus, TournamentStore,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// One driver over the file store; the lock keeps each tournament's steps sequential.
type AppState = Data<RwLock<TournamentDriver<JsonFileStore>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    teams: Vec<Team>,
}

/// Scores for the next undecided match. `penalties` is needed when `score` is a draw.
#[derive(Default, Deserialize)]
struct ProgressBody {
    score: Option<Score>,
    penalties: Option<Score>,
}

/// Path segment: tournament name (e.g. /api/tournaments/{name})
#[derive(Deserialize)]
struct TournamentPath {
    name: String,
}

#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a CupTournament,
    status: TournamentStatus,
    champion: Option<&'a Team>,
}

impl<'a> TournamentView<'a> {
    fn of(tournament: &'a CupTournament) -> Self {
        Self {
            tournament,
            status: tournament.status(),
            champion: tournament.champion(),
        }
    }
}

#[derive(Serialize)]
struct ProgressResponse<'a> {
    step: Step,
    #[serde(flatten)]
    view: TournamentView<'a>,
}

/// Names become file names, so keep them to letters, digits, '-' and '_'.
fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn error_response(e: &DriverError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        DriverError::Storage(_) => HttpResponse::InternalServerError().json(body),
        DriverError::Tournament(_) | DriverError::Roster(_) => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cup-tournament-draw",
    })
}

/// Create a tournament from a ranked team list. 409 if the name is taken.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if !valid_name(&body.name) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Name may only contain letters, digits, '-' and '_'" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.store().load(&body.name) {
        Ok(Some(_)) => {
            return HttpResponse::Conflict()
                .json(serde_json::json!({ "error": "A tournament with this name already exists" }))
        }
        Ok(None) => {}
        Err(e) => return error_response(&DriverError::from(e)),
    }
    let teams = body.teams;
    match g.load_or_create(&body.name, || check_unique_names(teams)) {
        Ok(t) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament with its status (404 if not found).
#[get("/api/tournaments/{name}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    if !valid_name(&path.name) {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.store().load(&path.name) {
        Ok(Some(t)) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
        Err(e) => error_response(&DriverError::from(e)),
    }
}

/// One step: seed and draw the current round, or record the next match's score.
#[post("/api/tournaments/{name}/progress")]
async fn api_progress(state: AppState, path: Path<TournamentPath>, body: Option<Json<ProgressBody>>) -> HttpResponse {
    if !valid_name(&path.name) {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    let body = body.map(Json::into_inner).unwrap_or_default();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut t = match g.store().load(&path.name) {
        Ok(Some(t)) => t,
        Ok(None) => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
        Err(e) => return error_response(&DriverError::from(e)),
    };
    let mut scores = ScriptedScores::new(body.score.into_iter().chain(body.penalties));
    match g.step(&mut t, &mut scores) {
        Ok(step) => HttpResponse::Ok().json(ProgressResponse {
            step,
            view: TournamentView::of(&t),
        }),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Tournaments are saved in {}", config.data_dir.display());
    let options = DriverOptions {
        draw_seed: config.draw_seed,
    };
    let driver = TournamentDriver::new(JsonFileStore::new(&config.data_dir), options);
    let state = Data::new(RwLock::new(driver));

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_progress)
    })
    .bind(bind)?
    .run()
    .await
}
