//! Single binary web server: JSON API for building doubles schedules.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use doubles_schedule_web::{
    load_players_csv, Gender, PlayerId, Schedule, ScheduleConfig, ScheduleConfigPatch, ScheduleError,
    ScheduleId, SkillLevel,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-schedule entry: schedule data + last activity time (for auto-cleanup).
struct ScheduleEntry {
    schedule: Schedule,
    last_activity: Instant,
}

/// In-memory state: many schedules by ID. Writers hold the lock for the whole regeneration,
/// so two edits of one schedule never interleave.
type AppState = Data<RwLock<HashMap<ScheduleId, ScheduleEntry>>>;

/// Inactivity threshold: schedules not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: String,
    gender: String,
    #[serde(default)]
    skill_level: String,
}

impl PlayerBody {
    fn parse(&self) -> Result<(Gender, SkillLevel), ScheduleError> {
        Ok((self.gender.parse()?, SkillLevel::parse_lenient(&self.skill_level)))
    }
}

#[derive(Deserialize)]
struct CreateScheduleBody {
    players: Vec<PlayerBody>,
    #[serde(flatten)]
    config: ScheduleConfig,
}

#[derive(Deserialize)]
struct Round1Body {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct SchedulePath {
    id: ScheduleId,
}

#[derive(Deserialize)]
struct SchedulePlayerPath {
    id: ScheduleId,
    player_id: PlayerId,
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No schedule" }))
}

/// Store a freshly built schedule and return it.
fn insert_schedule(state: &AppState, schedule: Schedule) -> HttpResponse {
    let id = schedule.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!(
        "Created schedule {} with {} players, {} matches",
        id,
        schedule.players.len(),
        schedule.matches.len()
    );
    let response = HttpResponse::Ok().json(&schedule);
    g.insert(
        id,
        ScheduleEntry {
            schedule,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "doubles-schedule-web",
    })
}

/// Build a schedule through `Schedule::add_player`, then put everyone in round 1.
fn build_schedule(body: CreateScheduleBody) -> Result<Schedule, ScheduleError> {
    let mut schedule = Schedule::new(Vec::new(), body.config)?;
    for p in &body.players {
        let (gender, skill) = p.parse()?;
        schedule.add_player(p.name.as_str(), gender, skill)?;
    }
    let everyone: Vec<PlayerId> = schedule.players.iter().map(|p| p.id).collect();
    schedule.roster.select_round1(everyone);
    schedule.regenerate();
    Ok(schedule)
}

/// Create a schedule from a JSON roster; everyone starts in round 1.
#[post("/api/schedules")]
async fn api_create_schedule(state: AppState, body: Json<CreateScheduleBody>) -> HttpResponse {
    match build_schedule(body.into_inner()) {
        Ok(schedule) => insert_schedule(&state, schedule),
        Err(e) => bad_request(e),
    }
}

/// Create a schedule from a CSV roster (`name,gender,skill_level`); configuration in the query.
#[post("/api/schedules/import")]
async fn api_import_schedule(state: AppState, config: Query<ScheduleConfig>, body: String) -> HttpResponse {
    let players = match load_players_csv(body.as_bytes()) {
        Ok(players) => players,
        Err(e) => return bad_request(e),
    };
    match Schedule::new(players, config.into_inner()) {
        Ok(schedule) => insert_schedule(&state, schedule),
        Err(e) => bad_request(e),
    }
}

/// Get a schedule by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/schedules/{id}")]
async fn api_get_schedule(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.schedule)
        }
        None => not_found(),
    }
}

/// Matches grouped by round.
#[get("/api/schedules/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.schedule.rounds())
        }
        None => not_found(),
    }
}

/// Roster counts for the round-1 dialog, including players needed to fill a court.
#[get("/api/schedules/{id}/status")]
async fn api_get_status(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.schedule.status())
        }
        None => not_found(),
    }
}

/// Register a player mid-evening and regenerate.
#[post("/api/schedules/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SchedulePath>, body: Json<PlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.schedule;
    let (gender, skill) = match body.parse() {
        Ok(parsed) => parsed,
        Err(e) => return bad_request(e),
    };
    match s.add_player(body.name.as_str(), gender, skill) {
        Ok(_) => {
            s.regenerate();
            HttpResponse::Ok().json(s)
        }
        Err(e) => bad_request(e),
    }
}

/// Remove a player (also from round 1 and any frozen match) and regenerate.
#[delete("/api/schedules/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SchedulePlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.schedule;
    match s.remove_player(path.player_id) {
        Ok(()) => {
            s.regenerate();
            HttpResponse::Ok().json(s)
        }
        Err(e) => bad_request(e),
    }
}

/// Commit a new round-1 selection (keeps still-valid round-1 matches) and regenerate.
#[put("/api/schedules/{id}/round1")]
async fn api_update_round1(state: AppState, path: Path<SchedulePath>, body: Json<Round1Body>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.schedule;
    match s.update_round1(&body.player_ids) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Change courts or time window and regenerate. Fields missing from the body keep their value.
#[put("/api/schedules/{id}/config")]
async fn api_set_config(state: AppState, path: Path<SchedulePath>, body: Json<ScheduleConfigPatch>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.schedule;
    let config = s.config.merged(body.into_inner());
    match s.set_config(config) {
        Ok(()) => {
            s.regenerate();
            HttpResponse::Ok().json(s)
        }
        Err(e) => bad_request(e),
    }
}

/// Regenerate from the current roster and frozen matches.
#[post("/api/schedules/{id}/regenerate")]
async fn api_regenerate(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.schedule;
    s.regenerate();
    HttpResponse::Ok().json(s)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<ScheduleId, ScheduleEntry>::new()));

    // Background task: every 30 minutes, remove schedules inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive schedule(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_import_schedule)
            .service(api_create_schedule)
            .service(api_get_schedule)
            .service(api_get_rounds)
            .service(api_get_status)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_update_round1)
            .service(api_set_config)
            .service(api_regenerate)
    })
    .bind(bind)?
    .run()
    .await
}
