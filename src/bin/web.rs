//! Single binary web server: JSON API over in-memory meetups.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), MEETUP_INACTIVITY_HOURS (e.g. 12).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use meetup_night::{
    export_roster_csv, import_roster_csv, Meetup, MeetupId, PlayerFilter, PlayerId, TeamField,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-meetup entry: meetup data + last activity time (for auto-cleanup).
struct MeetupEntry {
    meetup: Meetup,
    last_activity: Instant,
}

/// Meetups by ID with their last activity. Any request that looks a meetup up counts as activity.
#[derive(Default)]
struct MeetupStore {
    entries: HashMap<MeetupId, MeetupEntry>,
}

impl MeetupStore {
    fn insert(&mut self, meetup: Meetup) {
        self.entries.insert(
            meetup.id,
            MeetupEntry {
                meetup,
                last_activity: Instant::now(),
            },
        );
    }

    /// Look up a meetup and refresh its activity time (reads and writes alike).
    fn touch(&mut self, id: MeetupId) -> Option<&mut Meetup> {
        let entry = self.entries.get_mut(&id)?;
        entry.last_activity = Instant::now();
        Some(&mut entry.meetup)
    }

    /// Drop meetups idle for at least `timeout`. Returns how many were removed.
    fn remove_inactive(&mut self, timeout: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - self.entries.len()
    }
}

/// In-memory state: many meetups by ID. Entries are removed after the inactivity timeout.
type AppState = Data<RwLock<MeetupStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct SavePlayerBody {
    name: String,
    skill: f64,
}

#[derive(Deserialize)]
struct GroupCountBody {
    group_count: usize,
}

#[derive(Deserialize)]
struct SetTeamBody {
    slot: usize,
    field: TeamField,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct AdvanceWinnerBody {
    slot: usize,
    team: String,
}

/// `?filter=all|in|out|skill|unrated&band=N`
#[derive(Deserialize)]
struct PlayersQuery {
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    band: Option<u8>,
}

impl PlayersQuery {
    fn to_filter(&self) -> Result<PlayerFilter, String> {
        match self.filter.as_deref().unwrap_or("all") {
            "all" => Ok(PlayerFilter::All),
            "in" => Ok(PlayerFilter::CheckedIn),
            "out" => Ok(PlayerFilter::CheckedOut),
            "unrated" => Ok(PlayerFilter::Unrated),
            // Skill tab without a band selected lists everyone.
            "skill" => Ok(match self.band {
                Some(band @ 1..=9) => PlayerFilter::SkillBand(band),
                Some(band) => return Err(format!("Skill band must be 1-9 (got {})", band)),
                None => PlayerFilter::All,
            }),
            other => Err(format!("Unknown filter '{}'", other)),
        }
    }
}

/// Path segment: meetup id (e.g. /api/meetups/{id})
#[derive(Deserialize)]
struct MeetupPath {
    id: MeetupId,
}

/// Path segments: meetup id and player id (e.g. /api/meetups/{id}/players/{player_id})
#[derive(Deserialize)]
struct MeetupPlayerPath {
    id: MeetupId,
    player_id: PlayerId,
}

/// Look up a meetup, refresh its activity time, apply `op` and respond with the meetup.
/// Domain errors become 400 with `{ "error": msg }`.
fn update_meetup<F, E>(state: &AppState, id: MeetupId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Meetup) -> Result<(), E>,
    E: std::fmt::Display,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let meetup = match g.touch(id) {
        Some(m) => m,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No meetup" })),
    };
    match op(&mut *meetup) {
        Ok(()) => HttpResponse::Ok().json(&*meetup),
        Err(e) => {
            log::warn!("Meetup {}: {}", id, e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "meetup-night",
    })
}

/// Create a new meetup (returns it with id; client stores id for subsequent requests).
#[post("/api/meetups")]
async fn api_create_meetup(state: AppState) -> HttpResponse {
    let meetup = Meetup::new();
    let id = meetup.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&meetup);
    g.insert(meetup);
    log::info!("Created meetup {}", id);
    response
}

/// Get a meetup by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/meetups/{id}")]
async fn api_get_meetup(state: AppState, path: Path<MeetupPath>) -> HttpResponse {
    update_meetup(&state, path.id, |_| Ok::<(), String>(()))
}

/// List players with a filter, highest skill first.
#[get("/api/meetups/{id}/players")]
async fn api_list_players(state: AppState, path: Path<MeetupPath>, query: Query<PlayersQuery>) -> HttpResponse {
    let filter = match query.to_filter() {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e })),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.touch(path.id) {
        Some(m) => HttpResponse::Ok().json(m.roster.filter(filter)),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No meetup" })),
    }
}

/// Self-registration: adds an unrated player.
#[post("/api/meetups/{id}/players/register")]
async fn api_register_player(state: AppState, path: Path<MeetupPath>, body: Json<NameBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.roster.register(&body.name)?;
        log::info!("Registered player '{}'", body.name.trim());
        Ok::<(), meetup_night::RosterError>(())
    })
}

/// Add a player with a skill, or update the skill of an existing one.
#[put("/api/meetups/{id}/players")]
async fn api_save_player(state: AppState, path: Path<MeetupPath>, body: Json<SavePlayerBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.roster.save_player(&body.name, body.skill).map(|_| ())
    })
}

/// Rename / re-rate a player by id.
#[put("/api/meetups/{id}/players/{player_id}")]
async fn api_edit_player(
    state: AppState,
    path: Path<MeetupPlayerPath>,
    body: Json<SavePlayerBody>,
) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.roster
            .edit_player(path.player_id, &body.name, body.skill)
            .map(|_| ())
    })
}

/// Delete a player by id (also checks them out).
#[delete("/api/meetups/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<MeetupPlayerPath>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        let removed = m.roster.remove_player_by_id(path.player_id)?;
        log::info!("Removed player '{}'", removed.name);
        Ok::<(), meetup_night::RosterError>(())
    })
}

/// Check in a registered player by name.
#[post("/api/meetups/{id}/check-ins")]
async fn api_check_in(state: AppState, path: Path<MeetupPath>, body: Json<NameBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| m.roster.check_in(&body.name))
}

/// Check out a player by name.
#[post("/api/meetups/{id}/check-ins/out")]
async fn api_check_out(state: AppState, path: Path<MeetupPath>, body: Json<NameBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.roster.check_out(&body.name);
        Ok::<(), String>(())
    })
}

/// Reset all check-ins.
#[delete("/api/meetups/{id}/check-ins")]
async fn api_reset_check_ins(state: AppState, path: Path<MeetupPath>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.roster.reset_check_ins();
        log::info!("Check-ins reset");
        Ok::<(), String>(())
    })
}

/// Set the number of teams to generate (values below 2 become 2).
#[put("/api/meetups/{id}/groups/count")]
async fn api_set_group_count(state: AppState, path: Path<MeetupPath>, body: Json<GroupCountBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.set_group_count(body.group_count);
        Ok::<(), String>(())
    })
}

/// Generate balanced teams from checked-in players.
#[post("/api/meetups/{id}/groups/generate")]
async fn api_generate_groups(state: AppState, path: Path<MeetupPath>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        let groups = m.generate_groups();
        log::info!("Generated {} teams, totals {:?}", groups.len(), groups.totals());
        Ok::<(), String>(())
    })
}

/// Set a first-round team name.
#[put("/api/meetups/{id}/bracket/team")]
async fn api_set_bracket_team(state: AppState, path: Path<MeetupPath>, body: Json<SetTeamBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.set_match_team(body.slot, body.field, body.value.as_str())
    })
}

/// Advance a team as the winner of a match.
#[put("/api/meetups/{id}/bracket/winner")]
async fn api_advance_winner(state: AppState, path: Path<MeetupPath>, body: Json<AdvanceWinnerBody>) -> HttpResponse {
    update_meetup(&state, path.id, |m| m.advance_winner(body.slot, &body.team))
}

/// Clear the whole bracket.
#[post("/api/meetups/{id}/bracket/reset")]
async fn api_reset_bracket(state: AppState, path: Path<MeetupPath>) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        m.reset_bracket();
        Ok::<(), String>(())
    })
}

/// Download the roster as CSV.
#[get("/api/meetups/{id}/roster.csv")]
async fn api_export_roster(state: AppState, path: Path<MeetupPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let meetup = match g.touch(path.id) {
        Some(m) => m,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No meetup" })),
    };
    let mut buf = Vec::new();
    match export_roster_csv(&meetup.roster, &mut buf) {
        Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(buf),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Merge players from an uploaded CSV (`name,skill`) into the roster.
#[post("/api/meetups/{id}/roster.csv")]
async fn api_import_roster(state: AppState, path: Path<MeetupPath>, body: Bytes) -> HttpResponse {
    update_meetup(&state, path.id, |m| {
        import_roster_csv(&mut m.roster, &body[..]).map(|_| ())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let inactivity_hours: u64 = std::env::var("MEETUP_INACTIVITY_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_inactivity_hours);
    let inactivity_timeout = Duration::from_secs(inactivity_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(MeetupStore::default()));

    // Background task: every 30 minutes, remove meetups past the inactivity timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.remove_inactive(inactivity_timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive meetup(s) (no activity for {}h)",
                    removed,
                    inactivity_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_meetup)
            .service(api_get_meetup)
            .service(api_list_players)
            .service(api_register_player)
            .service(api_save_player)
            .service(api_edit_player)
            .service(api_remove_player)
            .service(api_check_in)
            .service(api_check_out)
            .service(api_reset_check_ins)
            .service(api_set_group_count)
            .service(api_generate_groups)
            .service(api_set_bracket_team)
            .service(api_advance_winner)
            .service(api_reset_bracket)
            .service(api_export_roster)
            .service(api_import_roster)
    })
    .bind(bind)?
    .run()
    .await
}
