//! HTTP endpoints of the long-poll protocol.

use crate::context::DashboardContext;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, Redirect},
};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub type SharedContext = Arc<DashboardContext>;

/// Appended to every update; the page's `poll()` re-issues `GET update.js`.
pub const POLL_TRAILER: &str = "poll();\n";

/// `GET /` — the chart lives at `/graph`.
pub async fn index() -> Redirect {
    Redirect::temporary("/graph")
}

/// `GET /graph` — full page with the latest data.
pub async fn graph_page(State(ctx): State<SharedContext>) -> Html<String> {
    debug!("serving initial page");
    Html(ctx.render_page())
}

/// `GET /update.js` — waits the pacing delay, then returns the redraw script.
pub async fn update_script(
    State(ctx): State<SharedContext>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    tokio::time::sleep(ctx.poll_delay()).await;

    let mut body = ctx.render_update();
    body.push_str(&status_script(Local::now()));
    body.push_str(POLL_TRAILER);

    debug!(bytes = body.len(), "serving update");
    ([(header::CONTENT_TYPE, "text/javascript")], body)
}

#[derive(Debug, Default, Deserialize)]
pub struct ScaleQuery {
    #[serde(rename = "SCALE")]
    pub scale: Option<String>,
}

/// `GET /setscale?SCALE=<int>` — change the time window; bad input is ignored.
pub async fn set_scale(
    State(ctx): State<SharedContext>,
    Query(query): Query<ScaleQuery>,
) -> StatusCode {
    match parse_scale(query.scale.as_deref()) {
        Some(scale) => {
            debug!(scale, "time window changed");
            ctx.set_scale(f64::from(scale));
        }
        None => debug!(raw = ?query.scale, "ignoring scale request"),
    }
    StatusCode::OK
}

/// A usable window width: a positive integer.
pub fn parse_scale(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|&s| s > 0)
}

fn status_script(now: DateTime<Local>) -> String {
    format!(
        "document.getElementById(\"updated\").innerHTML = \"updated {}\";\n",
        now.format("%H:%M:%S")
    )
}
