use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Extension;

use focuslog_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// `GET /login` — the login form, with the error banner from a failed
/// attempt when present.
pub async fn login_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    Html(auth_form_page(
        "Log in",
        "/login",
        r#"No account yet? <a href="/register">Register</a>"#,
        params.get("error").map(String::as_str),
    ))
}

/// `GET /register` — the registration form.
pub async fn register_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    Html(auth_form_page(
        "Register",
        "/register",
        r#"Already registered? <a href="/login">Log in</a>"#,
        params.get("error").map(String::as_str),
    ))
}

/// `GET /` — the dashboard. The session journal and schedule are rendered
/// client-side against the JSON endpoints.
pub async fn dashboard(Extension(claims): Extension<Claims>) -> Html<String> {
    Html(
        DASHBOARD_TEMPLATE
            .replace("__USERNAME__", &escape_html(&claims.username)),
    )
}

/// `GET /focus/{id}` — full-screen countdown for one scheduled intention.
/// 404 when the intention does not exist, 403 when it belongs to someone
/// else.
pub async fn focus_page(
    State(state): State<AppState>,
    Path(intention_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Html<String>, ApiError> {
    let row = state
        .db
        .get_intention(&intention_id)?
        .ok_or(ApiError::NotFound)?;

    if row.user_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden);
    }

    Ok(Html(
        FOCUS_TEMPLATE
            .replace("__TITLE__", &escape_html(&row.title))
            .replace("__INTENTION_ID__", &row.id)
            .replace("__PLANNED_DURATION__", &row.planned_duration.to_string()),
    ))
}

fn auth_form_page(title: &str, action: &str, footer: &str, error: Option<&str>) -> String {
    let banner = error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();

    AUTH_FORM_TEMPLATE
        .replace("__TITLE__", title)
        .replace("__ACTION__", action)
        .replace("__ERROR__", &banner)
        .replace("__FOOTER__", footer)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const AUTH_FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>__TITLE__ - focuslog</title>
<style>
  body { font-family: sans-serif; max-width: 24rem; margin: 4rem auto; }
  label { display: block; margin-top: 0.75rem; }
  .error { color: #b00020; }
</style></head>
<body>
  <h1>__TITLE__</h1>
  __ERROR__
  <form method="post" action="__ACTION__">
    <label>Username <input type="text" name="username" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">__TITLE__</button>
  </form>
  <p>__FOOTER__</p>
</body>
</html>
"#;

const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>focuslog</title>
<style>
  body { font-family: sans-serif; max-width: 42rem; margin: 2rem auto; }
  article { border: 1px solid #ccc; border-radius: 4px; padding: 0.75rem; margin: 0.75rem 0; }
  label { display: block; margin-top: 0.5rem; }
</style></head>
<body>
  <header>
    <h1>focuslog</h1>
    <p>Signed in as <strong>__USERNAME__</strong> &middot; <a href="/logout">Log out</a></p>
  </header>

  <section>
    <h2>Start a session</h2>
    <form id="start-session-form">
      <label>Intention <input type="text" name="intention" required></label>
      <label>Planned duration (min) <input type="number" name="planned_duration" min="1" required></label>
      <button type="submit">Start</button>
    </form>
    <h2>Session history</h2>
    <div id="session-history-container"></div>
  </section>

  <section>
    <h2>Schedule an intention</h2>
    <form id="schedule-intention-form">
      <label>Title <input type="text" name="title" required></label>
      <label>When <input type="datetime-local" name="scheduled_time" required></label>
      <label>Planned duration (min) <input type="number" name="planned_duration" min="1" required></label>
      <button type="submit">Schedule</button>
    </form>
    <h2>Upcoming intentions</h2>
    <div id="upcoming-intentions-container"></div>
  </section>

<script>
const historyContainer = document.getElementById("session-history-container");
const upcomingContainer = document.getElementById("upcoming-intentions-container");
const startSessionForm = document.getElementById("start-session-form");
const scheduleForm = document.getElementById("schedule-intention-form");

const fetchAndDisplaySessions = async () => {
  const response = await fetch("/api/sessions");
  const sessions = await response.json();
  historyContainer.innerHTML = "";

  if (sessions.length === 0) {
    historyContainer.innerHTML = "<p>No sessions logged yet. Start a new one above!</p>";
    return;
  }

  sessions.forEach((session) => {
    const article = document.createElement("article");
    let content = `<header><strong>Intention:</strong> ${session.intention}
      <em>(Planned: ${session.planned_duration} min)</em></header>`;

    if (session.actual_duration !== null) {
      const distraction = session.actual_duration - session.planned_duration;
      content += `
        <p><strong>Reality:</strong> ${session.actual_activity} (${session.actual_duration} min)</p>
        <p><strong>Feeling:</strong> ${session.feeling}</p>
        <footer><strong>Distraction score:</strong> ${distraction} min</footer>`;
    } else {
      content += `
        <form class="end-session-form" data-session-id="${session.id}">
          <label>Actual activity <input type="text" name="actual_activity" required></label>
          <label>Actual duration (min) <input type="number" name="actual_duration" min="0" required></label>
          <label>Feeling
            <select name="feeling">
              <option value="Productive">Productive</option>
              <option value="Neutral">Neutral</option>
              <option value="Distracted">Distracted</option>
            </select>
          </label>
          <button type="submit">End session</button>
        </form>`;
    }
    article.innerHTML = content;
    historyContainer.appendChild(article);
  });
};

const fetchAndDisplayScheduled = async () => {
  const response = await fetch("/api/schedule");
  const intentions = await response.json();
  upcomingContainer.innerHTML = "";

  if (intentions.length === 0) {
    upcomingContainer.innerHTML = "<p>No upcoming intentions. Plan your day!</p>";
    return;
  }

  intentions.forEach((intention) => {
    const article = document.createElement("article");
    const scheduledTime = new Date(intention.scheduled_time).toLocaleString();
    article.innerHTML = `<p><strong>${intention.title}</strong> (${intention.planned_duration} min)
      <br><em>Scheduled for: ${scheduledTime}</em>
      ${intention.is_completed
        ? "<span>&#10003; Completed</span>"
        : `<a href="/focus/${intention.id}">Start focus mode</a>`}</p>`;
    upcomingContainer.appendChild(article);
  });
};

startSessionForm.addEventListener("submit", async (e) => {
  e.preventDefault();
  const formData = new FormData(startSessionForm);
  await fetch("/api/sessions", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      intention: formData.get("intention"),
      planned_duration: parseInt(formData.get("planned_duration")),
    }),
  });
  startSessionForm.reset();
  fetchAndDisplaySessions();
});

historyContainer.addEventListener("submit", async (e) => {
  if (!e.target.classList.contains("end-session-form")) return;
  e.preventDefault();
  const form = e.target;
  const formData = new FormData(form);
  await fetch(`/api/sessions/${form.dataset.sessionId}`, {
    method: "PUT",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      actual_activity: formData.get("actual_activity"),
      actual_duration: parseInt(formData.get("actual_duration")),
      feeling: formData.get("feeling"),
    }),
  });
  fetchAndDisplaySessions();
});

scheduleForm.addEventListener("submit", async (e) => {
  e.preventDefault();
  const formData = new FormData(scheduleForm);
  await fetch("/api/schedule", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      title: formData.get("title"),
      scheduled_time: formData.get("scheduled_time"),
      planned_duration: parseInt(formData.get("planned_duration")),
    }),
  });
  scheduleForm.reset();
  fetchAndDisplayScheduled();
});

fetchAndDisplaySessions();
fetchAndDisplayScheduled();
</script>
</body>
</html>
"#;

const FOCUS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Focus - focuslog</title>
<style>
  body { font-family: sans-serif; text-align: center; margin-top: 6rem; }
  #timer { font-size: 4rem; margin: 2rem; }
</style></head>
<body>
  <h1>__TITLE__</h1>
  <div id="timer"></div>
  <button id="complete-btn">Mark complete</button>
  <p><a href="/">Back to dashboard</a></p>

<script>
const intentionId = "__INTENTION_ID__";
const plannedDuration = __PLANNED_DURATION__;
const timerDisplay = document.getElementById("timer");
const completeBtn = document.getElementById("complete-btn");

let timeLeft = plannedDuration * 60;

const timerInterval = setInterval(() => {
  timeLeft--;
  const minutes = Math.floor(timeLeft / 60);
  const seconds = String(timeLeft % 60).padStart(2, "0");
  timerDisplay.textContent = `${minutes}:${seconds}`;

  if (timeLeft <= 0) {
    clearInterval(timerInterval);
    timerDisplay.textContent = "Time's up!";
  }
}, 1000);

completeBtn.addEventListener("click", async () => {
  clearInterval(timerInterval);
  await fetch(`/api/schedule/${intentionId}/complete`, { method: "PUT" });
  window.location.href = "/";
});
</script>
</body>
</html>
"#;
