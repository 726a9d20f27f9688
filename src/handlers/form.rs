use crate::handlers::predict::{PredictResponse, LAST_PREDICTION_KEY};
use crate::services::schema::SymptomSchema;
use crate::state::AppState;
use axum::{extract::State, response::Html};
use tower_sessions::Session;

/// Checkboxes are flowed into this many visual columns. Layout only; the
/// feature vector is always built in schema order.
const FORM_COLUMNS: u8 = 3;

/// Renders the symptom checklist page. If this session already triggered a
/// prediction, its outcome is embedded as initial page state so a re-render
/// does not erase the displayed results.
pub async fn form_page(State(state): State<AppState>, session: Session) -> Html<String> {
    let last: Option<PredictResponse> = session.get(LAST_PREDICTION_KEY).await.ok().flatten();
    let initial_state = last
        .and_then(|outcome| serde_json::to_string(&outcome).ok())
        .unwrap_or_else(|| "null".to_string());

    Html(render_page(&state.schema, &initial_state))
}

fn render_page(schema: &SymptomSchema, initial_state: &str) -> String {
    let checkboxes: String = schema
        .symptoms()
        .iter()
        .map(|symptom| {
            format!(
                "<label class=\"symptom\"><input type=\"checkbox\" name=\"symptom\" value=\"{}\"> {}</label>\n",
                symptom,
                SymptomSchema::display_label(symptom)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Personalized Healthcare Recommendation System</title>
<style>
  body {{ background-color: #d7fcfc; font-family: sans-serif; margin: 0; padding: 1rem 2rem; }}
  h1 {{ text-align: center; }}
  .symptoms {{ column-count: {columns}; margin: 1rem 0; }}
  .symptom {{ display: block; margin-bottom: 6px; }}
  button {{ padding: 8px 20px; font-size: 16px; cursor: pointer; }}
  .cards {{ display: flex; gap: 16px; flex-wrap: wrap; margin-top: 12px; }}
  .disease-card {{
    background-color: #eef8ff; padding: 25px; border-radius: 12px; text-align: center;
    box-shadow: 0px 4px 12px rgba(0, 0, 0, 0.05); border: 1px solid #d6eaff;
    margin-bottom: 20px; flex: 1 1 220px;
  }}
  .disease-name {{ font-size: 22px; font-weight: 600; color: #1f4e79; }}
  .disease-prob {{ font-size: 18px; color: #2c6fa3; margin-top: 8px; }}
  .guidance {{ text-align: left; font-size: 14px; margin-top: 12px; }}
  .banner {{ padding: 12px; border-radius: 8px; margin: 12px 0; display: none; }}
  .banner.warning {{ background-color: #fff3cd; }}
  .banner.success {{ background-color: #d4edda; }}
  .banner.info {{ background-color: #d1ecf1; }}
</style>
</head>
<body>
<h1>&#x1FA7A; Personalized Healthcare Recommendation System</h1>
<p>Select your symptoms below and click <strong>Predict Disease</strong></p>

<form id="symptom-form" onsubmit="return false;">
  <div class="symptoms">
{checkboxes}  </div>
  <button id="predict">Predict Disease</button>
</form>

<div id="banner" class="banner"></div>
<div id="results"></div>
<div id="location-banner" class="banner"></div>
<div id="facilities"></div>

<script>
const initialState = {initial_state};

function showBanner(id, kind, text) {{
  const el = document.getElementById(id);
  el.className = 'banner ' + kind;
  el.style.display = 'block';
  el.textContent = text;
}}

function renderPrediction(data) {{
  showBanner('banner', data.confident ? 'success' : 'warning', data.message);
  const results = document.getElementById('results');
  results.innerHTML = '<h2>&#x1F9E0; Possible Conditions Based on Symptoms</h2>';
  const cards = document.createElement('div');
  cards.className = 'cards';
  for (const c of data.candidates) {{
    const card = document.createElement('div');
    card.className = 'disease-card';
    const name = c.disease.charAt(0).toUpperCase() + c.disease.slice(1).toLowerCase();
    card.innerHTML = '<div class="disease-name"></div>'
      + '<div class="disease-prob"></div>'
      + '<div class="guidance"><p><strong>Doctor:</strong> <span class="doctor"></span></p>'
      + '<p><strong>Tests:</strong> <span class="tests"></span></p>'
      + '<p><strong>Recommendation:</strong> <span class="advice"></span></p></div>';
    card.querySelector('.disease-name').textContent = name;
    card.querySelector('.disease-prob').textContent = (c.probability * 100).toFixed(2) + '%';
    card.querySelector('.doctor').textContent = c.doctor;
    card.querySelector('.tests').textContent = c.tests;
    card.querySelector('.advice').textContent = c.advice;
    cards.appendChild(card);
  }}
  results.appendChild(cards);
  locate();
}}

function renderFacilities(data) {{
  const section = document.getElementById('facilities');
  if (data.status === 'empty') {{
    showBanner('location-banner', 'warning', data.message);
    return;
  }}
  section.innerHTML = '<h2>&#x1F3E5; Nearby Hospitals &amp; Diagnostic Centers</h2>';
  const cards = document.createElement('div');
  cards.className = 'cards';
  for (const f of data.facilities) {{
    const card = document.createElement('div');
    card.className = 'disease-card';
    card.textContent = f.name;
    cards.appendChild(card);
  }}
  section.appendChild(cards);
}}

function locate() {{
  if (!navigator.geolocation) {{
    showBanner('location-banner', 'info', 'Please allow location access to see nearby hospitals.');
    return;
  }}
  showBanner('location-banner', 'info', 'Detecting your location...');
  navigator.geolocation.getCurrentPosition(async (pos) => {{
    showBanner('location-banner', 'success', 'Location detected successfully!');
    try {{
      const res = await fetch('/v1/facilities?lat=' + pos.coords.latitude + '&lon=' + pos.coords.longitude);
      if (!res.ok) {{
        showBanner('location-banner', 'warning', 'Facility lookup unavailable.');
        return;
      }}
      renderFacilities(await res.json());
    }} catch (e) {{
      showBanner('location-banner', 'warning', 'Facility lookup unavailable.');
    }}
  }}, () => {{
    showBanner('location-banner', 'info', 'Please allow location access to see nearby hospitals.');
  }});
}}

document.getElementById('predict').addEventListener('click', async () => {{
  const symptoms = Array.from(document.querySelectorAll('input[name="symptom"]:checked'))
    .map((el) => el.value);
  const res = await fetch('/v1/predict', {{
    method: 'POST',
    headers: {{ 'Content-Type': 'application/json' }},
    body: JSON.stringify({{ symptoms }}),
  }});
  const data = await res.json();
  if (!res.ok) {{
    showBanner('banner', 'warning', '⚠️ ' + data.error);
    return;
  }}
  renderPrediction(data);
}});

if (initialState) {{
  renderPrediction(initialState);
}}
</script>
</body>
</html>
"#,
        columns = FORM_COLUMNS,
        checkboxes = checkboxes,
        initial_state = initial_state,
    )
}
