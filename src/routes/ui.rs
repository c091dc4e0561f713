use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Agentic Blogger</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
      background:
        radial-gradient(circle at 22% 11%, rgba(62, 180, 137, .20), hsla(0, 0%, 100%, 0) 19%),
        radial-gradient(circle at 82% 25%, rgba(33, 150, 243, .18), hsla(0, 0%, 100%, 0) 35%),
        radial-gradient(circle at 25% 61%, rgba(250, 128, 114, .28), hsla(0, 0%, 100%, 0) 55%);
    }
    .card { width: 50em; max-width: 92vw; background: #fff; padding: 2em; border-radius: 12px;
            box-shadow: 0 10px 30px rgba(0, 0, 0, .12); }
    h1 { font-size: 1.5em; text-align: center; margin-top: 0; }
    input { width: 100%; box-sizing: border-box; padding: 0.7rem; font-size: 1rem; }
    button { width: 100%; margin-top: 0.5rem; padding: 0.7rem; font-size: 1rem; cursor: pointer; }
    .notice { color: #b3261e; min-height: 1.2em; margin-top: 0.5rem; }
    .spinner { margin: 1.5rem auto; width: 32px; height: 32px; border: 4px solid #ddd;
               border-top-color: #2196f3; border-radius: 50%; animation: spin 0.8s linear infinite; }
    @keyframes spin { to { transform: rotate(360deg); } }
    .result { margin-top: 1rem; padding: 1rem; border: 1px solid #eaeaea; border-radius: 8px;
              max-height: 400px; overflow-y: auto; line-height: 1.5; }
    .result.plain { white-space: pre-wrap; }
    .result h1, .result h2, .result h3 { margin-top: 0.6em; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <div class="card">
    <h1>AI Blog Agent</h1>
    <form id="researchForm">
      <input id="topic" name="topic" placeholder="Enter your topic..." autocomplete="off" />
      <button type="submit">Process</button>
    </form>
    <div id="notice" class="notice"></div>
    <div id="spinner" class="spinner hidden"></div>
    <div id="result" class="result hidden"></div>
  </div>

  <script>
    const form = document.getElementById('researchForm');
    const notice = document.getElementById('notice');
    const spinner = document.getElementById('spinner');
    const result = document.getElementById('result');

    let sessionId = localStorage.getItem('agentic-blogger-session');
    let latestRequest = null;
    let pollTimer = null;

    function render(state) {
      spinner.classList.toggle('hidden', !state.processing);
      result.classList.toggle('hidden', !state.result_ready);
      if (state.status === 'ready') {
        // Rendered server-side with raw HTML escaped
        if (state.result_html) {
          result.classList.remove('plain');
          result.innerHTML = state.result_html;
        } else {
          result.classList.add('plain');
          result.textContent = state.result;
        }
      }
      if (state.status === 'failed') {
        result.classList.add('plain');
        result.textContent = state.error;
      }
    }

    function showError(err) {
      render({ processing: false, result_ready: false });
      notice.textContent = `Request failed: ${err.message || err}`;
    }

    async function readJson(res) {
      try {
        return await res.json();
      } catch (_) {
        throw new Error(`unexpected response (HTTP ${res.status})`);
      }
    }

    async function poll() {
      const requestId = latestRequest;
      try {
        const res = await fetch(`/api/research/${sessionId}`);
        const json = await readJson(res);
        // A newer submission owns the page; drop anything else.
        if (requestId !== latestRequest || json.state.request_id !== latestRequest) return;
        render(json.state);
        if (json.state.processing) pollTimer = setTimeout(poll, 750);
      } catch (err) {
        if (requestId === latestRequest) showError(err);
      }
    }

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      notice.textContent = '';
      const topic = document.getElementById('topic').value;
      if (!topic.trim()) {
        notice.textContent = 'Please enter a topic to process.';
        return;
      }

      clearTimeout(pollTimer);
      render({ processing: true, result_ready: false });

      let res, json;
      try {
        res = await fetch('/api/research', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ topic, session_id: sessionId })
        });
        json = await readJson(res);
      } catch (err) {
        showError(err);
        return;
      }
      if (!res.ok) {
        render({ processing: false, result_ready: false });
        notice.textContent = json.error || `Request failed (HTTP ${res.status})`;
        return;
      }

      sessionId = json.session_id;
      localStorage.setItem('agentic-blogger-session', sessionId);
      latestRequest = json.request_id;
      render(json.state);
      pollTimer = setTimeout(poll, 500);
    });
  </script>
</body>
</html>"#)
}
