//! HTML page handlers for the public site and the admin panel.
//!
//! Pages are rendered as inline HTML strings; there is no template engine
//! and no static file serving in this surface.

use axum::response::Html;

use crate::server::session::{AdminIdentity, OptionalAdmin};

const PAGE_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 0; } \
header { background:#111; color:#fff; padding:16px; } \
main { padding: 24px; } \
.card { border:1px solid #ddd; border-radius:8px; padding:16px; margin-bottom:16px; } \
input, textarea { display:block; margin:8px 0; padding:8px; width:280px; } \
button { padding:8px 16px; }";

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style>{PAGE_STYLE}</style>
  </head>
  <body>
{body}
  </body>
</html>"#
    )
}

/// GET / - public landing page.
pub async fn home_page() -> Html<String> {
    let body = r#"    <header>
      <h1>Marquee</h1>
      <p>Talent directory and booking requests.</p>
    </header>
    <main>
      <div class="card">
        <h2>Talent Directory</h2>
        <p>Browse our talents via <code>GET /api/talents</code>.</p>
      </div>
      <div class="card">
        <h2>Request a Booking</h2>
        <p>Submit a booking request via <code>POST /api/bookings</code>.</p>
      </div>
      <div class="card">
        <h2>Questions</h2>
        <p>Reach us via <code>POST /api/questions</code>.</p>
      </div>
    </main>"#;

    Html(page("Marquee", body))
}

/// GET /admin - admin page.
///
/// Branches on the session cookie: a valid session renders the panel,
/// anything else renders the login form. The page itself never rejects;
/// the data it loads is gated separately.
pub async fn admin_page(OptionalAdmin(identity): OptionalAdmin) -> Html<String> {
    match identity {
        Some(identity) => Html(page("Marquee Admin", &admin_panel(&identity))),
        None => Html(page("Marquee Admin Login", LOGIN_FORM)),
    }
}

const LOGIN_FORM: &str = r#"    <header>
      <h1>Admin Login</h1>
    </header>
    <main>
      <div class="card">
        <form id="login-form">
          <input type="text" id="username" placeholder="Username" autocomplete="username" />
          <input type="password" id="password" placeholder="Password" autocomplete="current-password" />
          <button type="submit">Log in</button>
        </form>
        <p id="login-status"></p>
      </div>
      <script>
        document.getElementById('login-form').addEventListener('submit', async (e) => {
          e.preventDefault();
          const res = await fetch('/admin/login', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({
              username: document.getElementById('username').value,
              password: document.getElementById('password').value,
            }),
          });
          if (res.ok) { location.reload(); }
          else { document.getElementById('login-status').textContent = 'Login failed.'; }
        });
      </script>
    </main>"#;

fn admin_panel(identity: &AdminIdentity) -> String {
    format!(
        r#"    <header>
      <h1>Admin Panel</h1>
      <p>Signed in as {subject}</p>
    </header>
    <main>
      <div class="card">
        <h2>Bookings</h2>
        <pre id="bookings">Loading…</pre>
      </div>
      <div class="card">
        <h2>Questions</h2>
        <pre id="questions">Loading…</pre>
      </div>
      <div class="card">
        <button id="logout">Log out</button>
      </div>
      <script>
        async function load(path, el) {{
          const res = await fetch(path);
          document.getElementById(el).textContent = res.ok
            ? JSON.stringify(await res.json(), null, 2)
            : 'Failed to load (' + res.status + ')';
        }}
        load('/api/admin/bookings', 'bookings');
        load('/api/admin/questions', 'questions');
        document.getElementById('logout').addEventListener('click', async () => {{
          await fetch('/admin/logout', {{ method: 'POST' }});
          location.reload();
        }});
      </script>
    </main>"#,
        subject = identity.subject
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_page_has_directory_card() {
        let html = page("Marquee", "    <h2>Talent Directory</h2>");
        assert!(html.contains("<!doctype html>"));
        assert!(html.contains("Talent Directory"));
    }

    #[test]
    fn admin_panel_shows_subject() {
        let identity = AdminIdentity {
            subject: "admin".to_string(),
            role: "admin".to_string(),
        };
        let html = admin_panel(&identity);
        assert!(html.contains("Signed in as admin"));
        assert!(html.contains("/api/admin/bookings"));
    }

    #[test]
    fn login_form_posts_to_login() {
        assert!(LOGIN_FORM.contains("/admin/login"));
        assert!(LOGIN_FORM.contains("type=\"password\""));
    }
}
