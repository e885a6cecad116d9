use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

// The one static asset, served so the pages still render for blocked
// clients (the gate exempts /static/).
pub const STYLESHEET: &str = "body { font-family: sans-serif; max-width: 28rem; margin: 4rem auto; }\n\
label { display: block; margin-bottom: 0.5rem; }\n\
.error { color: #b00020; }\n";

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>404 Not Found</title>\
<link rel=\"stylesheet\" href=\"/static/style.css\"></head>\n<body>\n\
<h1>404 Not Found</h1>\n<p>The page you are looking for does not exist.</p>\n\
</body>\n</html>\n";

const RATE_LIMIT_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>Too Many Requests</title>\
<link rel=\"stylesheet\" href=\"/static/style.css\"></head>\n<body>\n\
<h1>429 Too Many Requests</h1>\n<p>Rate Limit Exceeded. Too many requests. Try again later.</p>\n\
</body>\n</html>\n";

// Login form, with the invalid-credentials notice when a failure led here
pub fn index(error: Option<&str>) -> Response {
    let notice = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape(msg)),
        None => String::new(),
    };
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Sign in</title>\
<link rel=\"stylesheet\" href=\"/static/style.css\"></head>\n<body>\n\
<h1>Sign in</h1>\n{notice}\
<form method=\"post\" action=\"/login\">\n\
  <label>Username <input type=\"text\" name=\"username\"></label>\n\
  <label>Password <input type=\"password\" name=\"password\"></label>\n\
  <button type=\"submit\">Log in</button>\n\
</form>\n</body>\n</html>\n"
    );
    Html(body).into_response()
}

pub fn success(username: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Welcome</title>\
<link rel=\"stylesheet\" href=\"/static/style.css\"></head>\n<body>\n\
<h1>Login successful</h1>\n<p>Welcome, {}.</p>\n</body>\n</html>\n",
        escape(username)
    );
    Html(body).into_response()
}

pub fn rate_limited() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, Html(RATE_LIMIT_PAGE)).into_response()
}

// Opaque not-found page, also used to disguise blocks - a blocked client
// must not be able to tell this apart from a genuinely missing page
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

// User input is echoed into the success and error pages
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
