use axum::{
    Form, Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    access::{AccessReason, PageClass, login_toast},
    document::{Document, HtmlDocument, apply},
    identity::SessionCredentials,
    models::RegisterForm,
    page::{PageView, render_page},
    pages,
    view::escape_html,
};

// --- Query Structs ---

/// LoginParams
///
/// Flags appended by the identity service when it sends the browser back to the login
/// page (only their presence matters), plus the `notice` the guard attaches when it
/// turns an anonymous visitor away from a restricted page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub error: Option<String>,
    pub logout: Option<String>,
    pub notice: Option<String>,
}

/// ViewQuery
///
/// Query parameters of the page-view endpoint (GET /api/view).
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ViewQuery {
    /// The page path to evaluate, e.g. `/cart`.
    pub path: String,
}

// --- Page Pipeline ---

/// resolve_page
///
/// Resolves the caller's identity, then computes the page view for `path`. The
/// identity call is the only await point of a page load.
async fn resolve_page(state: &AppState, headers: &HeaderMap, path: &str) -> PageView {
    let credentials = SessionCredentials::from_headers(headers);
    let identity = state.identity.authenticated(&credentials).await;
    render_page(&identity, path, &state.policy, &state.config.endpoints())
}

/// respond
///
/// Applies the page view to the page shell and serializes the result. A guard redirect
/// wins over the HTML body and is answered with 303 See Other. A login redirect names
/// the restricted class in `notice`, so the login page can show the prompt toast.
fn respond(page: &PageView, mut document: HtmlDocument, status: StatusCode) -> Response {
    apply(page, &mut document);

    if let Some(location) = document.location() {
        let notice = (page.decision.reason == AccessReason::NotAuthenticated)
            .then(|| page.decision.class.login_notice())
            .flatten();

        return match notice {
            Some(notice) => Redirect::to(&format!("{location}?notice={notice}")).into_response(),
            None => Redirect::to(location).into_response(),
        };
    }

    (status, Html(document.into_html())).into_response()
}

async fn serve_document(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
    document: HtmlDocument,
    status: StatusCode,
) -> Response {
    let page = resolve_page(state, headers, path).await;
    respond(&page, document, status)
}

// --- Handlers ---

/// store_page
///
/// [Page Route] Serves any storefront page shell. Paths without a registered page get
/// the 404 shell, but are still classified and guarded like every other path.
pub async fn store_page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path();
    let (document, status) = match pages::lookup(path) {
        Some(template) => (
            HtmlDocument::new(template.title, template.body),
            StatusCode::OK,
        ),
        None => (
            HtmlDocument::new(pages::NOT_FOUND_TITLE, pages::NOT_FOUND_BODY),
            StatusCode::NOT_FOUND,
        ),
    };

    serve_document(&state, &headers, path, document, status).await
}

/// login_page
///
/// [Page Route] The login form. Credentials are posted straight to the identity service;
/// the storefront never sees them.
pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LoginParams>,
) -> Response {
    let endpoints = state.config.endpoints();

    let mut body = String::from("<h1>Login</h1>\n");
    if params.error.is_some() {
        body.push_str("<p class=\"alert alert-error\">Invalid email or password. Please try again.</p>\n");
    }
    if params.logout.is_some() {
        body.push_str("<p class=\"alert alert-info\">You have been logged out successfully.</p>\n");
    }
    body.push_str(&format!(
        "<form action=\"{}\" method=\"POST\">\n\
         <label for=\"username\">Email</label>\n\
         <input type=\"email\" id=\"username\" name=\"username\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" id=\"password\" name=\"password\" required>\n\
         <button type=\"submit\" class=\"btn btn-primary\">Login</button>\n\
         </form>\n\
         <p>No account yet? <a href=\"{}\">Register</a></p>",
        escape_html(&endpoints.login_action),
        escape_html(&endpoints.register_page),
    ));

    let mut document = HtmlDocument::new("Login", body);
    if let Some(class) = params.notice.as_deref().and_then(PageClass::from_login_notice) {
        document.show_toast(&login_toast(class));
    }

    serve_document(&state, &headers, &endpoints.login_page, document, StatusCode::OK).await
}

/// register_page
///
/// [Page Route] The empty registration form.
pub async fn register_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    serve_register_form(&state, &headers, &RegisterForm::default(), None, StatusCode::OK).await
}

/// register
///
/// [Page Route] Validates the registration form and forwards it to the identity
/// service. On success the browser is sent to the login page; on failure the form is
/// shown again with the reason, keeping everything but the password.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Response {
    let echo = RegisterForm {
        password: String::new(),
        ..form.clone()
    };

    if let Err(message) = form.validate() {
        return serve_register_form(&state, &headers, &echo, Some(message), StatusCode::BAD_REQUEST)
            .await;
    }

    match state.identity.register(form).await {
        Ok(()) => {
            tracing::info!("customer account registered");
            Redirect::to(&state.config.endpoints().login_page).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            serve_register_form(
                &state,
                &headers,
                &echo,
                Some("Registration failed. Please try again."),
                StatusCode::BAD_GATEWAY,
            )
            .await
        }
    }
}

async fn serve_register_form(
    state: &AppState,
    headers: &HeaderMap,
    form: &RegisterForm,
    error: Option<&str>,
    status: StatusCode,
) -> Response {
    let endpoints = state.config.endpoints();

    let mut body = String::from("<h1>Register</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!(
            "<p class=\"alert alert-error\">{}</p>\n",
            escape_html(error)
        ));
    }
    body.push_str(&format!(
        "<form action=\"{}\" method=\"POST\">\n\
         <label for=\"name\">Name</label>\n\
         <input type=\"text\" id=\"name\" name=\"name\" value=\"{}\" required>\n\
         <label for=\"surname\">Surname</label>\n\
         <input type=\"text\" id=\"surname\" name=\"surname\" value=\"{}\" required>\n\
         <label for=\"email\">Email</label>\n\
         <input type=\"email\" id=\"email\" name=\"email\" value=\"{}\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" id=\"password\" name=\"password\" required>\n\
         <button type=\"submit\" class=\"btn btn-primary\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"{}\">Log in</a></p>",
        escape_html(&endpoints.register_page),
        escape_html(&form.name),
        escape_html(&form.surname),
        escape_html(&form.email),
        escape_html(&endpoints.login_page),
    ));

    let document = HtmlDocument::new("Register", body);
    serve_document(state, headers, &endpoints.register_page, document, status).await
}

/// access_denied
///
/// [Page Route] The 403 page.
pub async fn access_denied(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let template = pages::ACCESS_DENIED;
    let document = HtmlDocument::new(template.title, template.body);
    serve_document(&state, &headers, template.path, document, StatusCode::FORBIDDEN).await
}

/// get_page_view
///
/// [API Route] Returns the page view for `path` as JSON, for clients that apply it to a
/// live document themselves.
#[utoipa::path(
    get,
    path = "/api/view",
    params(ViewQuery),
    responses((status = 200, description = "Page view for the caller's session", body = PageView))
)]
pub async fn get_page_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Json<PageView> {
    Json(resolve_page(&state, &headers, &query.path).await)
}
