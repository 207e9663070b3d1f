use storefront_shell::{
    AccessPolicy, AppConfig,
    access::{AccessReason, PageClass},
    document::{Document, HtmlDocument, Region, apply},
    models::{Identity, Role, User},
    page::{PageView, render_page},
    toast::Toast,
};

fn page(identity: &Identity, path: &str) -> PageView {
    render_page(
        identity,
        path,
        &AccessPolicy::storefront(),
        &AppConfig::default().endpoints(),
    )
}

fn signed_in(role: Role) -> Identity {
    Identity::Authenticated(User {
        role,
        name: "Petr".to_string(),
        email: "petr@store.test".to_string(),
    })
}

/// A document that records every call, standing in for a live browser page.
#[derive(Default)]
struct RecordingDocument {
    calls: Vec<String>,
}

impl Document for RecordingDocument {
    fn set_inner_html(&mut self, region: Region, html: &str) {
        self.calls.push(format!("set {} {}", region.id(), html.len()));
    }

    fn show_toast(&mut self, toast: &Toast) {
        self.calls.push(format!("toast {}", toast.duration_ms));
    }

    fn navigate(&mut self, location: &str) {
        self.calls.push(format!("navigate {location}"));
    }
}

// --- Scenarios ---

#[test]
fn test_anonymous_on_users_is_redirected_to_login() {
    let view = page(&Identity::Anonymous, "/users");

    assert_eq!(view.redirect(), Some("/login"));
    let toasts = view.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Please log in to access admin pages.");
    assert_eq!(toasts[0].duration_ms, 3000);
    assert!(view.view.role_links.is_empty());
}

#[test]
fn test_administrator_on_cart_sees_access_denied() {
    let view = page(&signed_in(Role::Administrator), "/cart");

    assert_eq!(view.decision.reason, AccessReason::WrongRole);
    assert_eq!(view.decision.class, PageClass::CustomerPage);
    assert!(view.redirect().is_none());
    assert!(view.content().unwrap().starts_with("<h1>Access Denied</h1>"));
    assert_eq!(view.toasts()[0].duration_ms, 5000);
}

#[test]
fn test_customer_on_products_customer_is_untouched() {
    let identity = signed_in(Role::Customer);
    let view = page(&identity, "/products-customer");

    assert!(view.decision.allowed);
    assert!(view.effects.is_empty());
    assert!(view.toasts().is_empty());
    assert!(view.redirect().is_none());
    assert_eq!(
        view.view,
        storefront_shell::view::render(
            &identity,
            "/products-customer",
            &AppConfig::default().endpoints()
        )
    );
}

#[test]
fn test_customer_never_sees_admin_links_on_admin_pages() {
    let view = page(&signed_in(Role::Customer), "/orders-admin");

    assert!(!view.decision.allowed);
    assert!(!view.view.role_links_html().contains("Manage"));
}

// --- Document Application ---

#[test]
fn test_apply_writes_regions_before_guard_effects() {
    let view = page(&Identity::Anonymous, "/cart");
    let mut document = RecordingDocument::default();

    apply(&view, &mut document);

    assert_eq!(document.calls.len(), 4);
    assert!(document.calls[0].starts_with("set role-specific-links"));
    assert!(document.calls[1].starts_with("set auth-links"));
    assert_eq!(document.calls[2], "toast 3000");
    assert_eq!(document.calls[3], "navigate /login");
}

#[test]
fn test_html_document_replaces_content_on_denial() {
    let view = page(&signed_in(Role::Customer), "/users");
    let mut document = HtmlDocument::new("Manage Users", "<h1>Manage Users</h1>");

    apply(&view, &mut document);

    assert!(document.location().is_none());
    assert!(
        document
            .region(Region::Content)
            .unwrap()
            .contains("Access Denied")
    );
    assert_eq!(document.toast().map(|t| t.duration_ms), Some(5000));

    let html = document.into_html();
    assert!(html.contains("<main id=\"content\"><h1>Access Denied</h1>"));
    assert!(html.contains("class=\"toast show\" data-duration-ms=\"5000\""));
    assert!(html.contains("<a href=\"/products-customer\">Products</a>"));
}

#[test]
fn test_html_document_keeps_page_body_when_allowed() {
    let view = page(&signed_in(Role::Administrator), "/users");
    let mut document = HtmlDocument::new("Manage Users", "<h1>Manage Users</h1>");

    apply(&view, &mut document);

    assert_eq!(document.region(Region::Content), Some("<h1>Manage Users</h1>"));
    assert!(document.toast().is_none());
    let html = document.into_html();
    assert!(html.contains("<div id=\"toast\" class=\"toast\"></div>"));
    assert!(html.contains("Manage Bonus Cards"));
}

#[test]
fn test_missing_regions_are_silently_skipped() {
    let view = page(&signed_in(Role::Customer), "/users");
    let mut document = HtmlDocument::new("Manage Users", "body")
        .without_region(Region::Toast)
        .without_region(Region::Content);

    apply(&view, &mut document);

    assert!(document.toast().is_none());
    assert!(document.region(Region::Content).is_none());
    let html = document.into_html();
    assert!(!html.contains("id=\"toast\""));
    assert!(!html.contains("id=\"content\""));
}

#[test]
fn test_applying_twice_yields_identical_markup() {
    let view = page(&signed_in(Role::Administrator), "/");

    let mut first = HtmlDocument::new("Home", "");
    let mut second = HtmlDocument::new("Home", "");
    apply(&view, &mut first);
    apply(&view, &mut second);
    apply(&view, &mut second);

    assert_eq!(first.into_html(), second.into_html());
}

#[test]
fn test_page_view_json_shape() {
    let view = page(&Identity::Anonymous, "/users");
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["path"], "/users");
    assert_eq!(json["decision"]["allowed"], false);
    assert_eq!(json["decision"]["reason"], "NOT_AUTHENTICATED");
    assert_eq!(json["decision"]["class"], "ADMIN_PAGE");
    assert_eq!(json["effects"][0]["kind"], "show_toast");
    assert_eq!(json["effects"][0]["toast"]["duration_ms"], 3000);
    assert_eq!(json["effects"][1]["kind"], "redirect");
    assert_eq!(json["effects"][1]["location"], "/login");
}
