use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    config::Endpoints,
    models::{Identity, Role, User},
};

/// The path whose content region the renderer owns.
pub const HOME_PATH: &str = "/";

/// Link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Link {
    pub href: String,
    pub label: String,
}

impl Link {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// ViewModel
///
/// Describes the intended state of the navigation regions and, on the home page, the
/// content region. Pure data: building it touches no document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ViewModel {
    /// Links of the `role-specific-links` region.
    pub role_links: Vec<Link>,
    /// Plain links of the `auth-links` region (login/register for anonymous visitors).
    pub auth_links: Vec<Link>,
    /// Form action of the logout button, present for authenticated sessions only.
    pub logout_action: Option<String>,
    /// Replacement markup for the `content` region; `None` leaves the page body alone.
    pub content: Option<String>,
}

impl ViewModel {
    pub fn role_links_html(&self) -> String {
        links_html(&self.role_links, None)
    }

    pub fn auth_links_html(&self) -> String {
        match &self.logout_action {
            Some(action) => format!(
                "<form action=\"{}\" method=\"POST\" style=\"margin: 0;\">\
                 <button type=\"submit\" class=\"btn btn-secondary\">Logout</button>\
                 </form>",
                escape_html(action)
            ),
            None => {
                let classes = ["btn btn-secondary", "btn btn-primary"];
                self.auth_links
                    .iter()
                    .zip(classes)
                    .map(|(link, class)| link_html(link, Some(class)))
                    .collect()
            }
        }
    }
}

/// render
///
/// Maps an identity to the navigation of its role. Identical inputs always produce an
/// identical model, so the derived markup is byte-for-byte stable.
pub fn render(identity: &Identity, path: &str, endpoints: &Endpoints) -> ViewModel {
    let on_home = path == HOME_PATH;

    match identity {
        Identity::Authenticated(user) => ViewModel {
            role_links: role_links(user.role),
            auth_links: Vec::new(),
            logout_action: Some(endpoints.logout.clone()),
            content: on_home.then(|| welcome_user_html(user)),
        },
        Identity::Anonymous => ViewModel {
            role_links: Vec::new(),
            auth_links: vec![
                Link::new(&endpoints.login_page, "Login"),
                Link::new(&endpoints.register_page, "Register"),
            ],
            logout_action: None,
            content: on_home.then(|| welcome_anonymous_html(endpoints)),
        },
    }
}

/// role_links
///
/// The management links for administrators and the shopping links for customers.
pub fn role_links(role: Role) -> Vec<Link> {
    match role {
        Role::Administrator => vec![
            Link::new("/users", "Manage Users"),
            Link::new("/bonus-cards-admin", "Manage Bonus Cards"),
            Link::new("/products-admin", "Manage Products"),
            Link::new("/orders-admin", "Manage Orders"),
        ],
        Role::Customer => vec![
            Link::new("/products-customer", "Products"),
            Link::new("/cart", "Shopping Cart"),
            Link::new("/personal-details", "My Details"),
        ],
    }
}

fn welcome_user_html(user: &User) -> String {
    format!(
        "<h2>Welcome, {}!</h2>\
         <div class=\"user-details\">\
         <h3>Your Details:</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         </div>",
        escape_html(user.display_name()),
        escape_html(&user.name),
        escape_html(&user.email),
    )
}

fn welcome_anonymous_html(endpoints: &Endpoints) -> String {
    format!(
        "<h2>Welcome to the Online Store</h2>\
         <p>Please <a href=\"{}\">log in</a> or <a href=\"{}\">register</a> to access store features.</p>",
        escape_html(&endpoints.login_page),
        escape_html(&endpoints.register_page),
    )
}

fn links_html(links: &[Link], class: Option<&str>) -> String {
    links.iter().map(|link| link_html(link, class)).collect()
}

fn link_html(link: &Link, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            "<a href=\"{}\" class=\"{}\">{}</a>",
            escape_html(&link.href),
            class,
            escape_html(&link.label)
        ),
        None => format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&link.href),
            escape_html(&link.label)
        ),
    }
}

/// escape_html
///
/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
