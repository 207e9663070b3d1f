use storefront_shell::{
    AppConfig,
    config::Endpoints,
    models::{Identity, Role, User},
    view::{Link, render, role_links},
};

fn endpoints() -> Endpoints {
    AppConfig::default().endpoints()
}

fn user(role: Role) -> Identity {
    Identity::Authenticated(User {
        role,
        name: "Jana Novak".to_string(),
        email: "jana@store.test".to_string(),
    })
}

fn hrefs(links: &[Link]) -> Vec<&str> {
    links.iter().map(|link| link.href.as_str()).collect()
}

#[test]
fn test_administrator_gets_exactly_the_management_links() {
    let view = render(&user(Role::Administrator), "/products", &endpoints());

    assert_eq!(
        hrefs(&view.role_links),
        vec!["/users", "/bonus-cards-admin", "/products-admin", "/orders-admin"]
    );
    for customer_link in role_links(Role::Customer) {
        assert!(!view.role_links.contains(&customer_link));
        assert!(!view.role_links_html().contains(&format!("\"{}\"", customer_link.href)));
    }
    assert_eq!(view.logout_action.as_deref(), Some("http://localhost:8081/logout"));
    assert!(view.auth_links.is_empty());
}

#[test]
fn test_customer_gets_shopping_links_and_logout() {
    let view = render(&user(Role::Customer), "/products", &endpoints());

    assert_eq!(
        hrefs(&view.role_links),
        vec!["/products-customer", "/cart", "/personal-details"]
    );
    let labels: Vec<_> = view.role_links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Products", "Shopping Cart", "My Details"]);

    let auth = view.auth_links_html();
    assert!(auth.contains("action=\"http://localhost:8081/logout\""));
    assert!(auth.contains("method=\"POST\""));
    assert!(auth.contains(">Logout</button>"));
}

#[test]
fn test_anonymous_gets_login_and_register_only() {
    let view = render(&Identity::Anonymous, "/products", &endpoints());

    assert!(view.role_links.is_empty());
    assert_eq!(view.role_links_html(), "");
    assert_eq!(
        view.auth_links,
        vec![Link::new("/login", "Login"), Link::new("/register", "Register")]
    );
    assert!(view.logout_action.is_none());

    let auth = view.auth_links_html();
    assert!(auth.contains("<a href=\"/login\" class=\"btn btn-secondary\">Login</a>"));
    assert!(auth.contains("<a href=\"/register\" class=\"btn btn-primary\">Register</a>"));
    assert!(!auth.contains("Logout"));
}

#[test]
fn test_home_content_welcomes_by_identity() {
    let anonymous = render(&Identity::Anonymous, "/", &endpoints());
    let content = anonymous.content.expect("home page content");
    assert!(content.contains("Welcome to the Online Store"));
    assert!(content.contains("<a href=\"/login\">log in</a>"));

    let signed_in = render(&user(Role::Customer), "/", &endpoints());
    let content = signed_in.content.expect("home page content");
    assert!(content.contains("<h2>Welcome, Jana Novak!</h2>"));
    assert!(content.contains("<strong>Email:</strong> jana@store.test"));
}

#[test]
fn test_content_untouched_outside_home() {
    for identity in [Identity::Anonymous, user(Role::Administrator)] {
        assert!(render(&identity, "/products", &endpoints()).content.is_none());
    }
}

#[test]
fn test_greeting_falls_back_to_email() {
    let identity = Identity::Authenticated(User {
        role: Role::Customer,
        name: String::new(),
        email: "anon@store.test".to_string(),
    });

    let content = render(&identity, "/", &endpoints()).content.unwrap();
    assert!(content.contains("<h2>Welcome, anon@store.test!</h2>"));
}

#[test]
fn test_user_text_is_escaped() {
    let identity = Identity::Authenticated(User {
        role: Role::Customer,
        name: "<script>alert(1)</script>".to_string(),
        email: "x@store.test".to_string(),
    });

    let content = render(&identity, "/", &endpoints()).content.unwrap();
    assert!(!content.contains("<script>"));
    assert!(content.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn test_rendering_is_idempotent() {
    for identity in [
        Identity::Anonymous,
        user(Role::Administrator),
        user(Role::Customer),
    ] {
        for path in ["/", "/cart"] {
            let first = render(&identity, path, &endpoints());
            let second = render(&identity, path, &endpoints());

            assert_eq!(first, second);
            assert_eq!(first.role_links_html(), second.role_links_html());
            assert_eq!(first.auth_links_html(), second.auth_links_html());
            assert_eq!(first.content, second.content);
        }
    }
}
