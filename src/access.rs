use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    models::Role,
    toast::{DENIED_TOAST, LOGIN_TOAST, Toast},
};

/// Pages only administrators may view.
pub const ADMIN_PAGES: [&str; 4] = [
    "/users",
    "/bonus-cards-admin",
    "/products-admin",
    "/orders-admin",
];

/// Pages only customers may view.
pub const CUSTOMER_PAGES: [&str; 3] = ["/cart", "/products-customer", "/personal-details"];

/// Where anonymous visitors of a restricted page are sent.
pub const LOGIN_REDIRECT: &str = "/login";

pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied: You do not have permission to view this page.";

/// Markup that replaces the content region on a wrong-role visit.
pub const ACCESS_DENIED_HTML: &str =
    "<h1>Access Denied</h1>\n<p>You do not have permission to view this page.</p>";

/// PageClass
///
/// Classification of a path against the restricted prefix lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PageClass {
    AdminPage,
    CustomerPage,
    Unrestricted,
}

impl PageClass {
    /// The only role allowed on pages of this class, `None` when anyone may view it.
    pub fn required_role(self) -> Option<Role> {
        match self {
            PageClass::AdminPage => Some(Role::Administrator),
            PageClass::CustomerPage => Some(Role::Customer),
            PageClass::Unrestricted => None,
        }
    }

    fn login_prompt(self) -> &'static str {
        match self {
            PageClass::AdminPage => "Please log in to access admin pages.",
            _ => "Please log in to access customer pages.",
        }
    }

    /// The `notice` query value a login redirect carries for this class.
    pub fn login_notice(self) -> Option<&'static str> {
        match self {
            PageClass::AdminPage => Some("admin"),
            PageClass::CustomerPage => Some("customer"),
            PageClass::Unrestricted => None,
        }
    }

    pub fn from_login_notice(notice: &str) -> Option<Self> {
        match notice {
            "admin" => Some(PageClass::AdminPage),
            "customer" => Some(PageClass::CustomerPage),
            _ => None,
        }
    }
}

/// AccessReason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AccessReason {
    Ok,
    NotAuthenticated,
    WrongRole,
}

/// AccessDecision
///
/// The verdict for one page class, computed per page load and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
    pub class: PageClass,
}

impl AccessDecision {
    fn allow(class: PageClass) -> Self {
        Self {
            allowed: true,
            reason: AccessReason::Ok,
            class,
        }
    }

    fn deny(class: PageClass, reason: AccessReason) -> Self {
        Self {
            allowed: false,
            reason,
            class,
        }
    }
}

/// GuardEffect
///
/// One observable consequence of a denial, applied to the document in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum GuardEffect {
    ShowToast { toast: Toast },
    Redirect { location: String },
    ReplaceContent { html: String },
}

/// GuardOutcome
///
/// The decisions and effects produced for every restricted class a path matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decisions: Vec<AccessDecision>,
    pub effects: Vec<GuardEffect>,
}

impl GuardOutcome {
    /// The overall verdict: the first denial if there is one, otherwise an allow for the
    /// first matched class (or `Unrestricted` when nothing matched).
    pub fn decision(&self) -> AccessDecision {
        self.decisions
            .iter()
            .find(|decision| !decision.allowed)
            .or_else(|| self.decisions.first())
            .copied()
            .unwrap_or(AccessDecision::allow(PageClass::Unrestricted))
    }

    pub fn is_allowed(&self) -> bool {
        self.decisions.iter().all(|decision| decision.allowed)
    }
}

/// AccessPolicy
///
/// The two prefix lists the guard classifies paths against. Matching is
/// case-insensitive "starts-with" on the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    admin_pages: Vec<String>,
    customer_pages: Vec<String>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::storefront()
    }
}

impl AccessPolicy {
    /// The storefront's own page lists. Admin and customer prefixes are disjoint.
    pub fn storefront() -> Self {
        Self::new(ADMIN_PAGES, CUSTOMER_PAGES)
    }

    pub fn new<A, C>(admin_pages: A, customer_pages: C) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let normalize = |page: &str| page.to_lowercase();
        Self {
            admin_pages: admin_pages.into_iter().map(|p| normalize(p.as_ref())).collect(),
            customer_pages: customer_pages
                .into_iter()
                .map(|p| normalize(p.as_ref()))
                .collect(),
        }
    }

    /// classify
    ///
    /// Returns every restricted class whose prefix list matches `path`, admin first.
    /// An empty result means the path is unrestricted.
    pub fn classify(&self, path: &str) -> Vec<PageClass> {
        let path = path.to_lowercase();

        let mut classes = Vec::new();
        if has_prefix(&path, &self.admin_pages) {
            classes.push(PageClass::AdminPage);
        }
        if has_prefix(&path, &self.customer_pages) {
            classes.push(PageClass::CustomerPage);
        }
        classes
    }

    /// evaluate
    ///
    /// Runs the decision table once per matched class. Each class is evaluated
    /// independently, so a path on both lists yields both branches' effects.
    pub fn evaluate(&self, path: &str, role: Option<Role>) -> GuardOutcome {
        let mut outcome = GuardOutcome {
            decisions: Vec::new(),
            effects: Vec::new(),
        };

        for class in self.classify(path) {
            let decision = decide(class, role);
            outcome.effects.extend(effects_for(&decision));
            outcome.decisions.push(decision);
        }

        outcome
    }
}

fn has_prefix(path: &str, pages: &[String]) -> bool {
    pages.iter().any(|page| path.starts_with(page.as_str()))
}

/// decide
///
/// The decision table for one page class and the resolved role.
pub fn decide(class: PageClass, role: Option<Role>) -> AccessDecision {
    match (class.required_role(), role) {
        (None, _) => AccessDecision::allow(class),
        (Some(required), Some(actual)) if required == actual => AccessDecision::allow(class),
        (Some(_), None) => AccessDecision::deny(class, AccessReason::NotAuthenticated),
        (Some(_), Some(_)) => AccessDecision::deny(class, AccessReason::WrongRole),
    }
}

/// login_toast
///
/// The prompt shown to an anonymous visitor turned away from a page of `class`.
pub fn login_toast(class: PageClass) -> Toast {
    Toast::new(class.login_prompt(), LOGIN_TOAST)
}

/// effects_for
///
/// Translates a decision into the document mutations the guard requests.
pub fn effects_for(decision: &AccessDecision) -> Vec<GuardEffect> {
    match decision.reason {
        AccessReason::Ok => Vec::new(),
        AccessReason::NotAuthenticated => vec![
            GuardEffect::ShowToast {
                toast: login_toast(decision.class),
            },
            GuardEffect::Redirect {
                location: LOGIN_REDIRECT.to_string(),
            },
        ],
        AccessReason::WrongRole => vec![
            GuardEffect::ShowToast {
                toast: Toast::new(ACCESS_DENIED_MESSAGE, DENIED_TOAST),
            },
            GuardEffect::ReplaceContent {
                html: ACCESS_DENIED_HTML.to_string(),
            },
        ],
    }
}
