use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    access::{AccessDecision, AccessPolicy, GuardEffect},
    config::Endpoints,
    models::Identity,
    toast::Toast,
    view::{self, ViewModel},
};

/// PageView
///
/// Everything a page load should do to the document: the rendered navigation, the
/// guard's verdict and the ordered effects of any denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PageView {
    pub path: String,
    pub view: ViewModel,
    pub decision: AccessDecision,
    pub effects: Vec<GuardEffect>,
}

impl PageView {
    pub fn toasts(&self) -> Vec<&Toast> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                GuardEffect::ShowToast { toast } => Some(toast),
                _ => None,
            })
            .collect()
    }

    /// The last navigation target requested, which is where the browser ends up.
    pub fn redirect(&self) -> Option<&str> {
        self.effects.iter().rev().find_map(|effect| match effect {
            GuardEffect::Redirect { location } => Some(location.as_str()),
            _ => None,
        })
    }

    /// The content region's final markup after rendering and guarding, if either touched it.
    pub fn content(&self) -> Option<&str> {
        self.effects
            .iter()
            .rev()
            .find_map(|effect| match effect {
                GuardEffect::ReplaceContent { html } => Some(html.as_str()),
                _ => None,
            })
            .or(self.view.content.as_deref())
    }
}

/// render_page
///
/// Combines the renderer and the access guard for one page load. Runs only once the
/// identity has been resolved, so the result never reflects partial identity data.
pub fn render_page(
    identity: &Identity,
    path: &str,
    policy: &AccessPolicy,
    endpoints: &Endpoints,
) -> PageView {
    let view = view::render(identity, path, endpoints);
    let outcome = policy.evaluate(path, identity.role());

    if !outcome.is_allowed() {
        tracing::info!(
            path,
            role = ?identity.role(),
            reason = ?outcome.decision().reason,
            "page access denied"
        );
    }

    PageView {
        path: path.to_string(),
        view,
        decision: outcome.decision(),
        effects: outcome.effects,
    }
}
