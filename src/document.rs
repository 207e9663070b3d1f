use std::collections::BTreeMap;

use crate::{
    access::GuardEffect,
    page::PageView,
    toast::Toast,
    view::escape_html,
};

/// Region
///
/// The element identifiers a storefront page must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    RoleLinks,
    AuthLinks,
    Content,
    Toast,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Region::RoleLinks => "role-specific-links",
            Region::AuthLinks => "auth-links",
            Region::Content => "content",
            Region::Toast => "toast",
        }
    }
}

/// Document
///
/// The side-effecting half of a page load. Implementations silently ignore regions they
/// do not have.
pub trait Document {
    fn set_inner_html(&mut self, region: Region, html: &str);
    fn show_toast(&mut self, toast: &Toast);
    fn navigate(&mut self, location: &str);
}

/// apply
///
/// Writes a `PageView` into a document: navigation regions first, then the renderer's
/// content, then the guard's effects in the order they were decided.
pub fn apply<D: Document + ?Sized>(page: &PageView, document: &mut D) {
    document.set_inner_html(Region::RoleLinks, &page.view.role_links_html());
    document.set_inner_html(Region::AuthLinks, &page.view.auth_links_html());

    if let Some(content) = &page.view.content {
        document.set_inner_html(Region::Content, content);
    }

    for effect in &page.effects {
        match effect {
            GuardEffect::ShowToast { toast } => document.show_toast(toast),
            GuardEffect::Redirect { location } => document.navigate(location),
            GuardEffect::ReplaceContent { html } => document.set_inner_html(Region::Content, html),
        }
    }
}

/// HtmlDocument
///
/// A server-side page shell. Regions hold raw markup; `into_html` serializes the
/// whole page once every mutation has been applied.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    title: String,
    regions: BTreeMap<Region, String>,
    toast: Option<Toast>,
    location: Option<String>,
}

impl HtmlDocument {
    /// A shell exposing every region, with `body` as the initial content.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let regions = BTreeMap::from([
            (Region::RoleLinks, String::new()),
            (Region::AuthLinks, String::new()),
            (Region::Content, body.into()),
            (Region::Toast, String::new()),
        ]);

        Self {
            title: title.into(),
            regions,
            toast: None,
            location: None,
        }
    }

    /// Drops a region from the shell; later writes to it are ignored.
    pub fn without_region(mut self, region: Region) -> Self {
        self.regions.remove(&region);
        self
    }

    pub fn region(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn into_html(self) -> String {
        let region = |region: Region| self.regions.get(&region).map(String::as_str);

        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>{} | Online Store</title>\n",
            escape_html(&self.title)
        ));
        html.push_str("</head>\n<body>\n<nav class=\"navbar\">\n");
        html.push_str("<a href=\"/\" class=\"brand\">Online Store</a>\n");

        for nav in [Region::RoleLinks, Region::AuthLinks] {
            if let Some(inner) = region(nav) {
                html.push_str(&format!("<div id=\"{}\">{}</div>\n", nav.id(), inner));
            }
        }
        html.push_str("</nav>\n");

        if let Some(inner) = region(Region::Content) {
            html.push_str(&format!("<main id=\"{}\">{}</main>\n", Region::Content.id(), inner));
        }

        if region(Region::Toast).is_some() {
            match &self.toast {
                Some(toast) => {
                    html.push_str(&format!(
                        "<div id=\"toast\" class=\"toast show\" data-duration-ms=\"{}\">{}</div>\n",
                        toast.duration_ms,
                        escape_html(&toast.message)
                    ));
                    html.push_str(&format!(
                        "<script>setTimeout(function () {{ var t = document.getElementById('toast'); \
                         if (t) {{ t.className = t.className.replace('show', ''); }} }}, {});</script>\n",
                        toast.duration_ms
                    ));
                }
                None => html.push_str("<div id=\"toast\" class=\"toast\"></div>\n"),
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Document for HtmlDocument {
    fn set_inner_html(&mut self, region: Region, html: &str) {
        if let Some(slot) = self.regions.get_mut(&region) {
            *slot = html.to_string();
        }
    }

    fn show_toast(&mut self, toast: &Toast) {
        if !self.regions.contains_key(&Region::Toast) {
            return;
        }
        self.toast = Some(toast.clone());
    }

    fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}
