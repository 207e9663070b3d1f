/// PageTemplate
///
/// The static shell of one storefront page: its title and the body placed in the
/// `content` region before the page view is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTemplate {
    pub path: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const HOME: PageTemplate = PageTemplate {
    path: "/",
    title: "Home",
    body: "<h2>Welcome to the Online Store</h2>",
};

/// Shell served for paths without a registered page.
pub const NOT_FOUND_TITLE: &str = "Page Not Found";
pub const NOT_FOUND_BODY: &str =
    "<h1>404</h1>\n<p>The page you are looking for does not exist.</p>\n<a href=\"/\">Back to the store</a>";

pub const ACCESS_DENIED: PageTemplate = PageTemplate {
    path: "/access-denied",
    title: "Access Denied",
    body: "<h1>403</h1>\n<p>You do not have permission to view this page.</p>\n<a href=\"/\">Back to the store</a>",
};

/// Page shells served by the storefront, keyed by their exact path.
pub const STORE_PAGES: &[PageTemplate] = &[
    HOME,
    // Administration
    PageTemplate {
        path: "/users",
        title: "Manage Users",
        body: "<h1>Manage Users</h1>\n<div id=\"users-table\"></div>",
    },
    PageTemplate {
        path: "/bonus-cards-admin",
        title: "Manage Bonus Cards",
        body: "<h1>Manage Bonus Cards</h1>\n<div id=\"bonus-cards-table\"></div>",
    },
    PageTemplate {
        path: "/products-admin",
        title: "Manage Products",
        body: "<h1>Manage Products</h1>\n<div id=\"products-table\"></div>",
    },
    PageTemplate {
        path: "/orders-admin",
        title: "Manage Orders",
        body: "<h1>Manage Orders</h1>\n<div id=\"orders-table\"></div>",
    },
    // Customer area
    PageTemplate {
        path: "/products-customer",
        title: "Products",
        body: "<h1>Products</h1>\n<div id=\"product-list\"></div>",
    },
    PageTemplate {
        path: "/cart",
        title: "Shopping Cart",
        body: "<h1>Shopping Cart</h1>\n<div id=\"cart-items\"></div>",
    },
    PageTemplate {
        path: "/personal-details",
        title: "My Details",
        body: "<h1>My Details</h1>\n<div id=\"personal-details\"></div>",
    },
    PageTemplate {
        path: "/order-recap",
        title: "Order Recap",
        body: "<h1>Order Recap</h1>\n<div id=\"order-recap\"></div>",
    },
    // Catalog
    PageTemplate {
        path: "/products",
        title: "Products",
        body: "<h1>Products</h1>\n<div id=\"product-list\"></div>",
    },
    PageTemplate {
        path: "/bonus-cards",
        title: "Bonus Cards",
        body: "<h1>Bonus Cards</h1>\n<div id=\"bonus-cards\"></div>",
    },
    PageTemplate {
        path: "/orders",
        title: "Orders",
        body: "<h1>Orders</h1>\n<div id=\"orders\"></div>",
    },
];

/// The page registered at exactly `path`, if any.
pub fn lookup(path: &str) -> Option<PageTemplate> {
    STORE_PAGES.iter().copied().find(|page| page.path == path)
}
