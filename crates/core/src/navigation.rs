//! Dashboard shell metadata and the client route table.
//!
//! The front-end asks for the shell of the current path and gets back the
//! sidebar items (with the active one marked), the header title and the
//! user's avatar initials.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

/// Root of the dashboard; only matched exactly.
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// Header title when the path has no matching sidebar item.
pub const FALLBACK_TITLE: &str = "Visão Geral";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 8] = [
    NavItem { title: "Dashboard", href: "/dashboard", icon: "bar-chart" },
    NavItem { title: "Agenda", href: "/dashboard/agenda", icon: "calendar" },
    NavItem { title: "Clientes", href: "/dashboard/clientes", icon: "users" },
    NavItem { title: "Serviços", href: "/dashboard/servicos", icon: "scissors" },
    NavItem { title: "Mensagens", href: "/dashboard/mensagens", icon: "message-square" },
    NavItem { title: "Relatórios", href: "/dashboard/relatorios", icon: "file-text" },
    NavItem { title: "Link de Agendamento", href: "/dashboard/link-agendamento", icon: "link" },
    NavItem { title: "Configurações", href: "/dashboard/configuracoes", icon: "settings" },
];

impl NavItem {
    /// Exact match, or prefix match for everything except the dashboard root.
    pub fn is_active(&self, path: &str) -> bool {
        path == self.href || (self.href != DASHBOARD_ROOT && path.starts_with(self.href))
    }
}

/// Header title for `path`.
pub fn page_title(path: &str) -> &'static str {
    NAV_ITEMS
        .iter()
        .find(|item| item.href == path)
        .map(|item| item.title)
        .unwrap_or(FALLBACK_TITLE)
}

/// First letter of each word, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardShell {
    pub path: String,
    pub title: &'static str,
    pub nav: Vec<NavEntry>,
    pub user_name: String,
    pub user_initials: String,
}

pub fn dashboard_shell(path: &str, user_name: &str) -> DashboardShell {
    DashboardShell {
        path: path.to_string(),
        title: page_title(path),
        nav: NAV_ITEMS
            .iter()
            .map(|item| NavEntry {
                item: *item,
                active: item.is_active(path),
            })
            .collect(),
        user_name: user_name.to_string(),
        user_initials: initials(user_name),
    }
}

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub page: &'static str,
    pub requires_auth: bool,
}

const fn route(pattern: &'static str, page: &'static str, requires_auth: bool) -> RouteDef {
    RouteDef {
        pattern,
        page,
        requires_auth,
    }
}

/// Client routes in match order; the catch-all is last.
pub const ROUTES: [RouteDef; 16] = [
    route("/", "landing", false),
    route("/login", "login", false),
    route("/signup", "signup", false),
    route("/onboarding", "onboarding", true),
    route("/agenda/agendar/:linkId?", "public_booking", false),
    route("/agenda/preview", "booking_preview", false),
    route("/dashboard", "dashboard", true),
    route("/dashboard/agenda", "agenda", true),
    route("/dashboard/clientes", "clients", true),
    route("/dashboard/servicos", "services", true),
    route("/dashboard/mensagens", "messages", true),
    route("/dashboard/configuracoes", "settings", true),
    route("/dashboard/relatorios", "reports", true),
    route("/dashboard/link-agendamento", "booking_link", true),
    route("/dashboard/*", "not_found", true),
    route("*", "not_found", false),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: RouteDef,
    /// Value of the `:linkId` segment, when present.
    pub link_id: Option<String>,
}

/// Find the route that renders `path`.
pub fn resolve_route(path: &str) -> RouteMatch {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for def in ROUTES {
        if let Some(link_id) = match_pattern(def.pattern, &segments) {
            return RouteMatch {
                route: def,
                link_id,
            };
        }
    }

    RouteMatch {
        route: ROUTES[ROUTES.len() - 1],
        link_id: None,
    }
}

/// `Some(param)` when `segments` match `pattern`.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    if pattern == "*" {
        return Some(None);
    }
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let mut param = None;

    for (i, part) in parts.iter().enumerate() {
        if *part == "*" {
            return (segments.len() > i).then_some(param);
        }
        match segments.get(i) {
            Some(seg) if part.starts_with(':') => param = Some((*seg).to_string()),
            Some(seg) if seg == part => {}
            None if part.starts_with(':') && part.ends_with('?') => {}
            _ => return None,
        }
    }

    (segments.len() <= parts.len()).then_some(param)
}
