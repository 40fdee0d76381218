//! Dashboard routes and the sidebar link table.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Landing page.
    #[default]
    Home,
    Chat,
    Research,
    Compare,
}

impl Route {
    /// Path the page lives at in the web dashboard; shown in the footer.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/dashboard",
            Route::Chat => "/dashboard/chat",
            Route::Research => "/dashboard/research",
            Route::Compare => "/dashboard/compare",
        }
    }
}

pub struct SidebarLink {
    pub label: &'static str,
    pub route: Route,
}

/// Sidebar entries, top to bottom.
pub const SIDEBAR_LINKS: [SidebarLink; 3] = [
    SidebarLink {
        label: "Chat with Any Stock",
        route: Route::Chat,
    },
    SidebarLink {
        label: "Research Report",
        route: Route::Research,
    },
    SidebarLink {
        label: "Compare Stocks",
        route: Route::Compare,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_order_and_paths() {
        let labels: Vec<_> = SIDEBAR_LINKS.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            ["Chat with Any Stock", "Research Report", "Compare Stocks"]
        );
        let paths: Vec<_> = SIDEBAR_LINKS.iter().map(|l| l.route.path()).collect();
        assert_eq!(
            paths,
            ["/dashboard/chat", "/dashboard/research", "/dashboard/compare"]
        );
    }
}
