//! Navigation path tokens for the four presentation surfaces.

/// One top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Inventory,
    Health,
    Settings,
}

impl Tab {
    /// Tabs in navigation-bar order.
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Inventory, Self::Health, Self::Settings];

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Inventory => "/inventory",
            Self::Health => "/health",
            Self::Settings => "/settings",
        }
    }

    /// Navigation-bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Home",
            Self::Inventory => "Meds",
            Self::Health => "Health",
            Self::Settings => "Family",
        }
    }

    /// Resolves a path token; anything unknown lands on the dashboard.
    pub fn from_path(path: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tab| tab.path() == path)
            .unwrap_or(Self::Dashboard)
    }
}
