//! The five views of the hub. Exactly one is active at a time.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    #[default]
    Dashboard,
    Components,
    Symbols,
    AiDesigner,
    Validator,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Components,
        View::Symbols,
        View::AiDesigner,
        View::Validator,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Components => "Components",
            View::Symbols => "Symbol Library",
            View::AiDesigner => "AI Designer",
            View::Validator => "Validator",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Mission Control",
            View::Components => "Component Database",
            View::Symbols => "Symbol Assets",
            View::AiDesigner => "AI Workbench",
            View::Validator => "Validation Tool",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            View::Dashboard => "System Overview & Quick Actions",
            View::Components => "View and manage component YAML definitions",
            View::Symbols => "Browse machine-readable SVG symbols",
            View::AiDesigner => "Assistive generation powered by Google Gemini",
            View::Validator => "Ensure data consistency and reliability",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Components => 1,
            View::Symbols => 2,
            View::AiDesigner => 3,
            View::Validator => 4,
        }
    }

    /// Cycles to the next view (wraps around)
    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
