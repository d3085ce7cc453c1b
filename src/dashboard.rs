//! Role dashboards: which tabs a user sees and which one is active.

use std::fmt;

use tracing::debug;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    BillingStaff,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::BillingStaff => "billing staff",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Clinics,
    Patients,
    Providers,
    Billing,
    Receivables,
    Todos,
    Timecards,
    Reports,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Clinics => "Clinics",
            Tab::Patients => "Patients",
            Tab::Providers => "Providers",
            Tab::Billing => "Billing",
            Tab::Receivables => "Accounts Receivable",
            Tab::Todos => "To-Do",
            Tab::Timecards => "Timecards",
            Tab::Reports => "Reports",
        }
    }

    /// Tabs rendered through a domain adapter and the grid
    pub fn is_grid(&self) -> bool {
        matches!(self, Tab::Billing | Tab::Receivables)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const ADMIN_TABS: [Tab; 8] = [
    Tab::Clinics,
    Tab::Patients,
    Tab::Providers,
    Tab::Billing,
    Tab::Receivables,
    Tab::Todos,
    Tab::Timecards,
    Tab::Reports,
];

const BILLING_STAFF_TABS: [Tab; 4] = [Tab::Billing, Tab::Receivables, Tab::Todos, Tab::Timecards];

impl Role {
    pub fn tabs(&self) -> &'static [Tab] {
        match self {
            Role::Admin => &ADMIN_TABS,
            Role::BillingStaff => &BILLING_STAFF_TABS,
        }
    }

    pub fn default_tab(&self) -> Tab {
        match self {
            Role::Admin => Tab::Clinics,
            Role::BillingStaff => Tab::Billing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    role: Role,
    active: Tab,
}

impl Dashboard {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            active: role.default_tab(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) -> Result<(), DashboardError> {
        if !self.role.tabs().contains(&tab) {
            return Err(DashboardError::TabNotAvailable {
                tab: tab.to_string(),
                role: self.role.to_string(),
            });
        }
        debug!(%tab, role = %self.role, "tab selected");
        self.active = tab;
        Ok(())
    }
}
