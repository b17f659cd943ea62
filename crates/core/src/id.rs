//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! module_ids {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Identifier of a functional business area (closed set).
        ///
        /// The string form is the kebab-case id used in URLs, navigation state
        /// and stored configuration. Declaration order is the canonical
        /// ordering used by `Ord`; display ordering comes from the priority
        /// table instead.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum ModuleId {
            $(
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl ModuleId {
            /// Every module id, in declaration order.
            pub const ALL: &'static [ModuleId] = &[$(ModuleId::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ModuleId::$variant => $id,)+
                }
            }

            fn lookup(candidate: &str) -> Option<Self> {
                match candidate {
                    $($id => Some(ModuleId::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

module_ids! {
    MasterSetup => "master-setup",
    AcademicOperation => "academic-operation",
    Lms => "lms",
    Examination => "examination",
    Admission => "admission",
    StudentInformation => "student-information",
    Attendance => "attendance",
    Timetable => "timetable",
    FeeManagement => "fee-management",
    FinanceAccounts => "finance-accounts",
    HrPayroll => "hr-payroll",
    Library => "library",
    Hostel => "hostel",
    Transport => "transport",
    Inventory => "inventory",
    Communication => "communication",
    ReportsAnalytics => "reports-analytics",
    Placement => "placement",
}

impl ModuleId {
    /// Parse an external string (URL segment, stored state) into a module id.
    ///
    /// Exact, case-sensitive membership test. Returns `None` for anything
    /// outside the closed set.
    pub fn parse(candidate: &str) -> Option<Self> {
        Self::lookup(candidate)
    }
}

/// Pure membership test against the closed module set.
pub fn is_valid_module_id(candidate: &str) -> bool {
    ModuleId::lookup(candidate).is_some()
}

impl core::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| DomainError::invalid_id(format!("ModuleId: unknown module '{s}'")))
    }
}
