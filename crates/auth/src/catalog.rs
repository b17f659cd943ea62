//! Static per-module display metadata: name, category and priority.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use eduerp_core::ModuleId;

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_PRIORITY: u32 = 999;

/// Display metadata for a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub display_name: String,
    pub category: String,
    /// Lower sorts first.
    pub priority: u32,
}

/// Lookup table over module metadata.
///
/// Lookups are total: a module missing from the table falls back to
/// [`DEFAULT_CATEGORY`], [`DEFAULT_PRIORITY`] and its raw id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleCatalog {
    entries: HashMap<ModuleId, ModuleInfo>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(
        mut self,
        module: ModuleId,
        display_name: impl Into<String>,
        category: impl Into<String>,
        priority: u32,
    ) -> Self {
        self.entries.insert(
            module,
            ModuleInfo {
                display_name: display_name.into(),
                category: category.into(),
                priority,
            },
        );
        self
    }

    /// The catalog shipped with the application.
    pub fn standard() -> Self {
        use ModuleId::*;

        [
            (MasterSetup, "Master Setup", "Administration", 1),
            (AcademicOperation, "Academic Operations", "Academics", 2),
            (Lms, "Learning Management System", "Academics", 3),
            (Examination, "Examination", "Academics", 4),
            (Admission, "Admission", "Student Services", 5),
            (StudentInformation, "Student Information System", "Student Services", 6),
            (Attendance, "Attendance Management", "Academics", 7),
            (Timetable, "Timetable Management", "Academics", 8),
            (FeeManagement, "Fee Management", "Finance", 9),
            (FinanceAccounts, "Finance & Accounts", "Finance", 10),
            (HrPayroll, "HR & Payroll", "Administration", 11),
            (Library, "Library Management", "Campus Services", 12),
            (Hostel, "Hostel Management", "Campus Services", 13),
            (Transport, "Transport Management", "Campus Services", 14),
            (Inventory, "Inventory & Assets", "Campus Services", 15),
            (Communication, "Communication", "Engagement", 16),
            (ReportsAnalytics, "Reports & Analytics", "Administration", 17),
            (Placement, "Training & Placement", "Student Services", 18),
        ]
        .into_iter()
        .fold(Self::new(), |catalog, (module, name, category, priority)| {
            catalog.with_module(module, name, category, priority)
        })
    }

    pub fn info(&self, module: ModuleId) -> Option<&ModuleInfo> {
        self.entries.get(&module)
    }

    pub fn display_name(&self, module: ModuleId) -> &str {
        self.info(module)
            .map(|i| i.display_name.as_str())
            .unwrap_or(module.as_str())
    }

    pub fn category(&self, module: ModuleId) -> &str {
        self.info(module)
            .map(|i| i.category.as_str())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn priority(&self, module: ModuleId) -> u32 {
        self.info(module).map_or(DEFAULT_PRIORITY, |i| i.priority)
    }

    /// Display name for an unvalidated module string; unknown ids render as-is.
    pub fn display_name_str<'a>(&'a self, raw: &'a str) -> &'a str {
        match ModuleId::parse(raw) {
            Some(module) => self.display_name(module),
            None => raw,
        }
    }

    pub fn category_str(&self, raw: &str) -> &str {
        ModuleId::parse(raw).map_or(DEFAULT_CATEGORY, |m| self.category(m))
    }

    pub fn priority_str(&self, raw: &str) -> u32 {
        ModuleId::parse(raw).map_or(DEFAULT_PRIORITY, |m| self.priority(m))
    }

    /// Order modules for display: ascending priority, ties broken by id.
    pub fn sort_by_priority(&self, modules: &mut [ModuleId]) {
        modules.sort_by_key(|m| (self.priority(*m), m.as_str()));
    }
}
