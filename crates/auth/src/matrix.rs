//! Role → module grants and the per-module override rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use eduerp_core::ModuleId;

use crate::roles::{Role, role_list_allows};

/// What a single role may enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleGrant {
    /// Every module in the closed set, including ones nobody is listed for.
    All,
    /// An explicit list; order is priority within the role, not membership.
    Only(Vec<ModuleId>),
}

impl ModuleGrant {
    pub fn none() -> Self {
        ModuleGrant::Only(Vec::new())
    }

    pub fn contains(&self, module: ModuleId) -> bool {
        match self {
            ModuleGrant::All => true,
            ModuleGrant::Only(modules) => modules.contains(&module),
        }
    }
}

/// Mapping from every role to the modules it may enter.
///
/// The standard matrix has exactly one entry per [`Role`]. Matrices built by
/// hand or loaded from configuration can drift; the policy layer treats a
/// missing entry as "no access".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMatrix {
    entries: BTreeMap<Role, ModuleGrant>,
}

impl AccessMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, role: Role, grant: ModuleGrant) -> Self {
        self.entries.insert(role, grant);
        self
    }

    pub fn without_entry(mut self, role: Role) -> Self {
        self.entries.remove(&role);
        self
    }

    pub fn grant(&self, role: Role) -> Option<&ModuleGrant> {
        self.entries.get(&role)
    }

    /// Roles with no entry at all (matrix drift).
    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| !self.entries.contains_key(r))
            .collect()
    }

    /// The matrix shipped with the application.
    ///
    /// `staff` is hard-coded to the same list as `faculty` and `student`.
    ///
    /// No role lists `admission`, so it is closed to every listed grant.
    /// `super-admin` holds [`ModuleGrant::All`] so that its summary reaches
    /// 100 %. That wildcard is the only way into `admission`, which makes
    /// `super-admin` its single grantee. Listing modules for `super-admin`
    /// instead would leave `admission` unreachable and cap it below 100 %.
    pub fn standard() -> Self {
        use ModuleId::*;

        let institution = vec![
            AcademicOperation,
            Lms,
            Examination,
            StudentInformation,
            Attendance,
            Timetable,
            FeeManagement,
            HrPayroll,
            Communication,
            ReportsAnalytics,
            Placement,
        ];
        let classroom = vec![AcademicOperation, Lms, Examination, Attendance, Timetable, Communication];

        Self::new()
            .with_entry(Role::SuperAdmin, ModuleGrant::All)
            .with_entry(
                Role::Admin,
                ModuleGrant::Only(vec![
                    AcademicOperation,
                    Lms,
                    Examination,
                    StudentInformation,
                    Attendance,
                    Timetable,
                    FeeManagement,
                    FinanceAccounts,
                    HrPayroll,
                    Library,
                    Hostel,
                    Transport,
                    Inventory,
                    Communication,
                    ReportsAnalytics,
                    Placement,
                ]),
            )
            .with_entry(Role::Institution, ModuleGrant::Only(institution.clone()))
            .with_entry(Role::Principal, ModuleGrant::Only(institution))
            .with_entry(
                Role::Hod,
                ModuleGrant::Only(vec![
                    AcademicOperation,
                    Lms,
                    Examination,
                    StudentInformation,
                    Attendance,
                    Timetable,
                    Communication,
                    ReportsAnalytics,
                ]),
            )
            .with_entry(Role::Faculty, ModuleGrant::Only(classroom.clone()))
            .with_entry(Role::Staff, ModuleGrant::Only(classroom.clone()))
            .with_entry(Role::Student, ModuleGrant::Only(classroom))
            .with_entry(Role::Parent, ModuleGrant::none())
    }
}

/// Override for exactly one module: its role list replaces the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialModuleRule {
    pub module: ModuleId,
    pub allowed_roles: Vec<Role>,
    pub description: String,
    /// The role that sees every module while inside `module`.
    pub universal_access_role: Option<Role>,
}

impl SpecialModuleRule {
    /// `master-setup` is reserved for `super-admin`.
    pub fn master_setup() -> Self {
        Self {
            module: ModuleId::MasterSetup,
            allowed_roles: vec![Role::SuperAdmin],
            description: "Master Setup is restricted to super administrators, who may switch into any module from it"
                .to_string(),
            universal_access_role: Some(Role::SuperAdmin),
        }
    }

    pub fn governs(&self, module: ModuleId) -> bool {
        self.module == module
    }

    pub fn allows(&self, role: Role) -> bool {
        role_list_allows(&self.allowed_roles, role)
    }

    pub fn grants_universal_access(&self, role: Role) -> bool {
        self.universal_access_role.is_some_and(|r| r.matches(role))
    }
}
