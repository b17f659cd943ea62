//! Menu tree model and role/scope filtering.

use serde::{Deserialize, Serialize};

use eduerp_auth::{AccessPolicy, Role, role_list_allows};
use eduerp_core::ModuleId;

use crate::scope::ScopeLock;

/// Where a menu node leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuTarget {
    Route(String),
    Children(Vec<MenuNode>),
}

/// One node of the static navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub label: String,
    pub target: MenuTarget,
    /// `None` means visible to every role.
    #[serde(default)]
    pub allowed_roles: Option<Vec<Role>>,
    /// `None` means cross-cutting, unless inherited from a parent.
    #[serde(default)]
    pub module_id: Option<ModuleId>,
}

impl MenuNode {
    pub fn route(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: MenuTarget::Route(path.into()),
            allowed_roles: None,
            module_id: None,
        }
    }

    pub fn group(label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            label: label.into(),
            target: MenuTarget::Children(children),
            allowed_roles: None,
            module_id: None,
        }
    }

    pub fn for_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.allowed_roles = Some(roles.into());
        self
    }

    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.module_id = Some(module);
        self
    }

    pub fn children(&self) -> &[MenuNode] {
        match &self.target {
            MenuTarget::Children(children) => children.as_slice(),
            MenuTarget::Route(_) => &[],
        }
    }

    /// All route paths under this node, depth-first.
    pub fn routes(&self) -> Vec<&str> {
        match &self.target {
            MenuTarget::Route(path) => vec![path.as_str()],
            MenuTarget::Children(children) => children.iter().flat_map(MenuNode::routes).collect(),
        }
    }
}

/// Route paths of a whole tree, depth-first.
pub fn routes_of(nodes: &[MenuNode]) -> Vec<&str> {
    nodes.iter().flat_map(MenuNode::routes).collect()
}

/// Per-render filter over a static menu tree.
#[derive(Debug, Clone, Copy)]
pub struct MenuFilter<'a> {
    policy: &'a AccessPolicy,
    role: Role,
    lock: ScopeLock,
}

impl<'a> MenuFilter<'a> {
    pub fn new(policy: &'a AccessPolicy, role: Role, lock: ScopeLock) -> Self {
        Self { policy, role, lock }
    }

    /// Produce the visible tree. The input is never modified.
    ///
    /// A node without its own role list or module id inherits its parent's,
    /// so module-less children cannot leak a restricted group.
    pub fn apply(&self, nodes: &[MenuNode]) -> Vec<MenuNode> {
        self.filter_level(nodes, None, None)
    }

    fn filter_level(&self, nodes: &[MenuNode], roles: Option<&[Role]>, module: Option<ModuleId>) -> Vec<MenuNode> {
        nodes
            .iter()
            .filter_map(|node| self.filter_node(node, roles, module))
            .collect()
    }

    fn filter_node(
        &self,
        node: &MenuNode,
        inherited_roles: Option<&[Role]>,
        inherited_module: Option<ModuleId>,
    ) -> Option<MenuNode> {
        let roles = node.allowed_roles.as_deref().or(inherited_roles);
        let module = node.module_id.or(inherited_module);
        let passes = self.role_allowed(roles, module) && self.lock.admits(module);

        match &node.target {
            MenuTarget::Route(_) => passes.then(|| node.clone()),
            MenuTarget::Children(children) => {
                let kept = self.filter_level(children, roles, module);
                (passes || !kept.is_empty()).then(|| MenuNode {
                    label: node.label.clone(),
                    target: MenuTarget::Children(kept),
                    allowed_roles: node.allowed_roles.clone(),
                    module_id: node.module_id,
                })
            }
        }
    }

    /// Module access is checked only together with a role list. A node that
    /// names a module but no roles, even by inheritance, is open to every role
    /// and is narrowed by the scope lock alone. The route guard still checks
    /// the module before the page renders.
    fn role_allowed(&self, roles: Option<&[Role]>, module: Option<ModuleId>) -> bool {
        match roles {
            None => true,
            Some(roles) => {
                role_list_allows(roles, self.role)
                    && module.is_none_or(|m| self.policy.has_module_access(self.role, m))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_STAFF: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Institution,
        Role::Hod,
        Role::Faculty,
        Role::Staff,
    ];

    fn menu() -> Vec<MenuNode> {
        vec![
            MenuNode::route("Dashboard", "/dashboard"),
            MenuNode::group(
                "Master Setup",
                vec![
                    MenuNode::route("Institutions", "/master/institutions"),
                    MenuNode::route("Roles", "/master/roles"),
                ],
            )
            .for_roles([Role::SuperAdmin])
            .in_module(ModuleId::MasterSetup),
            MenuNode::group(
                "Academics",
                vec![
                    MenuNode::route("Subjects", "/academics/subjects"),
                    MenuNode::route("Allotment", "/academics/allotment").for_roles([Role::Admin, Role::Institution]),
                ],
            )
            .for_roles(ALL_STAFF.to_vec())
            .in_module(ModuleId::AcademicOperation),
            MenuNode::group(
                "LMS",
                vec![
                    MenuNode::route("Courses", "/lms/courses"),
                    MenuNode::route("Virtual Classroom", "/lms/virtual-classroom"),
                ],
            )
            .for_roles([Role::SuperAdmin, Role::Admin, Role::Faculty, Role::Student])
            .in_module(ModuleId::Lms),
            MenuNode::route("Exam Schedule", "/exams/schedule")
                .for_roles([Role::Admin, Role::Faculty, Role::Student, Role::Parent])
                .in_module(ModuleId::Examination),
        ]
    }

    fn visible(role: Role, lock: ScopeLock) -> Vec<String> {
        let filtered = MenuFilter::new(AccessPolicy::standard(), role, lock).apply(&menu());
        routes_of(&filtered).into_iter().map(str::to_string).collect()
    }

    #[test]
    fn unscoped_student_sees_their_modules_and_dashboard() {
        assert_eq!(
            visible(Role::Student, ScopeLock::Free),
            vec!["/dashboard", "/lms/courses", "/lms/virtual-classroom", "/exams/schedule"]
        );
    }

    #[test]
    fn locked_view_keeps_only_scope_module_and_cross_cutting_items() {
        assert_eq!(
            visible(Role::Admin, ScopeLock::Locked(ModuleId::Lms)),
            vec!["/dashboard", "/lms/courses", "/lms/virtual-classroom"]
        );
    }

    #[test]
    fn master_setup_hidden_from_everyone_but_super_admin() {
        for role in Role::ALL {
            let routes = visible(*role, ScopeLock::Free);
            assert_eq!(routes.contains(&"/master/roles".to_string()), *role == Role::SuperAdmin, "{role}");
        }
    }

    #[test]
    fn principal_matches_an_institution_entry() {
        let routes = visible(Role::Principal, ScopeLock::Free);
        assert_eq!(routes, vec!["/dashboard", "/academics/subjects", "/academics/allotment"]);
        assert_eq!(routes, visible(Role::Institution, ScopeLock::Free));

        let listed_as = |role: Role| {
            vec![MenuNode::route("Staff Room", "/academics/staff-room")
                .for_roles([role])
                .in_module(ModuleId::AcademicOperation)]
        };
        for user in [Role::Institution, Role::Principal] {
            for listed in [Role::Institution, Role::Principal] {
                let filtered = MenuFilter::new(AccessPolicy::standard(), user, ScopeLock::Free).apply(&listed_as(listed));
                assert_eq!(filtered.len(), 1, "{user} vs list [{listed}]");
            }
        }
    }

    #[test]
    fn children_inherit_the_parent_module_for_scope() {
        let routes = visible(Role::Admin, ScopeLock::Locked(ModuleId::Examination));
        assert_eq!(routes, vec!["/dashboard", "/exams/schedule"]);
    }

    #[test]
    fn role_listed_but_module_denied_is_hidden() {
        // Parent is listed for the exam route but has no module grants.
        assert_eq!(visible(Role::Parent, ScopeLock::Free), vec!["/dashboard"]);
    }

    #[test]
    fn parent_survives_when_only_a_child_passes() {
        let tree = vec![
            MenuNode::group(
                "Reports",
                vec![
                    MenuNode::route("Results", "/reports/results")
                        .for_roles([Role::Student])
                        .in_module(ModuleId::Examination),
                    MenuNode::route("Internal", "/reports/internal"),
                ],
            )
            .for_roles([Role::Admin])
            .in_module(ModuleId::ReportsAnalytics),
        ];
        let filtered = MenuFilter::new(AccessPolicy::standard(), Role::Student, ScopeLock::Free).apply(&tree);
        // "Internal" inherits the admin-only list; "Results" admits students.
        assert_eq!(routes_of(&filtered), vec!["/reports/results"]);
        assert_eq!(filtered[0].label, "Reports");
    }

    #[test]
    fn unrestricted_children_inherit_the_group_restriction() {
        let routes = visible(Role::Student, ScopeLock::Free);
        assert!(!routes.iter().any(|r| r.starts_with("/master")));
        assert!(!routes.contains(&"/academics/subjects".to_string()));
    }

    #[test]
    fn module_without_role_list_is_gated_by_scope_only() {
        let tree = vec![MenuNode::route("Setup Help", "/master/help").in_module(ModuleId::MasterSetup)];
        let shown = |role: Role, lock: ScopeLock| {
            let filtered = MenuFilter::new(AccessPolicy::standard(), role, lock).apply(&tree);
            routes_of(&filtered).into_iter().map(str::to_string).collect::<Vec<_>>()
        };

        assert!(!AccessPolicy::standard().has_module_access(Role::Student, ModuleId::MasterSetup));
        assert_eq!(shown(Role::Student, ScopeLock::Free), vec!["/master/help"]);
        assert_eq!(shown(Role::Student, ScopeLock::Locked(ModuleId::MasterSetup)), vec!["/master/help"]);
        assert!(shown(Role::Student, ScopeLock::Locked(ModuleId::Lms)).is_empty());

        // Adding a role list brings the module check back.
        let listed = vec![
            MenuNode::route("Setup Help", "/master/help")
                .for_roles(Role::ALL.to_vec())
                .in_module(ModuleId::MasterSetup),
        ];
        assert!(MenuFilter::new(AccessPolicy::standard(), Role::Student, ScopeLock::Free).apply(&listed).is_empty());
    }

    #[test]
    fn filtering_does_not_mutate_input() {
        let tree = menu();
        let snapshot = tree.clone();
        let _ = MenuFilter::new(AccessPolicy::standard(), Role::Student, ScopeLock::Locked(ModuleId::Lms)).apply(&tree);
        assert_eq!(tree, snapshot);
    }

    #[test]
    fn menu_nodes_deserialize_from_json() {
        let node: MenuNode = serde_json::from_str(
            r#"{ "label": "Courses", "target": { "route": "/lms/courses" }, "allowed_roles": ["faculty"], "module_id": "lms" }"#,
        )
        .unwrap();
        assert_eq!(
            node,
            MenuNode::route("Courses", "/lms/courses").for_roles([Role::Faculty]).in_module(ModuleId::Lms)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: locking never reveals more than the free view.
        #[test]
        fn locked_view_is_subset_of_free_view(
            role in prop::sample::select(Role::ALL.to_vec()),
            module in prop::sample::select(ModuleId::ALL.to_vec()),
        ) {
            let free = visible(role, ScopeLock::Free);
            let locked = visible(role, ScopeLock::Locked(module));
            for route in &locked {
                prop_assert!(free.contains(route));
            }
            prop_assert!(locked.contains(&"/dashboard".to_string()));
        }
    }
}
