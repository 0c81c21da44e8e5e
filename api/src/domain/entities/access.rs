//! Access control vocabulary
//!
//! One declarative table maps every protected action to the roles allowed to
//! perform it. Handlers name the action; they never compare role strings.

use serde::Serialize;

use super::Role;

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ManageBilling,
    EditCareerPage,
    ManageIntegrations,
    ManageTeam,
    ManageScorecardTemplates,
    ManageJobs,
    ManageCandidates,
    ViewPipeline,
    ManageApplications,
    ScheduleInterviews,
    SubmitScorecards,
    UploadDocuments,
    ConnectCalendar,
}

const BILLING_ADMINS: &[Role] = &[Role::Owner, Role::Admin];

const CAREER_PAGE_EDITORS: &[Role] = &[Role::OrgAdmin, Role::SuperAdmin];

const ADMINS: &[Role] = &[Role::Owner, Role::Admin, Role::OrgAdmin, Role::SuperAdmin];

const RECRUITING: &[Role] = &[
    Role::Owner,
    Role::Admin,
    Role::OrgAdmin,
    Role::SuperAdmin,
    Role::Recruiter,
];

const HIRING_TEAM: &[Role] = &[
    Role::Owner,
    Role::Admin,
    Role::OrgAdmin,
    Role::SuperAdmin,
    Role::Recruiter,
    Role::HiringManager,
];

impl Action {
    pub const ALL: [Action; 13] = [
        Action::ManageBilling,
        Action::EditCareerPage,
        Action::ManageIntegrations,
        Action::ManageTeam,
        Action::ManageScorecardTemplates,
        Action::ManageJobs,
        Action::ManageCandidates,
        Action::ViewPipeline,
        Action::ManageApplications,
        Action::ScheduleInterviews,
        Action::SubmitScorecards,
        Action::UploadDocuments,
        Action::ConnectCalendar,
    ];

    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Action::ManageBilling => BILLING_ADMINS,
            Action::EditCareerPage => CAREER_PAGE_EDITORS,
            Action::ManageIntegrations | Action::ManageTeam | Action::ManageScorecardTemplates => {
                ADMINS
            }
            Action::ManageJobs | Action::ManageCandidates => RECRUITING,
            Action::ViewPipeline
            | Action::ManageApplications
            | Action::ScheduleInterviews
            | Action::SubmitScorecards
            | Action::UploadDocuments
            | Action::ConnectCalendar => HIRING_TEAM,
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.permitted_roles().contains(&role)
    }
}

impl Role {
    /// Whether every action `other` may perform is also permitted to this role
    pub fn covers(&self, other: Role) -> bool {
        Action::ALL
            .iter()
            .all(|action| !action.permits(other) || action.permits(*self))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            authorized: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            authorized: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_is_owner_and_admin_only() {
        assert!(Action::ManageBilling.permits(Role::Owner));
        assert!(Action::ManageBilling.permits(Role::Admin));
        assert!(!Action::ManageBilling.permits(Role::OrgAdmin));
        assert!(!Action::ManageBilling.permits(Role::SuperAdmin));
    }

    #[test]
    fn career_page_is_org_admin_and_super_admin_only() {
        assert!(Action::EditCareerPage.permits(Role::OrgAdmin));
        assert!(Action::EditCareerPage.permits(Role::SuperAdmin));
        assert!(!Action::EditCareerPage.permits(Role::Owner));
        assert!(!Action::EditCareerPage.permits(Role::Recruiter));
    }

    #[test]
    fn coverage_follows_the_permission_table() {
        for role in Role::ALL {
            assert!(role.covers(role));
            assert!(role.covers(Role::Candidate));
        }
        assert!(Role::Owner.covers(Role::Admin));
        assert!(Role::OrgAdmin.covers(Role::Recruiter));
        assert!(!Role::OrgAdmin.covers(Role::Owner));
        assert!(!Role::Owner.covers(Role::OrgAdmin));
        assert!(Role::Recruiter.covers(Role::HiringManager));
        assert!(!Role::HiringManager.covers(Role::Recruiter));
    }

    #[test]
    fn candidate_role_is_never_permitted() {
        for action in Action::ALL {
            assert!(!action.permits(Role::Candidate), "{} allowed candidate", action);
        }
    }

    #[test]
    fn hiring_manager_cannot_manage_jobs() {
        assert!(!Action::ManageJobs.permits(Role::HiringManager));
        assert!(Action::ViewPipeline.permits(Role::HiringManager));
    }

    #[test]
    fn deny_carries_reason() {
        let decision = AccessDecision::deny("nope");
        assert!(!decision.authorized);
        assert_eq!(decision.reason.as_deref(), Some("nope"));
        assert_eq!(AccessDecision::allow().reason, None);
    }
}
