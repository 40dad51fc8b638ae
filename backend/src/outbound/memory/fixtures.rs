//! Seed data for the in-memory backend.
//!
//! The postings mirror the rows inserted by the initial migration so both
//! backends serve the same job board.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::domain::bullet_items;
use crate::domain::ports::{
    ManagerRepository, ManagerRepositoryError, PasswordHashError, PasswordHasher,
};
use crate::domain::{JobPosting, JobStatus, ManagerId, NewManager};

/// Username of the demo account seeded in memory mode.
pub const DEMO_ADMIN_USERNAME: &str = "admin";
/// Password of the demo account seeded in memory mode.
pub const DEMO_ADMIN_PASSWORD: &str = "Admin@123";
/// Display name of the demo account.
pub const DEMO_ADMIN_FULL_NAME: &str = "System Administrator";
const DEMO_ADMIN_EMAIL: &str = "admin@techhive.example";

/// Failures while seeding the demo account.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    #[error(transparent)]
    Store(#[from] ManagerRepositoryError),
}

/// Hash the demo password and store the demo administrator.
pub async fn seed_demo_admin<R, H>(managers: &R, hasher: &H) -> Result<ManagerId, SeedError>
where
    R: ManagerRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let password_hash = hasher.hash(DEMO_ADMIN_PASSWORD).await?;
    let id = managers
        .create(&NewManager {
            username: DEMO_ADMIN_USERNAME.to_owned(),
            password_hash,
            email: DEMO_ADMIN_EMAIL.to_owned(),
            full_name: DEMO_ADMIN_FULL_NAME.to_owned(),
        })
        .await?;
    info!(username = DEMO_ADMIN_USERNAME, "seeded demo manager account");
    Ok(id)
}

fn posted(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The two postings published at launch.
pub fn seeded_job_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            reference: "TVFED01".into(),
            title: "Front-End Developer".into(),
            status: JobStatus::Active,
            overview: "Build accessible, responsive interfaces for TechHive client projects, \
                       working closely with designers and back-end engineers."
                .into(),
            salary_range: "$85,000 - $105,000".into(),
            reports_to: "Lead Front-End Engineer".into(),
            location: "Melbourne, VIC (hybrid)".into(),
            job_type: "Full-time".into(),
            key_responsibilities: bullet_items(
                "• Implement responsive layouts from design mock-ups\n\
                 • Write maintainable HTML5, CSS3 and JavaScript\n\
                 • Review pull requests and mentor junior developers\n\
                 • Collaborate with UX on usability improvements",
            ),
            essential_requirements: bullet_items(
                "• 3+ years of professional front-end experience\n\
                 • Strong knowledge of semantic HTML and modern CSS\n\
                 • Experience with React or Vue\n\
                 • Familiarity with Git-based workflows",
            ),
            preferable_skills: bullet_items(
                "• TypeScript experience\n\
                 • Exposure to automated accessibility testing\n\
                 • Interest in design systems",
            ),
            posted_date: posted(2025, 10, 1),
        },
        JobPosting {
            reference: "TVUXD01".into(),
            title: "Senior UX Designer".into(),
            status: JobStatus::Active,
            overview: "Lead user research and interaction design for web products, turning \
                       customer insight into clear, testable designs."
                .into(),
            salary_range: "$110,000 - $130,000".into(),
            reports_to: "Head of Design".into(),
            location: "Sydney, NSW".into(),
            job_type: "Full-time".into(),
            key_responsibilities: bullet_items(
                "• Plan and run user research sessions\n\
                 • Produce wireframes, prototypes and interaction specifications\n\
                 • Maintain the shared design system\n\
                 • Present design rationale to stakeholders",
            ),
            essential_requirements: bullet_items(
                "• 5+ years in UX or product design\n\
                 • Portfolio demonstrating end-to-end design work\n\
                 • Proficiency with modern prototyping tools",
            ),
            preferable_skills: bullet_items(
                "• Experience designing for accessibility standards\n\
                 • Basic HTML and CSS knowledge",
            ),
            posted_date: posted(2025, 9, 15),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPasswordHasher;
    use crate::outbound::memory::InMemoryManagerRepository;

    #[test]
    fn postings_split_bullets() {
        let postings = seeded_job_postings();
        assert_eq!(postings.len(), 2);
        assert_eq!(
            postings[0].key_responsibilities[0],
            "Implement responsive layouts from design mock-ups"
        );
        assert_eq!(postings[1].preferable_skills.len(), 2);
    }

    #[tokio::test]
    async fn demo_admin_is_stored_with_hash() {
        let repo = InMemoryManagerRepository::new();
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == DEMO_ADMIN_PASSWORD)
            .returning(|_| Ok("$2b$04$demo".to_owned()));

        seed_demo_admin(&repo, &hasher).await.expect("seeded");

        let account = repo.account(DEMO_ADMIN_USERNAME).expect("stored");
        assert_eq!(account.password_hash, "$2b$04$demo");
        assert_eq!(account.full_name, DEMO_ADMIN_FULL_NAME);
    }

    #[tokio::test]
    async fn seeding_twice_conflicts() {
        let repo = InMemoryManagerRepository::new();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("$2b$04$demo".to_owned()));

        seed_demo_admin(&repo, &hasher).await.expect("seeded");
        let error = seed_demo_admin(&repo, &hasher).await.expect_err("duplicate");
        assert!(matches!(error, SeedError::Store(_)));
    }
}
