//! Profile Store: per-user profile records.
//!
//! `PgProfileStore` is the production backend. The optimizer only ever reads
//! through `load_profile`; writes come from the profile CRUD endpoints.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    CertificationEntry, EducationEntry, PersonalInfo, UserProfileData, WorkExperienceEntry,
};

/// Profile entry kinds addressable by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    WorkExperience,
    Education,
    Certification,
}

impl EntryKind {
    fn table(self) -> &'static str {
        match self {
            EntryKind::WorkExperience => "work_experiences",
            EntryKind::Education => "education_entries",
            EntryKind::Certification => "certifications",
        }
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Full profile snapshot. Unknown users yield an empty profile.
    async fn load_profile(&self, user_id: Uuid) -> Result<UserProfileData, AppError>;

    async fn save_personal_info(
        &self,
        user_id: Uuid,
        info: &PersonalInfo,
        professional_summary: Option<&str>,
    ) -> Result<(), AppError>;

    async fn add_work_experience(
        &self,
        user_id: Uuid,
        entry: &WorkExperienceEntry,
    ) -> Result<(), AppError>;

    async fn add_education(&self, user_id: Uuid, entry: &EducationEntry) -> Result<(), AppError>;

    async fn add_certification(
        &self,
        user_id: Uuid,
        entry: &CertificationEntry,
    ) -> Result<(), AppError>;

    /// Adding an existing skill name is a no-op.
    async fn add_skill(&self, user_id: Uuid, name: &str) -> Result<(), AppError>;

    /// Returns `false` when no entry with that id belongs to the user.
    async fn delete_entry(&self, user_id: Uuid, kind: EntryKind, id: Uuid)
        -> Result<bool, AppError>;

    async fn remove_skill(&self, user_id: Uuid, name: &str) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct ProfileRow {
    full_name: String,
    email: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    professional_summary: Option<String>,
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn load_profile(&self, user_id: Uuid) -> Result<UserProfileData, AppError> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT full_name, email, phone, location, professional_summary
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let work_experience = sqlx::query_as::<_, WorkExperienceEntry>(
            r#"
            SELECT id, position, company, description, start_date, end_date, is_current_role
            FROM work_experiences
            WHERE user_id = $1
            ORDER BY start_date DESC NULLS LAST, created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let education = sqlx::query_as::<_, EducationEntry>(
            r#"
            SELECT id, degree, field_of_study, institution, gpa, start_date, end_date
            FROM education_entries
            WHERE user_id = $1
            ORDER BY start_date DESC NULLS LAST, created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let certifications = sqlx::query_as::<_, CertificationEntry>(
            r#"
            SELECT id, name, issuer, issue_date
            FROM certifications
            WHERE user_id = $1
            ORDER BY issue_date DESC NULLS LAST, created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let skills: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM skills WHERE user_id = $1 ORDER BY created_at, name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let (personal_info, professional_summary) = match profile {
            Some(row) => (
                PersonalInfo {
                    full_name: row.full_name,
                    email: row.email,
                    phone: row.phone,
                    location: row.location,
                },
                row.professional_summary,
            ),
            None => (PersonalInfo::default(), None),
        };

        Ok(UserProfileData {
            personal_info,
            professional_summary,
            work_experience,
            education,
            certifications,
            skills,
        })
    }

    async fn save_personal_info(
        &self,
        user_id: Uuid,
        info: &PersonalInfo,
        professional_summary: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, full_name, email, phone, location, professional_summary)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                professional_summary = EXCLUDED.professional_summary,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(&info.full_name)
        .bind(&info.email)
        .bind(&info.phone)
        .bind(&info.location)
        .bind(professional_summary)
        .execute(&self.pool)
        .await?;

        info!("Saved personal info for user {user_id}");
        Ok(())
    }

    async fn add_work_experience(
        &self,
        user_id: Uuid,
        entry: &WorkExperienceEntry,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO work_experiences
                (id, user_id, position, company, description, start_date, end_date, is_current_role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(user_id)
        .bind(&entry.position)
        .bind(&entry.company)
        .bind(&entry.description)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .bind(entry.is_current_role)
        .execute(&self.pool)
        .await?;

        info!("Added work experience {} for user {user_id}", entry.id);
        Ok(())
    }

    async fn add_education(&self, user_id: Uuid, entry: &EducationEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO education_entries
                (id, user_id, degree, field_of_study, institution, gpa, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(user_id)
        .bind(&entry.degree)
        .bind(&entry.field_of_study)
        .bind(&entry.institution)
        .bind(entry.gpa)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .execute(&self.pool)
        .await?;

        info!("Added education entry {} for user {user_id}", entry.id);
        Ok(())
    }

    async fn add_certification(
        &self,
        user_id: Uuid,
        entry: &CertificationEntry,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO certifications (id, user_id, name, issuer, issue_date) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.id)
        .bind(user_id)
        .bind(&entry.name)
        .bind(&entry.issuer)
        .bind(entry.issue_date)
        .execute(&self.pool)
        .await?;

        info!("Added certification {} for user {user_id}", entry.id);
        Ok(())
    }

    async fn add_skill(&self, user_id: Uuid, name: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO skills (user_id, name) VALUES ($1, $2) ON CONFLICT (user_id, name) DO NOTHING",
        )
        .bind(user_id)
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_entry(
        &self,
        user_id: Uuid,
        kind: EntryKind,
        id: Uuid,
    ) -> Result<bool, AppError> {
        // Table name comes from a closed enum, never from user input.
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_skill(&self, user_id: Uuid, name: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryProfileStore {
        profiles: Mutex<HashMap<Uuid, UserProfileData>>,
        loads: AtomicUsize,
    }

    impl InMemoryProfileStore {
        pub fn with_profile(user_id: Uuid, profile: UserProfileData) -> Self {
            let store = Self::default();
            store
                .profiles
                .lock()
                .unwrap()
                .insert(user_id, profile);
            store
        }

        /// Number of `load_profile` calls served so far.
        pub fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }

        fn update<R>(&self, user_id: Uuid, f: impl FnOnce(&mut UserProfileData) -> R) -> R {
            let mut profiles = self.profiles.lock().unwrap();
            f(profiles.entry(user_id).or_default())
        }
    }

    fn remove_where<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
        let before = items.len();
        items.retain(|item| !matches(item));
        items.len() < before
    }

    #[async_trait]
    impl ProfileStore for InMemoryProfileStore {
        async fn load_profile(&self, user_id: Uuid) -> Result<UserProfileData, AppError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn save_personal_info(
            &self,
            user_id: Uuid,
            info: &PersonalInfo,
            professional_summary: Option<&str>,
        ) -> Result<(), AppError> {
            self.update(user_id, |p| {
                p.personal_info = info.clone();
                p.professional_summary = professional_summary.map(str::to_string);
            });
            Ok(())
        }

        async fn add_work_experience(
            &self,
            user_id: Uuid,
            entry: &WorkExperienceEntry,
        ) -> Result<(), AppError> {
            self.update(user_id, |p| p.work_experience.push(entry.clone()));
            Ok(())
        }

        async fn add_education(
            &self,
            user_id: Uuid,
            entry: &EducationEntry,
        ) -> Result<(), AppError> {
            self.update(user_id, |p| p.education.push(entry.clone()));
            Ok(())
        }

        async fn add_certification(
            &self,
            user_id: Uuid,
            entry: &CertificationEntry,
        ) -> Result<(), AppError> {
            self.update(user_id, |p| p.certifications.push(entry.clone()));
            Ok(())
        }

        async fn add_skill(&self, user_id: Uuid, name: &str) -> Result<(), AppError> {
            self.update(user_id, |p| {
                if !p.skills.iter().any(|s| s == name) {
                    p.skills.push(name.to_string());
                }
            });
            Ok(())
        }

        async fn delete_entry(
            &self,
            user_id: Uuid,
            kind: EntryKind,
            id: Uuid,
        ) -> Result<bool, AppError> {
            Ok(self.update(user_id, |p| match kind {
                EntryKind::WorkExperience => remove_where(&mut p.work_experience, |e| e.id == id),
                EntryKind::Education => remove_where(&mut p.education, |e| e.id == id),
                EntryKind::Certification => remove_where(&mut p.certifications, |e| e.id == id),
            }))
        }

        async fn remove_skill(&self, user_id: Uuid, name: &str) -> Result<bool, AppError> {
            Ok(self.update(user_id, |p| remove_where(&mut p.skills, |s| s == name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryProfileStore;
    use super::*;

    #[test]
    fn test_entry_kind_tables() {
        assert_eq!(EntryKind::WorkExperience.table(), "work_experiences");
        assert_eq!(EntryKind::Education.table(), "education_entries");
        assert_eq!(EntryKind::Certification.table(), "certifications");
    }

    #[tokio::test]
    async fn test_unknown_user_loads_empty_profile() {
        let store = InMemoryProfileStore::default();
        let profile = store.load_profile(Uuid::new_v4()).await.unwrap();
        assert_eq!(profile, UserProfileData::default());
    }

    #[tokio::test]
    async fn test_add_and_delete_round_trip() {
        let store = InMemoryProfileStore::default();
        let user_id = Uuid::new_v4();
        let entry = WorkExperienceEntry {
            id: Uuid::new_v4(),
            position: "Engineer".to_string(),
            ..Default::default()
        };

        store.add_work_experience(user_id, &entry).await.unwrap();
        store.add_skill(user_id, "Rust").await.unwrap();
        store.add_skill(user_id, "Rust").await.unwrap();

        let profile = store.load_profile(user_id).await.unwrap();
        assert_eq!(profile.work_experience.len(), 1);
        assert_eq!(profile.skills, vec!["Rust"]);

        assert!(store
            .delete_entry(user_id, EntryKind::WorkExperience, entry.id)
            .await
            .unwrap());
        assert!(!store
            .delete_entry(user_id, EntryKind::WorkExperience, entry.id)
            .await
            .unwrap());
        assert!(store.remove_skill(user_id, "Rust").await.unwrap());
    }
}
