//! Database repository for student registrations.

use crate::db::{
    errors::Result,
    models::students::{Student, StudentWithSlotDBResponse, StudentWriteDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Students<'c> {
    /// Create a new Students repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get a registration by its student identifier (the business key)
    #[instrument(skip(self), err)]
    pub async fn get_by_student_id(&mut self, student_id: &str) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT student_id, name, email, phone_number, project_name,
                   demo_slot_id, created_at, updated_at
            FROM students
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(student)
    }

    /// Insert a new registration row
    #[instrument(skip(self, request), fields(student_id = %request.student_id, demo_slot_id = request.demo_slot_id), err)]
    pub async fn insert(&mut self, request: &StudentWriteDBRequest) -> Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (student_id, name, email, phone_number, project_name, demo_slot_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING student_id, name, email, phone_number, project_name,
                      demo_slot_id, created_at, updated_at
            "#,
        )
        .bind(&request.student_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(&request.project_name)
        .bind(request.demo_slot_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(student)
    }

    /// Update an existing registration's fields and slot reference in place
    #[instrument(skip(self, request), fields(student_id = %request.student_id, demo_slot_id = request.demo_slot_id), err)]
    pub async fn update(&mut self, request: &StudentWriteDBRequest) -> Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET
                name = $2,
                email = $3,
                phone_number = $4,
                project_name = $5,
                demo_slot_id = $6,
                updated_at = NOW()
            WHERE student_id = $1
            RETURNING student_id, name, email, phone_number, project_name,
                      demo_slot_id, created_at, updated_at
            "#,
        )
        .bind(&request.student_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(&request.project_name)
        .bind(request.demo_slot_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(student)
    }

    /// List all registrations joined with their slot's start time, ordered by
    /// start time ascending. Registrations referencing a missing slot row sort
    /// last with a null `demo_time`.
    #[instrument(skip(self), err)]
    pub async fn list_with_slot_times(&mut self) -> Result<Vec<StudentWithSlotDBResponse>> {
        let students = sqlx::query_as::<_, StudentWithSlotDBResponse>(
            r#"
            SELECT s.student_id, s.name, s.project_name, s.email, s.phone_number,
                   ds.time AS demo_time
            FROM students s
            LEFT JOIN demo_slots ds ON s.demo_slot_id = ds.id
            ORDER BY ds.time ASC NULLS LAST
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(students)
    }
}
