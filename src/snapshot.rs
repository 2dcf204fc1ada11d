use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Assignment, Submission, SubmissionStatus};

/// Reads the assignment side of a snapshot from CSV.
pub fn load_assignments(path: &Path) -> anyhow::Result<Vec<Assignment>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Uuid,
        subject: String,
        title: String,
        assigned_on: NaiveDate,
        due_at: DateTime<Utc>,
        total_points: Option<f64>,
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open assignments file {}", path.display()))?;
    let mut assignments = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result.context("malformed assignment row")?;
        assignments.push(Assignment {
            id: row.id,
            subject: row.subject,
            title: row.title,
            assigned_on: row.assigned_on,
            due_at: row.due_at,
            total_points: row.total_points,
        });
    }

    Ok(assignments)
}

/// Reads the submission side of a snapshot from CSV, keyed by assignment id.
/// At most one submission per assignment; a second row for the same id is a
/// malformed snapshot, not something to merge.
pub fn load_submissions(path: &Path) -> anyhow::Result<HashMap<Uuid, Submission>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        assignment_id: Uuid,
        status: SubmissionStatus,
        submitted_at: Option<DateTime<Utc>>,
        content: Option<String>,
        attachment_count: u32,
        is_late: bool,
        grade: Option<f64>,
        feedback: Option<String>,
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open submissions file {}", path.display()))?;
    let mut submissions = HashMap::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result.context("malformed submission row")?;
        let previous = submissions.insert(
            row.assignment_id,
            Submission {
                status: row.status,
                submitted_at: row.submitted_at,
                content: row.content,
                attachment_count: row.attachment_count,
                is_late: row.is_late,
                grade: row.grade,
                feedback: row.feedback,
            },
        );
        if previous.is_some() {
            anyhow::bail!(
                "assignment {} has more than one submission row",
                row.assignment_id
            );
        }
    }

    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("homework-progress-{name}"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_assignments_with_optional_points() {
        let path = write_temp(
            "assignments.csv",
            "id,subject,title,assigned_on,due_at,total_points\n\
             2f9f3d0a-8a8e-4f2e-9d5b-111111111111,Math,Fractions,2026-03-01,2026-03-08T17:00:00Z,20\n\
             2f9f3d0a-8a8e-4f2e-9d5b-222222222222,Art,Collage,2026-03-02,2026-03-09T17:00:00Z,\n",
        );
        let assignments = load_assignments(&path).unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].subject, "Math");
        assert_eq!(assignments[0].total_points, Some(20.0));
        assert_eq!(assignments[1].total_points, None);
    }

    #[test]
    fn loads_submissions_and_rejects_duplicates() {
        let path = write_temp(
            "submissions.csv",
            "assignment_id,status,submitted_at,content,attachment_count,is_late,grade,feedback\n\
             2f9f3d0a-8a8e-4f2e-9d5b-111111111111,graded,2026-03-07T12:00:00Z,done,0,false,92,nice\n",
        );
        let submissions = load_submissions(&path).unwrap();
        assert_eq!(submissions.len(), 1);
        let sub = submissions.values().next().unwrap();
        assert_eq!(sub.status, SubmissionStatus::Graded);
        assert_eq!(sub.grade, Some(92.0));

        let dup = write_temp(
            "submissions-dup.csv",
            "assignment_id,status,submitted_at,content,attachment_count,is_late,grade,feedback\n\
             2f9f3d0a-8a8e-4f2e-9d5b-111111111111,submitted,2026-03-07T12:00:00Z,a,0,false,,\n\
             2f9f3d0a-8a8e-4f2e-9d5b-111111111111,submitted,2026-03-07T13:00:00Z,b,0,false,,\n",
        );
        assert!(load_submissions(&dup).is_err());
    }
}
