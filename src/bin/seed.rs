//! Seed script for development. Populates a fresh database with sample
//! survey responses of both survey types.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use anyhow::Context;
use serde_json::json;
use sqlx::PgPool;
use surveydash::models::survey::SurveySubmission;
use surveydash::services::{coercion, survey};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = surveydash::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    surveydash::db::run_migrations(&pool).await?;

    println!("=== Survey Seed Script ===");

    let existing = survey::count(&pool).await?;
    if existing > 0 {
        println!("[skip] {existing} responses already stored");
        return Ok(());
    }

    seed_academic_stress(&pool).await?;
    seed_environmental(&pool).await?;

    println!("\n=== Seed complete! ===");
    pool.close().await;
    Ok(())
}

async fn insert(pool: &PgPool, body: serde_json::Value) -> anyhow::Result<()> {
    let submission: SurveySubmission = serde_json::from_value(body)?;
    let answers = coercion::coerce(&submission)?;
    survey::submit(pool, &answers).await?;
    Ok(())
}

struct StudentSample {
    gender: &'static str,
    year_level: &'static str,
    course: &'static str,
    frequency: &'static str,
    source: &'static str,
    level: &'static str,
    effectiveness: &'static str,
    mechanisms: &'static [&'static str],
}

const STUDENTS: &[StudentSample] = &[
    StudentSample {
        gender: "Female",
        year_level: "1st Year College",
        course: "Sciences",
        frequency: "Often",
        source: "Coursework Load",
        level: "High",
        effectiveness: "4",
        mechanisms: &["Physical Exercise", "Social Support"],
    },
    StudentSample {
        gender: "Male",
        year_level: "2nd Year College",
        course: "Engineering and Technology",
        frequency: "Always",
        source: "Performance Pressure",
        level: "High",
        effectiveness: "2",
        mechanisms: &["Hobbies and Leisure Activities"],
    },
    StudentSample {
        gender: "Female",
        year_level: "3rd Year College",
        course: "Health Sciences",
        frequency: "Sometimes",
        source: "Time Management",
        level: "Moderate",
        effectiveness: "3",
        mechanisms: &["Time Management", "Mindfulness and meditation"],
    },
    StudentSample {
        gender: "Prefer not to say",
        year_level: "4th Year College",
        course: "Education",
        frequency: "Rarely",
        source: "Financial Concerns",
        level: "Low",
        effectiveness: "5",
        mechanisms: &["Professional Help"],
    },
    StudentSample {
        gender: "Other",
        year_level: "1st Year College",
        course: "Arts and Humanities",
        frequency: "Often",
        source: "Teacher/Professor",
        level: "Moderate",
        effectiveness: "3",
        mechanisms: &["Relaxation Techniques", "Mindful Living"],
    },
    StudentSample {
        gender: "Male",
        year_level: "3rd Year College",
        course: "Business and Management",
        frequency: "Sometimes",
        source: "Balancing Academics with personal life",
        level: "Moderate",
        effectiveness: "4",
        mechanisms: &["Social Support", "Healthy Lifestyle Choices"],
    },
    StudentSample {
        gender: "Female",
        year_level: "2nd Year College",
        course: "Social Sciences",
        frequency: "Always",
        source: "Coursework Load",
        level: "High",
        effectiveness: "1",
        mechanisms: &["Limit Exposure to Stressors"],
    },
];

async fn seed_academic_stress(pool: &PgPool) -> anyhow::Result<()> {
    for (i, sample) in STUDENTS.iter().enumerate() {
        let sought_help = if i % 3 == 0 { "true" } else { "false" };
        insert(
            pool,
            json!({
                "survey_type": "academic_stress",
                "name": format!("Student {}", i + 1),
                "gender": sample.gender,
                "yearLevel": sample.year_level,
                "course": sample.course,
                "stressFrequency": sample.frequency,
                "stressSource": sample.source,
                "copingMechanisms": sample.mechanisms,
                "copingEffectiveness": sample.effectiveness,
                "stressLevel": sample.level,
                "soughtProfessionalHelp": sought_help,
            }),
        )
        .await?;
    }

    println!("[done] Created {} academic stress responses", STUDENTS.len());
    Ok(())
}

async fn seed_environmental(pool: &PgPool) -> anyhow::Result<()> {
    let samples = [
        ("18-24", "Female", "Bachelor's Degree", "High", "Often"),
        ("25-34", "Male", "Master's Degree", "Very High", "Always"),
        ("Under 18", "Other", "High School", "Low", "Rarely"),
        ("35-44", "Female", "Vocational", "Moderate", "Sometimes"),
        ("45-54", "Male", "Doctorate", "High", "Often"),
    ];

    let total = samples.len();
    for (age, gender, education, knowledge, recycling) in samples {
        insert(
            pool,
            json!({
                "survey_type": "environmental_awareness",
                "age": age,
                "gender": gender,
                "educationLevel": education,
                "location": "Urban",
                "environmentalKnowledge": knowledge,
                "environmentalConcerns": ["Climate Change", "Plastic Pollution"],
                "informationSources": ["Social Media", "News"],
                "recyclingFrequency": recycling,
                "recyclingPractice": recycling,
                "compostingPractice": "Sometimes",
            }),
        )
        .await?;
    }

    println!("[done] Created {total} environmental awareness responses");
    Ok(())
}
