// ABOUTME: Integration tests for the data access layer against in-memory SQLite
// ABOUTME: Covers scoped reads, ordering, application-level cascades and degraded mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use ferro::database::{
    Database, ExerciseUpdate, NewCardioSession, NewExercise, NewProgressPhoto, NewTemplate,
    NewTemplateExercise, NewUserExercise, NewWorkout, UpsertUser, UserExerciseUpdate,
    WorkoutUpdate,
};
use ferro::models::{Difficulty, MediaType, Pose, UserRole};

async fn test_database() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    let database = Database::from_pool(pool);
    database.migrate().await.expect("migrations");
    database
}

async fn test_user(database: &Database, open_id: &str) -> i64 {
    database
        .upsert_user(&UpsertUser {
            open_id: open_id.to_owned(),
            name: Some("Test User".to_owned()),
            email: Some("test@example.com".to_owned()),
            login_method: Some("google".to_owned()),
            role: None,
        })
        .await
        .expect("user upsert")
}

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("valid test timestamp")
}

fn sample_workout(date: &str) -> NewWorkout {
    NewWorkout {
        name: "Treino A - Peito".to_owned(),
        date: ts(date),
        notes: Some("Treino focado em peito".to_owned()),
        duration: Some(60),
        sleep_hours: None,
        avg_heart_rate: None,
        calories_burned: None,
        exercises: vec![
            NewExercise {
                name: "Supino Reto".to_owned(),
                sets: 4,
                reps: 10,
                weight: 80,
                notes: Some("Boa execução".to_owned()),
            },
            NewExercise {
                name: "Crucifixo".to_owned(),
                sets: 3,
                reps: 12,
                weight: 20,
                notes: None,
            },
            NewExercise {
                name: "Supino Inclinado".to_owned(),
                sets: 4,
                reps: 8,
                weight: 60,
                notes: None,
            },
        ],
        cardio: None,
    }
}

#[tokio::test]
async fn test_upsert_user_is_idempotent_and_refreshes_login() {
    let database = test_database().await;

    let first_id = test_user(&database, "openid-1").await;
    let first = database
        .get_user_by_open_id("openid-1")
        .await
        .unwrap()
        .unwrap();

    let second_id = database
        .upsert_user(&UpsertUser {
            open_id: "openid-1".to_owned(),
            name: None,
            email: None,
            login_method: None,
            role: None,
        })
        .await
        .unwrap();

    let second = database
        .get_user_by_open_id("openid-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first_id, second_id);
    assert_eq!(second.role, UserRole::User);
    // Absent fields keep their stored value
    assert_eq!(second.name.as_deref(), Some("Test User"));
    assert!(second.last_signed_in >= first.last_signed_in);
}

#[tokio::test]
async fn test_create_workout_attaches_children() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let mut workout = sample_workout("2025-06-10T10:00:00Z");
    workout.cardio = Some(NewCardioSession {
        kind: "Corrida".to_owned(),
        duration: 20,
        distance: Some(3500),
        avg_heart_rate: Some(150),
        pace: Some(343),
        calories_burned: Some(250),
        notes: None,
    });

    let workout_id = database.create_workout(user_id, &workout).await.unwrap();
    assert!(workout_id > 0);

    let exercises = database.get_exercises_by_workout(workout_id).await.unwrap();
    assert_eq!(exercises.len(), 3);
    assert_eq!(exercises[0].name, "Supino Reto");
    // Logged exercises record what was done
    assert!(exercises.iter().all(|e| e.completed));

    let cardio = database
        .get_cardio_by_workout(workout_id, user_id)
        .await
        .unwrap();
    assert_eq!(cardio.len(), 1);
    assert_eq!(cardio[0].kind, "Corrida");
    assert_eq!(cardio[0].date, ts("2025-06-10T10:00:00Z"));
}

#[tokio::test]
async fn test_workouts_ordered_most_recent_first() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    database
        .create_workout(user_id, &sample_workout("2025-06-01T10:00:00Z"))
        .await
        .unwrap();
    database
        .create_workout(user_id, &sample_workout("2025-06-15T10:00:00Z"))
        .await
        .unwrap();
    database
        .create_workout(user_id, &sample_workout("2025-06-08T10:00:00Z"))
        .await
        .unwrap();

    let workouts = database.get_workouts_by_user(user_id).await.unwrap();
    let dates: Vec<DateTime<Utc>> = workouts.iter().map(|w| w.date).collect();
    assert_eq!(
        dates,
        vec![
            ts("2025-06-15T10:00:00Z"),
            ts("2025-06-08T10:00:00Z"),
            ts("2025-06-01T10:00:00Z"),
        ]
    );
}

#[tokio::test]
async fn test_delete_workout_cascades_to_children() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let mut workout = sample_workout("2025-06-10T10:00:00Z");
    workout.cardio = Some(NewCardioSession {
        kind: "Esteira".to_owned(),
        duration: 15,
        distance: None,
        avg_heart_rate: None,
        pace: None,
        calories_burned: None,
        notes: None,
    });
    let workout_id = database.create_workout(user_id, &workout).await.unwrap();

    let deleted = database.delete_workout(workout_id, user_id).await.unwrap();
    assert!(deleted);

    assert!(database
        .get_workout_by_id(workout_id, user_id)
        .await
        .unwrap()
        .is_none());
    assert!(database
        .get_exercises_by_workout(workout_id)
        .await
        .unwrap()
        .is_empty());
    assert!(database
        .get_cardio_by_workout(workout_id, user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_cross_user_access_is_denied() {
    let database = test_database().await;
    let owner = test_user(&database, "openid-owner").await;
    let intruder = test_user(&database, "openid-intruder").await;

    let workout_id = database
        .create_workout(owner, &sample_workout("2025-06-10T10:00:00Z"))
        .await
        .unwrap();

    assert!(database
        .get_workout_by_id(workout_id, intruder)
        .await
        .unwrap()
        .is_none());
    assert!(database.get_workouts_by_user(intruder).await.unwrap().is_empty());

    let update = WorkoutUpdate {
        name: Some("Roubado".to_owned()),
        ..WorkoutUpdate::default()
    };
    assert!(!database
        .update_workout(workout_id, intruder, &update)
        .await
        .unwrap());
    assert!(!database.delete_workout(workout_id, intruder).await.unwrap());

    // Still intact for the owner
    assert!(database
        .get_workout_by_id(workout_id, owner)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_partial_workout_update_keeps_absent_fields() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;
    let workout_id = database
        .create_workout(user_id, &sample_workout("2025-06-10T10:00:00Z"))
        .await
        .unwrap();

    let update = WorkoutUpdate {
        name: Some("Treino A - Renomeado".to_owned()),
        ..WorkoutUpdate::default()
    };
    assert!(database.update_workout(workout_id, user_id, &update).await.unwrap());

    let workout = database
        .get_workout_by_id(workout_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workout.name, "Treino A - Renomeado");
    assert_eq!(workout.date, ts("2025-06-10T10:00:00Z"));
    assert_eq!(workout.notes.as_deref(), Some("Treino focado em peito"));
}

#[tokio::test]
async fn test_exercise_update_scoped_through_workout() {
    let database = test_database().await;
    let owner = test_user(&database, "openid-owner").await;
    let intruder = test_user(&database, "openid-intruder").await;
    let workout_id = database
        .create_workout(owner, &sample_workout("2025-06-10T10:00:00Z"))
        .await
        .unwrap();

    let exercise_id = database.get_exercises_by_workout(workout_id).await.unwrap()[0].id;

    let update = ExerciseUpdate {
        completed: Some(false),
        weight: Some(85),
        notes: None,
    };
    assert!(database
        .update_exercise(exercise_id, owner, &update)
        .await
        .unwrap());
    assert!(!database
        .update_exercise(exercise_id, intruder, &update)
        .await
        .unwrap());

    let exercises = database.get_exercises_by_workout(workout_id).await.unwrap();
    let updated = exercises.iter().find(|e| e.id == exercise_id).unwrap();
    assert!(!updated.completed);
    assert_eq!(updated.weight, 85);
    // Absent notes keep their stored value
    assert_eq!(updated.notes.as_deref(), Some("Boa execução"));
}

#[tokio::test]
async fn test_template_positions_follow_creation_order() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let template = NewTemplate {
        name: "Treino A".to_owned(),
        description: Some("Peito e tríceps".to_owned()),
        exercises: vec![
            NewTemplateExercise {
                name: "Supino Reto".to_owned(),
                sets: 4,
                reps: 10,
                weight: 80,
                notes: None,
            },
            NewTemplateExercise {
                name: "Crucifixo".to_owned(),
                sets: 3,
                reps: 12,
                weight: 20,
                notes: None,
            },
            NewTemplateExercise {
                name: "Tríceps Testa".to_owned(),
                sets: 3,
                reps: 10,
                weight: 30,
                notes: None,
            },
        ],
    };

    let template_id = database.create_template(user_id, &template).await.unwrap();
    let exercises = database.get_template_exercises(template_id).await.unwrap();

    assert_eq!(exercises.len(), 3);
    let positions: Vec<i32> = exercises.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(exercises[0].name, "Supino Reto");
    assert_eq!(exercises[2].name, "Tríceps Testa");
}

#[tokio::test]
async fn test_delete_template_cascades() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let template = NewTemplate {
        name: "Treino B".to_owned(),
        description: None,
        exercises: vec![NewTemplateExercise {
            name: "Agachamento".to_owned(),
            sets: 5,
            reps: 5,
            weight: 100,
            notes: None,
        }],
    };
    let template_id = database.create_template(user_id, &template).await.unwrap();

    assert!(database.delete_template(template_id, user_id).await.unwrap());
    assert!(database
        .get_template_by_id(template_id, user_id)
        .await
        .unwrap()
        .is_none());
    assert!(database
        .get_template_exercises(template_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_photo_round_trip_with_null_measurements() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let photo = NewProgressPhoto {
        file_key: "photos/1/1750000000000-frente.jpg".to_owned(),
        url: "http://localhost:8081/uploads/photos/1/1750000000000-frente.jpg".to_owned(),
        pose: Pose::Front,
        week: 1,
        date: ts("2025-06-10T08:00:00Z"),
        notes: None,
        weight: None,
        chest: None,
        waist: None,
        hips: None,
        left_arm: None,
        right_arm: None,
        left_thigh: None,
        right_thigh: None,
        left_calf: None,
        right_calf: None,
    };
    database.create_progress_photo(user_id, &photo).await.unwrap();

    let photos = database.get_progress_photos_by_user(user_id).await.unwrap();
    assert_eq!(photos.len(), 1);
    let stored = &photos[0];
    assert_eq!(stored.pose, Pose::Front);
    assert_eq!(stored.week, 1);
    assert!(stored.weight.is_none());
    assert!(stored.chest.is_none());
    assert!(stored.waist.is_none());
    assert!(stored.hips.is_none());
    assert!(stored.left_arm.is_none());
    assert!(stored.right_arm.is_none());
    assert!(stored.left_thigh.is_none());
    assert!(stored.right_thigh.is_none());
    assert!(stored.left_calf.is_none());
    assert!(stored.right_calf.is_none());

    assert!(database
        .delete_progress_photo(stored.id, user_id)
        .await
        .unwrap());
    assert!(database
        .get_progress_photos_by_user(user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_photos_ordered_most_recent_first() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    for (week, date) in [(1, "2025-05-05T08:00:00Z"), (3, "2025-05-19T08:00:00Z"), (2, "2025-05-12T08:00:00Z")] {
        let photo = NewProgressPhoto {
            file_key: format!("photos/1/week-{week}.jpg"),
            url: format!("http://localhost:8081/uploads/photos/1/week-{week}.jpg"),
            pose: Pose::Side,
            week,
            date: ts(date),
            notes: None,
            weight: None,
            chest: None,
            waist: None,
            hips: None,
            left_arm: None,
            right_arm: None,
            left_thigh: None,
            right_thigh: None,
            left_calf: None,
            right_calf: None,
        };
        database.create_progress_photo(user_id, &photo).await.unwrap();
    }

    let photos = database.get_progress_photos_by_user(user_id).await.unwrap();
    let weeks: Vec<i32> = photos.iter().map(|p| p.week).collect();
    assert_eq!(weeks, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_custom_exercise_update_keeps_media_without_new_upload() {
    let database = test_database().await;
    let user_id = test_user(&database, "openid-1").await;

    let exercise = NewUserExercise {
        name: "Remada Cavalinho".to_owned(),
        muscle_group: "Costas".to_owned(),
        equipment: Some("Barra T".to_owned()),
        difficulty: Difficulty::Intermediario,
        media_url: Some("http://localhost:8081/uploads/exercises/1/1.gif".to_owned()),
        media_type: MediaType::Gif,
        description: None,
    };
    let id = database.create_user_exercise(user_id, &exercise).await.unwrap();

    let update = UserExerciseUpdate {
        name: "Remada Cavalinho".to_owned(),
        muscle_group: "Costas".to_owned(),
        equipment: None,
        difficulty: Some(Difficulty::Avancado),
        media_url: None,
        media_type: None,
        description: Some("Tronco apoiado".to_owned()),
    };
    assert!(database
        .update_user_exercise(id, user_id, &update)
        .await
        .unwrap());

    let stored = database.get_user_exercise(id, user_id).await.unwrap().unwrap();
    assert_eq!(stored.difficulty, Difficulty::Avancado);
    assert_eq!(
        stored.media_url.as_deref(),
        Some("http://localhost:8081/uploads/exercises/1/1.gif")
    );
    assert_eq!(stored.media_type, MediaType::Gif);
    assert_eq!(stored.equipment.as_deref(), Some("Barra T"));
}

#[tokio::test]
async fn test_custom_exercise_delete_is_owner_scoped() {
    let database = test_database().await;
    let owner = test_user(&database, "openid-owner").await;
    let intruder = test_user(&database, "openid-intruder").await;

    let exercise = NewUserExercise {
        name: "Elevação Pélvica".to_owned(),
        muscle_group: "Pernas".to_owned(),
        equipment: None,
        difficulty: Difficulty::Iniciante,
        media_url: None,
        media_type: MediaType::Image,
        description: None,
    };
    let id = database.create_user_exercise(owner, &exercise).await.unwrap();

    assert!(!database.delete_user_exercise(id, intruder).await.unwrap());
    assert!(database.delete_user_exercise(id, owner).await.unwrap());
}

#[tokio::test]
async fn test_unavailable_database_read_write_asymmetry() {
    let database = Database::unavailable();

    // Reads degrade to empty results so the caller renders an empty state
    assert!(database.get_workouts_by_user(1).await.unwrap().is_empty());
    assert!(database.get_progress_photos_by_user(1).await.unwrap().is_empty());
    assert!(database.get_templates_by_user(1).await.unwrap().is_empty());
    assert!(database.get_cardio_by_user(1).await.unwrap().is_empty());
    assert!(database.get_user_exercises(1).await.unwrap().is_empty());
    assert!(database.get_library_exercises(None).await.unwrap().is_empty());
    assert!(database.get_workout_by_id(1, 1).await.unwrap().is_none());

    // Writes fail loudly; silently dropping them would corrupt trust
    assert!(database
        .create_workout(1, &sample_workout("2025-06-10T10:00:00Z"))
        .await
        .is_err());
    assert!(database.delete_workout(1, 1).await.is_err());
    assert!(database
        .upsert_user(&UpsertUser {
            open_id: "openid-1".to_owned(),
            ..UpsertUser::default()
        })
        .await
        .is_err());
}
