// ABOUTME: Seed binary that populates the shared exercise library
// ABOUTME: Inserts popular exercises with demonstration media, skipped when already seeded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Seed the global exercise library with popular exercises

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use ferro::database::{Database, NewLibraryExercise};
use ferro::logging;
use ferro::models::{Difficulty, MediaType};

#[derive(Parser)]
#[command(name = "seed-exercise-library")]
#[command(about = "Populate the shared exercise library")]
pub struct Args {
    /// Database URL (defaults to DATABASE_URL or sqlite:ferro.db)
    #[arg(long)]
    database_url: Option<String>,

    /// Insert even when the library already has rows
    #[arg(long)]
    force: bool,
}

/// Seed entry: name, muscle group, equipment, difficulty, media URL, description
fn seed_entries() -> Vec<NewLibraryExercise> {
    let entries: [(&str, &str, &str, Difficulty, &str, &str); 12] = [
        (
            "Supino Reto com Barra",
            "Peito",
            "Barra",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/supino-reto.gif",
            "Deite no banco reto, pegue a barra com pegada média, desça até o peito e empurre para cima.",
        ),
        (
            "Supino Inclinado com Halteres",
            "Peito",
            "Halteres",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/supino-inclinado.gif",
            "No banco inclinado (30-45°), empurre os halteres para cima mantendo controle.",
        ),
        (
            "Crucifixo com Halteres",
            "Peito",
            "Halteres",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/crucifixo.gif",
            "Abra os braços lateralmente com leve flexão nos cotovelos, depois junte na frente.",
        ),
        (
            "Puxada Frontal",
            "Costas",
            "Máquina",
            Difficulty::Iniciante,
            "https://media.ferro.fit/library/puxada-frontal.gif",
            "Puxe a barra até a altura do queixo mantendo o tronco estável.",
        ),
        (
            "Remada Curvada",
            "Costas",
            "Barra",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/remada-curvada.gif",
            "Com o tronco inclinado, puxe a barra em direção ao abdômen.",
        ),
        (
            "Levantamento Terra",
            "Costas",
            "Barra",
            Difficulty::Avancado,
            "https://media.ferro.fit/library/levantamento-terra.gif",
            "Mantenha a coluna neutra e levante a barra estendendo quadril e joelhos.",
        ),
        (
            "Agachamento Livre",
            "Pernas",
            "Barra",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/agachamento.gif",
            "Desça até as coxas ficarem paralelas ao chão, mantendo os calcanhares apoiados.",
        ),
        (
            "Leg Press 45",
            "Pernas",
            "Máquina",
            Difficulty::Iniciante,
            "https://media.ferro.fit/library/leg-press.gif",
            "Empurre a plataforma sem estender completamente os joelhos.",
        ),
        (
            "Desenvolvimento com Halteres",
            "Ombros",
            "Halteres",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/desenvolvimento.gif",
            "Sentado, empurre os halteres acima da cabeça sem arquear a lombar.",
        ),
        (
            "Elevação Lateral",
            "Ombros",
            "Halteres",
            Difficulty::Iniciante,
            "https://media.ferro.fit/library/elevacao-lateral.gif",
            "Eleve os halteres lateralmente até a altura dos ombros.",
        ),
        (
            "Rosca Direta",
            "Bíceps",
            "Barra",
            Difficulty::Iniciante,
            "https://media.ferro.fit/library/rosca-direta.gif",
            "Flexione os cotovelos trazendo a barra até os ombros, sem balançar o tronco.",
        ),
        (
            "Tríceps Testa",
            "Tríceps",
            "Barra",
            Difficulty::Intermediario,
            "https://media.ferro.fit/library/triceps-testa.gif",
            "Deitado, desça a barra em direção à testa flexionando apenas os cotovelos.",
        ),
    ];

    entries
        .into_iter()
        .map(
            |(name, muscle_group, equipment, difficulty, media_url, description)| {
                NewLibraryExercise {
                    name: name.to_owned(),
                    muscle_group: muscle_group.to_owned(),
                    equipment: Some(equipment.to_owned()),
                    difficulty,
                    media_url: media_url.to_owned(),
                    media_type: MediaType::Gif,
                    description: Some(description.to_owned()),
                }
            },
        )
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    let args = Args::parse();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:ferro.db".to_owned());

    let database = Database::connect(&database_url).await;
    if !database.is_available() {
        bail!("Database not available at {database_url}");
    }
    database.migrate().await?;

    let existing = database.count_library_exercises().await?;
    if existing > 0 && !args.force {
        info!("Exercise library already has {existing} entries, skipping (use --force to add)");
        return Ok(());
    }

    let entries = seed_entries();
    let total = entries.len();
    for entry in &entries {
        database.seed_library_exercise(entry).await?;
    }

    info!("Seeded {total} library exercises");
    Ok(())
}
