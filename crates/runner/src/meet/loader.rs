use std::path::{Path, PathBuf};

use engine::models::ScoringConfig;

use super::models::{MeetFile, StandingsReport};
use crate::Result;

pub async fn load_meet(path: &Path) -> Result<MeetFile> {
    tracing::info!("Loading meet from: {}", path.display());
    let json_content = tokio::fs::read_to_string(path).await?;
    let meet: MeetFile = serde_json::from_str(&json_content)?;
    tracing::info!(
        "Loaded meet: {} (v{}, {} lifters)",
        meet.competition.name,
        meet.format_version,
        meet.lifters.len()
    );
    Ok(meet)
}

/// Reads scoring tables from `path`, or falls back to the standard ones.
pub async fn load_scoring(path: Option<&Path>) -> Result<ScoringConfig> {
    let Some(path) = path else {
        tracing::debug!("Using default scoring tables");
        return Ok(ScoringConfig::default());
    };

    tracing::info!("Loading scoring tables from: {}", path.display());
    let json_content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json_content)?)
}

/// Writes the standings as pretty JSON into `output_dir`, named after the
/// competition. Returns the path written.
pub async fn write_standings(output_dir: &Path, report: &StandingsReport) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let filepath = output_dir.join(format!("{}_standings.json", slugify(&report.competition)));
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(&filepath, json).await?;

    tracing::info!("Saved to: {}", filepath.display());
    Ok(filepath)
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meet::models::FORMAT_VERSION;
    use engine::models::{CompetitionState, CompetitionType};

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("meet-runner-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Aalborg Spring Open"), "aalborg-spring-open");
        assert_eq!(slugify("  DM 2026 -- Senior "), "dm-2026-senior");
    }

    #[tokio::test]
    async fn test_load_sample_meet() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("meets/aalborg_spring_open.json");
        let meet = load_meet(&path).await.unwrap();

        assert_eq!(meet.format_version, FORMAT_VERSION);
        assert_eq!(meet.competition.name, "Aalborg Spring Open");
    }

    #[tokio::test]
    async fn test_load_missing_meet_fails() {
        let path = scratch_dir("missing").join("nope.json");
        assert!(matches!(
            load_meet(&path).await,
            Err(crate::RunnerError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_scoring_override() {
        let dir = scratch_dir("scoring");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("scoring.json");
        tokio::fs::write(&path, r#"{"weight_classes": {"men": [60, 80], "women": [50]}}"#)
            .await
            .unwrap();

        let scoring = load_scoring(Some(&path)).await.unwrap();
        assert_eq!(scoring.weight_classes.men, vec![60, 80]);
        assert_eq!(scoring.sinclair, ScoringConfig::default().sinclair);

        assert_eq!(load_scoring(None).await.unwrap(), ScoringConfig::default());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_standings() {
        let dir = scratch_dir("standings");
        let report = StandingsReport {
            competition: "Club Night".to_string(),
            competition_type: CompetitionType::TotalWeight,
            state: CompetitionState::Complete,
            groups: vec![],
            dropped: vec![],
            rejected_events: vec![],
        };

        let path = write_standings(&dir, &report).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "club-night_standings.json");

        let written: StandingsReport =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(written.competition, "Club Night");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
