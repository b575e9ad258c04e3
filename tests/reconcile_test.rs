use anyhow::Result;
use slot_image_matcher::app::reconcile_use_case::ReconcileUseCase;
use slot_image_matcher::config::Config;
use slot_image_matcher::infra::{DryRunCatalog, FsDirectory, SqliteCatalog};
use slot_image_matcher::report;
use slot_image_matcher::storage::InMemoryCatalog;
use slot_image_matcher::types::Partition;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn touch(dir: &Path, names: &[&str]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for name in names {
        std::fs::write(dir.join(name), b"")?;
    }
    Ok(())
}

fn partition(key: &str, source_id: &str, dir: &Path, extensions: &[&str]) -> Partition {
    Partition {
        key: key.to_string(),
        label: key.to_string(),
        source_id: source_id.to_string(),
        directory: dir.to_path_buf(),
        asset_prefix: format!("/images/slots/{}", key),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_sweet_bonanza_end_to_end() -> Result<()> {
    let temp_dir = tempdir()?;
    let images = temp_dir.path().join("pragmatic");
    touch(&images, &["sweet_bonanza_1000.png", "unknown_game_42.png"])?;

    let catalog = Arc::new(SqliteCatalog::open(temp_dir.path().join("catalog.db"))?);
    catalog.insert_record("pp", "1", "Sweet Bonanza")?;
    catalog.insert_record("pp", "2", "Gates of Olympus")?;

    let use_case = ReconcileUseCase::new(catalog.clone(), Arc::new(FsDirectory));
    let results = use_case
        .reconcile(&[partition("pragmatic", "pp", &images, &[".jpg", ".png"])])
        .await?;

    let result = &results[0];
    assert_eq!(result.accepted.len(), 1);
    assert_eq!(result.accepted[0].file_name, "sweet_bonanza_1000.png");
    assert_eq!(result.accepted[0].record_id, "1");
    assert_eq!(result.accepted[0].score, 100.0);

    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].file_name, "unknown_game_42.png");
    assert_eq!(result.rejected[0].best_score, 0.0);
    assert!(result.rejected[0].best_record_name.is_none());

    assert_eq!(
        catalog.get_record("1")?.unwrap().image_path.as_deref(),
        Some("/images/slots/pragmatic/sweet_bonanza_1000.png")
    );
    assert!(catalog.get_record("2")?.unwrap().image_path.is_none());
    Ok(())
}

#[tokio::test]
async fn test_single_write_for_single_match() -> Result<()> {
    let temp_dir = tempdir()?;
    let images = temp_dir.path().join("pragmatic");
    touch(&images, &["sweet_bonanza_1000.png", "unknown_game_42.png"])?;

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert_with_id("pp", "1", "Sweet Bonanza");
    catalog.insert_with_id("pp", "2", "Gates of Olympus");

    let use_case = ReconcileUseCase::new(catalog.clone(), Arc::new(FsDirectory));
    use_case
        .reconcile(&[partition("pragmatic", "pp", &images, &[".png"])])
        .await?;

    let writes = catalog.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].record_id, "1");
    Ok(())
}

#[tokio::test]
async fn test_partitions_are_isolated() -> Result<()> {
    let temp_dir = tempdir()?;
    let hacksaw = temp_dir.path().join("hacksaw");
    let pragmatic = temp_dir.path().join("pragmatic");
    touch(&hacksaw, &["chaos_crew.jpg"])?;
    touch(&pragmatic, &["pragmatic_1201_sweet_bonanza_1000.png"])?;

    let catalog = Arc::new(InMemoryCatalog::new());
    // Each provider only knows the other provider's game
    catalog.insert_with_id("hs", "1", "Sweet Bonanza");
    catalog.insert_with_id("pp", "2", "Chaos Crew");

    let use_case = ReconcileUseCase::new(catalog.clone(), Arc::new(FsDirectory));
    let results = use_case
        .reconcile(&[
            partition("hacksaw", "hs", &hacksaw, &[".jpg"]),
            partition("pragmatic", "pp", &pragmatic, &[".png"]),
        ])
        .await?;

    assert!(results.iter().all(|r| r.accepted.is_empty()));
    assert_eq!(results[0].rejected.len(), 1);
    assert_eq!(results[1].rejected.len(), 1);
    assert_eq!(results[1].rejected[0].cleaned_name, "sweet bonanza");
    assert!(catalog.writes().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_write_failure_on_second_file_aborts() -> Result<()> {
    let temp_dir = tempdir()?;
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    touch(&first, &["a_chaos_crew.jpg", "b_le_bandit.jpg", "c_dork_unit.jpg"])?;
    touch(&second, &["wanted_dead_or_a_wild.jpg"])?;

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert_with_id("hs", "1", "A Chaos Crew");
    catalog.insert_with_id("hs", "2", "B Le Bandit");
    catalog.insert_with_id("hs", "3", "C Dork Unit");
    catalog.insert_with_id("hs2", "4", "Wanted Dead or a Wild");
    catalog.fail_from_write(2);

    let use_case = ReconcileUseCase::new(catalog.clone(), Arc::new(FsDirectory));
    let outcome = use_case
        .reconcile(&[
            partition("first", "hs", &first, &[".jpg"]),
            partition("second", "hs2", &second, &[".jpg"]),
        ])
        .await;

    assert!(outcome.is_err());
    let writes = catalog.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/images/slots/first/a_chaos_crew.jpg");
    assert!(catalog.get("1").unwrap().image_path.is_some());
    assert!(catalog.get("3").unwrap().image_path.is_none());
    assert!(catalog.get("4").unwrap().image_path.is_none());
    Ok(())
}

#[tokio::test]
async fn test_default_config_with_missing_directories() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = Config::load(&temp_dir.path().join("absent.toml"))?;
    let partitions: Vec<Partition> = config
        .partitions(None)?
        .into_iter()
        .map(|mut p| {
            p.directory = temp_dir.path().join(&p.directory);
            p
        })
        .collect();

    let use_case = ReconcileUseCase::new(Arc::new(InMemoryCatalog::new()), Arc::new(FsDirectory));
    let results = use_case.reconcile(&partitions).await?;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.files_found == 0));
    assert_eq!(
        report::render_unmatched(&results),
        "# Unmatched Hacksaw Images\n\n# Unmatched Pragmatic Images"
    );
    Ok(())
}

#[tokio::test]
async fn test_dry_run_leaves_catalog_untouched() -> Result<()> {
    let temp_dir = tempdir()?;
    let images = temp_dir.path().join("hacksaw");
    touch(&images, &["chaos_crew.jpg", "notes.txt"])?;

    let sqlite = Arc::new(SqliteCatalog::open(temp_dir.path().join("catalog.db"))?);
    sqlite.insert_record("hs", "1", "Chaos Crew")?;
    let dry = Arc::new(DryRunCatalog::new(sqlite.clone()));

    let use_case = ReconcileUseCase::new(dry.clone(), Arc::new(FsDirectory));
    let results = use_case
        .reconcile(&[partition("hacksaw", "hs", &images, &[".jpg"])])
        .await?;

    assert_eq!(results[0].files_found, 2);
    assert_eq!(results[0].accepted.len(), 1);
    assert_eq!(dry.skipped_writes(), 1);
    assert!(sqlite.get_record("1")?.unwrap().image_path.is_none());
    Ok(())
}
