//! Store-level checks against a real Postgres. Skipped unless DATABASE_URL is set.
//!
//! The database is shared between runs, so every test works on its own fresh client ids.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use psych_study_api::config::AppConfig;
use psych_study_api::database::models::{QuizRecord, TaskItem};
use psych_study_api::database::{open_store, Store};
use psych_study_api::seed::BUILTIN_SLUGS;
use psych_study_api::services::{CatalogueService, ServiceError, StateService, StatusService};

struct PgContext {
    store: Arc<dyn Store>,
    catalogue: CatalogueService,
    state: StateService,
    status: StatusService,
}

async fn postgres() -> Result<Option<PgContext>> {
    // Same .env the server reads
    dotenvy::dotenv().ok();
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping Postgres store test");
            return Ok(None);
        }
    };

    let mut config = AppConfig::development().database;
    config.url = Some(url);
    let store = open_store(&config).await?;

    let catalogue = CatalogueService::new(store.clone());
    catalogue.seed_if_empty().await?;
    let state = StateService::new(store.clone(), catalogue.clone());
    let status = StatusService::new(store.clone(), usize::MAX);

    Ok(Some(PgContext {
        store,
        catalogue,
        state,
        status,
    }))
}

fn fresh_id() -> String {
    format!("pg-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
async fn seed_is_idempotent_and_keeps_builtin_order() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };

    assert_eq!(ctx.catalogue.seed_if_empty().await?, 0);

    let slugs: Vec<String> = ctx
        .catalogue
        .list_branches()
        .await?
        .into_iter()
        .map(|b| b.slug)
        .collect();
    assert_eq!(slugs, BUILTIN_SLUGS);
    Ok(())
}

#[tokio::test]
async fn tasks_fall_back_then_round_trip() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    let schedule = ctx.catalogue.get_branch("cognitive").await?.schedule;
    assert_eq!(ctx.state.get_tasks(&id, "cognitive").await?, schedule);
    assert!(ctx.state.get_state(&id).await?.tasks.is_empty());

    ctx.state.set_tasks(&id, "cognitive", &[]).await?;
    assert!(ctx.state.get_tasks(&id, "cognitive").await?.is_empty());

    let items = vec![TaskItem::new("Stroop demo", true), TaskItem::new("Read ch. 4", false)];
    ctx.state.set_tasks(&id, "cognitive", &items).await?;
    assert_eq!(ctx.state.get_tasks(&id, "cognitive").await?, items);
    Ok(())
}

#[tokio::test]
async fn lower_quiz_best_overwrites_and_other_slugs_survive() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    ctx.state.set_quiz_best(&id, "social", 5).await?;
    ctx.state.set_quiz_best(&id, "clinical", 3).await?;
    ctx.state.set_quiz_best(&id, "social", 2).await?;

    let quiz = ctx.state.get_quiz_progress(&id).await?;
    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz.get("social"), Some(&QuizRecord { best: 2 }));
    assert_eq!(quiz.get("clinical"), Some(&QuizRecord { best: 3 }));
    Ok(())
}

#[tokio::test]
async fn field_writes_do_not_clobber_each_other() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    let (a, b, c) = tokio::join!(
        ctx.state.set_bookmark(&id, "clinical", true),
        ctx.state.set_notes(&id, "CBT thought record"),
        ctx.state.set_quiz_best(&id, "clinical", 1),
    );
    a?;
    b?;
    c?;

    let state = ctx.state.get_state(&id).await?;
    assert_eq!(state.bookmarks.get("clinical"), Some(&true));
    assert_eq!(state.notes, "CBT thought record");
    assert_eq!(state.quiz.get("clinical"), Some(&QuizRecord { best: 1 }));
    Ok(())
}

#[tokio::test]
async fn concurrent_ensure_creates_exactly_once() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    let (a, b) = tokio::join!(ctx.state.ensure_state(&id), ctx.state.ensure_state(&id));
    let (a, b) = (a?, b?);
    assert!(a.created != b.created);
    assert_eq!(a.state.created_at, b.state.created_at);
    Ok(())
}

#[tokio::test]
async fn setter_upserts_missing_record() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    ctx.store.set_notes(&id, "written first", Utc::now()).await?;

    let state = ctx.store.find_state(&id).await?.expect("record created by setter");
    assert_eq!(state.notes, "written first");
    assert!(state.bookmarks.is_empty());
    Ok(())
}

#[tokio::test]
async fn status_checks_list_oldest_first() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };

    let first = ctx.status.record(&fresh_id()).await?;
    let second = ctx.status.record(&fresh_id()).await?;

    let listed = ctx.status.list().await?;
    let pos = |id: uuid::Uuid| listed.iter().position(|c| c.id == id);
    let (Some(i), Some(j)) = (pos(first.id), pos(second.id)) else {
        anyhow::bail!("recorded checks missing from listing");
    };
    assert!(i < j);
    Ok(())
}

#[tokio::test]
async fn nul_text_never_reaches_postgres() -> Result<()> {
    let Some(ctx) = postgres().await? else { return Ok(()) };
    let id = fresh_id();

    assert!(matches!(
        ctx.state.set_notes(&id, "a\u{0}b").await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        ctx.state
            .set_tasks(&id, "methods", &[TaskItem::new("x\u{0}y", false)])
            .await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        ctx.state.get_state("c\u{0}1").await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(ctx.store.find_state(&id).await?.is_none());
    Ok(())
}
