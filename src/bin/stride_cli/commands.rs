// ABOUTME: Command implementations for the Stride CLI
// ABOUTME: Each command imports the activity file into the services and prints pretty JSON
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use stride_tracker::coach::CommentaryContext;
use stride_tracker::config::parse_value;
use stride_tracker::models::{
    max_heart_rate_from_age, Activity, EvolutionMetricKind, PeriodType, Statistics, ZoneMethod,
    ZoneSettings,
};
use stride_tracker::services::ServiceContainer;
use tokio::fs;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read an activity array and import it oldest first
async fn import_file(services: &ServiceContainer, file: &Path) -> Result<()> {
    let bytes = fs::read(file)
        .await
        .map_err(|e| anyhow!("cannot read {}: {e}", file.display()))?;
    let mut activities: Vec<Activity> = serde_json::from_slice(&bytes)?;
    activities.sort_by_key(Activity::start_time);

    let count = activities.len();
    for activity in activities {
        services.activities.import(activity).await?;
    }
    info!(file = %file.display(), activities = count, "imported activity file");
    Ok(())
}

fn parse_date(date: Option<&str>) -> Result<DateTime<Utc>> {
    match date {
        None => Ok(Utc::now()),
        Some(raw) => {
            let day: NaiveDate = parse_value("--date", raw)?;
            Ok(day.and_time(NaiveTime::MIN).and_utc())
        }
    }
}

pub async fn stats(services: &ServiceContainer, file: &Path, id: Option<&str>) -> Result<()> {
    import_file(services, file).await?;
    if let Some(id) = id {
        return print_json(&services.activities.statistics(id).await?);
    }
    let mut all: BTreeMap<String, Statistics> = BTreeMap::new();
    for activity in services.activities.list().await? {
        let statistics = services.activities.statistics(activity.id()).await?;
        all.insert(activity.id().to_owned(), statistics);
    }
    print_json(&all)
}

pub async fn zones_configure(
    services: &ServiceContainer,
    age: Option<u32>,
    max_heart_rate: Option<u32>,
    resting: Option<u32>,
    method: &str,
) -> Result<()> {
    let method: ZoneMethod = method.parse()?;
    let max_heart_rate = match (max_heart_rate, age) {
        (Some(max), _) => max,
        (None, Some(age)) => max_heart_rate_from_age(age)?,
        (None, None) => bail!("either --age or --max-heart-rate is required"),
    };

    let settings = match method {
        ZoneMethod::Age => ZoneSettings {
            age,
            max_heart_rate,
            updated_at: Utc::now(),
            ..ZoneSettings::default()
        },
        ZoneMethod::Karvonen => {
            let resting = resting.ok_or_else(|| anyhow!("--resting is required for karvonen"))?;
            ZoneSettings {
                age,
                ..ZoneSettings::karvonen(max_heart_rate, resting)?
            }
        }
        ZoneMethod::Manual => bail!("manual zones cannot be configured from the command line"),
    };

    print_json(&services.zones.configure(settings).await?)
}

pub async fn zones_show(services: &ServiceContainer) -> Result<()> {
    print_json(&services.zones.zones().await?)
}

pub async fn zones_reset(services: &ServiceContainer) -> Result<()> {
    services.zones.reset().await?;
    print_json(&services.zones.settings().await?)
}

pub async fn zones_analyze(services: &ServiceContainer, file: &Path, id: &str) -> Result<()> {
    import_file(services, file).await?;
    let activity = services.activities.get(id).await?;
    print_json(&services.zones.analyze(&activity).await?)
}

pub async fn records(services: &ServiceContainer, file: &Path, sport: Option<&str>) -> Result<()> {
    import_file(services, file).await?;
    print_json(&services.records.current_records(sport).await?)
}

pub async fn period(
    services: &ServiceContainer,
    file: &Path,
    period_type: &str,
    date: Option<&str>,
) -> Result<()> {
    import_file(services, file).await?;
    let period_type: PeriodType = period_type.parse()?;
    let (range, statistics) = services
        .analytics
        .period_statistics(period_type, parse_date(date)?)
        .await?;
    print_json(&serde_json::json!({ "range": range, "statistics": statistics }))
}

pub async fn compare(
    services: &ServiceContainer,
    file: &Path,
    period_type: &str,
    date: Option<&str>,
) -> Result<()> {
    import_file(services, file).await?;
    let period_type: PeriodType = period_type.parse()?;
    print_json(
        &services
            .analytics
            .compare(period_type, parse_date(date)?)
            .await?,
    )
}

pub async fn evolution(
    services: &ServiceContainer,
    file: &Path,
    metric: &str,
    period_type: &str,
    periods: usize,
    date: Option<&str>,
) -> Result<()> {
    import_file(services, file).await?;
    let metric: EvolutionMetricKind = metric.parse()?;
    let period_type: PeriodType = period_type.parse()?;
    print_json(
        &services
            .analytics
            .evolution(metric, period_type, parse_date(date)?, periods)
            .await?,
    )
}

pub async fn coach(services: &ServiceContainer, file: &Path, id: &str) -> Result<()> {
    import_file(services, file).await?;
    let activity = services.activities.get(id).await?;
    let statistics = services.activities.statistics(id).await?;
    let analysis = services.zones.analyze(&activity).await?;
    let new_records = services.records.for_activity(id).await?;

    let context = CommentaryContext::build(&activity, &statistics, Some(&analysis), &new_records);
    println!("{}", context.to_prompt());
    Ok(())
}
