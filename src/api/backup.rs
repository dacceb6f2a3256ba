//! Export, import and file backup routes
//!
//! Backups live under `<config>/backups/backup.<unix>/data.json`, each holding
//! the whole aggregate.

use std::fs;
use std::path::{Path, PathBuf};

use actix_web::{get, post, web, HttpResponse, Responder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use super::{bad_request, not_found, AppState};
use crate::stores::{DashboardData, DashboardStats};
use crate::utils::dates::timestamp_to_relative;

const BACKUP_FILE: &str = "data.json";

#[derive(Debug, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub date: String,
    pub records: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreBackupBody {
    /// Backup to restore; the newest one when missing
    #[serde(default, alias = "backup_dir")]
    pub backup_dir: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    msg: String,
    stats: DashboardStats,
}

/// GET /backup/export
#[get("/export")]
pub async fn export_data(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.snapshot())
}

/// POST /backup/import
#[post("/import")]
pub async fn import_data(
    state: web::Data<AppState>,
    body: web::Json<DashboardData>,
) -> impl Responder {
    let stats = state.store.replace_all(body.into_inner()).await;
    info!(records = stats.total(), "Imported dashboard data");

    HttpResponse::Ok().json(ImportResponse {
        msg: "Imported successfully".to_string(),
        stats,
    })
}

/// POST /backup/create
#[post("/create")]
pub async fn create_backup(state: web::Data<AppState>) -> impl Responder {
    let data = state.store.snapshot();

    match write_backup(&state.backups_dir, &data) {
        Ok(info) => {
            info!(name = %info.name, "Created backup");
            HttpResponse::Ok().json(info)
        }
        Err(e) => {
            error!("Failed to create backup: {:#}", e);
            HttpResponse::InternalServerError().json(json!({"error": "Failed to create backup"}))
        }
    }
}

/// GET /backup/list
#[get("/list")]
pub async fn list_backups(state: web::Data<AppState>) -> impl Responder {
    let backups: Vec<BackupInfo> = backup_dirs(&state.backups_dir)
        .into_iter()
        .map(|(path, ts)| BackupInfo {
            name: dir_name(&path),
            date: timestamp_to_relative(ts),
            records: read_backup(&path).map(|d| d.stats().total()).unwrap_or(0),
        })
        .collect();

    HttpResponse::Ok().json(json!({ "backups": backups }))
}

/// POST /backup/restore
#[post("/restore")]
pub async fn restore_backup(
    state: web::Data<AppState>,
    body: web::Json<RestoreBackupBody>,
) -> impl Responder {
    let target = match &body.backup_dir {
        Some(name) => {
            if !is_backup_name(name) {
                return bad_request(format!("'{}' is not a backup name", name));
            }
            let path = state.backups_dir.join(name);
            if !path.is_dir() {
                return not_found("Backup", name);
            }
            path
        }
        None => match backup_dirs(&state.backups_dir).into_iter().next() {
            Some((path, _)) => path,
            None => {
                return HttpResponse::NotFound().json(json!({"error": "No backups found"}));
            }
        },
    };

    let data = match read_backup(&target) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read backup {}: {:#}", target.display(), e);
            return HttpResponse::InternalServerError()
                .json(json!({"error": "Failed to read backup"}));
        }
    };

    let stats = state.store.replace_all(data).await;
    let name = dir_name(&target);
    info!(name = %name, records = stats.total(), "Restored backup");

    HttpResponse::Ok().json(json!({
        "msg": "Restored successfully",
        "backup": name,
        "stats": stats,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(export_data)
        .service(import_data)
        .service(create_backup)
        .service(list_backups)
        .service(restore_backup);
}

/// Write `data` to a fresh `backup.<unix>` directory
pub fn write_backup(backups_dir: &Path, data: &DashboardData) -> Result<BackupInfo> {
    let ts = chrono::Utc::now().timestamp();
    let name = format!("backup.{}", ts);
    let dir = backups_dir.join(&name);

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup directory {}", dir.display()))?;

    let content = serde_json::to_string_pretty(data).context("Failed to serialize backup")?;
    fs::write(dir.join(BACKUP_FILE), content).context("Failed to write backup file")?;

    Ok(BackupInfo {
        name,
        date: timestamp_to_relative(ts),
        records: data.stats().total(),
    })
}

pub fn read_backup(dir: &Path) -> Result<DashboardData> {
    let file = fs::File::open(dir.join(BACKUP_FILE))
        .with_context(|| format!("Failed to open backup in {}", dir.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file)).context("Failed to parse backup file")
}

/// Backup directories with their timestamps, newest first
fn backup_dirs(backups_dir: &Path) -> Vec<(PathBuf, i64)> {
    let mut entries: Vec<(PathBuf, i64)> = fs::read_dir(backups_dir)
        .into_iter()
        .flat_map(|it| it.flatten())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let ts = backup_timestamp(&dir_name(&path))?;
            Some((path, ts))
        })
        .collect();

    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

fn backup_timestamp(name: &str) -> Option<i64> {
    name.strip_prefix("backup.")?.parse().ok()
}

fn is_backup_name(name: &str) -> bool {
    backup_timestamp(name).is_some()
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
