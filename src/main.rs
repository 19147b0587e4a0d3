mod app_state;
mod commands;
mod config;
mod dto;
mod enums;
mod error;
mod service;
mod storage;

use anyhow::Context;
use chrono::Local;
use log::{error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::app_state::AppEvent;
use crate::commands::AppCommand;
use crate::config::AppConfig;
use crate::service::AppServices;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;

    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join(format!("app-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("无法创建日志文件 {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // stdout 只留给命令输出
        .filter_level(log::LevelFilter::Warn)
        .filter_module("greencity", cfg.log_level)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    // 初始化数据库
    let db = storage::establish_connection(&cfg.db)
        .await
        .with_context(|| format!("数据库连接失败: {}", cfg.db.url))?;
    let db = Arc::new(db);
    info!("Database ready: {}", cfg.db.url);

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<AppCommand>();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    // 单后台任务按顺序处理命令 (Actor)
    let services = AppServices::new(db);
    let default_language = cfg.default_language.clone();
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let event = commands::dispatch(cmd, &services, &default_language).await;
            if evt_tx.send(event).is_err() {
                break;
            }
        }
    });

    // stdin 读取任务
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let cmd = line
                        .parse::<AppCommand>()
                        .unwrap_or_else(|_| AppCommand::Unknown(line.clone()));
                    if cmd_tx.send(cmd).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("读取 stdin 失败: {}", e);
                    break;
                }
            }
        }
    });

    println!("greencity console, type `help` for commands");
    while let Some(event) = evt_rx.recv().await {
        match event.render() {
            Some(text) if text.is_empty() => {}
            Some(text) => println!("{}", text),
            None => break,
        }
    }
    info!("Console closed");
    Ok(())
}
